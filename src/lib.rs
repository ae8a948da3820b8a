/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod document;
mod entities;
mod parser;
mod path;

pub use parser::Location;
pub use parser::SaxElement;
pub use parser::SaxError;
pub use parser::SaxHandler;
pub use parser::SaxHandlerError;
pub use parser::SaxParser;

pub use document::Attributes;
pub use document::Children;
pub use document::Document;
pub use document::DocumentError;
pub use document::DocumentParser;
pub use document::Element;

pub use path::DEFAULT_DELIMITER;
pub use path::Path;
