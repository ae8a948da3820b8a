/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::Location;

/// Error returned when a document cannot be built from the input.
///
/// There is a single failure kind. The tokenizer owns the detailed
/// cause, which is carried here as a human readable description
/// together with the position where the parsing stopped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DocumentError {
    ParseFailed {
        description: String,
        location: Location,
    },
}

impl DocumentError {
    /// Name of the error domain, stable across versions.
    pub const DOMAIN: &'static str = "SimpleXMLDocument";

    /// Stable numeric code of the error within the domain.
    pub fn code(&self) -> i32 {
        match self {
            DocumentError::ParseFailed { .. } => 1,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            DocumentError::ParseFailed { description, .. } => description,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            DocumentError::ParseFailed { location, .. } => *location,
        }
    }
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::ParseFailed {
                description,
                location,
            } => write!(
                f,
                "{} error {}: invalid XML syntax at {}: {}",
                Self::DOMAIN,
                self.code(),
                location,
                description
            ),
        }
    }
}

impl Error for DocumentError {}

pub(super) mod description {
    pub(in super::super) const UNEXPECTED_HANDLER_ABORT: &str = "unexpected handler abort";
    pub(in super::super) const NO_DOCUMENT: &str = "no document parsed yet";
    pub(in super::super) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(in super::super) const CLOSE_WITHOUT_OPEN: &str = "end tag without a start tag";
    pub(in super::super) const CONTENT_WITHOUT_TAG: &str = "content outside of any tag";
}
