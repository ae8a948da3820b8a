/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use tracing::debug;
use tracing::warn;

use crate::Location;
use crate::SaxError;
use crate::SaxParser;
use crate::path::DEFAULT_DELIMITER;

use super::Document;
use super::DocumentBuilder;
use super::error::DocumentError;
use super::error::description;

/// Parses XML input into a [Document].
///
/// A parser handles a single document. Options are set before
/// parsing with the builder style methods.
///
/// ```
/// use simplexml::DocumentParser;
/// # fn main() -> Result<(), simplexml::DocumentError> {
/// let mut parser = DocumentParser::new().path_delimiter('/');
/// parser.parse_bytes(b"<a><b><c>lala</c></b></a>")?;
/// let doc = parser.into_document()?;
/// assert_eq!(doc.value_with_path("b/c"), Some("lala"));
/// # Ok(())
/// # }
/// ```
pub struct DocumentParser {
    builder: DocumentBuilder,
    parser: SaxParser,
    path_delimiter: char,
    error: Option<DocumentError>,
}

impl DocumentParser {
    pub fn new() -> DocumentParser {
        DocumentParser {
            builder: DocumentBuilder::new(),
            parser: SaxParser::new(),
            path_delimiter: DEFAULT_DELIMITER,
            error: None,
        }
    }

    /// Sets the delimiter between the segments of the element paths.
    ///
    /// Default is the '.' character.
    pub fn path_delimiter(mut self, delimiter: char) -> Self {
        self.path_delimiter = delimiter;
        self
    }

    /// Sets whether whitespace only character data is kept in element values.
    ///
    /// Default is keeping all character data.
    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.builder.set_keep_whitespace(keep);
        self
    }

    /// Parses a complete XML document.
    ///
    /// The parser does only one attempt, calling this method again
    /// returns an error.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<(), DocumentError> {
        debug!(bytes = bytes.len(), "parsing document");
        match self.parser.parse_bytes_finish(&mut self.builder, bytes) {
            Ok(()) => Ok(()),
            Err(err) => {
                let description = match err {
                    SaxError::BadXml => self
                        .parser
                        .error_description()
                        .unwrap_or_default()
                        .to_string(),
                    SaxError::HandlerError => self
                        .builder
                        .error()
                        .unwrap_or(description::UNEXPECTED_HANDLER_ABORT)
                        .to_string(),
                };
                let location = self.parser.location();
                warn!(%location, %description, "document parsing failed");
                let error = DocumentError::ParseFailed {
                    description,
                    location,
                };
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Returns the parsed document.
    pub fn into_document(mut self) -> Result<Document, DocumentError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.builder.take() {
            None => Err(DocumentError::ParseFailed {
                description: description::NO_DOCUMENT.to_string(),
                location: self.parser.location(),
            }),
            Some(mut doc) => {
                doc.path_delimiter = self.path_delimiter;
                debug!(elements = doc.nr_elements(), "document parsed");
                Ok(doc)
            }
        }
    }

    pub fn location(&self) -> Location {
        self.parser.location()
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}
