/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Type of the error which happened during the XML SAX parsing.
///
/// These categories correspond to the distinct actions the caller
/// might take. Details of a syntax error are available via
/// [error_description()](super::SaxParser::error_description) and its
/// position via [location()](super::SaxParser::location).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaxError {
    /// A syntax error is encountered in the XML input.
    ///
    /// Typical action is telling error details to the user so they can fix the document.
    BadXml,

    /// Element handler function returned an error.
    ///
    /// This is intended for caller's handler to be able to abort the processing while
    /// signalling to the caller that the interruption is not caused by the parser itself.
    HandlerError,
}

impl std::fmt::Display for SaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxError::BadXml => write!(f, "invalid xml syntax"),
            SaxError::HandlerError => write!(f, "error from sax handler"),
        }
    }
}

impl std::error::Error for SaxError {}

/// Error returned from a [SaxHandler](super::SaxHandler) to stop the parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaxHandlerError {
    Abort,
}

impl std::fmt::Display for SaxHandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxHandlerError::Abort => write!(f, "handler aborted the parsing"),
        }
    }
}

impl std::error::Error for SaxHandlerError {}

/// Document level problems the tokenizer does not report by itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum XmlError {
    ParserReuseWithoutReset,
    DocNoContent,
    DocOpenTags,
    DocCdataWithoutParent,
    TagOutsideRoot,
}

impl XmlError {
    pub(super) fn description(&self) -> &'static str {
        match self {
            XmlError::ParserReuseWithoutReset => "cannot continue after a parse without a reset",
            XmlError::DocNoContent => "Document has no root tag",
            XmlError::DocOpenTags => "Document has unclosed tags",
            XmlError::DocCdataWithoutParent => "Character data not allowed outside of the root tag",
            XmlError::TagOutsideRoot => "Tags cannot be outside of the root tag",
        }
    }
}
