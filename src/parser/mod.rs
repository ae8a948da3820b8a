/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod location;

use std::borrow::Cow;
use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use tracing::trace;

use error::XmlError;
pub use error::SaxError;
pub use error::SaxHandlerError;
pub use location::Location;

/// An XML element returned from the parser.
#[derive(Debug, Eq, PartialEq)]
pub enum SaxElement<'a> {
    /// A start tag or empty element tag.
    ///
    /// The argument is the full name of the tag. Empty element tags
    /// are followed by a matching EndTag right after their attributes.
    StartTag(&'a str),

    /// A tag attribute for the last StartTag.
    ///
    /// First argument is the attribute name and the second argument is the attribute value.
    /// All references in the attribute value are replaced with the actual characters.
    Attribute(&'a str, &'a str),

    /// Indicates that all attributes of the last StartTag are sent.
    StartTagContent,

    /// An end tag element.
    ///
    /// The argument is the full name of the end tag.
    EndTag(&'a str),

    /// A character data element.
    ///
    /// The argument is the text content. Note that you might get this element several times
    /// with different parts of the content for a single continous block of text, for example
    /// around CDATA sections or comments. The [DocumentParser](crate::DocumentParser)
    /// concatenates these parts into the element value.
    CData(&'a str),
}

pub trait SaxHandler {
    fn handle_element(&mut self, element: &SaxElement) -> Result<(), SaxHandlerError>;
}

/// SAX (Simple API for XML) based XML parser.
///
/// This struct drives the `quick-xml` tokenizer over an input buffer
/// and invokes a handler function for each encountered XML element.
/// Tokenizing, entity expansion and tag matching are done by the
/// tokenizer; this parser adds the document level checks such as
/// requiring exactly one root tag.
///
/// # Examples
///
/// ```
/// use simplexml::{SaxElement, SaxError, SaxHandler, SaxHandlerError, SaxParser};
///
/// // Example handler which counts the start tags
/// struct Handler {
///     tags: usize,
/// }
/// impl SaxHandler for Handler {
///     fn handle_element(&mut self, element: &SaxElement) -> Result<(), SaxHandlerError> {
///         if let SaxElement::StartTag(_) = element {
///             self.tags += 1;
///         }
///         Ok(())
///     }
/// }
/// let mut handler = Handler { tags: 0 };
///
/// let mut parser = SaxParser::new();
/// match parser.parse_bytes_finish(&mut handler, b"<doc><a/><b>example</b></doc>") {
///     Ok(()) => assert_eq!(handler.tags, 3),
///     Err(SaxError::BadXml) => {
///         println!("syntax error at {}: {}",
///             parser.location(),
///             parser.error_description().unwrap_or_default(),
///         );
///     }
///     Err(SaxError::HandlerError) => {
///         println!("handler returned error");
///     }
/// }
/// ```
pub struct SaxParser {
    depth: usize,
    seen_root: bool,
    used: bool,
    error: Option<String>,
    location: Location,
}

enum Interrupt {
    Syntax(String),
    Document(XmlError),
    Handler,
}

impl From<SaxHandlerError> for Interrupt {
    fn from(_: SaxHandlerError) -> Self {
        Interrupt::Handler
    }
}

fn syntax(err: impl Display) -> Interrupt {
    Interrupt::Syntax(err.to_string())
}

fn decode(decoder: Decoder, bytes: &[u8]) -> Result<Cow<'_, str>, Interrupt> {
    decoder.decode(bytes).map_err(syntax)
}

impl SaxParser {
    /// Creates a new SAX parser instance.
    ///
    /// The instance can be reused for multiple documents with the [reset()](SaxParser::reset) method.
    pub fn new() -> SaxParser {
        SaxParser {
            depth: 0,
            seen_root: false,
            used: false,
            error: None,
            location: Location::new(),
        }
    }

    /// Resets the parser into a clean state.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.seen_root = false;
        self.used = false;
        self.error = None;
        self.location = Location::new();
    }

    /// Parses a complete document.
    ///
    /// The whole input must be given in one call. Calling this again
    /// without a [reset()](SaxParser::reset) is an error.
    pub fn parse_bytes_finish(
        &mut self,
        handler: &mut impl SaxHandler,
        bytes: &[u8],
    ) -> Result<(), SaxError> {
        if self.used {
            let description = XmlError::ParserReuseWithoutReset.description();
            self.error = Some(description.to_string());
            return Err(SaxError::BadXml);
        }
        self.used = true;

        let mut reader = Reader::from_reader(bytes);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let offset = reader.error_position() as usize;
                    return Err(self.stop(bytes, offset, Interrupt::Syntax(err.to_string())));
                }
            };
            let decoder = reader.decoder();
            match self.handle_event(handler, decoder, event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(interrupt) => {
                    let offset = reader.buffer_position() as usize;
                    return Err(self.stop(bytes, offset, interrupt));
                }
            }
        }

        self.location = Location::at_offset(bytes, bytes.len());
        Ok(())
    }

    fn stop(&mut self, bytes: &[u8], offset: usize, interrupt: Interrupt) -> SaxError {
        self.location = Location::at_offset(bytes, offset);
        match interrupt {
            Interrupt::Syntax(description) => {
                self.error = Some(description);
                SaxError::BadXml
            }
            Interrupt::Document(err) => {
                self.error = Some(err.description().to_string());
                SaxError::BadXml
            }
            Interrupt::Handler => SaxError::HandlerError,
        }
    }

    // Returns true when the end of the input is reached.
    fn handle_event(
        &mut self,
        handler: &mut impl SaxHandler,
        decoder: Decoder,
        event: Event,
    ) -> Result<bool, Interrupt> {
        match event {
            Event::Start(tag) => {
                self.start_tag(handler, decoder, &tag)?;
            }
            Event::Empty(tag) => {
                self.start_tag(handler, decoder, &tag)?;
                self.end_tag(handler, decoder, &tag)?;
            }
            Event::End(tag) => {
                let name = decode(decoder, tag.name().into_inner())?;
                self.depth = self.depth.saturating_sub(1);
                handler.handle_element(&SaxElement::EndTag(&name))?;
            }
            Event::Text(text) => {
                let cdata = text.unescape().map_err(syntax)?;
                self.cdata(handler, &cdata)?;
            }
            Event::CData(section) => {
                let cdata = decode(decoder, &section)?;
                self.cdata(handler, &cdata)?;
            }
            Event::Eof => {
                if !self.seen_root {
                    return Err(Interrupt::Document(XmlError::DocNoContent));
                }
                if self.depth > 0 {
                    return Err(Interrupt::Document(XmlError::DocOpenTags));
                }
                return Ok(true);
            }
            // Declarations, comments, processing instructions and doctypes carry no tree data
            skipped => {
                trace!(event = ?skipped, "skipping event");
            }
        }
        Ok(false)
    }

    fn start_tag(
        &mut self,
        handler: &mut impl SaxHandler,
        decoder: Decoder,
        tag: &BytesStart,
    ) -> Result<(), Interrupt> {
        if self.depth == 0 && self.seen_root {
            return Err(Interrupt::Document(XmlError::TagOutsideRoot));
        }
        let name = decode(decoder, tag.name().into_inner())?;
        handler.handle_element(&SaxElement::StartTag(&name))?;
        for attr in tag.attributes() {
            let attr = attr.map_err(syntax)?;
            let attr_name = decode(decoder, attr.key.into_inner())?;
            let attr_value = attr.decode_and_unescape_value(decoder).map_err(syntax)?;
            handler.handle_element(&SaxElement::Attribute(&attr_name, &attr_value))?;
        }
        handler.handle_element(&SaxElement::StartTagContent)?;
        self.depth += 1;
        self.seen_root = true;
        Ok(())
    }

    fn end_tag(
        &mut self,
        handler: &mut impl SaxHandler,
        decoder: Decoder,
        tag: &BytesStart,
    ) -> Result<(), Interrupt> {
        let name = decode(decoder, tag.name().into_inner())?;
        self.depth = self.depth.saturating_sub(1);
        handler.handle_element(&SaxElement::EndTag(&name))?;
        Ok(())
    }

    fn cdata(&mut self, handler: &mut impl SaxHandler, cdata: &str) -> Result<(), Interrupt> {
        if self.depth == 0 {
            if cdata.trim().is_empty() {
                // Whitespace around the root tag
                return Ok(());
            }
            return Err(Interrupt::Document(XmlError::DocCdataWithoutParent));
        }
        handler.handle_element(&SaxElement::CData(cdata))?;
        Ok(())
    }

    /// Returns the description of the last syntax error.
    pub fn error_description(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the position where the parser stopped.
    ///
    /// After a failed parse this is the location of the problem.
    pub fn location(&self) -> Location {
        self.location
    }
}

impl Default for SaxParser {
    fn default() -> Self {
        Self::new()
    }
}
