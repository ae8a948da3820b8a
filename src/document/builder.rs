/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::SaxElement;
use crate::SaxHandler;
use crate::SaxHandlerError;

use super::Document;
use super::NodeId;
use super::ROOT;
use super::error::description;

/// Builds the element tree from the parser events.
///
/// Open elements are kept on a stack: a start tag pushes the new
/// element, an end tag pops it, and attributes and character data
/// go to the element at the top.
///
/// Character data is collected until the next tag, so a text run
/// split by comments or CDATA sections is judged as a whole when
/// whitespace-only runs are dropped.
pub struct DocumentBuilder {
    doc: Option<Document>,
    stack: Vec<NodeId>,
    text: String,
    keep_whitespace: bool,
    error: Option<&'static str>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            doc: None,
            stack: Vec::new(),
            text: String::new(),
            keep_whitespace: true,
            error: None,
        }
    }

    pub fn set_keep_whitespace(&mut self, keep: bool) {
        self.keep_whitespace = keep;
    }

    fn fail(&mut self, reason: &'static str) -> SaxHandlerError {
        self.error = Some(reason);
        SaxHandlerError::Abort
    }

    pub fn append_element(&mut self, element: &SaxElement) -> Result<(), SaxHandlerError> {
        if self.error.is_some() {
            return Err(SaxHandlerError::Abort);
        }
        self.build(element).map_err(|reason| self.fail(reason))
    }

    fn build(&mut self, element: &SaxElement) -> Result<(), &'static str> {
        let Some(doc) = &mut self.doc else {
            if let SaxElement::StartTag(name) = element {
                self.doc = Some(Document::new(name));
                self.stack.push(ROOT);
                return Ok(());
            }
            return Err(description::CONTENT_WITHOUT_TAG);
        };
        let Some(&node) = self.stack.last() else {
            return match element {
                SaxElement::EndTag(_) => Err(description::CLOSE_WITHOUT_OPEN),
                _ => Err(description::CONTENT_WITHOUT_TAG),
            };
        };
        if matches!(element, SaxElement::StartTag(_) | SaxElement::EndTag(_)) {
            if self.keep_whitespace || !self.text.trim().is_empty() {
                doc.append_value(node, &self.text);
            }
            self.text.clear();
        }
        match element {
            SaxElement::StartTag(name) => {
                let child = doc.insert_tag(node, name);
                self.stack.push(child);
            }
            SaxElement::Attribute(name, value) => {
                doc.insert_attribute(node, name, value);
            }
            SaxElement::StartTagContent => {}
            SaxElement::CData(cdata) => {
                self.text.push_str(cdata);
            }
            SaxElement::EndTag(name) => {
                if *name != doc.node(node).name {
                    return Err(description::TAG_MISMATCH);
                }
                self.stack.pop();
            }
        }
        Ok(())
    }

    /// Returns the reason of the last abort, if the builder caused one.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn take(&mut self) -> Option<Document> {
        self.stack.clear();
        self.text.clear();
        self.doc.take()
    }
}

impl SaxHandler for DocumentBuilder {
    fn handle_element(&mut self, element: &SaxElement) -> Result<(), SaxHandlerError> {
        self.append_element(element)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
