/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod error;
mod iterators;
mod parser;

use std::fmt::Debug;
use std::str::FromStr;

use super::entities::escape_attribute_fmt;
use super::entities::escape_fmt;
use super::entities::escaped_attribute_size;
use super::entities::escaped_size;
use super::path;
use builder::DocumentBuilder;
pub use error::DocumentError;
pub use iterators::Attributes;
pub use iterators::Children;
pub use parser::DocumentParser;

/// Number of characters of the value shown by the `Debug` output of an element.
const DESCRIPTION_VALUE_LIMIT: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

struct Node {
    name: String,
    value: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Node {
        Node {
            name: name.to_string(),
            value: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    // Rendered as a standalone tag
    fn is_empty(&self) -> bool {
        self.value.is_empty() && self.children.is_empty()
    }
}

struct Visitor<'a> {
    document: &'a Document,
    start: Option<NodeId>,
    stack: Vec<(NodeId, usize)>,
}

enum VisitorStep<'a> {
    StartTag(&'a Node),
    EndTag(&'a Node),
}

impl<'a> Visitor<'a> {
    fn new(document: &'a Document, start: NodeId) -> Visitor<'a> {
        Visitor {
            document,
            start: Some(start),
            stack: Vec::new(),
        }
    }

    fn next(&mut self) -> Option<VisitorStep<'a>> {
        let document = self.document;
        if let Some(start) = self.start.take() {
            self.stack.push((start, 0));
            return Some(VisitorStep::StartTag(document.node(start)));
        }
        let (id, next_child) = self.stack.last_mut()?;
        let node = document.node(*id);
        if let Some(&child) = node.children.get(*next_child) {
            *next_child += 1;
            self.stack.push((child, 0));
            Some(VisitorStep::StartTag(document.node(child)))
        } else {
            self.stack.pop();
            Some(VisitorStep::EndTag(node))
        }
    }
}

/// An XML document tree.
///
/// The tree is built once from the input by a
/// [DocumentParser](crate::DocumentParser) and is immutable afterwards,
/// so it can be queried from several threads at the same time. Elements
/// are stored in the document and accessed through [Element] handles
/// which borrow the document.
///
/// # Examples
///
/// ```
/// use simplexml::Document;
/// # fn main() -> Result<(), simplexml::DocumentError> {
/// let doc = Document::from_bytes(b"<root><item id=\"1\">foo</item><item id=\"2\">bar</item></root>")?;
/// let root = doc.root();
/// assert_eq!(root.name(), "root");
/// assert_eq!(root.children_named("item").len(), 2);
/// assert_eq!(root.child_with_attribute("id", "2").map(|item| item.value()), Some("bar"));
/// assert_eq!(root.value_with_path("item"), Some("foo"));
/// # Ok(())
/// # }
/// ```
pub struct Document {
    nodes: Vec<Node>,
    path_delimiter: char,
}

impl Document {
    fn new(root_tag_name: &str) -> Document {
        Document {
            nodes: vec![Node::new(root_tag_name, None)],
            path_delimiter: path::DEFAULT_DELIMITER,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn insert_tag(&mut self, parent: NodeId, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag_name, Some(parent)));
        self.node_mut(parent).children.push(id);
        id
    }

    fn insert_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attributes
            .push((name.to_string(), value.to_string()));
    }

    fn append_value(&mut self, id: NodeId, cdata: &str) {
        self.node_mut(id).value.push_str(cdata);
    }

    /// Builds a document from a complete XML input.
    ///
    /// Either the whole tree is returned, or the error which stopped the
    /// parsing. A partially built tree is never exposed.
    pub fn from_bytes(data: &[u8]) -> Result<Document, DocumentError> {
        let mut parser = DocumentParser::new();
        parser.parse_bytes(data)?;
        parser.into_document()
    }

    /// Returns the outermost element of the document.
    pub fn root(&self) -> Element<'_> {
        Element {
            document: self,
            id: ROOT,
        }
    }

    /// Returns the delimiter used by the path lookups of the elements.
    pub fn path_delimiter(&self) -> char {
        self.path_delimiter
    }

    /// Returns the total number of elements in the document.
    pub fn nr_elements(&self) -> usize {
        self.nodes.len()
    }

    //
    // Convenience functions to avoid typing .root() all the time
    //

    pub fn child_named<'a>(&'a self, name: &str) -> Option<Element<'a>> {
        self.root().child_named(name)
    }

    pub fn descendant_with_path<'a>(&'a self, path: &str) -> Option<Element<'a>> {
        self.root().descendant_with_path(path)
    }

    pub fn value_with_path<'a>(&'a self, path: &str) -> Option<&'a str> {
        self.root().value_with_path(path)
    }

    pub fn str_size(&self) -> usize {
        self.root().str_size()
    }

    pub fn full_description(&self) -> String {
        self.root().full_description()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root(), f)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root())
            .field("nr_elements", &self.nodes.len())
            .field("path_delimiter", &self.path_delimiter)
            .finish()
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::from_bytes(s.as_bytes())
    }
}

/// A handle to an element in a [Document].
///
/// Handles are cheap to copy and cannot outlive the document. Lookups
/// which find nothing return `None`, they never fail.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        self.document.node(self.id)
    }

    fn element(&self, id: NodeId) -> Element<'a> {
        Element {
            document: self.document,
            id,
        }
    }

    //
    // Node property methods
    //

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    /// Returns the concatenation of all character data directly inside this element.
    pub fn value(&self) -> &'a str {
        &self.node().value
    }

    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(&self.node().attributes)
    }

    pub fn attribute_named(&self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    //
    // Navigation methods
    //

    pub fn parent(&self) -> Option<Element<'a>> {
        self.node().parent.map(|id| self.element(id))
    }

    pub fn first_child(&self) -> Option<Element<'a>> {
        self.node().children.first().map(|&id| self.element(id))
    }

    pub fn last_child(&self) -> Option<Element<'a>> {
        self.node().children.last().map(|&id| self.element(id))
    }

    pub fn children(&self) -> Children<'a> {
        Children::new(self.document, &self.node().children)
    }

    /// Returns the first direct child with the given name.
    pub fn child_named(&self, name: &str) -> Option<Element<'a>> {
        self.children().find(|child| child.name() == name)
    }

    /// Returns all direct children with the given name in document order.
    pub fn children_named(&self, name: &str) -> Vec<Element<'a>> {
        self.children()
            .filter(|child| child.name() == name)
            .collect()
    }

    /// Returns the first direct child having the attribute with the given value.
    ///
    /// Children without the attribute are skipped.
    pub fn child_with_attribute(&self, name: &str, value: &str) -> Option<Element<'a>> {
        self.children()
            .find(|child| child.attribute_named(name) == Some(value))
    }

    /// Follows a path of child names starting from this element.
    ///
    /// Path segments are separated by the
    /// [path delimiter](Document::path_delimiter) of the document, and
    /// each segment selects the first child with that name. An empty
    /// path returns this element.
    ///
    /// ```
    /// # use std::str::FromStr;
    /// # use simplexml::Document;
    /// let doc = Document::from_str("<a><b><c>1</c></b><b><d>2</d></b></a>").unwrap();
    /// assert_eq!(doc.value_with_path("b.c"), Some("1"));
    /// // Only the first b is searched
    /// assert_eq!(doc.value_with_path("b.d"), None);
    /// ```
    pub fn descendant_with_path(&self, path: &str) -> Option<Element<'a>> {
        path::resolve(*self, path::segments(path, self.document.path_delimiter))
    }

    pub fn value_with_path(&self, path: &str) -> Option<&'a str> {
        self.descendant_with_path(path).map(|element| element.value())
    }

    /// Returns all elements matching the path, following every matching child at each step.
    pub fn descendants_with_path(&self, path: &str) -> Vec<Element<'a>> {
        path::resolve_all(*self, path::segments(path, self.document.path_delimiter))
    }

    //
    // Serialization methods
    //

    /// Returns the exact size of the [full_description()](Element::full_description) output.
    pub fn str_size(&self) -> usize {
        let mut size = 0;
        let mut visitor = Visitor::new(self.document, self.id);
        while let Some(step) = visitor.next() {
            match step {
                VisitorStep::StartTag(node) => {
                    size += 1; // Tag opening '<'
                    size += node.name.len();
                    for (name, value) in node.attributes.iter() {
                        size += 1; // space
                        size += name.len();
                        size += 2; // =" characters
                        size += escaped_attribute_size(value);
                        size += 1; // " character
                    }
                    if node.is_empty() {
                        size += 2; // Standalone tag closing '/>'
                    } else {
                        size += 1;
                        size += escaped_size(&node.value);
                    }
                }
                VisitorStep::EndTag(node) => {
                    if !node.is_empty() {
                        size += 2; // End tag opening '</'
                        size += node.name.len();
                        size += 1; // End tag closing '>'
                    }
                }
            }
        }

        size
    }

    fn write_xml<W: std::fmt::Write>(&self, out: &mut W) -> std::fmt::Result {
        let mut visitor = Visitor::new(self.document, self.id);
        while let Some(step) = visitor.next() {
            match step {
                VisitorStep::StartTag(node) => {
                    out.write_char('<')?;
                    out.write_str(&node.name)?;
                    for (name, value) in node.attributes.iter() {
                        out.write_char(' ')?;
                        out.write_str(name)?;
                        out.write_str("=\"")?;
                        escape_attribute_fmt(value, out)?;
                        out.write_char('"')?;
                    }
                    if node.is_empty() {
                        out.write_str("/>")?;
                    } else {
                        out.write_char('>')?;
                        escape_fmt(&node.value, out)?;
                    }
                }
                VisitorStep::EndTag(node) => {
                    if !node.is_empty() {
                        out.write_str("</")?;
                        out.write_str(&node.name)?;
                        out.write_char('>')?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Serializes this element and its descendants to XML text.
    ///
    /// Values are written out in full. The text value of an element is
    /// written before its children, so the relative position of text
    /// and child tags in mixed content is not preserved.
    pub fn full_description(&self) -> String {
        let mut buf = String::with_capacity(self.str_size());
        // Writing into a String cannot fail
        let _ = self.write_xml(&mut buf);
        buf
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Element<'_> {}

impl Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.value();
        let value = match value.char_indices().nth(DESCRIPTION_VALUE_LIMIT) {
            Some((cut, _)) => format!("{}...", &value[..cut]),
            None => value.to_string(),
        };
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("attributes", &self.node().attributes.len())
            .field("children", &self.node().children.len())
            .field("value", &value)
            .finish()
    }
}

impl std::fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_xml(f)
    }
}

#[cfg(test)]
mod tests;

mod nocompile;
