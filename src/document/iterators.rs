/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice::Iter;

use super::Document;
use super::Element;
use super::NodeId;

/// Iterator over the attributes of an element in document order.
pub struct Attributes<'a> {
    current: Iter<'a, (String, String)>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(attributes: &'a [(String, String)]) -> Self {
        Attributes {
            current: attributes.iter(),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.current
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.current.size_hint()
    }
}

impl ExactSizeIterator for Attributes<'_> {}

/// Iterator over the direct children of an element in document order.
pub struct Children<'a> {
    document: &'a Document,
    current: Iter<'a, NodeId>,
}

impl<'a> Children<'a> {
    pub(super) fn new(document: &'a Document, children: &'a [NodeId]) -> Self {
        Children {
            document,
            current: children.iter(),
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.next().map(|&id| Element {
            document: self.document,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.current.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}
