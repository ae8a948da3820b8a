/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;
use std::str::Split;

use tracing::trace;

use crate::Element;

/// Default separator between the segments of an element path.
pub const DEFAULT_DELIMITER: char = '.';

pub(crate) fn segments(path: &str, delimiter: char) -> Split<'_, char> {
    let mut segments = path.split(delimiter);
    if path.is_empty() {
        // Empty path has no segments, not one empty segment
        segments.next();
    }
    segments
}

pub(crate) fn resolve<'a, 'p>(
    element: Element<'a>,
    segments: impl Iterator<Item = &'p str>,
) -> Option<Element<'a>> {
    let mut current = element;
    for segment in segments {
        trace!(segment, parent = current.name(), "resolving path segment");
        current = current.child_named(segment)?;
    }
    Some(current)
}

pub(crate) fn resolve_all<'a, 'p>(
    element: Element<'a>,
    segments: impl Iterator<Item = &'p str>,
) -> Vec<Element<'a>> {
    let mut context = vec![element];
    for segment in segments {
        context = context
            .iter()
            .flat_map(|item| item.children_named(segment))
            .collect();
        trace!(segment, matches = context.len(), "resolving path segment");
        if context.is_empty() {
            break;
        }
    }
    context
}

/// A parsed element path.
///
/// A path is a list of child element names separated by a delimiter
/// character, such as `channel.item.title`. Each segment is matched
/// against the direct children of the elements selected by the
/// previous segments. There is no escaping; a segment cannot contain
/// the delimiter.
///
/// ```
/// use std::str::FromStr;
/// use simplexml::{Document, Path};
///
/// let doc = Document::from_str("<a><b><c>1</c></b><b><c>2</c><c>3</c></b></a>").unwrap();
/// let path = Path::new("b.c");
/// assert_eq!(path.apply(doc.root()).map(|c| c.value()), Some("1"));
/// let values: Vec<&str> = path.apply_all(doc.root()).iter().map(|c| c.value()).collect();
/// assert_eq!(values, ["1", "2", "3"]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    segments: Vec<String>,
    delimiter: char,
}

impl Path {
    pub fn new(expression: &str) -> Path {
        Path::with_delimiter(expression, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(expression: &str, delimiter: char) -> Path {
        Path {
            segments: segments(expression, delimiter).map(String::from).collect(),
            delimiter,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the element selected by following the first matching child at each step.
    ///
    /// Resolution stops with `None` at the first segment without a
    /// match. An empty path selects the element itself.
    pub fn apply<'a>(&self, element: Element<'a>) -> Option<Element<'a>> {
        resolve(element, self.segments())
    }

    /// Returns every element reachable through the path, in document order.
    pub fn apply_all<'a>(&self, element: Element<'a>) -> Vec<Element<'a>> {
        resolve_all(element, self.segments())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.delimiter)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(s))
    }
}
