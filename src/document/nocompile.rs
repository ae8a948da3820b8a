/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Returned Element cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use simplexml::Document;
/// use simplexml::Element;
/// let e: Element;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     e = doc.root();
/// }
/// println!("{}", e);
/// # Ok(())
/// # }
/// ```
///
/// Element found by a lookup cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use simplexml::Document;
/// use simplexml::Element;
/// let e: Option<Element>;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     e = doc.root().child_named("b");
/// }
/// println!("{:?}", e);
/// # Ok(())
/// # }
/// ```
///
/// Values cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use simplexml::Document;
/// let v: Option<&str>;
/// {
///     let doc = Document::from_str("<a><b>lala</b></a>")?;
///     v = doc.value_with_path("b");
/// }
/// println!("{:?}", v);
/// # Ok(())
/// # }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
