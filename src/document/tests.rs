/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::str::FromStr;

use super::builder::DocumentBuilder;
use super::error::description;
use super::*;
use crate::SaxElement;
use crate::SaxHandlerError;

fn check_doc_xml(doc: &Document, expected: &str) {
    let xml = doc.full_description();
    assert_eq!(xml, expected);
    // Verify that the capacity is measured correctly
    assert_eq!(xml.len(), xml.capacity());
    assert_eq!(doc.str_size(), expected.len());
    // Verify that the Display and full_description are same
    let xml2 = format!("{}", doc);
    assert_eq!(xml2, expected);
}

fn assert_same_tree(a: Element, b: Element) {
    assert_eq!(a.name(), b.name());
    assert_eq!(a.value(), b.value());
    let mut attributes_a: Vec<_> = a.attributes().collect();
    let mut attributes_b: Vec<_> = b.attributes().collect();
    attributes_a.sort();
    attributes_b.sort();
    assert_eq!(attributes_a, attributes_b);
    assert_eq!(a.children().len(), b.children().len());
    for (child_a, child_b) in a.children().zip(b.children()) {
        assert_same_tree(child_a, child_b);
    }
}

#[test]
fn it_works() {
    let doc = Document::from_bytes(
        b"<root><item id=\"1\">foo</item><item id=\"2\">bar</item></root>",
    )
    .unwrap();
    let root = doc.root();
    assert_eq!(root.name(), "root");
    assert_eq!(root.children_named("item").len(), 2);
    assert_eq!(
        root.child_with_attribute("id", "2").map(|item| item.value()),
        Some("bar")
    );
    assert_eq!(root.value_with_path("item"), Some("foo"));
    assert_eq!(doc.nr_elements(), 3);
}

#[test]
fn text_accumulation() {
    let doc = Document::from_str("<a>foo&amp;bar</a>").unwrap();
    assert_eq!(doc.root().value(), "foo&bar");

    let doc = Document::from_str("<a>x<![CDATA[<y>]]>z<!-- c -->w</a>").unwrap();
    assert_eq!(doc.root().value(), "x<y>zw");

    let doc = Document::from_str("<a>1<b>2</b>3<c/>4</a>").unwrap();
    assert_eq!(doc.root().value(), "134");
    assert_eq!(doc.value_with_path("b"), Some("2"));
    assert_eq!(doc.value_with_path("c"), Some(""));
}

#[test]
fn order_preservation() {
    let doc = Document::from_str("<a><x i='1'/><y/><x i='2'/><z/><x i='3'/></a>").unwrap();
    let names: Vec<&str> = doc.root().children().map(|child| child.name()).collect();
    assert_eq!(names, ["x", "y", "x", "z", "x"]);
    let ids: Vec<Option<&str>> = doc
        .root()
        .children_named("x")
        .iter()
        .map(|child| child.attribute_named("i"))
        .collect();
    assert_eq!(ids, [Some("1"), Some("2"), Some("3")]);
    assert!(doc.root().children_named("w").is_empty());
}

#[test]
fn navigation() {
    let doc = Document::from_str("<a><b><c/></b><d/><e>x</e></a>").unwrap();
    let root = doc.root();
    assert_eq!(root.parent(), None);
    assert_eq!(root.first_child().map(|child| child.name()), Some("b"));
    assert_eq!(root.last_child().map(|child| child.name()), Some("e"));

    let c = root.child_named("b").unwrap().child_named("c").unwrap();
    assert_eq!(c.first_child(), None);
    assert_eq!(c.last_child(), None);
    assert_eq!(c.parent().unwrap().name(), "b");
    assert_eq!(c.parent().unwrap().parent(), Some(root));
    assert!(std::ptr::eq(c.document(), &doc));

    assert_eq!(root.child_named("c"), None);
    assert_eq!(doc.child_named("d").map(|d| d.name()), Some("d"));
    assert_ne!(root.child_named("b"), root.child_named("d"));
}

#[test]
fn attributes() {
    let doc = Document::from_str("<a z='3' x='1' y='2'><b id='y'/><c/><d id='x'>d</d></a>")
        .unwrap();
    let root = doc.root();

    let mut iter = root.attributes();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(("z", "3")));
    assert_eq!(iter.next(), Some(("x", "1")));
    assert_eq!(iter.next(), Some(("y", "2")));
    assert_eq!(iter.next(), None);

    assert_eq!(root.attribute_named("x"), Some("1"));
    assert_eq!(root.attribute_named("w"), None);
    assert_eq!(root.child_named("c").unwrap().attributes().next(), None);

    assert_eq!(root.child_with_attribute("id", "x").unwrap().value(), "d");
    assert_eq!(root.child_with_attribute("id", "y").unwrap().name(), "b");
    assert_eq!(root.child_with_attribute("id", "z"), None);
    assert_eq!(root.child_with_attribute("class", "x"), None);
}

#[test]
fn attribute_isolation() {
    let doc = Document::from_str("<a><b/><c name='x'/></a>").unwrap();
    assert_eq!(doc.root().child_with_attribute("id", "x"), None);

    let doc = Document::from_str("<a><b id='y'/></a>").unwrap();
    assert_eq!(doc.root().child_with_attribute("id", "x"), None);
}

#[test]
fn serialization() {
    let doc = Document::from_str("<a x=\"1&amp;2\" y='\"'><b/><c>t&lt;</c></a>").unwrap();
    check_doc_xml(
        &doc,
        "<a x=\"1&amp;2\" y=\"&quot;\"><b/><c>t&lt;</c></a>",
    );

    let doc = Document::from_str("<a>1<b/>2</a>").unwrap();
    check_doc_xml(&doc, "<a>12<b/></a>");

    let doc = Document::from_str("<a><b></b></a>").unwrap();
    check_doc_xml(&doc, "<a><b/></a>");

    let doc = Document::from_str("<a>'&gt;'</a>").unwrap();
    check_doc_xml(&doc, "<a>&apos;&gt;&apos;</a>");

    // Whitespace a reader would normalize is written as character references
    let xml = "<a k=\"1&#9;2&#10;3&#13;\">x&#13;\ny\tz</a>";
    let doc = Document::from_str(xml).unwrap();
    assert_eq!(doc.root().attribute_named("k"), Some("1\t2\n3\r"));
    assert_eq!(doc.root().value(), "x\r\ny\tz");
    check_doc_xml(&doc, xml);

    let doc = Document::from_str("<a><b>1</b><c d='e'>2</c></a>").unwrap();
    let c = doc.root().child_named("c").unwrap();
    assert_eq!(c.full_description(), "<c d=\"e\">2</c>");
    assert_eq!(c.to_string(), "<c d=\"e\">2</c>");
    assert_eq!(c.str_size(), c.full_description().len());
}

#[test]
fn long_values() {
    let value = "lorem ipsum dolor sit amet ".repeat(1000);
    let xml = format!("<a><b>{value}</b></a>");
    let doc = Document::from_str(&xml).unwrap();
    assert_eq!(doc.value_with_path("b"), Some(value.as_str()));
    check_doc_xml(&doc, &xml);
}

#[test]
fn debug_description() {
    let doc = Document::from_str(
        "<a k='v'><b>0123456789012345678901234567890123456789</b><c>short</c></a>",
    )
    .unwrap();
    let b = doc.child_named("b").unwrap();
    assert_eq!(
        format!("{:?}", b),
        "Element { name: \"b\", attributes: 0, children: 0, value: \"01234567890123456789012345678901...\" }"
    );
    let c = doc.child_named("c").unwrap();
    assert_eq!(
        format!("{:?}", c),
        "Element { name: \"c\", attributes: 0, children: 0, value: \"short\" }"
    );
    assert_eq!(
        format!("{:?}", doc.root()),
        "Element { name: \"a\", attributes: 1, children: 2, value: \"\" }"
    );
}

#[test]
fn round_trip() {
    let xml = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!-- feed -->\n",
        "<rss version=\"2.0\">\n",
        "  <channel>\n",
        "    <title>News &amp; Views</title>\n",
        "    <item id='1' kind=\"a&lt;b\"><title>One</title><body><![CDATA[<p>x</p>]]></body></item>\n",
        "    <item id='2'><title>Two 'quoted' \"text\"</title><empty/></item>\n",
        "  </channel>\n",
        "</rss>\n"
    );
    let doc = Document::from_str(xml).unwrap();
    let text = doc.full_description();
    let doc2 = Document::from_str(&text).unwrap();
    assert_same_tree(doc.root(), doc2.root());
    // Serialization is stable after the first round
    assert_eq!(doc2.full_description(), text);
    assert_eq!(
        doc2.value_with_path("channel.item.body"),
        Some("<p>x</p>")
    );
}

#[test]
fn declared_encoding() {
    let doc = Document::from_bytes(
        b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a k=\"\xE7a\xF0\"><b>caf\xE9</b></a>",
    )
    .unwrap();
    assert_eq!(doc.value_with_path("b"), Some("caf\u{e9}"));
    assert_eq!(doc.root().attribute_named("k"), Some("\u{e7}a\u{f0}"));
    check_doc_xml(&doc, "<a k=\"\u{e7}a\u{f0}\"><b>caf\u{e9}</b></a>");

    let doc = Document::from_bytes(
        b"<?xml version='1.0' encoding='windows-1251'?><a>\xEC\xE8\xF0</a>",
    )
    .unwrap();
    assert_eq!(doc.root().value(), "\u{43c}\u{438}\u{440}");

    // Undeclared input is UTF-8
    let doc = Document::from_bytes("<a>caf\u{e9}</a>".as_bytes()).unwrap();
    assert_eq!(doc.root().value(), "caf\u{e9}");
    assert!(Document::from_bytes(b"<a>caf\xE9</a>").is_err());
}

#[test]
fn malformed_input() {
    let err = Document::from_str("<a><b></a>").unwrap_err();
    assert_eq!(err.code(), 1);
    assert!(!err.description().is_empty());
    assert!(err.to_string().starts_with("SimpleXMLDocument error 1: "));

    assert!(Document::from_str("").is_err());
    assert!(Document::from_str("<a>").is_err());
    assert!(Document::from_str("<a/><b/>").is_err());
    assert!(Document::from_str("text").is_err());
    assert!(Document::from_bytes(b"<a>\xff\xfe</a>").is_err());
}

#[test]
fn error_location() {
    let err = Document::from_str("<a>\n<b>\n</a>").unwrap_err();
    assert_eq!(err.location().lines, 2);
    match err {
        DocumentError::ParseFailed { location, .. } => assert!(location.bytes >= 8),
    }
}

#[test]
fn parser_options() {
    let mut parser = DocumentParser::new().keep_whitespace(false);
    parser
        .parse_bytes(b"<a>\n  <b> x </b>\n  <c>\n  </c>\n</a>")
        .unwrap();
    let doc = parser.into_document().unwrap();
    assert_eq!(doc.root().value(), "");
    assert_eq!(doc.value_with_path("b"), Some(" x "));
    assert_eq!(doc.value_with_path("c"), Some(""));
    check_doc_xml(&doc, "<a><b> x </b><c/></a>");

    let doc = Document::from_str("<a>\n  <b/>\n</a>").unwrap();
    assert_eq!(doc.root().value(), "\n  \n");

    // Whitespace is judged on the whole text run, not on its fragments
    let mut parser = DocumentParser::new().keep_whitespace(false);
    parser
        .parse_bytes(b"<a><![CDATA[x]]> <![CDATA[y]]><b>1<!-- c --> <!-- d -->2</b> <!-- e --> <c/>z</a>")
        .unwrap();
    let doc = parser.into_document().unwrap();
    assert_eq!(doc.root().value(), "x yz");
    assert_eq!(doc.value_with_path("b"), Some("1 2"));

    let mut parser = DocumentParser::new().keep_whitespace(false);
    parser.parse_bytes(b"<a> <!-- c --> <![CDATA[ ]]></a>").unwrap();
    let doc = parser.into_document().unwrap();
    assert_eq!(doc.root().value(), "");

    let mut parser = DocumentParser::new().path_delimiter('/');
    parser.parse_bytes(b"<a><b><c>1</c></b></a>").unwrap();
    let doc = parser.into_document().unwrap();
    assert_eq!(doc.path_delimiter(), '/');
    assert_eq!(doc.value_with_path("b/c"), Some("1"));
    assert_eq!(doc.value_with_path("b.c"), None);
}

#[test]
fn single_attempt() {
    let mut parser = DocumentParser::new();
    assert!(parser.parse_bytes(b"<a><b></a>").is_err());
    assert!(parser.into_document().is_err());

    let mut parser = DocumentParser::new();
    parser.parse_bytes(b"<a/>").unwrap();
    assert!(parser.parse_bytes(b"<b/>").is_err());
    assert!(parser.into_document().is_err());

    let parser = DocumentParser::new();
    let err = parser.into_document().unwrap_err();
    assert_eq!(err.description(), description::NO_DOCUMENT);
}

#[test]
fn builder_checks() {
    let mut builder = DocumentBuilder::new();
    assert_eq!(
        builder.append_element(&SaxElement::CData("x")),
        Err(SaxHandlerError::Abort)
    );
    assert_eq!(builder.error(), Some(description::CONTENT_WITHOUT_TAG));

    let mut builder = DocumentBuilder::new();
    assert!(builder.append_element(&SaxElement::StartTag("a")).is_ok());
    assert!(builder.append_element(&SaxElement::StartTag("b")).is_ok());
    assert_eq!(
        builder.append_element(&SaxElement::EndTag("a")),
        Err(SaxHandlerError::Abort)
    );
    assert_eq!(builder.error(), Some(description::TAG_MISMATCH));
    // Stays failed
    assert!(builder.append_element(&SaxElement::EndTag("b")).is_err());

    let mut builder = DocumentBuilder::new();
    assert!(builder.append_element(&SaxElement::StartTag("a")).is_ok());
    assert!(builder.append_element(&SaxElement::EndTag("a")).is_ok());
    assert_eq!(
        builder.append_element(&SaxElement::EndTag("a")),
        Err(SaxHandlerError::Abort)
    );
    assert_eq!(builder.error(), Some(description::CLOSE_WITHOUT_OPEN));
}

#[test]
fn concurrent_reads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
    assert_send_sync::<Element<'static>>();

    let doc = Document::from_str("<a><b>1</b><b>2</b></a>").unwrap();
    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| doc.full_description()))
            .collect();
        for reader in readers {
            assert_eq!(reader.join().unwrap(), "<a><b>1</b><b>2</b></a>");
        }
    });
}
