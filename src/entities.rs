/*
** This file is a part of SimpleXML (XML document tree with path lookups)
** Copyright (C) 2025 Gurer Ozen
**
** SimpleXML is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

/// Character references for the whitespace a reading parser would normalize.
pub mod whitespace {
    pub const TAB: &str = "&#9;";
    pub const LF: &str = "&#10;";
    pub const CR: &str = "&#13;";
}

fn entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '\'' => Some(predefined::APOS),
        '"' => Some(predefined::QUOT),
        // Line ends are normalized to LF on input
        '\r' => Some(whitespace::CR),
        _ => None,
    }
}

// Attribute values also have their tabs and newlines normalized to spaces
fn attribute_entity(c: char) -> Option<&'static str> {
    match c {
        '\t' => Some(whitespace::TAB),
        '\n' => Some(whitespace::LF),
        _ => entity(c),
    }
}

fn size_with(s: &str, entity: fn(char) -> Option<&'static str>) -> usize {
    s.chars()
        .map(|c| entity(c).map_or(c.len_utf8(), str::len))
        .sum()
}

pub fn escaped_size(s: &str) -> usize {
    size_with(s, entity)
}

pub fn escaped_attribute_size(s: &str) -> usize {
    size_with(s, attribute_entity)
}

pub fn escape_fmt<W: std::fmt::Write>(s: &str, f: &mut W) -> std::fmt::Result {
    escape_with(s, f, entity)
}

pub fn escape_attribute_fmt<W: std::fmt::Write>(s: &str, f: &mut W) -> std::fmt::Result {
    escape_with(s, f, attribute_entity)
}

fn escape_with<W: std::fmt::Write>(
    s: &str,
    f: &mut W,
    entity: fn(char) -> Option<&'static str>,
) -> std::fmt::Result {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(reference) = entity(c) {
            f.write_str(&s[start..i])?;
            f.write_str(reference)?;
            // All escaped characters are single byte
            start = i + 1;
        }
    }
    f.write_str(&s[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(s: &str) -> String {
        let mut buf = String::new();
        escape_fmt(s, &mut buf).unwrap();
        assert_eq!(buf.len(), escaped_size(s));
        buf
    }

    fn escaped_attribute(s: &str) -> String {
        let mut buf = String::new();
        escape_attribute_fmt(s, &mut buf).unwrap();
        assert_eq!(buf.len(), escaped_attribute_size(s));
        buf
    }

    #[test]
    fn escape_size() {
        const NOESCAPE: &str = "abc$#@!%^*(){}[]=-+/.,;:FDSF3443";
        assert_eq!(escaped_size(NOESCAPE), NOESCAPE.len());
        assert_eq!(escaped_size("abc&def"), "abc&amp;def".len());
        assert_eq!(escaped_size("<>&'\""), "&lt;&gt;&amp;&apos;&quot;".len());
        assert_eq!(escaped_size("çağ<"), "çağ&lt;".len());
    }

    #[test]
    fn escape() {
        assert_eq!(escaped(""), "");
        assert_eq!(escaped("plain"), "plain");
        assert_eq!(escaped("<>&'\""), "&lt;&gt;&amp;&apos;&quot;");
        assert_eq!(escaped("a<b>c"), "a&lt;b&gt;c");
        assert_eq!(escaped("ığdır & çorum"), "ığdır &amp; çorum");
    }

    #[test]
    fn escape_whitespace() {
        assert_eq!(escaped("a\r\nb\tc"), "a&#13;\nb\tc");
        assert_eq!(escaped_attribute("a\r\nb\tc"), "a&#13;&#10;b&#9;c");
        assert_eq!(escaped_attribute("x <y> 'z'"), "x &lt;y&gt; &apos;z&apos;");
    }
}
