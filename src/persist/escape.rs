//! Escaping for values written into the notes document
//!
//! The writer's default escaping covers markup characters only. Attribute
//! values also lose tabs and line breaks to attribute-value normalization,
//! and text content loses `\r` to end-of-line handling, so those are written
//! as character references. Characters XML 1.0 cannot carry at all are
//! replaced with U+FFFD so a saved document always loads again.

pub const REPLACEMENT: char = '\u{FFFD}';

/// Chars allowed by the XML 1.0 `Char` production
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// True if `value` holds chars that will be replaced on save
pub fn needs_replacement(value: &str) -> bool {
    !value.chars().all(is_xml_char)
}

/// Escape an attribute value, keeping tabs and line breaks intact
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => escaped.push(REPLACEMENT),
        }
    }
    escaped
}

/// Escape element text; `\n` and `\t` survive as-is, `\r` does not
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\r' => escaped.push_str("&#13;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => escaped.push(REPLACEMENT),
        }
    }
    escaped
}
