/// Escapes text for SVG element content. Characters XML 1.0 does not allow
/// (C0 controls other than tab, LF and CR, U+FFFE, U+FFFF) are dropped.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

pub fn is_xml_char(ch: char) -> bool {
    match ch {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => c >= '\u{20}',
    }
}

/// Escapes text for attribute values (and element content that may end up in one).
pub fn escape_attr(input: &str) -> String {
    escape_text(input)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("<a&b>"), "&lt;a&amp;b&gt;");
        assert_eq!(escape_attr("<a&b>"), "&lt;a&amp;b&gt;");
    }

    #[test]
    fn attribute_escaping_covers_quotes() {
        assert_eq!(escape_attr(r#"say "hi" it's"#), "say &quot;hi&quot; it&apos;s");
        assert_eq!(escape_text(r#""q""#), r#""q""#);
    }

    #[test]
    fn ampersand_is_not_double_escaped() {
        let escaped = escape_attr("Tom & \"Jerry\"");
        assert_eq!(escaped, "Tom &amp; &quot;Jerry&quot;");
        assert!(!escaped.contains("&amp;quot;"));
        assert!(!escaped.contains("&amp;amp;"));
    }

    #[test]
    fn drops_characters_xml_forbids() {
        assert_eq!(escape_text("a\u{1}b\u{0}c"), "abc");
        assert_eq!(escape_text("tab\tline\nret\r"), "tab\tline\nret\r");
        assert_eq!(escape_attr("x\u{1b}[0m\u{FFFE}\u{FFFF}y"), "x[0my");
        assert_eq!(escape_text("\u{7f}\u{e9}\u{1F600}"), "\u{7f}\u{e9}\u{1F600}");
        assert!(!is_xml_char('\u{8}'));
        assert!(is_xml_char(' '));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(escape_text(""), "");
        assert_eq!(escape_attr(""), "");
    }
}
