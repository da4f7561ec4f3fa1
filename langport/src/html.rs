//! Attribute stripping for inline markup.
//!
//! Translation strings may carry simple inline tags (`<b>`, `<i>`, `<span>`,
//! `<br/>`) meant for a `Trans`-style component. Those components only look
//! at the tag name, so attributes are dropped. This is a textual pass, not an
//! HTML parser: anything that does not look like a tag is copied as is.

/// Removes every attribute from the tags in `input`, keeping tag names,
/// closing slashes and self-closing markers.
///
/// ```rust
/// use langport::html::strip_attributes;
/// assert_eq!(
///     strip_attributes(r#"<b class="highlight">:name</b>"#),
///     "<b>:name</b>"
/// );
/// ```
pub fn strip_attributes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        match scan_tag(input, i) {
            Some(tag) => {
                if let Some(rewritten) = tag.rewrite(input) {
                    out.push_str(&input[copied..i]);
                    out.push_str(&rewritten);
                    copied = tag.end;
                }
                i = tag.end;
            }
            None => i += 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Byte offsets of one tag-like sequence.
struct TagSpan {
    start: usize,
    name_end: usize,
    /// Index of the closing `>`.
    close: usize,
    end: usize,
}

impl TagSpan {
    /// Returns the attribute-free form, or `None` when the tag has nothing to strip.
    fn rewrite(&self, input: &str) -> Option<String> {
        let tail = &input[self.name_end..self.close];
        let trimmed = tail.trim_end();
        let (attributes, self_closing) = match trimmed.strip_suffix('/') {
            Some(before_slash) => {
                let keep_from = self.name_end + before_slash.trim_end().len();
                (before_slash, &input[keep_from..self.close])
            }
            None => (trimmed, &tail[trimmed.len()..]),
        };
        if attributes.trim().is_empty() {
            return None;
        }

        let mut rewritten = String::with_capacity(self.name_end - self.start + 3);
        rewritten.push_str(&input[self.start..self.name_end]);
        if self_closing.contains('/') {
            rewritten.push_str(self_closing);
        }
        rewritten.push('>');
        Some(rewritten)
    }
}

/// Scans a tag starting at the `<` found at `start`.
fn scan_tag(input: &str, start: usize) -> Option<TagSpan> {
    let bytes = input.as_bytes();
    let mut j = start + 1;
    if j < bytes.len() && bytes[j] == b'/' {
        j += 1;
    }

    if j >= bytes.len() || !bytes[j].is_ascii_alphabetic() {
        return None;
    }
    while j < bytes.len() && is_name_byte(bytes[j]) {
        j += 1;
    }
    let name_end = j;

    // The name must be followed by whitespace, a slash or the closing bracket.
    match bytes.get(name_end).copied() {
        Some(b'>' | b'/') => {}
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return None,
    }

    while j < bytes.len() {
        match bytes[j] {
            b'>' => {
                return Some(TagSpan {
                    start,
                    name_end,
                    close: j,
                    end: j + 1,
                });
            }
            b'<' => return None,
            _ => j += 1,
        }
    }
    None
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_attributes_from_opening_tag() {
        assert_eq!(
            strip_attributes(r#"<b class="highlight">:name</b>, there is one apple"#),
            "<b>:name</b>, there is one apple"
        );
    }

    #[test]
    fn test_keeps_tag_name_case() {
        assert_eq!(
            strip_attributes(r#"<Span data-x="1">hi</Span>"#),
            "<Span>hi</Span>"
        );
    }

    #[test]
    fn test_plain_tags_unchanged() {
        let s = "<b>bold</b> and <i>italic</i><br/><br /><br>";
        assert_eq!(strip_attributes(s), s);
    }

    #[test]
    fn test_self_closing_with_attributes() {
        assert_eq!(strip_attributes(r#"<img src="a.png" />"#), "<img />");
        assert_eq!(strip_attributes(r#"<br class="x"/>"#), "<br/>");
    }

    #[test]
    fn test_closing_tag_with_attributes() {
        assert_eq!(strip_attributes("</b foo>"), "</b>");
    }

    #[test]
    fn test_multiple_tags() {
        assert_eq!(
            strip_attributes(r#"<a href="/x" target="_blank">link</a> <span id='s'>x</span>"#),
            "<a>link</a> <span>x</span>"
        );
    }

    #[test]
    fn test_malformed_sequences_pass_through() {
        let cases = [
            "a < b and c > d",
            "<",
            "x <b class=\"y\"",
            "1 <2 and 3> 0",
            "<b class=\"a\" <i>x</i>",
            "<<>>",
            "</>",
        ];
        for case in cases {
            assert_eq!(strip_attributes(case), case, "input: {case}");
        }
    }

    #[test]
    fn test_unterminated_tag_before_valid_tag() {
        assert_eq!(
            strip_attributes(r#"<b class="a" <i title="t">x</i>"#),
            r#"<b class="a" <i>x</i>"#
        );
    }

    #[test]
    fn test_non_ascii_text_around_tags() {
        assert_eq!(
            strip_attributes(r#"Café <b style="color:red">crème</b> brûlée"#),
            "Café <b>crème</b> brûlée"
        );
    }

    #[test]
    fn test_no_tags() {
        assert_eq!(strip_attributes("plain text"), "plain text");
        assert_eq!(strip_attributes(""), "");
    }
}
