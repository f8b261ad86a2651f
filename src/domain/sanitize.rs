//! HTML sanitization for text interpolated into e-mail markup
//!
//! Angle brackets are stripped, the remaining HTML-significant characters are
//! entity-escaped, and the output is capped at
//! [`MAX_LENGTH`](crate::domain::validation_constants::sanitize::MAX_LENGTH)
//! characters without ever splitting an entity.

use crate::domain::validation_constants::sanitize::MAX_LENGTH;

/// Escapes emitted by [`sanitize`], in decoding priority order
const ESCAPES: [(char, &str); 4] = [
    ('&', "&amp;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('/', "&#x2F;"),
];

fn escape_for(c: char) -> Option<&'static str> {
    ESCAPES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, escaped)| *escaped)
}

/// Sanitize user text for HTML interpolation
pub fn sanitize(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut length = 0;

    for c in input.chars() {
        if c == '<' || c == '>' {
            continue;
        }

        let piece_len = escape_for(c).map_or(1, str::len);
        if length + piece_len > MAX_LENGTH {
            break;
        }

        match escape_for(c) {
            Some(escaped) => output.push_str(escaped),
            None => output.push(c),
        }
        length += piece_len;
    }

    output
}

/// Undo exactly one layer of [`sanitize`] escaping
///
/// The form controller escapes fields before sending them. The relay decodes
/// that layer so it validates what the person typed, then sanitizes again
/// itself. Unknown entities are left untouched.
pub fn decode_escapes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(index) = rest.find('&') {
        output.push_str(&rest[..index]);
        rest = &rest[index..];

        match ESCAPES
            .iter()
            .find(|(_, escaped)| rest.starts_with(escaped))
        {
            Some((raw, escaped)) => {
                output.push(*raw);
                rest = &rest[escaped.len()..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_angle_brackets() {
        assert_eq!(sanitize("<b>bold</b>"), "bbold&#x2F;b");
    }

    #[test]
    fn test_escapes_special_characters() {
        assert_eq!(sanitize("a & b"), "a &amp; b");
        assert_eq!(sanitize(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(sanitize("O'Brien"), "O&#x27;Brien");
        assert_eq!(sanitize("a/b"), "a&#x2F;b");
    }

    #[test]
    fn test_script_injection_is_neutralized() {
        let output = sanitize(r#"<script>alert("x")</script>"#);
        assert_eq!(output, "scriptalert(&quot;x&quot;)&#x2F;script");
        for forbidden in ['<', '>', '"', '\'', '/'] {
            assert!(!output.contains(forbidden));
        }
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = "Bonjour, je suis intéressé par votre profil.";
        assert_eq!(sanitize(text), text);
        assert_eq!(sanitize(&sanitize(text)), sanitize(text));
    }

    #[test]
    fn test_caps_length() {
        assert_eq!(sanitize(&"a".repeat(1500)).chars().count(), 1000);
    }

    #[test]
    fn test_cap_never_splits_an_entity() {
        let input = format!("{}&", "a".repeat(998));
        let output = sanitize(&input);
        assert_eq!(output, "a".repeat(998));
        assert!(!output.contains('&'));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let output = sanitize(&"é".repeat(1200));
        assert_eq!(output.chars().count(), 1000);
    }

    #[test]
    fn test_decode_reverses_one_layer() {
        assert_eq!(decode_escapes("O&#x27;Brien"), "O'Brien");
        assert_eq!(decode_escapes("a &amp;quot; b"), "a &quot; b");
        assert_eq!(decode_escapes("&#x2F;&quot;&amp;"), "/\"&");
    }

    #[test]
    fn test_decode_leaves_unknown_entities() {
        assert_eq!(decode_escapes("&lt;tag&gt; & more"), "&lt;tag&gt; & more");
        assert_eq!(decode_escapes("trailing &"), "trailing &");
    }

    #[test]
    fn test_decode_of_sanitize_restores_text_without_brackets() {
        let input = r#"Tom & "Jerry" <3 'cartoons' a/b"#;
        assert_eq!(decode_escapes(&sanitize(input)), r#"Tom & "Jerry" 3 'cartoons' a/b"#);
    }
}
