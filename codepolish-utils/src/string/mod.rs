//! String helpers

/// Keep at most `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so the cut never lands inside a multi-byte
/// character. No ellipsis is appended.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_chars("abc", 500), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_truncates_to_char_count() {
        let long = "x".repeat(800);
        assert_eq!(truncate_chars(&long, 500).chars().count(), 500);
    }

    #[test]
    fn test_multibyte_boundary() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("❌❌❌", 1), "❌");
    }
}
