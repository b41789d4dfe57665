//! Content identifiers

use crate::config::DEFAULT_CONTENT_KEY_LENGTH;

/// Identifier joining an evaluation to its auxiliary facts
///
/// Trimmed, lowercased, whitespace runs collapsed to one space, and cut to
/// the first 100 characters. Distinct contents sharing that prefix share an
/// identifier.
///
/// # Examples
///
/// ```
/// use veracity_evaluator::content_id;
///
/// assert_eq!(content_id("  Breaking   NEWS!\n"), "breaking news!");
/// ```
pub fn content_id(content: &str) -> String {
    content_key(content, DEFAULT_CONTENT_KEY_LENGTH)
}

/// [`content_id`] with a custom length
pub fn content_key(content: &str, max_chars: usize) -> String {
    content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(content_id("Hello\t\tWorld  \n again"), "hello world again");
        assert_eq!(content_id("   "), "");
    }

    #[test]
    fn test_truncates_by_characters() {
        let long = "é".repeat(150);
        let id = content_id(&long);
        assert_eq!(id.chars().count(), 100);
        assert_eq!(content_key("abcdef", 3), "abc");
    }

    #[test]
    fn test_equivalent_contents_share_an_id() {
        assert_eq!(
            content_id("Vaccines  cause X"),
            content_id("  vaccines cause x ")
        );
    }
}
