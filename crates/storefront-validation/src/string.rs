//! String measuring and matching helpers

use fancy_regex::Regex;
use tracing::warn;

/// Length of a value as browsers measure `minlength` / `maxlength`:
/// UTF-16 code units, not bytes or scalar values.
pub fn text_length(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn at_least(s: &str, min: usize) -> bool {
    text_length(s) >= min
}

pub fn at_most(s: &str, max: usize) -> bool {
    text_length(s) <= max
}

/// Regex search anywhere in the value.
///
/// Page scripts test patterns with `RegExp.test`, which is unanchored, so a
/// pattern of `\d` accepts "a1b". Anchor the pattern itself (`^...$`) for a
/// whole-value match. A pattern that exceeds the backtracking limit on this
/// value counts as not matching.
pub fn matches_pattern(value: &str, pattern: &Regex) -> bool {
    match pattern.is_match(value) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(pattern = pattern.as_str(), "pattern could not be evaluated: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_counts_utf16_units() {
        assert_eq!(text_length(""), 0);
        assert_eq!(text_length("hello"), 5);
        assert_eq!(text_length("café"), 4);
        // Astral characters are two UTF-16 units
        assert_eq!(text_length("🍯"), 2);
    }

    #[test]
    fn test_length_bounds() {
        assert!(at_least("hello", 3));
        assert!(at_least("hey", 3));
        assert!(!at_least("hi", 3));

        assert!(at_most("hello", 10));
        assert!(at_most("hello", 5));
        assert!(!at_most("verylongstring", 5));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let digit = Regex::new(r"\d").unwrap();
        assert!(matches_pattern("a1b", &digit));
        assert!(!matches_pattern("abc", &digit));

        let anchored = Regex::new(r"^\d{5}$").unwrap();
        assert!(matches_pattern("12345", &anchored));
        assert!(!matches_pattern("123456", &anchored));
    }

    #[test]
    fn test_pattern_supports_lookaround_and_backreferences() {
        let password = Regex::new(r"(?=.*\d)(?=.*[a-z]).{8,}").unwrap();
        assert!(matches_pattern("abcdefg1", &password));
        assert!(!matches_pattern("abcdefgh", &password));

        let doubled = Regex::new(r"^(\w+)-\1$").unwrap();
        assert!(matches_pattern("ab-ab", &doubled));
        assert!(!matches_pattern("ab-cd", &doubled));
    }
}
