//! Single-pass answer validation.
//!
//! A sanity gate over synthesized answers: degenerate answers are replaced
//! by a fixed advisory string. This never calls back into synthesis and
//! never re-queries.

/// Advisory returned in place of an unusable answer.
pub const UNCLEAR_ANSWER: &str = "Recommendation unclear, please refine.";

/// Minimum answer length (in characters, after trimming) to be accepted.
const MIN_ANSWER_LEN: usize = 5;

/// Accept the answer, or replace it with the fixed advisory string when it
/// is empty, whitespace-only, or shorter than five characters after
/// trimming.
pub fn validate(answer: String) -> String {
    if answer.trim().chars().count() < MIN_ANSWER_LEN {
        UNCLEAR_ANSWER.to_string()
    } else {
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_replaced() {
        assert_eq!(validate(String::new()), UNCLEAR_ANSWER);
    }

    #[test]
    fn test_whitespace_answer_replaced() {
        assert_eq!(validate("   ".to_string()), UNCLEAR_ANSWER);
    }

    #[test]
    fn test_short_answer_replaced() {
        assert_eq!(validate("ab".to_string()), UNCLEAR_ANSWER);
        assert_eq!(validate("  abcd  ".to_string()), UNCLEAR_ANSWER);
    }

    #[test]
    fn test_valid_answer_unchanged() {
        let answer = "This works well.".to_string();
        assert_eq!(validate(answer.clone()), answer);
    }

    #[test]
    fn test_five_chars_accepted() {
        assert_eq!(validate("abcde".to_string()), "abcde");
    }
}
