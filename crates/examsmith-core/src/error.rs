//! Error types for tolerant answer parsing.

use thiserror::Error;

/// Why a student's typed answer failed to parse.
///
/// Marking never propagates these: an answer that does not parse simply
/// scores zero. They exist so hosts can log what was rejected and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerParseError {
    /// The field was blank (or whitespace only).
    #[error("empty answer")]
    Empty,

    /// Text that is not a recognisable number.
    #[error("not a number: '{0}'")]
    NotNumeric(String),

    /// Something with a `/` that is not a plain `a/b` fraction.
    #[error("malformed fraction: '{0}'")]
    BadFraction(String),

    /// A fraction with a zero denominator.
    #[error("fraction has a zero denominator")]
    ZeroDenominator,

    /// Text that matches neither `aEb` nor `a x 10^b` scientific notation.
    #[error("not standard form: '{0}'")]
    NotStandardForm(String),
}

impl AnswerParseError {
    /// True when the student left the field blank rather than typing
    /// something unrecognised. Useful for feedback wording.
    pub fn is_blank(&self) -> bool {
        matches!(self, AnswerParseError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(AnswerParseError::Empty.to_string(), "empty answer");
        assert_eq!(
            AnswerParseError::NotNumeric("abc".into()).to_string(),
            "not a number: 'abc'"
        );
    }

    #[test]
    fn blank_detection() {
        assert!(AnswerParseError::Empty.is_blank());
        assert!(!AnswerParseError::ZeroDenominator.is_blank());
    }
}
