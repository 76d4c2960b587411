use crate::{ReasonCode, ValidationOutcome};

/// Tokens longer than this, mixing letters and digits, are reported as glued.
pub const DEFAULT_GLUED_TOKEN_MAX_LEN: usize = 8;

/// Flags description tokens that look like two report fields merged without a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspiciousTokenDetector {
    max_len: usize,
}

impl SuspiciousTokenDetector {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn is_suspicious(&self, token: &str) -> bool {
        token.chars().count() > self.max_len
            && token.chars().all(|c| c.is_ascii_alphanumeric())
            && token.chars().any(|c| c.is_ascii_alphabetic())
            && token.chars().any(|c| c.is_ascii_digit())
    }

    /// Only the first suspicious token, left to right, is reported.
    pub fn check(&self, description: &[&str]) -> ValidationOutcome {
        match description.iter().find(|token| self.is_suspicious(token)) {
            Some(token) => ValidationOutcome::invalid(
                ReasonCode::GluedToken,
                format!(
                    "Descrição possivelmente contém informação grudada (token suspeito: '{}')",
                    token
                ),
            ),
            None => ValidationOutcome::Valid,
        }
    }
}

impl Default for SuspiciousTokenDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GLUED_TOKEN_MAX_LEN)
    }
}
