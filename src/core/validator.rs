use crate::core::suspicious::SuspiciousTokenDetector;
use crate::core::tokenizer::tokenize;
use crate::{ReasonCode, ValidationOutcome};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_TOKENS: usize = 5;

/// Digit groups separated by single dots: `1`, `1.02`, `1.02.003`.
static NUMERIC_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)*$").expect("numeric code pattern"));

pub fn is_numeric_code(token: &str) -> bool {
    NUMERIC_CODE.is_match(token)
}

/// Checks the positional grammar of a chart-of-accounts row:
/// `<code> <classification> <flag> <description...> <last>`.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    detector: SuspiciousTokenDetector,
}

impl FieldValidator {
    pub fn new(detector: SuspiciousTokenDetector) -> Self {
        Self { detector }
    }

    pub fn validate_row(&self, row: &str) -> ValidationOutcome {
        self.validate(&tokenize(row))
    }

    /// Stops at the first failing check; glued-token detection runs last.
    pub fn validate(&self, tokens: &[&str]) -> ValidationOutcome {
        if tokens.len() < MIN_TOKENS {
            return ValidationOutcome::invalid(
                ReasonCode::TooFewTokens,
                "Número incorreto de tokens (esperado no mínimo 5 tokens)",
            );
        }

        if !is_numeric_code(tokens[0]) {
            return ValidationOutcome::invalid(
                ReasonCode::InvalidCode,
                "Código inválido (deve ser um número, podendo conter várias sequências separadas por pontos)",
            );
        }

        if !is_numeric_code(tokens[1]) {
            return ValidationOutcome::invalid(
                ReasonCode::InvalidClassification,
                "Classificação inválida (deve ser um número, podendo conter várias sequências separadas por pontos)",
            );
        }

        let description = &tokens[3..tokens.len() - 1];
        if description.is_empty() {
            return ValidationOutcome::invalid(
                ReasonCode::MissingDescription,
                "Descrição ausente (deve conter pelo menos um token com letra)",
            );
        }

        if !description.join(" ").chars().any(char::is_alphabetic) {
            return ValidationOutcome::invalid(
                ReasonCode::NoLetterInDescription,
                "Descrição inválida (deve conter pelo menos uma letra)",
            );
        }

        self.detector.check(description)
    }
}
