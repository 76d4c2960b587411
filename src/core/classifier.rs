use crate::{ReasonCode, Severity};

/// Only glued tokens are recoverable; everything else halts the run.
pub fn classify(reason: ReasonCode) -> Severity {
    match reason {
        ReasonCode::GluedToken => Severity::NonFatal,
        ReasonCode::TooFewTokens
        | ReasonCode::InvalidCode
        | ReasonCode::InvalidClassification
        | ReasonCode::MissingDescription
        | ReasonCode::NoLetterInDescription
        | ReasonCode::ExtractionFailure => Severity::Fatal,
    }
}
