pub mod core {
    pub mod tokenizer;
    pub mod validator;
    pub mod suspicious;
    pub mod classifier;
    pub mod pdf_parser;
    pub mod layout;
    pub mod writer;
}

pub mod utils {
    pub mod document_processor;
}

pub mod config;

use serde::Serialize;
use std::fmt;

/// One line of extracted report text, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub page: usize,
    pub line: usize,
    pub raw: String,
}

/// Why a row (or the whole extraction) was rejected.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    TooFewTokens,
    InvalidCode,
    InvalidClassification,
    MissingDescription,
    NoLetterInDescription,
    GluedToken,
    ExtractionFailure,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::TooFewTokens => "TooFewTokens",
            ReasonCode::InvalidCode => "InvalidCode",
            ReasonCode::InvalidClassification => "InvalidClassification",
            ReasonCode::MissingDescription => "MissingDescription",
            ReasonCode::NoLetterInDescription => "NoLetterInDescription",
            ReasonCode::GluedToken => "GluedToken",
            ReasonCode::ExtractionFailure => "ExtractionFailure",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { reason: ReasonCode, message: String },
}

impl ValidationOutcome {
    pub fn invalid(reason: ReasonCode, message: impl Into<String>) -> Self {
        ValidationOutcome::Invalid {
            reason,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { reason, .. } => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    NonFatal,
}

/// A rejected row, or an extraction failure when `reason` is
/// [`ReasonCode::ExtractionFailure`] (in which case `line` is `None`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorRecord {
    pub page: Option<usize>,
    pub line: Option<usize>,
    pub content: String,
    pub reason: ReasonCode,
    pub message: String,
    pub severity: Severity,
}

impl ErrorRecord {
    pub fn for_row(row: &Row, reason: ReasonCode, message: String, severity: Severity) -> Self {
        Self {
            page: Some(row.page),
            line: Some(row.line),
            content: row.raw.clone(),
            reason,
            message,
            severity,
        }
    }

    pub fn extraction_failure(page: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            page,
            line: None,
            content: String::new(),
            reason: ReasonCode::ExtractionFailure,
            message: message.into(),
            severity: Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// Final state of a validation run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    Success,
    NonFatal { records: Vec<ErrorRecord> },
    /// `non_fatal` holds what was collected before the halt.
    Fatal {
        record: ErrorRecord,
        non_fatal: Vec<ErrorRecord>,
    },
}

impl ProcessingResult {
    /// Result for a document that could not be read at all.
    pub fn extraction_failure(page: Option<usize>, message: impl Into<String>) -> Self {
        ProcessingResult::Fatal {
            record: ErrorRecord::extraction_failure(page, message),
            non_fatal: Vec::new(),
        }
    }

    pub fn fatal_record(&self) -> Option<&ErrorRecord> {
        match self {
            ProcessingResult::Fatal { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn non_fatal_records(&self) -> &[ErrorRecord] {
        match self {
            ProcessingResult::Success => &[],
            ProcessingResult::NonFatal { records } => records,
            ProcessingResult::Fatal { non_fatal, .. } => non_fatal,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingResult::Success)
    }

    pub fn has_records(&self) -> bool {
        self.fatal_record().is_some() || !self.non_fatal_records().is_empty()
    }
}
