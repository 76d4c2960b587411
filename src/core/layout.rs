use crate::ProcessingResult;
use serde::Serialize;

/// Additional metadata about the source document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub total_pages: usize,
    pub file_path: String,
    pub file_size: u64,
}

/// Reported to the progress observer before each page is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based
    pub current: usize,
    pub total: usize,
}

impl PageProgress {
    pub fn message(&self) -> String {
        format!("Processando página {}/{}...", self.current, self.total)
    }
}

/// Counters gathered while walking the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
    pub total_pages: usize,
    pub pages_visited: usize,
    pub empty_pages: usize,
    /// Value of the global line counter when the run stopped.
    pub lines_seen: usize,
    pub rows_validated: usize,
    pub lines_skipped: usize,
}

/// What a run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingReport {
    pub result: ProcessingResult,
    pub summary: ProcessingSummary,
}
