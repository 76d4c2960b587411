use crate::core::classifier::classify;
use crate::core::layout::{PageProgress, ProcessingReport, ProcessingSummary};
use crate::core::pdf_parser::PageSource;
use crate::core::suspicious::SuspiciousTokenDetector;
use crate::core::validator::FieldValidator;
use crate::config::AppConfig;
use crate::{ErrorRecord, ProcessingResult, Row, ValidationOutcome};
use log::{debug, error, info, warn};

/// Walks a document page by page and applies the row grammar to every data line.
///
/// Each call to [`DocumentProcessor::process`] owns its own line counter and
/// accumulator, so one processor can validate many documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    validator: FieldValidator,
}

/// Outcome of a single row once it has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowVerdict {
    Skipped,
    Valid,
    Rejected(ErrorRecord),
}

impl DocumentProcessor {
    pub fn new(validator: FieldValidator) -> Self {
        Self { validator }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(FieldValidator::new(SuspiciousTokenDetector::new(
            config.grammar.glued_token_max_len,
        )))
    }

    /// Headers, footers and blank lines never start with a digit.
    pub fn is_data_line(trimmed: &str) -> bool {
        trimmed.chars().next().is_some_and(|c| c.is_ascii_digit())
    }

    /// Validate one row and attach its severity.
    pub fn check_row(&self, row: &Row) -> RowVerdict {
        let trimmed = row.raw.trim();
        if !Self::is_data_line(trimmed) {
            return RowVerdict::Skipped;
        }

        match self.validator.validate_row(trimmed) {
            ValidationOutcome::Valid => RowVerdict::Valid,
            ValidationOutcome::Invalid { reason, message } => {
                let mut record = ErrorRecord::for_row(row, reason, message, classify(reason));
                record.content = trimmed.to_string();
                RowVerdict::Rejected(record)
            }
        }
    }

    pub fn process<S: PageSource + ?Sized>(&self, source: &S) -> ProcessingReport {
        self.process_with_progress(source, |_| {})
    }

    /// `on_page` is called once per page, before that page is read.
    pub fn process_with_progress<S, F>(&self, source: &S, mut on_page: F) -> ProcessingReport
    where
        S: PageSource + ?Sized,
        F: FnMut(PageProgress),
    {
        let total = source.page_count();
        let mut summary = ProcessingSummary {
            total_pages: total,
            ..ProcessingSummary::default()
        };
        let mut non_fatal = Vec::new();

        info!("Validating {} page(s) from '{}'", total, source.metadata().file_path);

        for page in 1..=total {
            on_page(PageProgress { current: page, total });
            summary.pages_visited += 1;

            let text = match source.page_text(page) {
                Ok(Some(text)) => text,
                Ok(None) => {
                    debug!("Page {} has no extractable text", page);
                    summary.empty_pages += 1;
                    continue;
                }
                Err(e) => {
                    error!("Failed to extract text from page {}: {}", page, e);
                    let record = ErrorRecord::extraction_failure(Some(page), e.to_string());
                    return ProcessingReport {
                        result: ProcessingResult::Fatal { record, non_fatal },
                        summary,
                    };
                }
            };

            for raw in text.split('\n') {
                summary.lines_seen += 1;
                let row = Row {
                    page,
                    line: summary.lines_seen,
                    raw: raw.to_string(),
                };

                match self.check_row(&row) {
                    RowVerdict::Skipped => {
                        debug!("Skipping line {} on page {}", row.line, page);
                        summary.lines_skipped += 1;
                    }
                    RowVerdict::Valid => summary.rows_validated += 1,
                    RowVerdict::Rejected(record) => {
                        summary.rows_validated += 1;
                        if !record.is_fatal() {
                            warn!("Page {}, line {}: {} ({})", page, row.line, record.reason, record.content);
                            non_fatal.push(record);
                            continue;
                        }

                        error!(
                            "Fatal error on page {}, line {}: {} ({})",
                            page, row.line, record.reason, record.content
                        );
                        return ProcessingReport {
                            result: ProcessingResult::Fatal { record, non_fatal },
                            summary,
                        };
                    }
                }
            }
        }

        info!(
            "Completed: {} row(s) validated, {} non-fatal error(s)",
            summary.rows_validated,
            non_fatal.len()
        );

        let result = if non_fatal.is_empty() {
            ProcessingResult::Success
        } else {
            ProcessingResult::NonFatal { records: non_fatal }
        };
        ProcessingReport { result, summary }
    }
}
