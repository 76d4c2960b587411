use crate::core::layout::DocumentMetadata;
use std::path::Path;
use thiserror::Error;

/// Pages in a plain-text dump are separated by form feeds, as `pdftotext` writes them.
pub const PAGE_SEPARATOR: char = '\u{000C}';

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractionError {
    /// `lopdf` could not load the document or decode a page.
    #[error("lopdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("página {0} não existe no documento")]
    PageOutOfRange(usize),
}

/// The text-extraction collaborator: an ordered sequence of pages.
pub trait PageSource {
    fn metadata(&self) -> &DocumentMetadata;

    fn page_count(&self) -> usize {
        self.metadata().total_pages
    }

    /// Text of a 1-based page; `None` when the page has no extractable text.
    fn page_text(&self, page: usize) -> Result<Option<String>, ExtractionError>;
}

/// PageSource implementation using lopdf
pub struct LopdfExtractor {
    document: lopdf::Document,
    page_numbers: Vec<u32>,
    metadata: DocumentMetadata,
}

impl LopdfExtractor {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let document = lopdf::Document::load(path)?;

        // get_pages is keyed by page number, so the order is the reading order
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

        let metadata = DocumentMetadata {
            total_pages: page_numbers.len(),
            file_path: path.to_string_lossy().to_string(),
            file_size: std::fs::metadata(path)?.len(),
        };

        log::debug!(
            "Loaded {} ({} pages, {} bytes)",
            metadata.file_path, metadata.total_pages, metadata.file_size
        );

        Ok(Self {
            document,
            page_numbers,
            metadata,
        })
    }
}

impl PageSource for LopdfExtractor {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn page_text(&self, page: usize) -> Result<Option<String>, ExtractionError> {
        let number = page
            .checked_sub(1)
            .and_then(|index| self.page_numbers.get(index))
            .ok_or(ExtractionError::PageOutOfRange(page))?;

        // lopdf ends every text object with a newline, including the last one on the page
        let mut text = self.document.extract_text(&[*number])?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(non_empty(text))
    }
}

/// Pre-extracted text held in memory, one entry per page.
#[derive(Debug, Clone, Default)]
pub struct TextPages {
    pages: Vec<Option<String>>,
    metadata: DocumentMetadata,
}

impl TextPages {
    pub fn new(pages: Vec<Option<String>>) -> Self {
        let metadata = DocumentMetadata {
            total_pages: pages.len(),
            ..DocumentMetadata::default()
        };
        Self { pages, metadata }
    }

    /// Split a text dump into pages on [`PAGE_SEPARATOR`].
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
        Self::new(
            text.split(PAGE_SEPARATOR)
                .map(|page| non_empty(page.to_string()))
                .collect(),
        )
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut pages = Self::from_text(&String::from_utf8_lossy(&bytes));
        pages.metadata.file_path = path.to_string_lossy().to_string();
        pages.metadata.file_size = bytes.len() as u64;
        Ok(pages)
    }
}

impl PageSource for TextPages {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn page_text(&self, page: usize) -> Result<Option<String>, ExtractionError> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .ok_or(ExtractionError::PageOutOfRange(page))
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::document_processor::DocumentProcessor;
    use crate::ReasonCode;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// One text object per line, like report generators emit them.
    fn build_pdf(pages: &[&[&str]]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in pages {
            let mut operations = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 12i64.into()]));
                operations.push(Operation::new("Td", vec![50i64.into(), (700 - 20 * i as i64).into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0i64.into(), 0i64.into(), 595i64.into(), 842i64.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn pdf_pages_keep_order_and_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plano.pdf");
        let pages: [&[&str]; 2] = [&["PLANO DE CONTAS", "1 1 S Caixa X"], &["1 1 S Loc123456789 X"]];
        build_pdf(&pages).save(&path).unwrap();

        let extractor = LopdfExtractor::open(&path).unwrap();
        assert_eq!(extractor.page_count(), 2);
        assert_eq!(
            extractor.page_text(1).unwrap().as_deref(),
            Some("PLANO DE CONTAS\n1 1 S Caixa X")
        );
        assert_eq!(extractor.page_text(2).unwrap().as_deref(), Some("1 1 S Loc123456789 X"));

        let report = DocumentProcessor::default().process(&extractor);
        let records = report.result.non_fatal_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reason, ReasonCode::GluedToken);
        assert_eq!((records[0].page, records[0].line), (Some(2), Some(3)));
        assert_eq!(report.summary.lines_seen, 3);
    }

    #[test]
    fn splits_text_dump_on_form_feed() {
        let pages = TextPages::from_text("1 1 S Caixa X\n\u{000C}\u{000C}2 2 S Bancos X\n\u{000C}");
        assert_eq!(pages.page_count(), 3);
        assert_eq!(pages.page_text(1).unwrap().as_deref(), Some("1 1 S Caixa X\n"));
        assert_eq!(pages.page_text(2).unwrap(), None);
        assert_eq!(pages.page_text(3).unwrap().as_deref(), Some("2 2 S Bancos X\n"));
    }

    #[test]
    fn page_numbers_are_one_based() {
        let pages = TextPages::new(vec![Some("a".into())]);
        assert!(matches!(pages.page_text(0), Err(ExtractionError::PageOutOfRange(0))));
        assert!(matches!(pages.page_text(2), Err(ExtractionError::PageOutOfRange(2))));
    }

    #[test]
    fn opening_a_missing_pdf_fails() {
        let result = LopdfExtractor::open("/nonexistent/relatorio.pdf");
        assert!(result.is_err());
    }
}
