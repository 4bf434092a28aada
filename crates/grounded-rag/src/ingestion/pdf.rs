//! Page-by-page PDF text extraction into paragraph passages

use lopdf::Document;

use crate::error::{Error, Result};
use crate::types::Passage;

use super::sections::detect_section;

/// Lines at or below this many characters are treated as headings or noise
pub const MIN_PARAGRAPH_CHARS: usize = 40;

/// Extracts paragraph passages from a single PDF
pub struct PdfIngestor {
    /// Name used in error messages
    source_name: String,
}

impl PdfIngestor {
    /// Create an ingestor for a named source document
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }

    /// Read and ingest a PDF file
    pub async fn ingest_file(path: impl AsRef<std::path::Path>) -> Result<Vec<Passage>> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let ingestor = Self::new(path.display().to_string());

        tokio::task::spawn_blocking(move || ingestor.ingest(&data))
            .await
            .map_err(|e| Error::ingestion(path.display().to_string(), format!("Task join error: {}", e)))?
    }

    /// Ingest PDF bytes into passages with sequential `para_NNNN` IDs
    pub fn ingest(&self, data: &[u8]) -> Result<Vec<Passage>> {
        let doc = Document::load_mem(data)
            .map_err(|e| Error::ingestion(&self.source_name, format!("Failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for (page_number, _) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(text) if !text.trim().is_empty() => pages.push((page_number, text)),
                Ok(_) => tracing::debug!("Page {} has no extractable text", page_number),
                Err(e) => tracing::warn!("Could not extract text from page {}: {}", page_number, e),
            }
        }

        if pages.is_empty() {
            return Err(Error::ingestion(
                &self.source_name,
                "PDF has no extractable text; it may be image-based or encrypted",
            ));
        }

        let passages = passages_from_pages(&pages);
        tracing::info!(
            "Extracted {} passages from {} pages of {}",
            passages.len(),
            pages.len(),
            self.source_name
        );
        Ok(passages)
    }
}

/// Split page texts into passages
///
/// Every line longer than [`MIN_PARAGRAPH_CHARS`] (after trimming) becomes one
/// passage. IDs are assigned in page order across the whole document.
pub fn passages_from_pages(pages: &[(u32, String)]) -> Vec<Passage> {
    let mut passages = Vec::new();

    for (page_number, text) in pages {
        let text = text.replace('\0', "").replace('\u{00A0}', " ");

        for line in text.lines().map(str::trim) {
            if line.chars().count() <= MIN_PARAGRAPH_CHARS {
                continue;
            }
            passages.push(Passage::new(
                format!("para_{:04}", passages.len()),
                line,
                detect_section(line),
                *page_number,
            ));
        }
    }

    passages
}
