//! PDF ingestion: page text → paragraph passages with section labels

mod pdf;
mod sections;
mod store;

pub use pdf::{passages_from_pages, PdfIngestor, MIN_PARAGRAPH_CHARS};
pub use sections::detect_section;
pub use store::PassageStore;
