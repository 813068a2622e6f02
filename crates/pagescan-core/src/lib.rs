//! Per-page extractable-text detection for PDFs
//!
//! Given a PDF, this crate reports for each page whether extractable
//! text is present (native text or an embedded OCR layer), using a
//! character-count threshold. It does not perform OCR and cannot tell
//! native text apart from previously-OCRed text; it only checks whether
//! text can be pulled out of the page at all.
//!
//! Entry points:
//! - [`analyze`]: classify every page of a document
//! - [`to_csv`] / [`parse_csv`]: export a report and read one back

pub mod classify;
pub mod csv;
pub mod error;
pub mod extract;
pub mod report;

pub use classify::analyze;
pub use csv::{parse_csv, to_csv, CsvRecord, CSV_HEADER};
pub use error::AnalysisError;
pub use report::{
    AnalysisOptions, AnalysisReport, PageResult, ReportSummary, DEFAULT_THRESHOLD,
};

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32, AnalysisError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| AnalysisError::DocumentOpen(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

/// Parse a 1-based inclusive page range string like "3-17" or "5"
pub fn parse_page_range(input: &str) -> Result<(u32, u32), AnalysisError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AnalysisError::InvalidRange("Empty range".into()));
    }

    if let Some((start, end)) = input.split_once('-') {
        let start: u32 = start
            .trim()
            .parse()
            .map_err(|_| AnalysisError::InvalidRange(format!("Invalid start: {}", start)))?;
        let end: u32 = end
            .trim()
            .parse()
            .map_err(|_| AnalysisError::InvalidRange(format!("Invalid end: {}", end)))?;

        if start == 0 || end == 0 {
            return Err(AnalysisError::InvalidRange(
                "Page numbers must be >= 1".into(),
            ));
        }

        Ok((start, end))
    } else {
        let page: u32 = input
            .parse()
            .map_err(|_| AnalysisError::InvalidRange(format!("Invalid page: {}", input)))?;
        if page == 0 {
            return Err(AnalysisError::InvalidRange(
                "Page numbers must be >= 1".into(),
            ));
        }
        Ok((page, page))
    }
}
