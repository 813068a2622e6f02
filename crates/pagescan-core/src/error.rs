use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to open PDF: {0}")]
    DocumentOpen(String),

    #[error("Failed to extract text from page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid page range: {0}")]
    InvalidRange(String),

    #[error("Invalid CSV report: {0}")]
    CsvParse(String),
}
