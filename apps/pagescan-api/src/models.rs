//! Request and response models for PageScan API

use pagescan_core::{PageResult, ReportSummary};
use serde::{Deserialize, Serialize};

/// Request to analyze a PDF
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded PDF data
    pub pdf_base64: String,
    /// Minimum character count for a page to count as having text;
    /// defaults to the library's threshold when omitted
    #[serde(default)]
    pub threshold: Option<i64>,
    /// Optional 1-based inclusive page range, e.g. "3-17" or "5"
    #[serde(default)]
    pub pages: Option<String>,
}

/// One page in the analysis response, with a 1-based page number
#[derive(Debug, Clone, Serialize)]
pub struct PageRow {
    pub page: u32,
    pub char_count: usize,
    pub word_count: usize,
    pub has_text: bool,
    pub sample: String,
}

impl From<&PageResult> for PageRow {
    fn from(result: &PageResult) -> Self {
        Self {
            page: result.page_number(),
            char_count: result.char_count,
            word_count: result.word_count,
            has_text: result.has_text,
            sample: result.sample.clone(),
        }
    }
}

/// Analysis response: aggregate summary plus per-page detail
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub threshold: usize,
    pub summary: ReportSummary,
    /// Pages whose extraction failed and were recorded as no-text rows
    pub failed_pages: u32,
    pub results: Vec<PageRow>,
}
