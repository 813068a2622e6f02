//! Report data model for per-page text detection

use serde::{Deserialize, Serialize};

/// Length of the text sample kept per page, in characters
pub const SAMPLE_CHARS: usize = 200;

/// Classification of a single page
///
/// `page_index` is 0-based; presentation layers that show 1-based page
/// numbers derive them with `page_number()`. Created once per page during
/// analysis, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 0-based position of the page in the document
    pub page_index: u32,
    /// Character count of the trimmed extracted text
    pub char_count: usize,
    /// Whitespace-separated token count
    pub word_count: usize,
    /// Whether `char_count` met the threshold
    pub has_text: bool,
    /// First characters of the text, newlines collapsed to spaces
    pub sample: String,
}

impl PageResult {
    /// Build a result from a page's extracted text
    pub fn from_text(page_index: u32, text: &str, threshold: usize) -> Self {
        let trimmed = text.trim();
        let char_count = trimmed.chars().count();
        let word_count = if trimmed.is_empty() {
            0
        } else {
            trimmed.split_whitespace().count()
        };
        let sample: String = trimmed
            .chars()
            .take(SAMPLE_CHARS)
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        Self {
            page_index,
            char_count,
            word_count,
            has_text: char_count >= threshold,
            sample,
        }
    }

    /// Result for a page whose extraction failed: recorded as no text
    pub fn extraction_failed(page_index: u32) -> Self {
        Self {
            page_index,
            char_count: 0,
            word_count: 0,
            has_text: false,
            sample: String::new(),
        }
    }

    /// 1-based page number for display
    pub fn page_number(&self) -> u32 {
        self.page_index + 1
    }
}

/// Ordered per-page results for one analysis run
///
/// Row order matches document order; one row per analyzed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub pages: Vec<PageResult>,
    /// Pages whose extraction failed and were recorded as no-text rows
    pub failed_pages: u32,
}

impl AnalysisReport {
    pub fn summary(&self) -> ReportSummary {
        let with_text: Vec<u32> = self
            .pages
            .iter()
            .filter(|p| p.has_text)
            .map(|p| p.page_number())
            .collect();
        let without_text: Vec<u32> = self
            .pages
            .iter()
            .filter(|p| !p.has_text)
            .map(|p| p.page_number())
            .collect();

        ReportSummary {
            pages_analyzed: self.pages.len(),
            pages_with_text: with_text.len(),
            pages_without_text: without_text.len(),
            with_text,
            without_text,
        }
    }
}

/// Aggregate counts plus 1-based page number lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub pages_analyzed: usize,
    pub pages_with_text: usize,
    pub pages_without_text: usize,
    pub with_text: Vec<u32>,
    pub without_text: Vec<u32>,
}

/// Options for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Minimum character count for a page to count as having text
    pub threshold: usize,
    /// Optional 1-based inclusive page range; None analyzes every page
    pub page_range: Option<(u32, u32)>,
}

/// Matches the original tool's slider default: a handful of stray
/// characters from rendering artifacts should not count as text.
pub const DEFAULT_THRESHOLD: usize = 5;

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            page_range: None,
        }
    }
}
