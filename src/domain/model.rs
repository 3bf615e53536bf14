use crate::core::companies::Company;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_limit() -> usize {
    5
}

fn default_basis_order() -> Vec<String> {
    ["Like-for-like", "Constant FX", "Underlying", "Reported"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportsQuery {
    pub company: Company,
    pub report_type: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_true")]
    pub exclude_esg: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub title: String,
    pub pdf_url: String,
    pub source_page: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportListing {
    pub company: Company,
    pub results: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextExtractRequest {
    pub pdf_url: String,
    pub pages: Option<Vec<usize>>,
    /// Accepted for wire compatibility; no OCR backend is wired up.
    #[serde(default = "default_true")]
    pub ocr: bool,
    #[serde(default = "default_true")]
    pub dedupe_whitespace: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageText {
    pub page: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextExtractResponse {
    pub pdf_url: String,
    pub blocks: Vec<PageText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesExtractRequest {
    pub pdf_url: String,
    pub pages: Option<Vec<usize>>,
    #[serde(default = "default_true")]
    pub merge_multiline: bool,
    #[serde(default = "default_true")]
    pub include_headers: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableCell {
    pub row: usize,
    pub col: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageTable {
    pub page: usize,
    pub title: String,
    pub n_rows: usize,
    pub n_cols: usize,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TablesExtractResponse {
    pub pdf_url: String,
    pub tables: Vec<PageTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsExtractRequest {
    pub pdf_url: String,
    pub company: Company,
    pub expected_period_label: Option<String>,
    #[serde(default = "default_true")]
    pub apply_hays_fiscal_mapping: bool,
    pub metrics: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    #[serde(default = "default_basis_order")]
    pub basis_preference_order: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricItem {
    pub company: String,
    pub report_title: Option<String>,
    pub report_date: Option<String>,
    pub country: String,
    pub region: Option<String>,
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub period_label: String,
    pub basis: Option<String>,
    pub source_text: String,
    pub page: usize,
    pub table_title: Option<String>,
    pub footnote_refs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsExtractResponse {
    pub pdf_url: String,
    pub report_title: Option<String>,
    pub report_date: Option<String>,
    pub company: Company,
    pub period_label: String,
    pub items: Vec<MetricItem>,
    pub not_disclosed: Vec<String>,
    pub recheck_performed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
