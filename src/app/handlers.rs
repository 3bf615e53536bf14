use crate::app::state::AppState;
use crate::core::catalog::{extract_pdf_links, filter_reports};
use crate::core::fetch::cache_busted;
use crate::core::pdf::metrics::scan_pages;
use crate::core::pdf::tables::detect_tables;
use crate::core::pdf::{collapse_whitespace, PdfDocument};
use crate::domain::model::{
    HealthResponse, MetricsExtractRequest, MetricsExtractResponse, PageText, ReportListing,
    ReportsQuery, TablesExtractRequest, TablesExtractResponse, TextExtractRequest,
    TextExtractResponse,
};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_range, validate_url};
use axum::extract::{Query, State};
use axum::Json;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub async fn fetch_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<ReportListing>> {
    validate_range("limit", query.limit, 1, 20)?;

    let base_url = cache_busted(state.registry.results_url(query.company));
    tracing::info!("listing reports for {:?} from {}", query.company, base_url);

    let html = state.source.fetch_html(&base_url).await?;
    let entries = extract_pdf_links(&html, &base_url, &state.registry)?;
    tracing::debug!("found {} candidate PDFs", entries.len());

    let mut results = filter_reports(entries, query.report_type.as_deref(), query.exclude_esg);
    results.truncate(query.limit);

    Ok(Json(ReportListing {
        company: query.company,
        results,
    }))
}

/// Enforces the host allow-list before any bytes move.
async fn download_pdf(state: &AppState, pdf_url: &str) -> Result<PdfDocument> {
    validate_url("pdf_url", pdf_url)?;
    if !state.registry.url_host_allowed(pdf_url) {
        return Err(ApiError::HostNotAllowed);
    }
    let bytes = state.source.fetch_pdf(pdf_url).await?;
    PdfDocument::load(&bytes)
}

pub async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<TextExtractRequest>,
) -> Result<Json<TextExtractResponse>> {
    let doc = download_pdf(&state, &request.pdf_url).await?;

    let mut blocks = Vec::new();
    for page in doc.selected_pages(request.pages.as_deref()) {
        let mut text = doc.page_text(page)?;
        if request.dedupe_whitespace {
            text = collapse_whitespace(&text)?;
        }
        blocks.push(PageText { page, text });
    }

    Ok(Json(TextExtractResponse {
        pdf_url: request.pdf_url,
        blocks,
    }))
}

pub async fn extract_tables(
    State(state): State<AppState>,
    Json(request): Json<TablesExtractRequest>,
) -> Result<Json<TablesExtractResponse>> {
    let doc = download_pdf(&state, &request.pdf_url).await?;
    let pages = doc.selected_pages(request.pages.as_deref());
    let tables = detect_tables(&doc, &pages)?;

    Ok(Json(TablesExtractResponse {
        pdf_url: request.pdf_url,
        tables,
    }))
}

pub async fn extract_metrics(
    State(state): State<AppState>,
    Json(request): Json<MetricsExtractRequest>,
) -> Result<Json<MetricsExtractResponse>> {
    let doc = download_pdf(&state, &request.pdf_url).await?;

    let mut pages = Vec::new();
    for page in doc.selected_pages(None) {
        pages.push((page, doc.page_text(page)?));
    }

    let scan = scan_pages(&pages, &request)?;
    tracing::info!(
        "extracted {} metric items from {} ({} pages)",
        scan.items.len(),
        request.pdf_url,
        pages.len()
    );

    Ok(Json(MetricsExtractResponse {
        pdf_url: request.pdf_url,
        report_title: None,
        report_date: None,
        company: request.company,
        period_label: request.expected_period_label.unwrap_or_default(),
        items: scan.items,
        not_disclosed: scan.not_disclosed,
        recheck_performed: scan.recheck_performed,
    }))
}
