use crate::core::companies::{CompanyRegistry, NEGATIVE_KEYWORDS};
use crate::domain::model::ReportEntry;
use crate::utils::error::{ApiError, Result};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Resolve an anchor href against the listing page and keep it only when
/// it is a `.pdf` on an allow-listed host.
pub fn same_site_pdf(href: &str, base_url: &str, registry: &CompanyRegistry) -> Option<String> {
    if href.is_empty() {
        return None;
    }
    let base = Url::parse(base_url).ok()?;
    let full = base.join(href).ok()?;
    // The whole resolved URL must end in .pdf; a trailing query string
    // disqualifies the link.
    if !full.as_str().to_lowercase().ends_with(".pdf") {
        return None;
    }
    let host = full.host_str()?;
    if !registry.host_allowed(host) {
        return None;
    }
    Some(full.to_string())
}

/// Scan a results page for PDF links. Titles come from the anchor text,
/// falling back to the last path segment.
pub fn extract_pdf_links(
    html: &str,
    base_url: &str,
    registry: &CompanyRegistry,
) -> Result<Vec<ReportEntry>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").map_err(|e| ApiError::Listing {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for anchor in document.select(&selector) {
        let href = anchor.value().attr("href").unwrap_or("");
        let Some(pdf_url) = same_site_pdf(href, base_url, registry) else {
            continue;
        };
        if !seen.insert(pdf_url.clone()) {
            continue;
        }
        let text = anchor.text().collect::<String>().trim().to_string();
        let title = if text.is_empty() {
            pdf_url.rsplit('/').next().unwrap_or(&pdf_url).to_string()
        } else {
            text
        };
        entries.push(ReportEntry {
            title,
            pdf_url,
            source_page: base_url.to_string(),
        });
    }
    Ok(entries)
}

/// Apply the default ESG exclusion and any comma-separated positive
/// `report_type` filter, both matched against title and URL.
pub fn filter_reports(
    entries: Vec<ReportEntry>,
    report_type: Option<&str>,
    exclude_esg: bool,
) -> Vec<ReportEntry> {
    let positives: Vec<String> = report_type
        .map(|rt| {
            rt.split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    entries
        .into_iter()
        .filter(|entry| {
            let title = entry.title.to_lowercase();
            let url = entry.pdf_url.to_lowercase();
            if exclude_esg
                && NEGATIVE_KEYWORDS
                    .iter()
                    .any(|nk| title.contains(nk) || url.contains(nk))
            {
                return false;
            }
            if positives.is_empty() {
                return true;
            }
            positives
                .iter()
                .any(|pk| title.contains(pk) || url.contains(pk))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::companies::Company;
    use std::collections::{HashMap, HashSet};

    fn registry() -> CompanyRegistry {
        CompanyRegistry::default()
    }

    fn entry(title: &str, pdf_url: &str) -> ReportEntry {
        ReportEntry {
            title: title.to_string(),
            pdf_url: pdf_url.to_string(),
            source_page: "https://www.haysplc.com/investors/results-centre".to_string(),
        }
    }

    #[test]
    fn test_same_site_pdf_resolves_relative_links() {
        let base = "https://www.haysplc.com/investors/results-centre";
        assert_eq!(
            same_site_pdf("/docs/fy24-results.pdf", base, &registry()),
            Some("https://www.haysplc.com/docs/fy24-results.pdf".to_string())
        );
        assert_eq!(
            same_site_pdf("annual-report.PDF", base, &registry()),
            Some("https://www.haysplc.com/investors/annual-report.PDF".to_string())
        );
    }

    #[test]
    fn test_same_site_pdf_rejections() {
        let base = "https://www.haysplc.com/investors/results-centre";
        assert_eq!(same_site_pdf("", base, &registry()), None);
        assert_eq!(same_site_pdf("/docs/results.html", base, &registry()), None);
        assert_eq!(
            same_site_pdf("https://cdn.example.com/results.pdf", base, &registry()),
            None
        );
    }

    #[test]
    fn test_same_site_pdf_rejects_query_suffixed_links() {
        let base = "https://www.haysplc.com/investors/results-centre";
        assert_eq!(same_site_pdf("/docs/results.pdf?v=2", base, &registry()), None);
        assert_eq!(
            same_site_pdf("/docs/results.pdf#page=3", base, &registry()),
            None
        );
    }

    #[test]
    fn test_extract_pdf_links_dedupes_and_titles() {
        let html = r#"
            <html><body>
              <a href="/docs/fy24.pdf">FY24 Results</a>
              <a href="/docs/fy24.pdf">FY24 Results (again)</a>
              <a href="/docs/h1.pdf"></a>
              <a href="/about.html">About</a>
              <a href="https://other.example.com/x.pdf">Offsite</a>
            </body></html>
        "#;
        let base = "https://www.haysplc.com/investors/results-centre";
        let entries = extract_pdf_links(html, base, &registry()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "FY24 Results");
        assert_eq!(
            entries[0].pdf_url,
            "https://www.haysplc.com/docs/fy24.pdf"
        );
        assert_eq!(entries[0].source_page, base);
        // Empty anchor text falls back to the file name.
        assert_eq!(entries[1].title, "h1.pdf");
    }

    #[test]
    fn test_extract_pdf_links_with_test_registry() {
        let urls = HashMap::from([(
            Company::Hays,
            "http://127.0.0.1:9999/investors".to_string(),
        )]);
        let hosts = HashSet::from(["127.0.0.1".to_string()]);
        let registry = CompanyRegistry::new(urls, hosts);

        let html = r#"<a href="/files/results.pdf">Results</a>"#;
        let entries =
            extract_pdf_links(html, "http://127.0.0.1:9999/investors", &registry).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pdf_url, "http://127.0.0.1:9999/files/results.pdf");
    }

    #[test]
    fn test_filter_reports_excludes_esg_by_default() {
        let entries = vec![
            entry("FY24 Full Year Results", "https://www.haysplc.com/fy24.pdf"),
            entry(
                "Modern Slavery Statement",
                "https://www.haysplc.com/slavery.pdf",
            ),
            entry("Q3 Update", "https://www.haysplc.com/esg/q3.pdf"),
        ];
        let kept = filter_reports(entries, None, true);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "FY24 Full Year Results");
    }

    #[test]
    fn test_filter_reports_keeps_esg_when_disabled() {
        let entries = vec![entry(
            "Modern Slavery Statement",
            "https://www.haysplc.com/slavery.pdf",
        )];
        let kept = filter_reports(entries, None, false);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_filter_reports_positive_filter_is_comma_separated() {
        let entries = vec![
            entry("FY24 Annual Report", "https://www.haysplc.com/ar24.pdf"),
            entry("Half Year Results", "https://www.haysplc.com/hy.pdf"),
            entry("Trading Update", "https://www.haysplc.com/tu.pdf"),
        ];
        let kept = filter_reports(entries, Some("annual, half year"), true);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.title != "Trading Update"));
    }

    #[test]
    fn test_filter_reports_matches_url_too() {
        let entries = vec![entry("Download", "https://www.haysplc.com/interim-2024.pdf")];
        let kept = filter_reports(entries, Some("interim"), true);
        assert_eq!(kept.len(), 1);
    }
}
