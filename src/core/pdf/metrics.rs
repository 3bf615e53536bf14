use crate::domain::model::{MetricItem, MetricsExtractRequest};
use crate::utils::error::Result;
use regex::Regex;

pub const COUNTRY_PATTERN: &str = "(Germany|United Kingdom|UK|France|Australia|Netherlands|\
Belgium|Spain|Portugal|Italy|Japan|China|Hong Kong|Singapore|USA|United States|Canada|\
Switzerland|Austria|Ireland|Poland|Czech Republic|UAE|United Arab Emirates|New Zealand|\
India|Brazil|Chile|Mexico)";

pub const VALUE_PATTERN: &str = r"([+\-]?\d+(?:\.\d+)?)\s*%";

#[derive(Debug)]
pub struct MetricScan {
    pub items: Vec<MetricItem>,
    pub not_disclosed: Vec<String>,
    pub recheck_performed: bool,
}

// When several requested countries look undisclosed, the first pass may
// just have missed a non-standard phrasing. Rechecking above this count
// downgrades "not disclosed" to "mentioned somewhere".
const RECHECK_THRESHOLD: usize = 3;

fn normalize_country(country: &str) -> String {
    if country == "UK" {
        "United Kingdom".to_string()
    } else {
        country.to_string()
    }
}

fn detect_basis(
    snippet: &str,
    lfl: &Regex,
    constant_fx: &Regex,
    reported: &Regex,
) -> Option<String> {
    if lfl.is_match(snippet) {
        Some("Like-for-like".to_string())
    } else if constant_fx.is_match(snippet) {
        Some("Constant FX".to_string())
    } else if reported.is_match(snippet) {
        Some("Reported".to_string())
    } else {
        None
    }
}

fn char_boundary_floor(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn char_boundary_ceil(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// First-pass metric extraction over `(page_number, page_text)` pairs:
/// country mention followed by a percentage value on the same line run,
/// with basis and metric name read from the surrounding snippet.
pub fn scan_pages(pages: &[(usize, String)], req: &MetricsExtractRequest) -> Result<MetricScan> {
    let matcher = Regex::new(&format!(
        "(?i){}.*?(?:net fees|gross profit|fees|consultants|headcount)?.*?{}",
        COUNTRY_PATTERN, VALUE_PATTERN
    ))?;
    let lfl = Regex::new(r"(?i)\bLFL\b|like[- ]for[- ]like")?;
    let constant_fx = Regex::new(r"(?i)constant (?:fx|currency)")?;
    let reported = Regex::new(r"(?i)\breported\b")?;
    let fees = Regex::new(r"(?i)net fees|fees")?;

    let mut items = Vec::new();
    for (page, text) in pages {
        for caps in matcher.captures_iter(text) {
            let Some(full) = caps.get(0) else { continue };
            let Some(country) = caps.get(1) else { continue };
            let Some(value) = caps.get(2) else { continue };
            let Ok(value) = value.as_str().parse::<f64>() else {
                continue;
            };

            let start = char_boundary_floor(text, full.start().saturating_sub(60));
            let end = char_boundary_ceil(text, full.end() + 40);
            let snippet = text[start..end].replace('\n', " ");

            let basis = detect_basis(&snippet, &lfl, &constant_fx, &reported);
            let metric_name = if fees.is_match(&snippet) {
                "Net Fees YoY %"
            } else {
                "Gross Profit YoY %"
            };
            if let Some(wanted) = &req.metrics {
                if !wanted.iter().any(|m| m == metric_name) {
                    continue;
                }
            }

            let country = normalize_country(country.as_str());
            if let Some(wanted) = &req.countries {
                if !wanted.contains(&country) {
                    continue;
                }
            }

            items.push(MetricItem {
                company: req.company.display_name().to_string(),
                report_title: None,
                report_date: None,
                country,
                region: None,
                metric: metric_name.to_string(),
                value,
                unit: "%".to_string(),
                period_label: req.expected_period_label.clone().unwrap_or_default(),
                basis,
                source_text: snippet.trim().to_string(),
                page: *page,
                table_title: None,
                footnote_refs: Vec::new(),
            });
        }
    }

    let mut not_disclosed = Vec::new();
    if let Some(wanted) = &req.countries {
        for country in wanted {
            if !items.iter().any(|item| &item.country == country) {
                not_disclosed.push(country.clone());
            }
        }
    }

    let mut recheck_performed = false;
    if not_disclosed.len() >= RECHECK_THRESHOLD {
        recheck_performed = true;
        for (_, text) in pages {
            not_disclosed.retain(|country| {
                match Regex::new(&format!(r"\b{}\b", regex::escape(country))) {
                    Ok(mention) => !mention.is_match(text),
                    Err(_) => true,
                }
            });
        }
    }

    Ok(MetricScan {
        items,
        not_disclosed,
        recheck_performed,
    })
}
