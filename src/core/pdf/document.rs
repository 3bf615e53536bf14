use crate::core::pdf::layout::{collect_words, group_rows, Word};
use crate::utils::error::{ApiError, Result};
use lopdf::content::Content;
use lopdf::{Document, ObjectId};
use regex::Regex;

/// A loaded PDF with API-facing 1-based page numbering.
pub struct PdfDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)?;
        let page_ids = doc.get_pages().into_values().collect();
        Ok(Self { doc, page_ids })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Requested page numbers clipped to the document; `None` means all
    /// pages. Out-of-range entries are dropped silently.
    pub fn selected_pages(&self, requested: Option<&[usize]>) -> Vec<usize> {
        match requested {
            None => (1..=self.page_count()).collect(),
            Some(pages) => pages
                .iter()
                .copied()
                .filter(|&p| p >= 1 && p <= self.page_count())
                .collect(),
        }
    }

    pub fn page_words(&self, page: usize) -> Result<Vec<Word>> {
        let page_id = self
            .page_ids
            .get(page.wrapping_sub(1))
            .ok_or_else(|| ApiError::InvalidRequest {
                message: format!("page {} out of range", page),
            })?;
        let data = self.doc.get_page_content(*page_id)?;
        let content = Content::decode(&data)?;
        Ok(collect_words(&content))
    }

    /// Plain text of one page: visual rows top-down, words joined by
    /// single spaces, rows by newlines.
    pub fn page_text(&self, page: usize) -> Result<String> {
        let rows = group_rows(self.page_words(page)?);
        let lines: Vec<String> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Collapse space/tab runs to one space and 3+ newlines to a blank line.
pub fn collapse_whitespace(text: &str) -> Result<String> {
    let spaces = Regex::new(r"[ \t]+")?;
    let newlines = Regex::new(r"\n{3,}")?;
    let text = spaces.replace_all(text, " ");
    Ok(newlines.replace_all(&text, "\n\n").into_owned())
}
