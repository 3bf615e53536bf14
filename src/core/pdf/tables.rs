use crate::core::pdf::document::PdfDocument;
use crate::core::pdf::layout::group_rows;
use crate::domain::model::{PageTable, TableCell};
use crate::utils::error::Result;

/// Lightweight table-ish detection: words grouped into visual rows by y,
/// keeping rows with multiple cells or at least one digit. Pages with no
/// surviving rows produce no table.
pub fn detect_tables(doc: &PdfDocument, pages: &[usize]) -> Result<Vec<PageTable>> {
    let mut tables = Vec::new();

    for &page in pages {
        let rows = group_rows(doc.page_words(page)?);
        let kept: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|w| w.text).collect::<Vec<String>>())
            .filter(|cells| {
                cells.len() > 1 || cells.iter().any(|c| c.chars().any(|ch| ch.is_ascii_digit()))
            })
            .collect();

        if kept.is_empty() {
            continue;
        }

        let n_rows = kept.len();
        let n_cols = kept.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut cells = Vec::new();
        for (row_idx, row) in kept.iter().enumerate() {
            for (col_idx, text) in row.iter().enumerate() {
                cells.push(TableCell {
                    row: row_idx,
                    col: col_idx,
                    text: text.clone(),
                });
            }
        }

        tables.push(PageTable {
            page,
            title: format!("Detected table-like rows p.{}", page),
            n_rows,
            n_cols,
            cells,
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pdf::document::test_pdf;

    #[test]
    fn test_detect_tables_groups_rows_and_cells() {
        let bytes = test_pdf::build(&[vec![
            (72, 720, "Country"),
            (250, 720, "Net fees"),
            (400, 720, "Growth"),
            (72, 700, "Germany"),
            (250, 700, "312.4"),
            (400, 700, "+2%"),
            (72, 680, "France"),
            (250, 680, "198.0"),
            (400, 680, "-1%"),
        ]]);
        let doc = PdfDocument::load(&bytes).unwrap();

        let tables = detect_tables(&doc, &[1]).unwrap();
        assert_eq!(tables.len(), 1);

        let table = &tables[0];
        assert_eq!(table.page, 1);
        assert_eq!(table.title, "Detected table-like rows p.1");
        assert_eq!(table.n_rows, 3);
        assert_eq!(table.n_cols, 3);
        assert!(table.cells.contains(&TableCell {
            row: 1,
            col: 0,
            text: "Germany".to_string(),
        }));
        assert!(table.cells.contains(&TableCell {
            row: 2,
            col: 2,
            text: "-1%".to_string(),
        }));
    }

    #[test]
    fn test_detect_tables_drops_prose_rows() {
        // Single-cell rows without digits are prose, not table material.
        let bytes = test_pdf::build(&[vec![
            (72, 720, "Chief Executive statement"),
            (72, 700, "Revenue was 1,024m"),
        ]]);
        let doc = PdfDocument::load(&bytes).unwrap();

        let tables = detect_tables(&doc, &[1]).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].n_rows, 1);
        assert_eq!(tables[0].cells[0].text, "Revenue was 1,024m");
    }

    #[test]
    fn test_detect_tables_skips_empty_pages() {
        let bytes = test_pdf::build(&[
            vec![(72, 720, "Just a heading")],
            vec![(72, 720, "Germany"), (300, 720, "+2%")],
        ]);
        let doc = PdfDocument::load(&bytes).unwrap();

        let tables = detect_tables(&doc, &[1, 2]).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].page, 2);
    }
}
