use lopdf::content::Content;
use lopdf::Object;
use std::collections::BTreeMap;

/// A shown string with the text-matrix position it was drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

// TJ kerning adjustments below this (thousandths of text space) read as
// word gaps rather than glyph tightening.
const WORD_GAP_THRESHOLD: f64 = -180.0;

fn operand_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// PDF string bytes: UTF-16BE when BOM-prefixed, Latin-1 otherwise.
fn decode_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Walk a page content stream tracking the text object state (`BT`, `Tm`,
/// `Td`, `TD`, `TL`, `T*`) and emit every shown string (`Tj`, `'`, `"`,
/// `TJ`) with its position. Glyph widths are not modeled; the x position
/// is the start of the show operation, which is where real report
/// generators place each cell.
pub fn collect_words(content: &Content) -> Vec<Word> {
    let mut words = Vec::new();
    let mut line_x = 0.0_f64;
    let mut line_y = 0.0_f64;
    let mut leading = 0.0_f64;

    let mut push = |x: f64, y: f64, text: String| {
        if !text.trim().is_empty() {
            words.push(Word {
                x,
                y,
                text: text.trim().to_string(),
            });
        }
    };

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                line_x = 0.0;
                line_y = 0.0;
                leading = 0.0;
            }
            "Tm" => {
                if operands.len() == 6 {
                    if let (Some(e), Some(f)) =
                        (operand_number(&operands[4]), operand_number(&operands[5]))
                    {
                        line_x = e;
                        line_y = f;
                    }
                }
            }
            "Td" | "TD" => {
                if operands.len() == 2 {
                    if let (Some(tx), Some(ty)) =
                        (operand_number(&operands[0]), operand_number(&operands[1]))
                    {
                        if op.operator == "TD" {
                            leading = -ty;
                        }
                        line_x += tx;
                        line_y += ty;
                    }
                }
            }
            "TL" => {
                if let Some(l) = operands.first().and_then(operand_number) {
                    leading = l;
                }
            }
            "T*" => {
                line_y -= leading;
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push(line_x, line_y, decode_string(bytes));
                }
            }
            "'" => {
                line_y -= leading;
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push(line_x, line_y, decode_string(bytes));
                }
            }
            "\"" => {
                line_y -= leading;
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    push(line_x, line_y, decode_string(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = operands.first() {
                    let mut text = String::new();
                    for part in parts {
                        match part {
                            Object::String(bytes, _) => text.push_str(&decode_string(bytes)),
                            other => {
                                if let Some(adj) = operand_number(other) {
                                    if adj <= WORD_GAP_THRESHOLD {
                                        text.push(' ');
                                    }
                                }
                            }
                        }
                    }
                    push(line_x, line_y, text);
                }
            }
            _ => {}
        }
    }

    words
}

/// Group words into visual rows by rounded y, top of page first, words
/// left to right within a row.
pub fn group_rows(words: Vec<Word>) -> Vec<Vec<Word>> {
    let mut rows: BTreeMap<i64, Vec<Word>> = BTreeMap::new();
    for word in words {
        rows.entry(word.y.round() as i64).or_default().push(word);
    }
    rows.into_iter()
        .rev()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            row
        })
        .collect()
}
