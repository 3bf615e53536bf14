pub mod document;
pub mod layout;
pub mod metrics;
pub mod tables;

pub use document::{collapse_whitespace, PdfDocument};
pub use layout::{collect_words, group_rows, Word};
