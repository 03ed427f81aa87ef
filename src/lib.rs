//! Convert word-processing documents (.docx) to a single HTML page.
//!
//! Paragraphs are classified as headings, list items or plain paragraphs from their
//! style names. Consecutive list items with the same list style share one `<ol>`/`<ul>`.
//! Bold, italic and underline runs become `strong`, `em` and `u`.

pub mod classify;
pub mod convert;
pub mod docx;
pub mod error;
pub mod html;
pub mod list_state;
pub mod model;
pub mod runs;

pub use convert::{
    convert_docx_to_html, convert_docx_to_html_with, convert_paragraphs, render_html, ConvertOptions,
    DEFAULT_OUTPUT,
};
pub use error::{Error, Result};
pub use model::{ListStyle, ListTag, NumberingFormat, NumberingRef, Paragraph, Run};
