use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::{classify, ParagraphKind};
use crate::docx;
use crate::error::{Error, Result};
use crate::html::{render_document, HtmlBuilder, DEFAULT_TITLE};
use crate::list_state::ListContext;
use crate::model::Paragraph;
use crate::runs::format_runs;

pub const DEFAULT_OUTPUT: &str = "index_lists.html";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub title: String,
    /// Use numbering definitions when a list style name has no format keyword.
    pub resolve_numbering: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            title: DEFAULT_TITLE.to_string(),
            resolve_numbering: false,
        }
    }
}

/// Body markup lines for a paragraph sequence. Every opened list is closed.
pub fn convert_paragraphs(paragraphs: &[Paragraph], options: &ConvertOptions) -> Result<Vec<String>> {
    let mut html = HtmlBuilder::new();
    let mut lists = ListContext::new();

    for paragraph in paragraphs {
        let kind = classify(paragraph, options)?;
        debug!(style = %paragraph.style_name, ?kind, "classified paragraph");
        match kind {
            ParagraphKind::Heading(level) => {
                lists.close(&mut html);
                html.heading(level, &paragraph.text());
            }
            ParagraphKind::ListItem(style) => {
                lists.open_item(style, &mut html);
                html.list_item(&format_runs(&paragraph.runs));
            }
            ParagraphKind::Plain => {
                lists.close(&mut html);
                let markup = format_runs(&paragraph.runs);
                if !markup.trim().is_empty() {
                    html.paragraph(&markup);
                }
            }
        }
    }
    lists.finish(&mut html);

    Ok(html.into_lines())
}

pub fn render_html(paragraphs: &[Paragraph], options: &ConvertOptions) -> Result<String> {
    let body = convert_paragraphs(paragraphs, options)?;
    Ok(render_document(&body, &options.title))
}

/// Convert `source` and write the page to `destination` (default `index_lists.html`).
pub fn convert_docx_to_html(source: impl AsRef<Path>, destination: Option<&Path>) -> Result<PathBuf> {
    let destination = destination.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT));
    convert_docx_to_html_with(source, destination, &ConvertOptions::default())
}

pub fn convert_docx_to_html_with(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let paragraphs = docx::read_paragraphs(source)?;
    let page = render_html(&paragraphs, options)?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(destination, page.as_bytes()).map_err(|e| Error::io(destination, e))?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        paragraphs = paragraphs.len(),
        bytes = page.len(),
        "converted document"
    );
    Ok(destination.to_path_buf())
}
