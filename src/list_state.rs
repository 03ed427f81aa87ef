use tracing::debug;

use crate::html::HtmlBuilder;
use crate::model::ListStyle;

/// The list currently open in the output, if any.
#[derive(Debug, Default)]
pub struct ListContext {
    current: Option<ListStyle>,
}

impl ListContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ListStyle> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Make sure a list of `style` is open before an item is written.
    pub fn open_item(&mut self, style: ListStyle, html: &mut HtmlBuilder) {
        if self.current == Some(style) {
            return;
        }
        self.close(html);
        debug!(tag = style.tag.as_str(), "opening list");
        html.push(style.open_tag());
        self.current = Some(style);
    }

    pub fn close(&mut self, html: &mut HtmlBuilder) {
        if let Some(style) = self.current.take() {
            debug!(tag = style.tag.as_str(), "closing list");
            html.push(style.close_tag());
        }
    }

    pub fn finish(mut self, html: &mut HtmlBuilder) {
        self.close(html);
    }
}
