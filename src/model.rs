// Paragraph descriptors handed from the document reader to the converter.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Run::default()
        }
    }
}

/// Direct numbering properties of a paragraph (`w:numPr`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingRef {
    pub num_id: String,
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style_name: String,
    pub numbering: Option<NumberingRef>,
    /// List style implied by the numbering definitions, when the reader could resolve one.
    pub numbering_hint: Option<ListStyle>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style_name: impl Into<String>, runs: Vec<Run>) -> Self {
        Paragraph {
            style_name: style_name.into(),
            runs,
            ..Paragraph::default()
        }
    }

    pub fn has_numbering_marker(&self) -> bool {
        self.numbering.is_some()
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTag {
    Ordered,
    Unordered,
}

impl ListTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ListTag::Ordered => "ol",
            ListTag::Unordered => "ul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingFormat {
    RomanUpper,
    AlphaUpper,
    Decimal,
    RomanLower,
    AlphaLower,
}

impl NumberingFormat {
    pub const ALL: [NumberingFormat; 5] = [
        NumberingFormat::RomanUpper,
        NumberingFormat::AlphaUpper,
        NumberingFormat::Decimal,
        NumberingFormat::RomanLower,
        NumberingFormat::AlphaLower,
    ];

    /// Value of the `type` attribute on `<ol>`.
    pub fn type_attr(self) -> &'static str {
        match self {
            NumberingFormat::RomanUpper => "I",
            NumberingFormat::AlphaUpper => "A",
            NumberingFormat::Decimal => "1",
            NumberingFormat::RomanLower => "i",
            NumberingFormat::AlphaLower => "a",
        }
    }

    pub fn css_list_style(self) -> &'static str {
        match self {
            NumberingFormat::RomanUpper => "upper-roman",
            NumberingFormat::AlphaUpper => "upper-alpha",
            NumberingFormat::Decimal => "decimal",
            NumberingFormat::RomanLower => "lower-roman",
            NumberingFormat::AlphaLower => "lower-alpha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    pub tag: ListTag,
    pub format: Option<NumberingFormat>,
}

impl ListStyle {
    pub const BULLET: ListStyle = ListStyle {
        tag: ListTag::Unordered,
        format: None,
    };

    pub fn ordered(format: NumberingFormat) -> Self {
        ListStyle {
            tag: ListTag::Ordered,
            format: Some(format),
        }
    }

    pub fn open_tag(&self) -> String {
        match self.format {
            Some(format) => format!("<{} type=\"{}\">", self.tag.as_str(), format.type_attr()),
            None => format!("<{}>", self.tag.as_str()),
        }
    }

    pub fn close_tag(&self) -> String {
        format!("</{}>", self.tag.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_text_joins_runs() {
        let p = Paragraph::new("Normal", vec![Run::plain("Hello, "), Run::plain("world")]);
        assert_eq!(p.text(), "Hello, world");
        assert!(!p.has_numbering_marker());
    }

    #[test]
    fn list_tags() {
        assert_eq!(
            ListStyle::ordered(NumberingFormat::RomanUpper).open_tag(),
            "<ol type=\"I\">"
        );
        assert_eq!(ListStyle::BULLET.open_tag(), "<ul>");
        assert_eq!(ListStyle::BULLET.close_tag(), "</ul>");
    }
}
