use tracing::warn;

use crate::convert::ConvertOptions;
use crate::error::{Error, Result};
use crate::model::{ListStyle, NumberingFormat, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Heading(u8),
    ListItem(ListStyle),
    Plain,
}

const HEADING_PREFIX: &str = "Heading";
const MAX_HEADING_LEVEL: u8 = 6;

pub fn classify(paragraph: &Paragraph, options: &ConvertOptions) -> Result<ParagraphKind> {
    if paragraph.style_name.starts_with(HEADING_PREFIX) {
        return heading_level(&paragraph.style_name).map(ParagraphKind::Heading);
    }

    if is_list_paragraph(paragraph) {
        let style = if options.resolve_numbering {
            list_style_resolved(paragraph)
        } else {
            list_style(paragraph)
        };
        match style {
            Some(style) => return Ok(ParagraphKind::ListItem(style)),
            None => warn!(
                style = %paragraph.style_name,
                "list paragraph has no recognisable list style, treating as plain"
            ),
        }
    }

    Ok(ParagraphKind::Plain)
}

/// Level from the trailing number of a heading style name, clamped to 1..=6.
pub fn heading_level(style_name: &str) -> Result<u8> {
    let digits = style_name
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(Error::HeadingLevel {
            style: style_name.to_string(),
        });
    }
    let number = &style_name[style_name.len() - digits..];
    // Overlong digit runs saturate to the maximum level.
    let level = number.parse::<u64>().unwrap_or(u64::MAX);
    Ok(level.clamp(1, MAX_HEADING_LEVEL as u64) as u8)
}

pub fn is_list_paragraph(paragraph: &Paragraph) -> bool {
    paragraph.style_name.to_lowercase().starts_with("list") || paragraph.has_numbering_marker()
}

/// Infer list tag and numbering format from the style name.
///
/// Keywords are checked in order: `roman`, `alpha`, `number`, `bullet`. "lowerroman" and
/// "loweralpha" contain `roman`/`alpha`, so lower-case formats never come out of a style
/// name; they are only reachable through resolved numbering definitions.
pub fn list_style(paragraph: &Paragraph) -> Option<ListStyle> {
    keyword_style(&paragraph.style_name).or_else(|| numbering_fallback(paragraph))
}

/// Like [`list_style`], but consults the numbering definitions before the decimal fallback.
pub fn list_style_resolved(paragraph: &Paragraph) -> Option<ListStyle> {
    keyword_style(&paragraph.style_name)
        .or(paragraph.numbering_hint)
        .or_else(|| numbering_fallback(paragraph))
}

fn keyword_style(style_name: &str) -> Option<ListStyle> {
    let style = style_name.to_lowercase();
    if style.contains("roman") {
        Some(ListStyle::ordered(NumberingFormat::RomanUpper))
    } else if style.contains("alpha") {
        Some(ListStyle::ordered(NumberingFormat::AlphaUpper))
    } else if style.contains("number") {
        Some(ListStyle::ordered(NumberingFormat::Decimal))
    } else if style.contains("bullet") {
        Some(ListStyle::BULLET)
    } else {
        None
    }
}

fn numbering_fallback(paragraph: &Paragraph) -> Option<ListStyle> {
    paragraph
        .has_numbering_marker()
        .then(|| ListStyle::ordered(NumberingFormat::Decimal))
}
