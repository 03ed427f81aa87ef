// Reads the paragraph sequence out of a .docx package.
//
// A .docx file is a ZIP archive of WordprocessingML parts. Only the three parts that
// matter for paragraph classification are read: the document body, the style table
// (style id -> display name) and the numbering definitions.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{ListStyle, NumberingFormat, NumberingRef, Paragraph, Run};

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const NUMBERING_PART: &str = "word/numbering.xml";

const DEFAULT_STYLE_NAME: &str = "Normal";

type XmlResult<T> = std::result::Result<T, quick_xml::Error>;

pub fn read_paragraphs(path: &Path) -> Result<Vec<Paragraph>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => parse_styles(&xml).map_err(|source| Error::Xml {
            part: STYLES_PART,
            source,
        })?,
        None => StyleMap::default(),
    };
    let numbering = match read_part(&mut archive, NUMBERING_PART)? {
        Some(xml) => parse_numbering(&xml).map_err(|source| Error::Xml {
            part: NUMBERING_PART,
            source,
        })?,
        None => NumberingMap::default(),
    };
    let document = read_part(&mut archive, DOCUMENT_PART)?.ok_or(Error::MissingPart(DOCUMENT_PART))?;

    let paragraphs = parse_document(&document, &styles, &numbering).map_err(|source| Error::Xml {
        part: DOCUMENT_PART,
        source,
    })?;
    debug!(
        path = %path.display(),
        paragraphs = paragraphs.len(),
        styles = styles.names.len(),
        "read document"
    );
    Ok(paragraphs)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &'static str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| Error::io(name, e))?;
    Ok(Some(xml))
}

fn attr(e: &BytesStart<'_>, key: &str) -> XmlResult<Option<String>> {
    match e.try_get_attribute(key)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// On/off run property. A bare `<w:b/>` is on.
fn toggle(e: &BytesStart<'_>) -> XmlResult<bool> {
    Ok(match attr(e, "w:val")? {
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off"),
        None => true,
    })
}

fn underline(e: &BytesStart<'_>) -> XmlResult<bool> {
    Ok(match attr(e, "w:val")? {
        Some(v) => !matches!(v.as_str(), "none" | "0" | "false" | "off"),
        None => true,
    })
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StyleMap {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleMap {
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .or(self.default_paragraph.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_STYLE_NAME.to_string())
    }
}

/// Built-in styles are stored under lowercase names; Word shows them capitalised.
fn ui_style_name(name: &str) -> String {
    match name {
        "caption" => "Caption".to_string(),
        "header" => "Header".to_string(),
        "footer" => "Footer".to_string(),
        _ => match name.strip_prefix("heading ") {
            Some(level) => format!("Heading {level}"),
            None => name.to_string(),
        },
    }
}

pub fn parse_styles(xml: &str) -> XmlResult<StyleMap> {
    let mut reader = Reader::from_str(xml);
    let mut map = StyleMap::default();
    // (style id, is default) of the paragraph style being read
    let mut current: Option<(String, bool)> = None;
    let mut name: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"w:style" => {
                    let kind = attr(&e, "w:type")?;
                    if kind.as_deref().unwrap_or("paragraph") == "paragraph" {
                        let id = attr(&e, "w:styleId")?.unwrap_or_default();
                        let is_default = matches!(attr(&e, "w:default")?.as_deref(), Some("1" | "true" | "on"));
                        current = Some((id, is_default));
                        name = None;
                    }
                }
                b"w:name" if current.is_some() => {
                    name = attr(&e, "w:val")?.map(|n| ui_style_name(&n));
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:style" => {
                if let Some((id, is_default)) = current.take() {
                    let display = name.take().unwrap_or_else(|| id.clone());
                    if is_default {
                        map.default_paragraph = Some(display.clone());
                    }
                    map.names.insert(id, display);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Numbering
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct NumberingMap {
    /// numId -> abstractNumId
    nums: HashMap<String, String>,
    /// (abstractNumId, ilvl) -> numFmt
    formats: HashMap<(String, u8), String>,
}

impl NumberingMap {
    pub fn list_style(&self, numbering: &NumberingRef) -> Option<ListStyle> {
        let abstract_id = self.nums.get(&numbering.num_id)?;
        let format = self.formats.get(&(abstract_id.clone(), numbering.level))?;
        match format.as_str() {
            "upperRoman" => Some(ListStyle::ordered(NumberingFormat::RomanUpper)),
            "upperLetter" => Some(ListStyle::ordered(NumberingFormat::AlphaUpper)),
            "decimal" => Some(ListStyle::ordered(NumberingFormat::Decimal)),
            "lowerRoman" => Some(ListStyle::ordered(NumberingFormat::RomanLower)),
            "lowerLetter" => Some(ListStyle::ordered(NumberingFormat::AlphaLower)),
            "bullet" => Some(ListStyle::BULLET),
            _ => None,
        }
    }
}

fn parse_level(value: Option<String>) -> u8 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

// Level overrides inside <w:num> are not followed.
pub fn parse_numbering(xml: &str) -> XmlResult<NumberingMap> {
    let mut reader = Reader::from_str(xml);
    let mut map = NumberingMap::default();
    let mut abstract_id: Option<String> = None;
    let mut level: Option<u8> = None;
    let mut num_id: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"w:abstractNum" => abstract_id = attr(&e, "w:abstractNumId")?,
                b"w:lvl" if abstract_id.is_some() => level = Some(parse_level(attr(&e, "w:ilvl")?)),
                b"w:numFmt" => {
                    if let (Some(id), Some(lvl), Some(fmt)) = (&abstract_id, level, attr(&e, "w:val")?) {
                        map.formats.insert((id.clone(), lvl), fmt);
                    }
                }
                b"w:num" => num_id = attr(&e, "w:numId")?,
                b"w:abstractNumId" => {
                    if let (Some(id), Some(target)) = (&num_id, attr(&e, "w:val")?) {
                        map.nums.insert(id.clone(), target);
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:abstractNum" => abstract_id = None,
                b"w:lvl" => level = None,
                b"w:num" => num_id = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Document body
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct PendingParagraph {
    style_id: Option<String>,
    has_numbering: bool,
    num_id: Option<String>,
    level: u8,
    runs: Vec<Run>,
}

struct BodyReader<'a> {
    styles: &'a StyleMap,
    numbering: &'a NumberingMap,
    paragraphs: Vec<Paragraph>,
    table_depth: usize,
    paragraph_depth: usize,
    current: Option<PendingParagraph>,
    run: Option<Run>,
    in_paragraph_props: bool,
    in_run_props: bool,
    in_text: bool,
    /// Depth inside `w:pPrChange`/`w:rPrChange`, which hold pre-revision formatting.
    change_depth: usize,
}

impl<'a> BodyReader<'a> {
    fn new(styles: &'a StyleMap, numbering: &'a NumberingMap) -> Self {
        BodyReader {
            styles,
            numbering,
            paragraphs: Vec::new(),
            table_depth: 0,
            paragraph_depth: 0,
            current: None,
            run: None,
            in_paragraph_props: false,
            in_run_props: false,
            in_text: false,
            change_depth: 0,
        }
    }

    fn at_body_level(&self) -> bool {
        self.table_depth == 0 && self.paragraph_depth == 0
    }

    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> XmlResult<()> {
        match e.name().as_ref() {
            b"w:tbl" if !empty => {
                self.table_depth += 1;
                return Ok(());
            }
            b"w:p" => {
                if empty {
                    if self.at_body_level() {
                        self.current = Some(PendingParagraph::default());
                        self.finish_paragraph();
                    }
                } else {
                    if self.at_body_level() {
                        self.current = Some(PendingParagraph::default());
                    }
                    self.paragraph_depth += 1;
                }
                return Ok(());
            }
            _ => {}
        }

        if self.paragraph_depth != 1 {
            return Ok(());
        }
        match e.name().as_ref() {
            b"w:pPrChange" | b"w:rPrChange" => {
                if !empty {
                    self.change_depth += 1;
                }
                return Ok(());
            }
            _ if self.change_depth > 0 => return Ok(()),
            _ => {}
        }

        let Some(paragraph) = self.current.as_mut() else {
            return Ok(());
        };

        match e.name().as_ref() {
            b"w:pPr" => self.in_paragraph_props = !empty,
            b"w:pStyle" if self.in_paragraph_props => paragraph.style_id = attr(e, "w:val")?,
            b"w:numPr" if self.in_paragraph_props => paragraph.has_numbering = true,
            b"w:numId" if self.in_paragraph_props => paragraph.num_id = attr(e, "w:val")?,
            b"w:ilvl" if self.in_paragraph_props => paragraph.level = parse_level(attr(e, "w:val")?),
            b"w:r" if !empty => self.run = Some(Run::default()),
            _ => {
                let Some(run) = self.run.as_mut() else {
                    return Ok(());
                };
                match e.name().as_ref() {
                    b"w:rPr" => self.in_run_props = !empty,
                    b"w:b" if self.in_run_props => run.bold = toggle(e)?,
                    b"w:i" if self.in_run_props => run.italic = toggle(e)?,
                    b"w:u" if self.in_run_props => run.underline = underline(e)?,
                    b"w:t" => self.in_text = !empty,
                    b"w:tab" if !self.in_run_props => run.text.push('\t'),
                    b"w:br" => {
                        if matches!(attr(e, "w:type")?.as_deref(), None | Some("textWrapping")) {
                            run.text.push('\n');
                        }
                    }
                    b"w:cr" => run.text.push('\n'),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"w:p" => {
                if self.paragraph_depth == 1 {
                    self.finish_paragraph();
                }
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
            }
            _ if self.paragraph_depth != 1 => {}
            b"w:pPrChange" | b"w:rPrChange" => self.change_depth = self.change_depth.saturating_sub(1),
            _ if self.change_depth > 0 => {}
            b"w:pPr" => self.in_paragraph_props = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:t" => self.in_text = false,
            b"w:r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.current.as_mut()) {
                    paragraph.runs.push(run);
                }
                self.in_run_props = false;
                self.in_text = false;
                self.change_depth = 0;
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text && self.paragraph_depth == 1 {
            if let Some(run) = self.run.as_mut() {
                run.text.push_str(text);
            }
        }
    }

    fn finish_paragraph(&mut self) {
        self.run = None;
        self.in_paragraph_props = false;
        self.in_run_props = false;
        self.in_text = false;
        self.change_depth = 0;

        let Some(pending) = self.current.take() else {
            return;
        };
        let numbering = pending.has_numbering.then(|| NumberingRef {
            num_id: pending.num_id.unwrap_or_default(),
            level: pending.level,
        });
        let numbering_hint = numbering
            .as_ref()
            .and_then(|n| self.numbering.list_style(n));
        self.paragraphs.push(Paragraph {
            style_name: self.styles.resolve(pending.style_id.as_deref()),
            numbering,
            numbering_hint,
            runs: pending.runs,
        });
    }
}

/// Top-level body paragraphs of `word/document.xml`. Table and text-box paragraphs are skipped.
pub fn parse_document(xml: &str, styles: &StyleMap, numbering: &NumberingMap) -> XmlResult<Vec<Paragraph>> {
    let mut reader = Reader::from_str(xml);
    let mut body = BodyReader::new(styles, numbering);

    loop {
        match reader.read_event()? {
            Event::Start(e) => body.start(&e, false)?,
            Event::Empty(e) => body.start(&e, true)?,
            Event::End(e) => body.end(e.name().as_ref()),
            Event::Text(t) => {
                let text = t.unescape()?;
                body.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(body.paragraphs)
}
