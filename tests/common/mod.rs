#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn styles_xml() -> String {
    let styles = [
        ("Normal", "Normal"),
        ("Heading1", "heading 1"),
        ("Heading2", "heading 2"),
        ("HeadingBare", "Heading"),
        ("ListBullet", "List Bullet"),
        ("ListNumber", "List Number"),
        ("ListRoman", "List Roman"),
        ("ListParagraph", "List Paragraph"),
    ];
    let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="{NS_W}">"#);
    for (id, name) in styles {
        let default = if id == "Normal" { r#" w:default="1""# } else { "" };
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph"{default} w:styleId="{id}"><w:name w:val="{name}"/></w:style>"#
        ));
    }
    xml.push_str("</w:styles>");
    xml
}

fn numbering_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{NS_W}">
  <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="lowerRoman"/></w:lvl></w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#
    )
}

/// Builds `word/document.xml` paragraph by paragraph.
#[derive(Default)]
pub struct DocBuilder {
    body: String,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn para(mut self, style: Option<&str>, runs: &[(&str, &str)]) -> Self {
        self.push_paragraph(style, false, runs);
        self
    }

    /// Paragraph with direct numbering properties pointing at numId 1.
    pub fn numbered(mut self, style: Option<&str>, runs: &[(&str, &str)]) -> Self {
        self.push_paragraph(style, true, runs);
        self
    }

    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    fn push_paragraph(&mut self, style: Option<&str>, numbered: bool, runs: &[(&str, &str)]) {
        self.body.push_str("<w:p>");
        if style.is_some() || numbered {
            self.body.push_str("<w:pPr>");
            if let Some(style) = style {
                self.body.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
            }
            if numbered {
                self.body.push_str(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#);
            }
            self.body.push_str("</w:pPr>");
        }
        // Each run is (run properties, text); text is inserted verbatim.
        for (props, text) in runs {
            self.body.push_str("<w:r>");
            if !props.is_empty() {
                self.body.push_str(&format!("<w:rPr>{props}</w:rPr>"));
            }
            self.body.push_str(&format!(r#"<w:t xml:space="preserve">{text}</w:t></w:r>"#));
        }
        self.body.push_str("</w:p>");
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{NS_W}"><w:body>{}</w:body></w:document>"#,
            self.body
        )
    }

    pub fn write(&self, path: &Path) {
        write_package(path, Some(self.document_xml().as_str()), true);
    }
}

/// Writes a minimal package. `document_xml: None` leaves the main part out.
pub fn write_package(path: &Path, document_xml: Option<&str>, with_styles: bool) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt).unwrap();
    zip.write_all(content_types_xml().as_bytes()).unwrap();

    zip.start_file("_rels/.rels", opt).unwrap();
    zip.write_all(rels_xml().as_bytes()).unwrap();

    if let Some(xml) = document_xml {
        zip.start_file("word/document.xml", opt).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
    }

    if with_styles {
        zip.start_file("word/styles.xml", opt).unwrap();
        zip.write_all(styles_xml().as_bytes()).unwrap();

        zip.start_file("word/numbering.xml", opt).unwrap();
        zip.write_all(numbering_xml().as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}

pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

pub fn find_elements(node: &Handle, tag: &str, out: &mut Vec<Handle>) {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local.to_string().eq_ignore_ascii_case(tag) {
            out.push(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        find_elements(child, tag, out);
    }
}

pub fn elements(dom: &RcDom, tag: &str) -> Vec<Handle> {
    let mut out = Vec::new();
    find_elements(&dom.document, tag, &mut out);
    out
}

pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    if let NodeData::Text { contents } = &node.data {
        text.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        text.push_str(&text_content(child));
    }
    text
}

pub fn element_children(node: &Handle) -> Vec<String> {
    node.children
        .borrow()
        .iter()
        .filter_map(|c| match &c.data {
            NodeData::Element { name, .. } => Some(name.local.to_string()),
            _ => None,
        })
        .collect()
}

pub fn attribute(node: &Handle, key: &str) -> Option<String> {
    if let NodeData::Element { attrs, .. } = &node.data {
        for attr in attrs.borrow().iter() {
            if attr.name.local.to_string().eq_ignore_ascii_case(key) {
                return Some(attr.value.to_string());
            }
        }
    }
    None
}
