use crate::model::NumberingFormat;
use crate::runs::escape_text;

pub const DEFAULT_TITLE: &str = "Writing Science Fiction and Fantasy";

const BASE_STYLES: [&str; 3] = [
    "body { font-family: Arial, sans-serif; line-height: 1.6; margin: 40px; }",
    "h1, h2, h3 { color: #333; }",
    "p { margin-bottom: 1em; }",
];

/// Body markup, one element per line.
#[derive(Debug, Default, Clone)]
pub struct HtmlBuilder {
    lines: Vec<String>,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn heading(&mut self, level: u8, text: &str) {
        self.push(format!("<h{level}>{}</h{level}>", escape_text(text)));
    }

    pub fn list_item(&mut self, markup: &str) {
        self.push(format!("<li>{markup}</li>"));
    }

    pub fn paragraph(&mut self, markup: &str) {
        self.push(format!("<p>{markup}</p>"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

pub fn style_rules() -> Vec<String> {
    let mut rules: Vec<String> = BASE_STYLES.iter().map(|r| r.to_string()).collect();
    for format in NumberingFormat::ALL {
        rules.push(format!(
            "ol[type=\"{}\"] {{ list-style-type: {}; }}",
            format.type_attr(),
            format.css_list_style()
        ));
    }
    rules
}

/// Wrap body lines in the fixed document boilerplate.
pub fn render_document<S: AsRef<str>>(body: &[S], title: &str) -> String {
    let mut lines: Vec<String> = vec![
        "<!DOCTYPE html>".into(),
        "<html>".into(),
        "<head>".into(),
        "<meta charset=\"utf-8\">".into(),
        format!("<title>{}</title>", escape_text(title)),
        "<style>".into(),
    ];
    lines.extend(style_rules());
    lines.extend(
        ["</style>", "</head>", "<body>"]
            .iter()
            .map(|s| s.to_string()),
    );
    lines.extend(body.iter().map(|l| l.as_ref().to_string()));
    lines.push("</body>".into());
    lines.push("</html>".into());
    lines.join("\n")
}
