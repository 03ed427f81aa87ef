use crate::model::Run;

/// Escape and wrap each run, then concatenate in document order.
pub fn format_runs(runs: &[Run]) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&format_run(run));
    }
    out
}

pub fn format_run(run: &Run) -> String {
    let mut text = escape_text(&run.text);
    if run.bold {
        text = format!("<strong>{text}</strong>");
    }
    if run.italic {
        text = format!("<em>{text}</em>");
    }
    if run.underline {
        text = format!("<u>{text}</u>");
    }
    text
}

/// Escapes `& < > " '`.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}
