//! Error types for decoding element trees

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Decode error at line {line}, column {column}: {message}")]
    Decode {
        span: Span,
        line: usize,
        column: usize,
        message: String,
    },
}

impl InputError {
    /// Wrap a JSON decoding error, locating it in `source`
    pub fn from_json(err: &serde_json::Error, source: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let start = byte_offset(source, line, column);
        let end = (start + 1).min(source.len()).max(start);
        InputError::Decode {
            span: start..end,
            line,
            column,
            message: strip_position(&err.to_string()),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            InputError::Decode { span, message, .. } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("invalid element tree")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Byte offset of a 1-based line and column; column 0 means line start
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within: usize = text
                .chars()
                .take(column.saturating_sub(1))
                .map(char::len_utf8)
                .sum();
            return offset + within;
        }
        offset += text.len();
    }
    source.len()
}

/// serde_json appends " at line L column C"; the report shows it already
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}
