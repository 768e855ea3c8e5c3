//! Error types for the markup parser

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty markup")]
    Empty,

    #[error("Malformed markup at {pos}: {message}")]
    Xml { pos: usize, message: String },

    #[error("Invalid attribute at {pos}: {message}")]
    Attribute { pos: usize, message: String },
}

impl ParseError {
    pub fn xml(pos: usize, message: impl Into<String>) -> Self {
        Self::Xml {
            pos,
            message: message.into(),
        }
    }

    pub fn attribute(pos: usize, message: impl Into<String>) -> Self {
        Self::Attribute {
            pos,
            message: message.into(),
        }
    }

    /// Byte offset in the source the error points at, if any
    pub fn pos(&self) -> Option<usize> {
        match self {
            ParseError::Empty => None,
            ParseError::Xml { pos, .. } | ParseError::Attribute { pos, .. } => Some(*pos),
        }
    }
}

/// Pretty-print a parse error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    if source.is_empty() {
        return error.to_string();
    }

    let start = error
        .pos()
        .unwrap_or(0)
        .min(source.len().saturating_sub(1));
    let end = (start + 1).min(source.len()).max(start);

    let label_message = match error {
        ParseError::Empty => "nothing to parse".to_string(),
        ParseError::Xml { message, .. } | ParseError::Attribute { message, .. } => {
            message.clone()
        }
    };

    let report = Report::build(ReportKind::Error, filename, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(label_message),
        )
        .finish();

    let mut output = Vec::new();
    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

#[cfg(all(test, feature = "pretty-errors"))]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_mentions_message() {
        let source = "<svg><path d=\"M0\"</svg>";
        let error = ParseError::xml(12, "unclosed attribute");
        let report = format_error(source, "icon.svg", &error);
        assert!(report.contains("unclosed attribute"));
    }

    #[test]
    fn test_format_error_on_empty_source() {
        let report = format_error("", "icon.svg", &ParseError::Empty);
        assert!(report.contains("Empty markup"));
    }
}
