use pagekit_common::DiagnosticCode;
use pagekit_parser::ParseError;
use thiserror::Error;

/// Reasons icon markup is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SanitizeError {
    #[error("Icon markup is empty")]
    Empty,

    #[error("Icon markup must start with an <svg> tag")]
    MissingRootTag,

    #[error("Icon markup contains no <svg> element")]
    NoRootElement,

    #[error("Icon markup could not be parsed: {0}")]
    Parse(#[from] ParseError),
}

impl SanitizeError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            SanitizeError::Empty => DiagnosticCode::SvgEmpty,
            SanitizeError::MissingRootTag => DiagnosticCode::SvgMissingRootTag,
            SanitizeError::NoRootElement => DiagnosticCode::SvgNoRootElement,
            SanitizeError::Parse(ParseError::Empty) => DiagnosticCode::SvgEmpty,
            SanitizeError::Parse(_) => DiagnosticCode::SvgParseFailed,
        }
    }
}

pub type SanitizeResult<T> = Result<T, SanitizeError>;
