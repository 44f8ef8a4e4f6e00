use logos::Span;
use thiserror::Error;

use crate::Token;

/// The three classes of failure a field tag can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tag text is syntactically broken.
    MalformedTag,
    /// A `key:value` directive uses a key outside the known keyword set.
    UnknownDirective,
    /// A length or offset is neither an integer literal nor the name of an
    /// integer field on the instance.
    UnresolvableReference,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[rustfmt::skip]
pub enum Error {
    #[error("Unbalanced brackets")]
    UnbalancedBrackets(Span),
    #[error("Unexpected token {0:?}")]
    UnexpectedToken(Box<Token>, Span),
    #[error("Unrecognized token")]
    UnrecognizedToken(Span),
    #[error("Missing value for directive '{0}'")]
    MissingValue(String, Span),
    #[error("Missing directive key")]
    MissingKey(Span),
    #[error("Element tags nested deeper than {0} levels")]
    NestingTooDeep(usize, Span),
    #[error("Ignore marker must come first, found at position {0}")]
    MisplacedIgnore(usize),
    #[error("Unknown directive '{0}'")]
    UnknownDirective(String, Span),
    #[error("Unresolvable reference '{0}': no such field")]
    UnresolvableReference(String),
    #[error("Field '{0}' is not an integer")]
    NonIntegerField(String),
    #[error("Value {1} of field '{0}' does not fit in a signed 64-bit integer")]
    ReferenceOutOfRange(String, u64),
}

impl Error {
    #[rustfmt::skip]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownDirective(_, _) => ErrorKind::UnknownDirective,
            Error::UnresolvableReference(_)
            | Error::NonIntegerField(_)
            | Error::ReferenceOutOfRange(_, _) => ErrorKind::UnresolvableReference,
            Error::UnbalancedBrackets(_)
            | Error::UnexpectedToken(_, _)
            | Error::UnrecognizedToken(_)
            | Error::MissingValue(_, _)
            | Error::MissingKey(_)
            | Error::NestingTooDeep(_, _)
            | Error::MisplacedIgnore(_) => ErrorKind::MalformedTag,
        }
    }

    /// The location of the error in the tag source, for errors raised
    /// while tokenizing.
    #[rustfmt::skip]
    pub fn span(&self) -> Option<&Span> {
        match self {
            Error::UnbalancedBrackets(range) => Some(range),
            Error::UnexpectedToken(_, range) => Some(range),
            Error::UnrecognizedToken(range) => Some(range),
            Error::MissingValue(_, range) => Some(range),
            Error::MissingKey(range) => Some(range),
            Error::NestingTooDeep(_, range) => Some(range),
            Error::UnknownDirective(_, range) => Some(range),
            Error::MisplacedIgnore(_)
            | Error::UnresolvableReference(_)
            | Error::NonIntegerField(_)
            | Error::ReferenceOutOfRange(_, _) => None,
        }
    }

    fn format_message(
        message: &dyn ToString,
        source: &str,
        range: &Span,
    ) -> String {
        let message = message.to_string();
        // Walk through the bytes up to `start` to find line number and line
        // start offset
        let mut line_number = 1;
        let mut line_start = 0;
        for (idx, ch) in source.char_indices() {
            if idx >= range.start {
                break;
            }
            if ch == '\n' {
                line_number += 1;
                line_start = idx + 1;
            }
        }
        let line = source.lines().nth(line_number - 1).unwrap_or("");
        let column = range.start.saturating_sub(line_start);
        let underline_len = range.end.saturating_sub(range.start).max(1);
        let caret = " ".repeat(column) + &"^".repeat(underline_len);
        format!("line {line_number}: {message}\n{line}\n{caret}")
    }

    /// Renders the error with the offending source line and a caret
    /// underline. Errors without a location render as the bare message.
    pub fn full_message(&self, source: &str) -> String {
        match self.span() {
            Some(range) => Self::format_message(self, source, range),
            None => self.to_string(),
        }
    }
}

impl Default for Error {
    fn default() -> Self { Error::UnrecognizedToken(Span::default()) }
}

pub type Result<T> = std::result::Result<T, Error>;
