use logos::Logos;

use crate::error::Error;

#[derive(Debug, Clone, Logos, PartialEq)]
#[rustfmt::skip]
#[logos(error = Error)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// Directive key, literal value, field name, function name or the
    /// ignore marker `-`.
    #[regex(r"[^,:\[\]\s]+", |lex| lex.slice().to_owned())]
    Word(String),
}
