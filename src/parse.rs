use logos::{ Lexer, Logos, Span };

use crate::{ Error, ParseOptions, Result, Tag, TagKind, Token, tag::IGNORE_MARKER };

/// Parses a field annotation string into its ordered list of tags.
///
/// The input is a comma-separated list of directives. A directive wrapped in
/// square brackets is an element descriptor whose contents are parsed
/// recursively, so commas inside brackets do not split the outer list.
///
/// Empty directives (from leading, trailing or doubled commas) are dropped.
/// The empty string parses to an empty list.
///
/// # Errors
///
/// Fails with an error of kind [`ErrorKind::MalformedTag`] when brackets
/// are unbalanced or a directive is not of the form `-`, `key:value`, `name`
/// or `[...]`, and with [`Error::UnknownDirective`] when a `key:value`
/// directive uses a key outside `len`, `offset`, `offsetStart`, `offsetEnd`
/// and `func`.
///
/// [`ErrorKind::MalformedTag`]: crate::ErrorKind::MalformedTag
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ parse_tag, Tag };
/// let tags = parse_tag("len:10,[len:2,func:Decode]").unwrap();
/// assert_eq!(tags, vec![
///     Tag::Length("10".into()),
///     Tag::Element(vec![Tag::Length("2".into()), Tag::Func("Decode".into())]),
/// ]);
/// ```
pub fn parse_tag(src: &str) -> Result<Vec<Tag>> {
    parse_tag_with(src, &ParseOptions::default())
}

/// Like [`parse_tag`], with explicit tokenizer options.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ parse_tag_with, ParseOptions, Error };
/// let options = ParseOptions::new().with_max_depth(1);
/// assert!(parse_tag_with("[len:1]", &options).is_ok());
/// assert!(matches!(
///     parse_tag_with("[[len:1]]", &options),
///     Err(Error::NestingTooDeep(1, _))
/// ));
/// ```
pub fn parse_tag_with(src: &str, options: &ParseOptions) -> Result<Vec<Tag>> {
    let mut lexer = Token::lexer(src);
    parse_list(&mut lexer, options, 0, None)
}

//
// === Private Functions ===
//

/// Progress through a single directive.
enum State {
    /// Nothing consumed since the last separator.
    Start,
    /// A bare word: the ignore marker or a function name, unless a colon
    /// follows.
    Word(String, Span),
    /// `key:` consumed, value pending.
    Key(String, Span),
    /// A full directive waiting for `,`, `]` or the end of input.
    Complete(Tag),
}

/// Parses directives until the end of input or, inside a bracket group,
/// until the closing bracket. `open` is the span of the opening bracket of
/// the group being parsed.
fn parse_list(
    lexer: &mut Lexer<'_, Token>,
    options: &ParseOptions,
    depth: usize,
    open: Option<Span>,
) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();
    let mut state = State::Start;

    loop {
        let token = match lexer.next() {
            Some(Ok(token)) => Some(token),
            Some(Err(_)) => return Err(Error::UnrecognizedToken(lexer.span())),
            None => None,
        };
        let span = lexer.span();

        state = match (state, token) {
            (state, None) => {
                finish(state, &mut tags)?;
                return match open {
                    Some(open) => Err(Error::UnbalancedBrackets(open)),
                    None => Ok(tags),
                };
            }
            (state, Some(Token::Comma)) => {
                finish(state, &mut tags)?;
                State::Start
            }
            (state, Some(Token::BracketClose)) => {
                finish(state, &mut tags)?;
                return match open {
                    Some(_) => Ok(tags),
                    None => Err(Error::UnbalancedBrackets(span)),
                };
            }
            (State::Start, Some(Token::Word(word))) => State::Word(word, span),
            (State::Start, Some(Token::BracketOpen)) => {
                if depth >= options.max_depth {
                    return Err(Error::NestingTooDeep(options.max_depth, span));
                }
                let inner = parse_list(lexer, options, depth + 1, Some(span))?;
                State::Complete(Tag::Element(inner))
            }
            (State::Start, Some(Token::Colon)) => {
                return Err(Error::MissingKey(span));
            }
            (State::Word(key, key_span), Some(Token::Colon)) => {
                State::Key(key, key_span)
            }
            (State::Key(key, key_span), Some(Token::Word(value))) => {
                State::Complete(directive(key, key_span, value)?)
            }
            (_, Some(token)) => {
                return Err(Error::UnexpectedToken(Box::new(token), span));
            }
        };
    }
}

/// Closes the directive in progress, appending its tag if there is one.
fn finish(state: State, tags: &mut Vec<Tag>) -> Result<()> {
    let tag = match state {
        State::Start => return Ok(()),
        State::Word(word, _) if word == IGNORE_MARKER => Tag::Ignore,
        State::Word(name, _) => Tag::Func(name),
        State::Key(key, key_span) => {
            return Err(Error::MissingValue(key, key_span));
        }
        State::Complete(tag) => tag,
    };
    log::trace!("parsed tag {:?}", tag);
    tags.push(tag);
    Ok(())
}

fn directive(key: String, key_span: Span, value: String) -> Result<Tag> {
    TagKind::from_key(&key)
        .and_then(|kind| Tag::with_value(kind, value))
        .ok_or(Error::UnknownDirective(key, key_span))
}
