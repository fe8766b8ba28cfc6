use logos::{Lexer, Logos, Span};

use super::{ParseError, ParseErrorKind};

/// The raw classes of text recognized in a source file.
///
/// Whitespace is ASCII only: each byte is classified on its own, so multi-byte
/// spaces are reported as unexpected bytes rather than skipped.
#[derive(Debug, Clone, Copy, Logos, PartialEq, Eq)]
#[logos(skip r"[\t\v\f\r ]+")]
enum Lexeme {
    #[token(";")]
    #[token("{")]
    #[token("}")]
    #[token("=")]
    Symbol,
    #[regex(r"[A-Za-z0-9+._\-]+")]
    Word,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("\n")]
    Newline,
}

/// A token read from the source, borrowing its text from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    /// The text of the token. Empty once the end of the input is reached.
    pub value: &'a str,
    /// The 1-based line on which the token starts.
    pub line: usize,
    /// The 0-based byte offset at which the token starts.
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn start() -> Self {
        Token {
            value: "",
            line: 1,
            offset: 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.value.is_empty()
    }

    pub fn span(&self) -> Span {
        self.offset..(self.offset + self.value.len())
    }
}

/// Splits the input into tokens, skipping whitespace and `//` comments.
pub(crate) struct Scanner<'a> {
    lexer: Lexer<'a, Lexeme>,
    line: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            lexer: Lexeme::lexer(source),
            line: 1,
            done: false,
        }
    }

    /// Reads the next token, or returns `None` at the end of the input.
    ///
    /// After the end of the input or an error, the scanner is done and produces no more tokens.
    pub fn advance(&mut self) -> Result<Option<Token<'a>>, ParseError> {
        if self.done {
            return Ok(None);
        }

        loop {
            match self.lexer.next() {
                Some(Ok(Lexeme::Symbol | Lexeme::Word)) => {
                    return Ok(Some(Token {
                        value: self.lexer.slice(),
                        line: self.line,
                        offset: self.lexer.span().start,
                    }));
                }
                Some(Ok(Lexeme::Newline)) => self.line += 1,
                Some(Ok(Lexeme::LineComment)) => continue,
                Some(Err(())) => {
                    self.done = true;
                    let span = self.lexer.span();
                    let byte = self.lexer.source().as_bytes()[span.start];
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedByte { byte },
                        self.line,
                        span,
                    ));
                }
                None => {
                    self.done = true;
                    return Ok(None);
                }
            }
        }
    }

    /// The empty token marking the end of the input.
    pub fn eof(&self) -> Token<'a> {
        Token {
            value: "",
            line: self.line,
            offset: self.lexer.source().len(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The input which has not been consumed yet.
    pub fn remainder(&self) -> &'a str {
        self.lexer.remainder()
    }
}
