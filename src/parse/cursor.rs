use tracing::trace;

use super::{
    lex::{Scanner, Token},
    ParseError, ParseErrorKind,
};

/// A token stream supporting a single token of pushback.
///
/// Once an error has been produced, the cursor is finished and every
/// subsequent read returns that same error.
pub(crate) struct TokenCursor<'a> {
    scanner: Scanner<'a>,
    current: Token<'a>,
    pushed_back: bool,
    error: Option<ParseError>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        TokenCursor {
            scanner: Scanner::new(source),
            current: Token::start(),
            pushed_back: false,
            error: None,
        }
    }

    /// Moves to the next token and returns it.
    ///
    /// If a token was pushed back, it is returned again without reading any input.
    /// At the end of the input, an empty token is returned, repeatedly.
    pub fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        if self.pushed_back {
            self.pushed_back = false;
        } else if !self.scanner.is_done() {
            match self.scanner.advance() {
                Ok(Some(token)) => self.current = token,
                Ok(None) => self.current = self.scanner.eof(),
                Err(err) => {
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }

        trace!(
            value = self.current.value,
            line = self.current.line,
            offset = self.current.offset,
            "read token"
        );
        Ok(self.current)
    }

    /// Undoes the most recent [`advance`](TokenCursor::advance).
    ///
    /// Only one token may be pushed back at a time.
    pub fn pushback(&mut self) -> Result<(), ParseError> {
        if self.pushed_back {
            return Err(self.fail(ParseErrorKind::RepeatedPushback));
        }

        self.pushed_back = true;
        Ok(())
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<'a>, ParseError> {
        let token = self.advance()?;
        self.pushback()?;
        Ok(token)
    }

    /// Builds an error positioned at the current token, and finishes the cursor.
    pub fn fail(&mut self, kind: ParseErrorKind) -> ParseError {
        let err = ParseError::new(kind, self.current.line, self.current.span());
        self.error = Some(err.clone());
        err
    }

    /// The input which has not been read yet.
    pub fn remainder(&self) -> &'a str {
        self.scanner.remainder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushback_returns_same_token_once() {
        let mut cursor = TokenCursor::new("message Foo {");

        let token = cursor.advance().unwrap();
        assert_eq!(token.value, "message");
        cursor.pushback().unwrap();

        assert_eq!(cursor.advance().unwrap(), token);
        assert_eq!(cursor.advance().unwrap().value, "Foo");
        assert_eq!(cursor.advance().unwrap().value, "{");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = TokenCursor::new("a b");

        assert_eq!(cursor.peek().unwrap().value, "a");
        assert_eq!(cursor.peek().unwrap().value, "a");
        assert_eq!(cursor.advance().unwrap().value, "a");
        assert_eq!(cursor.peek().unwrap().value, "b");
        assert_eq!(cursor.advance().unwrap().value, "b");
    }

    #[test]
    fn repeated_pushback_fails() {
        let mut cursor = TokenCursor::new("a b");

        cursor.advance().unwrap();
        cursor.pushback().unwrap();
        let err = cursor.pushback().unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::RepeatedPushback);
        assert_eq!(err.offset(), 0);

        // The cursor is finished after an error.
        assert_eq!(cursor.advance().unwrap_err(), err);
    }

    #[test]
    fn end_of_input_repeats() {
        let mut cursor = TokenCursor::new("a\n");

        assert_eq!(cursor.advance().unwrap().value, "a");

        let eof = cursor.advance().unwrap();
        assert!(eof.is_eof());
        assert_eq!((eof.line, eof.offset), (2, 2));

        assert_eq!(cursor.advance().unwrap(), eof);
        cursor.pushback().unwrap();
        assert_eq!(cursor.advance().unwrap(), eof);
        assert_eq!(cursor.remainder(), "");
    }

    #[test]
    fn scanner_error_is_sticky() {
        let mut cursor = TokenCursor::new("a $ b");

        assert_eq!(cursor.advance().unwrap().value, "a");
        let err = cursor.advance().unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::UnexpectedByte { byte: b'$' });
        assert_eq!(err.offset(), 2);
        assert_eq!(cursor.advance().unwrap_err(), err);
    }
}
