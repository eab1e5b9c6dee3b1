//! Chunk literal lexer: converts text to a token stream.
//!
//! Whitespace (including newlines) separates tokens and is otherwise
//! ignored. The first invalid character stops lexing with an error.

use actr_types::{ErrorCode, ParseError, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LBracket,
    RBracket,
    Colon,
    /// `!` negation marker.
    Bang,
    /// The `nil` keyword.
    Nil,
    Ident(String),
    /// A variable including its `?` sigil; `?` alone is the wildcard.
    Var(String),
    /// Number text exactly as written.
    Number(String),
    /// Contents of a quoted string, without the quotes.
    Str(String),
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Colon => write!(f, "':'"),
            Self::Bang => write!(f, "'!'"),
            Self::Nil => write!(f, "nil"),
            Self::Ident(s) => write!(f, "identifier '{s}'"),
            Self::Var(s) => write!(f, "variable '{s}'"),
            Self::Number(s) => write!(f, "number '{s}'"),
            Self::Str(s) => write!(f, "string '{s}'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

pub struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the whole input. The token stream always ends with
    /// [`TokenKind::Eof`].
    pub fn lex(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        String::from_utf8_lossy(&self.source[start..self.pos]).into_owned()
    }

    fn span_from(&self, line: u32, col: u32) -> Span {
        Span::new(line, col, self.line, self.col)
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();

        let (line, col) = (self.line, self.col);
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(line, col)));
        };

        let kind = match ch {
            b'[' => {
                self.advance();
                TokenKind::LBracket
            }
            b']' => {
                self.advance();
                TokenKind::RBracket
            }
            b':' => {
                self.advance();
                TokenKind::Colon
            }
            b'!' => {
                self.advance();
                TokenKind::Bang
            }
            b'?' => {
                self.advance();
                let name = self.take_while(is_ident_continue);
                TokenKind::Var(format!("?{name}"))
            }
            b'\'' | b'"' => self.scan_string(ch, line, col)?,
            b'-' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => {
                let word = self.take_while(is_ident_continue);
                if word == "nil" {
                    TokenKind::Nil
                } else {
                    TokenKind::Ident(word)
                }
            }
            other => {
                self.advance();
                return Err(ParseError::new(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("unexpected character '{}'", other as char),
                    self.span_from(line, col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(line, col)))
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.take_while(|c| c.is_ascii_digit());
        }
        TokenKind::Number(String::from_utf8_lossy(&self.source[start..self.pos]).into_owned())
    }

    fn scan_string(&mut self, quote: u8, line: u32, col: u32) -> Result<TokenKind, ParseError> {
        self.advance();
        let text = self.take_while(|c| c != quote && c != b'\n');
        if self.peek() != Some(quote) {
            return Err(ParseError::new(
                ErrorCode::UNTERMINATED_STRING,
                "unterminated string literal",
                self.span_from(line, col),
            ));
        }
        self.advance();
        Ok(TokenKind::Str(text))
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'-'
}
