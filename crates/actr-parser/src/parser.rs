//! Chunk literal parser: token stream to a validated [`Pattern`].
//!
//! Grammar:
//!
//! ```text
//! literal := '[' IDENT ':' item* ']'
//! item    := '!'? ( 'nil' | IDENT | STRING | NUMBER | VAR )
//! ```
//!
//! Every item fills one slot of the named chunk type, in order.

use actr_types::model::{Item, ItemValue, Model, Pattern, PatternSlot};
use actr_types::{ErrorCode, ParseError};

use crate::lexer::{Lexer, Token, TokenKind};

/// Parse a chunk literal against `model`.
///
/// Returns `Ok(None)` for empty or whitespace-only text.
pub fn parse_chunk(model: &Model, text: &str) -> Result<Option<Pattern>, ParseError> {
    let tokens = Lexer::new(text).lex()?;
    Parser::new(tokens, model).parse()
}

pub struct Parser<'m> {
    tokens: Vec<Token>,
    pos: usize,
    model: &'m Model,
}

impl<'m> Parser<'m> {
    pub fn new(tokens: Vec<Token>, model: &'m Model) -> Self {
        Self {
            tokens,
            pos: 0,
            model,
        }
    }

    pub fn parse(mut self) -> Result<Option<Pattern>, ParseError> {
        if self.at_end() {
            return Ok(None);
        }
        let pattern = self.parse_literal()?;
        self.expect(&TokenKind::Eof)?;
        Ok(Some(pattern))
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        // The lexer guarantees a trailing Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if &self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.peek();
        ParseError::new(
            ErrorCode::UNEXPECTED_TOKEN,
            format!("expected {expected}, found {}", found.kind),
            found.span,
        )
    }

    // ── Grammar ───────────────────────────────────────────────────────────────

    fn parse_literal(&mut self) -> Result<Pattern, ParseError> {
        let open = self.expect(&TokenKind::LBracket)?;

        let name_token = self.advance();
        let TokenKind::Ident(chunk_name) = &name_token.kind else {
            return Err(ParseError::new(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected chunk name, found {}", name_token.kind),
                name_token.span,
            ));
        };

        self.expect(&TokenKind::Colon)?;

        let mut slots = Vec::new();
        while !matches!(self.peek().kind, TokenKind::RBracket | TokenKind::Eof) {
            slots.push(PatternSlot::single(self.parse_item()?));
        }
        let close = self.expect(&TokenKind::RBracket)?;
        let literal_span = open.span.to(close.span);

        let Some(chunk) = self.model.lookup_chunk(chunk_name) else {
            return Err(ParseError::new(
                ErrorCode::UNKNOWN_CHUNK,
                format!("could not find chunk named '{chunk_name}'"),
                name_token.span,
            ));
        };
        if chunk.is_internal() {
            return Err(ParseError::new(
                ErrorCode::INTERNAL_CHUNK,
                format!("internal chunk '{chunk_name}' cannot be used as a value"),
                name_token.span,
            ));
        }

        Pattern::new(chunk.clone(), slots).map_err(|e| {
            ParseError::new(
                ErrorCode::SLOT_COUNT_MISMATCH,
                format!("invalid chunk - {e}"),
                literal_span,
            )
        })
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        let negated = if self.peek().kind == TokenKind::Bang {
            self.advance();
            true
        } else {
            false
        };

        let value = match self.peek().kind.clone() {
            TokenKind::Nil => ItemValue::Nil,
            TokenKind::Ident(s) | TokenKind::Str(s) => ItemValue::Id(s),
            TokenKind::Number(s) => ItemValue::Num(s),
            TokenKind::Var(s) => ItemValue::Var(s),
            _ => return Err(self.unexpected("slot value")),
        };
        self.advance();

        Ok(Item { negated, value })
    }
}
