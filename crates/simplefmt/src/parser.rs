//! Parser.
//!
//! ```text
//! statement    := term relation (term | number | identifier) constantTail? priorityTail?
//! term         := ((number | identifier) '*')? objectRef ('.' attrName)?
//! relation     := '=' | '<=' | '>='
//! constantTail := ('+' | '-') (number | identifier)
//! priorityTail := '@' (number | identifier)
//! ```

use crate::{
    lexer::{Path, Spanned, Token, TokenKind},
    syntax::{Offset, Operand, Relation, Rhs, Sign, Span, Statement, Symbol, Term},
    util::OneOf,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "syntax error at offset {position}: expecting {}, found {found}",
    OneOf(.expected)
)]
pub struct SyntaxError {
    pub position: usize,
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
}

/// Parse a whole token sequence as a single statement.
pub fn parse<'source>(tokens: &[Spanned<'source>]) -> Result<Statement<'source>, SyntaxError> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let mut parser = Parser::new(tokens);
    let statement = parser.statement()?;
    tracing::trace!("parsed: {}", statement);
    Ok(statement)
}

struct Parser<'t, 'source> {
    tokens: &'t [Spanned<'source>],
    pos: usize,
}

impl<'t, 'source> Parser<'t, 'source> {
    fn new(tokens: &'t [Spanned<'source>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Spanned<'source>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self, n: usize) -> Option<Token<'source>> {
        self.tokens.get(self.pos + n).map(|(_, t, _)| *t)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        match self.peek_token(0) {
            Some(t) if t.kind() == kind => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    fn error(&self, expected: &[TokenKind]) -> SyntaxError {
        let (position, found) = match self.peek() {
            Some((start, token, _)) => (start, token.kind()),
            None => {
                let end = self.tokens.last().map_or(0, |(_, _, end)| *end);
                (end, TokenKind::End)
            }
        };
        SyntaxError {
            position,
            expected: expected.to_vec(),
            found,
        }
    }

    fn statement(&mut self) -> Result<Statement<'source>, SyntaxError> {
        let first = self.term()?;
        let relation = self.relation()?;
        let second = self.rhs()?;
        let constant = self.constant_tail()?;
        let priority = self.priority_tail()?;

        if self.peek().is_some() {
            let mut expected = vec![];
            if constant.is_none() && priority.is_none() {
                expected.extend([TokenKind::Plus, TokenKind::Minus]);
            }
            if priority.is_none() {
                expected.push(TokenKind::At);
            }
            expected.push(TokenKind::End);
            return Err(self.error(&expected));
        }

        Ok(Statement {
            first,
            relation,
            second,
            constant,
            priority,
        })
    }

    fn term(&mut self) -> Result<Term<'source>, SyntaxError> {
        let multiplier = match (self.peek_token(0), self.peek_token(1)) {
            (Some(Token::Number(..)), _) | (Some(Token::Ident(..)), Some(Token::Star)) => {
                let multiplier = self.operand()?;
                if !self.eat(TokenKind::Star) {
                    return Err(self.error(&[TokenKind::Star]));
                }
                Some(multiplier)
            }
            _ => None,
        };
        let (object, attribute) = self.object_ref()?;
        Ok(Term {
            multiplier,
            object,
            attribute,
        })
    }

    fn object_ref(&mut self) -> Result<(Symbol<'source>, Option<Symbol<'source>>), SyntaxError> {
        match self.peek() {
            Some((start, Token::Ident(name), end)) => {
                self.bump();
                let object = Symbol {
                    name,
                    span: Span::new(start, end),
                };
                Ok((object, None))
            }
            Some((start, Token::Dotted(Path { owner, member }), end)) => {
                self.bump();
                let dot = start + owner.len();
                let object = Symbol {
                    name: owner,
                    span: Span::new(start, dot),
                };
                let attribute = Symbol {
                    name: member,
                    span: Span::new(dot + 1, end),
                };
                Ok((object, Some(attribute)))
            }
            _ => Err(self.error(&[TokenKind::Ident, TokenKind::Dotted])),
        }
    }

    fn relation(&mut self) -> Result<Relation, SyntaxError> {
        let relation = match self.peek_token(0) {
            Some(Token::Eq) => Relation::Equal,
            Some(Token::LessEq) => Relation::LessOrEqual,
            Some(Token::GreaterEq) => Relation::GreaterOrEqual,
            _ => return Err(self.error(&[TokenKind::Relation])),
        };
        self.bump();
        Ok(relation)
    }

    fn rhs(&mut self) -> Result<Rhs<'source>, SyntaxError> {
        let minus = match self.peek() {
            Some((start, Token::Minus, _)) => {
                self.bump();
                Some(start)
            }
            _ => None,
        };

        let value = match self.peek() {
            Some((start, Token::Number(n), end)) => {
                self.bump();
                match minus {
                    Some(minus) => Operand::Number(-n, Span::new(minus, end)),
                    None => Operand::Number(n, Span::new(start, end)),
                }
            }
            _ if minus.is_some() => return Err(self.error(&[TokenKind::Number])),
            Some((start, Token::Ident(name), end)) => {
                self.bump();
                Operand::Symbol(Symbol {
                    name,
                    span: Span::new(start, end),
                })
            }
            Some((_, Token::Dotted(..), _)) => {
                let (object, attribute) = self.object_ref()?;
                return Ok(Rhs::Term(Term {
                    multiplier: None,
                    object,
                    attribute,
                }));
            }
            _ => {
                return Err(self.error(&[
                    TokenKind::Number,
                    TokenKind::Minus,
                    TokenKind::Ident,
                    TokenKind::Dotted,
                ]))
            }
        };

        if !self.eat(TokenKind::Star) {
            return Ok(Rhs::Value(value));
        }
        let (object, attribute) = self.object_ref()?;
        Ok(Rhs::Term(Term {
            multiplier: Some(value),
            object,
            attribute,
        }))
    }

    fn constant_tail(&mut self) -> Result<Option<Offset<'source>>, SyntaxError> {
        let sign = match self.peek_token(0) {
            Some(Token::Plus) => Sign::Plus,
            Some(Token::Minus) => Sign::Minus,
            _ => return Ok(None),
        };
        self.bump();
        let operand = self.operand()?;
        Ok(Some(Offset { sign, operand }))
    }

    fn priority_tail(&mut self) -> Result<Option<Operand<'source>>, SyntaxError> {
        if !self.eat(TokenKind::At) {
            return Ok(None);
        }
        self.operand().map(Some)
    }

    fn operand(&mut self) -> Result<Operand<'source>, SyntaxError> {
        match self.peek() {
            Some((start, Token::Number(n), end)) => {
                self.bump();
                Ok(Operand::Number(n, Span::new(start, end)))
            }
            Some((start, Token::Ident(name), end)) => {
                self.bump();
                Ok(Operand::Symbol(Symbol {
                    name,
                    span: Span::new(start, end),
                }))
            }
            _ => Err(self.error(&[TokenKind::Number, TokenKind::Ident])),
        }
    }
}
