//! Expression parsing implementation
//!
//! The grammar, from lowest to highest precedence:
//!
//! ```text
//! expression := term ( ('+' | '-') term )*
//! term       := factor ( ('*' | '/') factor )*
//! factor     := INTEGER | '(' expression ')'
//! ```
//!
//! # Precedence
//!
//! There is no precedence table. Each level only calls the level above it, so
//! `*` and `/` bind tighter than `+` and `-` by construction, and the only way
//! back down to `expression` is through a parenthesised factor.
//!
//! # Associativity
//!
//! The binary levels loop rather than recurse on their right operand: each new
//! node takes the tree built so far as its left child, so `6/3/2` becomes
//! `(6/3)/2`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{AstNode, BinOp};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use crate::trace::{Rule, TraceEvent};

impl Parser {
    /// Parse additive expression (+ -)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.enter(Rule::Expression);
        let mut left = self.parse_term()?;

        while let Some(op) = self.match_operator(&[BinOp::Add, BinOp::Sub]) {
            let right = self.parse_term()?;
            left = self.combine(op, left, right);
        }

        self.exit(Rule::Expression);
        Ok(left)
    }

    /// Parse multiplicative term (* /)
    pub(crate) fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        self.enter(Rule::Term);
        let mut left = self.parse_factor()?;

        while let Some(op) = self.match_operator(&[BinOp::Mul, BinOp::Div]) {
            let right = self.parse_factor()?;
            left = self.combine(op, left, right);
        }

        self.exit(Rule::Term);
        Ok(left)
    }

    /// Parse factor: integer literal or parenthesised expression
    pub(crate) fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        self.enter(Rule::Factor);

        let kind = match self.peek() {
            Some(token) => token.kind,
            None => {
                return Err(ParseError::UnexpectedEnd {
                    position: self.position(),
                })
            }
        };

        let node = match kind {
            TokenKind::Integer => {
                let token = self.consume();
                self.record(TraceEvent::Leaf(token.text.clone()));
                AstNode::int(token.text)
            }
            TokenKind::LeftParen => {
                self.consume();
                self.paren_depth += 1;
                if self.paren_depth > self.options.max_depth {
                    return Err(ParseError::NestingTooDeep {
                        limit: self.options.max_depth,
                        position: self.position(),
                    });
                }

                let inner = self.parse_expression()?;
                self.expect_rparen()?;
                self.paren_depth -= 1;
                inner
            }
            TokenKind::Operator | TokenKind::RightParen => {
                return Err(self.error_here(format!(
                    "Expected integer or '(', found {}",
                    self.describe_current()
                )));
            }
        };

        self.exit(Rule::Factor);
        Ok(node)
    }
}
