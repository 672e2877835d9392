//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, options, cursor helpers and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `expressions`: the three grammar rules (expression, term, factor)
//!
//! # Implementation
//!
//! The grammar rules live in a separate `impl Parser` block so they can read
//! like the grammar, while the bookkeeping (cursor access, trace recording,
//! error construction) stays here.

use crate::parser::ast::{AstNode, BinOp};
use crate::parser::constants::{DEFAULT_MAX_DEPTH, DEFAULT_TRACE_LIMIT};
use crate::parser::token::{Token, TokenKind, TokenStream};
use crate::trace::{ParseTrace, Rule, TraceEvent, TraceStep};
use thiserror::Error;

/// Parser error type
///
/// Every variant is fatal: the parser never recovers or returns a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The stream ran out where the grammar still required a token
    #[error("Unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    /// A token was present but does not fit the grammar here
    #[error("{message} at position {position}")]
    Syntax { message: String, position: usize },

    /// Strict mode only: tokens were left after a complete expression
    #[error("Unexpected token {token} at position {position} after a complete expression")]
    TrailingTokens { token: Token, position: usize },

    #[error("Parentheses nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    /// Cursor position the error refers to
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { position }
            | ParseError::Syntax { position, .. }
            | ParseError::TrailingTokens { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// Token file line of the offending token, if it came from a file.
    ///
    /// `None` when the error is at the end of input.
    pub fn line_in(&self, tokens: &[Token]) -> Option<usize> {
        tokens.get(self.position()).and_then(|token| token.line)
    }
}

/// Knobs for a single parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject tokens left over after the top-level expression
    pub strict: bool,
    /// Maximum parenthesis nesting
    pub max_depth: usize,
    /// Record a [`ParseTrace`] while parsing
    pub trace: bool,
    pub trace_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
            trace_limit: DEFAULT_TRACE_LIMIT,
        }
    }
}

/// Recursive descent parser for arithmetic expressions
///
/// Owns its token stream, so independent parses never share a cursor.
#[derive(Debug)]
pub struct Parser {
    pub(crate) stream: TokenStream,
    pub(crate) options: ParseOptions,
    pub(crate) paren_depth: usize,
    pub(crate) rule_stack: Vec<Rule>,
    pub(crate) trace: Option<ParseTrace>,
}

impl Parser {
    pub fn new(stream: impl Into<TokenStream>) -> Self {
        Self::with_options(stream, ParseOptions::default())
    }

    pub fn with_options(stream: impl Into<TokenStream>, options: ParseOptions) -> Self {
        Parser {
            stream: stream.into(),
            options,
            paren_depth: 0,
            rule_stack: Vec::new(),
            trace: options
                .trace
                .then(|| ParseTrace::with_limit(options.trace_limit)),
        }
    }

    /// Parse one top-level expression starting at the current cursor.
    ///
    /// Tokens after the expression are left in the stream unless
    /// [`ParseOptions::strict`] is set.
    pub fn parse(&mut self) -> Result<AstNode, ParseError> {
        let result = self.parse_expression().and_then(|root| {
            if self.options.strict {
                if let Some(token) = self.peek() {
                    return Err(ParseError::TrailingTokens {
                        token: token.clone(),
                        position: self.position(),
                    });
                }
            }
            Ok(root)
        });

        if let Err(err) = &result {
            self.record(TraceEvent::Fail(err.to_string()));
        }

        result
    }

    /// Rewind the stream and clear per-parse state, including any trace
    pub fn reset(&mut self) {
        self.stream.reset();
        self.paren_depth = 0;
        self.rule_stack.clear();
        if self.options.trace {
            self.trace = Some(ParseTrace::with_limit(self.options.trace_limit));
        }
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn into_stream(self) -> TokenStream {
        self.stream
    }

    /// Take the recorded trace, if tracing was enabled
    pub fn take_trace(&mut self) -> Option<ParseTrace> {
        self.trace.take()
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.stream.peek()
    }

    pub(crate) fn position(&self) -> usize {
        self.stream.position()
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Consume the current token. Callers must have checked it exists.
    pub(crate) fn consume(&mut self) -> Token {
        let token = self.stream.advance().clone();
        self.record(TraceEvent::Consume(token.clone()));
        token
    }

    /// Consume the current token if it is an operator among `accepted`.
    ///
    /// Both the kind and the text must match: an `Operator` token with any
    /// other text stays in the stream.
    pub(crate) fn match_operator(&mut self, accepted: &[BinOp]) -> Option<BinOp> {
        let op = self
            .peek()
            .filter(|token| token.kind == TokenKind::Operator)
            .and_then(|token| BinOp::from_symbol(&token.text))
            .filter(|op| accepted.contains(op))?;
        self.consume();
        Some(op)
    }

    pub(crate) fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if self.check_kind(TokenKind::RightParen) {
            self.consume();
            Ok(())
        } else {
            Err(self.error_here(format!("Expected ')', found {}", self.describe_current())))
        }
    }

    pub(crate) fn combine(&mut self, op: BinOp, left: AstNode, right: AstNode) -> AstNode {
        self.record(TraceEvent::Combine(op));
        AstNode::binary(op, left, right)
    }

    pub(crate) fn enter(&mut self, rule: Rule) {
        self.rule_stack.push(rule);
        self.record(TraceEvent::Enter(rule));
    }

    pub(crate) fn exit(&mut self, rule: Rule) {
        self.record(TraceEvent::Exit(rule));
        self.rule_stack.pop();
    }

    pub(crate) fn record(&mut self, event: TraceEvent) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceStep {
                event,
                cursor: self.stream.position(),
                rule_stack: self.rule_stack.clone(),
            });
        }
    }

    pub(crate) fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            position: self.position(),
        }
    }
}

/// Parse a complete token sequence with default options
pub fn parse_tokens(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str) -> Token {
        Token::integer(text)
    }

    fn op(text: &str) -> Token {
        Token::operator(text)
    }

    #[test]
    fn test_parse_single_literal() {
        let ast = parse_tokens(vec![int("42")]).unwrap();
        assert_eq!(ast, AstNode::int("42"));
    }

    #[test]
    fn test_parse_precedence() {
        let ast = parse_tokens(vec![int("2"), op("+"), int("3"), op("*"), int("4")]).unwrap();
        assert_eq!(ast.to_string(), "(2+(3*4))");
    }

    #[test]
    fn test_empty_input() {
        let err = parse_tokens(Vec::new()).unwrap_err();
        assert_eq!(err, ParseError::UnexpectedEnd { position: 0 });
    }

    #[test]
    fn test_unknown_operator_left_unconsumed() {
        let mut parser = Parser::new(vec![int("1"), op("%"), int("2")]);
        let ast = parser.parse().unwrap();

        assert_eq!(ast, AstNode::int("1"));
        assert_eq!(parser.stream().position(), 1);
        assert_eq!(parser.stream().remaining().len(), 2);
    }

    #[test]
    fn test_strict_rejects_trailing_tokens() {
        let options = ParseOptions {
            strict: true,
            ..ParseOptions::default()
        };
        let mut parser = Parser::with_options(vec![int("1"), op("%"), int("2")], options);

        match parser.parse() {
            Err(ParseError::TrailingTokens { token, position }) => {
                assert_eq!(token.text, "%");
                assert_eq!(position, 1);
            }
            other => panic!("Expected TrailingTokens, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_reparses_identically() {
        let mut parser = Parser::new(vec![int("6"), op("/"), int("3"), op("/"), int("2")]);
        let first = parser.parse().unwrap();
        parser.reset();
        let second = parser.parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_position() {
        let err = parse_tokens(vec![int("1"), op("+"), op("*")]).unwrap_err();
        assert_eq!(err.position(), 2);
        assert_eq!(err.to_string(), "Expected integer or '(', found '*' at position 2");
    }

    #[test]
    fn test_error_line_from_offending_token() {
        let tokens = vec![int("1").at_line(1), op("+").at_line(3), op("*").at_line(4)];
        let err = parse_tokens(tokens.clone()).unwrap_err();
        assert_eq!(err.line_in(&tokens), Some(4));

        let tokens = vec![int("1").at_line(1), op("+").at_line(2)];
        let err = parse_tokens(tokens.clone()).unwrap_err();
        assert_eq!(err.line_in(&tokens), None);
    }

    #[test]
    fn test_trace_records_fail_step() {
        let options = ParseOptions {
            trace: true,
            ..ParseOptions::default()
        };
        let mut parser = Parser::with_options(Vec::<Token>::new(), options);
        assert!(parser.parse().is_err());

        let trace = parser.take_trace().unwrap();
        let last = trace.steps().last().unwrap();
        assert!(matches!(last.event, TraceEvent::Fail(_)));
    }

    #[test]
    fn test_trace_disabled_by_default() {
        let mut parser = Parser::new(vec![int("1")]);
        parser.parse().unwrap();
        assert!(parser.take_trace().is_none());
    }
}
