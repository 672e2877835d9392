//! Token model and the cursor-driven token stream
//!
//! Tokens arrive pre-classified from the loader (see [`super::loader`]); there is
//! no lexing step. The parser only ever reads through a [`TokenStream`], which
//! pairs the immutable token sequence with a single forward-moving cursor.

use std::fmt;

/// Classification of a token.
///
/// Parentheses get their own variants so the grammar never has to look at the
/// literal text to recognise them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Operator,
    LeftParen,
    RightParen,
}

/// Why a `<value>,<type>` pair could not be turned into a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    UnknownType(String),
    InvalidInteger(String),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::UnknownType(label) => write!(f, "unknown token type '{}'", label),
            ClassifyError::InvalidInteger(text) => {
                write!(f, "invalid integer literal '{}'", text)
            }
        }
    }
}

impl TokenKind {
    /// Classify a lexeme using its source type label.
    ///
    /// `(` and `)` are recognised by their text whatever label they were
    /// written with; everything else is decided by the label.
    pub fn classify(text: &str, label: &str) -> Result<TokenKind, ClassifyError> {
        match text {
            "(" => return Ok(TokenKind::LeftParen),
            ")" => return Ok(TokenKind::RightParen),
            _ => {}
        }

        if label.eq_ignore_ascii_case("integer") {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                Ok(TokenKind::Integer)
            } else {
                Err(ClassifyError::InvalidInteger(text.to_string()))
            }
        } else if label.eq_ignore_ascii_case("operator") {
            Ok(TokenKind::Operator)
        } else {
            Err(ClassifyError::UnknownType(label.to_string()))
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Integer => "integer",
            TokenKind::Operator => "operator",
            TokenKind::LeftParen | TokenKind::RightParen => "paren",
        };
        f.write_str(label)
    }
}

/// A single classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line in the token file, if the token was loaded from one
    pub line: Option<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            line: None,
        }
    }

    pub fn integer(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Integer, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Operator, text)
    }

    pub fn left_paren() -> Self {
        Token::new(TokenKind::LeftParen, "(")
    }

    pub fn right_paren() -> Self {
        Token::new(TokenKind::RightParen, ")")
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.text)
    }
}

/// Ordered token sequence plus the parse cursor.
///
/// The cursor only moves forward (except through an explicit [`reset`]), and
/// every read is bounds-checked, so a `TokenStream` never hands out a token
/// past the end.
///
/// [`reset`]: TokenStream::reset
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, cursor: 0 }
    }

    /// Token at the cursor, without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Consume and return the token at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the stream is exhausted. Callers check with [`peek`] first.
    ///
    /// [`peek`]: TokenStream::peek
    pub fn advance(&mut self) -> &Token {
        assert!(
            !self.at_end(),
            "advance() called at position {} on a stream of {} tokens",
            self.cursor,
            self.tokens.len()
        );
        self.cursor += 1;
        &self.tokens[self.cursor - 1]
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.cursor.min(self.tokens.len())..]
    }

    /// Rewind to the first token so the same sequence can be parsed again
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}
