//! Token file loader
//!
//! Reads the `<value>,<type>` line format into [`Token`]s. Each line holds one
//! token; the value runs up to the first comma and the rest of the line is the
//! type label. Blank lines are ignored.
//!
//! Lines that cannot be turned into a token are handled per
//! [`MalformedLinePolicy`]: skipped with a [`LineDiagnostic`] (the default), or
//! treated as a hard [`LoadError::Malformed`].

use crate::parser::token::{ClassifyError, Token, TokenKind};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to do with a line that is not a valid token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedLinePolicy {
    /// Record a diagnostic and keep going
    #[default]
    Skip,
    /// Stop at the first bad line
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    pub policy: MalformedLinePolicy,
    /// Upper bound on the number of tokens; `None` means unlimited
    pub max_tokens: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    MissingValue,
    MissingType,
    Invalid(ClassifyError),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingValue => f.write_str("missing token value"),
            MalformedReason::MissingType => f.write_str("missing token type"),
            MalformedReason::Invalid(err) => write!(f, "{}", err),
        }
    }
}

/// A rejected line of the token file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: MalformedReason,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid token format on line {} ({}): {}",
            self.line, self.reason, self.content
        )
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not open token file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Malformed(LineDiagnostic),

    #[error("Too many tokens: limit is {limit}")]
    TooManyTokens { limit: usize },

    #[error("Token file {} contains no parseable tokens", .path.display())]
    NoTokens { path: PathBuf },
}

/// Tokens read from a source, plus any lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTokens {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Load tokens from in-memory text.
///
/// An input with no tokens is not an error here; the parser reports it.
pub fn parse_token_source(
    source: &str,
    options: &LoaderOptions,
) -> Result<LoadedTokens, LoadError> {
    let mut loaded = LoadedTokens::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.trim();
        if content.is_empty() {
            continue;
        }

        match parse_line(content) {
            Ok((kind, text)) => {
                if let Some(limit) = options.max_tokens {
                    if loaded.tokens.len() >= limit {
                        return Err(LoadError::TooManyTokens { limit });
                    }
                }
                loaded.tokens.push(Token::new(kind, text).at_line(line));
            }
            Err(reason) => {
                let diagnostic = LineDiagnostic {
                    line,
                    content: content.to_string(),
                    reason,
                };
                match options.policy {
                    MalformedLinePolicy::Skip => loaded.diagnostics.push(diagnostic),
                    MalformedLinePolicy::Abort => return Err(LoadError::Malformed(diagnostic)),
                }
            }
        }
    }

    Ok(loaded)
}

/// Load tokens from a file. A file that yields no tokens is an error.
pub fn load_token_file(
    path: impl AsRef<Path>,
    options: &LoaderOptions,
) -> Result<LoadedTokens, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = parse_token_source(&source, options)?;
    if loaded.tokens.is_empty() {
        return Err(LoadError::NoTokens {
            path: path.to_path_buf(),
        });
    }

    Ok(loaded)
}

fn parse_line(content: &str) -> Result<(TokenKind, &str), MalformedReason> {
    let (value, label) = content
        .split_once(',')
        .ok_or(MalformedReason::MissingType)?;
    let value = value.trim();
    let label = label.trim();

    if value.is_empty() {
        return Err(MalformedReason::MissingValue);
    }
    if label.is_empty() {
        return Err(MalformedReason::MissingType);
    }

    let kind = TokenKind::classify(value, label).map_err(MalformedReason::Invalid)?;
    Ok((kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(source: &str) -> LoadedTokens {
        parse_token_source(source, &LoaderOptions::default()).unwrap()
    }

    #[test]
    fn test_basic_lines() {
        let loaded = load("2,integer\n+,operator\n3,integer\n");
        let texts: Vec<&str> = loaded.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "+", "3"]);
        assert_eq!(loaded.tokens[1].kind, TokenKind::Operator);
        assert_eq!(loaded.tokens[2].line, Some(3));
        assert!(loaded.diagnostics.is_empty());
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let loaded = load("(,paren\r\n\r\n7,integer\r\n),paren\r\n");
        let kinds: Vec<TokenKind> = loaded.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::LeftParen, TokenKind::Integer, TokenKind::RightParen]
        );
        assert_eq!(loaded.tokens[1].line, Some(3));
    }

    #[test]
    fn test_skip_policy_collects_diagnostics() {
        let loaded = load("1,integer\nbroken\n,integer\nx,identifier\n2,integer");
        assert_eq!(loaded.tokens.len(), 2);

        let reasons: Vec<(usize, &MalformedReason)> = loaded
            .diagnostics
            .iter()
            .map(|d| (d.line, &d.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (2, &MalformedReason::MissingType),
                (3, &MalformedReason::MissingValue),
                (
                    4,
                    &MalformedReason::Invalid(ClassifyError::UnknownType("identifier".into()))
                ),
            ]
        );
    }

    #[test]
    fn test_abort_policy() {
        let options = LoaderOptions {
            policy: MalformedLinePolicy::Abort,
            ..LoaderOptions::default()
        };
        match parse_token_source("1,integer\n+\n", &options) {
            Err(LoadError::Malformed(diag)) => {
                assert_eq!(diag.line, 2);
                assert_eq!(diag.content, "+");
            }
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_token_limit() {
        let options = LoaderOptions {
            max_tokens: Some(2),
            ..LoaderOptions::default()
        };
        assert!(parse_token_source("1,integer\n+,operator\n", &options).is_ok());
        assert!(matches!(
            parse_token_source("1,integer\n+,operator\n2,integer\n", &options),
            Err(LoadError::TooManyTokens { limit: 2 })
        ));
    }

    #[test]
    fn test_empty_source_is_not_an_error() {
        let loaded = load("");
        assert!(loaded.tokens.is_empty());
    }

    #[test]
    fn test_diagnostic_message() {
        let loaded = load("4a,integer");
        assert_eq!(
            loaded.diagnostics[0].to_string(),
            "Invalid token format on line 1 (invalid integer literal '4a'): 4a,integer"
        );
    }
}
