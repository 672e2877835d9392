//! # Introduction
//!
//! exprtree reads a pre-tokenized arithmetic expression, builds an Abstract
//! Syntax Tree that encodes operator precedence and associativity, and prints
//! the tree for inspection. Optionally it records every step of the parse and
//! replays the recording in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Token file → Loader → TokenStream → Parser → AST → Printer
//!                                        ↓
//!                                    ParseTrace → TUI
//! ```
//!
//! 1. [`parser`]: loads tokens, parses them and prints the resulting tree.
//! 2. [`trace`]: bounded, step-by-step record of a parse.
//! 3. [`ui`]: ratatui-based trace viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use exprtree::parser::parse::parse_tokens;
//! use exprtree::parser::printer::render_tree;
//! use exprtree::parser::token::Token;
//!
//! let tokens = vec![Token::integer("1"), Token::operator("+"), Token::integer("2")];
//! let ast = parse_tokens(tokens).unwrap();
//! assert_eq!(render_tree(&ast, 4), "+\n    1\n    2\n");
//! ```

pub mod parser;
pub mod trace;
pub mod ui;
