//! Arithmetic expression parser
//!
//! This module turns a pre-tokenized arithmetic expression into an Abstract
//! Syntax Tree (AST):
//! - [`loader`]: Token file loading (`<value>,<type>` lines → tokens)
//! - [`token`]: Token model and the cursor-driven [`token::TokenStream`]
//! - [`parse`]: Parser struct, options and errors
//! - [`ast`]: AST node definitions
//! - [`printer`]: Indented pre-order tree rendering
//!
//! # Supported Grammar
//!
//! Integer literals, the four binary operators `+ - * /` (left-associative,
//! `*` and `/` binding tighter), and parentheses. No unary operators,
//! identifiers or floating-point literals.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod constants;
mod expressions;
pub mod loader;
pub mod parse;
pub mod printer;
pub mod token;
