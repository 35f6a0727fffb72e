//! Requisite expression engine
//!
//! This module turns the free-text requisite strings found in a course
//! calendar into boolean expression trees and expands those trees into
//! concrete satisfying course combinations.
//!
//! The pipeline consists of:
//! 1. Normalization ([`normalize`]): bracket balancing and separator repair
//!    of raw extracted text.
//! 2. Tokenization ([`tokens`]): a logos lexer over the normalized alphabet
//!    (course-code atoms plus `(` `)` `,` `/`).
//! 3. Parsing ([`parser`]): innermost-first bracket resolution folding the
//!    token stream into an AND/OR tree.
//! 4. Evaluation ([`ast`]): combinatorial expansion of a tree into the list
//!    of alternative course sets that satisfy it.
//!
//! Grammar semantics: comma is AND (sequential required groups), slash is OR
//! (alternatives within a group), parentheses group explicitly, and slash
//! binds tighter than comma. A group of exactly one member collapses to that
//! member, both at parse time and in the display tree.

pub mod ast;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod tokens;
pub mod tree;

pub use ast::{BoolOp, Expr};
pub use error::{NormalizeError, ParseError};
pub use normalize::normalize;
pub use parser::parse_requisite;
pub use tokens::Token;
pub use tree::DisplayTree;
