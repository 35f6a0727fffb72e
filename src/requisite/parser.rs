//! Grammar parser for normalized requisite strings
//!
//! Folds a token stream into an [`Expr`] tree. Bracket pairs resolve
//! innermost-first: each matched span is folded into a single composite node
//! and the surrounding stream is rebuilt, so no pass ever sees a nested
//! bracket. Once no brackets remain, the top-level stream folds the same
//! way.
//!
//! Folding a flat run: commas split the run into required groups, slashes
//! split a group into alternatives (slash binds tighter than comma), and a
//! group of exactly one member collapses to that member. A run of slashes
//! produces one flat OR group, never a nested chain.
//!
//! Repair rule for adjacency: two operands with no separator between them
//! (a bracket group against an atom, or two bracket groups back to back)
//! are joined by an implicit comma. Juxtaposition is conjunction; this is
//! the one deterministic rule applied wherever normalization leaves a
//! bracket boundary flush against a token.
//!
//! Each reduction step is a pure function from one item list to the next;
//! there is no in-place token mutation or index bookkeeping across calls.

use crate::catalog::code::CourseCode;
use crate::requisite::ast::{BoolOp, Expr};
use crate::requisite::error::ParseError;
use crate::requisite::tokens::{tokenize, Token};

/// Work item during reduction: an unresolved bracket, a separator with its
/// source offset, or an already-folded subtree.
#[derive(Debug, Clone)]
enum Item {
    Open,
    Close,
    Comma(usize),
    Slash(usize),
    Node(Expr),
}

/// Parse a normalized requisite string into an expression tree.
///
/// Returns `Ok(None)` for empty input: an empty requisite is a valid "no
/// requirement" signal, not a parse failure.
pub fn parse_requisite(source: &str) -> Result<Option<Expr>, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut items = Vec::with_capacity(tokens.len());
    for (token, span) in tokens {
        items.push(match token {
            Token::OpenParen => Item::Open,
            Token::CloseParen => Item::Close,
            Token::Comma => Item::Comma(span.start),
            Token::Slash => Item::Slash(span.start),
            Token::Atom(text) => {
                let code =
                    CourseCode::parse(&text).map_err(|invalid| ParseError::InvalidCode(invalid.0))?;
                Item::Node(Expr::Leaf(code))
            }
        });
    }

    loop {
        let Some(close) = items.iter().position(|i| matches!(i, Item::Close)) else {
            if items.iter().any(|i| matches!(i, Item::Open)) {
                return Err(ParseError::UnbalancedGroup);
            }
            return fold_run(&items).map(Some);
        };
        let open = items[..close]
            .iter()
            .rposition(|i| matches!(i, Item::Open))
            .ok_or(ParseError::UnbalancedGroup)?;
        let node = fold_run(&items[open + 1..close])?;

        let mut next = Vec::with_capacity(items.len() - 2);
        next.extend_from_slice(&items[..open]);
        next.push(Item::Node(node));
        next.extend_from_slice(&items[close + 1..]);
        items = next;
    }
}

/// Fold a bracket-free run of nodes and separators into one expression.
fn fold_run(run: &[Item]) -> Result<Expr, ParseError> {
    if run.is_empty() {
        return Err(ParseError::EmptyGroup);
    }

    let mut groups: Vec<Vec<Expr>> = Vec::new();
    let mut alternatives: Vec<Expr> = Vec::new();
    let mut expecting_operand = true;
    let mut last_separator = 0;

    for item in run {
        match item {
            Item::Node(expr) => {
                if !expecting_operand {
                    // adjacency repair: implicit comma between two operands
                    groups.push(std::mem::take(&mut alternatives));
                }
                alternatives.push(expr.clone());
                expecting_operand = false;
            }
            Item::Slash(at) => {
                if expecting_operand {
                    return Err(ParseError::DanglingSeparator(*at));
                }
                expecting_operand = true;
                last_separator = *at;
            }
            Item::Comma(at) => {
                if expecting_operand {
                    return Err(ParseError::DanglingSeparator(*at));
                }
                groups.push(std::mem::take(&mut alternatives));
                expecting_operand = true;
                last_separator = *at;
            }
            Item::Open | Item::Close => return Err(ParseError::UnbalancedGroup),
        }
    }
    if expecting_operand {
        return Err(ParseError::DanglingSeparator(last_separator));
    }
    groups.push(alternatives);

    let mut members: Vec<Expr> = groups.into_iter().map(or_group).collect();
    Ok(if members.len() == 1 {
        members.remove(0)
    } else {
        Expr::Group(BoolOp::And, members)
    })
}

/// Build one OR group from a list of alternatives, collapsing singletons.
fn or_group(mut alternatives: Vec<Expr>) -> Expr {
    if alternatives.len() == 1 {
        alternatives.remove(0)
    } else {
        Expr::Group(BoolOp::Or, alternatives)
    }
}
