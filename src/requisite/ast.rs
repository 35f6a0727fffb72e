//! Expression AST and evaluator
//!
//! A requisite expression is a finite, acyclic tree of AND/OR groups over
//! course-code leaves. Evaluation expands a tree into the list of concrete
//! course sets that satisfy it; growth is combinatorial by design, and the
//! engine does not cap it (callers bound expression complexity upstream).

use crate::catalog::code::CourseCode;
use crate::catalog::pathway::Pathway;
use std::collections::BTreeSet;
use std::fmt;

/// The two boolean connectives of the requisite grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// Comma: every member group is required.
    And,
    /// Slash: any one alternative suffices.
    Or,
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => f.write_str("and"),
            BoolOp::Or => f.write_str("or"),
        }
    }
}

/// A node in a requisite expression tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single required course.
    Leaf(CourseCode),
    /// An AND/OR group over ordered children.
    Group(BoolOp, Vec<Expr>),
}

impl Expr {
    /// Expand this expression into every satisfying course combination.
    ///
    /// - `Leaf(c)` yields the one singleton pathway `{c}`.
    /// - An OR group concatenates its children's pathway lists.
    /// - An AND group takes the cartesian product across children, unioning
    ///   course sets pairwise in a left fold.
    /// - A group with no children yields no pathways ("no requirement"); as
    ///   an AND operand it is the identity of the fold rather than an
    ///   annihilator.
    /// - A group with exactly one child evaluates as that child.
    pub fn evaluate(&self) -> Vec<Pathway> {
        match self {
            Expr::Leaf(code) => vec![Pathway::single(code.clone())],
            Expr::Group(BoolOp::Or, children) => {
                children.iter().flat_map(Expr::evaluate).collect()
            }
            Expr::Group(BoolOp::And, children) => children
                .iter()
                .fold(Vec::new(), |acc, child| combine(acc, child.evaluate())),
        }
    }

    /// The set of course codes appearing at the leaves of this expression.
    pub fn leaves(&self) -> BTreeSet<CourseCode> {
        let mut out = BTreeSet::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut BTreeSet<CourseCode>) {
        match self {
            Expr::Leaf(code) => {
                out.insert(code.clone());
            }
            Expr::Group(_, children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Evaluate a top-level AND over independently attached clauses.
///
/// A course's full requirement is the conjunction of every clause attached
/// to it; an empty clause list means nothing is required.
pub fn evaluate_all(clauses: &[Expr]) -> Vec<Pathway> {
    clauses
        .iter()
        .fold(Vec::new(), |acc, clause| combine(acc, clause.evaluate()))
}

/// Cartesian product of two pathway lists under set union.
///
/// An empty side is the identity, not an annihilator: a child with no
/// requirement must not wipe out the combinations already accumulated.
fn combine(lhs: Vec<Pathway>, rhs: Vec<Pathway>) -> Vec<Pathway> {
    if lhs.is_empty() {
        return rhs;
    }
    if rhs.is_empty() {
        return lhs;
    }
    lhs.iter()
        .flat_map(|left| rhs.iter().map(move |right| left.union(right)))
        .collect()
}
