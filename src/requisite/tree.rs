//! Display tree for the visualization collaborator
//!
//! The layout/rendering side consumes a plain rose tree derived from a
//! course's requirement: one node per course or connective, children being
//! the alternative requirement groups. The singleton-collapse rule matches
//! the parser's, so parse-time and display-time simplification agree: a
//! group of one member renders as that member, never as a one-child `and`
//! or `or` node.

use crate::catalog::code::CourseCode;
use crate::requisite::ast::{BoolOp, Expr};

/// A node of the display tree: a label plus ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTree {
    label: String,
    children: Vec<DisplayTree>,
}

impl DisplayTree {
    /// Build the display tree for a course's full requirement.
    ///
    /// The root carries the course code. No clauses yields a childless
    /// root; one clause hangs directly off it; several clauses hang off a
    /// single `and` node, since the full requirement is their conjunction.
    pub fn for_requirement(root: &CourseCode, clauses: &[Expr]) -> DisplayTree {
        let children = match clauses {
            [] => Vec::new(),
            [clause] => vec![DisplayTree::from_expr(clause)],
            many => vec![DisplayTree {
                label: BoolOp::And.to_string(),
                children: many.iter().map(DisplayTree::from_expr).collect(),
            }],
        };
        DisplayTree {
            label: root.to_string(),
            children,
        }
    }

    fn from_expr(expr: &Expr) -> DisplayTree {
        match expr {
            Expr::Leaf(code) => DisplayTree {
                label: code.to_string(),
                children: Vec::new(),
            },
            // singleton collapse, same as the parser
            Expr::Group(_, children) if children.len() == 1 => {
                DisplayTree::from_expr(&children[0])
            }
            Expr::Group(op, children) => DisplayTree {
                label: op.to_string(),
                children: children.iter().map(DisplayTree::from_expr).collect(),
            },
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[DisplayTree] {
        &self.children
    }

    /// Indented text rendering, two spaces per level. Each node prints
    /// before its descendants.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_indented(0, &mut out);
        out.truncate(out.trim_end().len());
        out
    }

    fn render_indented(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.label);
        out.push('\n');
        for child in &self.children {
            child.render_indented(depth + 1, out);
        }
    }
}
