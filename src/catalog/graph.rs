//! Course graph
//!
//! A registry of course vertices keyed by course code. Relations between
//! courses (exclusions, corequisites, dependents) are stored as code sets,
//! never as owning references, so the graph may freely contain cycles
//! across courses while each attached expression tree stays finite and
//! acyclic on its own.
//!
//! Vertices are created once during a sequential load phase and persist for
//! the graph's lifetime; nothing is ever deleted. Every mutation validates
//! all referenced codes up front and only then writes, so a failed call
//! leaves the graph untouched.

use crate::catalog::code::CourseCode;
use crate::catalog::pathway::Pathway;
use crate::requisite::ast::{self, Expr};
use crate::requisite::tree::DisplayTree;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised by graph mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A referenced course code is not registered in the graph.
    #[error("unknown course code {0}")]
    UnknownCourse(CourseCode),
}

/// A course vertex: its code, attached requirement clauses, and relation
/// sets.
#[derive(Debug, Clone)]
pub struct Course {
    code: CourseCode,
    clauses: Vec<Expr>,
    exclusions: BTreeSet<CourseCode>,
    corequisites: BTreeSet<CourseCode>,
    dependents: BTreeSet<CourseCode>,
}

impl Course {
    fn new(code: CourseCode) -> Course {
        Course {
            code,
            clauses: Vec::new(),
            exclusions: BTreeSet::new(),
            corequisites: BTreeSet::new(),
            dependents: BTreeSet::new(),
        }
    }

    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    /// The independently attached prerequisite clauses; the full
    /// requirement is their conjunction.
    pub fn clauses(&self) -> &[Expr] {
        &self.clauses
    }

    pub fn exclusions(&self) -> &BTreeSet<CourseCode> {
        &self.exclusions
    }

    pub fn corequisites(&self) -> &BTreeSet<CourseCode> {
        &self.corequisites
    }

    pub fn dependents(&self) -> &BTreeSet<CourseCode> {
        &self.dependents
    }

    /// Whether this course declares `other` excluded. One-directional; see
    /// [`CourseGraph::mutually_excluded`] for the symmetric check.
    pub fn excludes(&self, other: &CourseCode) -> bool {
        self.exclusions.contains(other)
    }

    /// Expand the full requirement into raw satisfying pathways. Empty for
    /// a course with no attached clauses.
    pub fn requirement_pathways(&self) -> Vec<Pathway> {
        ast::evaluate_all(&self.clauses)
    }

    /// The display tree of this course's requirement.
    pub fn display_tree(&self) -> DisplayTree {
        DisplayTree::for_requirement(&self.code, &self.clauses)
    }
}

/// The course registry. One vertex per code, globally unique.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: BTreeMap<CourseCode, Course>,
}

impl CourseGraph {
    pub fn new() -> CourseGraph {
        CourseGraph::default()
    }

    /// Register a vertex. Idempotent: re-adding an existing code keeps the
    /// existing vertex and everything attached to it.
    pub fn add_course(&mut self, code: CourseCode) {
        self.courses
            .entry(code.clone())
            .or_insert_with(|| Course::new(code));
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.courses.contains_key(code)
    }

    pub fn course(&self, code: &CourseCode) -> Result<&Course, GraphError> {
        self.courses
            .get(code)
            .ok_or_else(|| GraphError::UnknownCourse(code.clone()))
    }

    /// All registered codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.courses.keys()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Append one clause to a course's top-level AND list. Multiple calls
    /// model multiple independently declared requirement rows.
    ///
    /// The course and every leaf of the clause must already be registered;
    /// otherwise the call fails with `UnknownCourse` and mutates nothing.
    pub fn attach_prerequisite_clause(
        &mut self,
        code: &CourseCode,
        clause: Expr,
    ) -> Result<(), GraphError> {
        self.require(code)?;
        for leaf in clause.leaves() {
            self.require(&leaf)?;
        }
        self.vertex_mut(code)?.clauses.push(clause);
        Ok(())
    }

    /// Declare courses excluded by `code`. One-directional: the reverse
    /// declaration is not inferred.
    pub fn add_exclusion<I>(&mut self, code: &CourseCode, others: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = CourseCode>,
    {
        let others: Vec<CourseCode> = others.into_iter().collect();
        self.require(code)?;
        for other in &others {
            self.require(other)?;
        }
        self.vertex_mut(code)?.exclusions.extend(others);
        Ok(())
    }

    /// Declare corequisites of `code`. One-directional, like exclusions.
    pub fn add_corequisite<I>(&mut self, code: &CourseCode, others: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = CourseCode>,
    {
        let others: Vec<CourseCode> = others.into_iter().collect();
        self.require(code)?;
        for other in &others {
            self.require(other)?;
        }
        self.vertex_mut(code)?.corequisites.extend(others);
        Ok(())
    }

    /// Record that `dependent` requires `code`: the reverse edge used for
    /// forward traversal from a course to the courses it unlocks.
    pub fn add_dependent(
        &mut self,
        code: &CourseCode,
        dependent: &CourseCode,
    ) -> Result<(), GraphError> {
        self.require(code)?;
        self.require(dependent)?;
        self.vertex_mut(code)?.dependents.insert(dependent.clone());
        Ok(())
    }

    /// The courses that list `code` among their prerequisites.
    pub fn dependents_of(&self, code: &CourseCode) -> Result<&BTreeSet<CourseCode>, GraphError> {
        Ok(self.course(code)?.dependents())
    }

    /// Whether `a` and `b` each declare the other excluded. Both must be
    /// registered; a one-sided declaration is not a mutual exclusion.
    pub fn mutually_excluded(&self, a: &CourseCode, b: &CourseCode) -> bool {
        match (self.courses.get(a), self.courses.get(b)) {
            (Some(course_a), Some(course_b)) => course_a.excludes(b) && course_b.excludes(a),
            _ => false,
        }
    }

    fn require(&self, code: &CourseCode) -> Result<(), GraphError> {
        if self.contains(code) {
            Ok(())
        } else {
            Err(GraphError::UnknownCourse(code.clone()))
        }
    }

    fn vertex_mut(&mut self, code: &CourseCode) -> Result<&mut Course, GraphError> {
        self.courses
            .get_mut(code)
            .ok_or_else(|| GraphError::UnknownCourse(code.clone()))
    }
}
