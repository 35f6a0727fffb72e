//! Pathways: concrete satisfying course combinations
//!
//! A [`Pathway`] is one unordered, duplicate-free set of course codes that
//! jointly satisfies a requirement, with a credit cost derived from the
//! codes themselves. A [`PathwaySet`] is the per-query collection:
//! de-duplicated, dominance-pruned, and (for the budgeted query) ordered by
//! ascending cost.
//!
//! Dominance pruning keeps only subset-minimal pathways: if `{A}` already
//! satisfies the requirement, `{A, B}` is noise and is discarded.

use crate::catalog::code::CourseCode;
use std::collections::BTreeSet;
use std::fmt;

/// One concrete combination of courses satisfying a requirement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pathway(BTreeSet<CourseCode>);

impl Pathway {
    pub fn new() -> Pathway {
        Pathway(BTreeSet::new())
    }

    pub fn single(code: CourseCode) -> Pathway {
        Pathway(BTreeSet::from([code]))
    }

    /// The pathway containing every course of `self` and `other`.
    pub fn union(&self, other: &Pathway) -> Pathway {
        Pathway(self.0.union(&other.0).cloned().collect())
    }

    /// `self` with every course in `completed` removed.
    pub fn without(&self, completed: &BTreeSet<CourseCode>) -> Pathway {
        Pathway(self.0.difference(completed).cloned().collect())
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.0.contains(code)
    }

    /// Whether any course of this pathway appears in `codes`.
    pub fn intersects(&self, codes: &BTreeSet<CourseCode>) -> bool {
        self.0.iter().any(|code| codes.contains(code))
    }

    pub fn is_subset(&self, other: &Pathway) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Strict subset: contained in `other` and smaller.
    pub fn is_strict_subset(&self, other: &Pathway) -> bool {
        self.0.len() < other.0.len() && self.0.is_subset(&other.0)
    }

    /// Total credit cost: the sum of each course's credit weight.
    pub fn cost(&self) -> f64 {
        self.0.iter().map(CourseCode::credit).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CourseCode> for Pathway {
    fn from_iter<I: IntoIterator<Item = CourseCode>>(iter: I) -> Pathway {
        Pathway(iter.into_iter().collect())
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.0.iter().map(CourseCode::as_str).collect();
        write!(f, "{{{}}}", codes.join(", "))
    }
}

/// A de-duplicated, dominance-pruned collection of pathways.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathwaySet {
    pathways: Vec<Pathway>,
}

impl PathwaySet {
    /// Build a set from raw evaluator output: drop duplicates, then drop
    /// every pathway that is a strict superset of another surviving pathway.
    /// First-occurrence order of the survivors is preserved.
    pub fn minimal(raw: Vec<Pathway>) -> PathwaySet {
        let mut unique: Vec<Pathway> = Vec::with_capacity(raw.len());
        for pathway in raw {
            if !unique.contains(&pathway) {
                unique.push(pathway);
            }
        }
        let pathways = unique
            .iter()
            .filter(|p| !unique.iter().any(|q| q.is_strict_subset(p)))
            .cloned()
            .collect();
        PathwaySet { pathways }
    }

    /// Order by ascending credit cost (stable, so equal-cost pathways keep
    /// their relative order and are all retained) and drop everything over
    /// `credit_budget`.
    pub fn ranked_within(mut self, credit_budget: f64) -> PathwaySet {
        self.pathways
            .sort_by(|a, b| a.cost().total_cmp(&b.cost()));
        self.pathways.retain(|p| p.cost() <= credit_budget);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pathway> {
        self.pathways.iter()
    }

    pub fn as_slice(&self) -> &[Pathway] {
        &self.pathways
    }

    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    pub fn into_vec(self) -> Vec<Pathway> {
        self.pathways
    }
}

impl IntoIterator for PathwaySet {
    type Item = Pathway;
    type IntoIter = std::vec::IntoIter<Pathway>;

    fn into_iter(self) -> Self::IntoIter {
        self.pathways.into_iter()
    }
}
