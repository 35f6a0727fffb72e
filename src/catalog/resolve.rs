//! Pathway resolver
//!
//! Composes evaluator output across a course's clauses, prunes infeasible
//! and dominated combinations, and ranks survivors by credit cost. These
//! two queries are the engine's entire data API:
//!
//! - [`CourseGraph::all_prerequisite_pathways`]: every subset-minimal
//!   combination satisfying the course's requirement.
//! - [`CourseGraph::prerequisite_pathways`]: the same, further constrained
//!   by completed courses, courses to avoid, and a credit budget.
//!
//! Errors (`UnknownCourse`) signal a data or programming defect and
//! propagate with no retry; a failed call never returns partial results.

use crate::catalog::code::CourseCode;
use crate::catalog::graph::{CourseGraph, GraphError};
use crate::catalog::pathway::{Pathway, PathwaySet};
use std::collections::BTreeSet;

impl CourseGraph {
    /// Every minimal combination of courses satisfying `code`'s
    /// requirement.
    ///
    /// The course's clause conjunction is expanded, any pathway containing
    /// two courses that mutually declare each other excluded is discarded,
    /// and the rest is dominance-pruned to subset-minimal combinations. A
    /// course with no attached clauses yields an empty set: nothing is
    /// required.
    pub fn all_prerequisite_pathways(&self, code: &CourseCode) -> Result<PathwaySet, GraphError> {
        let course = self.course(code)?;
        let feasible: Vec<Pathway> = course
            .requirement_pathways()
            .into_iter()
            .filter(|pathway| !self.contains_mutual_exclusion(pathway))
            .collect();
        Ok(PathwaySet::minimal(feasible))
    }

    /// The ranked pathways still open to a student.
    ///
    /// Starting from [`Self::all_prerequisite_pathways`]:
    /// 1. pathways touching `excluded` are discarded;
    /// 2. courses already in `completed` are removed from each survivor;
    /// 3. pathways touching anything excluded by a completed course are
    ///    discarded;
    /// 4. the trimmed pathways are dominance-pruned again;
    /// 5. survivors are ordered by ascending credit cost and cut at
    ///    `credit_budget`, retaining every tie.
    pub fn prerequisite_pathways(
        &self,
        code: &CourseCode,
        completed: &BTreeSet<CourseCode>,
        excluded: &BTreeSet<CourseCode>,
        credit_budget: f64,
    ) -> Result<PathwaySet, GraphError> {
        let all = self.all_prerequisite_pathways(code)?;
        let completed_exclusions = self.exclusions_declared_by(completed);

        let mut trimmed: Vec<Pathway> = Vec::with_capacity(all.len());
        for pathway in all {
            if pathway.intersects(excluded) {
                continue;
            }
            let remaining = pathway.without(completed);
            if remaining.intersects(&completed_exclusions) {
                continue;
            }
            trimmed.push(remaining);
        }
        Ok(PathwaySet::minimal(trimmed).ranked_within(credit_budget))
    }

    /// Union of the exclusion sets declared by the given courses. Codes
    /// outside the registry declare nothing.
    fn exclusions_declared_by(&self, codes: &BTreeSet<CourseCode>) -> BTreeSet<CourseCode> {
        let mut out = BTreeSet::new();
        for code in codes {
            if let Ok(course) = self.course(code) {
                out.extend(course.exclusions().iter().cloned());
            }
        }
        out
    }

    /// Whether the pathway contains a pair of mutually declared exclusions.
    fn contains_mutual_exclusion(&self, pathway: &Pathway) -> bool {
        let codes: Vec<&CourseCode> = pathway.iter().collect();
        codes.iter().enumerate().any(|(i, a)| {
            codes[i + 1..]
                .iter()
                .any(|b| self.mutually_excluded(a, b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requisite::parse_requisite;

    fn code(s: &str) -> CourseCode {
        CourseCode::parse(s).unwrap()
    }

    fn codes(list: &[&str]) -> BTreeSet<CourseCode> {
        list.iter().map(|c| code(c)).collect()
    }

    fn pathway(list: &[&str]) -> Pathway {
        list.iter().map(|c| code(c)).collect()
    }

    /// MAT237Y1 requires ((MAT135H1 and MAT136H1) or MAT137Y1 or MAT157Y1)
    /// and (MAT223H1 or MAT240H1), attached as two clauses.
    fn calculus_graph() -> CourseGraph {
        let mut graph = CourseGraph::new();
        for c in [
            "MAT237Y1", "MAT135H1", "MAT136H1", "MAT137Y1", "MAT157Y1", "MAT223H1", "MAT240H1",
        ] {
            graph.add_course(code(c));
        }
        for clause_text in ["(MAT135H1,MAT136H1)/MAT137Y1/MAT157Y1", "MAT223H1/MAT240H1"] {
            let clause = parse_requisite(clause_text).unwrap().unwrap();
            graph
                .attach_prerequisite_clause(&code("MAT237Y1"), clause)
                .unwrap();
        }
        graph
    }

    #[test]
    fn test_clause_composition_is_cartesian() {
        let graph = calculus_graph();
        let set = graph.all_prerequisite_pathways(&code("MAT237Y1")).unwrap();
        assert_eq!(set.len(), 6);
        assert!(set
            .iter()
            .any(|p| *p == pathway(&["MAT135H1", "MAT136H1", "MAT223H1"])));
        assert!(set.iter().any(|p| *p == pathway(&["MAT137Y1", "MAT240H1"])));
    }

    #[test]
    fn test_no_requirement_yields_empty_set() {
        let graph = calculus_graph();
        let set = graph.all_prerequisite_pathways(&code("MAT135H1")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_course_fails() {
        let graph = calculus_graph();
        assert_eq!(
            graph
                .all_prerequisite_pathways(&code("CSC111H1"))
                .unwrap_err(),
            GraphError::UnknownCourse(code("CSC111H1"))
        );
    }

    #[test]
    fn test_mutual_exclusion_discards_pathway() {
        let mut graph = calculus_graph();
        graph
            .add_exclusion(&code("MAT135H1"), [code("MAT223H1")])
            .unwrap();
        graph
            .add_exclusion(&code("MAT223H1"), [code("MAT135H1")])
            .unwrap();
        let set = graph.all_prerequisite_pathways(&code("MAT237Y1")).unwrap();
        assert_eq!(set.len(), 5);
        assert!(!set
            .iter()
            .any(|p| p.contains(&code("MAT135H1")) && p.contains(&code("MAT223H1"))));
    }

    #[test]
    fn test_one_sided_exclusion_is_kept() {
        let mut graph = calculus_graph();
        graph
            .add_exclusion(&code("MAT135H1"), [code("MAT223H1")])
            .unwrap();
        let set = graph.all_prerequisite_pathways(&code("MAT237Y1")).unwrap();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_completed_courses_shrink_pathways() {
        let graph = calculus_graph();
        let set = graph
            .prerequisite_pathways(
                &code("MAT237Y1"),
                &codes(&["MAT135H1"]),
                &BTreeSet::new(),
                20.0,
            )
            .unwrap();
        assert!(set
            .iter()
            .any(|p| *p == pathway(&["MAT136H1", "MAT223H1"])));
    }

    #[test]
    fn test_excluded_courses_discard_pathways() {
        let graph = calculus_graph();
        let set = graph
            .prerequisite_pathways(
                &code("MAT237Y1"),
                &BTreeSet::new(),
                &codes(&["MAT137Y1", "MAT157Y1"]),
                20.0,
            )
            .unwrap();
        // only the (MAT135H1, MAT136H1) branch survives
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|p| p.contains(&code("MAT135H1"))));
    }

    #[test]
    fn test_completed_exclusions_discard_pathways() {
        let mut graph = calculus_graph();
        // taking MAT137Y1 closed off MAT135H1
        graph
            .add_exclusion(&code("MAT137Y1"), [code("MAT135H1")])
            .unwrap();
        let set = graph
            .prerequisite_pathways(
                &code("MAT237Y1"),
                &codes(&["MAT137Y1"]),
                &BTreeSet::new(),
                20.0,
            )
            .unwrap();
        assert!(!set.iter().any(|p| p.contains(&code("MAT135H1"))));
        // the MAT137Y1 branch itself reduced to just the linear algebra half
        assert!(set.iter().any(|p| *p == pathway(&["MAT223H1"])));
    }

    #[test]
    fn test_completion_triggers_second_dominance_pass() {
        let graph = calculus_graph();
        // completing MAT137Y1 collapses its branch to {MAT223H1} and
        // {MAT240H1}, which then dominate the untouched longer branches
        let set = graph
            .prerequisite_pathways(
                &code("MAT237Y1"),
                &codes(&["MAT137Y1"]),
                &BTreeSet::new(),
                20.0,
            )
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.iter().any(|p| *p == pathway(&["MAT223H1"])));
        assert!(set.iter().any(|p| *p == pathway(&["MAT240H1"])));
    }

    #[test]
    fn test_budget_cuts_and_orders_by_cost() {
        let graph = calculus_graph();
        let all = graph
            .prerequisite_pathways(&code("MAT237Y1"), &BTreeSet::new(), &BTreeSet::new(), 20.0)
            .unwrap();
        assert_eq!(all.len(), 6);
        let costs: Vec<f64> = all.iter().map(Pathway::cost).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));

        // {MAT135H1, MAT136H1, MAT223H1} and the three other half-credit
        // mixes cost 1.5; the full-year branches cost 1.5 too, so tighten
        // the budget below that to empty the set
        let tight = graph
            .prerequisite_pathways(&code("MAT237Y1"), &BTreeSet::new(), &BTreeSet::new(), 1.0)
            .unwrap();
        assert!(tight.is_empty());
    }

    #[test]
    fn test_budget_boundary_is_inclusive() {
        let graph = calculus_graph();
        let set = graph
            .prerequisite_pathways(&code("MAT237Y1"), &BTreeSet::new(), &BTreeSet::new(), 1.5)
            .unwrap();
        assert_eq!(set.len(), 6);
    }
}
