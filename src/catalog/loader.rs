//! Catalog loading
//!
//! Consumes the records produced by the scraping collaborator: one record
//! per course with optional prerequisite/corequisite/exclusion strings. The
//! load is sequential and two-phase: every code is registered first, then
//! requisite fields are normalized, parsed, and attached.
//!
//! Loading degrades gracefully. A field that fails to normalize or parse,
//! or that references a course outside the catalog, is skipped with a
//! warning while its course stays registered with an empty requirement. The
//! graph that comes out is always usable; the warnings say what was lost.

use crate::catalog::code::CourseCode;
use crate::catalog::graph::CourseGraph;
use crate::requisite::ast::Expr;
use crate::requisite::{normalize, parse_requisite};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

/// One scraped catalog row.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    /// 8-character course code.
    pub code: String,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub corequisites: Option<String>,
    #[serde(default)]
    pub exclusion: Option<String>,
}

/// A non-fatal problem encountered while loading one field of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// The course code of the offending record, as written in the record.
    pub code: String,
    /// Which field was skipped.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.code, self.field, self.message)
    }
}

/// Load a catalog from scraped records.
///
/// Never fails as a whole: malformed codes and unparseable fields become
/// warnings. After all clauses are attached, dependent reverse edges are
/// populated from the clause leaves.
pub fn load_catalog(records: &[CourseRecord]) -> (CourseGraph, Vec<LoadWarning>) {
    let mut graph = CourseGraph::new();
    let mut warnings = Vec::new();

    // phase 1: register every vertex so clauses can reference any of them
    let mut registered: Vec<(CourseCode, &CourseRecord)> = Vec::with_capacity(records.len());
    for record in records {
        match CourseCode::parse(&record.code) {
            Ok(code) => {
                graph.add_course(code.clone());
                registered.push((code, record));
            }
            Err(invalid) => warnings.push(LoadWarning {
                code: record.code.clone(),
                field: "code",
                message: invalid.to_string(),
            }),
        }
    }

    // phase 2: attach requisite fields
    for (code, record) in &registered {
        if let Some(raw) = &record.prerequisites {
            match parse_field(raw) {
                Ok(Some(clause)) => {
                    if let Err(err) = graph.attach_prerequisite_clause(code, clause) {
                        warnings.push(warning(code, "prerequisites", err));
                    }
                }
                Ok(None) => {}
                Err(message) => warnings.push(warning(code, "prerequisites", message)),
            }
        }
        if let Some(raw) = &record.corequisites {
            match parse_field(raw) {
                Ok(Some(clause)) => {
                    if let Err(err) = graph.add_corequisite(code, clause.leaves()) {
                        warnings.push(warning(code, "corequisites", err));
                    }
                }
                Ok(None) => {}
                Err(message) => warnings.push(warning(code, "corequisites", message)),
            }
        }
        if let Some(raw) = &record.exclusion {
            match parse_field(raw) {
                Ok(Some(clause)) => {
                    if let Err(err) = graph.add_exclusion(code, clause.leaves()) {
                        warnings.push(warning(code, "exclusion", err));
                    }
                }
                Ok(None) => {}
                Err(message) => warnings.push(warning(code, "exclusion", message)),
            }
        }
    }

    // phase 3: reverse edges, now that every clause is in place
    let mut reverse_edges: Vec<(CourseCode, CourseCode)> = Vec::new();
    for code in graph.codes() {
        if let Ok(course) = graph.course(code) {
            let mut leaves = BTreeSet::new();
            for clause in course.clauses() {
                leaves.extend(clause.leaves());
            }
            for leaf in leaves {
                reverse_edges.push((leaf, code.clone()));
            }
        }
    }
    for (prerequisite, dependent) in reverse_edges {
        // both ends were validated when the clause was attached
        let _ = graph.add_dependent(&prerequisite, &dependent);
    }

    (graph, warnings)
}

/// Load a catalog from a JSON array of records.
pub fn load_catalog_json(json: &str) -> Result<(CourseGraph, Vec<LoadWarning>), serde_json::Error> {
    let records: Vec<CourseRecord> = serde_json::from_str(json)?;
    Ok(load_catalog(&records))
}

/// Normalize and parse one requisite field. `Ok(None)` means the field is
/// empty after repair: a valid "no requirement".
fn parse_field(raw: &str) -> Result<Option<Expr>, String> {
    let cleaned = normalize(raw).map_err(|e| e.to_string())?;
    parse_requisite(&cleaned).map_err(|e| e.to_string())
}

fn warning(code: &CourseCode, field: &'static str, message: impl ToString) -> LoadWarning {
    LoadWarning {
        code: code.to_string(),
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CourseCode {
        CourseCode::parse(s).unwrap()
    }

    fn record(code: &str, prerequisites: Option<&str>) -> CourseRecord {
        CourseRecord {
            code: code.to_string(),
            prerequisites: prerequisites.map(String::from),
            corequisites: None,
            exclusion: None,
        }
    }

    #[test]
    fn test_two_phase_load_allows_forward_references() {
        // MAT136H1's prerequisite appears later in the record list
        let records = [
            record("MAT136H1", Some("MAT135H1")),
            record("MAT135H1", None),
        ];
        let (graph, warnings) = load_catalog(&records);
        assert!(warnings.is_empty());
        assert_eq!(graph.course(&code("MAT136H1")).unwrap().clauses().len(), 1);
    }

    #[test]
    fn test_malformed_code_is_skipped_with_warning() {
        let records = [record("MAT13", None), record("MAT135H1", None)];
        let (graph, warnings) = load_catalog(&records);
        assert_eq!(graph.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "code");
    }

    #[test]
    fn test_bad_field_keeps_vertex_with_empty_requirement() {
        let records = [record("MAT136H1", Some("MAT135H1/;;garbage"))];
        let (graph, warnings) = load_catalog(&records);
        let course = graph.course(&code("MAT136H1")).unwrap();
        assert!(course.clauses().is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "prerequisites");
    }

    #[test]
    fn test_out_of_catalog_reference_is_a_warning() {
        let records = [record("MAT237Y1", Some("MAT137Y1"))];
        let (graph, warnings) = load_catalog(&records);
        assert!(graph
            .course(&code("MAT237Y1"))
            .unwrap()
            .clauses()
            .is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("MAT137Y1"));
    }

    #[test]
    fn test_empty_field_is_not_a_warning() {
        let records = [record("MAT135H1", Some("  ,, ()"))];
        let (_, warnings) = load_catalog(&records);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_requisite_fields_populate_relation_sets() {
        let records = [
            CourseRecord {
                code: "MAT237Y1".to_string(),
                prerequisites: Some("MAT137Y1".to_string()),
                corequisites: Some("MAT223H1".to_string()),
                exclusion: Some("MAT257Y1".to_string()),
            },
            record("MAT137Y1", None),
            record("MAT223H1", None),
            record("MAT257Y1", None),
        ];
        let (graph, warnings) = load_catalog(&records);
        assert!(warnings.is_empty());
        let course = graph.course(&code("MAT237Y1")).unwrap();
        assert!(course.corequisites().contains(&code("MAT223H1")));
        assert!(course.excludes(&code("MAT257Y1")));
    }

    #[test]
    fn test_dependents_populated_from_clause_leaves() {
        let records = [
            record("MAT237Y1", Some("MAT135H1/MAT137Y1")),
            record("MAT135H1", None),
            record("MAT136H1", Some("MAT135H1")),
            record("MAT137Y1", None),
        ];
        let (graph, warnings) = load_catalog(&records);
        assert!(warnings.is_empty());
        let dependents = graph.dependents_of(&code("MAT135H1")).unwrap();
        assert!(dependents.contains(&code("MAT237Y1")));
        assert!(dependents.contains(&code("MAT136H1")));
        assert!(graph
            .dependents_of(&code("MAT137Y1"))
            .unwrap()
            .contains(&code("MAT237Y1")));
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"[
            {"code": "MAT135H1"},
            {"code": "MAT136H1", "prerequisites": "MAT135H1"}
        ]"#;
        let (graph, warnings) = load_catalog_json(json).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(graph.len(), 2);
    }
}
