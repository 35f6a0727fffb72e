//! # coursemap
//!
//! A requisite expression engine for academic course planning.
//!
//! Free-text prerequisite, corequisite, and exclusion strings scraped from a
//! course calendar are repaired, parsed into boolean expression trees, and
//! attached to a course graph. The resolver then answers the planning
//! question: which minimal combinations of courses satisfy a target course's
//! requirements, given already-completed courses, declared exclusions, and a
//! credit budget.
//!
//! The crate is split into two layers:
//! - [`requisite`]: the expression engine (normalizer, tokenizer, parser,
//!   AST/evaluator, display tree).
//! - [`catalog`]: the course registry (codes, graph, loader, pathway
//!   resolver).
//!
//! Scraping, spreadsheet I/O, interactive consoles, and chart rendering are
//! external collaborators; they feed records in and consume pathway lists or
//! display trees out.

pub mod catalog;
pub mod requisite;
