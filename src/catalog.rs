//! Course catalog layer
//!
//! The registry side of the engine: validated course codes, the course
//! graph, record loading, and the pathway resolver. The graph is mutated
//! only during the sequential load phase and read-only afterwards; the
//! resolver queries are pure functions over it.

pub mod code;
pub mod graph;
pub mod loader;
pub mod pathway;
pub mod resolve;

pub use code::{CourseCode, InvalidCode};
pub use graph::{Course, CourseGraph, GraphError};
pub use loader::{load_catalog, load_catalog_json, CourseRecord, LoadWarning};
pub use pathway::{Pathway, PathwaySet};
