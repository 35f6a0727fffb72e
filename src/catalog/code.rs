//! Course code identifiers
//!
//! A course code has a fixed 8-character layout: three uppercase letters
//! (subject), three digits (number), a session marker (`Y` full-year, `H`
//! half-year), and a campus digit. The session marker determines the credit
//! weight of the course, so the weight is derivable from the code alone
//! without a registry lookup.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

static CODE_LAYOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9]{3}[HY][01]$").expect("course code layout regex"));

/// Byte offset of the session marker within a code.
const SESSION_MARKER: usize = 6;

/// A raw token that does not follow the course code layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a valid course code")]
pub struct InvalidCode(pub String);

/// A validated course code, e.g. `MAT137Y1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    /// Validate a raw token against the fixed code layout.
    pub fn parse(raw: &str) -> Result<CourseCode, InvalidCode> {
        if CODE_LAYOUT.is_match(raw) {
            Ok(CourseCode(raw.to_string()))
        } else {
            Err(InvalidCode(raw.to_string()))
        }
    }

    /// The credit weight of this course: 1.0 for a full-year course (`Y`
    /// session marker), 0.5 for a half-year course (`H`).
    pub fn credit(&self) -> f64 {
        if self.0.as_bytes()[SESSION_MARKER] == b'Y' {
            1.0
        } else {
            0.5
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_layouts() {
        assert!(CourseCode::parse("MAT137Y1").is_ok());
        assert!(CourseCode::parse("CSC111H1").is_ok());
        assert!(CourseCode::parse("STA237H0").is_ok());
    }

    #[test]
    fn test_invalid_layouts() {
        // wrong length
        assert!(CourseCode::parse("MAT137").is_err());
        // lowercase subject
        assert!(CourseCode::parse("mat137Y1").is_err());
        // bad session marker
        assert!(CourseCode::parse("MAT137X1").is_err());
        // bad campus digit
        assert!(CourseCode::parse("MAT137Y2").is_err());
        assert!(CourseCode::parse("").is_err());
    }

    #[test]
    fn test_credit_weight_from_session_marker() {
        let full_year = CourseCode::parse("MAT137Y1").unwrap();
        let half_year = CourseCode::parse("MAT135H1").unwrap();
        assert_eq!(full_year.credit(), 1.0);
        assert_eq!(half_year.credit(), 0.5);
    }
}
