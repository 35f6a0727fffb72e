//! Normalizer for raw requisite text
//!
//! Free-text extraction leaves requisite strings with unbalanced brackets,
//! duplicated separators, and lost delimiters. This module repairs them into
//! the clean alphabet the parser expects: course-code characters plus
//! `(` `)` `,` `/`.
//!
//! The repair is a pipeline of passes, in order:
//! 1. Lost-delimiter restoration: a whitespace run between a digit and a
//!    following letter marks two adjacent course codes whose separator was
//!    dropped; an explicit comma is inserted. All other whitespace is
//!    deleted.
//! 2. Bracket balancing in two linear passes: forward, dropping any `)` that
//!    would drive the open count negative; then over the reversed string,
//!    dropping orphan `(` the same way. This guarantees balance without
//!    reordering any character.
//! 3. Separator/empty-group reduction to a fixed point: runs of separators
//!    collapse to their first member, separators with an empty operand
//!    against a bracket boundary are dropped, and bracket pairs left empty
//!    are stripped (stripping an inner pair may empty an outer one, so the
//!    reduction iterates).
//! 4. Leading and trailing separators are trimmed.
//!
//! The result is idempotent: normalizing already-normalized input returns it
//! unchanged. An all-separator input normalizes to the empty string, which
//! the parser reports as "no requirement".

use crate::requisite::error::NormalizeError;

/// Upper bound on reduction passes. Every pass strictly shrinks the string,
/// so the loop terminates long before this for any realistic input.
const MAX_REDUCTION_PASSES: usize = 128;

/// Normalize a raw requisite string.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let delimited = restore_lost_delimiters(raw);
    let balanced = drop_orphan_openers(&drop_orphan_closers(&delimited));
    let reduced = reduce_to_fixed_point(&balanced)?;
    Ok(reduced.trim_matches(is_separator).to_string())
}

pub(crate) fn is_separator(c: char) -> bool {
    c == ',' || c == '/'
}

/// Replace a whitespace run between a digit and a following letter with a
/// comma; delete all other whitespace.
///
/// A digit-then-letter boundary is where two adjacent course codes meet
/// (codes end in a digit and start with a letter), so a space there is a
/// delimiter that fell out during extraction. Catalog rows that lose a
/// delimiter between codes enumerate required courses, hence the comma.
fn restore_lost_delimiters(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            out.push(c);
            continue;
        }
        while chars.peek().is_some_and(|next| next.is_whitespace()) {
            chars.next();
        }
        let before_digit = out.chars().last().is_some_and(|p| p.is_ascii_digit());
        let after_letter = chars.peek().is_some_and(|n| n.is_ascii_alphabetic());
        if before_digit && after_letter {
            out.push(',');
        }
    }
    out
}

/// Forward balancing pass: drop every `)` that has no matching `(` before it.
fn drop_orphan_closers(s: &str) -> String {
    let mut open_count = 0u32;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' => open_count += 1,
            ')' => {
                if open_count == 0 {
                    continue;
                }
                open_count -= 1;
            }
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Reversed balancing pass: drop every `(` that has no matching `)` after it.
///
/// Runs the same automaton as [`drop_orphan_closers`] over the reversed
/// string with the bracket roles swapped.
fn drop_orphan_openers(s: &str) -> String {
    let mut close_count = 0u32;
    let mut kept: Vec<char> = Vec::with_capacity(s.len());
    for c in s.chars().rev() {
        match c {
            ')' => close_count += 1,
            '(' => {
                if close_count == 0 {
                    continue;
                }
                close_count -= 1;
            }
            _ => {}
        }
        kept.push(c);
    }
    kept.into_iter().rev().collect()
}

/// One reduction pass: collapse separator runs to their first member, drop
/// separators with an empty operand at a bracket boundary, and strip empty
/// bracket pairs.
fn reduce_once(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if is_separator(c) {
            match out.chars().last() {
                // a run of separators keeps only its first member
                Some(prev) if is_separator(prev) => continue,
                // empty operand to the left
                Some('(') | None => continue,
                _ => out.push(c),
            }
        } else {
            if c == ')' {
                // separator directly before a closer has no right operand
                if out.ends_with(is_separator) {
                    out.pop();
                }
                // stripping `()` may leave a fresh empty pair for the next pass
                if out.ends_with('(') {
                    out.pop();
                    continue;
                }
            }
            out.push(c);
        }
    }
    out
}

/// Iterate [`reduce_once`] until the string stops changing.
///
/// Stripping an empty pair can expose a new separator run (`A,(),B` becomes
/// `A,,B`) or empty an enclosing pair, so a single pass is not enough. Each
/// pass either shrinks the string or is the identity, which bounds the loop;
/// the explicit pass budget guards the invariant.
fn reduce_to_fixed_point(s: &str) -> Result<String, NormalizeError> {
    let mut current = s.to_string();
    for _ in 0..MAX_REDUCTION_PASSES {
        let next = reduce_once(&current);
        if next == current {
            return Ok(current);
        }
        current = next;
    }
    Err(NormalizeError::Ambiguity(MAX_REDUCTION_PASSES))
}
