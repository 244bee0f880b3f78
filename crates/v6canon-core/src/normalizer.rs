//! Canonical normalizer — converts expanded IPv6 text to its compressed form
//!
//! The normalizer turns eight hexadecimal groups into the one textual form
//! used for display, comparison and storage.
//!
//! # Pipeline
//!
//! `address text → parse → suppress each group → select zero run → compress`
//!
//! # Guarantees
//!
//! - **Idempotent**: `suppress(suppress(g)) == suppress(g)`
//! - **Deterministic**: same input always produces same output
//! - **Unique**: the longest zero run wins, the leftmost one on a tie

use serde::{Deserialize, Serialize};

use crate::parser::{self, GROUP_COUNT};
use crate::Result;

/// Canonical text of an all-zero group
const ZERO_GROUP: &str = "0";

/// Shortest run of zero groups that may be elided with `::`
const MIN_ELIDED_RUN: usize = 2;

/// A maximal run of consecutive `"0"` groups, `[start, start + len)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZeroRun {
    pub start: usize,
    pub len: usize,
}

impl ZeroRun {
    /// One past the last group of the run
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

// ── Public API ─────────────────────────────────────────────

/// Simplify address text to its canonical compressed form
///
/// Pipeline: parse → suppress leading zeros → compress longest zero run
///
/// # Errors
/// Returns `InvalidAddressFormat` if the text is not eight groups of 1-4
/// hex digits.
///
/// # Example
/// ```
/// use v6canon_core::normalizer::simplify;
///
/// assert_eq!(
///     simplify("1111:2222:0000:0000:5555:0000:0000:0000").unwrap(),
///     "1111:2222:0:0:5555::"
/// );
/// ```
pub fn simplify(address: &str) -> Result<String> {
    let address = parser::parse(address)?;
    Ok(simplify_groups(address.groups()))
}

/// Simplify already-split groups (both stages)
pub fn simplify_groups(groups: &[String; GROUP_COUNT]) -> String {
    let suppressed: [String; GROUP_COUNT] = std::array::from_fn(|i| suppress(&groups[i]));
    compress(&suppressed)
}

/// Strip leading zeros from one group, keeping at least one digit
///
/// Output is lower-cased. An all-zero group becomes `"0"`.
pub fn suppress(group: &str) -> String {
    let trimmed = group.trim_start_matches('0');
    if trimmed.is_empty() {
        ZERO_GROUP.to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

/// Join canonical groups, eliding the selected zero run with `::`
pub fn compress(groups: &[String; GROUP_COUNT]) -> String {
    match select_run(groups) {
        Some(run) => {
            let left = groups[..run.start].join(":");
            let right = groups[run.end()..].join(":");
            format!("{}::{}", left, right)
        }
        None => groups.join(":"),
    }
}

/// Every maximal run of `"0"` groups, left to right, including lone zeros
pub fn zero_runs(groups: &[String]) -> Vec<ZeroRun> {
    let mut runs = Vec::new();
    let mut current: Option<ZeroRun> = None;

    for (i, group) in groups.iter().enumerate() {
        if group == ZERO_GROUP {
            current.get_or_insert(ZeroRun { start: i, len: 0 }).len += 1;
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }

    runs
}

/// Pick the run to elide: longest of length ≥ 2, leftmost on a tie
///
/// A later run replaces the best-so-far only when strictly longer, so
/// equal-length runs keep the earliest start.
pub fn select_run(groups: &[String]) -> Option<ZeroRun> {
    let mut best: Option<ZeroRun> = None;

    for run in zero_runs(groups) {
        if run.len < MIN_ELIDED_RUN {
            continue;
        }
        match best {
            Some(b) if b.len >= run.len => {}
            _ => best = Some(run),
        }
    }

    tracing::trace!(?best, "selected zero run");
    best
}
