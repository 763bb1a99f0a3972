//! Display status of a single path on one side of a comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DiffReport;

/// Which tree a path is being displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// How a path should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// Present on both sides with equal content.
    Matched,
    /// Present only on the side being displayed.
    Extra,
    /// Present on both sides with differing content.
    Different,
    /// No report, or the path is in no category for this side.
    Neutral,
}

impl DiffStatus {
    /// Returns the lowercase name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Matched => "matched",
            DiffStatus::Extra => "extra",
            DiffStatus::Different => "different",
            DiffStatus::Neutral => "neutral",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Resolves the display status of `path` on `side`.
///
/// Categories are checked in the order matched, different, then the side's
/// own only-set, so overlapping sets resolve deterministically.
pub fn resolve_status(path: &str, report: Option<&DiffReport>, side: Side) -> DiffStatus {
    let Some(report) = report else {
        return DiffStatus::Neutral;
    };

    if report.matched().contains(path) {
        return DiffStatus::Matched;
    }
    if report.different().contains(path) {
        return DiffStatus::Different;
    }
    let only = match side {
        Side::Left => report.left_only(),
        Side::Right => report.right_only(),
    };
    if only.contains(path) {
        return DiffStatus::Extra;
    }
    DiffStatus::Neutral
}
