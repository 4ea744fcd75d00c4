use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// The three parallel tables tracked by the planner. Lane columns are kept
/// identical and identically ordered across all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Trailers actually used, one row per completed cycle.
    Loaded,
    /// Forecast trailer requirement for the next cycle.
    Planned,
    /// Signed variance between Planned and Loaded for a cycle.
    AddedUnused,
}

impl TableKind {
    /// All three tables in the order structural operations visit them.
    pub const ALL: [TableKind; 3] = [TableKind::Loaded, TableKind::Planned, TableKind::AddedUnused];
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Loaded => write!(f, "loaded"),
            TableKind::Planned => write!(f, "planned"),
            TableKind::AddedUnused => write!(f, "added_unused"),
        }
    }
}

/// Coerces a stored cell into a trailer count.
///
/// Historic sheets carry decimal artifacts such as `"5.0"` from earlier
/// tooling, and trailing lanes may have blank cells; both must survive a
/// reporting pass. Blank cells count as zero, floats are floored, and
/// anything else is a [`ReportError::CorruptHistory`].
pub fn parse_cell_count(raw: &str) -> std::result::Result<i64, ReportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    trimmed
        .parse::<f64>()
        .map(|value| value.floor() as i64)
        .map_err(|_| ReportError::CorruptHistory {
            value: trimmed.to_string(),
        })
}
