//! Reduces AddedUnused history into unused-trailer counts and cost.
//!
//! Only strictly positive variance cells count: those are trailers that were
//! ordered and paid for but never loaded. Zero and negative cells (exact
//! match, same-day top-ups) carry no cancellation charge.

use tracing::instrument;

use crate::config::PlannerConfig;
use crate::error::{ReportError, Result};
use crate::store::TabularStore;
use crate::table::{TableKind, parse_cell_count};

/// An unused-trailer aggregate: how many trailers went unused and what they
/// cost at the given per-trailer charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostSummary {
    pub unused: i64,
    pub cost: i64,
}

/// Reduces the full AddedUnused history (heading row excluded) at the given
/// charge.
pub fn unused_cost(rows: &[Vec<String>], charge: i64) -> std::result::Result<CostSummary, ReportError> {
    let mut unused = 0;
    for row in rows.iter().skip(1) {
        unused += row_unused(row)?;
    }
    Ok(CostSummary {
        unused,
        cost: unused * charge,
    })
}

/// Reduces only the most recent AddedUnused row at the given charge.
pub fn unused_cost_recent(
    row: &[String],
    charge: i64,
) -> std::result::Result<CostSummary, ReportError> {
    let unused = row_unused(row)?;
    Ok(CostSummary {
        unused,
        cost: unused * charge,
    })
}

fn row_unused(row: &[String]) -> std::result::Result<i64, ReportError> {
    let mut total = 0;
    for cell in row {
        let value = parse_cell_count(cell)?;
        if value > 0 {
            total += value;
        }
    }
    Ok(total)
}

/// Historical and latest-cycle aggregates, computed independently so a
/// corrupt cell in one does not suppress the other.
#[derive(Debug)]
pub struct UnusedReport {
    pub historical: std::result::Result<CostSummary, ReportError>,
    pub recent: Option<std::result::Result<CostSummary, ReportError>>,
}

/// Builds the unused-trailer report from the store.
#[instrument(level = "info", skip(store, config))]
pub fn build_report<S: TabularStore>(
    store: &S,
    config: &PlannerConfig,
    charge: i64,
) -> Result<UnusedReport> {
    let rows = store.get_all_rows(config.sheet(TableKind::AddedUnused))?;
    let historical = unused_cost(&rows, charge);
    let recent = rows
        .iter()
        .skip(1)
        .last()
        .map(|row| unused_cost_recent(row, charge));
    Ok(UnusedReport { historical, recent })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(rows: &[&[i64]]) -> Vec<Vec<String>> {
        let mut all = vec![vec!["east".to_string(), "west".to_string()]];
        all.extend(
            rows.iter()
                .map(|row| row.iter().map(|value| value.to_string()).collect()),
        );
        all
    }

    #[test]
    fn only_positive_variance_is_charged() {
        let rows = history(&[&[-2, 5], &[3, -1]]);
        let summary = unused_cost(&rows, 100).unwrap();
        assert_eq!(summary, CostSummary { unused: 8, cost: 800 });
    }

    #[test]
    fn recent_row_is_charged_alone() {
        let row: Vec<String> = vec!["3".to_string(), "-1".to_string()];
        let summary = unused_cost_recent(&row, 100).unwrap();
        assert_eq!(summary, CostSummary { unused: 3, cost: 300 });
    }

    #[test]
    fn reduction_is_idempotent() {
        let rows = history(&[&[1, 2], &[0, -4], &[7, 0]]);
        let first = unused_cost(&rows, 250).unwrap();
        let second = unused_cost(&rows, 250).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unused, 10);
        assert_eq!(first.cost, 2500);
    }

    #[test]
    fn decimal_artifacts_are_floored_and_blanks_ignored() {
        let rows = vec![
            vec!["east".to_string(), "west".to_string()],
            vec!["5.9".to_string(), "".to_string()],
        ];
        let summary = unused_cost(&rows, 10).unwrap();
        assert_eq!(summary, CostSummary { unused: 5, cost: 50 });
    }

    #[test]
    fn corrupt_cells_abort_the_aggregate() {
        let rows = vec![
            vec!["east".to_string()],
            vec!["seven".to_string()],
        ];
        assert!(matches!(
            unused_cost(&rows, 10),
            Err(ReportError::CorruptHistory { value }) if value == "seven"
        ));
    }

    #[test]
    fn empty_history_costs_nothing() {
        let rows = history(&[]);
        let summary = unused_cost(&rows, 500).unwrap();
        assert_eq!(summary, CostSummary { unused: 0, cost: 0 });
    }
}
