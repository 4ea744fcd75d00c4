//! Derives the variance and next-forecast rows from a new observation.
//!
//! One forecast cycle appends three rows, in a fixed order: the observation
//! to Loaded, the signed variance against the plan that was in effect to
//! AddedUnused, and the freshly averaged plan to Planned. The variance is
//! always computed against the prior Planned row, never the one produced in
//! the same cycle.

use tracing::{debug, info, instrument};

use crate::config::PlannerConfig;
use crate::error::{ForecastError, Result, ValidationError};
use crate::ledger;
use crate::store::TabularStore;
use crate::table::{TableKind, parse_cell_count};

/// Rows derived by one forecast cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Signed variance per lane: positive = trailers ordered but unused,
    /// negative = trailers requested same-day beyond plan.
    pub added_unused: Vec<i64>,
    /// Forecast for the next cycle.
    pub next_planned: Vec<i64>,
}

/// Runs one forecast cycle for a validated observation row.
#[instrument(level = "info", skip(store, config))]
pub fn run_cycle<S: TabularStore>(
    store: &mut S,
    config: &PlannerConfig,
    loaded: &[i64],
) -> Result<CycleOutcome> {
    ledger::verify_alignment(store, config)?;

    let lane_count = ledger::lane_count(store, config, TableKind::Loaded)?;
    if loaded.len() != lane_count {
        return Err(ValidationError::ArityMismatch {
            expected: lane_count,
            actual: loaded.len(),
        }
        .into());
    }

    // The plan this cycle is judged against must exist before anything is
    // appended, so a bootstrap failure leaves all three tables untouched.
    let prior_planned = latest_planned_row(store, config, lane_count)?;

    store.append_row(config.sheet(TableKind::Loaded), loaded)?;

    let added_unused: Vec<i64> = prior_planned
        .iter()
        .zip(loaded)
        .map(|(planned, actual)| planned - actual)
        .collect();
    store.append_row(config.sheet(TableKind::AddedUnused), &added_unused)?;

    let next_planned = next_forecast_row(store, config, lane_count)?;
    store.append_row(config.sheet(TableKind::Planned), &next_planned)?;

    info!(?added_unused, ?next_planned, "forecast cycle complete");
    Ok(CycleOutcome {
        added_unused,
        next_planned,
    })
}

/// Returns the most recently appended Planned row.
fn latest_planned_row<S: TabularStore>(
    store: &S,
    config: &PlannerConfig,
    lane_count: usize,
) -> Result<Vec<i64>> {
    let rows = store.get_all_rows(config.sheet(TableKind::Planned))?;
    let last = rows.iter().skip(1).last().ok_or(ForecastError::NoPriorForecast)?;
    let mut parsed = Vec::with_capacity(lane_count);
    for cell in last.iter().take(lane_count) {
        parsed.push(parse_cell_count(cell)?);
    }
    parsed.resize(lane_count, 0);
    Ok(parsed)
}

/// Averages the trailing window of Loaded history into the next Planned row.
fn next_forecast_row<S: TabularStore>(
    store: &S,
    config: &PlannerConfig,
    lane_count: usize,
) -> Result<Vec<i64>> {
    let mut next = Vec::with_capacity(lane_count);
    for lane in 1..=lane_count {
        let column = store.get_column(config.sheet(TableKind::Loaded), lane)?;
        let mut history = Vec::with_capacity(column.len().saturating_sub(1));
        for cell in column.iter().skip(1) {
            history.push(parse_cell_count(cell)?);
        }
        next.push(windowed_average(&history, config.forecast_window));
    }
    debug!(lanes = lane_count, "next forecast row computed");
    Ok(next)
}

/// Mean of the trailing `min(window, n)` entries, rounded half-to-even. The
/// divisor is the number of entries actually present, never the window
/// length.
fn windowed_average(history: &[i64], window: usize) -> i64 {
    let tail = &history[history.len().saturating_sub(window)..];
    if tail.is_empty() {
        return 0;
    }
    let sum: i64 = tail.iter().sum();
    (sum as f64 / tail.len() as f64).round_ties_even() as i64
}
