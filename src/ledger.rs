//! Keeps the lane (column) sets identical and identically ordered across the
//! three tables.
//!
//! Every structural operation here spans all three tables. The backing store
//! offers no cross-table transaction, so a failure partway through is
//! surfaced as a partial-operation error naming the tables already mutated;
//! [`verify_alignment`] detects the resulting divergence before any later
//! forecast cycle runs.

use tracing::{info, instrument};

use crate::config::PlannerConfig;
use crate::error::{Result, StoreError, StructuralError, ValidationError};
use crate::store::TabularStore;
use crate::table::TableKind;
use crate::validate;

/// Returns the populated lane headings of one table, in column order.
pub fn lane_headings<S: TabularStore>(
    store: &S,
    config: &PlannerConfig,
    kind: TableKind,
) -> Result<Vec<String>> {
    let rows = store.get_all_rows(config.sheet(kind))?;
    let headings = rows
        .first()
        .map(|row| {
            row.iter()
                .take_while(|cell| !cell.trim().is_empty())
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Ok(headings)
}

/// Number of populated headings in the table's first row.
pub fn lane_count<S: TabularStore>(
    store: &S,
    config: &PlannerConfig,
    kind: TableKind,
) -> Result<usize> {
    Ok(lane_headings(store, config, kind)?.len())
}

/// Confirms the central invariant: the lane order of all three tables is
/// identical. Mandatory precondition of every forecast cycle.
pub fn verify_alignment<S: TabularStore>(store: &S, config: &PlannerConfig) -> Result<()> {
    let loaded = lane_headings(store, config, TableKind::Loaded)?;
    let planned = lane_headings(store, config, TableKind::Planned)?;
    let added_unused = lane_headings(store, config, TableKind::AddedUnused)?;

    if loaded != planned || loaded != added_unused {
        return Err(StructuralError::LaneOrderDiverged(format!(
            "loaded={loaded:?} planned={planned:?} added_unused={added_unused:?}"
        ))
        .into());
    }
    Ok(())
}

/// Appends a lane to the end of all three tables, back-filling existing data
/// rows with zero.
///
/// Duplicate headings are accepted; the heading string is the lane's
/// identity only within its column position. If the planned table ends up
/// with no data rows, a zero baseline forecast row is seeded so the first
/// cycle has a prior forecast to compare against.
#[instrument(level = "info", skip(store, config))]
pub fn add_lane<S: TabularStore>(store: &mut S, config: &PlannerConfig, name: &str) -> Result<()> {
    let name = validate::parse_lane_name(name)?;

    let mut applied = Vec::new();
    for kind in TableKind::ALL {
        let sheet = config.sheet(kind);
        if let Err(source) = append_lane_column(store, sheet, &name) {
            // A failure before any table was touched leaves the invariant
            // intact; only a later failure is a partial add.
            if applied.is_empty() {
                return Err(source.into());
            }
            return Err(StructuralError::PartialLaneAdd {
                name,
                applied,
                source,
            }
            .into());
        }
        applied.push(kind);
    }
    info!(lane = %name, "lane appended to all tables");

    seed_baseline_forecast(store, config)?;
    Ok(())
}

fn append_lane_column<S: TabularStore>(
    store: &mut S,
    sheet: &str,
    name: &str,
) -> std::result::Result<(), StoreError> {
    let rows = store.get_all_rows(sheet)?;
    let position = rows.first().map(Vec::len).unwrap_or(0) + 1;
    let backfill = vec!["0".to_string(); rows.len().saturating_sub(1)];
    store.insert_column(sheet, position, name, &backfill)
}

/// Seeds the all-zero baseline forecast row when the planned table has no
/// data rows yet.
fn seed_baseline_forecast<S: TabularStore>(store: &mut S, config: &PlannerConfig) -> Result<()> {
    let sheet = config.sheet(TableKind::Planned);
    let rows = store.get_all_rows(sheet)?;
    if rows.len() > 1 {
        return Ok(());
    }
    let lanes = lane_count(store, config, TableKind::Planned)?;
    store.append_row(sheet, &vec![0; lanes])?;
    info!(lanes, "seeded baseline forecast row");
    Ok(())
}

/// Removes the lane at `index` (1-based) from all three tables.
///
/// At least one lane must remain; deleting the last one fails with
/// [`StructuralError::LastLaneProtected`] and leaves every table unchanged.
#[instrument(level = "info", skip(store, config))]
pub fn delete_lane<S: TabularStore>(
    store: &mut S,
    config: &PlannerConfig,
    index: usize,
) -> Result<()> {
    let count = lane_count(store, config, TableKind::Loaded)?;
    if index == 0 || index > count {
        return Err(ValidationError::IndexOutOfRange {
            index: index as i64,
            lane_count: count,
        }
        .into());
    }
    if count <= 1 {
        return Err(StructuralError::LastLaneProtected.into());
    }

    let mut applied = Vec::new();
    for kind in TableKind::ALL {
        if let Err(source) = store.delete_column(config.sheet(kind), index) {
            if applied.is_empty() {
                return Err(source.into());
            }
            return Err(StructuralError::PartialLaneDelete {
                index,
                applied,
                source,
            }
            .into());
        }
        applied.push(kind);
    }
    info!(index, "lane removed from all tables");
    Ok(())
}

/// Removes the most recent data row of one table. Returns the number of rows
/// removed (zero when the table holds no data rows).
#[instrument(level = "info", skip(store, config))]
pub fn trim_last<S: TabularStore>(
    store: &mut S,
    config: &PlannerConfig,
    kind: TableKind,
) -> Result<usize> {
    let sheet = config.sheet(kind);
    let rows = store.get_all_rows(sheet)?.len();
    if rows <= 1 {
        return Ok(0);
    }
    store.delete_rows(sheet, rows, rows)?;
    Ok(1)
}

/// Removes every data row of one table, keeping the heading row. The planned
/// table gets its zero baseline row re-seeded so the next forecast cycle
/// still has a prior forecast.
#[instrument(level = "info", skip(store, config))]
pub fn trim_all<S: TabularStore>(
    store: &mut S,
    config: &PlannerConfig,
    kind: TableKind,
) -> Result<usize> {
    let sheet = config.sheet(kind);
    let rows = store.get_all_rows(sheet)?.len();
    let removed = rows.saturating_sub(1);
    if removed > 0 {
        store.delete_rows(sheet, 2, rows)?;
    }
    if kind == TableKind::Planned {
        seed_baseline_forecast(store, config)?;
    }
    Ok(removed)
}
