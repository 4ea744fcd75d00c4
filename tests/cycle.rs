use demand_planner::store::{TabularStore, XlsxStore};
use demand_planner::{PlannerConfig, TableKind, forecast, ledger, report};
use tempfile::tempdir;

fn init_book(path: &std::path::Path, config: &PlannerConfig, lanes: &[&str]) {
    let headings: Vec<String> = lanes.iter().map(|lane| lane.to_string()).collect();
    let mut store = XlsxStore::create(path);
    for kind in TableKind::ALL {
        store
            .create_table(config.sheet(kind), &headings)
            .expect("table created");
    }
    store
        .append_row(config.sheet(TableKind::Planned), &vec![0; lanes.len()])
        .expect("baseline forecast seeded");
    store.save().expect("workbook written");
}

#[test]
fn forecast_cycles_roundtrip_through_workbook() {
    let config = PlannerConfig::default();
    let temp_dir = tempdir().expect("temporary directory");
    let book = temp_dir.path().join("trailers.xlsx");
    init_book(&book, &config, &["felixstowe", "zeebrugge", "rotterdam"]);

    let mut store = XlsxStore::load(&book).expect("workbook read");
    let outcome =
        forecast::run_cycle(&mut store, &config, &[10, 20, 30]).expect("first cycle runs");
    assert_eq!(outcome.added_unused, [-10, -20, -30]);
    assert_eq!(outcome.next_planned, [10, 20, 30]);
    store.save().expect("workbook written");

    // Reload from disk: the appended rows must have survived the roundtrip.
    let mut store = XlsxStore::load(&book).expect("workbook re-read");
    ledger::verify_alignment(&store, &config).expect("tables aligned");
    let outcome =
        forecast::run_cycle(&mut store, &config, &[12, 15, 30]).expect("second cycle runs");
    assert_eq!(outcome.added_unused, [-2, 5, 0]);
    assert_eq!(outcome.next_planned, [11, 18, 30]);
    store.save().expect("workbook written");

    let store = XlsxStore::load(&book).expect("workbook re-read");
    let loaded_rows = store.get_all_rows("loaded").expect("loaded rows");
    assert_eq!(loaded_rows.len(), 3);
    assert_eq!(loaded_rows[2], ["12", "15", "30"]);

    let unused = report::build_report(&store, &config, 100).expect("report built");
    let historical = unused.historical.expect("historical aggregate");
    assert_eq!(historical.unused, 5);
    assert_eq!(historical.cost, 500);
    let recent = unused.recent.expect("variance rows exist").expect("recent aggregate");
    assert_eq!(recent.unused, 5);
}

#[test]
fn structural_edits_keep_tables_aligned_on_disk() {
    let config = PlannerConfig::default();
    let temp_dir = tempdir().expect("temporary directory");
    let book = temp_dir.path().join("trailers.xlsx");
    init_book(&book, &config, &["felixstowe", "zeebrugge"]);

    let mut store = XlsxStore::load(&book).expect("workbook read");
    forecast::run_cycle(&mut store, &config, &[4, 6]).expect("cycle runs");
    ledger::add_lane(&mut store, &config, "rotterdam").expect("lane added");
    store.save().expect("workbook written");

    let mut store = XlsxStore::load(&book).expect("workbook re-read");
    ledger::verify_alignment(&store, &config).expect("tables aligned after add");
    for kind in TableKind::ALL {
        let rows = store.get_all_rows(config.sheet(kind)).expect("rows read");
        assert_eq!(rows[0], ["felixstowe", "zeebrugge", "rotterdam"]);
        for row in rows.iter().skip(1) {
            assert_eq!(row.last().expect("backfilled cell"), "0");
        }
    }

    ledger::delete_lane(&mut store, &config, 1).expect("lane removed");
    store.save().expect("workbook written");

    let store = XlsxStore::load(&book).expect("workbook re-read");
    ledger::verify_alignment(&store, &config).expect("tables aligned after delete");
    assert_eq!(
        ledger::lane_headings(&store, &config, TableKind::Loaded).expect("headings"),
        ["zeebrugge", "rotterdam"]
    );
}

#[test]
fn trim_operations_roundtrip_through_workbook() {
    let config = PlannerConfig::default();
    let temp_dir = tempdir().expect("temporary directory");
    let book = temp_dir.path().join("trailers.xlsx");
    init_book(&book, &config, &["felixstowe"]);

    let mut store = XlsxStore::load(&book).expect("workbook read");
    forecast::run_cycle(&mut store, &config, &[8]).expect("cycle runs");
    forecast::run_cycle(&mut store, &config, &[6]).expect("cycle runs");

    let removed = ledger::trim_last(&mut store, &config, TableKind::Loaded).expect("trim last");
    assert_eq!(removed, 1);
    let removed = ledger::trim_all(&mut store, &config, TableKind::Planned).expect("trim all");
    assert_eq!(removed, 3);
    store.save().expect("workbook written");

    let store = XlsxStore::load(&book).expect("workbook re-read");
    assert_eq!(store.get_all_rows("loaded").expect("loaded rows").len(), 2);
    // Planned keeps its re-seeded zero baseline.
    let planned = store.get_all_rows("planned").expect("planned rows");
    assert_eq!(planned.len(), 2);
    assert_eq!(planned[1], ["0"]);
}
