use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use demand_planner::store::{TabularStore, XlsxStore};
use demand_planner::{PlannerConfig, PlannerError, Result, TableKind};
use demand_planner::{forecast, ledger, report, validate};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Init(args) => execute_init(args),
        Command::Submit(args) => execute_submit(args),
        Command::AddLane(args) => execute_add_lane(args),
        Command::DeleteLane(args) => execute_delete_lane(args),
        Command::Report(args) => execute_report(args),
        Command::Trim(args) => execute_trim(args),
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| PlannerError::Logging(error.to_string()))
}

fn execute_init(args: InitArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let lanes = args
        .lanes
        .split(',')
        .map(validate::parse_lane_name)
        .collect::<std::result::Result<Vec<String>, _>>()?;

    let mut store = XlsxStore::create(&args.common.book);
    for kind in TableKind::ALL {
        store.create_table(config.sheet(kind), &lanes)?;
    }
    // Baseline forecast of zero trailers, so the first cycle has a prior
    // planned row to compare against.
    store.append_row(config.sheet(TableKind::Planned), &vec![0; lanes.len()])?;
    store.save()?;

    println!(
        "created {} with lanes {}",
        args.common.book.display(),
        lanes.join(", ")
    );
    Ok(())
}

fn execute_submit(args: SubmitArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let mut store = open_book(&args.common.book)?;

    let lane_count = ledger::lane_count(&store, &config, TableKind::Loaded)?;
    let loaded = validate::parse_row_str(&args.values, lane_count)?;

    let outcome = forecast::run_cycle(&mut store, &config, &loaded)?;
    store.save()?;

    println!("variance (planned - loaded): {:?}", outcome.added_unused);
    println!("next forecast: {:?}", outcome.next_planned);
    Ok(())
}

fn execute_add_lane(args: AddLaneArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let mut store = open_book(&args.common.book)?;

    ledger::add_lane(&mut store, &config, &args.name)?;
    store.save()?;

    println!("lane '{}' added to all tables", args.name.trim());
    Ok(())
}

fn execute_delete_lane(args: DeleteLaneArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let mut store = open_book(&args.common.book)?;

    let lane_count = ledger::lane_count(&store, &config, TableKind::Loaded)?;
    let index = validate::parse_lane_index(&args.index, lane_count)?;

    ledger::delete_lane(&mut store, &config, index)?;
    store.save()?;

    println!("lane {index} removed from all tables");
    Ok(())
}

fn execute_report(args: ReportArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let store = open_book(&args.common.book)?;

    let charge = validate::parse_charge(args.charge.as_deref().unwrap_or(""), config.default_charge)?;
    let unused_report = report::build_report(&store, &config, charge)?;

    // The two aggregates are independent; a corrupt cell in one must not
    // suppress the other.
    match unused_report.historical {
        Ok(summary) => println!(
            "all cycles: {} unused trailers, {} cost at {charge} per trailer",
            summary.unused, summary.cost
        ),
        Err(error) => warn!(%error, "historical aggregate unavailable"),
    }
    match unused_report.recent {
        Some(Ok(summary)) => println!(
            "latest cycle: {} unused trailers, {} cost at {charge} per trailer",
            summary.unused, summary.cost
        ),
        Some(Err(error)) => warn!(%error, "latest-cycle aggregate unavailable"),
        None => println!("latest cycle: no variance rows recorded yet"),
    }
    Ok(())
}

fn execute_trim(args: TrimArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let mut store = open_book(&args.common.book)?;

    let removed = match args.mode {
        TrimMode::Last => ledger::trim_last(&mut store, &config, args.table)?,
        TrimMode::All => ledger::trim_all(&mut store, &config, args.table)?,
    };
    store.save()?;

    println!("removed {removed} row(s) from {}", args.table);
    Ok(())
}

fn open_book(path: &Path) -> Result<XlsxStore> {
    if !path.exists() {
        return Err(PlannerError::MissingBook(path.to_path_buf()));
    }
    Ok(XlsxStore::load(path)?)
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => PlannerConfig::load(path),
        None => Ok(PlannerConfig::default()),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Lane-synchronized trailer demand ledger and forecast."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a workbook with empty loaded/planned/added-unused tables.
    Init(InitArgs),
    /// Submit the trailers used in the last cycle and roll the forecast.
    Submit(SubmitArgs),
    /// Append a lane to all three tables.
    AddLane(AddLaneArgs),
    /// Remove a lane from all three tables.
    DeleteLane(DeleteLaneArgs),
    /// Summarise unused-trailer counts and cost.
    Report(ReportArgs),
    /// Remove data rows from one table.
    Trim(TrimArgs),
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Workbook file backing the three tables.
    #[arg(long)]
    book: PathBuf,

    /// Optional JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct InitArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Comma-separated lane headings, e.g. "felixstowe,zeebrugge".
    #[arg(long)]
    lanes: String,
}

#[derive(clap::Args)]
struct SubmitArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Comma-separated trailer counts, one per lane.
    #[arg(long)]
    values: String,
}

#[derive(clap::Args)]
struct AddLaneArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Heading of the new lane.
    #[arg(long)]
    name: String,
}

#[derive(clap::Args)]
struct DeleteLaneArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// 1-based lane position to remove.
    #[arg(long)]
    index: String,
}

#[derive(clap::Args)]
struct ReportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Per-trailer cancellation charge; blank uses the configured default.
    #[arg(long)]
    charge: Option<String>,
}

#[derive(clap::Args)]
struct TrimArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Table to trim.
    #[arg(long, value_enum)]
    table: TableKind,

    /// Remove only the most recent row, or every data row.
    #[arg(long, value_enum)]
    mode: TrimMode,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TrimMode {
    Last,
    All,
}
