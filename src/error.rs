use thiserror::Error;

use crate::table::TableKind;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Failures produced while checking raw user input. These are always
/// recoverable: the caller corrects the input and retries, and none of them
/// ever reaches the backing store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Raised when a value cannot be parsed as a whole number.
    #[error("'{value}' is not a whole number")]
    NotANumber { value: String },

    /// Raised when a row does not carry one value per lane.
    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Raised when a lane index falls outside `1..=lane_count`.
    #[error("lane index {index} is outside 1..={lane_count}")]
    IndexOutOfRange { index: i64, lane_count: usize },

    /// Raised when a lane heading is empty after trimming.
    #[error("lane name must not be empty")]
    EmptyLaneName,
}

/// Failures of structural operations spanning the three tables.
#[derive(Debug, Error)]
pub enum StructuralError {
    /// Raised when a delete would leave a table without any lane.
    #[error("cannot delete the last remaining lane")]
    LastLaneProtected,

    /// Raised when an add-lane stalled after mutating some of the tables.
    /// The tables listed in `applied` already carry the new column; the
    /// remainder do not, and the ledger needs manual reconciliation.
    #[error("lane '{name}' was added to {applied:?} only; manual reconciliation required")]
    PartialLaneAdd {
        name: String,
        applied: Vec<TableKind>,
        #[source]
        source: StoreError,
    },

    /// Raised when a delete-lane stalled after mutating some of the tables.
    #[error("lane {index} was removed from {applied:?} only; manual reconciliation required")]
    PartialLaneDelete {
        index: usize,
        applied: Vec<TableKind>,
        #[source]
        source: StoreError,
    },

    /// Raised when the lane headings no longer match across the three
    /// tables, typically after a partial structural operation.
    #[error("lane headings diverge across tables: {0}")]
    LaneOrderDiverged(String),
}

/// Failures of the forecast cycle itself.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Raised when the planned table holds no prior forecast row to compute
    /// a variance against.
    #[error("no prior forecast row exists to compare against")]
    NoPriorForecast,
}

/// Failures while reducing stored history into a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Raised when a stored cell cannot be coerced to a trailer count.
    #[error("corrupt history cell '{value}'")]
    CorruptHistory { value: String },
}

/// Failures raised by a backing tabular store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Raised when a table name is unknown to the store.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// Raised when a column index is outside the table's heading row.
    #[error("column {index} is out of range for table '{table}'")]
    ColumnOutOfRange { table: String, index: usize },

    /// Raised when a row range does not fit the table.
    #[error("rows {start}..={end} are out of range for table '{table}'")]
    RowOutOfRange {
        table: String,
        start: usize,
        end: usize,
    },

    /// Wrapper for IO failures such as reading or writing workbook files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the workbook reader implementation.
    #[error("workbook read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the workbook writer implementation.
    #[error("workbook write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),
}

/// Error type covering the failure cases of the planner as a whole.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Raised when JSON parsing of a config file fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO failures outside the store boundary.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the user provides a workbook path that does not exist.
    #[error("workbook not found: {0}")]
    MissingBook(std::path::PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
