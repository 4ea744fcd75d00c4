//! Core library for the demand-planner command line application.
//!
//! The library keeps three parallel tables (loaded, planned, and
//! added-unused trailer counts per transport lane) structurally
//! synchronized, and derives forecast and variance rows from history. The
//! modules are structured to keep responsibilities narrow and composable:
//! backing stores live under [`store`], input checks in [`validate`],
//! cross-table structural operations in [`ledger`], the forecast cycle in
//! [`forecast`], and cost aggregation in [`report`].

pub mod config;
pub mod error;
pub mod forecast;
pub mod ledger;
pub mod report;
pub mod store;
pub mod table;
pub mod validate;

pub use config::PlannerConfig;
pub use error::{
    ForecastError, PlannerError, ReportError, Result, StoreError, StructuralError, ValidationError,
};
pub use table::TableKind;
