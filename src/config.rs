use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::TableKind;

/// Trailing-window length used when averaging loaded history into the next
/// forecast row.
pub const DEFAULT_FORECAST_WINDOW: usize = 5;

/// Per-trailer cancellation charge applied when no explicit charge is given.
pub const DEFAULT_CHARGE: i64 = 250;

/// Runtime configuration of the planner: which sheets back the three tables,
/// how far back the forecast looks, and the default cancellation charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub loaded_sheet: String,
    pub planned_sheet: String,
    pub added_unused_sheet: String,
    pub forecast_window: usize,
    pub default_charge: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            loaded_sheet: "loaded".to_string(),
            planned_sheet: "planned".to_string(),
            added_unused_sheet: "added_unused".to_string(),
            forecast_window: DEFAULT_FORECAST_WINDOW,
            default_charge: DEFAULT_CHARGE,
        }
    }
}

impl PlannerConfig {
    /// Loads a configuration from a JSON file. Missing keys fall back to the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Resolves a table to its backing sheet name.
    pub fn sheet(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Loaded => &self.loaded_sheet,
            TableKind::Planned => &self.planned_sheet,
            TableKind::AddedUnused => &self.added_unused_sheet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_workbook() {
        let config = PlannerConfig::default();
        assert_eq!(config.sheet(TableKind::Loaded), "loaded");
        assert_eq!(config.sheet(TableKind::Planned), "planned");
        assert_eq!(config.sheet(TableKind::AddedUnused), "added_unused");
        assert_eq!(config.forecast_window, 5);
        assert_eq!(config.default_charge, 250);
    }

    #[test]
    fn partial_config_files_keep_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"default_charge": 400}"#).expect("config parsed");
        assert_eq!(config.default_charge, 400);
        assert_eq!(config.forecast_window, DEFAULT_FORECAST_WINDOW);
        assert_eq!(config.loaded_sheet, "loaded");
    }
}
