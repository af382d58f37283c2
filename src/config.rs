use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::model::DataSubset;

/// Prefix every table locator starts with.
pub const DEFAULT_BASE_URL: &str = "https://www1.realtrends.com/best-real-estate-agents-";

/// States reported when none are configured.
pub const DEFAULT_STATES: [&str; 3] = ["georgia", "florida", "north-carolina"];

/// Every state slug the ranking site publishes.
pub const ALL_STATES: [&str; 50] = [
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new-hampshire",
    "new-jersey",
    "new-mexico",
    "new-york",
    "north-carolina",
    "north-dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode-island",
    "south-carolina",
    "south-dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west-virginia",
    "wisconsin",
    "wyoming",
];

/// Columns removed from every fetched table before merging.
pub const DEFAULT_DROPPED_COLUMNS: [&str; 1] = ["Website"];

pub const DEFAULT_OUTPUT_DIR: &str = "real_trends_scrapes";

pub const DEFAULT_USER_AGENT: &str = concat!("real-trends-report/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything a report run needs to know. Missing fields in a JSON config
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub base_url: String,
    pub states: Vec<String>,
    pub subsets: Vec<DataSubset>,
    pub output_dir: PathBuf,
    pub dropped_columns: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            states: DEFAULT_STATES.iter().map(|state| state.to_string()).collect(),
            subsets: DataSubset::ALL.to_vec(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dropped_columns: DEFAULT_DROPPED_COLUMNS
                .iter()
                .map(|column| column.to_string())
                .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ReportConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would produce an empty workbook.
    pub fn validate(&self) -> Result<()> {
        if self.states.is_empty() {
            return Err(ReportError::InvalidConfig("no states configured".into()));
        }
        if self.subsets.is_empty() {
            return Err(ReportError::InvalidConfig(
                "no data subsets configured".into(),
            ));
        }
        if let Some(state) = self.states.iter().find(|state| state.trim().is_empty()) {
            return Err(ReportError::InvalidConfig(format!(
                "blank state name '{state}'"
            )));
        }
        Ok(())
    }

    pub fn with_all_states(mut self) -> Self {
        self.states = ALL_STATES.iter().map(|state| state.to_string()).collect();
        self
    }
}
