use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_GEO_SOURCE: &str = "https://github.com/apisit/thailand.json/raw/master/thailandWithName.json";
pub const DEFAULT_CASES_SOURCE: &str = "https://covid19.th-stat.com/api/open/cases";
pub const DEFAULT_LOG_FILE: &str = "thai-covid-map.log";

/// Runtime settings. Defaults can be overridden with `THCOVID_*` variables,
/// e.g. `THCOVID_CASES_SOURCE=data/cases.json` to run from a local copy.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// URL or file path of the province boundary GeoJSON
    pub geo_source: String,
    /// URL or file path of the case records
    pub cases_source: String,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::with_prefix("THCOVID").prefix_separator("_"))
    }

    fn from_environment(env: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("geo_source", DEFAULT_GEO_SOURCE)?
            .set_default("cases_source", DEFAULT_CASES_SOURCE)?
            .set_default("log_file", DEFAULT_LOG_FILE)?
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize::<Settings>()
            .context("Failed to deserialize settings")
    }
}
