// src/config/mod.rs
use anyhow::{Context, Result};
use ::config::{Config, ConfigBuilder, Environment, File};
use ::config::builder::DefaultState;
use serde::{Serialize, Deserialize};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze";
const CONFIG_FILE_STEM: &str = "dashboard";
const ENV_PREFIX: &str = "DASHBOARD";

/// Which flavour of the dashboard to show. `Filtered` adds the date-range inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Base,
    Filtered,
}

impl Variant {
    pub fn has_filters(self) -> bool {
        matches!(self, Variant::Filtered)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Filtered
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub endpoint: String,
    pub variant: Variant,
    pub currency_symbol: String,
    /// tracing-subscriber filter directive; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            variant: Variant::default(),
            currency_symbol: "₹".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Layers, lowest priority first: built-in defaults, the user config dir,
    /// the working directory, then `DASHBOARD_*` environment variables.
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(dir) = user_config_dir() {
            builder = builder.add_source(File::from(dir.join(CONFIG_FILE_STEM)).required(false));
        }

        builder = builder
            .add_source(File::with_name(CONFIG_FILE_STEM).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder.build()
            .context("Failed to read dashboard configuration")?
            .try_deserialize()
            .context("Invalid dashboard configuration")
    }
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sales-dashboard"))
}
