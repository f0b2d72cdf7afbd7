//! Tap configuration loading
//!
//! Supports loading the extractor configuration from (in order of priority):
//! 1. An explicit JSON file path
//! 2. `config.json` in the report-sync config directory
//! 3. Runtime environment variables (fallback)

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::catalog::metrics::MAX_METRICS_PER_REQUEST;
use crate::models::parse_report_date;

/// Config filename in the report-sync config directory
const CONFIG_FILE: &str = "config.json";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://business-api.tiktok.com/open_api/v1.3";

/// Extractor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TapConfig {
    /// Token sent in the `Access-Token` header
    pub access_token: String,
    pub advertiser_id: String,
    /// Earliest date to sync; also the floor for lookback re-extraction
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    /// Include entities in deleted status
    #[serde(default = "default_true")]
    pub include_deleted: bool,
    /// Days of trailing data to re-extract on every run
    #[serde(default)]
    pub lookback: u32,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Report timezone as a fixed offset from UTC
    #[serde(default)]
    pub report_utc_offset_hours: i32,
    /// Maximum days a single report window extends past its start
    #[serde(default = "default_max_window_days")]
    pub max_window_days: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Per-request metric limit of the report endpoint
    #[serde(default = "default_max_metrics")]
    pub max_metrics_per_request: usize,
    /// Fix "yesterday" once per run instead of re-reading the clock per cursor
    #[serde(default = "default_true")]
    pub pin_yesterday: bool,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_true() -> bool {
    true
}

fn default_max_window_days() -> u32 {
    30
}

fn default_page_size() -> u32 {
    1000
}

fn default_max_metrics() -> usize {
    MAX_METRICS_PER_REQUEST
}

fn default_max_retries() -> u32 {
    5
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_report_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid start_date: {raw}")))
}

impl TapConfig {
    /// Minimal configuration with every optional field at its default
    pub fn new(
        access_token: impl Into<String>,
        advertiser_id: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            advertiser_id: advertiser_id.into(),
            start_date,
            include_deleted: true,
            lookback: 0,
            user_agent: None,
            report_utc_offset_hours: 0,
            max_window_days: default_max_window_days(),
            page_size: default_page_size(),
            max_metrics_per_request: default_max_metrics(),
            pin_yesterday: true,
            max_retries: default_max_retries(),
            base_url: default_base_url(),
        }
    }

    /// Load configuration using the following priority:
    /// 1. `path`, when given
    /// 2. JSON file (~/.config/report-sync/config.json)
    /// 3. Runtime environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = path {
            Self::from_file(path)?
        } else if config::config_exists(CONFIG_FILE) {
            config::load_json(CONFIG_FILE)?
        } else {
            Self::from_env()?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse tap config JSON")
    }

    /// Load the required fields from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("REPORT_SYNC_ACCESS_TOKEN")
            .context("REPORT_SYNC_ACCESS_TOKEN environment variable not set")?;
        let advertiser_id = std::env::var("REPORT_SYNC_ADVERTISER_ID")
            .context("REPORT_SYNC_ADVERTISER_ID environment variable not set")?;
        let raw_start = std::env::var("REPORT_SYNC_START_DATE")
            .context("REPORT_SYNC_START_DATE environment variable not set")?;
        let start_date = parse_report_date(&raw_start)
            .with_context(|| format!("Invalid REPORT_SYNC_START_DATE: {raw_start}"))?;

        Ok(Self::new(access_token, advertiser_id, start_date))
    }

    /// Get the default config file path (~/.config/report-sync/config.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            bail!("access_token must not be empty");
        }
        if self.advertiser_id.trim().is_empty() {
            bail!("advertiser_id must not be empty");
        }
        if self.page_size == 0 {
            bail!("page_size must be positive");
        }
        if self.max_metrics_per_request == 0 {
            bail!("max_metrics_per_request must be positive");
        }
        self.report_offset()?;
        Ok(())
    }

    /// Report timezone offset
    pub fn report_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.report_utc_offset_hours * 3600).with_context(|| {
            format!(
                "report_utc_offset_hours out of range: {}",
                self.report_utc_offset_hours
            )
        })
    }

    /// Status filter value for report and entity requests
    pub fn status_filter(&self) -> &'static str {
        if self.include_deleted {
            "STATUS_ALL"
        } else {
            "STATUS_NOT_DELETE"
        }
    }
}
