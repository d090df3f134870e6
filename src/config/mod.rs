//! Configuration management for the talon bot
//!
//! Everything operator-supplied lives in one TOML file loaded once at
//! startup: the target rooms, the patient identity, session cookies and the
//! logging/retry knobs. The browser-fingerprint headers are deliberately NOT
//! configuration (see [`crate::client::headers`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ValidationError;
use crate::models::Person;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target service and rooms
    pub service: ServiceConfig,

    /// Patient identity (validated into a [`Person`] at startup)
    pub patient: PatientConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Transport retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Target service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base portal URL, e.g. `https://medic-service.by/BrestGDP1`
    pub base_url: String,

    /// Room identifiers to poll; duplicates are removed by the scheduler
    pub rooms: Vec<u32>,
}

/// Patient identity as written by the operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientConfig {
    pub family: String,
    pub name: String,
    pub second_name: String,

    /// Birthday in `dd.mm.yyyy`
    pub birthday_date: String,

    pub phone_number: String,
}

impl PatientConfig {
    /// Validate the raw fields into an immutable [`Person`]
    ///
    /// # Errors
    ///
    /// Propagates the first [`ValidationError`]; fatal at startup.
    pub fn to_person(&self) -> std::result::Result<Person, ValidationError> {
        Person::new(
            &self.name,
            &self.family,
            &self.second_name,
            &self.birthday_date,
            &self.phone_number,
        )
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Session cookies attached to authenticated requests
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Transport retry policy; the default (0 retries) keeps failures fatal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts for a failed request
    #[serde(default)]
    pub max_retries: u32,

    /// Base delay in milliseconds for exponential backoff
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Append-only text file receiving every claimed ticket
    #[serde(default = "default_ticket_file")]
    pub ticket_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_ticket_file() -> PathBuf {
    PathBuf::from("tickets.log")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("text")
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cookies: BTreeMap::new(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            ticket_file: default_ticket_file(),
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.service.rooms.is_empty() {
            anyhow::bail!("service.rooms must list at least one room id");
        }

        Url::parse(&self.service.base_url)
            .with_context(|| format!("service.base_url is not a valid URL: {}", self.service.base_url))?;

        if self.http.request_timeout_secs == 0 {
            anyhow::bail!("http.request_timeout_secs must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: String::from("https://medic-service.by/BrestGDP1"),
                rooms: vec![101],
            },
            patient: PatientConfig {
                family: String::from("Какашкин"),
                name: String::from("Гарик"),
                second_name: String::from("Газаросович"),
                birthday_date: String::from("09.09.1999"),
                phone_number: String::from("+375 (29) 123-45-67"),
            },
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
            log: LogConfig::default(),
        }
    }
}
