//! Configuration management
//!
//! This module provides YAML-based configuration management with support for:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all settings
//! - Reporting policy constants (due windows, certificate validity, KPI targets)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5080
}

fn default_workers() -> usize {
    num_cpus::get()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Log output target (console or file)
    #[serde(default)]
    pub target: LogTarget,
    /// Directory for log files (used when target is "file")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name prefix
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,
    /// Enable daily log rotation
    #[serde(default = "default_log_rotation")]
    pub daily_rotation: bool,
}

/// Log output target
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to console (stdout/stderr) - default for development
    #[default]
    Console,
    /// Log to file with optional rotation - recommended for production
    File,
    /// Log to both console and file
    Both,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/trainhub/reports")
}

fn default_log_prefix() -> String {
    "trainhub-reports".to_string()
}

fn default_log_rotation() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            daily_rotation: default_log_rotation(),
        }
    }
}

/// Reporting policy configuration
///
/// These constants drive status and priority classification. They are
/// operator-tunable but default to the platform's standard policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportingConfig {
    /// Days after assignment until a course is due
    #[serde(default = "default_due_days")]
    pub due_days: i64,
    /// Days an untouched assignment may age before it counts as overdue
    #[serde(default = "default_overdue_after_days")]
    pub overdue_after_days: i64,
    /// Certificate validity period in days
    #[serde(default = "default_certificate_valid_days")]
    pub certificate_valid_days: i64,
    /// Days before expiry at which a certificate counts as about to expire
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: i64,
    /// Minimum score for a certificate to be issued on completion
    #[serde(default = "default_score_pass_mark")]
    pub score_pass_mark: f64,
    /// Targets for the system performance KPIs
    #[serde(default)]
    pub targets: KpiTargets,
}

fn default_due_days() -> i64 {
    30
}

fn default_overdue_after_days() -> i64 {
    14
}

fn default_certificate_valid_days() -> i64 {
    365
}

fn default_expiry_warning_days() -> i64 {
    30
}

fn default_score_pass_mark() -> f64 {
    80.0
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            due_days: default_due_days(),
            overdue_after_days: default_overdue_after_days(),
            certificate_valid_days: default_certificate_valid_days(),
            expiry_warning_days: default_expiry_warning_days(),
            score_pass_mark: default_score_pass_mark(),
            targets: KpiTargets::default(),
        }
    }
}

/// Target values for the system performance report
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KpiTargets {
    #[serde(default = "default_target_active_learners")]
    pub active_learners: f64,
    #[serde(default = "default_target_catalog_size")]
    pub catalog_size: f64,
    #[serde(default = "default_target_assignments")]
    pub total_assignments: f64,
    #[serde(default = "default_target_completions")]
    pub total_completions: f64,
    /// Percentage target
    #[serde(default = "default_target_completion_rate")]
    pub completion_rate: f64,
    /// Percentage target
    #[serde(default = "default_target_avg_progress")]
    pub avg_progress: f64,
}

fn default_target_active_learners() -> f64 {
    50.0
}

fn default_target_catalog_size() -> f64 {
    25.0
}

fn default_target_assignments() -> f64 {
    200.0
}

fn default_target_completions() -> f64 {
    150.0
}

fn default_target_completion_rate() -> f64 {
    85.0
}

fn default_target_avg_progress() -> f64 {
    75.0
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self {
            active_learners: default_target_active_learners(),
            catalog_size: default_target_catalog_size(),
            total_assignments: default_target_assignments(),
            total_completions: default_target_completions(),
            completion_rate: default_target_completion_rate(),
            avg_progress: default_target_avg_progress(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file (YAML)
    /// 3. Environment variables (prefixed with TRAINHUB_)
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Check for config path override from environment
        let config_path = std::env::var("TRAINHUB_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = if let Some(ref path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_norway::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            } else {
                AppConfig::default()
            }
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            // Current directory
            PathBuf::from("config.yaml"),
            PathBuf::from("config/config.yaml"),
            // System config directory
            PathBuf::from("/etc/trainhub-reports/config.yaml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("trainhub-reports/config.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("TRAINHUB_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TRAINHUB_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRAINHUB_LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }
        if let Ok(target) = std::env::var("TRAINHUB_LOG_TARGET") {
            self.logging.target = match target.to_lowercase().as_str() {
                "file" => LogTarget::File,
                "both" => LogTarget::Both,
                _ => LogTarget::Console,
            };
        }
        if let Ok(dir) = std::env::var("TRAINHUB_LOG_DIR") {
            self.logging.log_dir = PathBuf::from(dir);
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.reporting.due_days <= 0 {
            anyhow::bail!("reporting.due_days must be positive");
        }
        if self.reporting.certificate_valid_days <= 0 {
            anyhow::bail!("reporting.certificate_valid_days must be positive");
        }
        if !(0.0..=100.0).contains(&self.reporting.score_pass_mark) {
            anyhow::bail!("reporting.score_pass_mark must be between 0 and 100");
        }
        Ok(())
    }
}
