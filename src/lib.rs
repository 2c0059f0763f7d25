//! TrainHub Reports Library
//!
//! This crate provides the report generation and export engine for the
//! TrainHub training platform.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use services::reporting::ReportEngine;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Report generation and export engine
    pub engine: Arc<ReportEngine>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let engine = Arc::new(ReportEngine::new(config.reporting.clone()));
        Self {
            config: Arc::new(config),
            engine,
        }
    }
}
