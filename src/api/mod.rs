//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::{routing::get, Router};

use crate::AppState;

mod health;
mod reports;

pub use health::*;

/// All API routes, mounted under `/api/v1`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/reports", reports::routes())
}
