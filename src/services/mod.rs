//! Business logic services

pub mod aggregate;
pub mod catalog;
pub mod export;
pub mod filters;
pub mod generators;
pub mod reporting;
pub mod session;
