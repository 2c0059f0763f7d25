//! Integration test modules

mod api_tests;
mod engine_tests;
