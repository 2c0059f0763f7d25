//! Common test utilities

mod factories;
mod test_app;

pub use factories::*;
pub use test_app::*;
