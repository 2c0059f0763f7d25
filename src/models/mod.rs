//! Data models

mod entity;
mod filter;
mod report;
mod template;

pub use entity::*;
pub use filter::*;
pub use report::*;
pub use template::*;
