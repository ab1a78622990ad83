//! CLI library components for tablekit.

pub mod logging;
pub mod report;
