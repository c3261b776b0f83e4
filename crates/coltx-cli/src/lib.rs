//! CLI library components for the coltx runner.

pub mod commands;
pub mod logging;
