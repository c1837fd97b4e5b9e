//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, config, date/period parsing)
//! - `routines` - Logging, importing, and listing daily routines
//! - `insights` - Monthly insights report
//! - `serve` - Web server command

pub mod core;
pub mod insights;
pub mod routines;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use insights::*;
pub use routines::*;
pub use serve::*;

/// Render a 0-100 percentage as a ten-cell bar
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}
