//! Command implementations for the CLI
//!
//! - auth: login/logout session flag
//! - orders: order listing, detail view, status updates
//! - materials: material price record CRUD
//! - dashboard: interactive full-screen view

pub mod auth;
pub mod dashboard;
pub mod materials;
pub mod orders;

use indicatif::ProgressBar;
use std::time::Duration;

/// Spinner shown while a fetch is in flight
pub(crate) fn fetch_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
