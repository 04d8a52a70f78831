//! Interactive terminal dashboard
//!
//! App state and rendering for the full-screen orders/materials view; the
//! event loop lives in the binary's `dashboard` command.

pub mod ui;

pub use ui::{DashboardApp, View};
