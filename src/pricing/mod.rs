//! Cost breakdown computation for order line items
//!
//! Pure arithmetic over a line item's geometry and price-rate record.
//! All amounts are EUR; currency conversion happens at display time.

pub mod calculator;
pub mod models;

pub use calculator::{cutting_cost, line_breakdown, loop_cost, setup_cost_per_unit, surface_cost};
pub use models::CostBreakdown;
