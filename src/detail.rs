//! Order detail panel content
//!
//! One renderer feeds both presentation surfaces (plain subcommand output
//! and the dashboard panel): it turns an order into labeled rows, with the
//! per-line cost equations written out and the summary strip converted to
//! the order's display currency.

use crate::currency::{convert, format_amount};
use crate::models::{LineItem, Order};
use crate::pricing;
use std::collections::HashMap;

/// Placeholder for values that are missing or undefined
pub const PLACEHOLDER: &str = "—";

/// One labeled row of the detail panel
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    pub suffix: Option<String>,
}

impl DetailRow {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            suffix: None,
        }
    }

    fn with_suffix(label: &'static str, value: String, suffix: String) -> Self {
        Self {
            label,
            value,
            suffix: Some(suffix),
        }
    }
}

/// Metrics rows for one line item: material, dimensions, the four cost
/// equations, and the upstream unit/total prices
pub fn line_item_rows(item: &LineItem, asset_base_url: &str) -> Vec<DetailRow> {
    let geometry = &item.geometry;
    let rate = &item.rate;
    let breakdown = pricing::line_breakdown(item);

    let mut rows = Vec::new();

    rows.push(DetailRow::with_suffix(
        "Material",
        geometry
            .material_name
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        format!("{:.2} mm", rate.thickness.unwrap_or_default()),
    ));

    let dimensions = match geometry.dimensions.as_deref() {
        Some([width, height, ..]) => format!("{:.2} x {:.2} mm", width, height),
        _ => PLACEHOLDER.to_string(),
    };
    rows.push(DetailRow::new("Dimensions", dimensions));

    rows.push(DetailRow::with_suffix(
        "Surface Area",
        format!(
            "{:.4} m² × {:.2}",
            geometry.surface_area.unwrap_or_default() / 1_000_000.0,
            rate.cost_per_m2.unwrap_or_default()
        ),
        format!("= {:.2} EUR", breakdown.surface_cost),
    ));

    rows.push(DetailRow::with_suffix(
        "Cutting Line",
        format!(
            "{:.4} m × {:.2}",
            geometry.cutting_line.unwrap_or_default() / 1000.0,
            rate.cost_factor.unwrap_or_default()
        ),
        format!("= {:.2} EUR", breakdown.cutting_cost),
    ));

    rows.push(DetailRow::with_suffix(
        "Closed Loops",
        format!(
            "{} × {:.2}",
            geometry.closed_loops.unwrap_or_default(),
            rate.loop_cost_per_loop.unwrap_or_default()
        ),
        format!("= {:.2} EUR", breakdown.loop_cost),
    ));

    rows.push(DetailRow::with_suffix(
        "Setup Price",
        format!(
            "{:.2} / {}",
            rate.setup_price.unwrap_or_default(),
            geometry.quantity.unwrap_or_default()
        ),
        match breakdown.setup_cost_per_unit {
            Some(cost) => format!("= {:.2} EUR", cost),
            None => format!("= {}", PLACEHOLDER),
        },
    ));

    rows.push(DetailRow::with_suffix(
        "Unit Price",
        match breakdown.unit_price {
            Some(price) => format!("{:.2}", price),
            None => PLACEHOLDER.to_string(),
        },
        "EUR".to_string(),
    ));

    rows.push(DetailRow::new(
        "Total Price",
        match breakdown.total_price {
            Some(price) => format!("{:.2} EUR", price),
            None => PLACEHOLDER.to_string(),
        },
    ));

    rows.push(DetailRow::new(
        "Quantity",
        geometry
            .quantity
            .map(|q| q.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    ));

    if let Some(svg_url) = &item.svg_url {
        rows.push(DetailRow::new(
            "Preview",
            format!(
                "{}/{}",
                asset_base_url.trim_end_matches('/'),
                svg_url.trim_start_matches('/')
            ),
        ));
    }

    rows
}

/// Order metadata rows: id, timestamps, contact and address
pub fn order_info_rows(order: &Order) -> Vec<DetailRow> {
    let text = |value: &Option<String>| {
        value
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    };
    let timestamp = |value: &Option<chrono::DateTime<chrono::Utc>>| {
        value
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    };

    let address = order.address();
    vec![
        DetailRow::new("Order", order.id.clone()),
        DetailRow::new("Status", order.status.to_string()),
        DetailRow::new("Created", timestamp(&order.created_at)),
        DetailRow::new("Updated", timestamp(&order.updated_at)),
        DetailRow::new("User", text(&order.name)),
        DetailRow::new("Email", text(&order.email)),
        DetailRow::new("Phone", text(&order.phone)),
        DetailRow::new(
            "Address",
            if address.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                address
            },
        ),
    ]
}

/// Summary strip: net, shipping, VAT rate and total, converted to the
/// order's display currency
pub fn summary_rows(order: &Order, rates: &HashMap<String, f64>) -> Vec<DetailRow> {
    let currency = order.display_currency();
    let money = |amount: Option<f64>| match amount {
        Some(eur) => format_amount(convert(eur, currency, rates), currency),
        None => PLACEHOLDER.to_string(),
    };

    let vat_label = order
        .additional_cost
        .vat_rate
        .map(|rate| format!("{:.1}%", rate))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    vec![
        DetailRow::new("Net price", money(order.total_amount)),
        DetailRow::new("Shipping", money(order.additional_cost.shipping_cost)),
        DetailRow::new("VAT", vat_label),
        DetailRow::new("Total", money(order.total_amount)),
    ]
}
