use anyhow::Result;
use cnc_admin::client::ApiClient;
use cnc_admin::config::Config;
use cnc_admin::currency::RateService;
use cnc_admin::detail;
use cnc_admin::models::{Order, OrderStatus};
use cnc_admin::session::SessionStore;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::collections::HashMap;

use super::fetch_spinner;

/// Execute `orders list`
pub async fn list(cfg: &Config, page: u32, limit: Option<u32>) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    let limit = limit.unwrap_or(cfg.api.page_size);

    let spinner = fetch_spinner("Fetching orders...");
    let result = client.list_orders(page, limit).await;
    spinner.finish_and_clear();
    let data = result?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID", "Price", "Name", "Phone", "Address", "Email", "Status", "Created",
        ]);

    for order in &data.orders {
        table.add_row(vec![
            Cell::new(format!("#{}", order.id)),
            Cell::new(
                order
                    .total_amount
                    .map(|amount| format!("{:.2}", amount))
                    .unwrap_or_else(|| detail::PLACEHOLDER.to_string()),
            ),
            Cell::new(order.name.clone().unwrap_or_default()),
            Cell::new(order.phone.clone().unwrap_or_default()),
            Cell::new(order.address()),
            Cell::new(order.email.clone().unwrap_or_default()),
            Cell::new(order.status.as_str()).fg(status_color(order.status)),
            Cell::new(
                order
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }

    println!("{table}");

    let pages = data.total.div_ceil(u64::from(limit)).max(1);
    println!("Page {} of {} ({} orders total)", page, pages, data.total);

    Ok(())
}

/// Execute `orders show`: the full detail panel for one order
pub async fn show(cfg: &Config, id: &str) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;

    let spinner = fetch_spinner("Fetching order...");
    let result = client.find_order(id).await;
    spinner.finish_and_clear();
    let order = result?;

    // Rates are only needed when the order displays in a non-EUR currency
    let rates = if order.display_currency() == "EUR" {
        HashMap::new()
    } else {
        let rate_service = RateService::new(&cfg.rates)?;
        let spinner = fetch_spinner("Fetching exchange rates...");
        let rates = rate_service.get_rates().await;
        spinner.finish_and_clear();
        rates
    };

    print_detail(&order, &rates, client.asset_base_url());
    Ok(())
}

/// Execute `orders set-status`
pub async fn set_status(cfg: &Config, id: &str, status: OrderStatus) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    client.set_order_status(id, status).await?;

    println!(
        "{} Order {} status set to {}",
        "✓".green(),
        id,
        status.to_string().cyan()
    );
    Ok(())
}

fn print_detail(order: &Order, rates: &HashMap<String, f64>, asset_base_url: &str) {
    for (index, item) in order.material_details.iter().enumerate() {
        println!("{}", format!("Metrics #{}", index + 1).bold());
        for row in detail::line_item_rows(item, asset_base_url) {
            print_row(&row);
        }
        println!();
    }

    println!("{}", "Order Info".bold());
    for row in detail::order_info_rows(order) {
        print_row(&row);
    }
    println!();

    println!(
        "{}",
        format!("Summary ({})", order.display_currency()).bold()
    );
    for row in detail::summary_rows(order, rates) {
        print_row(&row);
    }
}

fn print_row(row: &detail::DetailRow) {
    let label = format!("{:<13}", row.label);
    match &row.suffix {
        Some(suffix) => println!("  {} {}  {}", label.yellow(), row.value, suffix.green()),
        None => println!("  {} {}", label.yellow(), row.value),
    }
}

fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::InProgress => Color::Cyan,
        OrderStatus::Manufactured => Color::Blue,
        OrderStatus::Delivered => Color::Green,
        OrderStatus::Cancelled => Color::Red,
    }
}
