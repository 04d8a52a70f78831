use anyhow::Result;
use cnc_admin::client::ApiClient;
use cnc_admin::config::Config;
use cnc_admin::detail;
use cnc_admin::models::Material;
use cnc_admin::session::SessionStore;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use super::fetch_spinner;

/// Execute `materials list`
pub async fn list(cfg: &Config, page: u32, size: Option<u32>) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    let size = size.unwrap_or(cfg.api.page_size);

    let spinner = fetch_spinner("Fetching materials...");
    let result = client.list_materials(page, size).await;
    spinner.finish_and_clear();
    let data = result?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID",
            "Material",
            "Thickness (mm)",
            "Setup Price (€)",
            "Cost Factor",
            "Loop Cost (€)",
            "Cost per m² (€)",
            "In Stock",
        ]);

    for m in &data.items {
        table.add_row(vec![
            Cell::new(m.id.clone().unwrap_or_default()),
            Cell::new(&m.material),
            Cell::new(
                m.thickness
                    .map(|t| format!("{:.2}", t))
                    .unwrap_or_else(|| detail::PLACEHOLDER.to_string()),
            ),
            Cell::new(format!("{:.2}", m.setup_price)),
            Cell::new(format!("{:.3}", m.cost_factor)),
            Cell::new(format!("{:.2}", m.loop_cost)),
            Cell::new(format!("{:.2}", m.cost_per_m2)),
            if m.stock {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Red)
            },
        ]);
    }

    println!("{table}");

    let pages = data.total.div_ceil(u64::from(size)).max(1);
    println!("Page {} of {} ({} materials total)", page, pages, data.total);

    Ok(())
}

/// Execute `materials add`
pub async fn add(cfg: &Config, record: Material) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    let saved = client.create_material(&record).await?;

    println!(
        "{} Material '{}' created with id {}",
        "✓".green(),
        saved.material,
        saved.id.unwrap_or_default().cyan()
    );
    Ok(())
}

/// Execute `materials update`: replaces the whole record
pub async fn update(cfg: &Config, id: &str, record: Material) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    let saved = client.update_material(id, &record).await?;

    println!("{} Material '{}' updated", "✓".green(), saved.material);
    Ok(())
}

/// Execute `materials remove`
pub async fn remove(cfg: &Config, id: &str) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    client.delete_material(id).await?;

    println!("{} Material {} deleted", "✓".green(), id);
    Ok(())
}
