use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cnc_admin::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    let cfg = config::load_config()?;

    match args.get_command() {
        cli::Commands::Login => {
            commands::auth::login(&cfg)?;
        }
        cli::Commands::Logout => {
            commands::auth::logout(&cfg)?;
        }
        cli::Commands::Orders { action } => match action {
            cli::OrdersCommands::List { page, limit } => {
                commands::orders::list(&cfg, page, limit).await?;
            }
            cli::OrdersCommands::Show { id } => {
                commands::orders::show(&cfg, &id).await?;
            }
            cli::OrdersCommands::SetStatus { id, status } => {
                commands::orders::set_status(&cfg, &id, status).await?;
            }
        },
        cli::Commands::Materials { action } => match action {
            cli::MaterialsCommands::List { page, size } => {
                commands::materials::list(&cfg, page, size).await?;
            }
            cli::MaterialsCommands::Add {
                material,
                thickness,
                setup_price,
                cost_factor,
                loop_cost,
                cost_per_m2,
                stock,
            } => {
                let record = cnc_admin::models::Material {
                    id: None,
                    material,
                    thickness: Some(thickness),
                    setup_price,
                    cost_factor,
                    loop_cost,
                    cost_per_m2,
                    stock,
                };
                commands::materials::add(&cfg, record).await?;
            }
            cli::MaterialsCommands::Update {
                id,
                material,
                thickness,
                setup_price,
                cost_factor,
                loop_cost,
                cost_per_m2,
                stock,
            } => {
                let record = cnc_admin::models::Material {
                    id: Some(id.clone()),
                    material,
                    thickness: Some(thickness),
                    setup_price,
                    cost_factor,
                    loop_cost,
                    cost_per_m2,
                    stock,
                };
                commands::materials::update(&cfg, &id, record).await?;
            }
            cli::MaterialsCommands::Remove { id } => {
                commands::materials::remove(&cfg, &id).await?;
            }
        },
        cli::Commands::Dashboard => {
            commands::dashboard::execute(&cfg).await?;
        }
        cli::Commands::Version => {
            println!("CNC Admin v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
