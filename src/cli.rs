use clap::{Parser, Subcommand};
use cnc_admin::models::OrderStatus;

#[derive(Parser, Debug)]
#[command(name = "cnc-admin", version, about = "CNC shop admin console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Unlock the console on this machine
    Login,

    /// Lock the console again
    Logout,

    /// Customer orders
    Orders {
        #[command(subcommand)]
        action: OrdersCommands,
    },

    /// Material price records
    Materials {
        #[command(subcommand)]
        action: MaterialsCommands,
    },

    /// Interactive full-screen dashboard (default)
    Dashboard,

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OrdersCommands {
    /// List orders, one page at a time
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Orders per page (defaults to api.page_size)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one order with its full pricing breakdown
    Show {
        /// Order id
        id: String,
    },

    /// Update an order's status
    SetStatus {
        /// Order id
        id: String,

        /// pending | in-progress | manufactured | delivered | cancelled
        status: OrderStatus,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum MaterialsCommands {
    /// List material price records, one page at a time
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Records per page (defaults to api.page_size)
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Add a new material price record
    Add {
        /// Material name, e.g. "Steel DC01"
        #[arg(long)]
        material: String,

        /// Sheet thickness in mm
        #[arg(long)]
        thickness: f64,

        /// Setup price in EUR
        #[arg(long)]
        setup_price: f64,

        /// Cutting cost per meter in EUR
        #[arg(long)]
        cost_factor: f64,

        /// Cost per closed loop in EUR
        #[arg(long)]
        loop_cost: f64,

        /// Cost per m² in EUR
        #[arg(long)]
        cost_per_m2: f64,

        /// Whether the material is in stock
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        stock: bool,
    },

    /// Replace an existing material price record
    Update {
        /// Record id
        id: String,

        #[arg(long)]
        material: String,

        #[arg(long)]
        thickness: f64,

        #[arg(long)]
        setup_price: f64,

        #[arg(long)]
        cost_factor: f64,

        #[arg(long)]
        loop_cost: f64,

        #[arg(long)]
        cost_per_m2: f64,

        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        stock: bool,
    },

    /// Delete a material price record
    Remove {
        /// Record id
        id: String,
    },
}

impl Cli {
    /// Get the command to execute, defaulting to the dashboard
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_dashboard() {
        let cli = Cli { command: None };
        assert!(matches!(cli.get_command(), Commands::Dashboard));
    }

    #[test]
    fn test_parse_orders_list_with_page() {
        let args = vec!["cnc-admin", "orders", "list", "--page", "3"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Orders {
                action: OrdersCommands::List { page, limit },
            } => {
                assert_eq!(page, 3);
                assert!(limit.is_none());
            }
            _ => panic!("Expected orders list command"),
        }
    }

    #[test]
    fn test_parse_set_status() {
        let args = vec!["cnc-admin", "orders", "set-status", "64af0c", "delivered"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Orders {
                action: OrdersCommands::SetStatus { id, status },
            } => {
                assert_eq!(id, "64af0c");
                assert_eq!(status, OrderStatus::Delivered);
            }
            _ => panic!("Expected set-status command"),
        }
    }

    #[test]
    fn test_parse_set_status_rejects_unknown() {
        let args = vec!["cnc-admin", "orders", "set-status", "64af0c", "shipped"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_materials_add() {
        let args = vec![
            "cnc-admin",
            "materials",
            "add",
            "--material",
            "Alu 5754",
            "--thickness",
            "3",
            "--setup-price",
            "25",
            "--cost-factor",
            "0.9",
            "--loop-cost",
            "0.4",
            "--cost-per-m2",
            "7.5",
            "--stock",
            "false",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Materials {
                action: MaterialsCommands::Add { material, stock, .. },
            } => {
                assert_eq!(material, "Alu 5754");
                assert!(!stock);
            }
            _ => panic!("Expected materials add command"),
        }
    }
}
