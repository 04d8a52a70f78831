//! Dashboard command implementation
//!
//! Terminal setup/teardown and the event loop for the full-screen
//! orders/materials view.

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

use cnc_admin::{
    client::ApiClient,
    config::Config,
    currency::RateService,
    dashboard::{DashboardApp, View},
    session::SessionStore,
};

/// Execute the dashboard command
pub async fn execute(cfg: &Config) -> Result<()> {
    SessionStore::from_config(&cfg.session)?.require_authenticated()?;

    let client = ApiClient::new(&cfg.api)?;
    let rate_service = RateService::new(&cfg.rates)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = DashboardApp::new(cfg.api.page_size, client.asset_base_url().to_string());

    // Rate table for currency-converted detail summaries; the fallback
    // table keeps the dashboard usable when the provider is down
    app.rates = rate_service.get_rates().await;

    let result = run_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    client: &ApiClient,
) -> Result<()> {
    loop {
        if app.take_pending_fetch() {
            // Draw once with the loading marker before awaiting the fetch
            app.loading = true;
            terminal.draw(|f| app.render(f))?;
            fetch_and_update(app, client).await;
            app.loading = false;
        }

        terminal.draw(|f| app.render(f))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Fetch the current view's page and update app state
///
/// Failures land in the footer; stale data stays on screen.
async fn fetch_and_update(app: &mut DashboardApp, client: &ApiClient) {
    match app.view {
        View::Orders => match client.list_orders(app.orders_page, app.page_size).await {
            Ok(page) => app.apply_orders(page),
            Err(e) => app.set_error(format!("Failed to fetch orders: {}", e)),
        },
        View::Materials => match client.list_materials(app.materials_page, app.page_size).await {
            Ok(page) => app.apply_materials(page),
            Err(e) => app.set_error(format!("Failed to fetch materials: {}", e)),
        },
    }
}
