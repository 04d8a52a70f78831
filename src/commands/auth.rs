use anyhow::Result;
use cnc_admin::config::Config;
use cnc_admin::session::SessionStore;
use colored::Colorize;

/// Execute the login command: set the local authenticated flag
pub fn login(cfg: &Config) -> Result<()> {
    let store = SessionStore::from_config(&cfg.session)?;
    store.login()?;
    println!("{}", "Logged in. The console is unlocked on this machine.".green());
    Ok(())
}

/// Execute the logout command: clear the local authenticated flag
pub fn logout(cfg: &Config) -> Result<()> {
    let store = SessionStore::from_config(&cfg.session)?;
    store.logout()?;
    println!("{}", "Logged out.".yellow());
    Ok(())
}
