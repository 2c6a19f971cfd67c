//! CLI command implementations.

mod auth;
mod credentials;

pub use auth::{login, logout, portal_link, portal_login, register, status};
pub use credentials::{credentials_list, reveal};

use anyhow::Result;
use portal_api::PortalClient;
use portal_core::{init_logging, Config, Paths};
use portal_session::AuthFacade;
use portal_storage::{CredentialStore, FileStorage, MemoryStorage};

/// Shared command context: the facade over a resolved session.
pub struct App {
    facade: AuthFacade<PortalClient>,
}

impl App {
    pub fn facade(&self) -> &AuthFacade<PortalClient> {
        &self.facade
    }
}

/// Load config, set up logging and storage, and resolve the stored session
/// before any command runs.
pub async fn bootstrap(log_level: Option<&str>) -> Result<App> {
    let paths = Paths::new()?;
    paths.ensure_dirs()?;

    let config = Config::load(&paths)?;
    init_logging(log_level.unwrap_or(&config.log_level));

    let durable = FileStorage::new(paths.credentials_file())?;
    let store = CredentialStore::new(Box::new(durable), Box::new(MemoryStorage::new()));
    let client = PortalClient::new(&config.api_url);

    let facade = AuthFacade::new(client, store);
    facade.init().await;

    Ok(App { facade })
}

/// Read one trimmed line from stdin with a visible prompt.
fn prompt_line(label: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{}: ", label);
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}
