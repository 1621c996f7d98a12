//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use stride_sdk::{ClientConfig, FileStore, StrideClient};

use crate::navigator::TerminalNavigator;
use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 3] = ["stride.toml", ".stride.toml", "stride.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Client configuration.
    pub config: ClientConfig,
    /// Output handler.
    pub output: Output,
    /// Where the session is persisted.
    pub state_path: PathBuf,
    /// Navigator shared with the client.
    pub navigator: Arc<TerminalNavigator>,
    /// Service client.
    pub client: StrideClient,
}

impl Context {
    /// Load config, open the session state and build the client.
    ///
    /// Environment variables override file settings.
    pub fn load(config_path: Option<&Path>, state_path: Option<PathBuf>, output: Output) -> Result<Self> {
        let config = match config_path {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                find_config(&cwd).unwrap_or_default()
            }
        };
        let config = config
            .with_env()
            .context("Invalid environment configuration")?;

        let state_path = match state_path {
            Some(path) => path,
            None => default_state_path(),
        };
        output.debug(&format!("API: {}", config.base_url));
        output.debug(&format!("Session state: {}", state_path.display()));

        let navigator = Arc::new(TerminalNavigator::new(output.clone()));
        let client = StrideClient::new(
            &config,
            Arc::new(FileStore::open(&state_path)),
            navigator.clone(),
        )
        .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            output,
            state_path,
            navigator,
            client,
        })
    }

    /// Mark the configured login entry point as the active location, so a
    /// rejected sign-in is not reported as an expired session.
    pub fn enter_login(&self) {
        self.navigator.navigate(self.config.login_path.as_str());
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<ClientConfig> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|path| path.exists())
            .find_map(|path| match ClientConfig::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable config");
                    None
                }
            })
    })
}

/// `<config dir>/stride/session.json`.
fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("stride")
        .join("session.json")
}
