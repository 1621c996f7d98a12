//! CLI command implementations.

pub mod auth;
pub mod dashboard;
pub mod get;

use clap::Args;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted for when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: String,

    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Path relative to the API base URL, e.g. `/analytics/form-status`.
    pub path: String,

    /// Query parameters as `key=value`.
    #[arg(short, long = "query", value_parser = parse_query)]
    pub query: Vec<(String, String)>,
}

fn parse_query(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}
