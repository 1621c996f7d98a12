//! Stride CLI - Command line client for the stride coaching service.
//!
//! Commands:
//! - `stride login` - Sign in and store the session
//! - `stride register` - Create an account
//! - `stride logout` - Drop the stored session
//! - `stride whoami` - Show the signed-in user
//! - `stride dashboard` - Show the training dashboard
//! - `stride get` - Fetch any endpoint as JSON

mod commands;
mod context;
mod navigator;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{GetArgs, LoginArgs, RegisterArgs};

/// Stride CLI - Talk to the stride coaching service
#[derive(Parser)]
#[command(name = "stride")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Session state file (default: <config dir>/stride/session.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the training dashboard
    Dashboard,

    /// GET an endpoint and print the JSON response
    Get(GetArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    stride_sdk::init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.state, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Dashboard => commands::dashboard::run(&ctx).await,
        Commands::Get(args) => commands::get::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
