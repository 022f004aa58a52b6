//! bookAM CLI
//!
//! Terminal front end for booking intercity bus seats, against a local
//! SQLite database or a bookAM REST backend.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use bookam_core::config::{Config, SessionFile};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        api_url,
        no_color,
        command,
    } = Args::parse();

    let config = Config::from_env().with_overrides(api_url, database_file);
    let backend = config
        .builder()
        .build()
        .await
        .context("Failed to initialize backend")?;
    info!("bookam using {}", backend.location());

    let session_file = match backend.as_local() {
        Some(local) => SessionFile::beside(local.database_path()),
        None => SessionFile::default_location().context("Failed to locate the session file")?,
    };
    let mut cli = Cli::new(backend, session_file, TerminalRenderer::new(!no_color))?;

    match command {
        Some(Account { command }) => cli.handle_account_command(command).await,
        Some(Bus { command }) => cli.handle_bus_command(command).await,
        Some(Route { command }) => cli.handle_route_command(command).await,
        Some(Booking { command }) => cli.handle_booking_command(command).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        Some(Book { command }) => cli.handle_book_command(command).await,
        Some(Draft { command }) => cli.handle_draft_command(command),
        Some(Seed) => cli.seed().await,
        None => cli.list_routes().await,
    }
}
