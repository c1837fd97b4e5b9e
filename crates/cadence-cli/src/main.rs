//! Cadence CLI - Habit tracker with monthly insights
//!
//! Usage:
//!   cadence init                               Initialize database
//!   cadence log --user me --morning a:Stretch  Record today's routine
//!   cadence insights --user me --period 2024-01
//!   cadence serve --port 3000                  Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Log {
            user,
            date,
            mood,
            energy,
            morning,
            health,
            night,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let date = commands::resolve_date(date.as_deref())?;
            let record =
                commands::build_record(date, mood, energy, &morning, &health, &night)?;
            commands::cmd_log(&db, &user, &record)
        }
        Commands::Import { user, file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &user, &file)
        }
        Commands::Routines {
            user,
            period,
            category,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_period(period.as_deref())?;
            let category = commands::resolve_category(category.as_deref())?;
            commands::cmd_routines(&db, &user, &period, category)
        }
        Commands::Insights { user, period, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let period = commands::resolve_period(period.as_deref())?;
            let config = commands::load_insights_config(cli.config.as_deref())?;
            commands::cmd_insights(&db, &user, &period, config, json)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let config = commands::load_insights_config(cli.config.as_deref())?;
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                cli.no_encrypt,
                static_dir.as_deref(),
                config,
            )
            .await
        }
    }
}
