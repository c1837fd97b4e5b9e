//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Track daily routines and see how the month is going
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Self-hosted habit tracker with monthly insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "cadence.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set CADENCE_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Insights config file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record one day's routine
    ///
    /// Tasks are given as `id:text` or `id:text:done`, e.g.
    /// --morning "stretch:Stretch 10 minutes:done"
    Log {
        /// User id (created if missing)
        #[arg(short, long)]
        user: String,

        /// Day to record (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Mood rating, 1-5
        #[arg(long)]
        mood: Option<f64>,

        /// Energy level, 1-5
        #[arg(long)]
        energy: Option<f64>,

        /// Morning task (repeatable)
        #[arg(long)]
        morning: Vec<String>,

        /// Health task (repeatable)
        #[arg(long)]
        health: Vec<String>,

        /// Night task (repeatable)
        #[arg(long)]
        night: Vec<String>,
    },

    /// Import daily records from a JSON array
    Import {
        /// User id (created if missing)
        #[arg(short, long)]
        user: String,

        /// JSON file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List a month of routines with completion
    Routines {
        /// User id
        #[arg(short, long)]
        user: String,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        period: Option<String>,

        /// Only show one list: morning, health, or night
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show monthly insights and recommendations
    Insights {
        /// User id
        #[arg(short, long)]
        user: String,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        period: Option<String>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
