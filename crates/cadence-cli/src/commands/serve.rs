//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::insights::InsightsConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    insights: InsightsConfig,
) -> Result<()> {
    println!("🚀 Starting Cadence web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!("   Insights cache TTL: {}s", insights.ttl.as_secs());
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = cadence_server::ServerConfig {
        allowed_origins: vec![],
        insights,
    };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    cadence_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
