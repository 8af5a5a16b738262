//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use spatial_db::DbPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "SPATIAL_PORT", default_value = "5080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SPATIAL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "spatial.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, pool: DbPool, db_path: &Path) -> Result<()> {
    println!();
    println!("  {} {}", "Spatial".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}       http://{}:{}", "Map".green(), args.host, args.port);
    println!("  {}       http://{}:{}/Spatial", "API".green(), args.host, args.port);
    println!("  {}  {}", "Database".green(), db_path.display());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    spatial_web::run_server(Arc::new(pool), &args.host, args.port).await?;

    Ok(())
}
