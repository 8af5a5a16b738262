//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod feature;
pub mod serve;

/// Store and serve named WKT features
#[derive(Parser)]
#[command(name = "spatial")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "SPATIAL_DB", default_value = "spatial.db")]
    pub db: PathBuf,

    /// Print results as JSON envelopes
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Add a feature
    Add(feature::AddArgs),

    /// Add every feature from a JSON file, or none if any is invalid
    Import(feature::ImportArgs),

    /// Show a feature
    Get(feature::IdArgs),

    /// List features, optionally within an id range
    List(feature::ListArgs),

    /// Replace a feature's name and geometry
    Update(feature::UpdateArgs),

    /// Delete a feature
    Delete(feature::IdArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        tracing::debug!(db = %self.db.display(), "opening database");
        let pool = spatial_db::init_pool(&self.db).await?;
        let json = self.json;

        match self.command {
            Commands::Serve(args) => serve::execute(args, pool, &self.db).await,
            Commands::Add(args) => feature::add(&pool, args, json).await,
            Commands::Import(args) => feature::import(&pool, args, json).await,
            Commands::Get(args) => feature::get(&pool, args, json).await,
            Commands::List(args) => feature::list(&pool, args, json).await,
            Commands::Update(args) => feature::update(&pool, args, json).await,
            Commands::Delete(args) => feature::delete(&pool, args, json).await,
        }
    }
}
