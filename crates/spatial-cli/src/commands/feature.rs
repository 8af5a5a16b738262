//! Feature management commands.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use spatial_core::feature::{self, model::FeatureInput};
use spatial_core::{Envelope, SpatialResult};
use spatial_db::DbPool;
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct AddArgs {
    /// Feature name (1-100 characters)
    pub name: String,

    /// Geometry as WKT, e.g. "POINT(30 10)"
    pub wkt: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding an array of {"name", "wkt"} objects
    pub file: PathBuf,
}

#[derive(Args)]
pub struct IdArgs {
    /// Feature id
    pub id: i64,
}

#[derive(Args)]
pub struct ListArgs {
    /// First id of the range (inclusive)
    #[arg(long, requires = "to")]
    pub from: Option<i64>,

    /// Last id of the range (inclusive)
    #[arg(long, requires = "from")]
    pub to: Option<i64>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Feature id
    pub id: i64,

    /// New name
    pub name: String,

    /// New geometry as WKT
    pub wkt: String,
}

pub async fn add(pool: &DbPool, args: AddArgs, json: bool) -> Result<()> {
    let result = feature::add_feature(pool, &args.name, &args.wkt).await;
    report(result, json, "Feature added", |f| output::print_feature(f))
}

pub async fn import(pool: &DbPool, args: ImportArgs, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let items: Vec<FeatureInput> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.file.display()))?;

    let result = feature::add_range(pool, &items).await;
    report(result, json, "All features added", |features| {
        output::print_features_table(features)
    })
}

pub async fn get(pool: &DbPool, args: IdArgs, json: bool) -> Result<()> {
    let result = feature::get_feature(pool, args.id).await;
    report(result, json, "Feature found", |f| output::print_feature(f))
}

pub async fn list(pool: &DbPool, args: ListArgs, json: bool) -> Result<()> {
    let result = match (args.from, args.to) {
        (Some(from), Some(to)) => feature::list_between(pool, from, to).await,
        _ => feature::list_features(pool).await,
    };
    report(result, json, "Features returned", |features| {
        output::print_features_table(features)
    })
}

pub async fn update(pool: &DbPool, args: UpdateArgs, json: bool) -> Result<()> {
    let result = feature::update_feature(pool, args.id, &args.name, &args.wkt).await;
    report(result, json, "Feature updated", |f| output::print_feature(f))
}

pub async fn delete(pool: &DbPool, args: IdArgs, json: bool) -> Result<()> {
    let result = feature::delete_feature(pool, args.id).await;
    report(result, json, "Feature deleted", |f| output::print_feature(f))
}

/// A failure that [`report`] already printed; `main` exits non-zero
/// without printing it again.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("command failed")
    }
}

impl std::error::Error for Reported {}

/// Print a service result, either as its envelope or for a terminal.
///
/// Failures still print, then surface as [`Reported`] so the exit status is
/// non-zero.
fn report<T, F>(result: SpatialResult<T>, json: bool, message: &str, print: F) -> Result<()>
where
    T: serde::Serialize,
    F: FnOnce(&T),
{
    let envelope = Envelope::from_result(result, message);

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else if let Some(data) = &envelope.data {
        println!("{} {}", "✓".green().bold(), envelope.message);
        print(data);
    } else {
        println!("{} {}", "✗".red().bold(), envelope.message);
        output::print_failures(&envelope.errors);
    }

    if envelope.success {
        Ok(())
    } else {
        Err(Reported.into())
    }
}
