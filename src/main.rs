use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use hoops_trend::config::Config;
use hoops_trend::{export, pipeline};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut config = Config::from_env();
    if let Some(dir) = path_arg(&args, "--data") {
        config.data_dir = dir;
    }
    if let Some(out) = path_arg(&args, "--out") {
        config.export_path = Some(out);
    }
    let as_json = args.iter().any(|a| a == "--json");

    info!("reading seasons from {}", config.data_dir.display());
    let output = pipeline::run(&config)
        .with_context(|| format!("pipeline failed for {}", config.data_dir.display()))?;

    if let Some(path) = config.export_path.as_ref() {
        let report = export::write_workbook(path, &output)?;
        info!(
            players = report.players,
            improvement = report.improvement_rows,
            decline = report.decline_rows,
            "wrote workbook {}",
            path.display()
        );
    }

    if as_json {
        println!("{}", export::to_json(&output)?);
        return Ok(());
    }

    let report = &output.report;
    println!("Players tracked: {}", output.ratings.len());
    println!();
    println!("Most improved:");
    for row in &report.most_improved {
        println!("  {:<28} {:>8.2}", row.name, row.improvement_rating.unwrap_or_default());
    }
    println!("Least improved:");
    for row in &report.least_improved {
        println!("  {:<28} {:>8.2}", row.name, row.improvement_rating.unwrap_or_default());
    }
    println!();
    println!("Youngest decline:");
    for row in &report.youngest_decliners {
        println!("  {:<28} {:>4} (season {})", row.name, row.decline_age, row.season);
    }
    println!("Oldest decline:");
    for row in &report.oldest_decliners {
        println!("  {:<28} {:>4} (season {})", row.name, row.decline_age, row.season);
    }
    if let Some(avg) = report.decline_summary.average_age {
        println!();
        println!(
            "Average decline age: {avg:.2} across {} players",
            report.decline_summary.players
        );
    }

    Ok(())
}

fn path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
