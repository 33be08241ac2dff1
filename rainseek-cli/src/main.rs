mod output;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use output::{ConsoleSink, NdjsonSink};
use rainseek_core::model::SearchRequest;
use rainseek_core::numbers::i64_to_f64;
use rainseek_core::search::{SearchOptions, SearchSummary, search_with};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Colored human-readable report
    Console,
    /// One JSON event frame per line
    Ndjson,
}

#[derive(Debug, Parser)]
#[command(name = "rainseek", version)]
#[command(about = "Search game seeds whose first-year weather satisfies rainfall conditions")]
struct Args {
    /// First seed of the inclusive scan range
    #[arg(long, default_value_t = 0, conflicts_with = "request")]
    start_seed: i64,

    /// Last seed of the inclusive scan range
    #[arg(long, conflicts_with = "request")]
    end_seed: Option<i64>,

    /// Use the additive legacy seed mixing instead of hashing
    #[arg(long, conflicts_with = "request")]
    legacy: bool,

    /// Rainfall conditions as a JSON array of
    /// {"season","startDay","endDay","minRainDays"} objects
    #[arg(long, conflicts_with = "request")]
    conditions: Option<String>,

    /// Maximum number of seeds to report
    #[arg(long, default_value_t = 10, conflicts_with = "request")]
    limit: i32,

    /// Read a complete search request from a JSON file instead of flags
    #[arg(long)]
    request: Option<PathBuf>,

    /// Event output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Override the derived worker count
    #[arg(long)]
    workers: Option<usize>,

    /// Attach per-season rain listings to found events
    #[arg(long)]
    detail: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let request = build_request(&args)?;
    request
        .validate()
        .context("search request failed validation")?;

    let options = SearchOptions {
        workers: args.workers,
        include_weather_detail: args.detail,
        ..SearchOptions::default()
    };

    let summary = match args.format {
        OutputFormat::Console => run_console(&request, &options)?,
        OutputFormat::Ndjson => {
            let sink = NdjsonSink;
            search_with(&request, &sink, &options)?
        }
    };

    if matches!(args.format, OutputFormat::Console) {
        print_summary(&summary);
    }
    Ok(())
}

fn build_request(args: &Args) -> Result<SearchRequest> {
    if let Some(path) = &args.request {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse request file {}", path.display()));
    }

    let Some(end_seed) = args.end_seed else {
        bail!("--end-seed is required unless --request is given");
    };
    let weather_conditions = match &args.conditions {
        Some(raw) => serde_json::from_str(raw).context("failed to parse --conditions JSON")?,
        None => Vec::new(),
    };

    Ok(SearchRequest {
        start_seed: args.start_seed,
        end_seed,
        use_legacy_random: args.legacy,
        weather_conditions,
        output_limit: args.limit,
    })
}

fn run_console(request: &SearchRequest, options: &SearchOptions) -> Result<SearchSummary> {
    println!("{}", "Rainseek seed search".bright_cyan().bold());
    println!("{}", "====================".cyan());
    println!(
        "Range: {}..={} ({} seeds)",
        request.start_seed,
        request.end_seed,
        request.total_seeds()
    );
    println!(
        "Random mode: {}",
        if request.use_legacy_random {
            "legacy (additive)"
        } else {
            "hashed"
        }
    );
    if request.weather_conditions.is_empty() {
        println!("Conditions: none (every seed matches)");
    } else {
        for condition in &request.weather_conditions {
            println!("Condition: {condition}");
        }
    }
    println!(
        "Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    let sink = ConsoleSink;
    let summary = search_with(request, &sink, options)?;
    Ok(summary)
}

fn print_summary(summary: &SearchSummary) {
    println!();
    println!("{}", "Search complete".bright_yellow().bold());
    println!("{}", "===============".yellow());
    let found = summary.matches.len().to_string();
    println!(
        "Found: {}",
        if summary.matches.is_empty() {
            found.red()
        } else {
            found.green()
        }
    );
    println!("Checked: {} seeds on {} workers", summary.checked, summary.workers);
    let secs = summary.elapsed.as_secs_f64();
    if secs > 0.0 {
        println!(
            "Elapsed: {secs:.2}s ({:.0} seeds/s)",
            i64_to_f64(summary.checked) / secs
        );
    }
    if !summary.matches.is_empty() {
        println!("Seeds: {:?}", summary.matches);
    }
}
