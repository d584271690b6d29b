mod cache;
mod calendar;
mod discovery;
mod fetcher;
mod locale;
mod parser;
mod settings;
mod warm;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use calendar::QueryDate;
use locale::Language;
use parser::Role;

#[derive(Parser)]
#[command(name = "onthisday", about = "What happened on this day, from Wikipedia day pages")]
struct Cli {
    /// Cache directory (overrides ONTHISDAY_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Events for a date in both languages, as JSON
    Discover {
        /// Date as YYYY-MM-DD (default: today)
        date: Option<QueryDate>,
        #[arg(long, default_value = "ko")]
        primary: Language,
        #[arg(long, default_value = "en")]
        secondary: Language,
    },
    /// Events for a date in one language, one per line
    Events {
        /// Date as YYYY-MM-DD
        date: QueryDate,
        #[arg(short, long, default_value = "ko")]
        lang: Language,
        /// Tag events as coming from the foreign language
        #[arg(long)]
        foreign: bool,
    },
    /// Prefetch every calendar day of a language into the cache
    Warm {
        #[arg(short, long)]
        lang: Language,
        /// Parallel requests (default: ONTHISDAY_WARM_CONCURRENCY)
        #[arg(short = 'n', long)]
        concurrency: Option<usize>,
    },
    /// Show cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = settings::Settings::load()?;
    if let Some(dir) = cli.cache_dir {
        settings.cache_dir = dir;
    }

    let store = cache::CacheStore::new(&settings.cache_dir);
    let client = fetcher::WikiClient::new(&settings)?;
    let pipeline = discovery::Pipeline::new(store, client);

    let result = match cli.command {
        Commands::Discover {
            date,
            primary,
            secondary,
        } => {
            let date = date.unwrap_or_else(QueryDate::today);
            let discovery = pipeline.discover(date, primary, secondary).await;
            let json = serde_json::to_string_pretty(&discovery)
                .context("Failed to serialize discovery")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Events {
            date,
            lang,
            foreign,
        } => {
            let role = if foreign { Role::Secondary } else { Role::Primary };
            let events = pipeline.events(lang, date, role).await;
            if events.is_empty() {
                println!("No {} events found for {}.", lang, date);
                return Ok(());
            }
            for event in &events {
                println!("{:>4} | {}", event.year(), event.text());
            }
            println!("\n{} events", events.len());
            Ok(())
        }
        Commands::Warm { lang, concurrency } => {
            let concurrency = concurrency.unwrap_or(settings.warm_concurrency);
            let stats = warm::warm(Arc::new(pipeline), lang, concurrency).await?;
            println!(
                "Done: {} days ({} already cached, {} fetched, {} errors).",
                stats.total, stats.cached, stats.fetched, stats.errors
            );
            Ok(())
        }
        Commands::Stats => {
            let cache = pipeline.cache();
            println!("Cache dir: {}", cache.root().display());
            for lang in Language::ALL {
                println!("{}:        {} / 366 days", lang, cache.count(lang));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
