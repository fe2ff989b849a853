use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rzb_stats::{PipelineTables, ScrapingContext, SeasonSelection, pipeline};

#[derive(Parser)]
#[command(name = "rzb_stats")]
#[command(about = "Scrape league team stats and summarize them by win count", long_about = None)]
struct Cli {
    /// Directory the CSV files and graphs are written to
    #[arg(short, long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file replacing the built-in column tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape an inclusive range of seasons
    Scrape {
        #[arg(long, default_value_t = 2045)]
        first: u32,
        #[arg(long, default_value_t = 2063)]
        last: u32,
    },
    /// Scrape the most recent season listed on the league index
    Latest,
    /// Filter, average and chart a curated multi-season CSV
    Historic {
        #[arg(long, default_value = "filtered_stats_2045_2063.csv")]
        input: PathBuf,
        /// Hand-smoothed reference curves keyed by wins
        #[arg(long, default_value = "smoothed_avg.csv")]
        smoothed: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let tables = match &cli.tables {
        Some(path) => PipelineTables::from_json_file(path)?,
        None => PipelineTables::default(),
    };

    match cli.command {
        Commands::Scrape { first, last } => {
            let context = ScrapingContext::new()?;
            let selection = SeasonSelection::Range { first, last };
            pipeline::run_scrape(&context, &tables, selection, &cli.output_dir).await?;
        }
        Commands::Latest => {
            let context = ScrapingContext::new()?;
            pipeline::run_scrape(&context, &tables, SeasonSelection::Latest, &cli.output_dir)
                .await?;
        }
        Commands::Historic { input, smoothed } => {
            pipeline::run_historic(&tables, &input, &smoothed, &cli.output_dir)?;
        }
    }
    Ok(())
}
