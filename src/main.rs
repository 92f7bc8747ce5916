//! CLI entry point for the flight segmentation viewer.
//!
//! Each subcommand renders one page of the analysis: dataset overview, EDA
//! charts as tables, the precomputed cluster insight, and recommendations.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flight_segmenter::{
    DataSource, DatasetCache,
    analyzers::{clusters::cluster_proportion, report::EdaReport},
    config::AppConfig,
    insight::{CLUSTER_SUMMARY, PROMOS, SEGMENTS},
    logging,
    output::{
        print_pretty, render_clusters, render_eda, render_overview, render_proportion,
        render_recommendations, to_json, write_csv,
    },
};
use tracing::info;

#[derive(Parser)]
#[command(name = "flight_segmenter")]
#[command(about = "Explore a segmented flight-price dataset", long_about = None)]
struct Cli {
    /// Path or URL of the flight CSV (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record count, columns, and the first rows
    Overview {
        /// Number of rows to preview
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Airline counts, price by class, top routes, and cluster shares
    Eda {
        /// Number of routes in the average-price ranking
        #[arg(short, long)]
        top: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// CSV file to export the route ranking to
        #[arg(short, long)]
        export: Option<String>,
    },
    /// Precomputed cluster summary and, if available, live cluster shares
    Clusters {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Strategic recommendations and promo samples per segment
    Recommendations,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init()?;

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let source = DataSource::parse(cli.data.as_deref().unwrap_or(&config.data_path));
    let mut cache = DatasetCache::new();

    match cli.command {
        Commands::Overview { rows } => {
            let dataset = cache.load(&source)?;
            let rows = rows.unwrap_or(config.preview_rows);
            print!("{}", render_overview(dataset, rows)?);
        }
        Commands::Eda {
            top,
            format,
            export,
        } => {
            let dataset = cache.load_with_routes(&source)?;
            let report = EdaReport::build(dataset, top.unwrap_or(config.top_routes))?;
            print_pretty(&report);

            if let Some(path) = export {
                write_csv(&path, &report.top_routes)?;
                info!(path = %path, routes = report.top_routes.len(), "Route ranking exported");
            }

            match format {
                Format::Text => print!("{}", render_eda(&report)?),
                Format::Json => println!("{}", to_json(&report)?),
            }
        }
        Commands::Clusters { format } => {
            let proportion = cluster_proportion(cache.load(&source)?);
            match format {
                Format::Text => {
                    print!("{}", render_clusters()?);
                    print!("\n{}", render_proportion(&proportion)?);
                }
                Format::Json => {
                    let view = serde_json::json!({
                        "summary": CLUSTER_SUMMARY,
                        "segments": SEGMENTS,
                        "proportion": proportion,
                    });
                    println!("{}", to_json(&view)?);
                }
            }
        }
        Commands::Recommendations => {
            print!("{}", render_recommendations()?);
            info!(promos = PROMOS.len(), "Recommendations shown");
        }
    }

    cache.clear();
    Ok(())
}
