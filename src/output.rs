//! Output formatting and persistence for computed views.
//!
//! Supports plain-text tables, JSON serialization, and CSV export.

use std::fmt::Write as _;
use std::fs::File;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::report::EdaReport;
use crate::analyzers::types::ClusterProportion;
use crate::dataset::Dataset;
use crate::insight::{CLUSTER_SUMMARY, PROMOS, SEGMENTS, segment_for, summary_for};

/// Logs any result using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Serializes any result as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `rows` to a CSV file with a single header line, replacing any
/// existing file.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV export");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Record count, column list, and the first `rows` records.
pub fn render_overview(dataset: &Dataset, rows: usize) -> Result<String> {
    let mut out = String::new();
    let columns = dataset.columns();

    writeln!(out, "Dataset overview")?;
    writeln!(out, "  records: {}", dataset.len())?;
    writeln!(out, "  columns: {}", columns.join(", "))?;
    writeln!(out)?;

    writeln!(out, "{}", columns.join(" | "))?;
    for record in dataset.head(rows) {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| record.category(column).unwrap_or_default().into_owned())
            .collect();
        writeln!(out, "{}", cells.join(" | "))?;
    }
    Ok(out)
}

pub fn render_eda(report: &EdaReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Exploratory data analysis ({} records)", report.records)?;

    writeln!(out, "\n1. Distribution by airline")?;
    for entry in &report.airlines {
        writeln!(out, "  {:<20} {:>8}", entry.category, entry.count)?;
    }

    writeln!(out, "\n2. Price distribution by class")?;
    writeln!(
        out,
        "  {:<12} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "class", "flights", "min", "q1", "median", "q3", "max"
    )?;
    for class in &report.price_by_class {
        match &class.summary {
            Some(s) => writeln!(
                out,
                "  {:<12} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                class.class, class.flights, s.min, s.q1, s.median, s.q3, s.max
            )?,
            None => writeln!(out, "  {:<12} {:>7}", class.class, class.flights)?,
        }
    }

    writeln!(out, "\n3. Average price by route")?;
    for route in &report.top_routes {
        writeln!(
            out,
            "  {:<30} {:>10.2} ({} flights)",
            route.route, route.avg_price, route.flights
        )?;
    }

    writeln!(out)?;
    out.push_str(&render_proportion(&report.clusters)?);
    Ok(out)
}

/// Live cluster shares, next to the precomputed average price of each
/// cluster for comparison.
pub fn render_proportion(proportion: &ClusterProportion) -> Result<String> {
    let mut out = String::new();
    let shares = match proportion {
        ClusterProportion::Unavailable => {
            writeln!(out, "Cluster proportion: unavailable (no cluster column)")?;
            return Ok(out);
        }
        ClusterProportion::Available(shares) => shares,
    };

    writeln!(out, "Cluster proportion")?;
    for share in shares {
        let label = segment_for(share.cluster).map_or("unlabelled", |s| s.label);
        write!(
            out,
            "  cluster {} {:>6.2}% ({}) {}",
            share.cluster,
            share.fraction * 100.0,
            share.count,
            label
        )?;
        match summary_for(share.cluster) {
            Some(summary) => {
                writeln!(out, " [precomputed avg price {:.2}]", summary.avg_price)?
            }
            None => writeln!(out)?,
        }
    }
    Ok(out)
}

/// The authored cluster table. These numbers are fixed and do not follow the
/// loaded dataset.
pub fn render_clusters() -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Cluster insight (precomputed)")?;
    writeln!(
        out,
        "  {:<8} {:>10} {:>20} {:>10}  segment",
        "cluster", "avg price", "avg duration (hrs)", "days left"
    )?;
    for summary in &CLUSTER_SUMMARY {
        let label = segment_for(summary.cluster_id).map_or("", |s| s.label);
        writeln!(
            out,
            "  {:<8} {:>10.2} {:>20.2} {:>10.2}  {}",
            summary.cluster_id,
            summary.avg_price,
            summary.avg_duration_hrs,
            summary.avg_days_left,
            label
        )?;
    }
    Ok(out)
}

pub fn render_recommendations() -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Strategic recommendations")?;
    for segment in &SEGMENTS {
        writeln!(out, "  Cluster {} -> {}", segment.cluster_id, segment.recommendation)?;
    }
    writeln!(out, "\nPromo samples")?;
    for promo in &PROMOS {
        writeln!(out, "  {}: {}", promo.name, promo.description)?;
    }
    Ok(out)
}
