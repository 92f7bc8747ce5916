//! Result types handed to the presentation layer.

use serde::Serialize;

use crate::analyzers::utility::quantile;

/// Mean ticket price for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAverage {
    pub route: String,
    pub avg_price: f64,
    pub flights: usize,
}

/// Number of records holding one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Raw numeric values partitioned under one category, in record order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericGroup {
    pub category: String,
    pub values: Vec<f64>,
}

impl NumericGroup {
    /// Box-plot style summary of the group. `None` when the group is empty.
    pub fn summary(&self) -> Option<FiveNumberSummary> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        Some(FiveNumberSummary {
            min: *sorted.first()?,
            q1: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q3: quantile(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

/// Min, quartiles, and max of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Share of records carrying one cluster label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterShare {
    pub cluster: u32,
    pub count: usize,
    pub fraction: f64,
}

/// Cluster breakdown of a dataset.
///
/// `Unavailable` means the dataset has no `cluster` column at all; an empty
/// `Available` list means the column exists but there are no records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "shares", rename_all = "snake_case")]
pub enum ClusterProportion {
    Unavailable,
    Available(Vec<ClusterShare>),
}

impl ClusterProportion {
    pub fn shares(&self) -> Option<&[ClusterShare]> {
        match self {
            ClusterProportion::Unavailable => None,
            ClusterProportion::Available(shares) => Some(shares),
        }
    }
}
