use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::clusters::cluster_proportion;
use crate::analyzers::distribution::{categorical_distribution, grouped_numeric};
use crate::analyzers::routes::top_routes;
use crate::analyzers::types::{CategoryCount, ClusterProportion, FiveNumberSummary, RouteAverage};
use crate::dataset::{AIRLINE, CLASS, Dataset, PRICE};
use crate::error::Result;

/// Price spread for one travel class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPrice {
    pub class: String,
    pub flights: usize,
    pub summary: Option<FiveNumberSummary>,
}

/// Everything the EDA page shows, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdaReport {
    pub generated_at: DateTime<Utc>,
    pub records: usize,
    pub airlines: Vec<CategoryCount>,
    pub price_by_class: Vec<ClassPrice>,
    pub top_routes: Vec<RouteAverage>,
    pub clusters: ClusterProportion,
}

impl EdaReport {
    /// Builds the report from a dataset that already carries a `route` column
    /// (see [`crate::analyzers::routes::derive_routes`]).
    ///
    /// # Errors
    ///
    /// Propagates the first missing-field or data-type error hit by any chart.
    pub fn build(dataset: &Dataset, top: usize) -> Result<Self> {
        let price_by_class = grouped_numeric(dataset, CLASS, PRICE)?
            .into_iter()
            .map(|group| ClassPrice {
                flights: group.values.len(),
                summary: group.summary(),
                class: group.category,
            })
            .collect();

        Ok(EdaReport {
            generated_at: Utc::now(),
            records: dataset.len(),
            airlines: categorical_distribution(dataset, AIRLINE)?,
            price_by_class,
            top_routes: top_routes(dataset, top)?,
            clusters: cluster_proportion(dataset),
        })
    }
}
