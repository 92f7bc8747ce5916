use std::collections::HashMap;

use tracing::debug;

use crate::analyzers::types::RouteAverage;
use crate::analyzers::utility::mean;
use crate::dataset::{DESTINATION_CITY, Dataset, PRICE, ROUTE, SOURCE_CITY};
use crate::error::{DatasetError, Result};

/// Joins origin and destination into a route key.
pub const ROUTE_SEPARATOR: &str = " → ";

/// Number of routes shown in the average-price chart.
pub const DEFAULT_TOP_ROUTES: usize = 10;

pub fn route_key(source_city: &str, destination_city: &str) -> String {
    format!("{source_city}{ROUTE_SEPARATOR}{destination_city}")
}

/// Adds a `route` column built from `source_city` and `destination_city`.
///
/// Does nothing when the dataset already has a `route` column or lacks either
/// city column. Returns `true` only when the column was added, so a second
/// call is always a no-op.
pub fn derive_routes(dataset: &mut Dataset) -> bool {
    if dataset.has_column(ROUTE)
        || !dataset.has_column(SOURCE_CITY)
        || !dataset.has_column(DESTINATION_CITY)
    {
        return false;
    }

    for record in dataset.records_mut() {
        let source = record.source_city.as_deref().unwrap_or_default();
        let destination = record.destination_city.as_deref().unwrap_or_default();
        record.route = Some(route_key(source, destination));
    }
    dataset.add_column(ROUTE);

    debug!(records = dataset.len(), "Derived route column");
    true
}

/// Mean price per route, highest first, truncated to `limit` entries.
///
/// Routes with equal means keep the order in which they first appear in the
/// dataset.
///
/// # Errors
///
/// Returns [`crate::DatasetError::MissingField`] if `route` or `price` is
/// absent from a non-empty dataset. An empty dataset always yields no routes.
pub fn top_routes(dataset: &Dataset, limit: usize) -> Result<Vec<RouteAverage>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    dataset.require(ROUTE)?;
    dataset.require(PRICE)?;

    let mut order: Vec<&str> = Vec::new();
    let mut prices: HashMap<&str, Vec<f64>> = HashMap::new();

    for (i, record) in dataset.records().iter().enumerate() {
        let route = record
            .route
            .as_deref()
            .ok_or_else(|| DatasetError::missing(ROUTE))?;
        let price = record.numeric(PRICE, i + 1)?;

        prices
            .entry(route)
            .or_insert_with(|| {
                order.push(route);
                Vec::new()
            })
            .push(price);
    }

    let mut averages: Vec<RouteAverage> = order
        .into_iter()
        .map(|route| {
            let series = &prices[route];
            RouteAverage {
                route: route.to_string(),
                avg_price: mean(series),
                flights: series.len(),
            }
        })
        .collect();

    // sort_by is stable, so ties stay in first-seen order
    averages.sort_by(|a, b| b.avg_price.total_cmp(&a.avg_price));
    averages.truncate(limit);

    Ok(averages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_derive_routes_adds_column() {
        let mut ds = dataset(
            "source_city,destination_city,price\nDelhi,Mumbai,100\nDelhi,Mumbai,300\n",
        );

        assert!(derive_routes(&mut ds));
        assert!(ds.has_column(ROUTE));
        for record in ds.records() {
            assert_eq!(record.route.as_deref(), Some("Delhi → Mumbai"));
        }
    }

    #[test]
    fn test_derive_routes_is_idempotent() {
        let mut once = dataset("source_city,destination_city\nChennai,Kolkata\n");
        derive_routes(&mut once);

        let mut twice = once.clone();
        assert!(!derive_routes(&mut twice));
        assert_eq!(once, twice);
        assert_eq!(twice.columns().iter().filter(|c| *c == ROUTE).count(), 1);
    }

    #[test]
    fn test_derive_routes_keeps_existing_route() {
        let mut ds = dataset("source_city,destination_city,route\nDelhi,Mumbai,DEL-BOM\n");

        assert!(!derive_routes(&mut ds));
        assert_eq!(ds.records()[0].route.as_deref(), Some("DEL-BOM"));
    }

    #[test]
    fn test_derive_routes_without_cities_is_noop() {
        let mut ds = dataset("source_city,price\nDelhi,100\n");
        let before = ds.clone();

        assert!(!derive_routes(&mut ds));
        assert_eq!(ds, before);
    }

    #[test]
    fn test_top_routes_single_route_mean() {
        let mut ds = dataset(
            "source_city,destination_city,price\nDelhi,Mumbai,100\nDelhi,Mumbai,300\n",
        );
        derive_routes(&mut ds);

        let top = top_routes(&ds, DEFAULT_TOP_ROUTES).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].route, "Delhi → Mumbai");
        assert_eq!(top[0].avg_price, 200.0);
        assert_eq!(top[0].flights, 2);
    }

    #[test]
    fn test_top_routes_empty_dataset() {
        let ds = dataset("route,price\n");
        assert!(top_routes(&ds, DEFAULT_TOP_ROUTES).unwrap().is_empty());
    }

    #[test]
    fn test_top_routes_zero_byte_input() {
        let mut ds = dataset("");
        derive_routes(&mut ds);

        assert!(ds.columns().is_empty());
        assert!(top_routes(&ds, DEFAULT_TOP_ROUTES).unwrap().is_empty());
    }

    #[test]
    fn test_top_routes_sorted_and_truncated() {
        let mut csv = String::from("route,price\n");
        for i in 0..15 {
            csv.push_str(&format!("R{i},{}\n", i * 10));
        }
        let ds = dataset(&csv);

        let top = top_routes(&ds, DEFAULT_TOP_ROUTES).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].route, "R14");
        assert_eq!(top[9].route, "R5");
        assert!(top.windows(2).all(|w| w[0].avg_price >= w[1].avg_price));
    }

    #[test]
    fn test_top_routes_ties_keep_first_seen_order() {
        let ds = dataset("route,price\nB,50\nA,50\nC,80\nB,50\n");

        let top = top_routes(&ds, DEFAULT_TOP_ROUTES).unwrap();
        let names: Vec<_> = top.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_top_routes_missing_fields() {
        let ds = dataset("route\nA\n");
        assert!(matches!(
            top_routes(&ds, 10),
            Err(DatasetError::MissingField(f)) if f == "price"
        ));

        let ds = dataset("price\n10\n");
        assert!(matches!(
            top_routes(&ds, 10),
            Err(DatasetError::MissingField(f)) if f == "route"
        ));
    }
}
