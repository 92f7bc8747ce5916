//! Aggregations behind the EDA and cluster views.
//!
//! Every function here is a single pass over a [`crate::Dataset`] snapshot
//! and returns plain serializable results; only [`routes::derive_routes`]
//! mutates its input.

pub mod clusters;
pub mod distribution;
pub mod report;
pub mod routes;
pub mod types;
pub mod utility;
