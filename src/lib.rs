pub mod analyzers;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod insight;
pub mod logging;
pub mod output;

pub use cache::DatasetCache;
pub use dataset::{Dataset, FlightRecord};
pub use error::DatasetError;
pub use fetch::DataSource;
