//! In-memory flight dataset and its CSV parser.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{DatasetError, Result};

pub const AIRLINE: &str = "airline";
pub const CLASS: &str = "class";
pub const SOURCE_CITY: &str = "source_city";
pub const DESTINATION_CITY: &str = "destination_city";
pub const ROUTE: &str = "route";
pub const PRICE: &str = "price";
pub const DURATION: &str = "duration";
pub const DAYS_LEFT: &str = "days_left";
pub const CLUSTER: &str = "cluster";

/// A single flight ticket row.
///
/// Known columns are typed; every other header column is kept verbatim in
/// `extra`. A field is `None` only when its column is absent from the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl FlightRecord {
    fn from_row(columns: &[String], row: &csv::StringRecord, row_no: usize) -> Result<Self> {
        let mut flight = FlightRecord::default();

        for (column, value) in columns.iter().zip(row.iter()) {
            match column.as_str() {
                AIRLINE => flight.airline = Some(value.to_string()),
                CLASS => flight.class = Some(value.to_string()),
                SOURCE_CITY => flight.source_city = Some(value.to_string()),
                DESTINATION_CITY => flight.destination_city = Some(value.to_string()),
                ROUTE => flight.route = Some(value.to_string()),
                PRICE => {
                    let price: f64 = parse_field(PRICE, row_no, value)?;
                    if !price.is_finite() || price < 0.0 {
                        return Err(type_error(PRICE, row_no, value));
                    }
                    flight.price = Some(price);
                }
                DURATION => {
                    let duration: f64 = parse_field(DURATION, row_no, value)?;
                    if !duration.is_finite() {
                        return Err(type_error(DURATION, row_no, value));
                    }
                    flight.duration = Some(duration);
                }
                DAYS_LEFT => flight.days_left = Some(parse_field(DAYS_LEFT, row_no, value)?),
                CLUSTER => flight.cluster = Some(parse_field(CLUSTER, row_no, value)?),
                _ => {
                    flight.extra.insert(column.clone(), value.to_string());
                }
            }
        }

        Ok(flight)
    }

    /// Returns the value of `field` as text, if the record has it.
    ///
    /// Typed numeric columns are rendered back to text so they can be used
    /// as categories (e.g. counting records per `cluster`).
    pub fn category(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            AIRLINE => self.airline.as_deref().map(Cow::Borrowed),
            CLASS => self.class.as_deref().map(Cow::Borrowed),
            SOURCE_CITY => self.source_city.as_deref().map(Cow::Borrowed),
            DESTINATION_CITY => self.destination_city.as_deref().map(Cow::Borrowed),
            ROUTE => self.route.as_deref().map(Cow::Borrowed),
            PRICE => self.price.map(|p| Cow::Owned(p.to_string())),
            DURATION => self.duration.map(|d| Cow::Owned(d.to_string())),
            DAYS_LEFT => self.days_left.map(|d| Cow::Owned(d.to_string())),
            CLUSTER => self.cluster.map(|c| Cow::Owned(c.to_string())),
            _ => self.extra.get(field).map(|v| Cow::Borrowed(v.as_str())),
        }
    }

    /// Like [`category`](Self::category), but a missing value is a
    /// [`DatasetError::MissingField`].
    pub fn require_category(&self, field: &str) -> Result<Cow<'_, str>> {
        self.category(field).ok_or_else(|| DatasetError::missing(field))
    }

    /// Returns the value of `field` as a number.
    ///
    /// Typed numeric columns are returned directly; any other column is parsed
    /// from its text, and a value that does not parse is a
    /// [`DatasetError::DataType`] tagged with `row`.
    pub fn numeric(&self, field: &str, row: usize) -> Result<f64> {
        let typed = match field {
            PRICE => self.price,
            DURATION => self.duration,
            DAYS_LEFT => self.days_left.map(|d| d as f64),
            CLUSTER => self.cluster.map(f64::from),
            _ => None,
        };
        if let Some(value) = typed {
            return Ok(value);
        }

        let raw = self.require_category(field)?;
        let value: f64 = parse_field(field, row, &raw)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(type_error(field, row, &raw))
        }
    }
}

fn parse_field<T: FromStr>(field: &str, row: usize, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| type_error(field, row, value))
}

fn type_error(field: &str, row: usize, value: &str) -> DatasetError {
    DatasetError::DataType {
        field: field.to_string(),
        row,
        value: value.to_string(),
    }
}

/// An ordered collection of [`FlightRecord`]s sharing one header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<FlightRecord>,
}

impl Dataset {
    /// Parses comma-separated text with a header row.
    ///
    /// # Errors
    ///
    /// Fails on malformed CSV (including ragged rows) and on any value in a
    /// numeric column that does not parse. Row numbers in errors are 1-based
    /// and count data rows only.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            let row = result?;
            records.push(FlightRecord::from_row(&columns, &row, i + 1)?);
        }

        debug!(
            columns = columns.len(),
            records = records.len(),
            "Dataset parsed"
        );
        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fails with [`DatasetError::MissingField`] unless `name` is a column.
    pub fn require(&self, name: &str) -> Result<()> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(DatasetError::missing(name))
        }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records, for previews.
    pub fn head(&self, n: usize) -> &[FlightRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub(crate) fn add_column(&mut self, name: &str) {
        self.columns.push(name.to_string());
    }

    pub(crate) fn records_mut(&mut self) -> &mut [FlightRecord] {
        &mut self.records
    }
}
