//! Reading raw dataset bytes from a file, a URL, or an uploaded buffer.

use std::io::Read;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
    /// Bytes handed over by an upload widget, with the client's file name.
    Upload { name: String, bytes: Vec<u8> },
}

/// Identity of a source, used as the session cache key.
///
/// Uploads are keyed by a hash of their content so re-uploading the same file
/// under another name still hits the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Path(PathBuf),
    Url(String),
    Upload(blake3::Hash),
}

impl DataSource {
    /// Treats anything starting with `http` as a URL, everything else as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    pub fn upload(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        DataSource::Upload {
            name: name.into(),
            bytes,
        }
    }

    pub fn key(&self) -> SourceKey {
        match self {
            DataSource::Path(path) => {
                SourceKey::Path(std::fs::canonicalize(path).unwrap_or_else(|_| path.clone()))
            }
            DataSource::Url(url) => SourceKey::Url(url.clone()),
            DataSource::Upload { bytes, .. } => SourceKey::Upload(blake3::hash(bytes)),
        }
    }

    fn name(&self) -> String {
        match self {
            DataSource::Path(path) => path.to_string_lossy().into_owned(),
            DataSource::Url(url) => url.clone(),
            DataSource::Upload { name, .. } => name.clone(),
        }
    }

    fn is_gzip(&self) -> bool {
        self.name().ends_with(".gz")
    }
}

pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Reads the raw bytes behind `source`, gunzipping `.gz` sources.
#[tracing::instrument(skip(source), fields(source = %source.name()))]
pub fn read_source(source: &DataSource) -> Result<Vec<u8>> {
    let raw = match source {
        DataSource::Path(path) => std::fs::read(path)?,
        DataSource::Url(url) => fetch_bytes(url)?,
        DataSource::Upload { bytes, .. } => bytes.clone(),
    };

    if !source.is_gzip() {
        debug!(bytes = raw.len(), "Source bytes read");
        return Ok(raw);
    }

    let mut decoded = Vec::new();
    GzDecoder::new(raw.as_slice()).read_to_end(&mut decoded)?;
    debug!(
        compressed = raw.len(),
        bytes = decoded.len(),
        "Source bytes decompressed"
    );
    Ok(decoded)
}

/// Reads and parses a dataset in one step.
pub fn load_dataset(source: &DataSource) -> Result<Dataset> {
    let bytes = read_source(source)?;
    Dataset::from_reader(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    const CSV: &str = "airline,price\nIndigo,100\n";

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DataSource::parse("https://example.com/flights.csv"),
            DataSource::Url("https://example.com/flights.csv".into())
        );
        assert_eq!(
            DataSource::parse("flight_cleaned.csv"),
            DataSource::Path(PathBuf::from("flight_cleaned.csv"))
        );
    }

    #[test]
    fn test_upload_key_is_content_hash() {
        let a = DataSource::upload("a.csv", CSV.as_bytes().to_vec());
        let b = DataSource::upload("b.csv", CSV.as_bytes().to_vec());
        let c = DataSource::upload("a.csv", b"airline\n".to_vec());

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_load_dataset_from_path() {
        let path = temp_path("flight_segmenter_test_load.csv");
        fs::write(&path, CSV).unwrap();

        let ds = load_dataset(&DataSource::Path(path.clone())).unwrap();
        assert_eq!(ds.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let source = DataSource::Path(temp_path("flight_segmenter_does_not_exist.csv"));
        assert!(matches!(
            load_dataset(&source),
            Err(crate::DatasetError::Io(_))
        ));
    }

    #[test]
    fn test_load_gzip_upload() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(CSV.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let ds = load_dataset(&DataSource::upload("flights.csv.gz", compressed)).unwrap();
        assert_eq!(ds.records()[0].price, Some(100.0));
    }
}
