use std::io::Read;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use ureq::Agent;

use crate::catalog::Catalog;
use crate::models::RawRow;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog request failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    #[error("Catalog request returned status {0}")]
    HttpStatus(u16),

    #[error("Malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Fetches the catalog CSV from a file path or an HTTP(S) URL
pub struct CatalogClient {
    agent: Agent,
    source: String,
}

impl CatalogClient {
    pub fn new(source: impl Into<String>) -> Self {
        CatalogClient {
            agent: Agent::new(),
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    /// Read the raw catalog bytes. Encoding problems are left to the CSV reader, per record.
    fn fetch_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        let io_error = |source| CatalogError::Io {
            path: self.source.clone(),
            source,
        };

        if !self.is_remote() {
            return std::fs::read(&self.source).map_err(io_error);
        }

        let response = match self.agent.get(&self.source).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(CatalogError::HttpStatus(code)),
            Err(e) => return Err(CatalogError::Http(Box::new(e))),
        };
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(io_error)?;
        Ok(bytes)
    }

    /// Fetch and parse the catalog into raw rows
    pub fn fetch_rows(&self) -> Result<Vec<RawRow>, CatalogError> {
        let bytes = self.fetch_bytes()?;
        debug!(source = %self.source, bytes = bytes.len(), "Catalog fetched");
        Self::parse_rows(bytes.as_slice())
    }

    /// Parse CSV with a header row. Records that cannot be read, including ones that
    /// are not valid UTF-8, are skipped.
    pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            // Short records get empty trailing fields so missing columns read as absent
            let parsed = record.and_then(|mut record| {
                while record.len() < headers.len() {
                    record.push_field("");
                }
                record.deserialize::<RawRow>(Some(&headers))
            });
            match parsed {
                Ok(row) => rows.push(row),
                Err(e) => warn!(record = line + 1, error = %e, "Skipping unreadable catalog record"),
            }
        }
        Ok(rows)
    }

    /// Load and normalize the catalog. Any failure yields an empty catalog.
    pub fn load_catalog(&self, default_latest: &str) -> Catalog {
        match self.fetch_rows() {
            Ok(rows) => {
                info!(source = %self.source, rows = rows.len(), "Catalog loaded");
                Catalog::from_rows(rows, default_latest)
            }
            Err(e) => {
                error!(source = %self.source, error = %e, "Failed to load catalog; continuing with an empty catalog");
                Catalog::empty(default_latest)
            }
        }
    }
}
