//! Dataset loading and storage
//!
//! The dataset is fetched once, from a local file or over HTTP, and kept in
//! memory. Until it is set, the store reports itself as not ready.

use crate::error::TravelRecsError;
use crate::models::Dataset;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Where the dataset document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// `http://` and `https://` sources are URLs, anything else is a path
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    /// Fetch and parse the dataset
    pub async fn load(&self, timeout: Duration) -> crate::Result<Dataset> {
        debug!("Loading dataset from {}", self);
        let json = match self {
            DatasetSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                TravelRecsError::dataset_load(format!("Failed to read {}: {e}", path.display()))
            })?,
            DatasetSource::Url(url) => fetch(url, timeout).await?,
        };

        Dataset::from_json(&json)
            .map_err(|e| TravelRecsError::dataset_load(format!("Invalid dataset document: {e}")))
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{url}"),
        }
    }
}

async fn fetch(url: &str, timeout: Duration) -> crate::Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TravelRecsError::dataset_load(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TravelRecsError::dataset_load(format!("Request to {url} failed: {e}")))?;

    if !response.status().is_success() {
        return Err(TravelRecsError::dataset_load(format!(
            "Request to {url} returned {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| TravelRecsError::dataset_load(format!("Failed to read response body: {e}")))
}

/// In-memory holder of the dataset, set at most once
#[derive(Debug, Default)]
pub struct DataStore {
    dataset: OnceCell<Dataset>,
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.dataset.initialized()
    }

    /// The dataset, if loaded
    #[must_use]
    pub fn get(&self) -> Option<&Dataset> {
        self.dataset.get()
    }

    /// Store the dataset. Fails if one is already stored.
    pub fn set(&self, dataset: Dataset) -> crate::Result<()> {
        let summary = (
            dataset.beaches.len(),
            dataset.temples.len(),
            dataset.countries.len(),
        );
        self.dataset
            .set(dataset)
            .map_err(|_| TravelRecsError::dataset_load("Dataset already loaded"))?;
        info!(
            "Dataset ready: {} beaches, {} temples, {} countries",
            summary.0, summary.1, summary.2
        );
        Ok(())
    }
}
