//! Listing store: loads the two static sources once and keeps them read-only.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────┐   ┌──────────────────────────────┐
//! │ listings CSV              │   │ canton boundaries GeoJSON    │
//! └─────────────┬─────────────┘   └──────────────┬───────────────┘
//!               │ read_listings                  │ read_boundaries
//! ┌─────────────▼────────────────────────────────▼───────────────┐
//! │ Dataset (ListingCollection + BoundaryCollection + metadata)   │
//! │ - built once per (sources, policy), memoized in load_cached   │
//! │ - shared as Arc<Dataset>, never mutated                       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ &ListingCollection
//!                        services (query pipeline)
//! ```

pub mod boundaries;
pub mod checksum;
pub mod error;
pub mod export;
pub mod listings;

pub use boundaries::{read_boundaries, DEFAULT_CODE_PROPERTY};
pub use checksum::calculate_checksum;
pub use error::{StoreError, StoreResult};
pub use export::{listings_to_csv_string, write_listings_csv, EXPORT_HEADER};
pub use listings::{read_listings, LoadSummary};

use chrono::{DateTime, Utc};
use log::info;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::models::{BoundaryCollection, BucketingPolicy, ListingCollection};

/// Identity of a dataset: where it comes from and how it is categorized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSources {
    pub listings_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub policy: BucketingPolicy,
    /// Feature property holding the canton code in the boundary source.
    pub boundary_code_property: String,
}

impl DataSources {
    pub fn new(
        listings_path: impl Into<PathBuf>,
        boundaries_path: impl Into<PathBuf>,
        policy: BucketingPolicy,
    ) -> Self {
        Self {
            listings_path: listings_path.into(),
            boundaries_path: boundaries_path.into(),
            policy,
            boundary_code_property: DEFAULT_CODE_PROPERTY.to_string(),
        }
    }

    pub fn with_code_property(mut self, property: impl Into<String>) -> Self {
        self.boundary_code_property = property.into();
        self
    }
}

/// Facts about a loaded dataset, reported by the health and metadata endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetMetadata {
    /// SHA-256 of the listing source bytes.
    pub fingerprint: String,
    pub listing_count: usize,
    pub boundary_count: usize,
    pub policy: BucketingPolicy,
    pub summary: LoadSummary,
    pub loaded_at: DateTime<Utc>,
}

/// The normalized listings and canton boundaries of one pair of sources.
#[derive(Debug)]
pub struct Dataset {
    pub listings: ListingCollection,
    pub boundaries: BoundaryCollection,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    /// Assemble a dataset from already-normalized parts.
    pub fn new(
        listings: ListingCollection,
        boundaries: BoundaryCollection,
        summary: LoadSummary,
        fingerprint: impl Into<String>,
    ) -> Self {
        let metadata = DatasetMetadata {
            fingerprint: fingerprint.into(),
            listing_count: listings.len(),
            boundary_count: boundaries.len(),
            policy: listings.policy(),
            summary,
            loaded_at: Utc::now(),
        };
        Self {
            listings,
            boundaries,
            metadata,
        }
    }
}

fn source_name(path: &Path) -> String {
    path.display().to_string()
}

/// Read both sources from disk and normalize them.
///
/// # Errors
/// * [`StoreError::DataLoad`] if a file cannot be opened or is malformed
/// * [`StoreError::UnknownCantonCode`] if a listing names an unknown canton
pub fn load(sources: &DataSources) -> StoreResult<Dataset> {
    let boundaries_name = source_name(&sources.boundaries_path);
    let file = File::open(&sources.boundaries_path)
        .map_err(|e| StoreError::data_load(&boundaries_name, format!("cannot open: {}", e)))?;
    let boundaries = read_boundaries(
        BufReader::new(file),
        &boundaries_name,
        &sources.boundary_code_property,
    )?;

    let listings_name = source_name(&sources.listings_path);
    let content = fs::read(&sources.listings_path)
        .map_err(|e| StoreError::data_load(&listings_name, format!("cannot read: {}", e)))?;
    let fingerprint = calculate_checksum(&content);
    let (listings, summary) = read_listings(content.as_slice(), &listings_name, sources.policy)?;

    Ok(Dataset::new(listings, boundaries, summary, fingerprint))
}

fn dataset_cache() -> &'static Mutex<HashMap<DataSources, Arc<Dataset>>> {
    static CACHE: OnceLock<Mutex<HashMap<DataSources, Arc<Dataset>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load a dataset at most once per process for the given sources.
///
/// Later calls with equal [`DataSources`] return the same `Arc`. Failed loads
/// are not cached.
pub fn load_cached(sources: &DataSources) -> StoreResult<Arc<Dataset>> {
    let mut cache = dataset_cache().lock();
    if let Some(dataset) = cache.get(sources) {
        return Ok(Arc::clone(dataset));
    }

    let dataset = Arc::new(load(sources)?);
    info!(
        "Dataset ready: {} listings, {} boundaries (fingerprint {})",
        dataset.metadata.listing_count,
        dataset.metadata.boundary_count,
        dataset.metadata.fingerprint.get(..12).unwrap_or_default()
    );
    cache.insert(sources.clone(), Arc::clone(&dataset));
    Ok(dataset)
}
