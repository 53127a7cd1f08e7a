//! Listing CSV reader and normalization.
//!
//! Normalization runs in a fixed order:
//! 1. columns not needed for display (acquisition date, net rate) are ignored
//! 2. an empty apartment type becomes [`UNKNOWN_APARTMENT_TYPE`]
//! 3. rows still missing any value are dropped whole
//! 4. canton codes are mapped to names; an unknown code aborts the load
//! 5. the rent category is assigned with the configured policy

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::Read;

use super::error::{StoreError, StoreResult};
use crate::models::{
    canton_name, BucketingPolicy, Listing, ListingCollection, UNKNOWN_APARTMENT_TYPE,
};

/// Source column names.
pub mod columns {
    pub const ADDRESS: &str = "Adresse";
    pub const PLACE: &str = "Ort";
    pub const CANTON: &str = "Kanton";
    pub const ROOMS: &str = "Zimmer";
    pub const FLOOR_AREA: &str = "Fläche";
    pub const GROSS_RENT: &str = "Mietpreis_Brutto";
    pub const APARTMENT_TYPE: &str = "Wohnungstyp";
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "lon";

    /// Present in the source but never read.
    pub const DROPPED: [&str; 2] = ["Bezugsdatum", "Quadratmeterpreis_Brutto"];
}

/// Cell values treated as missing, matching the markers pandas reads as NaN.
const MISSING_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Row counts from one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub kept: usize,
    /// Rows dropped because a required value was missing.
    pub incomplete: usize,
    /// Rows dropped because a value was out of range (e.g. zero floor area).
    pub invalid: usize,
}

struct ColumnIndex {
    address: usize,
    place: usize,
    canton: usize,
    rooms: usize,
    floor_area: usize,
    rent: usize,
    apartment_type: Option<usize>,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, source_name: &str) -> StoreResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                StoreError::data_load(source_name, format!("missing required column '{}'", name))
            })
        };

        for dropped in columns::DROPPED {
            if find(dropped).is_some() {
                debug!("Ignoring column '{}' in {}", dropped, source_name);
            }
        }

        Ok(Self {
            address: require(columns::ADDRESS)?,
            place: require(columns::PLACE)?,
            canton: require(columns::CANTON)?,
            rooms: require(columns::ROOMS)?,
            floor_area: require(columns::FLOOR_AREA)?,
            rent: require(columns::GROSS_RENT)?,
            apartment_type: find(columns::APARTMENT_TYPE),
            latitude: require(columns::LATITUDE)?,
            longitude: require(columns::LONGITUDE)?,
        })
    }
}

enum RowOutcome {
    Kept(Listing),
    Incomplete,
    Invalid(String),
}

/// Per-row context for error messages.
struct RowContext<'a> {
    source_name: &'a str,
    line: usize,
}

fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|value| !is_missing(value))
}

impl RowContext<'_> {
    fn number(
        &self,
        record: &StringRecord,
        idx: usize,
        column: &str,
    ) -> StoreResult<Option<f64>> {
        match cell(record, idx) {
            None => Ok(None),
            Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
                StoreError::data_load(
                    self.source_name,
                    format!(
                        "invalid number '{}' in column '{}' (line {})",
                        value, column, self.line
                    ),
                )
            }),
        }
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

fn normalize_row(
    record: &StringRecord,
    cols: &ColumnIndex,
    policy: BucketingPolicy,
    ctx: &RowContext<'_>,
) -> StoreResult<RowOutcome> {
    let address = cell(record, cols.address);
    let place = cell(record, cols.place);
    let canton_code = cell(record, cols.canton);
    let rooms = ctx.number(record, cols.rooms, columns::ROOMS)?;
    let floor_area = ctx.number(record, cols.floor_area, columns::FLOOR_AREA)?;
    let rent = ctx.number(record, cols.rent, columns::GROSS_RENT)?;
    let latitude = ctx.number(record, cols.latitude, columns::LATITUDE)?;
    let longitude = ctx.number(record, cols.longitude, columns::LONGITUDE)?;
    let apartment_type = cols
        .apartment_type
        .and_then(|idx| cell(record, idx))
        .unwrap_or(UNKNOWN_APARTMENT_TYPE);

    let (
        Some(address),
        Some(place),
        Some(canton_code),
        Some(rooms),
        Some(floor_area_m2),
        Some(rent_chf),
        Some(latitude),
        Some(longitude),
    ) = (address, place, canton_code, rooms, floor_area, rent, latitude, longitude)
    else {
        return Ok(RowOutcome::Incomplete);
    };

    let canton_name =
        canton_name(canton_code).ok_or_else(|| StoreError::UnknownCantonCode {
            code: canton_code.to_string(),
            source_name: ctx.source_name.to_string(),
            row: ctx.line,
        })?;

    if !(floor_area_m2.is_finite() && floor_area_m2 > 0.0) {
        return Ok(RowOutcome::Invalid(format!(
            "floor area must be positive, got {}",
            floor_area_m2
        )));
    }
    if !(rent_chf.is_finite() && rent_chf >= 0.0) {
        return Ok(RowOutcome::Invalid(format!("negative rent {}", rent_chf)));
    }
    if !(rooms.is_finite() && rooms >= 0.0) {
        return Ok(RowOutcome::Invalid(format!("negative room count {}", rooms)));
    }
    if !(latitude.is_finite() && longitude.is_finite()) {
        return Ok(RowOutcome::Invalid("non-finite coordinates".to_string()));
    }

    Ok(RowOutcome::Kept(Listing {
        address: address.to_string(),
        place: place.to_string(),
        canton_code: canton_code.trim().to_ascii_uppercase(),
        canton_name: canton_name.to_string(),
        rooms,
        floor_area_m2,
        rent_chf,
        apartment_type: apartment_type.to_string(),
        latitude,
        longitude,
        rent_category: policy.categorize(rent_chf, floor_area_m2),
    }))
}

/// Read and normalize listings from a comma-separated source.
///
/// `source_name` only labels errors and log lines.
///
/// # Errors
/// * [`StoreError::DataLoad`] if the header lacks a required column, a row is
///   malformed, or a numeric cell cannot be parsed
/// * [`StoreError::UnknownCantonCode`] if a complete row names an unknown canton
pub fn read_listings<R: Read>(
    reader: R,
    source_name: &str,
    policy: BucketingPolicy,
) -> StoreResult<(ListingCollection, LoadSummary)> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| StoreError::data_load(source_name, format!("failed to read header: {}", e)))?
        .clone();
    let cols = ColumnIndex::from_headers(&headers, source_name)?;

    let mut listings = Vec::new();
    let mut summary = LoadSummary::default();

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record
            .map_err(|e| StoreError::data_load(source_name, format!("malformed row: {}", e)))?;
        summary.rows_read += 1;

        let ctx = RowContext {
            source_name,
            line: record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2),
        };

        match normalize_row(&record, &cols, policy, &ctx)? {
            RowOutcome::Kept(listing) => listings.push(listing),
            RowOutcome::Incomplete => summary.incomplete += 1,
            RowOutcome::Invalid(reason) => {
                warn!("Dropping line {} of {}: {}", ctx.line, source_name, reason);
                summary.invalid += 1;
            }
        }
    }

    summary.kept = listings.len();
    info!(
        "Loaded {} listings from {} ({} rows read, {} incomplete, {} invalid, policy={})",
        summary.kept, source_name, summary.rows_read, summary.incomplete, summary.invalid, policy
    );

    Ok((ListingCollection::new(policy, listings), summary))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod listings_tests;
