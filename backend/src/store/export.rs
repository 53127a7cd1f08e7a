//! Delimited-text export of the normalized listing collection.

use csv::WriterBuilder;
use std::io::Write;

use super::error::{StoreError, StoreResult};
use crate::models::ListingCollection;

/// Column names of the export, in output order.
pub const EXPORT_HEADER: [&str; 11] = [
    "address",
    "place",
    "canton_code",
    "canton_name",
    "rooms",
    "floor_area_m2",
    "rent_chf",
    "apartment_type",
    "latitude",
    "longitude",
    "rent_category",
];

/// Write every listing as one comma-separated row, preceded by a header row.
///
/// The header is written even when the collection is empty.
pub fn write_listings_csv<W: Write>(listings: &ListingCollection, writer: W) -> StoreResult<()> {
    let export_error = |e: csv::Error| StoreError::export(e.to_string());

    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER).map_err(export_error)?;
    for listing in listings {
        csv_writer.serialize(listing).map_err(export_error)?;
    }
    csv_writer
        .flush()
        .map_err(|e| StoreError::export(e.to_string()))?;
    Ok(())
}

/// Export the collection into an in-memory UTF-8 string.
pub fn listings_to_csv_string(listings: &ListingCollection) -> StoreResult<String> {
    let mut buffer = Vec::new();
    write_listings_csv(listings, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| StoreError::export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BucketingPolicy, Listing, RentCategory};

    fn listing(address: &str, rent: f64, category: RentCategory) -> Listing {
        Listing {
            address: address.to_string(),
            place: "Zürich".to_string(),
            canton_code: "ZH".to_string(),
            canton_name: "Zürich".to_string(),
            rooms: 2.5,
            floor_area_m2: 60.0,
            rent_chf: rent,
            apartment_type: "Wohnung".to_string(),
            latitude: 47.37,
            longitude: 8.54,
            rent_category: category,
        }
    }

    #[test]
    fn test_export_header_and_rows() {
        let collection = ListingCollection::new(
            BucketingPolicy::AbsoluteRentBuckets,
            vec![
                listing("Langstrasse 5", 1150.0, RentCategory::Low),
                listing("Seefeld 1, 3. OG", 3100.0, RentCategory::VeryHigh),
            ],
        );
        let csv = listings_to_csv_string(&collection).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], EXPORT_HEADER.join(","));
        assert_eq!(
            lines[1],
            "Langstrasse 5,Zürich,ZH,Zürich,2.5,60.0,1150.0,Wohnung,47.37,8.54,low"
        );
        // Embedded delimiters are quoted
        assert!(lines[2].starts_with("\"Seefeld 1, 3. OG\","));
        assert!(lines[2].ends_with(",very_high"));
    }

    #[test]
    fn test_export_empty_collection_has_header_only() {
        let collection = ListingCollection::new(BucketingPolicy::RateBuckets, vec![]);
        let csv = listings_to_csv_string(&collection).unwrap();
        assert_eq!(csv.trim_end(), EXPORT_HEADER.join(","));
    }

    #[test]
    fn test_export_round_trips_through_csv_reader() {
        let collection = ListingCollection::new(
            BucketingPolicy::AbsoluteRentBuckets,
            vec![listing("Langstrasse 5", 1150.0, RentCategory::Low)],
        );
        let csv = listings_to_csv_string(&collection).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed: Vec<Listing> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, collection.listings());
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_export_error() {
        let collection = ListingCollection::new(
            BucketingPolicy::AbsoluteRentBuckets,
            vec![listing("Langstrasse 5", 1150.0, RentCategory::Low)],
        );
        let err = write_listings_csv(&collection, ClosedSink).unwrap_err();
        assert!(matches!(err, StoreError::Export(_)));
        assert!(!err.is_data_load());
    }
}
