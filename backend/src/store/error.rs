//! Error types for loading the listing and boundary sources.

/// Result type for listing store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for listing store operations.
///
/// All variants are fatal at startup: the server never runs on a partially
/// loaded dataset.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A source could not be read or is malformed (missing column, invalid
    /// JSON, unparsable number).
    #[error("Data load error in {source_name}: {message}")]
    DataLoad { source_name: String, message: String },

    /// A listing references a canton code that is not one of the 26 cantons.
    #[error("Unknown canton code '{code}' in {source_name} (row {row})")]
    UnknownCantonCode {
        code: String,
        source_name: String,
        row: usize,
    },

    /// The normalized collection could not be written out.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration file or environment could not be interpreted.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Create a data load error for the named source.
    pub fn data_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::DataLoad { .. })
    }

    pub fn is_unknown_canton(&self) -> bool {
        matches!(self, Self::UnknownCantonCode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_load_display() {
        let err = StoreError::data_load("listings.csv", "missing column 'Ort'");
        assert_eq!(
            err.to_string(),
            "Data load error in listings.csv: missing column 'Ort'"
        );
        assert!(err.is_data_load());
        assert!(!err.is_unknown_canton());
    }

    #[test]
    fn test_export_display() {
        let err = StoreError::export("broken pipe");
        assert_eq!(err.to_string(), "Export error: broken pipe");
        assert!(!err.is_data_load());
    }

    #[test]
    fn test_unknown_canton_display() {
        let err = StoreError::UnknownCantonCode {
            code: "XX".to_string(),
            source_name: "listings.csv".to_string(),
            row: 7,
        };
        assert_eq!(
            err.to_string(),
            "Unknown canton code 'XX' in listings.csv (row 7)"
        );
        assert!(err.is_unknown_canton());
    }
}
