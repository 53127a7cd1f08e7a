use geojson::{Feature, FeatureCollection};

/// A canton outline from the boundary source.
///
/// The geometry is kept exactly as read; it is only drawn as an overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CantonBoundary {
    /// Canton code taken from the feature properties, if present.
    pub canton_code: Option<String>,
    pub feature: Feature,
}

/// Canton outlines in source order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryCollection {
    boundaries: Vec<CantonBoundary>,
}

impl BoundaryCollection {
    pub fn new(boundaries: Vec<CantonBoundary>) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[CantonBoundary] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Rebuild a GeoJSON FeatureCollection for the map's line layer.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.boundaries.iter().map(|b| b.feature.clone()).collect(),
            foreign_members: None,
        }
    }
}
