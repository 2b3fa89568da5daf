use crate::transitland::TransitlandError;
use serde::{Deserialize, Serialize};

/// a geographic query window in minLon,minLat,maxLon,maxLat order.
/// coordinates are validated at construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<BoundingBox, TransitlandError> {
        if min_lon >= max_lon {
            return Err(TransitlandError::InvalidBoundingBoxError(format!(
                "min_lon {min_lon} must be less than max_lon {max_lon}"
            )));
        }
        if min_lat >= max_lat {
            return Err(TransitlandError::InvalidBoundingBoxError(format!(
                "min_lat {min_lat} must be less than max_lat {max_lat}"
            )));
        }
        Ok(BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// the `bbox` query parameter form: `minLon,minLat,maxLon,maxLat`
    pub fn api_format(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }

    /// filesystem-safe form for cache keys. dots are replaced so the
    /// coordinates cannot collide with the file extension.
    pub fn filename_format(&self) -> String {
        self.api_format().replace(',', "_").replace('.', "o")
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = TransitlandError;

    fn try_from(coordinates: [f64; 4]) -> Result<BoundingBox, TransitlandError> {
        BoundingBox::new(
            coordinates[0],
            coordinates[1],
            coordinates[2],
            coordinates[3],
        )
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> [f64; 4] {
        [bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat]
    }
}
