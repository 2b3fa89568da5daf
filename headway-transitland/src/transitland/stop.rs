use crate::transitland::TransitlandError;
use geo::Point;
use serde::Deserialize;

/// a transit stop record from the stops endpoint. `imported_from_feed_onestop_ids`
/// is membership, not ownership: a stop shared between operators lists every
/// contributing feed, which is what mode classification intersects.
#[derive(Debug, Clone, Deserialize)]
pub struct Stop {
    pub onestop_id: String,
    #[serde(default)]
    pub name: String,
    pub geometry: geojson::Geometry,
    #[serde(default)]
    pub imported_from_feed_onestop_ids: Vec<String>,
}

impl Stop {
    /// the stop location as a lon,lat point
    pub fn point(&self) -> Result<Point<f64>, TransitlandError> {
        match &self.geometry.value {
            geojson::Value::Point(coordinates) if coordinates.len() >= 2 => {
                Ok(Point::new(coordinates[0], coordinates[1]))
            }
            other => Err(TransitlandError::DecodeError {
                source_name: self.onestop_id.clone(),
                msg: format!("expected Point geometry for stop, found {}", other.type_name()),
            }),
        }
    }
}
