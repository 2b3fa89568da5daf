use crate::model::{
    classify_mode, select_tier, HeadwayError, RunConfig, TransitMode, UnknownStopPolicy,
};
use geo::LineString;
use headway_transitland::transitland::{PageSource, Stop, TransitlandClient, TransitlandError};

/// one surviving aggregated edge, fully classified and ready to serialize.
/// the mode bucket is returned alongside rather than stored: it decides which
/// output file the feature lands in and is not a feature property.
#[derive(Debug, Clone)]
pub struct ClassifiedFeature {
    pub origin_onestop_id: String,
    pub destination_onestop_id: String,
    pub frequency: f64,
    pub trips: usize,
    pub stroke: String,
    pub stroke_width: f64,
    pub title: String,
    pub description: String,
    pub geometry: LineString<f64>,
}

impl ClassifiedFeature {
    pub fn to_feature(&self) -> geojson::Feature {
        let mut properties = geojson::JsonObject::new();
        properties.insert(
            String::from("origin_onestop_id"),
            serde_json::json!(self.origin_onestop_id),
        );
        properties.insert(
            String::from("destination_onestop_id"),
            serde_json::json!(self.destination_onestop_id),
        );
        properties.insert(String::from("frequency"), serde_json::json!(self.frequency));
        properties.insert(String::from("trips"), serde_json::json!(self.trips));
        properties.insert(String::from("stroke"), serde_json::json!(self.stroke));
        properties.insert(
            String::from("stroke-width"),
            serde_json::json!(self.stroke_width),
        );
        properties.insert(String::from("title"), serde_json::json!(self.title));
        properties.insert(
            String::from("description"),
            serde_json::json!(self.description),
        );
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// classify one aggregated edge: resolve both endpoints, normalize the
/// occurrence count to trips per hour, select the visual tier, and bucket by
/// mode. returns None when the edge is dropped, either by feed exclusion or
/// by the skip-edge policy for an unresolvable stop.
pub fn classify_edge<S: PageSource>(
    client: &TransitlandClient<S>,
    origin_id: &str,
    destination_id: &str,
    count: usize,
    window_hours: f64,
    config: &RunConfig,
) -> Result<Option<(TransitMode, ClassifiedFeature)>, HeadwayError> {
    let origin = match resolve_stop(client, origin_id, config)? {
        Some(stop) => stop,
        None => {
            log::warn!("skipping edge ({origin_id}, {destination_id}): unknown origin stop");
            return Ok(None);
        }
    };
    let destination = match resolve_stop(client, destination_id, config)? {
        Some(stop) => stop,
        None => {
            log::warn!("skipping edge ({origin_id}, {destination_id}): unknown destination stop");
            return Ok(None);
        }
    };

    let mode = match classify_mode(
        origin,
        destination,
        &config.subway_feed_id,
        &config.excluded_feed_ids,
    ) {
        Some(mode) => mode,
        None => return Ok(None),
    };

    let frequency = count as f64 / window_hours;
    let tier = select_tier(&config.color_tiers, frequency).ok_or_else(|| {
        HeadwayError::InvalidConfigurationError(String::from("color tier list is empty"))
    })?;

    let geometry = LineString::from(vec![origin.point()?, destination.point()?]);
    let feature = ClassifiedFeature {
        origin_onestop_id: origin_id.to_string(),
        destination_onestop_id: destination_id.to_string(),
        frequency,
        trips: count,
        stroke: tier.color.clone(),
        stroke_width: tier.width,
        title: format!("{} to {}", origin.name, destination.name),
        // display form truncates toward zero; the stored frequency stays fractional
        description: format!("Frequency: {} trips / hour", frequency as i64),
        geometry,
    };
    Ok(Some((mode, feature)))
}

fn resolve_stop<'a, S: PageSource>(
    client: &'a TransitlandClient<S>,
    onestop_id: &str,
    config: &RunConfig,
) -> Result<Option<&'a Stop>, HeadwayError> {
    match client.get_stop(onestop_id) {
        Ok(stop) => Ok(Some(stop)),
        Err(TransitlandError::UnknownStopError(id)) => match config.unknown_stop_policy {
            UnknownStopPolicy::Fail => Err(TransitlandError::UnknownStopError(id).into()),
            UnknownStopPolicy::SkipEdge => Ok(None),
        },
        Err(e) => Err(e.into()),
    }
}
