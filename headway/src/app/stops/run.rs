use crate::model::{write_feature_collection, HeadwayError, RunConfig};
use headway_transitland::transitland::{PageSource, ResultCache, Stop, TransitlandClient};
use itertools::Itertools;
use std::path::Path;
use std::time::Duration;

/// fetch the stop table for the configured bounding box and write it as a
/// single GeoJSON FeatureCollection of points.
pub fn run_stops(config: &RunConfig) -> Result<(), HeadwayError> {
    let cache = if config.use_cache {
        Some(ResultCache::new(config.cache_directory.clone()))
    } else {
        None
    };
    let client = TransitlandClient::with_http(
        Duration::from_secs(config.request_timeout_seconds),
        cache,
        &config.base_url,
        config.per_page,
        config.bounding_box.clone(),
        config.time_window()?,
    )?;

    let features = stop_features(&client)?;
    log::info!("fetched {} stops", features.len());

    let filename = Path::new(&config.output_directory).join(format!(
        "stops_{}.geojson",
        config.bounding_box.filename_format()
    ));
    write_feature_collection(&filename, features)?;
    log::info!("wrote {}", filename.display());
    Ok(())
}

/// one point feature per stop, in onestop_id order for reproducible output
pub fn stop_features<S: PageSource>(
    client: &TransitlandClient<S>,
) -> Result<Vec<geojson::Feature>, HeadwayError> {
    let stops = client.get_stops()?;
    stops
        .values()
        .sorted_by(|a, b| a.onestop_id.cmp(&b.onestop_id))
        .map(|stop| stop_feature(stop).map_err(HeadwayError::from))
        .collect()
}

fn stop_feature(
    stop: &Stop,
) -> Result<geojson::Feature, headway_transitland::transitland::TransitlandError> {
    let point = stop.point()?;
    let mut properties = geojson::JsonObject::new();
    properties.insert(
        String::from("onestop_id"),
        serde_json::json!(stop.onestop_id),
    );
    properties.insert(String::from("name"), serde_json::json!(stop.name));
    Ok(geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
            point.x(),
            point.y(),
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
