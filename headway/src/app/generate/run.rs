use crate::model::{
    aggregate, classify_edge, write_bucket_collections, HeadwayError, RunConfig, TransitMode,
};
use headway_transitland::transitland::{PageSource, ResultCache, TransitlandClient};
use itertools::Itertools;
use std::path::Path;
use std::time::Duration;

/// the combined bucket name when `combined_bucket` is enabled
const COMBINED_BUCKET: &str = "both";

/// runs the frequency report: fetch the schedule stop pairs for the
/// configured box and window, aggregate them into weighted edges, classify
/// each edge, and write one GeoJSON FeatureCollection per bucket.
pub fn run_generate(config: &RunConfig) -> Result<(), HeadwayError> {
    config.validate()?;
    let client = TransitlandClient::with_http(
        Duration::from_secs(config.request_timeout_seconds),
        cache(config),
        &config.base_url,
        config.per_page,
        config.bounding_box.clone(),
        config.time_window()?,
    )?;

    let buckets = build_buckets(&client, config)?;
    let window = config.time_window()?;
    let written = write_bucket_collections(
        Path::new(&config.output_directory),
        &window.date_format(),
        &window.filename_format(),
        buckets,
    )?;
    for file in &written {
        log::info!("wrote {}", file.display());
    }
    Ok(())
}

/// fetch, aggregate, and classify, returning the named output buckets.
/// edges are classified in sorted key order so output documents are
/// reproducible run-to-run.
pub fn build_buckets<S: PageSource>(
    client: &TransitlandClient<S>,
    config: &RunConfig,
) -> Result<Vec<(String, Vec<geojson::Feature>)>, HeadwayError> {
    let pairs = client.get_schedule_stop_pairs()?;
    log::info!("fetched {} schedule stop pairs", pairs.len());

    let edges = aggregate(&pairs);
    log::info!("aggregated {} distinct edges", edges.len());

    let window_hours = config.time_window()?.duration_hours();
    let mut bus: Vec<geojson::Feature> = vec![];
    let mut subway: Vec<geojson::Feature> = vec![];
    for ((origin_id, destination_id), count) in edges.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        match classify_edge(client, origin_id, destination_id, *count, window_hours, config)? {
            Some((TransitMode::Bus, feature)) => bus.push(feature.to_feature()),
            Some((TransitMode::Subway, feature)) => subway.push(feature.to_feature()),
            None => {}
        }
    }
    log::info!(
        "classified {} bus and {} subway features",
        bus.len(),
        subway.len()
    );

    let mut buckets = vec![];
    if config.combined_bucket {
        let combined = bus.iter().chain(subway.iter()).cloned().collect();
        buckets.push((String::from(COMBINED_BUCKET), combined));
    }
    buckets.push((TransitMode::Bus.to_string(), bus));
    buckets.push((TransitMode::Subway.to_string(), subway));
    Ok(buckets)
}

fn cache(config: &RunConfig) -> Option<ResultCache> {
    if config.use_cache {
        Some(ResultCache::new(config.cache_directory.clone()))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::build_buckets;
    use crate::model::RunConfig;
    use chrono::{NaiveDate, NaiveTime};
    use headway_transitland::transitland::{
        BoundingBox, PageSource, TimeWindow, TransitlandClient, TransitlandError,
        DEFAULT_PER_PAGE,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    const SUBWAY: &str = "f-dr5r-nyctsubway";

    struct CannedPages {
        pages: HashMap<String, Value>,
    }

    impl PageSource for CannedPages {
        fn fetch(&self, url: &str) -> Result<Value, TransitlandError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| TransitlandError::FetchError {
                    url: url.to_string(),
                    msg: String::from("404"),
                })
        }
    }

    fn stop_record(onestop_id: &str, name: &str, lon: f64, feeds: &[&str]) -> Value {
        json!({
            "onestop_id": onestop_id,
            "name": name,
            "geometry": { "type": "Point", "coordinates": [lon, 40.5] },
            "imported_from_feed_onestop_ids": feeds
        })
    }

    fn pair_record(origin: &str, destination: &str) -> Value {
        json!({
            "origin_onestop_id": origin,
            "destination_onestop_id": destination,
            "origin_departure_time": "07:50:00"
        })
    }

    /// the full scenario: two subway-feed stops linked twice and one
    /// independent bus edge, over a quarter-hour window
    #[test]
    fn test_end_to_end_buckets() {
        let pairs_url = "https://transit.land/api/v1/schedule_stop_pairs?per_page=1000&bbox=-74.5,40,-73,41&date=2016-01-22&origin_departure_between=07:45:00,08:00:00";
        let stops_url = "https://transit.land/api/v1/stops?per_page=1000&bbox=-74.5,40,-73,41";
        let pages = HashMap::from([
            (
                pairs_url.to_string(),
                json!({
                    "schedule_stop_pairs": [
                        pair_record("s-1", "s-2"),
                        pair_record("s-1", "s-2"),
                        pair_record("s-1", "s-3"),
                    ],
                    "meta": { "next": null }
                }),
            ),
            (
                stops_url.to_string(),
                json!({
                    "stops": [
                        stop_record("s-1", "First Av", -73.98, &[SUBWAY]),
                        stop_record("s-2", "Third Av", -73.97, &[SUBWAY]),
                        stop_record("s-3", "Main St", -73.96, &["f-dr5r-mtabus"]),
                    ],
                    "meta": { "next": null }
                }),
            ),
        ]);

        let bbox = BoundingBox::new(-74.5, 40.0, -73.0, 41.0).expect("valid bounding box");
        let window = TimeWindow::new(
            NaiveDate::from_ymd_opt(2016, 1, 22).expect("valid date"),
            NaiveTime::from_hms_opt(7, 45, 0).expect("valid time"),
            NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
        )
        .expect("valid window");
        let client = TransitlandClient::new(
            CannedPages { pages },
            None,
            "https://transit.land/api/v1",
            DEFAULT_PER_PAGE,
            bbox.clone(),
            window,
        );
        let config = RunConfig {
            bounding_box: bbox,
            date: NaiveDate::from_ymd_opt(2016, 1, 22).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(7, 45, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            combined_bucket: true,
            ..Default::default()
        };

        let buckets = build_buckets(&client, &config).expect("pipeline succeeds");
        let by_name: HashMap<String, usize> = buckets
            .iter()
            .map(|(name, features)| (name.clone(), features.len()))
            .collect();
        assert_eq!(by_name.get("both"), Some(&2));
        assert_eq!(by_name.get("bus"), Some(&1));
        assert_eq!(by_name.get("subway"), Some(&1));

        let subway_features = &buckets
            .iter()
            .find(|(name, _)| name == "subway")
            .expect("subway bucket")
            .1;
        let properties = subway_features[0].properties.as_ref().expect("properties");
        assert_eq!(properties.get("frequency"), Some(&json!(8.0)));
        assert_eq!(properties.get("trips"), Some(&json!(2)));
        assert_eq!(properties.get("stroke"), Some(&json!("#fc8d59")));
        assert_eq!(properties.get("stroke-width"), Some(&json!(4.0)));
        assert_eq!(properties.get("title"), Some(&json!("First Av to Third Av")));
        assert_eq!(
            properties.get("description"),
            Some(&json!("Frequency: 8 trips / hour"))
        );

        let bus_features = &buckets
            .iter()
            .find(|(name, _)| name == "bus")
            .expect("bus bucket")
            .1;
        let properties = bus_features[0].properties.as_ref().expect("properties");
        assert_eq!(properties.get("frequency"), Some(&json!(4.0)));
    }
}
