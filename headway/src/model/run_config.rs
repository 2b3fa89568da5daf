use crate::model::{ColorTier, HeadwayError, UnknownStopPolicy};
use chrono::{NaiveDate, NaiveTime};
use headway_transitland::transitland::{
    BoundingBox, TimeWindow, TransitlandError, DEFAULT_BASE_URL, DEFAULT_PER_PAGE,
};
use serde::{Deserialize, Serialize};

/// the complete configuration for one report run. every component receives
/// what it needs from this object at construction; there are no process-wide
/// defaults. the `Default` values reproduce the original New York City
/// morning-rush report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub bounding_box: BoundingBox,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub base_url: String,
    pub per_page: u32,
    pub request_timeout_seconds: u64,
    pub cache_directory: String,
    pub use_cache: bool,
    pub output_directory: String,
    pub color_tiers: Vec<ColorTier>,
    pub subway_feed_id: String,
    pub excluded_feed_ids: Vec<String>,
    pub unknown_stop_policy: UnknownStopPolicy,
    pub combined_bucket: bool,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            bounding_box: BoundingBox::new(-80.0, 35.0, -73.0, 41.0)
                .unwrap_or_else(|e| panic!("default bounding box must be valid: {e}")),
            date: NaiveDate::from_ymd_opt(2016, 1, 22)
                .unwrap_or_else(|| panic!("default date must be valid")),
            start_time: NaiveTime::from_hms_opt(7, 30, 0)
                .unwrap_or_else(|| panic!("default start time must be valid")),
            end_time: NaiveTime::from_hms_opt(8, 0, 0)
                .unwrap_or_else(|| panic!("default end time must be valid")),
            base_url: String::from(DEFAULT_BASE_URL),
            per_page: DEFAULT_PER_PAGE,
            request_timeout_seconds: 30,
            cache_directory: String::from("cache"),
            use_cache: true,
            output_directory: String::from("output"),
            color_tiers: vec![
                ColorTier::new(0.0, "#fdcc8a", 2.0),
                ColorTier::new(3.0, "#fc8d59", 4.0),
                ColorTier::new(8.0, "#d7301f", 6.0),
            ],
            subway_feed_id: String::from("f-dr5r-nyctsubway"),
            excluded_feed_ids: vec![String::from("f-dr5-mtanyclirr")],
            unknown_stop_policy: UnknownStopPolicy::Fail,
            combined_bucket: false,
        }
    }
}

impl RunConfig {
    /// read a TOML configuration file; absent keys keep their defaults
    pub fn from_file(filepath: &str) -> Result<RunConfig, HeadwayError> {
        let file = config::File::new(filepath, config::FileFormat::Toml);
        let loaded = config::Config::builder()
            .add_source(file)
            .build()
            .map_err(|e| HeadwayError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        loaded
            .try_deserialize::<RunConfig>()
            .map_err(|e| HeadwayError::ConfigReadError {
                msg: format!("failed interpreting '{filepath}'"),
                source: e,
            })
    }

    pub fn validate(&self) -> Result<(), HeadwayError> {
        if self.color_tiers.is_empty() {
            return Err(HeadwayError::InvalidConfigurationError(String::from(
                "color_tiers must not be empty",
            )));
        }
        if self.color_tiers[0].threshold != 0.0 {
            return Err(HeadwayError::InvalidConfigurationError(format!(
                "the first color tier must have threshold 0 so every edge earns a tier, found {}",
                self.color_tiers[0].threshold
            )));
        }
        self.time_window()?;
        Ok(())
    }

    pub fn time_window(&self) -> Result<TimeWindow, TransitlandError> {
        TimeWindow::new(self.date, self.start_time, self.end_time)
    }
}
