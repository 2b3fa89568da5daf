use crate::model::{HeadwayError, RunConfig, UnknownStopPolicy};
use chrono::{NaiveDate, NaiveTime};
use clap::{value_parser, Subcommand};
use headway_transitland::transitland::BoundingBox;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum HeadwayOperation {
    /// generate per-bucket GeoJSON frequency maps for a bounding box and
    /// departure window
    Generate {
        /// TOML configuration file; built-in defaults apply when omitted
        #[arg(short, long)]
        config: Option<String>,
        /// bounding box override, "minLon,minLat,maxLon,maxLat"
        #[arg(long, value_parser = parse_bounding_box)]
        bbox: Option<BoundingBox>,
        /// service date override (YYYY-MM-DD)
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        date: Option<NaiveDate>,
        /// departure window override, "HH:MM:SS,HH:MM:SS"
        #[arg(long, value_parser = parse_window)]
        window: Option<(NaiveTime, NaiveTime)>,
        /// directory to write the GeoJSON documents to
        #[arg(long)]
        output_directory: Option<String>,
        /// directory holding per-query API result caches
        #[arg(long)]
        cache_directory: Option<String>,
        /// fetch from the API even when a cached result exists
        #[arg(long, default_value_t = false)]
        no_cache: bool,
        /// how to handle schedule records referencing a stop outside the
        /// bounding box
        #[arg(long, value_enum)]
        unknown_stop_policy: Option<UnknownStopPolicy>,
        /// also write a `both` bucket holding every surviving feature
        #[arg(long, default_value_t = false)]
        combined_bucket: bool,
    },
    /// fetch the stops in the bounding box and write them as GeoJSON points
    Stops {
        /// TOML configuration file; built-in defaults apply when omitted
        #[arg(short, long)]
        config: Option<String>,
        /// bounding box override, "minLon,minLat,maxLon,maxLat"
        #[arg(long, value_parser = parse_bounding_box)]
        bbox: Option<BoundingBox>,
        /// directory to write the GeoJSON document to
        #[arg(long)]
        output_directory: Option<String>,
        /// directory holding per-query API result caches
        #[arg(long)]
        cache_directory: Option<String>,
        /// fetch from the API even when a cached result exists
        #[arg(long, default_value_t = false)]
        no_cache: bool,
    },
}

impl HeadwayOperation {
    pub fn run(&self) -> Result<(), HeadwayError> {
        match self {
            HeadwayOperation::Generate {
                config,
                bbox,
                date,
                window,
                output_directory,
                cache_directory,
                no_cache,
                unknown_stop_policy,
                combined_bucket,
            } => {
                let mut run_config = load_config(config.as_deref())?;
                if let Some(bbox) = bbox {
                    run_config.bounding_box = bbox.clone();
                }
                if let Some(date) = date {
                    run_config.date = *date;
                }
                if let Some((start, end)) = window {
                    run_config.start_time = *start;
                    run_config.end_time = *end;
                }
                if let Some(dir) = output_directory {
                    run_config.output_directory = dir.clone();
                }
                if let Some(dir) = cache_directory {
                    run_config.cache_directory = dir.clone();
                }
                if *no_cache {
                    run_config.use_cache = false;
                }
                if let Some(policy) = unknown_stop_policy {
                    run_config.unknown_stop_policy = *policy;
                }
                if *combined_bucket {
                    run_config.combined_bucket = true;
                }
                crate::app::generate::run_generate(&run_config)
            }
            HeadwayOperation::Stops {
                config,
                bbox,
                output_directory,
                cache_directory,
                no_cache,
            } => {
                let mut run_config = load_config(config.as_deref())?;
                if let Some(bbox) = bbox {
                    run_config.bounding_box = bbox.clone();
                }
                if let Some(dir) = output_directory {
                    run_config.output_directory = dir.clone();
                }
                if let Some(dir) = cache_directory {
                    run_config.cache_directory = dir.clone();
                }
                if *no_cache {
                    run_config.use_cache = false;
                }
                crate::app::stops::run_stops(&run_config)
            }
        }
    }
}

fn load_config(filepath: Option<&str>) -> Result<RunConfig, HeadwayError> {
    match filepath {
        Some(filepath) => RunConfig::from_file(filepath),
        None => Ok(RunConfig::default()),
    }
}

fn parse_bounding_box(s: &str) -> Result<BoundingBox, String> {
    let coordinates = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{e}")))
        .collect::<Result<Vec<f64>, String>>()
        .map_err(|e| format!("invalid bounding box '{s}': {e}"))?;
    let [min_lon, min_lat, max_lon, max_lat]: [f64; 4] = coordinates
        .try_into()
        .map_err(|_| format!("bounding box '{s}' must have exactly 4 coordinates"))?;
    BoundingBox::new(min_lon, min_lat, max_lon, max_lat).map_err(|e| format!("{e}"))
}

fn parse_window(s: &str) -> Result<(NaiveTime, NaiveTime), String> {
    let (start, end) = s
        .split_once(',')
        .ok_or_else(|| format!("window '{s}' must be \"HH:MM:SS,HH:MM:SS\""))?;
    let start = NaiveTime::parse_from_str(start, "%H:%M:%S")
        .map_err(|e| format!("invalid start time '{start}': {e}"))?;
    let end = NaiveTime::parse_from_str(end, "%H:%M:%S")
        .map_err(|e| format!("invalid end time '{end}': {e}"))?;
    Ok((start, end))
}
