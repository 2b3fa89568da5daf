use crate::transitland::TransitlandError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// a departure window on a single calendar date. the window length is the
/// denominator for trips-per-hour frequencies, so end must be after start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<TimeWindow, TransitlandError> {
        if end <= start {
            return Err(TransitlandError::InvalidTimeWindowError(format!(
                "end time {end} must be after start time {start}"
            )));
        }
        Ok(TimeWindow { date, start, end })
    }

    /// the `date` query parameter form: `YYYY-MM-DD`
    pub fn date_format(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// window length in hours, guaranteed non-zero by construction
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / SECONDS_PER_HOUR
    }

    /// the `origin_departure_between` query parameter form: `HH:MM:SS,HH:MM:SS`
    pub fn api_format(&self) -> String {
        format!(
            "{},{}",
            self.start.format("%H:%M:%S"),
            self.end.format("%H:%M:%S")
        )
    }

    /// filesystem-safe form for cache keys and output filenames
    pub fn filename_format(&self) -> String {
        self.api_format().replace(':', "-").replace(',', "_")
    }
}
