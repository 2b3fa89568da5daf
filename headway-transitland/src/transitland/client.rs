use crate::transitland::{
    BoundingBox, CacheKeyParts, CacheStatus, HttpPageSource, PageSource, PagedFetcher,
    ResultCache, ScheduleStopPair, Stop, TimeWindow, TransitlandError,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://transit.land/api/v1";
pub const DEFAULT_PER_PAGE: u32 = 1000;

const SCHEDULE_STOP_PAIRS: &str = "schedule_stop_pairs";
const STOPS: &str = "stops";

/// client for the two Transitland queries the pipeline needs: schedule stop
/// pairs (edges) and stops (nodes). composes pagination with the optional
/// per-query file cache, and memoizes the stop lookup table for the lifetime
/// of the client instance.
pub struct TransitlandClient<S: PageSource> {
    fetcher: PagedFetcher<S>,
    cache: Option<ResultCache>,
    base_url: String,
    per_page: u32,
    bounding_box: BoundingBox,
    time_window: TimeWindow,
    stops: OnceCell<HashMap<String, Stop>>,
}

impl TransitlandClient<HttpPageSource> {
    /// client backed by a live HTTP transport with a per-request timeout
    pub fn with_http(
        timeout: Duration,
        cache: Option<ResultCache>,
        base_url: &str,
        per_page: u32,
        bounding_box: BoundingBox,
        time_window: TimeWindow,
    ) -> Result<TransitlandClient<HttpPageSource>, TransitlandError> {
        let source = HttpPageSource::new(timeout)?;
        Ok(TransitlandClient::new(
            source,
            cache,
            base_url,
            per_page,
            bounding_box,
            time_window,
        ))
    }
}

impl<S: PageSource> TransitlandClient<S> {
    pub fn new(
        source: S,
        cache: Option<ResultCache>,
        base_url: &str,
        per_page: u32,
        bounding_box: BoundingBox,
        time_window: TimeWindow,
    ) -> TransitlandClient<S> {
        TransitlandClient {
            fetcher: PagedFetcher::new(source),
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
            bounding_box,
            time_window,
            stops: OnceCell::new(),
        }
    }

    /// every scheduled departure between consecutive stops inside the
    /// bounding box and departure window
    pub fn get_schedule_stop_pairs(&self) -> Result<Vec<ScheduleStopPair>, TransitlandError> {
        let url = format!(
            "{}/{}?per_page={}&bbox={}&date={}&origin_departure_between={}",
            self.base_url,
            SCHEDULE_STOP_PAIRS,
            self.per_page,
            self.bounding_box.api_format(),
            self.time_window.date_format(),
            self.time_window.api_format()
        );
        let parts = CacheKeyParts {
            bounding_box: Some(self.bounding_box.filename_format()),
            date: Some(self.time_window.date_format()),
            time_frame: Some(self.time_window.filename_format()),
        };
        let document = self.get_json_data(SCHEDULE_STOP_PAIRS, &parts, &url)?;
        decode_records(&document, SCHEDULE_STOP_PAIRS)
    }

    /// every stop inside the bounding box, keyed by onestop_id.
    /// a duplicate onestop_id in the response overwrites the earlier record.
    pub fn get_stops(&self) -> Result<HashMap<String, Stop>, TransitlandError> {
        let url = format!(
            "{}/{}?per_page={}&bbox={}",
            self.base_url,
            STOPS,
            self.per_page,
            self.bounding_box.api_format()
        );
        let parts = CacheKeyParts {
            bounding_box: Some(self.bounding_box.filename_format()),
            ..Default::default()
        };
        let document = self.get_json_data(STOPS, &parts, &url)?;
        let stops: Vec<Stop> = decode_records(&document, STOPS)?;

        let mut table: HashMap<String, Stop> = HashMap::with_capacity(stops.len());
        for stop in stops {
            table.insert(stop.onestop_id.clone(), stop);
        }
        Ok(table)
    }

    /// look up a single stop, fetching and memoizing the full stop table on
    /// first use. a miss is an error: downstream code dereferences the stop's
    /// geometry, so an absent stop must surface here, not there.
    pub fn get_stop(&self, onestop_id: &str) -> Result<&Stop, TransitlandError> {
        if self.stops.get().is_none() {
            let table = self.get_stops()?;
            let _ = self.stops.set(table);
        }
        self.stops
            .get()
            .and_then(|stops| stops.get(onestop_id))
            .ok_or_else(|| TransitlandError::UnknownStopError(onestop_id.to_string()))
    }

    /// fetch a query's record document, through the cache when one is
    /// configured. a cache persistence failure is logged and the fetched
    /// document used anyway; only fetch and decode failures abort.
    fn get_json_data(
        &self,
        endpoint: &str,
        parts: &CacheKeyParts,
        url: &str,
    ) -> Result<Value, TransitlandError> {
        match &self.cache {
            Some(cache) => {
                let (document, status) = cache.get_or_fetch(endpoint, parts, || {
                    self.fetcher.fetch_all(url, endpoint).map(Value::Array)
                })?;
                if let CacheStatus::MissWriteFailed(e) = status {
                    log::error!("continuing with fetched data after cache failure: {e}");
                }
                Ok(document)
            }
            None => Ok(Value::Array(self.fetcher.fetch_all(url, endpoint)?)),
        }
    }
}

fn decode_records<T: DeserializeOwned>(
    document: &Value,
    endpoint: &str,
) -> Result<Vec<T>, TransitlandError> {
    let records = document
        .as_array()
        .ok_or_else(|| TransitlandError::DecodeError {
            source_name: endpoint.to_string(),
            msg: String::from("expected a JSON array of records"),
        })?;
    records
        .iter()
        .map(|record| {
            serde_json::from_value(record.clone()).map_err(|e| TransitlandError::DecodeError {
                source_name: endpoint.to_string(),
                msg: format!("{e}"),
            })
        })
        .collect()
}
