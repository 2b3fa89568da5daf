use crate::transitland::TransitlandError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// the recognized cache-key parameters, in their fixed declared order.
/// only parameters present for a query contribute to its filename, so the
/// stops endpoint (bounding box only) and the schedule endpoint (all three)
/// produce distinct, collision-free keys.
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParts {
    pub bounding_box: Option<String>,
    pub date: Option<String>,
    pub time_frame: Option<String>,
}

/// outcome of a `get_or_fetch` call. a persistence failure is carried here
/// rather than as an `Err` so a completed fetch is never discarded; the
/// caller decides how loudly to report it.
#[derive(Debug)]
pub enum CacheStatus {
    Hit,
    MissPersisted,
    MissWriteFailed(TransitlandError),
}

/// flat per-query file cache of raw API result documents. entries never
/// expire; staleness is the caller's responsibility.
pub struct ResultCache {
    cache_dir: PathBuf,
}

impl ResultCache {
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> ResultCache {
        ResultCache {
            cache_dir: cache_dir.into(),
        }
    }

    /// deterministic cache filename for a query: the endpoint name followed by
    /// each present parameter in declared order, `_`-joined.
    pub fn filename(&self, endpoint: &str, parts: &CacheKeyParts) -> PathBuf {
        let mut stem = String::from(endpoint);
        for part in [&parts.bounding_box, &parts.date, &parts.time_frame]
            .into_iter()
            .flatten()
        {
            stem.push('_');
            stem.push_str(part);
        }
        self.cache_dir.join(format!("{stem}.{EXTENSION}"))
    }

    /// return the cached document for this query if one exists, otherwise run
    /// `fetch_fn` and persist its result.
    pub fn get_or_fetch<F>(
        &self,
        endpoint: &str,
        parts: &CacheKeyParts,
        fetch_fn: F,
    ) -> Result<(Value, CacheStatus), TransitlandError>
    where
        F: FnOnce() -> Result<Value, TransitlandError>,
    {
        let filename = self.filename(endpoint, parts);
        if filename.exists() {
            let document = read_document(&filename)?;
            log::info!("cache hit: {}", filename.display());
            return Ok((document, CacheStatus::Hit));
        }

        let document = fetch_fn()?;
        let status = match persist_document(&self.cache_dir, &filename, &document) {
            Ok(()) => CacheStatus::MissPersisted,
            Err(e) => CacheStatus::MissWriteFailed(e),
        };
        Ok((document, status))
    }
}

fn read_document(filename: &Path) -> Result<Value, TransitlandError> {
    let contents = fs::read_to_string(filename).map_err(|e| TransitlandError::DecodeError {
        source_name: filename.display().to_string(),
        msg: format!("{e}"),
    })?;
    serde_json::from_str(&contents).map_err(|e| TransitlandError::DecodeError {
        source_name: filename.display().to_string(),
        msg: format!("{e}"),
    })
}

fn persist_document(
    cache_dir: &Path,
    filename: &Path,
    document: &Value,
) -> Result<(), TransitlandError> {
    fs::create_dir_all(cache_dir).map_err(|e| TransitlandError::CacheWriteError {
        filename: filename.display().to_string(),
        msg: format!("creating cache directory: {e}"),
    })?;
    let body = serde_json::to_string(document).map_err(|e| TransitlandError::CacheWriteError {
        filename: filename.display().to_string(),
        msg: format!("{e}"),
    })?;
    fs::write(filename, body).map_err(|e| TransitlandError::CacheWriteError {
        filename: filename.display().to_string(),
        msg: format!("{e}"),
    })
}

#[cfg(test)]
mod test {
    use super::{CacheKeyParts, CacheStatus, ResultCache};
    use serde_json::json;
    use std::cell::Cell;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("headway-transitland-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_filename_includes_present_parts_in_order() {
        let cache = ResultCache::new("cache");
        let parts = CacheKeyParts {
            bounding_box: Some(String::from("-80_35_-73_41")),
            date: Some(String::from("2016-01-22")),
            time_frame: Some(String::from("07-30-00_08-00-00")),
        };
        assert_eq!(
            cache.filename("schedule_stop_pairs", &parts),
            PathBuf::from(
                "cache/schedule_stop_pairs_-80_35_-73_41_2016-01-22_07-30-00_08-00-00.json"
            )
        );
    }

    #[test]
    fn test_filename_skips_absent_parts() {
        let cache = ResultCache::new("cache");
        let parts = CacheKeyParts {
            bounding_box: Some(String::from("-80_35_-73_41")),
            ..Default::default()
        };
        assert_eq!(
            cache.filename("stops", &parts),
            PathBuf::from("cache/stops_-80_35_-73_41.json")
        );
    }

    #[test]
    fn test_round_trip_fetches_once() {
        let cache = ResultCache::new(test_dir("round-trip"));
        let parts = CacheKeyParts {
            bounding_box: Some(String::from("-80_35_-73_41")),
            ..Default::default()
        };
        let document = json!([{ "onestop_id": "s-a" }, { "onestop_id": "s-b" }]);
        let fetches = Cell::new(0);
        let fetch = || {
            fetches.set(fetches.get() + 1);
            Ok(document.clone())
        };

        let (first, status) = cache.get_or_fetch("stops", &parts, fetch).expect("miss");
        assert!(matches!(status, CacheStatus::MissPersisted));
        assert_eq!(first, document);
        assert_eq!(fetches.get(), 1);

        let fetch_again = || {
            fetches.set(fetches.get() + 1);
            Ok(json!("should not be called"))
        };
        let (second, status) = cache.get_or_fetch("stops", &parts, fetch_again).expect("hit");
        assert!(matches!(status, CacheStatus::Hit));
        assert_eq!(second, document);
        assert_eq!(fetches.get(), 1);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let cache = ResultCache::new(test_dir("fetch-error"));
        let parts = CacheKeyParts::default();
        let result = cache.get_or_fetch("stops", &parts, || {
            Err(super::TransitlandError::FetchError {
                url: String::from("http://api/stops"),
                msg: String::from("connection refused"),
            })
        });
        assert!(result.is_err());
    }
}
