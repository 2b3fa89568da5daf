use crate::transitland::{PageSource, TransitlandError};
use kdam::{Bar, BarExt};
use serde_json::Value;
use std::collections::HashSet;

/// upper bound on pages followed for a single logical query. the API never
/// comes close to this; it exists so a misbehaving `meta.next` chain fails
/// with `PaginationLoopError` instead of looping forever.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// follows a query's `meta.next` pointers until exhausted, concatenating the
/// record array found at the named field of each page.
pub struct PagedFetcher<S: PageSource> {
    source: S,
    max_pages: usize,
}

impl<S: PageSource> PagedFetcher<S> {
    pub fn new(source: S) -> PagedFetcher<S> {
        PagedFetcher {
            source,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(source: S, max_pages: usize) -> PagedFetcher<S> {
        PagedFetcher { source, max_pages }
    }

    /// fetch every page of `url`, returning the concatenation of the arrays
    /// found at `field`, in page order.
    pub fn fetch_all(&self, url: &str, field: &str) -> Result<Vec<Value>, TransitlandError> {
        let mut records: Vec<Value> = vec![];
        let mut visited: HashSet<String> = HashSet::new();
        let mut bar = Bar::builder().desc(format!("{field} pages")).build().ok();
        let mut next_url = url.to_string();

        loop {
            if visited.len() >= self.max_pages || !visited.insert(next_url.clone()) {
                return Err(TransitlandError::PaginationLoopError {
                    url: next_url,
                    pages: visited.len(),
                });
            }
            log::info!("GET {next_url}");

            let document = self.source.fetch(&next_url)?;
            let page = document
                .get(field)
                .and_then(Value::as_array)
                .ok_or_else(|| TransitlandError::DecodeError {
                    source_name: next_url.clone(),
                    msg: format!("response missing '{field}' array"),
                })?;
            records.extend(page.iter().cloned());

            if let Some(b) = bar.as_mut() {
                let _ = b.update(1);
            }
            log::info!("{} {field} records so far", records.len());

            match document.pointer("/meta/next") {
                Some(Value::String(next)) if !next.is_empty() => next_url = next.clone(),
                _ => break,
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod test {
    use super::{PagedFetcher, TransitlandError};
    use crate::transitland::PageSource;
    use serde_json::{json, Value};
    use std::collections::HashMap;

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

    #[test]
    fn test_three_pages_concatenate_in_order() {
        let pages = HashMap::from([
            (
                String::from("http://api/stops?page=1"),
                json!({ "stops": [1, 2], "meta": { "next": "http://api/stops?page=2" } }),
            ),
            (
                String::from("http://api/stops?page=2"),
                json!({ "stops": [3], "meta": { "next": "http://api/stops?page=3" } }),
            ),
            (
                String::from("http://api/stops?page=3"),
                json!({ "stops": [4, 5], "meta": { "next": null } }),
            ),
        ]);
        let fetcher = PagedFetcher::new(CannedPages { pages });
        let records = fetcher
            .fetch_all("http://api/stops?page=1", "stops")
            .expect("three pages");
        assert_eq!(records, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
    }

    #[test]
    fn test_absent_meta_terminates() {
        let pages = HashMap::from([(
            String::from("http://api/stops"),
            json!({ "stops": [1] }),
        )]);
        let fetcher = PagedFetcher::new(CannedPages { pages });
        let records = fetcher.fetch_all("http://api/stops", "stops").expect("one page");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_self_referential_next_is_a_loop_error() {
        let pages = HashMap::from([(
            String::from("http://api/stops"),
            json!({ "stops": [1], "meta": { "next": "http://api/stops" } }),
        )]);
        let fetcher = PagedFetcher::new(CannedPages { pages });
        let result = fetcher.fetch_all("http://api/stops", "stops");
        assert!(matches!(
            result,
            Err(TransitlandError::PaginationLoopError { .. })
        ));
    }

    #[test]
    fn test_max_pages_bound() {
        // every page points to a fresh URL, so only the page cap can stop it
        let pages: HashMap<String, Value> = (0..10)
            .map(|i| {
                (
                    format!("http://api/stops?page={i}"),
                    json!({ "stops": [i], "meta": { "next": format!("http://api/stops?page={}", i + 1) } }),
                )
            })
            .collect();
        let fetcher = PagedFetcher::with_max_pages(CannedPages { pages }, 3);
        let result = fetcher.fetch_all("http://api/stops?page=0", "stops");
        assert!(matches!(
            result,
            Err(TransitlandError::PaginationLoopError { pages: 3, .. })
        ));
    }

    #[test]
    fn test_missing_field_is_a_decode_error() {
        let pages = HashMap::from([(
            String::from("http://api/stops"),
            json!({ "operators": [], "meta": { "next": null } }),
        )]);
        let fetcher = PagedFetcher::new(CannedPages { pages });
        let result = fetcher.fetch_all("http://api/stops", "stops");
        assert!(matches!(result, Err(TransitlandError::DecodeError { .. })));
    }
}
