use crate::transitland::TransitlandError;
use serde_json::Value;
use std::time::Duration;

/// the HTTP transport capability: fetch a URL and return its parsed JSON body.
/// the pipeline only ever consumes pages through this seam, which is also what
/// tests stub with canned documents.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<Value, TransitlandError>;
}

/// `PageSource` backed by a blocking reqwest client with a per-request timeout
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<HttpPageSource, TransitlandError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransitlandError::HttpClientError(format!("{e}")))?;
        Ok(HttpPageSource { client })
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> Result<Value, TransitlandError> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| TransitlandError::FetchError {
                url: url.to_string(),
                msg: format!("{e}"),
            })?;
        let body = response.text().map_err(|e| TransitlandError::FetchError {
            url: url.to_string(),
            msg: format!("{e}"),
        })?;
        serde_json::from_str(&body).map_err(|e| TransitlandError::DecodeError {
            source_name: url.to_string(),
            msg: format!("{e}"),
        })
    }
}
