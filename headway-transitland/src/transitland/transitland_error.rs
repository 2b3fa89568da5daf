#[derive(thiserror::Error, Debug)]
pub enum TransitlandError {
    #[error("failed fetching '{url}': {msg}")]
    FetchError { url: String, msg: String },
    #[error("failed decoding JSON from '{source_name}': {msg}")]
    DecodeError { source_name: String, msg: String },
    #[error("pagination did not terminate after {pages} pages, last URL '{url}'")]
    PaginationLoopError { url: String, pages: usize },
    #[error("failed persisting cache entry '{filename}': {msg}")]
    CacheWriteError { filename: String, msg: String },
    #[error("unknown stop onestop_id '{0}'")]
    UnknownStopError(String),
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBoxError(String),
    #[error("invalid time window: {0}")]
    InvalidTimeWindowError(String),
    #[error("failed initializing HTTP client: {0}")]
    HttpClientError(String),
}
