use headway_transitland::transitland::TransitlandError;

#[derive(thiserror::Error, Debug)]
pub enum HeadwayError {
    #[error(transparent)]
    TransitlandError(#[from] TransitlandError),
    #[error("invalid configuration: {0}")]
    InvalidConfigurationError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failed writing output '{filename}': {msg}")]
    OutputWriteError { filename: String, msg: String },
}
