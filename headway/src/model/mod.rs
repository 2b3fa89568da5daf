mod aggregate_ops;
mod classify_ops;
mod color_tier;
mod headway_error;
mod output_ops;
mod run_config;
mod transit_mode;
mod unknown_stop_policy;

pub use aggregate_ops::aggregate;
pub use classify_ops::{classify_edge, ClassifiedFeature};
pub use color_tier::{select_tier, ColorTier};
pub use headway_error::HeadwayError;
pub use output_ops::{write_bucket_collections, write_feature_collection};
pub use run_config::RunConfig;
pub use transit_mode::{classify_mode, TransitMode};
pub use unknown_stop_policy::UnknownStopPolicy;
