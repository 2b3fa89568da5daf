use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a schedule record that
/// references a stop missing from the stop table
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStopPolicy {
    /// abort the run with an error naming the missing stop
    Fail,
    /// drop the edge and log a warning
    SkipEdge,
}
