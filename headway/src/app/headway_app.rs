use super::HeadwayOperation;
use clap::Parser;

/// command line tool for generating transit frequency GeoJSON reports
/// from Transitland schedule data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct HeadwayApp {
    /// select the report operation to run
    #[command(subcommand)]
    pub op: HeadwayOperation,
}
