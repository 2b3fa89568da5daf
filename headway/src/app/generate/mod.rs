mod run;

pub use run::{build_buckets, run_generate};
