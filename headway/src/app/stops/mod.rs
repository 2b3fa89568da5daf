mod run;

pub use run::{run_stops, stop_features};
