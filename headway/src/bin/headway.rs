//! reads the Transitland API for a bounding box and departure window and
//! compiles a GeoJSON frequency visualization of each pair of consecutive
//! transit stops.
use clap::Parser;
use headway::app::HeadwayApp;

fn main() {
    env_logger::init();
    let args = HeadwayApp::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running headway: {e}");
            std::process::exit(1);
        }
    }
}
