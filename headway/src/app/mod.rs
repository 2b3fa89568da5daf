pub mod generate;
mod headway_app;
mod operation;
pub mod stops;

pub use headway_app::HeadwayApp;
pub use operation::HeadwayOperation;
