mod bounding_box;
mod client;
mod page_source;
mod paged_fetcher;
mod result_cache;
mod schedule_stop_pair;
mod stop;
mod time_window;
mod transitland_error;

pub use bounding_box::BoundingBox;
pub use client::{TransitlandClient, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
pub use page_source::{HttpPageSource, PageSource};
pub use paged_fetcher::{PagedFetcher, DEFAULT_MAX_PAGES};
pub use result_cache::{CacheKeyParts, CacheStatus, ResultCache};
pub use schedule_stop_pair::ScheduleStopPair;
pub use stop::Stop;
pub use time_window::TimeWindow;
pub use transitland_error::TransitlandError;
