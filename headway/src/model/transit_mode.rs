use headway_transitland::transitland::Stop;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// output bucket for a classified edge. derived from feed membership at
/// classification time, never stored on the feature itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    Bus,
    Subway,
}

impl Display for TransitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitMode::Bus => write!(f, "bus"),
            TransitMode::Subway => write!(f, "subway"),
        }
    }
}

/// classify an edge's mode from the feeds both endpoints were imported from.
/// an edge whose shared feeds include an excluded feed is dropped (None); a
/// shared subway feed makes it subway; everything else, including endpoints
/// with no shared feed at all, falls back to bus.
pub fn classify_mode(
    origin: &Stop,
    destination: &Stop,
    subway_feed_id: &str,
    excluded_feed_ids: &[String],
) -> Option<TransitMode> {
    let origin_feeds: HashSet<&String> = origin.imported_from_feed_onestop_ids.iter().collect();
    let shared: Vec<&String> = destination
        .imported_from_feed_onestop_ids
        .iter()
        .filter(|feed| origin_feeds.contains(feed))
        .collect();

    if shared.iter().any(|feed| excluded_feed_ids.contains(*feed)) {
        return None;
    }
    if shared.iter().any(|feed| feed.as_str() == subway_feed_id) {
        Some(TransitMode::Subway)
    } else {
        Some(TransitMode::Bus)
    }
}
