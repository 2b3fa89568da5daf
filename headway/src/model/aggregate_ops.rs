use headway_transitland::transitland::ScheduleStopPair;
use std::collections::HashMap;

/// count the occurrences of each directed (origin, destination) stop pair.
/// self-loops carry no geometry worth drawing and are dropped unconditionally.
/// iteration order of the result is unspecified; callers that need stable
/// output must sort.
pub fn aggregate(pairs: &[ScheduleStopPair]) -> HashMap<(String, String), usize> {
    let mut edges: HashMap<(String, String), usize> = HashMap::new();
    for pair in pairs {
        if pair.origin_onestop_id == pair.destination_onestop_id {
            continue;
        }
        let key = (
            pair.origin_onestop_id.clone(),
            pair.destination_onestop_id.clone(),
        );
        *edges.entry(key).or_insert(0) += 1;
    }
    edges
}
