use serde::Deserialize;

/// one scheduled departure between two consecutive stops on a route.
/// only the endpoint identifiers drive aggregation; the departure metadata
/// is carried through for logging and inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleStopPair {
    pub origin_onestop_id: String,
    pub destination_onestop_id: String,
    #[serde(default)]
    pub origin_departure_time: Option<String>,
    #[serde(default)]
    pub route_onestop_id: Option<String>,
}
