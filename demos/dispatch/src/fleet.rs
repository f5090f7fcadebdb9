//! Synthetic New Delhi fleet.
//!
//! Feed rows carry free-form labels the way the dispatch API sends them;
//! `VehicleReport::from_feed` maps them onto the engine's enums.

use fleet_core::{GeoPoint, SimRng, VehicleReport, VehicleStatus};
use rand::Rng;

/// Largest per-axis GPS drift between two feed snapshots, in degrees.
const DRIFT_DEG: f64 = 0.0004;

/// `(id, kind label, status label, lat, lon)`
type FeedRow = (&'static str, &'static str, Option<&'static str>, f64, f64);

const FEED: [FeedRow; 8] = [
    ("AMB-101", "ambulance", Some("available"), 28.6139, 77.2090),
    ("AMB-102", "Ambulance", Some("busy"),      28.5672, 77.2100),
    ("AMB-103", "ambulance", Some("available"), 28.6517, 77.2219),
    ("POL-201", "police",    Some("available"), 28.6304, 77.2177),
    ("POL-202", "POLICE",    Some("available"), 28.5355, 77.3910),
    ("FIR-301", "fire",      Some("available"), 28.6692, 77.4538),
    ("FIR-302", "fire",      None,              28.7041, 77.1025),
    ("UTL-401", "tow truck", Some("available"), 28.5244, 77.1855),
];

/// The initial feed snapshot.
pub fn initial_feed() -> Vec<VehicleReport> {
    FEED.iter()
        .map(|&(id, kind, status, lat, lon)| VehicleReport::from_feed(id, kind, status, lat, lon))
        .collect()
}

/// A later feed snapshot: `POL-201` is dispatched (Busy), `UTL-401` has
/// left the feed, and every remaining fix drifts by up to `DRIFT_DEG`.
pub fn updated_feed(rng: &mut SimRng) -> Vec<VehicleReport> {
    initial_feed()
        .into_iter()
        .filter(|r| r.id.as_str() != "UTL-401")
        .map(|mut r| {
            if r.id.as_str() == "POL-201" {
                r.status = VehicleStatus::Busy;
            }
            let d_lat = rng.gen_range(-DRIFT_DEG..=DRIFT_DEG);
            let d_lon = rng.gen_range(-DRIFT_DEG..=DRIFT_DEG);
            r.position = r.position.offset(d_lat, d_lon);
            r
        })
        .collect()
}

/// Connaught Place, where the demo "user" is standing.
pub fn user_location() -> GeoPoint {
    GeoPoint::new(28.6315, 77.2167)
}
