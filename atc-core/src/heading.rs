//! Heading resolution with trail-bearing fallback.
//!
//! The reported track is unreliable for slow ground traffic, so taxiing
//! aircraft fall back to the bearing of their last trail segment, then to
//! whatever was resolved previously.

use crate::geo::initial_bearing_deg;
use crate::trail::Trail;
use crate::types::AircraftSnapshot;

/// Below this ground speed the reported track is not trusted.
pub const MIN_TRACK_SPEED: f64 = 1.0;

/// Resolve a display heading in degrees [0, 360).
pub fn resolve_heading(snap: &AircraftSnapshot, trail: &Trail, previous: Option<f64>) -> f64 {
    // Reported track wins for anything actually moving
    if let (Some(track), Some(speed)) = (snap.true_track, snap.velocity) {
        if track != 0.0 && speed > MIN_TRACK_SPEED {
            return track.rem_euclid(360.0);
        }
    }

    // Ground traffic: infer from the last trail segment
    if snap.on_ground {
        if let Some(((lat1, lon1), (lat2, lon2))) = trail.last_segment() {
            return initial_bearing_deg(lat1, lon1, lat2, lon2);
        }
    }

    // Sticky default
    previous.unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
