//! Runway exit-point prediction for short-final traffic.
//!
//! Purely a rendering aid: a straight guidance line from the aircraft to a
//! wake-dependent exit coordinate. No state between ticks.

use serde::Serialize;

use crate::airports::Airport;
use crate::types::{AircraftSnapshot, Phase};

/// Exit lines are drawn inside this distance to threshold (nm).
pub const EXIT_PREDICT_NM: f64 = 3.0;

/// Straight guidance line from current position to the predicted exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Predict the exit line for one aircraft, if it qualifies.
pub fn predict_exit(snap: &AircraftSnapshot, airport: &Airport) -> Option<ExitLine> {
    if !matches!(snap.phase, Phase::Final | Phase::Landing) {
        return None;
    }
    if snap.distance? >= EXIT_PREDICT_NM {
        return None;
    }
    let (lat, lon) = (snap.latitude?, snap.longitude?);
    Some(ExitLine {
        from: (lat, lon),
        to: airport.exit_point(snap.wake_category),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports;
    use crate::types::WakeCategory;

    fn short_final() -> AircraftSnapshot {
        AircraftSnapshot {
            icao24: "aaa111".into(),
            phase: Phase::Final,
            distance: Some(1.5),
            latitude: Some(51.86),
            longitude: Some(0.20),
            ..Default::default()
        }
    }

    #[test]
    fn test_heavy_gets_far_exit() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.wake_category = WakeCategory::Heavy;
        let line = predict_exit(&snap, egss).unwrap();
        assert_eq!(line.to, egss.runway[1]);
        assert_eq!(line.from, (51.86, 0.20));
    }

    #[test]
    fn test_medium_gets_rapid_exit() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.wake_category = WakeCategory::Medium;
        let line = predict_exit(&snap, egss).unwrap();
        assert_ne!(line.to, egss.runway[1]);
    }

    #[test]
    fn test_too_far_out() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.distance = Some(3.0);
        assert!(predict_exit(&snap, egss).is_none());
    }

    #[test]
    fn test_wrong_phase() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.phase = Phase::Approach;
        assert!(predict_exit(&snap, egss).is_none());
    }

    #[test]
    fn test_requires_position_and_distance() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.latitude = None;
        assert!(predict_exit(&snap, egss).is_none());
        let mut snap = short_final();
        snap.distance = None;
        assert!(predict_exit(&snap, egss).is_none());
    }

    #[test]
    fn test_landing_phase_qualifies() {
        let egss = airports::find("EGSS").unwrap();
        let mut snap = short_final();
        snap.phase = Phase::Landing;
        assert!(predict_exit(&snap, egss).is_some());
    }
}
