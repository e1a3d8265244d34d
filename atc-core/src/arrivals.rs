//! Arrival sequencing, ETA estimation, and approach-spacing advisories.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{AircraftSnapshot, Phase, WakeCategory};

/// Substituted when the reported speed is missing or implausibly low.
pub const DEFAULT_APPROACH_SPEED_KTS: f64 = 140.0;

/// Reported speeds below this are treated as noise near the ground.
pub const MIN_CREDIBLE_SPEED_KTS: f64 = 10.0;

/// An arrival inside this distance marks the runway badge occupied.
pub const NEAR_THRESHOLD_NM: f64 = 4.0;

/// Climb rate above this on short final reads as a go-around (fpm).
const GO_AROUND_CLIMB_FPM: f64 = 400.0;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One row of the arrival board, ordered by distance to threshold.
#[derive(Debug, Clone, Serialize)]
pub struct ArrivalEntry {
    pub icao24: String,
    pub label: String,
    pub phase: Phase,
    pub wake_category: WakeCategory,
    pub distance_nm: f64,
    pub eta_minutes: f64,
    pub eta_epoch: i64,
    pub advisory: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArrivalBoard {
    pub entries: Vec<ArrivalEntry>,
    /// Near-threshold badge. Independent of the occupancy tracker and may
    /// disagree with it; a known cosmetic inconsistency, kept as-is.
    pub runway_occupied: bool,
    /// Milliseconds until the next arrival, clamped at zero.
    pub next_countdown_ms: Option<i64>,
}

// ---------------------------------------------------------------------------
// ETA
// ---------------------------------------------------------------------------

/// ETA in minutes over a distance, guarding the divisor.
pub fn eta_minutes(distance_nm: f64, speed: Option<f64>) -> f64 {
    let speed = speed.unwrap_or(DEFAULT_APPROACH_SPEED_KTS);
    let effective = if speed < MIN_CREDIBLE_SPEED_KTS {
        DEFAULT_APPROACH_SPEED_KTS
    } else {
        speed
    };
    (distance_nm / effective) * 60.0
}

// ---------------------------------------------------------------------------
// Spacing advisories
// ---------------------------------------------------------------------------

/// Advisory for the gap (nm) behind the preceding arrival.
fn spacing_advisory(gap_nm: f64) -> Option<&'static str> {
    if gap_nm < 2.5 {
        Some("GO AROUND")
    } else if gap_nm < 3.0 {
        Some("MIN SPD")
    } else if gap_nm < 4.0 {
        Some("SLOW 160")
    } else if gap_nm < 5.0 {
        Some("MAINTAIN")
    } else if gap_nm > 7.0 && gap_nm < 9.0 {
        Some("EXPEDITE")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Build the arrival board from the current snapshot set.
///
/// Filters to Approach/Final with a known distance, orders ascending by
/// distance with the address as the deterministic tie-break.
pub fn compute_arrivals(snapshots: &[&AircraftSnapshot], now: i64) -> ArrivalBoard {
    let mut candidates: Vec<(&AircraftSnapshot, f64)> = snapshots
        .iter()
        .filter(|s| matches!(s.phase, Phase::Approach | Phase::Final))
        .filter_map(|s| s.distance.map(|d| (*s, d)))
        .collect();

    candidates.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.icao24.cmp(&b.0.icao24))
    });

    let mut entries = Vec::with_capacity(candidates.len());
    for (i, (snap, dist)) in candidates.iter().enumerate() {
        let minutes = eta_minutes(*dist, snap.velocity);
        let eta_epoch = snap.eta.unwrap_or(now + (minutes * 60.0) as i64);

        // Go-around beats spacing advice
        let advisory = if *dist < NEAR_THRESHOLD_NM
            && snap.vertical_rate.unwrap_or(0.0) > GO_AROUND_CLIMB_FPM
        {
            Some("ABORTED APPROACH")
        } else if i > 0 {
            spacing_advisory(dist - candidates[i - 1].1)
        } else {
            None
        };

        entries.push(ArrivalEntry {
            icao24: snap.icao24.clone(),
            label: snap.label().to_string(),
            phase: snap.phase,
            wake_category: snap.wake_category,
            distance_nm: *dist,
            eta_minutes: minutes,
            eta_epoch,
            advisory,
        });
    }

    let runway_occupied = entries.iter().any(|e| e.distance_nm < NEAR_THRESHOLD_NM);
    let next_countdown_ms = entries
        .first()
        .map(|e| (e.eta_epoch * 1000 - now * 1000).max(0));

    ArrivalBoard {
        entries,
        runway_occupied,
        next_countdown_ms,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
