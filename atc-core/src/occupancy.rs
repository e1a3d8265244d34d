//! Runway occupancy timers.
//!
//! Two states per aircraft: clear (no start timestamp) and occupying
//! (timestamp of the tick where phase entered {TakeOff, Landing}). The
//! displayed duration is recomputed on every render so it advances between
//! polls.

use serde::Serialize;

use crate::types::Phase;

/// Occupancy longer than this is flagged for the operator (seconds).
pub const OVERLONG_SECS: i64 = 50;

/// Whether a phase counts as runway occupancy.
pub fn occupies_runway(phase: Phase) -> bool {
    matches!(phase, Phase::TakeOff | Phase::Landing)
}

/// Advance the occupancy timestamp for one snapshot tick.
///
/// Entering the occupancy set records `now`; staying keeps the original
/// start; leaving discards it.
pub fn advance(start: Option<i64>, phase: Phase, now: i64) -> Option<i64> {
    if occupies_runway(phase) {
        Some(start.unwrap_or(now))
    } else {
        None
    }
}

/// Render-ready view of an active occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyView {
    pub seconds: i64,
    pub overlong: bool,
    pub label: String,
}

/// Derive the display view. `None` when not occupying.
pub fn view(start: Option<i64>, now: i64) -> Option<OccupancyView> {
    let start = start?;
    let seconds = (now - start).max(0);
    Some(OccupancyView {
        seconds,
        overlong: seconds > OVERLONG_SECS,
        label: format!("ON RWY {seconds}s"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
