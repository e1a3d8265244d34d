//! Bounded per-aircraft position history.
//!
//! Trails feed heading inference for taxiing traffic and the map's
//! breadcrumb rendering. Sub-threshold jitter (parked aircraft, short poll
//! cycles) must not grow the trail.

use serde::Serialize;

/// Maximum stored points per aircraft.
pub const MAX_TRAIL: usize = 9;

/// Minimum movement in either axis before a new point is stored.
pub const TRAIL_EPSILON_DEG: f64 = 0.00005;

/// Recent positions, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trail {
    points: Vec<(f64, f64)>,
}

impl Trail {
    pub fn new() -> Self {
        Trail { points: Vec::new() }
    }

    /// Append a position if it moved more than the epsilon in either axis.
    ///
    /// Returns whether the point was stored.
    pub fn push(&mut self, lat: f64, lon: f64) -> bool {
        if let Some(&(last_lat, last_lon)) = self.points.last() {
            if (lat - last_lat).abs() <= TRAIL_EPSILON_DEG
                && (lon - last_lon).abs() <= TRAIL_EPSILON_DEG
            {
                return false;
            }
        }
        self.points.push((lat, lon));
        if self.points.len() > MAX_TRAIL {
            self.points.remove(0);
        }
        true
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// The two most recent points, older first. `None` with fewer than two.
    pub fn last_segment(&self) -> Option<((f64, f64), (f64, f64))> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
