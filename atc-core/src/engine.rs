//! Engine state and per-event reducers.
//!
//! Pure logic — no I/O, no clocks. One mutation per snapshot batch, one per
//! operator action; rendering is a read that takes the current time so
//! occupancy timers and countdowns advance between polls. The caller owns
//! the single-writer discipline.

use std::collections::HashMap;

use serde::Serialize;

use crate::airports::{self, Airport};
use crate::alerts::{self, EmergencyBanner};
use crate::arrivals::{self, ArrivalBoard};
use crate::exit::{self, ExitLine};
use crate::feed::{CommandEntry, CommandFeed};
use crate::geo;
use crate::heading::resolve_heading;
use crate::occupancy::{self, OccupancyView};
use crate::trail::Trail;
use crate::types::{AircraftSnapshot, Result};

/// Identifiers absent for more than this many consecutive snapshots are
/// evicted (trail and heading included).
pub const ABSENT_SNAPSHOT_LIMIT: u32 = 1;

// ---------------------------------------------------------------------------
// Per-aircraft record
// ---------------------------------------------------------------------------

/// Carried-over memory for one aircraft, keyed by `icao24`.
#[derive(Debug, Clone, Default)]
pub struct AircraftRecord {
    pub snapshot: AircraftSnapshot,
    pub trail: Trail,
    pub last_heading: Option<f64>,
    pub occupancy_start: Option<i64>,
    /// Consecutive snapshots this aircraft has been missing from.
    pub missed: u32,
}

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

/// One aircraft, render-ready.
#[derive(Debug, Clone, Serialize)]
pub struct AircraftView {
    #[serde(flatten)]
    pub snapshot: AircraftSnapshot,
    pub heading: f64,
    pub icon_color: &'static str,
    pub trail: Vec<(f64, f64)>,
    pub occupancy: Option<OccupancyView>,
    pub exit_line: Option<ExitLine>,
}

/// Full overlay for one render tick.
#[derive(Debug, Clone, Serialize)]
pub struct Overlay {
    pub airport: &'static str,
    pub aircraft: Vec<AircraftView>,
    pub arrivals: ArrivalBoard,
    pub emergency: Option<EmergencyBanner>,
    pub commands: Vec<CommandEntry>,
}

/// Altitude color banding for the plane icon.
pub fn icon_color(baro_altitude: Option<f64>) -> &'static str {
    match baro_altitude {
        None => "#ff9800",                    // likely on the ground
        Some(a) if a <= 0.0 => "#ff9800",
        Some(a) if a < 1000.0 => "#ffeb3b",
        Some(a) if a < 5000.0 => "#4caf50",
        Some(a) if a < 20000.0 => "#03a9f4",
        _ => "#9c27b0",
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Process-lifetime derived state for one airport's traffic.
///
/// Created empty, mutated exactly once per incoming snapshot batch plus
/// operator actions, never torn down except at process exit (or an airport
/// switch, which resets it).
pub struct Engine {
    airport: &'static Airport,
    aircraft: HashMap<String, AircraftRecord>,
    /// Wire order of the latest batch, for deterministic iteration.
    order: Vec<String>,
    feed: CommandFeed,
    emergency: Option<EmergencyBanner>,

    // Counters
    pub snapshots_applied: u64,
    pub entries_skipped: u64,
}

impl Engine {
    pub fn new(airport_code: &str) -> Self {
        Engine {
            airport: airports::find_or_default(airport_code),
            aircraft: HashMap::new(),
            order: Vec::new(),
            feed: CommandFeed::new(),
            emergency: None,
            snapshots_applied: 0,
            entries_skipped: 0,
        }
    }

    pub fn airport(&self) -> &'static Airport {
        self.airport
    }

    pub fn feed(&self) -> &CommandFeed {
        &self.feed
    }

    /// Fold one snapshot batch into the engine.
    ///
    /// Malformed entries (missing identifier) are skipped, never aborting
    /// the batch. Aircraft absent from the batch lose occupancy immediately
    /// and are evicted entirely once absent for more than one snapshot.
    pub fn apply_snapshot(&mut self, batch: Vec<AircraftSnapshot>, now: i64) {
        self.snapshots_applied += 1;

        let mut seen: Vec<String> = Vec::with_capacity(batch.len());
        let mut kept: Vec<AircraftSnapshot> = Vec::with_capacity(batch.len());

        for mut snap in batch {
            if snap.icao24.trim().is_empty() {
                self.entries_skipped += 1;
                continue;
            }
            // Feeds that omit distance get it computed from the field center
            if snap.distance.is_none() {
                if let (Some(lat), Some(lon)) = (snap.latitude, snap.longitude) {
                    snap.distance =
                        Some(geo::haversine_nm(lat, lon, self.airport.lat, self.airport.lon));
                }
            }
            seen.push(snap.icao24.clone());
            kept.push(snap);
        }

        // Alert rules see the whole fresh set before it is merged away
        let refs: Vec<&AircraftSnapshot> = kept.iter().collect();
        let alert_batch = alerts::evaluate(&refs);
        self.feed.ingest(&alert_batch.texts, now);
        self.emergency = alert_batch.emergency;

        for snap in kept {
            let record = self.aircraft.entry(snap.icao24.clone()).or_default();

            if let (Some(lat), Some(lon)) = (snap.latitude, snap.longitude) {
                record.trail.push(lat, lon);
            }
            record.last_heading = Some(resolve_heading(&snap, &record.trail, record.last_heading));
            record.occupancy_start = occupancy::advance(record.occupancy_start, snap.phase, now);
            record.missed = 0;
            record.snapshot = snap;
        }

        // Absence bookkeeping: occupancy cannot outlive observability
        for (id, record) in self.aircraft.iter_mut() {
            if !seen.contains(id) {
                record.occupancy_start = None;
                record.missed += 1;
            }
        }
        self.aircraft
            .retain(|_, record| record.missed <= ABSENT_SNAPSHOT_LIMIT);

        self.order = seen;
    }

    /// Operator accepts a command.
    pub fn acknowledge(&mut self, id: u64) -> Result<()> {
        self.feed.acknowledge(id)
    }

    /// Operator rejects a command.
    pub fn reject(&mut self, id: u64) -> Result<()> {
        self.feed.reject(id)
    }

    /// Switch the active airport, clearing all derived state. Identifiers
    /// and geometry are airport-scoped, so nothing survives the switch.
    pub fn set_airport(&mut self, code: &str) {
        self.airport = airports::find_or_default(code);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.aircraft.clear();
        self.order.clear();
        self.feed.clear();
        self.emergency = None;
    }

    /// Latest snapshot set in wire order.
    pub fn states(&self) -> Vec<AircraftSnapshot> {
        self.order
            .iter()
            .filter_map(|id| self.aircraft.get(id))
            .map(|r| r.snapshot.clone())
            .collect()
    }

    /// Build the render-ready overlay for the given wall-clock time.
    ///
    /// Pure read: a UI refresh tick calls this with a fresh `now` to keep
    /// occupancy durations and countdowns moving between polls.
    pub fn render(&self, now: i64) -> Overlay {
        let mut views = Vec::with_capacity(self.order.len());
        let mut latest: Vec<&AircraftSnapshot> = Vec::with_capacity(self.order.len());

        for id in &self.order {
            let record = match self.aircraft.get(id) {
                Some(r) => r,
                None => continue,
            };
            latest.push(&record.snapshot);
            views.push(AircraftView {
                snapshot: record.snapshot.clone(),
                heading: record.last_heading.unwrap_or(0.0),
                icon_color: icon_color(record.snapshot.baro_altitude),
                trail: record.trail.points().to_vec(),
                occupancy: occupancy::view(record.occupancy_start, now),
                exit_line: exit::predict_exit(&record.snapshot, self.airport),
            });
        }

        Overlay {
            airport: self.airport.code,
            aircraft: views,
            arrivals: arrivals::compute_arrivals(&latest, now),
            emergency: self.emergency.clone(),
            commands: self.feed.visible().into_iter().cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::MAX_TRAIL;
    use crate::types::{Phase, WakeCategory};

    fn snap(icao: &str, lat: f64, lon: f64) -> AircraftSnapshot {
        AircraftSnapshot {
            icao24: icao.into(),
            latitude: Some(lat),
            longitude: Some(lon),
            ..Default::default()
        }
    }

    #[test]
    fn test_trail_bounded_over_long_sequence() {
        let mut engine = Engine::new("EGSS");
        for i in 0..30 {
            let s = snap("aaa111", 51.8 + i as f64 * 0.001, 0.2);
            engine.apply_snapshot(vec![s], i);
            let record = &engine.aircraft["aaa111"];
            assert!(record.trail.len() <= MAX_TRAIL);
        }
    }

    #[test]
    fn test_malformed_entry_skipped_not_fatal() {
        let mut engine = Engine::new("EGSS");
        let bad = AircraftSnapshot::default(); // empty icao24
        let good = snap("aaa111", 51.8, 0.2);
        engine.apply_snapshot(vec![bad, good], 1);
        assert_eq!(engine.entries_skipped, 1);
        assert_eq!(engine.states().len(), 1);
    }

    #[test]
    fn test_absent_aircraft_evicted_after_two_misses() {
        let mut engine = Engine::new("EGSS");
        engine.apply_snapshot(vec![snap("aaa111", 51.8, 0.2)], 1);
        // One miss: trail retained (stale)
        engine.apply_snapshot(vec![snap("bbb222", 51.9, 0.3)], 3);
        assert!(engine.aircraft.contains_key("aaa111"));
        // Second miss: evicted
        engine.apply_snapshot(vec![snap("bbb222", 51.9, 0.3)], 5);
        assert!(!engine.aircraft.contains_key("aaa111"));
    }

    #[test]
    fn test_reappearance_resets_miss_counter() {
        let mut engine = Engine::new("EGSS");
        engine.apply_snapshot(vec![snap("aaa111", 51.8, 0.2)], 1);
        engine.apply_snapshot(vec![], 3);
        engine.apply_snapshot(vec![snap("aaa111", 51.8, 0.2)], 5);
        assert_eq!(engine.aircraft["aaa111"].missed, 0);
    }

    #[test]
    fn test_occupancy_cleared_on_absence() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.88, 0.23);
        s.phase = Phase::Landing;
        engine.apply_snapshot(vec![s], 10);
        assert_eq!(engine.aircraft["aaa111"].occupancy_start, Some(10));

        engine.apply_snapshot(vec![], 12);
        assert_eq!(engine.aircraft["aaa111"].occupancy_start, None);
    }

    #[test]
    fn test_occupancy_duration_advances_on_clock_tick() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.88, 0.23);
        s.phase = Phase::TakeOff;
        engine.apply_snapshot(vec![s], 100);

        // Two renders with no new snapshot: the timer still moves
        let v1 = engine.render(101).aircraft[0].occupancy.clone().unwrap();
        let v2 = engine.render(104).aircraft[0].occupancy.clone().unwrap();
        assert_eq!(v1.seconds, 1);
        assert_eq!(v2.seconds, 4);
    }

    #[test]
    fn test_feed_single_entry_for_persistent_alert() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.8, 0.2);
        s.phase = Phase::Final;
        s.velocity = Some(180.0);
        engine.apply_snapshot(vec![s.clone()], 1);
        engine.apply_snapshot(vec![s], 3);
        assert_eq!(engine.feed().len(), 1);
    }

    #[test]
    fn test_emergency_banner_in_overlay() {
        let mut engine = Engine::new("EGSS");
        let mut a = snap("aaa111", 51.8, 0.2);
        a.squawk = Some("7700".into());
        let mut b = snap("bbb222", 51.9, 0.3);
        b.squawk = Some("7500".into());
        engine.apply_snapshot(vec![a, b], 1);

        let overlay = engine.render(1);
        let banner = overlay.emergency.unwrap();
        assert_eq!(banner.label, "aaa111"); // first match wins
        // Banner clears once the squawk does
        engine.apply_snapshot(vec![snap("aaa111", 51.8, 0.2)], 3);
        assert!(engine.render(3).emergency.is_none());
    }

    #[test]
    fn test_render_heading_resolved() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.8, 0.2);
        s.true_track = Some(224.0);
        s.velocity = Some(140.0);
        engine.apply_snapshot(vec![s], 1);
        assert_eq!(engine.render(1).aircraft[0].heading, 224.0);
    }

    #[test]
    fn test_render_arrival_board_ordering() {
        let mut engine = Engine::new("EGSS");
        let mk = |icao: &str, d: f64| {
            let mut s = snap(icao, 51.8, 0.2);
            s.phase = Phase::Final;
            s.distance = Some(d);
            s.velocity = Some(140.0);
            s
        };
        engine.apply_snapshot(vec![mk("a", 5.2), mk("b", 1.1), mk("c", 3.4)], 1);
        let board = engine.render(1).arrivals;
        let order: Vec<&str> = board.entries.iter().map(|e| e.icao24.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert!(board.runway_occupied);
    }

    #[test]
    fn test_render_exit_line_for_short_final_heavy() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.87, 0.21);
        s.phase = Phase::Final;
        s.distance = Some(1.2);
        s.wake_category = WakeCategory::Heavy;
        engine.apply_snapshot(vec![s], 1);
        let overlay = engine.render(1);
        assert!(overlay.aircraft[0].exit_line.is_some());
    }

    #[test]
    fn test_airport_switch_resets_state() {
        let mut engine = Engine::new("EGSS");
        let mut s = snap("aaa111", 51.8, 0.2);
        s.phase = Phase::Final;
        s.velocity = Some(180.0);
        engine.apply_snapshot(vec![s], 1);
        assert!(!engine.feed().is_empty());

        engine.set_airport("KLAX");
        assert_eq!(engine.airport().code, "KLAX");
        assert!(engine.states().is_empty());
        assert!(engine.feed().is_empty());
        assert!(engine.render(2).emergency.is_none());
    }

    #[test]
    fn test_unknown_airport_falls_back_to_default() {
        let engine = Engine::new("ZZZZ");
        assert_eq!(engine.airport().code, "EGSS");
    }

    #[test]
    fn test_states_preserve_wire_order() {
        let mut engine = Engine::new("EGSS");
        engine.apply_snapshot(
            vec![snap("ccc", 1.0, 1.0), snap("aaa", 2.0, 2.0), snap("bbb", 3.0, 3.0)],
            1,
        );
        let ids: Vec<String> = engine.states().into_iter().map(|s| s.icao24).collect();
        assert_eq!(ids, vec!["ccc", "aaa", "bbb"]);
    }

    #[test]
    fn test_distance_backfilled_from_field_center() {
        let mut engine = Engine::new("EGSS");
        // ~0.1 deg north of the EGSS center, no distance reported
        engine.apply_snapshot(vec![snap("aaa111", 51.985, 0.235)], 1);
        let d = engine.states()[0].distance.unwrap();
        assert!((d - 6.0).abs() < 0.2, "expected ~6 nm, got {d}");

        // A reported distance is left alone
        let mut s = snap("bbb222", 51.985, 0.235);
        s.distance = Some(12.5);
        engine.apply_snapshot(vec![s], 3);
        assert_eq!(engine.states()[0].distance, Some(12.5));
    }

    #[test]
    fn test_icon_color_bands() {
        assert_eq!(icon_color(None), "#ff9800");
        assert_eq!(icon_color(Some(0.0)), "#ff9800");
        assert_eq!(icon_color(Some(500.0)), "#ffeb3b");
        assert_eq!(icon_color(Some(3000.0)), "#4caf50");
        assert_eq!(icon_color(Some(10000.0)), "#03a9f4");
        assert_eq!(icon_color(Some(35000.0)), "#9c27b0");
    }
}
