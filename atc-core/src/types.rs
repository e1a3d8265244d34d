//! Shared types, error enum, and the snapshot wire model for atc-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors produced by atc-core.
#[derive(Debug, Error)]
pub enum AtcError {
    #[error("unknown command id: {0}")]
    UnknownCommand(u64),
    #[error("unknown airport code: {0}")]
    UnknownAirport(String),
    #[error("malformed snapshot entry: {0}")]
    MalformedSnapshot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AtcError>;

// ---------------------------------------------------------------------------
// Phase and wake classification (supplied by the upstream feed)
// ---------------------------------------------------------------------------

/// Flight phase, computed upstream of the engine. The engine never
/// classifies; it only consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Unknown,
    OnBlock,
    Pushback,
    TaxiOut,
    LineUp,
    TakeOff,
    Climb,
    Cruise,
    Descent,
    Approach,
    Final,
    Landing,
    TaxiIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WakeCategory {
    Light,
    Medium,
    Heavy,
    Super,
    #[default]
    Unknown,
}

// ---------------------------------------------------------------------------
// Snapshot wire model
// ---------------------------------------------------------------------------

/// One aircraft's reported state at a point in time.
///
/// Field names are the wire contract and must round-trip unchanged.
/// Missing numeric fields stay `None` — consumers apply documented
/// fallbacks, never implicit zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftSnapshot {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: i64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    pub position_source: i32,
    // Augmented upstream
    pub phase: Phase,
    pub wake_category: WakeCategory,
    pub category: Option<String>,
    pub ground_state: Option<String>,
    pub atc_message: Option<String>,
    pub eta: Option<i64>,
    pub distance: Option<f64>,
    pub advisory: Option<String>,
}

impl Default for AircraftSnapshot {
    fn default() -> Self {
        AircraftSnapshot {
            icao24: String::new(),
            callsign: None,
            origin_country: String::new(),
            time_position: None,
            last_contact: 0,
            longitude: None,
            latitude: None,
            baro_altitude: None,
            on_ground: false,
            velocity: None,
            true_track: None,
            vertical_rate: None,
            geo_altitude: None,
            squawk: None,
            spi: false,
            position_source: 0,
            phase: Phase::Unknown,
            wake_category: WakeCategory::Unknown,
            category: None,
            ground_state: None,
            atc_message: None,
            eta: None,
            distance: None,
            advisory: None,
        }
    }
}

impl AircraftSnapshot {
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Display name: callsign when present and non-empty, else the address.
    pub fn label(&self) -> &str {
        match self.callsign.as_deref() {
            Some(cs) if !cs.trim().is_empty() => cs,
            _ => &self.icao24,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
