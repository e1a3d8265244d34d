//! atc-core: Pure derived-state engine for single-airport traffic overlays.
//!
//! No async, no I/O — just the temporal reasoning: trails, heading
//! resolution, runway occupancy, arrival sequencing, alerts, and the
//! operator command feed. This crate is the shared core used by
//! `atc-server`, which owns polling, clocks, and the REST surface.

pub mod airports;
pub mod alerts;
pub mod arrivals;
pub mod engine;
pub mod exit;
pub mod feed;
pub mod geo;
pub mod heading;
pub mod occupancy;
pub mod trail;
pub mod types;

// Re-export commonly used types at crate root
pub use engine::{AircraftRecord, AircraftView, Engine, Overlay};
pub use feed::{AckState, CommandEntry, CommandFeed};
pub use types::*;
