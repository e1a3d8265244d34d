//! Per-tick operator alert rules.
//!
//! Stateless: evaluated once per full snapshot set (the emergency rule needs
//! the whole set). The output is the raw per-tick text batch; deduplication
//! against history is the command feed's job.

use serde::Serialize;

use crate::types::{AircraftSnapshot, Phase, WakeCategory};

/// Speed on final above this draws a slow-down call (kt).
pub const FAST_FINAL_KTS: f64 = 160.0;

/// Emergency squawk lookup.
pub fn emergency_squawk(squawk: &str) -> Option<&'static str> {
    match squawk {
        "7500" => Some("Hijack"),
        "7600" => Some("Radio failure"),
        "7700" => Some("Emergency"),
        _ => None,
    }
}

/// Banner-level emergency, distinct from the list alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyBanner {
    pub label: String,
    pub squawk: String,
    pub meaning: &'static str,
}

/// The alerts produced by one snapshot tick.
#[derive(Debug, Clone, Default)]
pub struct AlertBatch {
    pub texts: Vec<String>,
    pub emergency: Option<EmergencyBanner>,
}

/// Evaluate all rules against the current snapshot set.
///
/// At most one emergency is surfaced even if several aircraft qualify;
/// the first match in snapshot order wins.
pub fn evaluate(snapshots: &[&AircraftSnapshot]) -> AlertBatch {
    let mut batch = AlertBatch::default();

    for snap in snapshots {
        if snap.phase == Phase::Final && snap.velocity.unwrap_or(0.0) > FAST_FINAL_KTS {
            batch
                .texts
                .push(format!("SLOW DOWN {} (Fast on Final)", snap.label()));
        }
        if snap.wake_category == WakeCategory::Heavy && snap.phase == Phase::Final {
            batch
                .texts
                .push(format!("CAUTION WAKE {} (Heavy)", snap.label()));
        }
        if batch.emergency.is_none() {
            if let Some(meaning) = snap.squawk.as_deref().and_then(emergency_squawk) {
                batch.emergency = Some(EmergencyBanner {
                    label: snap.label().to_string(),
                    squawk: snap.squawk.clone().unwrap_or_default(),
                    meaning,
                });
            }
        }
    }

    batch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(icao: &str) -> AircraftSnapshot {
        AircraftSnapshot {
            icao24: icao.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_emergency_squawk_table() {
        assert_eq!(emergency_squawk("7500"), Some("Hijack"));
        assert_eq!(emergency_squawk("7600"), Some("Radio failure"));
        assert_eq!(emergency_squawk("7700"), Some("Emergency"));
        assert_eq!(emergency_squawk("1200"), None);
    }

    #[test]
    fn test_fast_on_final() {
        let mut a = snap("aaa111");
        a.phase = Phase::Final;
        a.velocity = Some(175.0);
        a.callsign = Some("BAW123".into());
        let batch = evaluate(&[&a]);
        assert_eq!(batch.texts, vec!["SLOW DOWN BAW123 (Fast on Final)"]);
    }

    #[test]
    fn test_fast_needs_final_phase() {
        let mut a = snap("aaa111");
        a.phase = Phase::Approach;
        a.velocity = Some(250.0);
        assert!(evaluate(&[&a]).texts.is_empty());
    }

    #[test]
    fn test_missing_speed_is_not_fast() {
        let mut a = snap("aaa111");
        a.phase = Phase::Final;
        a.velocity = None;
        assert!(evaluate(&[&a]).texts.is_empty());
    }

    #[test]
    fn test_heavy_wake_caution() {
        let mut a = snap("aaa111");
        a.phase = Phase::Final;
        a.wake_category = WakeCategory::Heavy;
        let batch = evaluate(&[&a]);
        assert_eq!(batch.texts, vec!["CAUTION WAKE aaa111 (Heavy)"]);
    }

    #[test]
    fn test_both_rules_fire_independently() {
        let mut a = snap("aaa111");
        a.phase = Phase::Final;
        a.velocity = Some(180.0);
        a.wake_category = WakeCategory::Heavy;
        assert_eq!(evaluate(&[&a]).texts.len(), 2);
    }

    #[test]
    fn test_single_emergency_banner() {
        let mut a = snap("aaa111");
        a.squawk = Some("7500".into());
        let mut b = snap("bbb222");
        b.squawk = Some("7700".into());
        let batch = evaluate(&[&a, &b]);
        let banner = batch.emergency.unwrap();
        // First match in snapshot order wins
        assert_eq!(banner.label, "aaa111");
        assert_eq!(banner.meaning, "Hijack");
    }

    #[test]
    fn test_no_emergency_on_normal_squawk() {
        let mut a = snap("aaa111");
        a.squawk = Some("1200".into());
        assert!(evaluate(&[&a]).emergency.is_none());
    }
}
