//! Built-in airport table.
//!
//! Covers the airports the overlay can monitor. Runway endpoints are
//! approximate (good enough for exit-line rendering); only EGSS carries
//! surveyed geometry.

use crate::types::WakeCategory;

/// A supported airport.
#[derive(Debug, Clone)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub radius_nm: u32,
    /// Runway endpoints, approach end first.
    pub runway: [(f64, f64); 2],
}

/// Airport used when an unknown code is requested.
pub const DEFAULT_AIRPORT: &str = "EGSS";

pub const AIRPORTS: &[Airport] = &[
    Airport {
        code: "EGSS",
        name: "London Stansted",
        country: "United Kingdom",
        lat: 51.885,
        lon: 0.235,
        radius_nm: 25,
        runway: [(51.875, 0.22), (51.895, 0.25)],
    },
    Airport {
        code: "KLAX",
        name: "Los Angeles Intl",
        country: "United States",
        lat: 33.942,
        lon: -118.407,
        radius_nm: 25,
        runway: [(33.932, -118.422), (33.952, -118.392)],
    },
    Airport {
        code: "EGLL",
        name: "London Heathrow",
        country: "United Kingdom",
        lat: 51.470,
        lon: -0.454,
        radius_nm: 25,
        runway: [(51.460, -0.469), (51.480, -0.439)],
    },
    Airport {
        code: "KJFK",
        name: "John F. Kennedy",
        country: "United States",
        lat: 40.641,
        lon: -73.778,
        radius_nm: 25,
        runway: [(40.631, -73.793), (40.651, -73.763)],
    },
    Airport {
        code: "OMDB",
        name: "Dubai International",
        country: "United Arab Emirates",
        lat: 25.253,
        lon: 55.365,
        radius_nm: 25,
        runway: [(25.243, 55.350), (25.263, 55.380)],
    },
    Airport {
        code: "RJTT",
        name: "Tokyo Haneda",
        country: "Japan",
        lat: 35.549,
        lon: 139.779,
        radius_nm: 25,
        runway: [(35.539, 139.764), (35.559, 139.794)],
    },
    Airport {
        code: "LFPG",
        name: "Paris Charles de Gaulle",
        country: "France",
        lat: 49.009,
        lon: 2.556,
        radius_nm: 25,
        runway: [(48.999, 2.541), (49.019, 2.571)],
    },
    Airport {
        code: "EHAM",
        name: "Amsterdam Schiphol",
        country: "Netherlands",
        lat: 52.310,
        lon: 4.768,
        radius_nm: 25,
        runway: [(52.300, 4.753), (52.320, 4.783)],
    },
    Airport {
        code: "EDDF",
        name: "Frankfurt",
        country: "Germany",
        lat: 50.037,
        lon: 8.562,
        radius_nm: 25,
        runway: [(50.027, 8.547), (50.047, 8.577)],
    },
    Airport {
        code: "WSSS",
        name: "Singapore Changi",
        country: "Singapore",
        lat: 1.364,
        lon: 103.991,
        radius_nm: 25,
        runway: [(1.354, 103.976), (1.374, 104.006)],
    },
];

impl Airport {
    /// Runway-exit target for a landing aircraft.
    ///
    /// Heavies roll long and take the far-end exit; everything else is
    /// pointed at the rapid-exit two thirds down the runway.
    pub fn exit_point(&self, wake: WakeCategory) -> (f64, f64) {
        let (a, b) = (self.runway[0], self.runway[1]);
        if wake == WakeCategory::Heavy {
            b
        } else {
            (a.0 + 0.67 * (b.0 - a.0), a.1 + 0.67 * (b.1 - a.1))
        }
    }
}

/// Look up an airport by ICAO code (case-insensitive).
pub fn find(code: &str) -> Option<&'static Airport> {
    AIRPORTS
        .iter()
        .find(|a| a.code.eq_ignore_ascii_case(code.trim()))
}

/// Look up an airport, falling back to the default for unknown codes.
pub fn find_or_default(code: &str) -> &'static Airport {
    find(code).unwrap_or_else(|| {
        find(DEFAULT_AIRPORT).expect("default airport must exist")
    })
}

/// Substring search across name, code, and country.
pub fn search(term: &str) -> Vec<&'static Airport> {
    let term = term.trim().to_ascii_lowercase();
    AIRPORTS
        .iter()
        .filter(|a| {
            term.is_empty()
                || a.name.to_ascii_lowercase().contains(&term)
                || a.code.to_ascii_lowercase().contains(&term)
                || a.country.to_ascii_lowercase().contains(&term)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
