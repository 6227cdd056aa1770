//! Bundled city list
//!
//! Order matters: the fallback suggestions are the first entries as listed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    /// ISO 3166 alpha-2 code
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    /// Text stored as the account location, e.g. `"Sofia, BG"`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

const fn city(name: &'static str, country: &'static str, lat: f64, lon: f64) -> City {
    City {
        name,
        country,
        lat,
        lon,
    }
}

pub const CITIES: [City; 15] = [
    city("Sofia", "BG", 42.6977, 23.3219),
    city("Plovdiv", "BG", 42.1354, 24.7453),
    city("Varna", "BG", 43.2141, 27.9147),
    city("Burgas", "BG", 42.5048, 27.4626),
    city("London", "GB", 51.5074, -0.1278),
    city("New York", "US", 40.7128, -74.0060),
    city("San Francisco", "US", 37.7749, -122.4194),
    city("Berlin", "DE", 52.52, 13.4050),
    city("Madrid", "ES", 40.4168, -3.7038),
    city("Rome", "IT", 41.9028, 12.4964),
    city("Paris", "FR", 48.8566, 2.3522),
    city("Istanbul", "TR", 41.0082, 28.9784),
    city("Moscow", "RU", 55.7558, 37.6173),
    city("Tokyo", "JP", 35.6762, 139.6503),
    city("Sydney", "AU", -33.8688, 151.2093),
];
