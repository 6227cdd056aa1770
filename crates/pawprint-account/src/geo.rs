//! Great-circle distance and nearest-city ranking

use crate::cities::City;
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How many cities a suggestion list holds
pub const SUGGESTION_COUNT: usize = 6;

/// A position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both parts finite and inside their degree ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<&City> for Coordinate {
    fn from(city: &City) -> Self {
        Self::new(city.lat, city.lon)
    }
}

/// Haversine distance in kilometres
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// The `count` cities closest to `query`, nearest first, each with its
/// distance. Equal distances keep list order.
pub fn nearest_cities<'a>(query: Coordinate, cities: &'a [City], count: usize) -> Vec<(&'a City, f64)> {
    let mut ranked: Vec<(&City, f64)> = cities
        .iter()
        .map(|city| (city, haversine_km(query, city.into())))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(count);
    ranked
}

/// Suggestions when no position is known: the head of the list
pub fn fallback_cities(cities: &[City], count: usize) -> &[City] {
    &cities[..count.min(cities.len())]
}
