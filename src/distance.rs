// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Radius of Earth used by the heuristic, in kilometers.
const EARTH_RADIUS: f64 = 6371.0;

/// Diameter of Earth, in kilometers.
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    // Rounding (or out-of-range latitudes) may push h outside of [0, 1]
    EARTH_DIAMETER * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Calculates the squared euclidean distance between two positions,
/// treating latitude and longitude degrees as planar coordinates.
///
/// Only suitable for comparing distances at short range, e.g. for snapping
/// a clicked position to the nearest node. Never use it as a route cost estimate.
#[inline]
pub fn planar_distance_squared(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat1 - lat2;
    let dlon = lon1 - lon2;
    dlat * dlat + dlon * dlon
}
