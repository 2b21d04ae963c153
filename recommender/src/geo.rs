//! Great-circle distance.

use thiserror::Error;

use crate::model::GeoPoint;

/// Mean Earth radius (IUGG), meters.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Rejected coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("coordinate is not a finite number: ({latitude}, {longitude})")]
    NonFinite { latitude: f64, longitude: f64 },

    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Validates a point for distance computations.
pub fn validate(point: &GeoPoint) -> Result<(), GeoError> {
    if !point.latitude.is_finite() || !point.longitude.is_finite() {
        return Err(GeoError::NonFinite {
            latitude: point.latitude,
            longitude: point.longitude,
        });
    }
    if !(-90.0..=90.0).contains(&point.latitude) {
        return Err(GeoError::LatitudeOutOfRange(point.latitude));
    }
    if !(-180.0..=180.0).contains(&point.longitude) {
        return Err(GeoError::LongitudeOutOfRange(point.longitude));
    }
    Ok(())
}

/// Haversine distance between `a` and `b` in meters.
///
/// # Errors
/// [`GeoError`] when either point is not a valid coordinate.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> Result<f64, GeoError> {
    validate(a)?;
    validate(b)?;

    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` marginally above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    Ok(EARTH_MEAN_RADIUS_M * c)
}

/// Converts meters to kilometers rounded to 2 decimals.
pub fn meters_to_km(meters: f64) -> f64 {
    (meters / 1000.0 * 100.0).round() / 100.0
}

/// Convenience: distance in kilometers (2 decimals).
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> Result<f64, GeoError> {
    haversine_distance(a, b).map(meters_to_km)
}
