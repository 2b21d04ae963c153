//! Query-string coordinate parsing shared by the GET routes.

use recommender::GeoPoint;

use crate::error_handler::AppError;

/// Parses an optional coordinate; blank counts as absent.
pub fn parse_coordinate(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::invalid_field(field, format!("{field} must be a number"))),
    }
}

/// Optional user location; a single coordinate means no location.
pub fn optional_location(lat: Option<&str>, lng: Option<&str>) -> Result<Option<GeoPoint>, AppError> {
    let lat = parse_coordinate("lat", lat)?;
    let lng = parse_coordinate("lng", lng)?;
    Ok(GeoPoint::from_parts(lat, lng))
}

/// Mandatory finite user location.
pub fn required_location(lat: Option<&str>, lng: Option<&str>) -> Result<GeoPoint, AppError> {
    let lat = parse_coordinate("lat", lat)?
        .ok_or_else(|| AppError::invalid_field("lat", "lat is required"))?;
    let lng = parse_coordinate("lng", lng)?
        .ok_or_else(|| AppError::invalid_field("lng", "lng is required"))?;
    if !lat.is_finite() {
        return Err(AppError::invalid_field("lat", "lat must be a finite number"));
    }
    if !lng.is_finite() {
        return Err(AppError::invalid_field("lng", "lng must be a finite number"));
    }
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_absent_and_garbage_is_rejected() {
        assert_eq!(parse_coordinate("lat", None).unwrap(), None);
        assert_eq!(parse_coordinate("lat", Some(" ")).unwrap(), None);
        assert_eq!(parse_coordinate("lat", Some("12.5")).unwrap(), Some(12.5));
        assert!(parse_coordinate("lat", Some("north")).is_err());
    }

    #[test]
    fn half_location_is_none() {
        assert_eq!(optional_location(Some("1.0"), None).unwrap(), None);
        assert_eq!(
            optional_location(Some("1.0"), Some("2.0")).unwrap(),
            Some(GeoPoint::new(1.0, 2.0))
        );
    }

    #[test]
    fn required_location_rules() {
        assert!(required_location(None, Some("1")).is_err());
        assert!(required_location(Some("1"), Some("")).is_err());
        assert!(required_location(Some("NaN"), Some("1")).is_err());
        assert!(required_location(Some("1"), Some("inf")).is_err());
        assert_eq!(
            required_location(Some("0"), Some("0")).unwrap(),
            GeoPoint::new(0.0, 0.0)
        );
    }
}
