//! Great-circle distances on a spherical earth.

use crate::entities::Coordinate;

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const KM_TO_MILES: f64 = 0.621371;
pub const KM_TO_NAUTICAL_MILES: f64 = 0.539957;
pub const MILES_TO_KM: f64 = 1.609344;
pub const NAUTICAL_MILES_TO_KM: f64 = 1.852;

/// Haversine distance between `a` and `b` in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    // rounding can push h marginally outside [0, 1] for antipodal points
    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    km_to_miles(distance_km(a, b))
}

pub fn distance_nautical_miles(a: Coordinate, b: Coordinate) -> f64 {
    km_to_nautical_miles(distance_km(a, b))
}

pub fn km_to_miles(km: f64) -> f64 {
    km * KM_TO_MILES
}

pub fn km_to_nautical_miles(km: f64) -> f64 {
    km * KM_TO_NAUTICAL_MILES
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * MILES_TO_KM
}

pub fn nautical_miles_to_km(nautical_miles: f64) -> f64 {
    nautical_miles * NAUTICAL_MILES_TO_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(40.7128, -74.0060)]
    #[case(-33.8688, 151.2093)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    fn test_that_distance_to_self_is_zero(#[case] latitude: f64, #[case] longitude: f64) {
        let point = coordinate(latitude, longitude);
        assert_eq!(distance_km(point, point), 0.0);
    }

    #[rstest]
    #[case((40.7128, -74.0060), (34.0522, -118.2437))]
    #[case((51.5074, -0.1278), (48.8566, 2.3522))]
    #[case((-33.8688, 151.2093), (35.6762, 139.6503))]
    #[case((6.5244, 3.3792), (-1.2921, 36.8219))]
    fn test_that_distance_is_symmetric(#[case] a: (f64, f64), #[case] b: (f64, f64)) {
        let a = coordinate(a.0, a.1);
        let b = coordinate(b.0, b.1);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[rstest]
    #[case((0.0, 0.0), (0.0, 180.0))]
    #[case((90.0, 0.0), (-90.0, 0.0))]
    #[case((45.0, 90.0), (-45.0, -90.0))]
    fn test_antipodal_points_are_half_the_circumference_apart(
        #[case] a: (f64, f64),
        #[case] b: (f64, f64),
    ) {
        let distance = distance_km(coordinate(a.0, a.1), coordinate(b.0, b.1));
        assert!((distance - 20015.1).abs() < 0.5, "distance was {distance}");
        assert!(distance.is_finite());
    }

    #[test]
    fn test_new_york_to_los_angeles() {
        let new_york = coordinate(40.7128, -74.0060);
        let los_angeles = coordinate(34.0522, -118.2437);
        let distance = distance_km(new_york, los_angeles);
        assert!((distance - 3935.9).abs() < 0.5, "distance was {distance}");
    }

    #[test]
    fn test_london_to_paris_in_other_units() {
        let london = coordinate(51.5074, -0.1278);
        let paris = coordinate(48.8566, 2.3522);
        let km = distance_km(london, paris);
        assert!((km - 343.56).abs() < 0.5, "distance was {km}");
        assert_eq!(distance_miles(london, paris), km * KM_TO_MILES);
        assert_eq!(distance_nautical_miles(london, paris), km * KM_TO_NAUTICAL_MILES);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(42.195)]
    #[case(3935.9)]
    #[case(20015.1)]
    fn test_unit_round_trips(#[case] value: f64) {
        assert!((km_to_miles(miles_to_km(value)) - value).abs() < 1e-3 * value.max(1.0));
        assert!(
            (km_to_nautical_miles(nautical_miles_to_km(value)) - value).abs()
                < 1e-3 * value.max(1.0)
        );
    }

    #[test]
    fn test_conversions_use_fixed_ratios() {
        assert_eq!(km_to_miles(1.0), 0.621371);
        assert_eq!(miles_to_km(1.0), 1.609344);
        assert_eq!(nautical_miles_to_km(1.0), 1.852);
        assert_eq!(km_to_nautical_miles(1.0), 0.539957);
    }
}
