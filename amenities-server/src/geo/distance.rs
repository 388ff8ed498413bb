//! Great-circle distance.

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }

    #[test]
    fn zero_for_same_point() {
        let p = at(22.57, 88.36);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let d = haversine_km(&at(0.0, 0.0), &at(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn known_city_pair() {
        // Kolkata to Howrah station, roughly 4 km
        let d = haversine_km(&at(22.5726, 88.3639), &at(22.5839, 88.3424));
        assert!((2.0..3.0).contains(&d), "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = at(22.57, 88.36);
        let b = at(22.60, 88.40);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-12);
    }
}
