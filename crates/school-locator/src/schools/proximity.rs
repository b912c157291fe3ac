use super::domain::{Coordinate, RankedSchool, School};

/// Mean Earth radius used as the haversine scale, in kilometers.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push the term just past 1 for antipodal pairs
    let half_chord = half_chord.clamp(0.0, 1.0);

    let central_angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_MEAN_RADIUS_KM * central_angle
}

/// Attach a distance to every school and order them nearest first.
///
/// Uses a stable sort, so schools at equal distance keep their input order.
pub fn rank_by_proximity(origin: Coordinate, schools: Vec<School>) -> Vec<RankedSchool> {
    let mut ranked: Vec<RankedSchool> = schools
        .into_iter()
        .map(|school| {
            let distance = haversine_km(origin, school.coordinate());
            RankedSchool { school, distance }
        })
        .collect();

    ranked.sort_by(|left, right| left.distance.total_cmp(&right.distance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schools::domain::SchoolId;
    use std::f64::consts::PI;

    fn school(id: u64, latitude: f64, longitude: f64) -> School {
        School {
            id: SchoolId(id),
            name: format!("School {id}"),
            address: format!("{id} Main Street"),
            latitude,
            longitude,
        }
    }

    fn approx(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        for point in [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(41.5868, -93.625),
            Coordinate::new(-90.0, 180.0),
            Coordinate::new(89.9999, -179.9999),
        ] {
            let distance = haversine_km(point, point);
            assert_eq!(distance, 0.0, "self distance for {point:?}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (Coordinate::new(41.5868, -93.625), Coordinate::new(40.7128, -74.006)),
            (Coordinate::new(-33.8688, 151.2093), Coordinate::new(51.5074, -0.1278)),
            (Coordinate::new(0.0, 179.5), Coordinate::new(0.0, -179.5)),
        ];

        for (a, b) in pairs {
            approx(haversine_km(a, b), haversine_km(b, a), 1e-9);
        }
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        approx(distance, 111.195, 0.01);
    }

    #[test]
    fn antipodal_points_are_half_a_circumference_apart() {
        let cases = [
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0)),
            (Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0)),
            (Coordinate::new(45.0, 30.0), Coordinate::new(-45.0, -150.0)),
        ];

        for (a, b) in cases {
            let distance = haversine_km(a, b);
            assert!(!distance.is_nan());
            approx(distance, PI * EARTH_MEAN_RADIUS_KM, 0.01);
        }
    }

    #[test]
    fn ranks_equatorial_example_nearest_first() {
        let schools = vec![school(2, 0.0, 1.0), school(3, 0.0, -2.0), school(1, 0.0, 0.0)];

        let ranked = rank_by_proximity(Coordinate::new(0.0, 0.0), schools);

        let ids: Vec<u64> = ranked.iter().map(|entry| entry.school.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ranked[0].distance, 0.0);
        approx(ranked[1].distance, 111.195, 0.01);
        approx(ranked[2].distance, 222.39, 0.02);
    }

    #[test]
    fn orders_points_along_a_meridian() {
        let origin = Coordinate::new(10.0, 20.0);
        let schools = vec![
            school(1, 40.0, 20.0),
            school(2, 12.0, 20.0),
            school(3, -5.0, 20.0),
            school(4, 25.0, 20.0),
        ];

        let ranked = rank_by_proximity(origin, schools);
        let ids: Vec<u64> = ranked.iter().map(|entry| entry.school.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let schools = vec![
            school(7, 0.0, 1.0),
            school(3, 0.0, -1.0),
            school(5, 1.0, 0.0),
            school(1, 0.0, 0.0),
            school(9, 0.0, 0.0),
        ];

        let first = rank_by_proximity(origin, schools.clone());
        let second = rank_by_proximity(origin, schools);

        let ids: Vec<u64> = first.iter().map(|entry| entry.school.id.0).collect();
        assert_eq!(&ids[..2], &[1, 9]);
        assert_eq!(first, second);
    }

    #[test]
    fn every_school_is_returned_once() {
        assert!(rank_by_proximity(Coordinate::new(0.0, 0.0), Vec::new()).is_empty());

        let schools: Vec<School> = (1..=25)
            .map(|id| school(id, (id as f64) * 3.0 - 40.0, (id as f64) * 7.0 - 90.0))
            .collect();
        let ranked = rank_by_proximity(Coordinate::new(5.0, 5.0), schools);

        assert_eq!(ranked.len(), 25);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
    }
}
