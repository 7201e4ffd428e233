//! Unit tests for tp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, StateId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = VertexId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VertexId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VertexId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(StateId::default(), StateId::INVALID);
        assert!(!EdgeId::default().is_valid());
        assert!(EdgeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(EdgeId(7).to_string(), "EdgeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(39.96, -83.0);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        assert!((o.bearing_deg(GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-6);
        assert!((o.bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-6);
        assert!((o.bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-6);
        assert!((o.bearing_deg(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(45.0, 170.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}

#[cfg(test)]
mod modes {
    use crate::{TraverseMode, TraverseModeSet};

    #[test]
    fn parse_aliases() {
        assert_eq!("foot".parse::<TraverseMode>().unwrap(), TraverseMode::Walk);
        assert_eq!("Bike".parse::<TraverseMode>().unwrap(), TraverseMode::Bicycle);
        assert_eq!("CAR".parse::<TraverseMode>().unwrap(), TraverseMode::Car);
        assert!("tram".parse::<TraverseMode>().is_err());
    }

    #[test]
    fn set_membership() {
        let set = TraverseModeSet::of(TraverseMode::Car).with(TraverseMode::Walk);
        assert!(set.contains(TraverseMode::Car));
        assert!(set.contains(TraverseMode::Walk));
        assert!(!set.contains(TraverseMode::Bicycle));
        assert_eq!(set.iter().collect::<Vec<_>>(), [TraverseMode::Walk, TraverseMode::Car]);
        assert_eq!(set.to_string(), "{walk,car}");
    }

    #[test]
    fn parse_set() {
        let set: TraverseModeSet = "walk|bicycle".parse().unwrap();
        assert_eq!(set, TraverseModeSet::of(TraverseMode::Walk).with(TraverseMode::Bicycle));
        assert!("".parse::<TraverseModeSet>().unwrap().is_empty());
        assert!("car,boat".parse::<TraverseModeSet>().is_err());
    }
}

#[cfg(test)]
mod permissions {
    use crate::{StreetTraversalPermission as P, TraverseMode, TraverseModeSet};

    #[test]
    fn allows_matches_bits() {
        assert!(P::ALL.allows(TraverseMode::Car));
        assert!(P::PEDESTRIAN_AND_BICYCLE.allows(TraverseMode::Bicycle));
        assert!(!P::PEDESTRIAN_AND_BICYCLE.allows(TraverseMode::Car));
        assert!(!P::NONE.allows(TraverseMode::Walk));
    }

    #[test]
    fn remove_is_subtraction() {
        assert_eq!(P::ALL.remove(P::CAR), P::PEDESTRIAN_AND_BICYCLE);
        assert_eq!(P::CAR.remove(P::CAR), P::NONE);
        assert_eq!(
            P::ALL.remove_modes(TraverseModeSet::of(TraverseMode::Walk)),
            P::BICYCLE_AND_CAR
        );
        // Removing a mode that is not present leaves the value unchanged.
        assert_eq!(P::PEDESTRIAN.remove(P::CAR), P::PEDESTRIAN);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for p in [P::NONE, P::PEDESTRIAN, P::BICYCLE_AND_CAR, P::ALL] {
            assert_eq!(p.as_str().parse::<P>().unwrap(), p);
        }
        assert!("EVERYTHING".parse::<P>().is_err());
    }

    #[test]
    fn modes_view() {
        assert_eq!(P::PEDESTRIAN_AND_CAR.modes().iter().count(), 2);
        assert_eq!(P::from(TraverseModeSet::ALL), P::ALL);
    }
}
