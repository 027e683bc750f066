mod tests {
    use approx::assert_relative_eq;

    use crate::length::{EARTH_RADIUS_M, Length};

    #[test]
    fn test_length_conversions() {
        let toa = Length::from_km(100.0);
        assert_relative_eq!(toa.to_m(), 1e5);

        let grain = Length::from_microns(0.5);
        assert_relative_eq!(grain.to_m(), 5e-7);
        assert_relative_eq!(grain.to_microns(), 0.5);

        // Test round trip
        let original = 6471.0;
        let round_trip = Length::from_m(Length::from_km(original).to_m()).to_km();
        assert_relative_eq!(round_trip, original);
    }

    #[test]
    fn test_earth_radii() {
        assert_relative_eq!(Length::from_earth_radii(1.0).to_m(), EARTH_RADIUS_M);
        assert_relative_eq!(Length::from_km(6371.0).to_earth_radii(), 1.0);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let length1 = Length::from_m(5.0);
        let length2 = Length::from_m(3.0);

        assert_relative_eq!((length1 + length2).to_m(), 8.0);
        assert_relative_eq!((length1 - length2).to_m(), 2.0);
        assert_relative_eq!((length1 * 2.0).to_m(), 10.0);
        assert_relative_eq!((length1 / 2.0).to_m(), 2.5);
        assert_relative_eq!((1.5 * length1).to_m(), 7.5);

        // Ratio is dimensionless
        assert_relative_eq!(length1 / length2, 5.0 / 3.0);
    }

    #[test]
    fn test_cubed() {
        assert_relative_eq!(Length::from_microns(10.0).cubed(), 1e-15, epsilon = 1e-27);
    }
}
