//! Tests for basis construction and gap notation

#[cfg(test)]
mod tests {
    use crate::io::error::DotSpaceError;
    use crate::pattern::basis::Basis;

    #[test]
    fn test_from_bits_keeps_values_in_order() {
        let basis = Basis::from_bits(&[1, 0, 0]).unwrap();
        assert_eq!(basis.values(), &[1, 0, 0]);
        assert_eq!(basis.len(), 3);
        assert!(!basis.is_empty());
        assert_eq!(basis.to_string(), "100");
    }

    #[test]
    fn test_from_bits_rejects_empty_and_non_binary() {
        assert!(matches!(
            Basis::from_bits(&[]),
            Err(DotSpaceError::InvalidBasis { .. })
        ));
        assert!(matches!(
            Basis::from_bits(&[1, 2, 0]),
            Err(DotSpaceError::InvalidBasis { .. })
        ));
    }

    // Tests each gap digit becomes a dot followed by gap - 1 spaces
    // Verified by dropping the trailing spaces
    #[test]
    fn test_from_gaps_expands_digits() {
        let basis = Basis::from_gaps("31").unwrap();
        assert_eq!(basis.values(), &[1, 0, 0, 1]);

        let spaced = Basis::from_gaps(" 2 1 ").unwrap();
        assert_eq!(spaced.values(), &[1, 0, 1]);

        let single = Basis::from_gaps("1").unwrap();
        assert_eq!(single.values(), &[1]);
    }

    #[test]
    fn test_from_gaps_rejects_zero_letters_and_blank() {
        assert!(Basis::from_gaps("201").is_err());
        assert!(Basis::from_gaps("2a").is_err());
        assert!(Basis::from_gaps("   ").is_err());
    }

    #[test]
    fn test_at_wraps_around_period() {
        let basis = Basis::from_bits(&[1, 0, 0]).unwrap();
        assert_eq!(basis.first(), 1);
        assert_eq!(basis.at(1), 0);
        assert_eq!(basis.at(3), 1);
        assert_eq!(basis.at(5), 0);
    }
}
