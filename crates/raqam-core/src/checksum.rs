//! Check digit computation for national IDs
//!
//! Luhn variant over the first 13 digits: alternating weights 2,1,2,1,...
//! applied right-to-left, two-digit products reduced by digit sum.

use crate::{Error, Result};

/// Compute the check digit for a 13-digit ID prefix
///
/// The rightmost digit gets weight 2, the next weight 1, alternating
/// leftward. Products above 9 are replaced by the sum of their digits
/// (product - 9 for products in 10..=18). The check digit brings the
/// weighted total up to the next multiple of 10.
pub fn check_digit(digits13: &str) -> Result<u8> {
    if digits13.len() != 13 {
        return Err(Error::InvalidLength(digits13.len()));
    }
    if !digits13.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::NonDigit(digits13.to_string()));
    }

    let total: u32 = digits13
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            let product = if i % 2 == 0 { d * 2 } else { d };
            if product > 9 { product - 9 } else { product }
        })
        .sum();

    Ok(((10 - total % 10) % 10) as u8)
}

/// Check a full 14-digit ID's final digit against the first 13
pub fn verify(digits14: &str) -> Result<()> {
    if digits14.len() != 14 {
        return Err(Error::InvalidLength(digits14.len()));
    }
    if !digits14.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::NonDigit(digits14.to_string()));
    }
    let expected = check_digit(&digits14[..13])?;
    let found = digits14.as_bytes()[13] - b'0';
    if found != expected {
        return Err(Error::ChecksumMismatch { expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_digits() {
        assert_eq!(check_digit("2901012010001").unwrap(), 7);
        assert_eq!(check_digit("3050214211234").unwrap(), 0);
        assert_eq!(check_digit("2990101880013").unwrap(), 2);
        assert_eq!(check_digit("3000101880013").unwrap(), 8);
    }

    #[test]
    fn test_total_multiple_of_ten_yields_zero() {
        // Weighted total of this prefix is a multiple of 10; the check
        // digit must be 0, never 10.
        assert_eq!(check_digit("2000101010019").unwrap(), 0);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            check_digit("12345"),
            Err(Error::InvalidLength(5))
        ));
        assert!(matches!(
            check_digit("29010120100017"),
            Err(Error::InvalidLength(14))
        ));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(matches!(
            check_digit("29010120000A1"),
            Err(Error::NonDigit(_))
        ));
    }

    #[test]
    fn test_verify() {
        assert!(verify("29010120100017").is_ok());
        assert!(matches!(
            verify("29010120100013"),
            Err(Error::ChecksumMismatch {
                expected: 7,
                found: 3
            })
        ));
    }
}
