//! National ID data model
//!
//! A 14-digit ID decomposes as C YYMMDD GG SSS D K:
//! century marker, birth date, governorate code, civil-registry serial,
//! gender digit, check digit. Validity is structural only: a well-formed
//! ID is not necessarily one the civil registry ever issued.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Governorate, Result, checksum};

/// Gender, encoded by the parity of the gender digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Odd digits are male, even digits are female
    pub fn from_digit(digit: u8) -> Gender {
        if digit % 2 == 1 {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// A structurally valid national ID
///
/// Constructed only through [`NationalId::parse`], so every instance
/// carries a verified check digit and a real calendar birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalId {
    id: String,
    birth_date: NaiveDate,
    governorate: Governorate,
    serial: String,
    gender_digit: u8,
    gender: Gender,
    check_digit: u8,
}

impl NationalId {
    /// Parse and validate a raw 14-digit string
    ///
    /// Checks, in order: length, digits only, century marker, calendar
    /// date, governorate code, check digit. The serial and gender digit
    /// are accepted as-is.
    pub fn parse(raw: &str) -> Result<NationalId> {
        if raw.len() != 14 {
            return Err(Error::InvalidLength(raw.len()));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::NonDigit(raw.to_string()));
        }

        let bytes = raw.as_bytes();
        let century = match bytes[0] {
            b'2' => 1900,
            b'3' => 2000,
            other => return Err(Error::InvalidCentury(other as char)),
        };

        let yy: i32 = raw[1..3].parse().unwrap_or(0);
        let mm: u32 = raw[3..5].parse().unwrap_or(0);
        let dd: u32 = raw[5..7].parse().unwrap_or(0);
        let birth_date = NaiveDate::from_ymd_opt(century + yy, mm, dd)
            .ok_or_else(|| Error::InvalidBirthDate(raw[1..7].to_string()))?;

        let governorate = Governorate::from_code(&raw[7..9])
            .ok_or_else(|| Error::UnknownGovernorate(raw[7..9].to_string()))?;

        let serial = raw[9..12].to_string();
        let gender_digit = bytes[12] - b'0';

        checksum::verify(raw)?;
        let check_digit = bytes[13] - b'0';

        Ok(NationalId {
            id: raw.to_string(),
            birth_date,
            governorate,
            serial,
            gender_digit,
            gender: Gender::from_digit(gender_digit),
            check_digit,
        })
    }

    /// The full 14-digit string
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Century marker digit: 2 for 1900-1999, 3 for 2000-2099
    pub fn century_marker(&self) -> u8 {
        if self.birth_date.year() < 2000 { 2 } else { 3 }
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn governorate(&self) -> Governorate {
        self.governorate
    }

    /// The 3-digit civil-registry serial (opaque, any digits)
    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn gender_digit(&self) -> u8 {
        self.gender_digit
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn check_digit(&self) -> u8 {
        self.check_digit
    }
}

impl std::str::FromStr for NationalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NationalId::parse(s)
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for NationalId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NationalId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Validate a raw string, discarding the failure reason
///
/// Convenience wrapper for callers that only need valid/invalid.
pub fn validate(raw: &str) -> Option<NationalId> {
    NationalId::parse(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decomposes_fields() {
        let id = NationalId::parse("29010120100017").unwrap();
        assert_eq!(id.as_str(), "29010120100017");
        assert_eq!(id.century_marker(), 2);
        assert_eq!(
            id.birth_date(),
            NaiveDate::from_ymd_opt(1990, 10, 12).unwrap()
        );
        assert_eq!(id.governorate(), Governorate::Cairo);
        assert_eq!(id.serial(), "000");
        assert_eq!(id.gender_digit(), 1);
        assert_eq!(id.gender(), Gender::Male);
        assert_eq!(id.check_digit(), 7);
    }

    #[test]
    fn test_parse_second_century() {
        let id = NationalId::parse("30502142112340").unwrap();
        assert_eq!(id.century_marker(), 3);
        assert_eq!(
            id.birth_date(),
            NaiveDate::from_ymd_opt(2005, 2, 14).unwrap()
        );
        assert_eq!(id.governorate(), Governorate::Giza);
        assert_eq!(id.serial(), "123");
        assert_eq!(id.gender(), Gender::Female);
    }

    #[test]
    fn test_rejects_bad_length_and_non_digits() {
        assert!(matches!(
            NationalId::parse("12345"),
            Err(Error::InvalidLength(5))
        ));
        assert!(matches!(
            NationalId::parse("29010120000A19"),
            Err(Error::NonDigit(_))
        ));
        assert!(matches!(
            NationalId::parse(""),
            Err(Error::InvalidLength(0))
        ));
    }

    #[test]
    fn test_rejects_bad_century() {
        assert!(matches!(
            NationalId::parse("19010120100017"),
            Err(Error::InvalidCentury('1'))
        ));
        assert!(matches!(
            NationalId::parse("49010120100017"),
            Err(Error::InvalidCentury('4'))
        ));
    }

    #[test]
    fn test_rejects_impossible_dates() {
        // Feb 30
        assert!(matches!(
            NationalId::parse("29002300100017"),
            Err(Error::InvalidBirthDate(_))
        ));
        // Month 13
        assert!(matches!(
            NationalId::parse("29013010100017"),
            Err(Error::InvalidBirthDate(_))
        ));
    }

    #[test]
    fn test_leap_year_depends_on_century() {
        // 2000 is a leap year
        let id = NationalId::parse("30002290100155").unwrap();
        assert_eq!(
            id.birth_date(),
            NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
        );
        // 1900 is not: same YYMMDD under century marker 2 must fail
        assert!(matches!(
            NationalId::parse("20002290100155"),
            Err(Error::InvalidBirthDate(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_governorate_despite_valid_checksum() {
        // Check digit is correct for this payload, but code 00 is not
        // in the table.
        assert!(matches!(
            NationalId::parse("29010120000019"),
            Err(Error::UnknownGovernorate(_))
        ));
    }

    #[test]
    fn test_rejects_checksum_mismatch() {
        assert!(matches!(
            NationalId::parse("29010120100018"),
            Err(Error::ChecksumMismatch { expected: 7, .. })
        ));
    }

    #[test]
    fn test_every_single_digit_corruption_is_rejected() {
        let valid = "29010120100017";
        for pos in 0..14 {
            for digit in b'0'..=b'9' {
                if valid.as_bytes()[pos] == digit {
                    continue;
                }
                let mut mutated = valid.as_bytes().to_vec();
                mutated[pos] = digit;
                let mutated = String::from_utf8(mutated).unwrap();
                assert!(
                    NationalId::parse(&mutated).is_err(),
                    "corruption {} at position {} was accepted",
                    mutated,
                    pos
                );
            }
        }
    }

    #[test]
    fn test_gender_parity() {
        assert_eq!(Gender::from_digit(1), Gender::Male);
        assert_eq!(Gender::from_digit(9), Gender::Male);
        assert_eq!(Gender::from_digit(2), Gender::Female);
        assert_eq!(Gender::from_digit(0), Gender::Female);
    }

    #[test]
    fn test_validate_option_contract() {
        assert!(validate("29010120100017").is_some());
        assert!(validate("29010120100018").is_none());
        assert!(validate("not an id").is_none());
    }

    #[test]
    fn test_serialize_emits_decomposition() {
        let id = NationalId::parse("29010120100017").unwrap();
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["id"], "29010120100017");
        assert_eq!(json["governorate"], "cairo");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["serial"], "000");
    }
}
