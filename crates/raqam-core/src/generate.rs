//! National ID composition
//!
//! Two paths with distinct types: [`generate`] produces a complete,
//! checksum-verified [`NationalId`]; [`preview`] produces a plain
//! 14-character string that may contain `*` placeholders and is never
//! a valid ID while any placeholder remains.

use chrono::{Datelike, NaiveDate};

use crate::{Error, NationalId, Result, checksum};

/// Placeholder for a position that is not yet a real digit
pub const PLACEHOLDER: char = '*';

/// Century marker for a birth year: 2 for the 1900s, 3 for the 2000s
fn century_marker(year: i32) -> Result<char> {
    match year {
        1900..=1999 => Ok('2'),
        2000..=2099 => Ok('3'),
        _ => Err(Error::UnsupportedYear(year)),
    }
}

/// Compose the 13-digit prefix: century, YYMMDD, padded code, padded
/// serial, gender digit
///
/// The code is not checked against the governorate table here; the
/// validator is the authority on membership.
fn compose13(
    birth_date: NaiveDate,
    governorate_code: &str,
    serial: &str,
    gender_digit: u8,
) -> Result<String> {
    let century = century_marker(birth_date.year())?;
    let date_part = birth_date.format("%y%m%d");

    if governorate_code.len() > 2 || !governorate_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::UnknownGovernorate(governorate_code.to_string()));
    }
    if serial.len() > 3 || !serial.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidSerial(serial.to_string()));
    }
    if gender_digit > 9 {
        return Err(Error::InvalidGenderDigit(gender_digit.to_string()));
    }

    Ok(format!(
        "{}{}{:0>2}{:0>3}{}",
        century, date_part, governorate_code, serial, gender_digit
    ))
}

/// Compose a complete national ID, check digit included
///
/// The governorate code may be any 2-digit string; when it is in the
/// fixed table, the result round-trips through [`NationalId::parse`].
pub fn generate(
    birth_date: NaiveDate,
    governorate_code: &str,
    serial: &str,
    gender_digit: u8,
) -> Result<NationalId> {
    let prefix = compose13(birth_date, governorate_code, serial, gender_digit)?;
    let check = checksum::check_digit(&prefix)?;
    NationalId::parse(&format!("{}{}", prefix, check))
}

/// Compose the 14-character live-preview string
///
/// Missing serial renders as `***`, missing gender digit as `*`. The
/// check digit is computed only when `with_checksum` is set and every
/// other position is a real digit; otherwise it renders as `*`.
pub fn preview(
    birth_date: NaiveDate,
    governorate_code: &str,
    serial: &str,
    gender_digit: Option<u8>,
    with_checksum: bool,
) -> String {
    let year = birth_date.year();
    let century = century_marker(year).unwrap_or(PLACEHOLDER);
    let date_part = birth_date.format("%y%m%d").to_string();

    let gov = if governorate_code.len() <= 2
        && !governorate_code.is_empty()
        && governorate_code.bytes().all(|b| b.is_ascii_digit())
    {
        format!("{:0>2}", governorate_code)
    } else {
        "**".to_string()
    };

    let serial_complete = serial.len() == 3 && serial.bytes().all(|b| b.is_ascii_digit());
    let serial_part = if serial_complete {
        serial.to_string()
    } else {
        "***".to_string()
    };

    let gender_part = match gender_digit {
        Some(d) if d <= 9 => char::from(b'0' + d),
        _ => PLACEHOLDER,
    };

    let prefix = format!("{}{}{}{}{}", century, date_part, gov, serial_part, gender_part);

    let check = if with_checksum {
        match checksum::check_digit(&prefix) {
            Ok(digit) => char::from(b'0' + digit),
            Err(_) => PLACEHOLDER,
        }
    } else {
        PLACEHOLDER
    };

    format!("{}{}", prefix, check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gender, Governorate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_round_trips_through_parse() {
        let id = generate(date(2005, 2, 14), "21", "123", 4).unwrap();
        assert_eq!(id.as_str(), "30502142112340");
        assert_eq!(id.birth_date(), date(2005, 2, 14));
        assert_eq!(id.governorate(), Governorate::Giza);
        assert_eq!(id.serial(), "123");
        assert_eq!(id.gender_digit(), 4);
        assert_eq!(id.gender(), Gender::Female);
    }

    #[test]
    fn test_century_marker_boundary() {
        let nineties = generate(date(1999, 1, 1), "88", "001", 3).unwrap();
        assert!(nineties.as_str().starts_with('2'));
        assert_eq!(nineties.as_str(), "29901018800132");

        let millennials = generate(date(2000, 1, 1), "88", "001", 3).unwrap();
        assert!(millennials.as_str().starts_with('3'));
        assert_eq!(millennials.as_str(), "30001018800138");
    }

    #[test]
    fn test_generate_pads_code_and_serial() {
        let id = generate(date(1990, 10, 12), "1", "0", 1).unwrap();
        assert_eq!(&id.as_str()[7..9], "01");
        assert_eq!(id.serial(), "000");
    }

    #[test]
    fn test_generate_rejects_out_of_range_year() {
        assert!(matches!(
            generate(date(1899, 12, 31), "01", "001", 1),
            Err(Error::UnsupportedYear(1899))
        ));
        assert!(matches!(
            generate(date(2100, 1, 1), "01", "001", 1),
            Err(Error::UnsupportedYear(2100))
        ));
    }

    #[test]
    fn test_generate_rejects_malformed_parts() {
        assert!(matches!(
            generate(date(1990, 1, 1), "abc", "001", 1),
            Err(Error::UnknownGovernorate(_))
        ));
        assert!(matches!(
            generate(date(1990, 1, 1), "01", "12a", 1),
            Err(Error::InvalidSerial(_))
        ));
        assert!(matches!(
            generate(date(1990, 1, 1), "01", "1234", 1),
            Err(Error::InvalidSerial(_))
        ));
    }

    #[test]
    fn test_preview_with_placeholders() {
        let s = preview(date(1990, 10, 12), "01", "", None, false);
        assert_eq!(s, "290101201*****");
        assert_eq!(s.len(), 14);
        assert!(crate::validate(&s).is_none());
    }

    #[test]
    fn test_preview_without_checksum_keeps_placeholder() {
        let s = preview(date(1990, 10, 12), "01", "000", Some(1), false);
        assert_eq!(s, "2901012010001*");
        assert!(crate::validate(&s).is_none());
    }

    #[test]
    fn test_preview_complete_matches_generate() {
        let s = preview(date(2005, 2, 14), "21", "123", Some(4), true);
        let id = generate(date(2005, 2, 14), "21", "123", 4).unwrap();
        assert_eq!(s, id.as_str());
    }

    #[test]
    fn test_preview_incomplete_never_computes_checksum() {
        // Placeholders in the prefix make the checksum uncomputable
        let s = preview(date(1990, 10, 12), "01", "", Some(1), true);
        assert!(s.ends_with(PLACEHOLDER));
    }
}
