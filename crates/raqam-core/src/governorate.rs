//! Governorate codes for national IDs
//!
//! Fixed table of the 28 issuing regions. Digits 8-9 of an ID must match
//! one of these codes; 88 marks IDs issued to citizens born abroad.

use serde::{Deserialize, Serialize};

/// Issuing governorate, identified by the 2-digit code in the ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Governorate {
    Cairo,
    Alexandria,
    PortSaid,
    Suez,
    Damietta,
    Dakahlia,
    Sharkia,
    Kalyoubia,
    KafrElSheikh,
    Gharbia,
    Monufia,
    Beheira,
    Ismailia,
    Giza,
    BeniSuef,
    Fayoum,
    Minya,
    Assiut,
    Sohag,
    Qena,
    Aswan,
    Luxor,
    RedSea,
    NewValley,
    Matrouh,
    NorthSinai,
    SouthSinai,
    Foreign,
}

impl Governorate {
    /// All governorates in table order
    pub const ALL: [Governorate; 28] = [
        Governorate::Cairo,
        Governorate::Alexandria,
        Governorate::PortSaid,
        Governorate::Suez,
        Governorate::Damietta,
        Governorate::Dakahlia,
        Governorate::Sharkia,
        Governorate::Kalyoubia,
        Governorate::KafrElSheikh,
        Governorate::Gharbia,
        Governorate::Monufia,
        Governorate::Beheira,
        Governorate::Ismailia,
        Governorate::Giza,
        Governorate::BeniSuef,
        Governorate::Fayoum,
        Governorate::Minya,
        Governorate::Assiut,
        Governorate::Sohag,
        Governorate::Qena,
        Governorate::Aswan,
        Governorate::Luxor,
        Governorate::RedSea,
        Governorate::NewValley,
        Governorate::Matrouh,
        Governorate::NorthSinai,
        Governorate::SouthSinai,
        Governorate::Foreign,
    ];

    /// The 2-digit code as it appears in the ID
    pub fn code(&self) -> &'static str {
        match self {
            Governorate::Cairo => "01",
            Governorate::Alexandria => "02",
            Governorate::PortSaid => "03",
            Governorate::Suez => "04",
            Governorate::Damietta => "11",
            Governorate::Dakahlia => "12",
            Governorate::Sharkia => "13",
            Governorate::Kalyoubia => "14",
            Governorate::KafrElSheikh => "15",
            Governorate::Gharbia => "16",
            Governorate::Monufia => "17",
            Governorate::Beheira => "18",
            Governorate::Ismailia => "19",
            Governorate::Giza => "21",
            Governorate::BeniSuef => "22",
            Governorate::Fayoum => "23",
            Governorate::Minya => "24",
            Governorate::Assiut => "25",
            Governorate::Sohag => "26",
            Governorate::Qena => "27",
            Governorate::Aswan => "28",
            Governorate::Luxor => "29",
            Governorate::RedSea => "31",
            Governorate::NewValley => "32",
            Governorate::Matrouh => "33",
            Governorate::NorthSinai => "34",
            Governorate::SouthSinai => "35",
            Governorate::Foreign => "88",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Governorate::Cairo => "Cairo",
            Governorate::Alexandria => "Alexandria",
            Governorate::PortSaid => "Port Said",
            Governorate::Suez => "Suez",
            Governorate::Damietta => "Damietta",
            Governorate::Dakahlia => "Dakahlia",
            Governorate::Sharkia => "Sharkia",
            Governorate::Kalyoubia => "Kalyoubia",
            Governorate::KafrElSheikh => "Kafr El Sheikh",
            Governorate::Gharbia => "Gharbia",
            Governorate::Monufia => "Monufia",
            Governorate::Beheira => "Beheira",
            Governorate::Ismailia => "Ismailia",
            Governorate::Giza => "Giza",
            Governorate::BeniSuef => "Beni Suef",
            Governorate::Fayoum => "Fayoum",
            Governorate::Minya => "Minya",
            Governorate::Assiut => "Assiut",
            Governorate::Sohag => "Sohag",
            Governorate::Qena => "Qena",
            Governorate::Aswan => "Aswan",
            Governorate::Luxor => "Luxor",
            Governorate::RedSea => "Red Sea",
            Governorate::NewValley => "New Valley",
            Governorate::Matrouh => "Matrouh",
            Governorate::NorthSinai => "North Sinai",
            Governorate::SouthSinai => "South Sinai",
            Governorate::Foreign => "Foreign",
        }
    }

    /// Look up a governorate by its 2-digit code
    pub fn from_code(code: &str) -> Option<Governorate> {
        Governorate::ALL.iter().copied().find(|g| g.code() == code)
    }
}

impl std::str::FromStr for Governorate {
    type Err = crate::Error;

    /// Accepts a 2-digit code or a case-insensitive name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(gov) = Governorate::from_code(s) {
            return Ok(gov);
        }
        Governorate::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::UnknownGovernorate(s.to_string()))
    }
}

impl std::fmt::Display for Governorate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_28_entries() {
        assert_eq!(Governorate::ALL.len(), 28);
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in Governorate::ALL.iter().enumerate() {
            for b in &Governorate::ALL[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Governorate::from_code("01"), Some(Governorate::Cairo));
        assert_eq!(Governorate::from_code("88"), Some(Governorate::Foreign));
        assert_eq!(Governorate::from_code("00"), None);
        assert_eq!(Governorate::from_code("36"), None);
        assert_eq!(Governorate::from_code("1"), None);
    }

    #[test]
    fn test_from_str_by_name() {
        assert_eq!("Cairo".parse::<Governorate>().unwrap(), Governorate::Cairo);
        assert_eq!(
            "kafr el sheikh".parse::<Governorate>().unwrap(),
            Governorate::KafrElSheikh
        );
        assert_eq!("21".parse::<Governorate>().unwrap(), Governorate::Giza);
        assert!("Atlantis".parse::<Governorate>().is_err());
    }
}
