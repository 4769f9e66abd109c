//! Error types for raqam

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("ID must be 14 digits, got {0} characters")]
    InvalidLength(usize),

    #[error("ID contains non-digit characters: {0}")]
    NonDigit(String),

    #[error("Invalid century marker: {0} (must be 2 or 3)")]
    InvalidCentury(char),

    #[error("Invalid birth date: {0}")]
    InvalidBirthDate(String),

    #[error("Unknown governorate code: {0}")]
    UnknownGovernorate(String),

    #[error("Invalid serial: {0} (must be 3 digits)")]
    InvalidSerial(String),

    #[error("Invalid gender digit: {0}")]
    InvalidGenderDigit(String),

    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("Birth year {0} outside supported range 1900-2099")]
    UnsupportedYear(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
