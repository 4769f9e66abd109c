//! raqam-core: Core library for the raqam national ID toolkit
//!
//! Provides parsing, validation, and generation of Egyptian national
//! IDs. Pure functions over fixed-length digit strings - no I/O beyond
//! config loading, no persistence.

pub mod checksum;
pub mod config;
pub mod error;
pub mod generate;
pub mod governorate;
pub mod national_id;

pub use checksum::check_digit;
pub use config::Config;
pub use error::Error;
pub use generate::{PLACEHOLDER, generate, preview};
pub use governorate::Governorate;
pub use national_id::{Gender, NationalId, validate};

/// Result type for raqam operations
pub type Result<T> = std::result::Result<T, Error>;
