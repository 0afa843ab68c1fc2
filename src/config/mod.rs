//! Configuration management for the club-swiss service
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod pairing;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, TournamentSettings};
pub use pairing::PairingConfig;
pub use rating::{RatingConfig, DEFAULT_RATING};
