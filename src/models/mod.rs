//! Data models for the TravelRecs application
//!
//! This module contains the core domain models organized by concern:
//! - Place: Beaches, temples and cities with their card details
//! - Dataset: The full recommendation document

pub mod dataset;
pub mod place;

// Re-export all public types for convenient access
pub use dataset::Dataset;
pub use place::{Country, Place};
