//! Search module
//!
//! Query normalization and the tiered matcher that resolves a query to a
//! result list, a badge label and an optional clock request.

pub mod matcher;
pub mod normalizer;

pub use matcher::{ClockTarget, MatchResult, MatchTier, Matcher, TierMatch};
pub use normalizer::normalize_query;
