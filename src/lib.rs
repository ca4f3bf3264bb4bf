//! Hawaii Match - property-to-investor matching for distressed-property leads
//!
//! Scores every (property, investor) pair with a fixed, ordered rule table
//! (island gate, property type, budget, auction urgency, strategy, priority)
//! and ranks the positive matches for a lead, for an investor, or across all
//! leads.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match, island_for_address, normalize_property_type, Matcher};
pub use crate::models::{Investor, Island, Lead, MatchResult, MatchingStats, Property, ScoringRules, Strategy};
pub use crate::services::{CatalogStore, InMemoryCatalog, MatchingService, StoreError};
