// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Investor, Island, Lead, MatchOutcome, MatchResult, MatchingStats, Priority, Property,
    PropertyKind, PropertyStatus, ScoringRules, Strategy,
};
pub use requests::MatchListQuery;
pub use responses::{ErrorResponse, HealthResponse, MatchListResponse};
