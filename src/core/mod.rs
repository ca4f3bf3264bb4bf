// Core algorithm exports
pub mod gazetteer;
pub mod matcher;
pub mod rules;
pub mod scoring;

pub use gazetteer::{island_for_address, normalize_property_type, DEFAULT_ISLAND};
pub use matcher::{rank, summarize, Matcher};
pub use rules::{format_usd, suggest_strategy};
pub use scoring::{calculate_match, LOCATION_MISMATCH};
