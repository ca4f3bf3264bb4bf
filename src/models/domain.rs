use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Main Hawaiian islands a property can be located on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Island {
    Oahu,
    Maui,
    #[serde(rename = "Big Island")]
    BigIsland,
    Kauai,
}

impl Island {
    pub const ALL: [Island; 4] = [Island::Oahu, Island::Maui, Island::BigIsland, Island::Kauai];

    pub fn label(&self) -> &'static str {
        match self {
            Island::Oahu => "Oahu",
            Island::Maui => "Maui",
            Island::BigIsland => "Big Island",
            Island::Kauai => "Kauai",
        }
    }

    /// Parse a stored island label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|island| island.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Investment approach an investor follows or a property suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "Fix & Flip")]
    FixAndFlip,
    #[serde(rename = "Buy & Hold")]
    BuyAndHold,
    #[serde(rename = "BRRRR")]
    Brrrr,
    #[serde(rename = "Wholesale")]
    Wholesale,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::FixAndFlip,
        Strategy::BuyAndHold,
        Strategy::Brrrr,
        Strategy::Wholesale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::FixAndFlip => "Fix & Flip",
            Strategy::BuyAndHold => "Buy & Hold",
            Strategy::Brrrr => "BRRRR",
            Strategy::Wholesale => "Wholesale",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized property type used when comparing investor and property types.
///
/// Types outside the known categories are kept verbatim in `Other` and only
/// compare equal to the exact same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    SingleFamily,
    Condo,
    Multifamily,
    VacantLand,
    Other(String),
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::SingleFamily => f.write_str("Single Family"),
            PropertyKind::Condo => f.write_str("Condo"),
            PropertyKind::Multifamily => f.write_str("Multifamily"),
            PropertyKind::VacantLand => f.write_str("Vacant Land"),
            PropertyKind::Other(raw) => f.write_str(raw),
        }
    }
}

/// Public-notice status a property was scraped under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Foreclosure,
    TaxDelinquent,
    Auction,
    Wholesale,
    #[serde(other)]
    Other,
}

impl PropertyStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "foreclosure" => PropertyStatus::Foreclosure,
            "tax_delinquent" => PropertyStatus::TaxDelinquent,
            "auction" => PropertyStatus::Auction,
            "wholesale" => PropertyStatus::Wholesale,
            _ => PropertyStatus::Other,
        }
    }
}

/// Distressed property under pursuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "estimatedValue", default)]
    pub estimated_value: Option<i32>,
    #[serde(rename = "amountOwed", default)]
    pub amount_owed: Option<i32>,
    #[serde(rename = "propertyType", default)]
    pub property_type: Option<String>,
    #[serde(rename = "daysUntilAuction", default)]
    pub days_until_auction: Option<i32>,
    #[serde(rename = "auctionDate", default)]
    pub auction_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    pub status: PropertyStatus,
}

/// Buyer profile used to score properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "preferredIslands", default)]
    pub preferred_islands: Vec<Island>,
    /// `None` means the investor never declared types, so no type bonus applies
    #[serde(rename = "propertyTypes", default)]
    pub property_types: Option<Vec<String>>,
    #[serde(rename = "minBudget", default)]
    pub min_budget: Option<i32>,
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<i32>,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

/// Active pursuit of a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i32,
    #[serde(rename = "propertyId")]
    pub property_id: i32,
}

/// Score and reason trail for one (property, investor) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub score: i32,
    pub reasons: Vec<String>,
}

/// Ranked match handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "leadId")]
    pub lead_id: i32,
    #[serde(rename = "investorId")]
    pub investor_id: i32,
    pub property: Property,
    pub investor: Investor,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Aggregate view over every positive match across all leads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchingStats {
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "matchesByInvestor")]
    pub matches_by_investor: BTreeMap<String, usize>,
    #[serde(rename = "matchesByProperty")]
    pub matches_by_property: BTreeMap<String, usize>,
    #[serde(rename = "averageMatchScore")]
    pub average_match_score: f64,
}

/// Points awarded or deducted by each matching rule
///
/// Deserializing a partial table keeps the default for every missing field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub location: i32,
    pub property_type: i32,
    /// Added when the price fits, subtracted when it falls outside the budget
    pub budget: i32,
    pub urgent_auction: i32,
    pub urgent_auction_days: i32,
    pub time_sensitive_auction: i32,
    pub time_sensitive_auction_days: i32,
    pub strategy: i32,
    pub high_priority: i32,
    pub flip_threshold: i32,
    pub brrrr_equity_ratio: f64,
    /// Whether an investor with neither budget bound still earns the in-range bonus
    pub reward_unbounded_budget: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            location: 30,
            property_type: 25,
            budget: 20,
            urgent_auction: 15,
            urgent_auction_days: 7,
            time_sensitive_auction: 10,
            time_sensitive_auction_days: 30,
            strategy: 10,
            high_priority: 5,
            flip_threshold: 800_000,
            brrrr_equity_ratio: 0.7,
            reward_unbounded_budget: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_island_labels_round_trip() {
        for island in Island::ALL {
            assert_eq!(Island::from_label(island.label()), Some(island));
        }
        assert_eq!(Island::from_label("  big island "), Some(Island::BigIsland));
        assert_eq!(Island::from_label("Molokai"), None);
    }

    #[test]
    fn test_strategy_serializes_as_label() {
        let json = serde_json::to_string(&Strategy::FixAndFlip).unwrap();
        assert_eq!(json, "\"Fix & Flip\"");
        assert_eq!(Strategy::from_label("brrrr"), Some(Strategy::Brrrr));
    }

    #[test]
    fn test_unknown_status_is_other() {
        let status: PropertyStatus = serde_json::from_str("\"sold\"").unwrap();
        assert_eq!(status, PropertyStatus::Other);
        assert_eq!(PropertyStatus::from_label("Tax_Delinquent"), PropertyStatus::TaxDelinquent);
    }

    #[test]
    fn test_match_result_uses_camel_case() {
        let result = MatchResult {
            lead_id: 1,
            investor_id: 2,
            property: Property {
                id: 3,
                address: "1 Ala Moana Blvd, Honolulu, HI".to_string(),
                city: None,
                estimated_value: None,
                amount_owed: None,
                property_type: None,
                days_until_auction: None,
                auction_date: None,
                priority: Priority::Low,
                status: PropertyStatus::Auction,
            },
            investor: Investor {
                id: 2,
                name: "Kai".to_string(),
                email: None,
                company: None,
                preferred_islands: vec![Island::Oahu],
                property_types: None,
                min_budget: None,
                max_budget: None,
                strategies: vec![],
            },
            match_score: 30,
            match_reasons: vec!["Location match: Oahu".to_string()],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["leadId"], 1);
        assert_eq!(value["matchScore"], 30);
        assert_eq!(value["investor"]["preferredIslands"][0], "Oahu");
    }
}
