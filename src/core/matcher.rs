use std::collections::BTreeMap;

use crate::core::scoring::calculate_match;
use crate::models::{Investor, Lead, MatchResult, MatchingStats, Property, ScoringRules};

/// Pure ranking over catalog snapshots
///
/// Holds only the scoring rules; every call recomputes scores from the
/// slices it is given, so one `Matcher` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: ScoringRules,
}

impl Matcher {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: ScoringRules::default(),
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score one lead's property against every investor
    ///
    /// Only positive scores are kept. The result is ranked best first.
    pub fn matches_for_lead(
        &self,
        lead: &Lead,
        property: &Property,
        investors: &[Investor],
    ) -> Vec<MatchResult> {
        let matches = investors
            .iter()
            .filter_map(|investor| self.score_pair(lead.id, property, investor))
            .collect();

        rank(matches)
    }

    /// Score every property against one investor
    ///
    /// A scoring property is attached to the first lead pursuing it; properties
    /// no lead points at are dropped.
    pub fn matches_for_investor(
        &self,
        investor: &Investor,
        properties: &[Property],
        leads: &[Lead],
    ) -> Vec<MatchResult> {
        let matches = properties
            .iter()
            .filter_map(|property| {
                let lead = leads.iter().find(|lead| lead.property_id == property.id)?;
                self.score_pair(lead.id, property, investor)
            })
            .collect();

        rank(matches)
    }

    fn score_pair(
        &self,
        lead_id: i32,
        property: &Property,
        investor: &Investor,
    ) -> Option<MatchResult> {
        let outcome = calculate_match(property, investor, &self.rules);
        if outcome.score <= 0 {
            return None;
        }

        Some(MatchResult {
            lead_id,
            investor_id: investor.id,
            property: property.clone(),
            investor: investor.clone(),
            match_score: outcome.score,
            match_reasons: outcome.reasons,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Sort matches by score, highest first. Ties keep their input order.
pub fn rank(mut matches: Vec<MatchResult>) -> Vec<MatchResult> {
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}

/// Summarize a set of matches
pub fn summarize(matches: &[MatchResult]) -> MatchingStats {
    let mut matches_by_investor = BTreeMap::new();
    let mut matches_by_property = BTreeMap::new();
    let mut total_score: i64 = 0;

    for m in matches {
        let investor_key = format!("{} ({})", m.investor.name, m.investor.id);
        let property_key = format!("{} ({})", m.property.address, m.property.id);

        *matches_by_investor.entry(investor_key).or_insert(0) += 1;
        *matches_by_property.entry(property_key).or_insert(0) += 1;
        total_score += i64::from(m.match_score);
    }

    let average_match_score = if matches.is_empty() {
        0.0
    } else {
        total_score as f64 / matches.len() as f64
    };

    MatchingStats {
        total_matches: matches.len(),
        matches_by_investor,
        matches_by_property,
        average_match_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Island, Priority, PropertyStatus, Strategy};

    fn create_property(id: i32, address: &str, days_until_auction: Option<i32>) -> Property {
        Property {
            id,
            address: address.to_string(),
            city: None,
            estimated_value: Some(500_000),
            amount_owed: None,
            property_type: Some("Condo".to_string()),
            days_until_auction,
            auction_date: None,
            priority: Priority::Medium,
            status: PropertyStatus::Foreclosure,
        }
    }

    fn create_investor(id: i32, islands: Vec<Island>) -> Investor {
        Investor {
            id,
            name: format!("Investor {}", id),
            email: None,
            company: None,
            preferred_islands: islands,
            property_types: Some(vec!["condo".to_string()]),
            min_budget: Some(300_000),
            max_budget: Some(700_000),
            strategies: vec![Strategy::BuyAndHold],
        }
    }

    #[test]
    fn test_matches_for_lead_filters_and_ranks() {
        let matcher = Matcher::with_default_rules();
        let property = create_property(1, "88 Kapiolani Blvd, Honolulu", Some(20));
        let lead = Lead { id: 10, property_id: 1 };

        let mut picky = create_investor(2, vec![Island::Oahu]);
        picky.property_types = Some(vec!["Vacant Land".to_string()]);
        let investors = vec![
            create_investor(1, vec![Island::Kauai]),
            picky,
            create_investor(3, vec![Island::Oahu, Island::Maui]),
        ];

        let matches = matcher.matches_for_lead(&lead, &property, &investors);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].investor_id, 3);
        assert_eq!(matches[1].investor_id, 2);
        assert!(matches.iter().all(|m| m.lead_id == 10));
        assert!(matches[0].match_score > matches[1].match_score);
    }

    #[test]
    fn test_matches_for_investor_requires_lead() {
        let matcher = Matcher::with_default_rules();
        let investor = create_investor(1, vec![Island::Oahu]);
        let properties = vec![
            create_property(1, "1 Fort St, Honolulu", None),
            create_property(2, "2 Fort St, Honolulu", Some(3)),
            create_property(3, "3 Fort St, Honolulu", None),
        ];
        let leads = vec![
            Lead { id: 20, property_id: 2 },
            Lead { id: 21, property_id: 1 },
            Lead { id: 22, property_id: 1 },
        ];

        let matches = matcher.matches_for_investor(&investor, &properties, &leads);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].property.id, 2);
        assert_eq!(matches[0].lead_id, 20);
        // First lead for the property wins
        assert_eq!(matches[1].lead_id, 21);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let matcher = Matcher::with_default_rules();
        let property = create_property(1, "Honolulu", None);
        let lead = Lead { id: 1, property_id: 1 };
        let investors: Vec<Investor> = (1..=4)
            .map(|id| create_investor(id, vec![Island::Oahu]))
            .collect();

        let matches = matcher.matches_for_lead(&lead, &property, &investors);
        let ids: Vec<i32> = matches.iter().map(|m| m.investor_id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_summarize() {
        let matcher = Matcher::with_default_rules();
        let property = create_property(5, "5 Kalakaua Ave, Waikiki", Some(5));
        let lead = Lead { id: 1, property_id: 5 };
        let investors = vec![
            create_investor(1, vec![Island::Oahu]),
            create_investor(2, vec![Island::Oahu]),
        ];

        let matches = matcher.matches_for_lead(&lead, &property, &investors);
        let stats = summarize(&matches);

        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.matches_by_investor["Investor 1 (1)"], 1);
        assert_eq!(stats.matches_by_property["5 Kalakaua Ave, Waikiki (5)"], 2);
        assert_eq!(stats.average_match_score, f64::from(matches[0].match_score));
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_matches, 0);
        assert_eq!(stats.average_match_score, 0.0);
        assert!(stats.matches_by_investor.is_empty());
    }
}
