use crate::core::rules::{
    auction_urgency, budget_fit, location_gate, priority_bonus, property_type_bonus,
    strategy_bonus, RuleHit,
};
use crate::models::{Investor, MatchOutcome, Property, ScoringRules};

/// Reason reported when the island gate rejects a pair
pub const LOCATION_MISMATCH: &str = "Location not in preferred islands";

/// Score a property against an investor
///
/// Rules run in a fixed order and each may append one reason:
/// 1. island gate (+30, or short-circuit to 0)
/// 2. property type (+25)
/// 3. budget fit (+20 / -20)
/// 4. auction urgency (+15 within 7 days, +10 within 30)
/// 5. strategy (+10)
/// 6. high priority (+5)
///
/// The final score is floored at zero.
pub fn calculate_match(
    property: &Property,
    investor: &Investor,
    rules: &ScoringRules,
) -> MatchOutcome {
    let island = match location_gate(property, investor) {
        Ok(island) => island,
        Err(_) => {
            return MatchOutcome {
                score: 0,
                reasons: vec![LOCATION_MISMATCH.to_string()],
            }
        }
    };

    let hits: Vec<RuleHit> = [
        Some(RuleHit {
            points: rules.location,
            reason: format!("Location match: {}", island),
        }),
        property_type_bonus(property, investor, rules),
        budget_fit(property, investor, rules),
        auction_urgency(property, rules),
        strategy_bonus(property, investor, rules),
        priority_bonus(property, rules),
    ]
    .into_iter()
    .flatten()
    .collect();

    let score: i32 = hits.iter().map(|hit| hit.points).sum();

    MatchOutcome {
        score: score.max(0),
        reasons: hits.into_iter().map(|hit| hit.reason).collect(),
    }
}
