use crate::core::gazetteer::{island_for_address, normalize_property_type};
use crate::models::{Investor, Island, Priority, Property, ScoringRules, Strategy};

/// Contribution of a single rule to the running score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub points: i32,
    pub reason: String,
}

impl RuleHit {
    fn new(points: i32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: reason.into(),
        }
    }
}

/// Island gate. `Err` carries the island that failed the investor's list.
pub fn location_gate(property: &Property, investor: &Investor) -> Result<Island, Island> {
    let island = island_for_address(&property.address);
    if investor.preferred_islands.contains(&island) {
        Ok(island)
    } else {
        Err(island)
    }
}

/// Bonus when the property's normalized type is one the investor accepts
pub fn property_type_bonus(
    property: &Property,
    investor: &Investor,
    rules: &ScoringRules,
) -> Option<RuleHit> {
    let accepted = investor.property_types.as_ref()?;
    let raw = property.property_type.as_deref()?;
    let kind = normalize_property_type(raw);

    accepted
        .iter()
        .any(|t| normalize_property_type(t) == kind)
        .then(|| RuleHit::new(rules.property_type, format!("Property type match: {}", raw)))
}

/// Price check against the investor's budget window
///
/// Below the minimum is checked before above the maximum. Properties without
/// an estimated value are skipped. A stored bound of `Some(0)` is a real bound.
pub fn budget_fit(
    property: &Property,
    investor: &Investor,
    rules: &ScoringRules,
) -> Option<RuleHit> {
    let value = property.estimated_value?;

    if let Some(min) = investor.min_budget.filter(|min| value < *min) {
        return Some(RuleHit::new(
            -rules.budget,
            format!("Below min budget ({})", format_usd(min)),
        ));
    }
    if let Some(max) = investor.max_budget.filter(|max| value > *max) {
        return Some(RuleHit::new(
            -rules.budget,
            format!("Above max budget ({})", format_usd(max)),
        ));
    }
    if investor.min_budget.is_none() && investor.max_budget.is_none() && !rules.reward_unbounded_budget {
        return None;
    }

    Some(RuleHit::new(
        rules.budget,
        format!("Price in range: {}", format_usd(value)),
    ))
}

/// Bonus for auctions that are coming up soon
pub fn auction_urgency(property: &Property, rules: &ScoringRules) -> Option<RuleHit> {
    let days = property.days_until_auction?;

    if days <= rules.urgent_auction_days {
        Some(RuleHit::new(
            rules.urgent_auction,
            format!("Urgent: {} days until auction", days),
        ))
    } else if days <= rules.time_sensitive_auction_days {
        Some(RuleHit::new(
            rules.time_sensitive_auction,
            format!("Time-sensitive: {} days until auction", days),
        ))
    } else {
        None
    }
}

/// Pick the single strategy a property suits best
pub fn suggest_strategy(property: &Property, rules: &ScoringRules) -> Strategy {
    let value = property.estimated_value;

    if value.is_some_and(|v| v > rules.flip_threshold) {
        return Strategy::FixAndFlip;
    }

    // Exact stored label only; "Duplex" or "Multi-Family" fall through to the equity check
    if property.property_type.as_deref() == Some("multifamily") {
        return Strategy::BuyAndHold;
    }

    match (property.amount_owed, value) {
        (Some(owed), Some(value)) if f64::from(owed) < f64::from(value) * rules.brrrr_equity_ratio => {
            Strategy::Brrrr
        }
        _ => Strategy::BuyAndHold,
    }
}

/// Bonus when the property's suggested strategy is one the investor runs
pub fn strategy_bonus(
    property: &Property,
    investor: &Investor,
    rules: &ScoringRules,
) -> Option<RuleHit> {
    if investor.strategies.is_empty() {
        return None;
    }

    let suggested = suggest_strategy(property, rules);
    investor
        .strategies
        .contains(&suggested)
        .then(|| RuleHit::new(rules.strategy, format!("Strategy match: {}", suggested)))
}

/// Bonus for properties the CRM flags as high priority
pub fn priority_bonus(property: &Property, rules: &ScoringRules) -> Option<RuleHit> {
    (property.priority == Priority::High)
        .then(|| RuleHit::new(rules.high_priority, "High priority property"))
}

/// Render whole dollars with thousands separators, e.g. `$1,250,000`
pub fn format_usd(amount: i32) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
