// Unit tests for Hawaii Match

use hawaii_match::core::{
    calculate_match, format_usd, island_for_address, normalize_property_type, suggest_strategy,
};
use hawaii_match::models::{
    Investor, Island, Lead, Priority, Property, PropertyKind, PropertyStatus, ScoringRules,
    Strategy,
};
use hawaii_match::services::{CatalogStore, InMemoryCatalog};

fn create_property(days_until_auction: Option<i32>) -> Property {
    Property {
        id: 1,
        address: "500 Ala Moana Blvd, Honolulu, HI".to_string(),
        city: Some("Honolulu".to_string()),
        estimated_value: Some(550_000),
        amount_owed: Some(200_000),
        property_type: Some("Condo".to_string()),
        days_until_auction,
        auction_date: None,
        priority: Priority::Low,
        status: PropertyStatus::TaxDelinquent,
    }
}

fn create_investor() -> Investor {
    Investor {
        id: 1,
        name: "Test Investor".to_string(),
        email: None,
        company: Some("Test LLC".to_string()),
        preferred_islands: vec![Island::Oahu],
        property_types: Some(vec!["Condominium".to_string()]),
        min_budget: Some(250_000),
        max_budget: Some(750_000),
        strategies: vec![Strategy::Brrrr],
    }
}

#[test]
fn test_island_gazetteer_is_case_insensitive() {
    assert_eq!(island_for_address("WAIKIKI BEACH"), Island::Oahu);
    assert_eq!(island_for_address("Pearl City, HI"), Island::Oahu);
    assert_eq!(island_for_address("Kona Coast"), Island::BigIsland);
    assert_eq!(island_for_address("Big Island Ranch Rd"), Island::BigIsland);
    assert_eq!(island_for_address("Makawao, Maui"), Island::Maui);
}

#[test]
fn test_property_type_normalization() {
    assert_eq!(normalize_property_type("house"), PropertyKind::SingleFamily);
    assert_eq!(normalize_property_type("Multi-Family"), PropertyKind::Multifamily);
    assert_eq!(normalize_property_type("Land"), PropertyKind::VacantLand);
    assert_eq!(normalize_property_type("Commercial").to_string(), "Commercial");
}

#[test]
fn test_brrrr_suggested_for_equity_rich_property() {
    let property = create_property(None);
    assert_eq!(suggest_strategy(&property, &ScoringRules::default()), Strategy::Brrrr);
}

#[test]
fn test_condo_brrrr_match_score() {
    let outcome = calculate_match(&create_property(None), &create_investor(), &ScoringRules::default());

    // 30 island + 25 type + 20 price + 10 strategy
    assert_eq!(outcome.score, 85);
    assert_eq!(outcome.reasons.last().map(String::as_str), Some("Strategy match: BRRRR"));
}

#[test]
fn test_urgency_is_monotonic() {
    let rules = ScoringRules::default();
    let investor = create_investor();
    let score = |days| calculate_match(&create_property(days), &investor, &rules).score;

    let urgent = score(Some(3));
    let soon = score(Some(15));
    let later = score(Some(45));
    let none = score(None);

    assert!(urgent >= soon);
    assert!(soon >= later);
    assert_eq!(later, none);
}

#[test]
fn test_score_never_negative() {
    let rules = ScoringRules::default();
    let mut investor = create_investor();
    investor.property_types = None;
    investor.strategies.clear();
    investor.min_budget = Some(10_000_000);

    for value in [None, Some(0), Some(1), Some(9_999_999)] {
        let mut property = create_property(None);
        property.estimated_value = value;
        let outcome = calculate_match(&property, &investor, &rules);
        assert!(outcome.score >= 0, "Score {} is negative", outcome.score);
    }
}

#[test]
fn test_custom_rule_weights() {
    let rules = ScoringRules {
        location: 50,
        strategy: 0,
        ..ScoringRules::default()
    };

    let outcome = calculate_match(&create_property(None), &create_investor(), &rules);

    assert_eq!(outcome.score, 50 + 25 + 20);
}

#[test]
fn test_format_usd_millions() {
    assert_eq!(format_usd(12_345_678), "$12,345,678");
}

#[test]
fn test_in_memory_catalog_lookup() {
    let catalog = InMemoryCatalog::new(
        vec![create_property(Some(4))],
        vec![create_investor()],
        vec![Lead { id: 5, property_id: 1 }],
    );

    let property = tokio_test::block_on(catalog.get_property(1)).unwrap();
    assert_eq!(property.and_then(|p| p.days_until_auction), Some(4));

    let investors = tokio_test::block_on(catalog.list_investors(1000)).unwrap();
    assert_eq!(investors.len(), 1);
}
