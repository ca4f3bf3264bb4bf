use crate::models::{Island, PropertyKind};

/// Place names mapped to their island, checked in order
const ISLAND_GAZETTEER: [(Island, &[&str]); 4] = [
    (
        Island::Oahu,
        &["honolulu", "waikiki", "kapolei", "kailua", "pearl city", "aiea"],
    ),
    (Island::Maui, &["maui", "lahaina", "kihei", "hana"]),
    (Island::BigIsland, &["kona", "hilo", "big island"]),
    (Island::Kauai, &["kauai", "lihue", "poipu"]),
];

/// Island assumed when an address names no known place
pub const DEFAULT_ISLAND: Island = Island::Oahu;

/// Derive the island a property sits on from its free-text address
///
/// Best-effort substring lookup against a fixed gazetteer. The first island
/// whose place names appear in the address wins; unknown addresses fall back
/// to [`DEFAULT_ISLAND`].
pub fn island_for_address(address: &str) -> Island {
    let lower = address.to_lowercase();

    ISLAND_GAZETTEER
        .iter()
        .find(|(_, places)| places.iter().any(|place| lower.contains(place)))
        .map(|(island, _)| *island)
        .unwrap_or(DEFAULT_ISLAND)
}

/// Normalize a free-text property type so that variants like "SFR" and
/// "Single Family Home" compare equal
pub fn normalize_property_type(raw: &str) -> PropertyKind {
    let lower = raw.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["single", "sfr", "house"]) {
        PropertyKind::SingleFamily
    } else if has(&["condo"]) {
        PropertyKind::Condo
    } else if has(&["multi", "duplex", "triplex"]) {
        PropertyKind::Multifamily
    } else if has(&["land", "vacant"]) {
        PropertyKind::VacantLand
    } else {
        PropertyKind::Other(raw.to_string())
    }
}
