use std::collections::HashSet;

use super::*;

#[test]
fn catalog_has_sixteen_entries() {
    assert_eq!(STICKERS.len(), 16);
}

#[test]
fn catalog_ids_are_unique() {
    let ids: HashSet<&str> = STICKERS.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), STICKERS.len());
}

#[test]
fn catalog_symbols_are_non_empty() {
    assert!(STICKERS.iter().all(|s| !s.symbol.is_empty()));
}

#[test]
fn find_known_id() {
    assert_eq!(find("3").map(|s| s.symbol), Some("🔥"));
}

#[test]
fn find_unknown_id() {
    assert!(find("99").is_none());
    assert!(find("").is_none());
}

#[test]
fn sticker_serializes_as_pair() {
    let json = serde_json::to_value(STICKERS[0]).unwrap();
    assert_eq!(json, serde_json::json!({ "id": "1", "symbol": "😀" }));
}
