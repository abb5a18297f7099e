//! # Economy State
//!
//! The complete mutable state of one profile and its JSON snapshot codec.
//!
//! ## Snapshot Layout
//!
//! ```json
//! { "inventory": [...], "balance": 1000, "cases": [...], "shopKnives": [...] }
//! ```
//!
//! Hydration is a partial merge: any top-level field missing from a snapshot
//! keeps its default value.

use casebox_shared::{Case, Knife, ShopItem};
use serde::{Deserialize, Serialize};

use crate::config::EconomyConfig;
use crate::error::{EconomyError, EconomyResult};

/// Balance, inventory and catalogs of one profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyState {
    /// Owned knives in acquisition order.
    pub inventory: Vec<Knife>,
    /// Coin balance. Never negative after a successful operation.
    pub balance: i64,
    /// Openable cases.
    pub cases: Vec<Case>,
    /// Shop shelf.
    pub shop_knives: Vec<ShopItem>,
}

/// Snapshot with every top-level field optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotPatch {
    inventory: Option<Vec<Knife>>,
    balance: Option<i64>,
    cases: Option<Vec<Case>>,
    shop_knives: Option<Vec<ShopItem>>,
}

impl EconomyState {
    /// Fresh state: starting balance, empty inventory, configured catalogs.
    #[must_use]
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self {
            inventory: Vec::new(),
            balance: config.starting_balance,
            cases: config.cases.clone(),
            shop_knives: config.shop.clone(),
        }
    }

    /// Encodes the state as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Snapshot` if encoding fails.
    pub fn to_json(&self) -> EconomyResult<String> {
        serde_json::to_string(self).map_err(|e| EconomyError::Snapshot(e.to_string()))
    }

    /// Decodes a snapshot, filling missing fields from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Snapshot` if `json` is not a valid snapshot.
    pub fn from_json(json: &str, defaults: Self) -> EconomyResult<Self> {
        let patch: SnapshotPatch =
            serde_json::from_str(json).map_err(|e| EconomyError::Snapshot(e.to_string()))?;

        Ok(Self {
            inventory: patch.inventory.unwrap_or(defaults.inventory),
            balance: patch.balance.unwrap_or(defaults.balance),
            cases: patch.cases.unwrap_or(defaults.cases),
            shop_knives: patch.shop_knives.unwrap_or(defaults.shop_knives),
        })
    }

    /// Looks up a case by id.
    #[must_use]
    pub fn case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Looks up a shop item by id.
    #[must_use]
    pub fn shop_item(&self, id: &str) -> Option<&ShopItem> {
        self.shop_knives.iter().find(|k| k.id == id)
    }

    /// Looks up an owned knife by id.
    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<&Knife> {
        self.inventory.iter().find(|k| k.id == id)
    }

    /// Inventory index of the knife with `id`.
    #[must_use]
    pub fn item_position(&self, id: &str) -> Option<usize> {
        self.inventory.iter().position(|k| k.id == id)
    }

    /// Whether an owned knife already uses `id`.
    #[must_use]
    pub fn contains_item(&self, id: &str) -> bool {
        self.item_position(id).is_some()
    }

    /// Sum of all owned knife prices, saturating.
    #[must_use]
    pub fn inventory_value(&self) -> u64 {
        self.inventory
            .iter()
            .fold(0u64, |total, k| total.saturating_add(k.price))
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::from_config(&EconomyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebox_shared::{default_cases, default_shop_items, Rarity, STARTING_BALANCE};

    fn knife(id: &str, price: u64) -> Knife {
        Knife {
            id: id.to_string(),
            name: "Flip Knife | Tiger".to_string(),
            rarity: Rarity::Uncommon,
            image: "/placeholder.svg".to_string(),
            price,
            source: "Free Case".to_string(),
            purchased: false,
        }
    }

    #[test]
    fn test_default_state() {
        let state = EconomyState::default();
        assert_eq!(state.balance, STARTING_BALANCE);
        assert!(state.inventory.is_empty());
        assert_eq!(state.cases, default_cases());
        assert_eq!(state.shop_knives, default_shop_items());
    }

    #[test]
    fn test_snapshot_layout() {
        let json = EconomyState::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["inventory", "balance", "cases", "shopKnives"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["cases"][0]["isFree"], true);
    }

    #[test]
    fn test_round_trip() {
        let mut state = EconomyState::default();
        state.balance = 4321;
        state.inventory.push(knife("a", 120));
        state.inventory.push(knife("b", 9_007_199_254_740_993));

        let back = EconomyState::from_json(&state.to_json().unwrap(), EconomyState::default())
            .unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_partial_snapshot_merges_defaults() {
        let back = EconomyState::from_json(r#"{"balance": 77}"#, EconomyState::default()).unwrap();
        assert_eq!(back.balance, 77);
        assert!(back.inventory.is_empty());
        assert_eq!(back.cases, default_cases());
        assert_eq!(back.shop_knives, default_shop_items());
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() {
        let err = EconomyState::from_json("{not json", EconomyState::default()).unwrap_err();
        assert!(matches!(err, EconomyError::Snapshot(_)));
    }

    #[test]
    fn test_lookups_and_value() {
        let mut state = EconomyState::default();
        state.inventory.push(knife("a", 100));
        state.inventory.push(knife("b", 250));

        assert_eq!(state.item_position("b"), Some(1));
        assert!(state.contains_item("a"));
        assert!(state.find_item("zzz").is_none());
        assert_eq!(state.inventory_value(), 350);
        assert!(state.case("premium-case").is_some());
        assert!(state.shop_item("shop-knife-2").is_some());

        state.inventory.push(knife("c", u64::MAX));
        assert_eq!(state.inventory_value(), u64::MAX);
    }
}
