//! # Knives and Cases
//!
//! Field names follow the persisted snapshot layout (`fromCase`, `isFree`),
//! so a snapshot written by any earlier build keeps loading.

use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_IMAGE;
use crate::rarity::Rarity;

/// A collectible reward sitting in an inventory or on a shop shelf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "KnifeRecord")]
pub struct Knife {
    /// Globally unique id.
    pub id: String,
    /// Display name, `"<Type> | <Finish>"`.
    pub name: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Image reference for the presentation layer.
    pub image: String,
    /// Sell-back value in coins.
    pub price: u64,
    /// Where the knife came from (case name or the shop).
    #[serde(rename = "fromCase")]
    pub source: String,
    /// Bought from the shop. Purchased knives can never be sold.
    ///
    /// Older snapshots marked shop purchases with `fromShop`; either flag
    /// marks the knife purchased.
    pub purchased: bool,
}

/// On-disk form of a [`Knife`], accepting `purchased`, `fromShop` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnifeRecord {
    id: String,
    name: String,
    rarity: Rarity,
    #[serde(default = "placeholder_image")]
    image: String,
    price: u64,
    #[serde(rename = "fromCase", default)]
    source: String,
    #[serde(default)]
    purchased: bool,
    #[serde(default)]
    from_shop: bool,
}

impl From<KnifeRecord> for Knife {
    fn from(record: KnifeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            rarity: record.rarity,
            image: record.image,
            price: record.price,
            source: record.source,
            purchased: record.purchased || record.from_shop,
        }
    }
}

impl Knife {
    /// Whether the knife may be sold back for its price.
    #[inline]
    #[must_use]
    pub const fn is_sellable(&self) -> bool {
        !self.purchased
    }
}

/// Items offered by the shop are knives with a fixed price.
pub type ShopItem = Knife;

/// An openable case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Catalog id, e.g. `basic-case`.
    pub id: String,
    /// Display name, stamped on every knife the case produces.
    pub name: String,
    /// Cost to open. Ignored when the case is free.
    pub price: u64,
    /// Image reference for the presentation layer.
    #[serde(default = "placeholder_image")]
    pub image: String,
    /// Opens without spending balance.
    #[serde(rename = "isFree", default)]
    pub free: bool,
}

impl Case {
    /// Amount debited when this case is opened.
    #[inline]
    #[must_use]
    pub const fn opening_cost(&self) -> u64 {
        if self.free {
            0
        } else {
            self.price
        }
    }
}

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_knife() -> Knife {
        Knife {
            id: "basic-case-1700000000000-a1b2c3d".to_string(),
            name: "Karambit | Night".to_string(),
            rarity: Rarity::Epic,
            image: PLACEHOLDER_IMAGE.to_string(),
            price: 1234,
            source: "Basic Case".to_string(),
            purchased: false,
        }
    }

    #[test]
    fn test_knife_json_layout() {
        let json = serde_json::to_value(sample_knife()).unwrap();
        assert_eq!(json["fromCase"], "Basic Case");
        assert_eq!(json["rarity"], "epic");
        assert_eq!(json["price"], 1234);
        assert_eq!(json["purchased"], false);
    }

    #[test]
    fn test_legacy_from_shop_flag_means_purchased() {
        let json = r#"{
            "id": "bought-shop-knife-1-1700000000000",
            "name": "Karambit | Gradient",
            "rarity": "rare",
            "image": "/placeholder.svg",
            "price": 799,
            "fromCase": "Shop",
            "fromShop": true
        }"#;
        let knife: Knife = serde_json::from_str(json).unwrap();
        assert!(knife.purchased);
        assert!(!knife.is_sellable());
    }

    #[test]
    fn test_both_purchase_flags_load() {
        let json = r#"{
            "id": "bought-shop-knife-2-1700000000000",
            "name": "Bayonet | Autotronic",
            "rarity": "epic",
            "image": "/placeholder.svg",
            "price": 1499,
            "fromCase": "Shop",
            "purchased": false,
            "fromShop": true
        }"#;
        let knife: Knife = serde_json::from_str(json).unwrap();
        assert!(knife.purchased);

        let reserialized = serde_json::to_value(&knife).unwrap();
        assert_eq!(reserialized["purchased"], true);
        assert!(reserialized.get("fromShop").is_none());
    }

    #[test]
    fn test_missing_purchased_defaults_to_sellable() {
        let json = r#"{"id":"x","name":"Dagger | Soot","rarity":"common","price":50}"#;
        let knife: Knife = serde_json::from_str(json).unwrap();
        assert!(knife.is_sellable());
        assert_eq!(knife.image, PLACEHOLDER_IMAGE);
        assert!(knife.source.is_empty());
    }

    #[test]
    fn test_case_opening_cost() {
        let mut case = Case {
            id: "free-case".to_string(),
            name: "Free Case".to_string(),
            price: 500,
            image: PLACEHOLDER_IMAGE.to_string(),
            free: true,
        };
        assert_eq!(case.opening_cost(), 0);

        case.free = false;
        assert_eq!(case.opening_cost(), 500);
    }

    #[test]
    fn test_case_is_free_key() {
        let json = r#"{"id":"free-case","name":"Free Case","price":0,"image":"/placeholder.svg","isFree":true}"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert!(case.free);

        let json = r#"{"id":"basic-case","name":"Basic Case","price":199,"image":"/placeholder.svg"}"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert!(!case.free);
    }
}
