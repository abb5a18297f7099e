//! # Default Catalogs
//!
//! Cases and shop stock a fresh profile starts with.

use crate::constants::{PLACEHOLDER_IMAGE, SHOP_SOURCE_LABEL};
use crate::item::{Case, ShopItem};
use crate::rarity::Rarity;

fn case(id: &str, name: &str, price: u64, free: bool) -> Case {
    Case {
        id: id.to_string(),
        name: name.to_string(),
        price,
        image: PLACEHOLDER_IMAGE.to_string(),
        free,
    }
}

fn shop_item(id: &str, name: &str, rarity: Rarity, price: u64) -> ShopItem {
    ShopItem {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        image: PLACEHOLDER_IMAGE.to_string(),
        price,
        source: SHOP_SOURCE_LABEL.to_string(),
        purchased: false,
    }
}

/// The three built-in cases: free, basic and premium.
#[must_use]
pub fn default_cases() -> Vec<Case> {
    vec![
        case("free-case", "Free Case", 0, true),
        case("basic-case", "Basic Case", 199, false),
        case("premium-case", "Premium Case", 699, false),
    ]
}

/// The built-in shop shelf.
#[must_use]
pub fn default_shop_items() -> Vec<ShopItem> {
    vec![
        shop_item("shop-knife-1", "Karambit | Gradient", Rarity::Rare, 799),
        shop_item("shop-knife-2", "Bayonet | Autotronic", Rarity::Epic, 1499),
        shop_item(
            "shop-knife-3",
            "Butterfly Knife | Damascus Steel",
            Rarity::Legendary,
            5999,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASIC_CASE_ID;

    #[test]
    fn test_default_cases() {
        let cases = default_cases();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases.iter().filter(|c| c.free).count(), 1);

        let basic = cases.iter().find(|c| c.id == BASIC_CASE_ID).unwrap();
        assert_eq!(basic.price, 199);
        assert!(!basic.free);
    }

    #[test]
    fn test_shop_items_are_not_marked_purchased() {
        for item in default_shop_items() {
            assert!(!item.purchased, "{} is on the shelf, not owned", item.id);
            assert_eq!(item.source, SHOP_SOURCE_LABEL);
            assert!(item.price > 0);
        }
    }
}
