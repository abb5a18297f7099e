//! # Economy Configuration
//!
//! Balance data for the whole economy. The compiled-in defaults are the
//! production values; a TOML file with the same shape can override any part
//! of them (`data/economy.toml` mirrors the defaults).
//!
//! Configs are validated once, at load time. Nothing downstream re-checks.

use std::collections::HashSet;
use std::path::Path;

use casebox_shared::{default_cases, default_shop_items, Case, ShopItem, STARTING_BALANCE};
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::tables::{default_basic_case_id, CaseCategory, PriceTable, WeightTable};

/// Blade types a generated knife can roll.
pub const BLADE_TYPES: [&str; 7] = [
    "Karambit",
    "Bayonet",
    "Butterfly Knife",
    "Huntsman Knife",
    "Flip Knife",
    "Dagger",
    "Cleaver",
];

/// Finishes a generated knife can roll.
pub const FINISHES: [&str; 11] = [
    "Gradient",
    "Soot",
    "Marble",
    "Crimson Web",
    "Autotronic",
    "Night",
    "Damascus Steel",
    "Tiger",
    "Waves",
    "Ultraviolet",
    "Colorway",
];

/// Everything the reward engine needs to roll a knife.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Case id that rolls on the basic table.
    pub basic_case_id: String,
    /// Blade type word list.
    pub blade_types: Vec<String>,
    /// Finish word list.
    pub finishes: Vec<String>,
    /// Odds for free cases.
    pub free: WeightTable,
    /// Odds for the basic case.
    pub basic: WeightTable,
    /// Odds for every other paid case.
    pub premium: WeightTable,
    /// Base price per tier.
    pub base_prices: PriceTable,
}

impl RewardConfig {
    /// Weighting table for a category.
    #[must_use]
    pub const fn table(&self, category: CaseCategory) -> &WeightTable {
        match category {
            CaseCategory::Free => &self.free,
            CaseCategory::Basic => &self.basic,
            CaseCategory::Premium => &self.premium,
        }
    }

    /// Validates every table and word list.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` naming the offending section.
    pub fn validate(&self) -> EconomyResult<()> {
        for category in CaseCategory::ALL {
            self.table(category).validate().map_err(|e| {
                EconomyError::InvalidConfig(format!("{} table: {e}", category.as_str()))
            })?;
        }
        self.base_prices.validate()?;

        if self.blade_types.is_empty() {
            return Err(EconomyError::InvalidConfig(
                "blade type list is empty".to_string(),
            ));
        }
        if self.finishes.is_empty() {
            return Err(EconomyError::InvalidConfig("finish list is empty".to_string()));
        }
        if self.basic_case_id.trim().is_empty() {
            return Err(EconomyError::InvalidConfig(
                "basic case id is empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            basic_case_id: default_basic_case_id(),
            blade_types: BLADE_TYPES.iter().map(ToString::to_string).collect(),
            finishes: FINISHES.iter().map(ToString::to_string).collect(),
            free: WeightTable::for_category(CaseCategory::Free),
            basic: WeightTable::for_category(CaseCategory::Basic),
            premium: WeightTable::for_category(CaseCategory::Premium),
            base_prices: PriceTable::default(),
        }
    }
}

/// Full economy configuration: starting balance, catalogs and reward tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Balance of a fresh profile.
    pub starting_balance: i64,
    /// Reward engine tables.
    pub rewards: RewardConfig,
    /// Openable cases.
    pub cases: Vec<Case>,
    /// Shop shelf.
    pub shop: Vec<ShopItem>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            rewards: RewardConfig::default(),
            cases: default_cases(),
            shop: default_shop_items(),
        }
    }
}

impl EconomyConfig {
    /// Parses and validates a TOML document.
    ///
    /// Missing sections fall back to the compiled-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the document does not parse
    /// or fails validation.
    pub fn from_toml_str(source: &str) -> EconomyResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| EconomyError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the file cannot be read,
    /// does not parse, or fails validation.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            EconomyError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> EconomyResult<String> {
        toml::to_string(self)
            .map_err(|e| EconomyError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Validates balance, catalogs and reward tables.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` describing the first problem.
    pub fn validate(&self) -> EconomyResult<()> {
        if self.starting_balance < 0 {
            return Err(EconomyError::InvalidConfig(format!(
                "starting balance must not be negative, got {}",
                self.starting_balance
            )));
        }

        let mut case_ids = HashSet::new();
        for case in &self.cases {
            if !case_ids.insert(case.id.as_str()) {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate case id: {}",
                    case.id
                )));
            }
        }

        let mut shop_ids = HashSet::new();
        for item in &self.shop {
            if !shop_ids.insert(item.id.as_str()) {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate shop item id: {}",
                    item.id
                )));
            }
            if item.price == 0 {
                return Err(EconomyError::InvalidConfig(format!(
                    "shop item {} must have a positive price",
                    item.id
                )));
            }
            if item.purchased {
                return Err(EconomyError::InvalidConfig(format!(
                    "shop item {} is marked purchased",
                    item.id
                )));
            }
        }

        self.rewards.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebox_shared::Rarity;

    const SHIPPED_CONFIG: &str = include_str!("../data/economy.toml");

    #[test]
    fn test_default_config_is_valid() {
        EconomyConfig::default().validate().unwrap();
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = EconomyConfig::from_toml_str(SHIPPED_CONFIG).unwrap();
        assert_eq!(config, EconomyConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EconomyConfig::from_toml_str("starting_balance = 5000\n").unwrap();
        assert_eq!(config.starting_balance, 5000);
        assert_eq!(config.cases, default_cases());
        assert_eq!(config.rewards, RewardConfig::default());
    }

    #[test]
    fn test_override_single_table() {
        let source = r#"
[rewards.free]
common = 100.0
"#;
        let config = EconomyConfig::from_toml_str(source).unwrap();
        assert_eq!(config.rewards.free.weight(Rarity::Common), 100.0);
        assert_eq!(config.rewards.free.weight(Rarity::Divine), 0.0);
        assert_eq!(config.rewards.basic, WeightTable::for_category(CaseCategory::Basic));
    }

    #[test]
    fn test_rejects_table_not_summing_to_100() {
        let source = r#"
[rewards.premium]
common = 50.0
rare = 10.0
"#;
        let err = EconomyConfig::from_toml_str(source).unwrap_err();
        assert!(err.to_string().contains("premium table"), "{err}");
    }

    #[test]
    fn test_rejects_unknown_rarity_key() {
        let source = r#"
[rewards.free]
shiny = 100.0
"#;
        assert!(matches!(
            EconomyConfig::from_toml_str(source),
            Err(EconomyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_negative_starting_balance() {
        assert!(EconomyConfig::from_toml_str("starting_balance = -1\n").is_err());
    }

    #[test]
    fn test_rejects_duplicate_case_ids() {
        let mut config = EconomyConfig::default();
        let duplicate = config.cases[1].clone();
        config.cases.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_free_or_owned_shop_items() {
        let mut config = EconomyConfig::default();
        config.shop[0].price = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("positive price"), "{err}");

        let mut config = EconomyConfig::default();
        config.shop[2].purchased = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("marked purchased"), "{err}");
    }

    #[test]
    fn test_rejects_empty_word_lists() {
        let mut config = EconomyConfig::default();
        config.rewards.finishes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EconomyConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = EconomyConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file_is_invalid_config() {
        let path = std::env::temp_dir().join("casebox_missing_config_for_test.toml");
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            EconomyConfig::from_toml_file(&path),
            Err(EconomyError::InvalidConfig(_))
        ));
    }
}
