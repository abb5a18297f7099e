//! # Weighting and Price Tables
//!
//! Hard-coded balance data for the reward engine:
//!
//! - one weighting table per case category (nine percentages, sum 100)
//! - one base price per rarity tier
//!
//! Tables serialize as `rarity -> value` maps so they can be overridden from
//! TOML without caring about array positions.

use std::collections::BTreeMap;

use casebox_shared::constants::BASIC_CASE_ID;
use casebox_shared::Rarity;
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// Allowed drift of a weighting table's sum from 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Every weighting table must add up to this.
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Free case odds, commonest tier first.
pub const FREE_CASE_WEIGHTS: [f64; Rarity::COUNT] =
    [70.0, 20.0, 7.0, 2.0, 0.8, 0.15, 0.04, 0.007, 0.003];

/// Basic case odds.
pub const BASIC_CASE_WEIGHTS: [f64; Rarity::COUNT] =
    [45.0, 30.0, 15.0, 6.0, 3.0, 0.7, 0.2, 0.09, 0.01];

/// Premium case odds (every paid case that is not the basic one).
pub const PREMIUM_CASE_WEIGHTS: [f64; Rarity::COUNT] =
    [25.0, 30.0, 25.0, 12.0, 5.0, 2.0, 0.7, 0.2, 0.1];

/// Base coin value per tier, before jitter.
pub const BASE_PRICES: [u64; Rarity::COUNT] =
    [50, 150, 450, 1200, 3000, 7500, 15_000, 30_000, 100_000];

/// Which weighting table a case rolls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseCategory {
    /// Free cases.
    Free,
    /// The basic paid case.
    Basic,
    /// Every other paid case.
    Premium,
}

impl CaseCategory {
    /// All categories.
    pub const ALL: [Self; 3] = [Self::Free, Self::Basic, Self::Premium];

    /// Picks the category for a case. The free flag wins over the id.
    #[must_use]
    pub fn classify(case_id: &str, free: bool, basic_case_id: &str) -> Self {
        if free {
            Self::Free
        } else if case_id == basic_case_id {
            Self::Basic
        } else {
            Self::Premium
        }
    }

    /// Lowercase keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }
}

/// Nine percentage weights, one per rarity tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct WeightTable {
    weights: [f64; Rarity::COUNT],
}

impl WeightTable {
    /// Creates a table from weights in ascending rarity order.
    #[must_use]
    pub const fn new(weights: [f64; Rarity::COUNT]) -> Self {
        Self { weights }
    }

    /// The built-in table for `category`.
    #[must_use]
    pub const fn for_category(category: CaseCategory) -> Self {
        match category {
            CaseCategory::Free => Self::new(FREE_CASE_WEIGHTS),
            CaseCategory::Basic => Self::new(BASIC_CASE_WEIGHTS),
            CaseCategory::Premium => Self::new(PREMIUM_CASE_WEIGHTS),
        }
    }

    /// Weight of a single tier.
    #[inline]
    #[must_use]
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights[rarity.index()]
    }

    /// All weights, commonest tier first.
    #[must_use]
    pub const fn weights(&self) -> &[f64; Rarity::COUNT] {
        &self.weights
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Rejects negative or non-finite weights and sums away from 100.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` describing the first problem.
    pub fn validate(&self) -> EconomyResult<()> {
        for rarity in Rarity::ALL {
            let weight = self.weight(rarity);
            if !weight.is_finite() || weight < 0.0 {
                return Err(EconomyError::InvalidConfig(format!(
                    "weight for {rarity} must be a finite, nonnegative number, got {weight}"
                )));
            }
        }

        let total = self.total();
        if (total - WEIGHT_TOTAL).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EconomyError::InvalidConfig(format!(
                "weights must sum to {WEIGHT_TOTAL}, got {total}"
            )));
        }

        Ok(())
    }

    /// Maps a roll in `[0, 100)` to a tier.
    ///
    /// Tiers are walked commonest first while accumulating weights; the first
    /// tier whose running sum reaches `roll` wins, so a tier owns the interval
    /// `(prior_sum, prior_sum + weight]`. Zero-weight tiers own nothing and are
    /// skipped. A roll past the final sum falls back to `Common`.
    #[must_use]
    pub fn select(&self, roll: f64) -> Rarity {
        let mut accumulated = 0.0;

        for rarity in Rarity::ALL {
            let weight = self.weight(rarity);
            if weight <= 0.0 {
                continue;
            }

            accumulated += weight;
            if accumulated >= roll {
                return rarity;
            }
        }

        Rarity::Common
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightTable {
    type Error = EconomyError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut weights = [0.0; Rarity::COUNT];
        for (key, weight) in map {
            let rarity: Rarity = key
                .parse()
                .map_err(|e| EconomyError::InvalidConfig(format!("{e}")))?;
            weights[rarity.index()] = weight;
        }
        Ok(Self::new(weights))
    }
}

impl From<WeightTable> for BTreeMap<String, f64> {
    fn from(table: WeightTable) -> Self {
        Rarity::ALL
            .iter()
            .map(|r| (r.as_str().to_string(), table.weight(*r)))
            .collect()
    }
}

/// Base coin value per rarity tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, u64>",
    into = "BTreeMap<String, u64>"
)]
pub struct PriceTable {
    prices: [u64; Rarity::COUNT],
}

impl PriceTable {
    /// Creates a table from prices in ascending rarity order.
    #[must_use]
    pub const fn new(prices: [u64; Rarity::COUNT]) -> Self {
        Self { prices }
    }

    /// Base price of a tier.
    #[inline]
    #[must_use]
    pub const fn base_price(&self, rarity: Rarity) -> u64 {
        self.prices[rarity.index()]
    }

    /// Applies a jitter factor and rounds to the nearest coin, never below 1.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn jittered(&self, rarity: Rarity, factor: f64) -> u64 {
        let raw = self.base_price(rarity) as f64 * factor;
        raw.round().max(1.0) as u64
    }

    /// Requires positive prices that never drop as rarity rises.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` describing the first problem.
    pub fn validate(&self) -> EconomyResult<()> {
        let mut previous = 0;
        for rarity in Rarity::ALL {
            let price = self.base_price(rarity);
            if price == 0 {
                return Err(EconomyError::InvalidConfig(format!(
                    "base price for {rarity} must be positive"
                )));
            }
            if price < previous {
                return Err(EconomyError::InvalidConfig(format!(
                    "base price for {rarity} ({price}) is below the tier beneath it ({previous})"
                )));
            }
            previous = price;
        }
        Ok(())
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(BASE_PRICES)
    }
}

impl TryFrom<BTreeMap<String, u64>> for PriceTable {
    type Error = EconomyError;

    fn try_from(map: BTreeMap<String, u64>) -> Result<Self, Self::Error> {
        let mut prices = [0; Rarity::COUNT];
        for (key, price) in map {
            let rarity: Rarity = key
                .parse()
                .map_err(|e| EconomyError::InvalidConfig(format!("{e}")))?;
            prices[rarity.index()] = price;
        }
        Ok(Self::new(prices))
    }
}

impl From<PriceTable> for BTreeMap<String, u64> {
    fn from(table: PriceTable) -> Self {
        Rarity::ALL
            .iter()
            .map(|r| (r.as_str().to_string(), table.base_price(*r)))
            .collect()
    }
}

/// Default id of the case rolling on the basic table.
#[must_use]
pub fn default_basic_case_id() -> String {
    BASIC_CASE_ID.to_string()
}
