//! # Reward Engine
//!
//! Turns a case and a randomness source into a freshly generated knife.
//!
//! The engine owns no mutable state. Every draw comes from the injected RNG,
//! so a seeded generator reproduces the same rarity, price, name and id.
//!
//! ## Draw Order
//!
//! 1. Rarity roll, uniform in `[0, 100)` against the case's weighting table
//! 2. Price jitter, uniform in `[0.8, 1.2]`
//! 3. Blade type
//! 4. Finish
//! 5. Id suffix
//!
//! Reordering these changes every seeded result.

use casebox_shared::{Case, Knife, Rarity};
use rand::Rng;
use tracing::debug;

use crate::config::RewardConfig;
use crate::error::EconomyResult;
use crate::tables::{CaseCategory, WeightTable, WEIGHT_TOTAL};

/// Lower bound of the price jitter factor.
pub const PRICE_JITTER_MIN: f64 = 0.8;

/// Upper bound of the price jitter factor.
pub const PRICE_JITTER_MAX: f64 = 1.2;

/// Length of the random id suffix.
pub const ID_SUFFIX_LEN: usize = 7;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Builds an item id: `"<prefix>-<issued_at_ms>-<suffix>"`.
///
/// The suffix is [`ID_SUFFIX_LEN`] lowercase alphanumeric characters.
#[must_use]
pub fn mint_id<R: Rng>(prefix: &str, issued_at_ms: u64, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("{prefix}-{issued_at_ms}-{suffix}")
}

/// Generates rewards from validated tables.
#[derive(Clone, Debug, Default)]
pub struct RewardEngine {
    config: RewardConfig,
}

impl RewardEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if any table or word list is
    /// unusable.
    pub fn new(config: RewardConfig) -> EconomyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The tables this engine rolls on.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Which table `case` rolls on.
    #[must_use]
    pub fn category_of(&self, case: &Case) -> CaseCategory {
        CaseCategory::classify(&case.id, case.free, &self.config.basic_case_id)
    }

    /// Weighting table for `category`.
    #[inline]
    #[must_use]
    pub const fn table(&self, category: CaseCategory) -> &WeightTable {
        self.config.table(category)
    }

    /// Draws a rarity for `category`.
    pub fn roll_rarity<R: Rng>(&self, category: CaseCategory, rng: &mut R) -> Rarity {
        let roll = rng.gen_range(0.0..WEIGHT_TOTAL);
        self.table(category).select(roll)
    }

    /// Draws a jittered price for `rarity`. Always at least 1.
    pub fn roll_price<R: Rng>(&self, rarity: Rarity, rng: &mut R) -> u64 {
        let factor = rng.gen_range(PRICE_JITTER_MIN..=PRICE_JITTER_MAX);
        self.config.base_prices.jittered(rarity, factor)
    }

    /// Draws a `"<Type> | <Finish>"` display name.
    pub fn roll_name<R: Rng>(&self, rng: &mut R) -> String {
        let blades = &self.config.blade_types;
        let finishes = &self.config.finishes;
        let blade = &blades[rng.gen_range(0..blades.len())];
        let finish = &finishes[rng.gen_range(0..finishes.len())];
        format!("{blade} | {finish}")
    }

    /// Generates the knife `case` yields.
    ///
    /// The id is minted from the case id and `issued_at_ms`; the knife's
    /// source is the case name.
    pub fn generate_reward<R: Rng>(&self, case: &Case, issued_at_ms: u64, rng: &mut R) -> Knife {
        let category = self.category_of(case);
        let rarity = self.roll_rarity(category, rng);
        let price = self.roll_price(rarity, rng);
        let name = self.roll_name(rng);
        let id = mint_id(&case.id, issued_at_ms, rng);

        debug!(
            case_id = %case.id,
            category = category.as_str(),
            %rarity,
            price,
            "rolled reward"
        );

        Knife {
            id,
            name,
            rarity,
            image: case.image.clone(),
            price,
            source: case.name.clone(),
            purchased: false,
        }
    }

    /// Rolls `samples` rarities on `category` and tallies them.
    pub fn run_statistics<R: Rng>(
        &self,
        category: CaseCategory,
        samples: u64,
        rng: &mut R,
    ) -> DropStatistics {
        let mut stats = DropStatistics::new(category);
        for _ in 0..samples {
            stats.record(self.roll_rarity(category, rng));
        }
        stats
    }
}

/// Observed rarity distribution from a batch of rolls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropStatistics {
    /// Table the rolls were made on.
    pub category: CaseCategory,
    /// Total rolls.
    pub samples: u64,
    /// Hits per tier, commonest first.
    pub counts: [u64; Rarity::COUNT],
}

impl DropStatistics {
    /// Empty tally for `category`.
    #[must_use]
    pub const fn new(category: CaseCategory) -> Self {
        Self {
            category,
            samples: 0,
            counts: [0; Rarity::COUNT],
        }
    }

    /// Adds one roll.
    pub fn record(&mut self, rarity: Rarity) {
        self.samples += 1;
        self.counts[rarity.index()] += 1;
    }

    /// Hits for `rarity`.
    #[inline]
    #[must_use]
    pub const fn count(&self, rarity: Rarity) -> u64 {
        self.counts[rarity.index()]
    }

    /// Observed share of `rarity`, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, rarity: Rarity) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.count(rarity) as f64 / self.samples as f64 * 100.0
        }
    }
}
