//! # Rarity Tiers
//!
//! Nine ordered tiers, commonest first. The declaration order is load-bearing:
//! weighting tables are walked in this order and inventories sort by it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rarity tier of a knife.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Rarity {
    /// Gray tier, the bulk of every case.
    Common = 0,
    /// One step above common.
    Uncommon = 1,
    /// Rare.
    Rare = 2,
    /// Epic.
    Epic = 3,
    /// Mythic.
    Mythic = 4,
    /// Legendary.
    Legendary = 5,
    /// Gold.
    Gold = 6,
    /// Titan.
    Titan = 7,
    /// Divine - the rarest tier.
    Divine = 8,
}

impl Rarity {
    /// Number of tiers.
    pub const COUNT: usize = 9;

    /// Every tier in ascending order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Mythic,
        Self::Legendary,
        Self::Gold,
        Self::Titan,
        Self::Divine,
    ];

    /// Position of this tier in [`Rarity::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tier at `index`, if any.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Stable lowercase keyword, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Mythic => "mythic",
            Self::Legendary => "legendary",
            Self::Gold => "gold",
            Self::Titan => "titan",
            Self::Divine => "divine",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no rarity tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown rarity tier: {0}")]
pub struct ParseRarityError(pub String);

impl FromStr for Rarity {
    type Err = ParseRarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRarityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
        assert_eq!(Rarity::ALL.iter().min(), Some(&Rarity::Common));
        assert_eq!(Rarity::ALL.iter().max(), Some(&Rarity::Divine));
    }

    #[test]
    fn test_index_matches_declaration() {
        for (i, rarity) in Rarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), i);
            assert_eq!(Rarity::from_index(i), Some(*rarity));
        }
        assert_eq!(Rarity::from_index(Rarity::COUNT), None);
    }

    #[test]
    fn test_parse_keyword() {
        assert_eq!("gold".parse::<Rarity>(), Ok(Rarity::Gold));
        assert_eq!(" Divine ".parse::<Rarity>(), Ok(Rarity::Divine));
        assert!("shiny".parse::<Rarity>().is_err());
    }

    #[test]
    fn test_serialized_form_is_lowercase() {
        let json = serde_json::to_string(&Rarity::Legendary).unwrap();
        assert_eq!(json, "\"legendary\"");

        let back: Rarity = serde_json::from_str("\"titan\"").unwrap();
        assert_eq!(back, Rarity::Titan);
    }
}
