//! # CASEBOX Shared
//!
//! The data model every part of the case-opening economy agrees on:
//! rarity tiers, knives, cases and the default catalogs.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - random number generators
//! - file or network IO
//! - anything that decides *what* drops
//!
//! Reward generation and state ownership live in `casebox_economy`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod constants;
pub mod item;
pub mod rarity;

pub use catalog::{default_cases, default_shop_items};
pub use constants::{PLACEHOLDER_IMAGE, SHOP_SOURCE_LABEL, STARTING_BALANCE, STATE_KEY};
pub use item::{Case, Knife, ShopItem};
pub use rarity::{ParseRarityError, Rarity};
