//! # Economy Constants
//!
//! Values baked into every build. Changing them changes what a fresh
//! profile looks like, not what existing snapshots contain.

/// Balance of a brand new profile.
pub const STARTING_BALANCE: i64 = 1000;

/// Storage key the whole economy snapshot is written under.
pub const STATE_KEY: &str = "case-store";

/// Image reference used until real artwork is wired in.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Source label stamped on everything sold by the shop.
pub const SHOP_SOURCE_LABEL: &str = "Shop";

/// Id of the case that rolls on the basic weighting table.
pub const BASIC_CASE_ID: &str = "basic-case";

/// Prefix of inventory ids minted by shop purchases.
pub const SHOP_PURCHASE_PREFIX: &str = "bought";
