//! # Economy Error Types
//!
//! All errors that can occur in the economy system. Every one of them is
//! recoverable at the caller boundary.

use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Attempted to spend more than the current balance.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// The amount required.
        required: u64,
        /// The balance at the time of the attempt.
        available: i64,
    },

    /// A case, inventory item or shop item id does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up (`case`, `item`, `shop item`).
        kind: &'static str,
        /// The id that missed.
        id: String,
    },

    /// Tried to sell a knife bought from the shop.
    #[error("item is not sellable: {0}")]
    NotSellable(String),

    /// Balance arithmetic would overflow.
    #[error("arithmetic overflow in balance calculation")]
    ArithmeticOverflow,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot backend failed to read or write.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Snapshot could not be encoded or decoded.
    #[error("snapshot codec failure: {0}")]
    Snapshot(String),
}

impl EconomyError {
    /// Missing case.
    pub(crate) fn case_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "case",
            id: id.to_string(),
        }
    }

    /// Missing inventory item.
    pub(crate) fn item_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "item",
            id: id.to_string(),
        }
    }

    /// Missing shop item.
    pub(crate) fn shop_item_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "shop item",
            id: id.to_string(),
        }
    }
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
