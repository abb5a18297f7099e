//! # CASEBOX Economy
//!
//! Reward generation and the economy store behind the case-opening simulator.
//!
//! ## Design Principles
//!
//! 1. **One writer** - `EconomyStore` owns balance, inventory and catalogs
//! 2. **Injected randomness** - every draw goes through a seedable RNG
//! 3. **Persist after every mutation** - one JSON snapshot, overwritten in place
//! 4. **External configuration** - balance data can live in a TOML file
//!
//! ## Thread Safety
//!
//! `EconomyStore` is `Send + Sync`. One lock guards the whole state, so
//! concurrent callers can share it behind an `Arc`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use casebox_economy::{EconomyStore, MemoryStorage, StoreOptions};
//!
//! let store = EconomyStore::open(MemoryStorage::new(), StoreOptions::default())?;
//! let events = store.subscribe();
//!
//! let knife = store.open_case("basic-case")?;
//! println!("{} ({}) worth {}", knife.name, knife.rarity, knife.price);
//! assert_eq!(store.balance(), 801);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod loot;
pub mod state;
pub mod storage;
pub mod store;
pub mod tables;

pub use config::{EconomyConfig, RewardConfig};
pub use error::{EconomyError, EconomyResult};
pub use events::{EventBus, StoreEvent};
pub use loot::{mint_id, DropStatistics, RewardEngine};
pub use state::EconomyState;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use store::{EconomyStore, StoreOptions};
pub use tables::{CaseCategory, PriceTable, WeightTable};
