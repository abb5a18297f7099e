//! # Economy Store
//!
//! Sole owner of a profile's mutable state. Opens cases, buys and sells
//! knives, persists after every mutation and publishes change events.
//!
//! ## Mutation Path
//!
//! ```text
//! open_case("basic-case")
//!        │
//!        ▼
//!  lock state ──> validate (case exists, balance covers price)
//!        │
//!        ▼
//!  RewardEngine::generate_reward ──> debit + push to inventory
//!        │
//!        ▼
//!  write snapshot ──> publish CaseOpened ──> unlock
//! ```
//!
//! A single mutex guards the state and the RNG, so every operation is atomic
//! with respect to every other caller. Snapshots are written and events
//! published before the lock is released, so both follow mutation order.
//!
//! Persistence failures never fail a mutation: they are logged, counted and
//! published as [`StoreEvent::PersistenceFailed`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use casebox_shared::constants::SHOP_PURCHASE_PREFIX;
use casebox_shared::{Case, Knife, ShopItem, STATE_KEY};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::EconomyConfig;
use crate::error::{EconomyError, EconomyResult};
use crate::events::{EventBus, StoreEvent};
use crate::loot::{mint_id, RewardEngine};
use crate::state::EconomyState;
use crate::storage::SnapshotStorage;

/// How to build an [`EconomyStore`].
#[derive(Clone, Debug, Default)]
pub struct StoreOptions {
    /// Balance data and catalogs for a fresh profile.
    pub config: EconomyConfig,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl StoreOptions {
    /// Default config with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            config: EconomyConfig::default(),
            seed: Some(seed),
        }
    }
}

struct StoreInner {
    state: EconomyState,
    rng: ChaCha8Rng,
}

/// The case-opening economy for one profile.
pub struct EconomyStore {
    inner: Mutex<StoreInner>,
    engine: RewardEngine,
    storage: Box<dyn SnapshotStorage>,
    events: EventBus,
    persist_failures: AtomicU64,
}

impl EconomyStore {
    /// Opens the store, hydrating from the `case-store` snapshot if present.
    ///
    /// A missing, unreadable or corrupt snapshot falls back to a fresh
    /// profile built from `options.config`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the config fails validation.
    pub fn open(
        storage: impl SnapshotStorage + 'static,
        options: StoreOptions,
    ) -> EconomyResult<Self> {
        let StoreOptions { config, seed } = options;
        config.validate()?;

        let engine = RewardEngine::new(config.rewards.clone())?;
        let state = hydrate(&storage, EconomyState::from_config(&config));
        let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        info!(
            balance = state.balance,
            items = state.inventory.len(),
            cases = state.cases.len(),
            "economy store opened"
        );

        Ok(Self {
            inner: Mutex::new(StoreInner { state, rng }),
            engine,
            storage: Box::new(storage),
            events: EventBus::new(),
            persist_failures: AtomicU64::new(0),
        })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Opens a case and adds the generated knife to the inventory.
    ///
    /// Free cases cost nothing; paid cases debit their price.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no case has `case_id`
    /// - `InsufficientFunds` if the balance does not cover the price
    /// - `ArithmeticOverflow` if the debit would overflow
    ///
    /// State is untouched on every error.
    pub fn open_case(&self, case_id: &str) -> EconomyResult<Knife> {
        let mut guard = self.inner.lock();
        let StoreInner { state, rng } = &mut *guard;

        let case = state
            .case(case_id)
            .cloned()
            .ok_or_else(|| EconomyError::case_not_found(case_id))?;

        let cost = case.opening_cost();
        if !can_afford(state.balance, cost) {
            return Err(EconomyError::InsufficientFunds {
                required: cost,
                available: state.balance,
            });
        }
        let debit = to_delta(cost)?;

        let issued_at = unix_millis();
        let mut item = self.engine.generate_reward(&case, issued_at, rng);
        while state.contains_item(&item.id) {
            item.id = mint_id(&case.id, issued_at, rng);
        }

        let balance = adjust_balance(state, -debit)?;
        state.inventory.push(item.clone());
        self.persist(state);

        info!(
            case_id,
            item_id = %item.id,
            rarity = %item.rarity,
            price = item.price,
            balance,
            "case opened"
        );
        self.events.publish(&StoreEvent::CaseOpened {
            case_id: case.id,
            item: item.clone(),
            balance,
        });

        Ok(item)
    }

    /// Sells an owned knife for its price and removes it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no owned knife has `item_id`
    /// - `NotSellable` if the knife was bought from the shop
    /// - `ArithmeticOverflow` if the credit would overflow
    pub fn sell_item(&self, item_id: &str) -> EconomyResult<Knife> {
        let mut guard = self.inner.lock();
        let state = &mut guard.state;

        let position = state
            .item_position(item_id)
            .ok_or_else(|| EconomyError::item_not_found(item_id))?;
        let item = &state.inventory[position];
        if !item.is_sellable() {
            return Err(EconomyError::NotSellable(item.id.clone()));
        }
        let credit = to_delta(item.price)?;

        let balance = adjust_balance(state, credit)?;
        let item = state.inventory.remove(position);
        self.persist(state);

        info!(item_id, price = item.price, balance, "item sold");
        self.events.publish(&StoreEvent::ItemSold {
            item: item.clone(),
            balance,
        });

        Ok(item)
    }

    /// Buys a copy of a shop knife.
    ///
    /// Returns `Ok(false)` without touching state when the balance does not
    /// cover the price. The bought knife is marked purchased and can never
    /// be sold.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no shop item has `shop_item_id`
    /// - `ArithmeticOverflow` if the debit would overflow
    pub fn buy_item(&self, shop_item_id: &str) -> EconomyResult<bool> {
        let mut guard = self.inner.lock();
        let StoreInner { state, rng } = &mut *guard;

        let listing = state
            .shop_item(shop_item_id)
            .cloned()
            .ok_or_else(|| EconomyError::shop_item_not_found(shop_item_id))?;

        if !can_afford(state.balance, listing.price) {
            debug!(
                shop_item_id,
                price = listing.price,
                balance = state.balance,
                "purchase declined"
            );
            return Ok(false);
        }
        let debit = to_delta(listing.price)?;

        let issued_at = unix_millis();
        let prefix = format!("{SHOP_PURCHASE_PREFIX}-{}", listing.id);
        let mut id = mint_id(&prefix, issued_at, rng);
        while state.contains_item(&id) {
            id = mint_id(&prefix, issued_at, rng);
        }

        let balance = adjust_balance(state, -debit)?;
        let item = Knife {
            id,
            purchased: true,
            ..listing
        };
        state.inventory.push(item.clone());
        self.persist(state);

        info!(shop_item_id, item_id = %item.id, price = item.price, balance, "item bought");
        self.events.publish(&StoreEvent::ItemBought { item, balance });

        Ok(true)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.inner.lock().state.balance
    }

    /// Owned knives in acquisition order.
    #[must_use]
    pub fn inventory(&self) -> Vec<Knife> {
        self.inner.lock().state.inventory.clone()
    }

    /// Owned knives, rarest first. Equal tiers keep acquisition order.
    #[must_use]
    pub fn inventory_by_rarity(&self) -> Vec<Knife> {
        let mut items = self.inventory();
        items.sort_by(|a, b| b.rarity.cmp(&a.rarity));
        items
    }

    /// Sum of owned knife prices.
    #[must_use]
    pub fn inventory_value(&self) -> u64 {
        self.inner.lock().state.inventory_value()
    }

    /// Owned knife with `id`.
    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<Knife> {
        self.inner.lock().state.find_item(id).cloned()
    }

    /// All cases.
    #[must_use]
    pub fn cases(&self) -> Vec<Case> {
        self.inner.lock().state.cases.clone()
    }

    /// Cases that cost balance to open.
    #[must_use]
    pub fn purchasable_cases(&self) -> Vec<Case> {
        self.inner
            .lock()
            .state
            .cases
            .iter()
            .filter(|c| !c.free)
            .cloned()
            .collect()
    }

    /// The shop shelf.
    #[must_use]
    pub fn shop_items(&self) -> Vec<ShopItem> {
        self.inner.lock().state.shop_knives.clone()
    }

    /// Copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> EconomyState {
        self.inner.lock().state.clone()
    }

    /// The engine rolling rewards.
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &RewardEngine {
        &self.engine
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Subscribes to every future [`StoreEvent`].
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Snapshot writes that failed since the store was opened.
    #[must_use]
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    fn persist(&self, state: &EconomyState) {
        let written = state
            .to_json()
            .and_then(|json| self.storage.write(STATE_KEY, &json));

        if let Err(e) = written {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
            warn!(error = %e, "failed to persist economy snapshot");
            self.events.publish(&StoreEvent::PersistenceFailed {
                reason: e.to_string(),
            });
        }
    }
}

/// Loads the snapshot under [`STATE_KEY`], or `defaults` if there is none
/// usable.
fn hydrate(storage: &dyn SnapshotStorage, defaults: EconomyState) -> EconomyState {
    match storage.read(STATE_KEY) {
        Ok(Some(json)) => match EconomyState::from_json(&json, defaults.clone()) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "discarding corrupt economy snapshot");
                defaults
            }
        },
        Ok(None) => defaults,
        Err(e) => {
            warn!(error = %e, "economy snapshot unreadable, starting fresh");
            defaults
        }
    }
}

/// Applies `delta` to the balance and returns the new balance.
fn adjust_balance(state: &mut EconomyState, delta: i64) -> EconomyResult<i64> {
    let balance = state
        .balance
        .checked_add(delta)
        .ok_or(EconomyError::ArithmeticOverflow)?;
    state.balance = balance;
    Ok(balance)
}

fn can_afford(balance: i64, cost: u64) -> bool {
    cost == 0 || u64::try_from(balance).is_ok_and(|b| b >= cost)
}

fn to_delta(amount: u64) -> EconomyResult<i64> {
    i64::try_from(amount).map_err(|_| EconomyError::ArithmeticOverflow)
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
