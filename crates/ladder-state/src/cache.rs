//! Strategy snapshot cache with coalesced refresh.

use crate::error::{StateError, StateResult};
use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ladder_chain::{ChainReader, ChainWriter, StrategyStatus, TxReceipt};
use ladder_core::{DistributionOffer, HumanOrder, Market, MarketKey, Side};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where a strategy's snapshot stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Tracked but never read.
    Unknown,
    /// A read is in flight.
    Loading,
    /// The snapshot reflects the last successful read.
    Loaded,
    /// The last read failed; any earlier snapshot is retained.
    Failed(String),
}

/// One tracked strategy contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub address: Address,
    pub market: MarketKey,
    pub state: LoadState,
    /// Last successful wholesale read, replaced atomically on refresh.
    pub snapshot: Option<StrategyStatus>,
    pub last_update: Option<DateTime<Utc>>,
}

enum RefreshRole {
    Leader(watch::Sender<()>),
    Follower(watch::Receiver<()>),
}

/// Tracks deployed strategies and their cached snapshots.
///
/// Snapshots are immutable between refreshes and replaced wholesale.
/// Concurrent refresh requests for the same strategy coalesce onto one
/// chain read: the first caller becomes the leader, later callers wait
/// on its completion and observe the same result.
pub struct StrategyCache {
    reader: Arc<dyn ChainReader>,
    entries: DashMap<Address, StrategyEntry>,
    /// Insertion order, for stable listing.
    list: RwLock<Vec<Address>>,
    selected: RwLock<Option<Address>>,
    inflight: DashMap<Address, watch::Receiver<()>>,
}

impl StrategyCache {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self {
            reader,
            entries: DashMap::new(),
            list: RwLock::new(Vec::new()),
            selected: RwLock::new(None),
            inflight: DashMap::new(),
        }
    }

    /// Track a strategy and make it the current selection. Re-adding a
    /// known address only re-selects it.
    pub fn add(&self, strategy: Address, market: MarketKey) {
        if let Entry::Vacant(slot) = self.entries.entry(strategy) {
            slot.insert(StrategyEntry {
                address: strategy,
                market,
                state: LoadState::Unknown,
                snapshot: None,
                last_update: None,
            });
            self.list.write().push(strategy);
            info!(%strategy, %market, "tracking strategy");
        }
        *self.selected.write() = Some(strategy);
    }

    pub fn select(&self, strategy: Address) -> StateResult<()> {
        if !self.entries.contains_key(&strategy) {
            return Err(StateError::UnknownStrategy(strategy));
        }
        *self.selected.write() = Some(strategy);
        Ok(())
    }

    pub fn selected(&self) -> Option<Address> {
        *self.selected.read()
    }

    /// Tracked strategies in insertion order.
    pub fn strategies(&self) -> Vec<Address> {
        self.list.read().clone()
    }

    pub fn entry(&self, strategy: Address) -> Option<StrategyEntry> {
        self.entries.get(&strategy).map(|e| e.clone())
    }

    /// Cached snapshot, if any read has ever succeeded.
    pub fn status(&self, strategy: Address) -> Option<StrategyStatus> {
        self.entries
            .get(&strategy)
            .and_then(|e| e.snapshot.clone())
    }

    pub fn load_state(&self, strategy: Address) -> LoadState {
        self.entries
            .get(&strategy)
            .map(|e| e.state.clone())
            .unwrap_or(LoadState::Unknown)
    }

    /// The selected strategy's live resting orders in display form, for
    /// cross-referencing onto the aggregated book.
    pub fn selected_live_orders(&self, market: &Market) -> StateResult<Vec<HumanOrder>> {
        let Some(strategy) = self.selected() else {
            return Ok(Vec::new());
        };
        let Some(status) = self.status(strategy) else {
            return Ok(Vec::new());
        };
        let mut orders = Vec::new();
        for side in [Side::Bid, Side::Ask] {
            for raw in status.live_orders(side) {
                orders.push(HumanOrder::from_raw(raw, market)?);
            }
        }
        Ok(orders)
    }

    /// Re-read one strategy's snapshot from the chain.
    ///
    /// At most one chain read is in flight per strategy; callers that
    /// arrive while one is running wait for it instead of issuing their
    /// own. On failure the previous snapshot is retained and the entry
    /// moves to [`LoadState::Failed`].
    pub async fn refresh(&self, strategy: Address) -> StateResult<()> {
        if !self.entries.contains_key(&strategy) {
            return Err(StateError::UnknownStrategy(strategy));
        }
        match self.join_or_lead(strategy) {
            RefreshRole::Follower(mut done) => {
                // A send or a dropped leader both wake us
                let _ = done.changed().await;
                self.settled_result(strategy)
            }
            RefreshRole::Leader(done) => {
                self.set_state(strategy, LoadState::Loading);
                debug!(%strategy, "refreshing strategy snapshot");
                let result = self.reader.strategy_status(strategy).await;
                self.apply_read(strategy, result);
                self.inflight.remove(&strategy);
                let _ = done.send(());
                self.settled_result(strategy)
            }
        }
    }

    /// Deploy a strategy for `market`, track it, and load its first
    /// snapshot.
    pub async fn create(
        &self,
        writer: &dyn ChainWriter,
        market: MarketKey,
    ) -> StateResult<Address> {
        let strategy = writer.create_strategy(market).await?;
        info!(%strategy, %market, "strategy deployed");
        self.add(strategy, market);
        self.refresh(strategy).await?;
        Ok(strategy)
    }

    /// Post a distribution onto a tracked strategy, then refresh it.
    pub async fn populate(
        &self,
        writer: &dyn ChainWriter,
        strategy: Address,
        bids: Vec<DistributionOffer>,
        asks: Vec<DistributionOffer>,
    ) -> StateResult<TxReceipt> {
        if !self.entries.contains_key(&strategy) {
            return Err(StateError::UnknownStrategy(strategy));
        }
        let receipt = writer.populate(strategy, bids, asks).await?;
        if !receipt.success {
            warn!(%strategy, tx = %receipt.tx_hash, "populate reverted");
            return Err(StateError::TxReverted(receipt.tx_hash));
        }
        info!(%strategy, block = receipt.block_number, "populate confirmed");
        self.refresh(strategy).await?;
        Ok(receipt)
    }

    /// Retract offers in `[from_index, to_index)`, then refresh.
    pub async fn retract(
        &self,
        writer: &dyn ChainWriter,
        strategy: Address,
        from_index: u32,
        to_index: u32,
        recipient: Address,
    ) -> StateResult<TxReceipt> {
        if !self.entries.contains_key(&strategy) {
            return Err(StateError::UnknownStrategy(strategy));
        }
        let receipt = writer
            .retract(strategy, from_index, to_index, recipient)
            .await?;
        if !receipt.success {
            warn!(%strategy, tx = %receipt.tx_hash, "retract reverted");
            return Err(StateError::TxReverted(receipt.tx_hash));
        }
        info!(%strategy, block = receipt.block_number, "retract confirmed");
        self.refresh(strategy).await?;
        Ok(receipt)
    }

    /// Become the leader for `strategy`, or join the in-flight read.
    /// Synchronous so no map guard lives across an await.
    fn join_or_lead(&self, strategy: Address) -> RefreshRole {
        match self.inflight.entry(strategy) {
            Entry::Occupied(running) => RefreshRole::Follower(running.get().clone()),
            Entry::Vacant(slot) => {
                let (tx, rx) = watch::channel(());
                slot.insert(rx);
                RefreshRole::Leader(tx)
            }
        }
    }

    fn set_state(&self, strategy: Address, state: LoadState) {
        if let Some(mut entry) = self.entries.get_mut(&strategy) {
            entry.state = state;
        }
    }

    fn apply_read(&self, strategy: Address, result: ladder_chain::ChainResult<StrategyStatus>) {
        let Some(mut entry) = self.entries.get_mut(&strategy) else {
            return;
        };
        match result {
            Ok(status) => {
                entry.snapshot = Some(status);
                entry.state = LoadState::Loaded;
                entry.last_update = Some(Utc::now());
            }
            Err(e) => {
                // Keep the stale snapshot; it is better than nothing
                warn!(%strategy, error = %e, "strategy refresh failed");
                entry.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Translate the entry's settled state into the caller's result.
    fn settled_result(&self, strategy: Address) -> StateResult<()> {
        match self.load_state(strategy) {
            LoadState::Failed(message) => Err(StateError::RefreshFailed { strategy, message }),
            _ => Ok(()),
        }
    }
}
