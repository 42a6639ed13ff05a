//! In-memory mock collaborators for tests.
//!
//! Deterministic stand-ins for the chain: responses are preloaded, calls
//! are recorded for verification, and reads can be artificially delayed
//! to exercise refresh coalescing.

use crate::error::{ChainError, ChainResult};
use crate::reader::{ChainReader, ChainWriter};
use crate::types::{GlobalConfig, MarketRaw, SideConfig, StrategyStatus, TxReceipt};
use alloy_primitives::{Address, B256};
use futures_util::future::BoxFuture;
use ladder_core::{BookKey, DistributionOffer, MarketKey, RawOrder};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Mock chain reader with preloaded responses.
#[derive(Default)]
pub struct MockChainReader {
    markets: Mutex<Vec<MarketRaw>>,
    orders: Mutex<HashMap<BookKey, Vec<RawOrder>>>,
    configs: Mutex<HashMap<BookKey, (SideConfig, GlobalConfig)>>,
    statuses: Mutex<HashMap<Address, Result<StrategyStatus, String>>>,
    status_reads: AtomicU64,
    read_delay: Mutex<Duration>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_markets(&self, markets: Vec<MarketRaw>) {
        *self.markets.lock() = markets;
    }

    pub fn set_orders(&self, key: BookKey, orders: Vec<RawOrder>) {
        self.orders.lock().insert(key, orders);
    }

    pub fn set_config(&self, key: BookKey, side: SideConfig, global: GlobalConfig) {
        self.configs.lock().insert(key, (side, global));
    }

    /// Preload the status returned for a strategy address.
    pub fn set_status(&self, strategy: Address, status: StrategyStatus) {
        self.statuses.lock().insert(strategy, Ok(status));
    }

    /// Make status reads for `strategy` fail with `message`.
    pub fn fail_status(&self, strategy: Address, message: impl Into<String>) {
        self.statuses.lock().insert(strategy, Err(message.into()));
    }

    /// Delay every read by `delay`, so tests can overlap requests.
    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock() = delay;
    }

    /// Number of strategy status reads issued so far.
    pub fn status_reads(&self) -> u64 {
        self.status_reads.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.read_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl ChainReader for MockChainReader {
    fn open_markets(&self, _with_config: bool) -> BoxFuture<'_, ChainResult<Vec<MarketRaw>>> {
        Box::pin(async move {
            self.pause().await;
            Ok(self.markets.lock().clone())
        })
    }

    fn order_list(
        &self,
        key: BookKey,
        start_id: u64,
        max_count: u32,
    ) -> BoxFuture<'_, ChainResult<Vec<RawOrder>>> {
        Box::pin(async move {
            self.pause().await;
            let orders = self.orders.lock().get(&key).cloned().unwrap_or_default();
            Ok(orders
                .into_iter()
                .skip(start_id as usize)
                .take(max_count as usize)
                .collect())
        })
    }

    fn book_config(
        &self,
        key: BookKey,
    ) -> BoxFuture<'_, ChainResult<(SideConfig, GlobalConfig)>> {
        Box::pin(async move {
            self.pause().await;
            self.configs
                .lock()
                .get(&key)
                .cloned()
                .ok_or_else(|| ChainError::Read(format!("no config for book {key:?}")))
        })
    }

    fn strategy_status(&self, strategy: Address) -> BoxFuture<'_, ChainResult<StrategyStatus>> {
        Box::pin(async move {
            self.status_reads.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            match self.statuses.lock().get(&strategy) {
                Some(Ok(status)) => Ok(status.clone()),
                Some(Err(message)) => Err(ChainError::Read(message.clone())),
                None => Err(ChainError::Read(format!("unknown strategy {strategy}"))),
            }
        })
    }
}

/// Mock chain writer that records submissions.
#[derive(Default)]
pub struct MockChainWriter {
    next_address: Mutex<Option<Address>>,
    populates: Mutex<Vec<(Address, Vec<DistributionOffer>, Vec<DistributionOffer>)>>,
    retracts: Mutex<Vec<(Address, u32, u32, Address)>>,
    fail_writes: Mutex<Option<String>>,
    blocks: AtomicU64,
}

impl MockChainWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next `create_strategy` call returns.
    pub fn set_next_address(&self, address: Address) {
        *self.next_address.lock() = Some(address);
    }

    /// Make every write fail with `message`.
    pub fn fail_writes(&self, message: impl Into<String>) {
        *self.fail_writes.lock() = Some(message.into());
    }

    pub fn populate_calls(&self) -> Vec<(Address, Vec<DistributionOffer>, Vec<DistributionOffer>)> {
        self.populates.lock().clone()
    }

    pub fn retract_calls(&self) -> Vec<(Address, u32, u32, Address)> {
        self.retracts.lock().clone()
    }

    fn check_failure(&self) -> ChainResult<()> {
        match self.fail_writes.lock().as_ref() {
            Some(message) => Err(ChainError::Write(message.clone())),
            None => Ok(()),
        }
    }

    fn receipt(&self) -> TxReceipt {
        TxReceipt {
            tx_hash: B256::ZERO,
            block_number: self.blocks.fetch_add(1, Ordering::SeqCst) + 1,
            success: true,
        }
    }
}

impl ChainWriter for MockChainWriter {
    fn create_strategy(&self, _market: MarketKey) -> BoxFuture<'_, ChainResult<Address>> {
        Box::pin(async move {
            self.check_failure()?;
            self.next_address
                .lock()
                .take()
                .ok_or_else(|| ChainError::Write("no deployment address queued".to_string()))
        })
    }

    fn populate(
        &self,
        strategy: Address,
        bids: Vec<DistributionOffer>,
        asks: Vec<DistributionOffer>,
    ) -> BoxFuture<'_, ChainResult<TxReceipt>> {
        Box::pin(async move {
            self.check_failure()?;
            self.populates.lock().push((strategy, bids, asks));
            Ok(self.receipt())
        })
    }

    fn retract(
        &self,
        strategy: Address,
        from_index: u32,
        to_index: u32,
        recipient: Address,
    ) -> BoxFuture<'_, ChainResult<TxReceipt>> {
        Box::pin(async move {
            self.check_failure()?;
            self.retracts
                .lock()
                .push((strategy, from_index, to_index, recipient));
            Ok(self.receipt())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ladder_core::Side;
    use tokio_test::block_on;

    #[test]
    fn test_order_list_pages() {
        let reader = MockChainReader::new();
        let key = BookKey {
            outbound: address!("0000000000000000000000000000000000000001"),
            inbound: address!("0000000000000000000000000000000000000002"),
            tick_spacing: 1,
        };
        let orders: Vec<RawOrder> = (0..10)
            .map(|i| RawOrder::new(i, alloy_primitives::U256::from(1u64), Side::Ask))
            .collect();
        reader.set_orders(key, orders);

        let page = block_on(reader.order_list(key, 3, 4)).unwrap();
        assert_eq!(page.len(), 4);
        assert_eq!(page[0].tick, 3);
    }

    #[test]
    fn test_status_read_counting_and_failure() {
        let reader = MockChainReader::new();
        let strategy = address!("00000000000000000000000000000000000000aa");
        reader.fail_status(strategy, "boom");

        assert!(block_on(reader.strategy_status(strategy)).is_err());
        assert!(block_on(reader.strategy_status(strategy)).is_err());
        assert_eq!(reader.status_reads(), 2);
    }

    #[test]
    fn test_writer_requires_queued_address() {
        let writer = MockChainWriter::new();
        let market = MarketKey {
            base: address!("0000000000000000000000000000000000000001"),
            quote: address!("0000000000000000000000000000000000000002"),
            tick_spacing: 1,
        };
        assert!(block_on(writer.create_strategy(market)).is_err());

        let deployed = address!("00000000000000000000000000000000000000aa");
        writer.set_next_address(deployed);
        assert_eq!(block_on(writer.create_strategy(market)).unwrap(), deployed);
    }

    #[test]
    fn test_writer_block_numbers_advance() {
        let writer = MockChainWriter::new();
        let strategy = address!("00000000000000000000000000000000000000aa");
        let r1 = block_on(writer.populate(strategy, Vec::new(), Vec::new())).unwrap();
        let r2 = block_on(writer.populate(strategy, Vec::new(), Vec::new())).unwrap();
        assert!(r2.block_number > r1.block_number);
        assert_eq!(writer.populate_calls().len(), 2);
    }
}
