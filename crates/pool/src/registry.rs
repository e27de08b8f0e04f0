//! Domain pool registry: one pre-shaped pool per trading data kind.

use std::fmt;
use std::sync::OnceLock;

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::guard::ScopedLease;
use crate::pool::{Lease, ObjectPool, OverflowPolicy, PoolConfig, PoolStats, Release, ReuseOrder};
use crate::records::{MarketTick, Order, Position, Trade};

/// Growable list buffer handed out by the registry
pub type ListBuffer = Vec<String>;

static GLOBAL: OnceLock<TradingPools> = OnceLock::new();

/// Data kinds managed by [`TradingPools`], in stats order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Orders,
    Trades,
    MarketTicks,
    Positions,
    ByteBuffers,
    ListBuffers,
}

impl PoolKind {
    /// Every kind, in the order [`TradingPools::get_all_stats`] reports them
    pub const ALL: [Self; 6] = [
        Self::Orders,
        Self::Trades,
        Self::MarketTicks,
        Self::Positions,
        Self::ByteBuffers,
        Self::ListBuffers,
    ];

    /// Pool name used in stats and log events
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Trades => "trades",
            Self::MarketTicks => "market_ticks",
            Self::Positions => "positions",
            Self::ByteBuffers => "byte_buffers",
            Self::ListBuffers => "list_buffers",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind pool tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum free entries retained
    pub max_free: usize,
    /// Entries created when the registry is built
    pub warm_up: usize,
    /// Free-list discipline
    pub reuse_order: ReuseOrder,
    /// Behaviour of a release into a full free list
    pub overflow: OverflowPolicy,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl PoolSettings {
    /// Settings with the given capacity and the default warm-up of 10
    #[must_use]
    pub fn with_capacity(max_free: usize) -> Self {
        Self {
            max_free,
            warm_up: 10,
            reuse_order: ReuseOrder::Fifo,
            overflow: OverflowPolicy::DropIncoming,
        }
    }

    fn pool_config(&self, kind: PoolKind) -> PoolConfig {
        PoolConfig::new(kind.as_str(), self.max_free)
            .warm_up(self.warm_up)
            .reuse_order(self.reuse_order)
            .overflow(self.overflow)
    }
}

/// Configuration for every pool in the registry.
///
/// Capacities reflect expected churn: ticks arrive fastest, positions change
/// least often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub orders: PoolSettings,
    pub trades: PoolSettings,
    pub market_ticks: PoolSettings,
    pub positions: PoolSettings,
    pub byte_buffers: PoolSettings,
    pub list_buffers: PoolSettings,
    /// Initial capacity of each pooled byte buffer
    pub byte_buffer_capacity: usize,
    /// Initial capacity of each pooled list buffer
    pub list_buffer_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            orders: PoolSettings::with_capacity(1000),
            trades: PoolSettings::with_capacity(2000),
            market_ticks: PoolSettings::with_capacity(5000),
            positions: PoolSettings::with_capacity(500),
            byte_buffers: PoolSettings::with_capacity(100),
            list_buffers: PoolSettings::with_capacity(200),
            byte_buffer_capacity: 4096,
            list_buffer_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Settings for one kind
    #[must_use]
    pub fn settings(&self, kind: PoolKind) -> &PoolSettings {
        match kind {
            PoolKind::Orders => &self.orders,
            PoolKind::Trades => &self.trades,
            PoolKind::MarketTicks => &self.market_ticks,
            PoolKind::Positions => &self.positions,
            PoolKind::ByteBuffers => &self.byte_buffers,
            PoolKind::ListBuffers => &self.list_buffers,
        }
    }
}

/// Fixed set of independently configured pools, one per data kind.
///
/// ```
/// use tradepool::{RegistryConfig, TradingPools};
///
/// let pools = TradingPools::new(&RegistryConfig::default())?;
/// {
///     let mut tick = pools.scoped_market_tick()?;
///     tick.symbol.push_str("BTC-USD");
///     tick.bid = 64_000.0;
///     tick.ask = 64_001.0;
/// }
/// assert_eq!(pools.get_all_stats().len(), 6);
/// # Ok::<(), tradepool::Error>(())
/// ```
pub struct TradingPools {
    orders: ObjectPool<Order>,
    trades: ObjectPool<Trade>,
    market_ticks: ObjectPool<MarketTick>,
    positions: ObjectPool<Position>,
    byte_buffers: ObjectPool<BytesMut>,
    list_buffers: ObjectPool<ListBuffer>,
}

macro_rules! kind_accessors {
    ($($kind:literal $field:ident: $ty:ty => $get:ident, $release:ident, $scoped:ident;)*) => {
        $(
            #[doc = concat!("Acquire ", $kind, " from its pool")]
            pub fn $get(&self) -> Result<Lease<$ty>> {
                self.$field.acquire()
            }

            #[doc = concat!("Return ", $kind, " to its pool")]
            pub fn $release(&self, lease: Lease<$ty>) -> Release {
                self.$field.release(lease)
            }

            #[doc = concat!("Acquire ", $kind, " inside a guard that releases it on drop")]
            pub fn $scoped(&self) -> Result<ScopedLease<'_, $ty>> {
                self.$field.scoped()
            }

            #[doc = concat!("Pool backing ", $kind, " entries")]
            pub fn $field(&self) -> &ObjectPool<$ty> {
                &self.$field
            }
        )*
    };
}

impl TradingPools {
    /// Build every pool and run its warm-up
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let byte_capacity = config.byte_buffer_capacity;
        let list_capacity = config.list_buffer_capacity;

        let pools = Self {
            orders: ObjectPool::poolable(config.orders.pool_config(PoolKind::Orders))?,
            trades: ObjectPool::poolable(config.trades.pool_config(PoolKind::Trades))?,
            market_ticks: ObjectPool::poolable(
                config.market_ticks.pool_config(PoolKind::MarketTicks),
            )?,
            positions: ObjectPool::poolable(config.positions.pool_config(PoolKind::Positions))?,
            byte_buffers: ObjectPool::new(
                config.byte_buffers.pool_config(PoolKind::ByteBuffers),
                move || BytesMut::with_capacity(byte_capacity),
            )?
            .with_reset(BytesMut::clear),
            list_buffers: ObjectPool::new(
                config.list_buffers.pool_config(PoolKind::ListBuffers),
                move || Vec::with_capacity(list_capacity),
            )?
            .with_reset(Vec::clear),
        };

        debug!(kinds = PoolKind::ALL.len(), "trading pools ready");
        Ok(pools)
    }

    /// Process-wide registry built from [`RegistryConfig::default`]
    pub fn global() -> Result<&'static Self> {
        if let Some(pools) = GLOBAL.get() {
            return Ok(pools);
        }
        let pools = Self::new(&RegistryConfig::default())?;
        Ok(GLOBAL.get_or_init(|| pools))
    }

    kind_accessors! {
        "an order record" orders: Order => get_order, release_order, scoped_order;
        "a trade record" trades: Trade => get_trade, release_trade, scoped_trade;
        "a market tick" market_ticks: MarketTick => get_market_tick, release_market_tick, scoped_market_tick;
        "a position record" positions: Position => get_position, release_position, scoped_position;
        "a byte buffer" byte_buffers: BytesMut => get_byte_buffer, release_byte_buffer, scoped_byte_buffer;
        "a list buffer" list_buffers: ListBuffer => get_list_buffer, release_list_buffer, scoped_list_buffer;
    }

    /// Snapshot of a single pool
    pub fn stats(&self, kind: PoolKind) -> PoolStats {
        match kind {
            PoolKind::Orders => self.orders.stats(),
            PoolKind::Trades => self.trades.stats(),
            PoolKind::MarketTicks => self.market_ticks.stats(),
            PoolKind::Positions => self.positions.stats(),
            PoolKind::ByteBuffers => self.byte_buffers.stats(),
            PoolKind::ListBuffers => self.list_buffers.stats(),
        }
    }

    /// One snapshot per kind, in [`PoolKind::ALL`] order
    pub fn get_all_stats(&self) -> Vec<PoolStats> {
        PoolKind::ALL.iter().map(|&kind| self.stats(kind)).collect()
    }

    /// Clear every pool
    pub fn clear_all(&self) {
        self.orders.clear();
        self.trades.clear();
        self.market_ticks.clear();
        self.positions.clear();
        self.byte_buffers.clear();
        self.list_buffers.clear();
        debug!("trading pools cleared");
    }
}

impl fmt::Debug for TradingPools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingPools")
            .field("orders", &self.orders)
            .field("trades", &self.trades)
            .field("market_ticks", &self.market_ticks)
            .field("positions", &self.positions)
            .field("byte_buffers", &self.byte_buffers)
            .field("list_buffers", &self.list_buffers)
            .finish()
    }
}
