//! # tradepool
//!
//! Object reuse for latency-sensitive trading pipelines. Instead of
//! allocating a fresh order, trade, tick or buffer for every message, callers
//! borrow a pre-shaped entry from a pool, fill it in place and hand it back.
//!
//! - [`ObjectPool`]: generic thread-safe pool with warm-up, a bounded free
//!   list, ticket-checked releases and consistent statistics
//! - [`TradingPools`]: one pool per trading data kind with per-kind capacity
//! - [`ScopedLease`]: RAII guard that returns its entry on every exit path
//!
//! ## Quick Start
//!
//! ```rust
//! use tradepool::{RegistryConfig, TradingPools};
//!
//! let pools = TradingPools::new(&RegistryConfig::default())?;
//!
//! let mut order = pools.get_order()?;
//! order.symbol.push_str("ETH-USD");
//! order.quantity = 1.5;
//! pools.release_order(order);
//!
//! for stats in pools.get_all_stats() {
//!     println!("{}: {:.1}% hit rate", stats.name, stats.hit_rate_percent());
//! }
//! # Ok::<(), tradepool::Error>(())
//! ```
//!
//! An exhausted pool never blocks or fails; it builds a new entry. Releases
//! beyond a pool's `max_free` drop the entry (see [`OverflowPolicy`]).

#![warn(rust_2018_idioms)]

pub mod error;
pub mod guard;
pub mod pool;
pub mod poolable;
pub mod records;
pub mod registry;

pub use error::{BoxError, Error, Result};
pub use guard::ScopedLease;
pub use pool::{
    Lease, ObjectPool, OverflowPolicy, PoolConfig, PoolStats, Release, ReuseOrder, Ticket,
};
pub use poolable::Poolable;
pub use records::{MarketTick, Order, OrderStatus, OrderType, Position, Side, Trade};
pub use registry::{ListBuffer, PoolKind, PoolSettings, RegistryConfig, TradingPools};

/// Convenient re-exports of commonly used types and traits.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::guard::ScopedLease;
    pub use crate::pool::{Lease, ObjectPool, PoolConfig, PoolStats, Release};
    pub use crate::poolable::Poolable;
    pub use crate::registry::{PoolKind, RegistryConfig, TradingPools};
}
