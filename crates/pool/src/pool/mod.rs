//! Generic thread-safe object pool.
//!
//! [`ObjectPool<T>`] keeps a free list of ready-made entries, hands them out
//! as [`Lease`]s and takes them back on [`release`](ObjectPool::release).
//! An empty free list never blocks: the factory builds a fresh entry instead.
//!
//! The free list, the set of outstanding tickets and the counters live behind
//! one `parking_lot::Mutex`, so every operation and every stats snapshot sees
//! them in a mutually consistent state.

pub mod config;
mod lease;
mod stats;

use std::collections::{HashSet, VecDeque};
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::{BoxError, Error, Result};
use crate::guard::ScopedLease;
use crate::poolable::Poolable;

pub use config::{OverflowPolicy, PoolConfig, ReuseOrder};
pub use lease::{Lease, Ticket};
pub use stats::PoolStats;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

type Factory<T> = Box<dyn Fn() -> std::result::Result<T, BoxError> + Send + Sync>;
type Reset<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// Outcome of [`ObjectPool::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The entry was reset and appended to the free list.
    Recycled,
    /// The free list was full; the entry was dropped without a reset.
    Discarded,
    /// The ticket was not outstanding (foreign pool, already released, or
    /// issued before a `clear`); nothing changed.
    Ignored,
}

impl Release {
    /// Whether the entry went back to the free list
    #[must_use]
    pub fn is_recycled(self) -> bool {
        self == Self::Recycled
    }

    /// Whether the release was ignored
    #[must_use]
    pub fn is_ignored(self) -> bool {
        self == Self::Ignored
    }
}

/// Mutable pool state; always accessed under the pool lock.
struct State<T> {
    free: VecDeque<T>,
    in_use: HashSet<u64>,
    next_seq: u64,
    created: u64,
    recycled: u64,
    discarded: u64,
    ignored: u64,
}

impl<T> State<T> {
    fn pop_free(&mut self, order: ReuseOrder) -> Option<T> {
        match order {
            ReuseOrder::Fifo => self.free.pop_front(),
            ReuseOrder::Lifo => self.free.pop_back(),
        }
    }
}

/// Thread-safe pool of reusable entries of one shape.
///
/// # Example
/// ```
/// use tradepool::{ObjectPool, PoolConfig};
///
/// let pool = ObjectPool::new(PoolConfig::new("lines", 16).warm_up(4), || {
///     String::with_capacity(256)
/// })?
/// .with_reset(String::clear);
///
/// let mut line = pool.acquire()?;
/// line.push_str("BTC-USD,64000.5,0.25");
/// pool.release(line);
///
/// assert_eq!(pool.stats().available_objects, 4);
/// # Ok::<(), tradepool::Error>(())
/// ```
pub struct ObjectPool<T> {
    id: u64,
    config: PoolConfig,
    factory: Factory<T>,
    reset: Option<Reset<T>>,
    state: Mutex<State<T>>,
}

impl<T: Send + 'static> ObjectPool<T> {
    /// Create a pool with an infallible factory, warming it up per `config`.
    pub fn new<F>(config: PoolConfig, factory: F) -> Result<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::try_new(config, move || Ok::<T, Infallible>(factory()))
    }

    /// Create a pool with a fallible factory.
    ///
    /// A factory error during warm-up is returned as [`Error::Factory`].
    pub fn try_new<F, E>(config: PoolConfig, factory: F) -> Result<Self>
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        config.validate()?;
        let factory: Factory<T> = Box::new(move || factory().map_err(Into::into));

        let warm_up = config.effective_warm_up();
        let mut free = VecDeque::with_capacity(warm_up);
        for _ in 0..warm_up {
            let entry = factory().map_err(|source| {
                warn!(pool = %config.name, error = %source, "factory failed during warm-up");
                Error::factory(&config.name, source)
            })?;
            free.push_back(entry);
        }

        debug!(
            pool = %config.name,
            max_free = config.max_free,
            warm_up,
            "object pool created"
        );

        Ok(Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            config,
            factory,
            reset: None,
            state: Mutex::new(State {
                free,
                in_use: HashSet::new(),
                next_seq: 0,
                created: warm_up as u64,
                recycled: 0,
                discarded: 0,
                ignored: 0,
            }),
        })
    }

    /// Attach the routine that restores a released entry before it is reused
    #[must_use = "builder methods must be chained or built"]
    pub fn with_reset<R>(mut self, reset: R) -> Self
    where
        R: Fn(&mut T) + Send + Sync + 'static,
    {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Check out an entry: the next free one if any, otherwise a fresh one.
    ///
    /// Fails only when the factory fails; the pool is left unchanged then.
    pub fn acquire(&self) -> Result<Lease<T>> {
        let mut state = self.state.lock();

        let value = if let Some(value) = state.pop_free(self.config.reuse_order) {
            state.recycled += 1;
            value
        } else {
            let value = (self.factory)().map_err(|source| {
                warn!(pool = %self.config.name, error = %source, "factory failed");
                Error::factory(&self.config.name, source)
            })?;
            state.created += 1;
            value
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.in_use.insert(seq);

        Ok(Lease::new(
            Ticket {
                pool_id: self.id,
                seq,
            },
            value,
        ))
    }

    /// Check out an entry wrapped in a guard that releases it on drop
    pub fn scoped(&self) -> Result<ScopedLease<'_, T>> {
        Ok(ScopedLease::new(self, self.acquire()?))
    }

    /// Hand an entry back.
    ///
    /// Leases this pool does not have outstanding are ignored, which makes a
    /// repeated release of the same ticket a no-op.
    pub fn release(&self, lease: Lease<T>) -> Release {
        let (ticket, mut value) = lease.into_parts();
        let mut state = self.state.lock();

        if ticket.pool_id != self.id || !state.in_use.remove(&ticket.seq) {
            state.ignored += 1;
            drop(state);
            trace!(pool = %self.config.name, %ticket, "ignoring release of untracked lease");
            return Release::Ignored;
        }

        let mut evicted = None;
        if state.free.len() >= self.config.max_free {
            match self.config.overflow {
                OverflowPolicy::EvictOldest if !state.free.is_empty() => {
                    evicted = state.free.pop_front();
                    state.discarded += 1;
                }
                _ => {
                    state.discarded += 1;
                    drop(state);
                    trace!(pool = %self.config.name, %ticket, "free list full, entry discarded");
                    return Release::Discarded;
                }
            }
        }

        if let Some(reset) = &self.reset {
            reset(&mut value);
        }
        state.free.push_back(value);
        drop(state);
        drop(evicted);

        Release::Recycled
    }

    /// Snapshot of occupancy and lifetime counters
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        let available_objects = state.free.len();
        let in_use_objects = state.in_use.len();

        PoolStats {
            name: self.config.name.clone(),
            total_objects: available_objects + in_use_objects,
            available_objects,
            in_use_objects,
            created_count: state.created,
            recycled_count: state.recycled,
            discarded_count: state.discarded,
            ignored_releases: state.ignored,
            hit_rate: stats::hit_rate(state.recycled, state.created),
            sampled_at: Utc::now(),
        }
    }

    /// Drop every free entry and forget every outstanding ticket.
    ///
    /// The reset routine is not run and lifetime counters are kept. Leases
    /// still held by callers become foreign; releasing them later is ignored.
    pub fn clear(&self) {
        let (free, in_use) = {
            let mut state = self.state.lock();
            (
                std::mem::take(&mut state.free),
                std::mem::take(&mut state.in_use),
            )
        };

        debug!(
            pool = %self.config.name,
            dropped = free.len(),
            forgotten = in_use.len(),
            "object pool cleared"
        );
    }

    /// Number of entries in the free list
    #[must_use]
    pub fn available(&self) -> usize {
        self.state.lock().free.len()
    }

    /// Number of entries checked out
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.state.lock().in_use.len()
    }

    /// Whether `ticket` was issued by this pool and is still outstanding
    #[must_use]
    pub fn is_outstanding(&self, ticket: Ticket) -> bool {
        ticket.pool_id == self.id && self.state.lock().in_use.contains(&ticket.seq)
    }

    /// Pool name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Pool configuration
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Process-unique pool identifier carried by every ticket
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<T: Poolable + Default> ObjectPool<T> {
    /// Pool whose factory is `T::default` and whose reset is [`Poolable::reset`]
    pub fn poolable(config: PoolConfig) -> Result<Self> {
        Ok(Self::new(config, T::default)?.with_reset(T::reset))
    }
}

impl<T> std::fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ObjectPool")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("available", &state.free.len())
            .field("in_use", &state.in_use.len())
            .field("created", &state.created)
            .field("recycled", &state.recycled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn counting_pool(max_free: usize) -> ObjectPool<u64> {
        let next = AtomicU64::new(0);
        ObjectPool::new(PoolConfig::new("test", max_free), move || {
            next.fetch_add(1, Ordering::Relaxed)
        })
        .unwrap()
    }

    #[test]
    fn warm_up_is_capped_by_max_free() {
        let pool = ObjectPool::new(PoolConfig::new("ticks", 3).warm_up(10), || 0u8).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.available_objects, 3);
        assert_eq!(stats.created_count, 3);
        assert_eq!(stats.in_use_objects, 0);
    }

    #[test]
    fn fresh_acquires_have_zero_hit_rate() {
        let pool = counting_pool(8);
        let leases: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();

        let stats = pool.stats();
        assert_eq!(stats.created_count, 5);
        assert_eq!(stats.recycled_count, 0);
        assert_eq!(stats.hit_rate, 0.0);
        assert_eq!(stats.in_use_objects, 5);
        drop(leases);
    }

    #[test]
    fn second_round_is_recycled_up_to_max_free() {
        let pool = counting_pool(3);
        let first: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();
        for lease in first {
            pool.release(lease);
        }
        let _second: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();

        let stats = pool.stats();
        assert_eq!(stats.recycled_count, 3);
        assert_eq!(stats.created_count, 7);
    }

    #[test]
    fn fifo_reuses_oldest_release_first() {
        let pool = counting_pool(4);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_eq!((*a, *b), (0, 1));

        pool.release(a);
        pool.release(b);
        assert_eq!(*pool.acquire().unwrap(), 0);
    }

    #[test]
    fn lifo_reuses_newest_release_first() {
        let next = AtomicU64::new(0);
        let config = PoolConfig::new("lifo", 4).reuse_order(ReuseOrder::Lifo);
        let pool = ObjectPool::new(config, move || next.fetch_add(1, Ordering::Relaxed)).unwrap();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();

        pool.release(a);
        pool.release(b);
        assert_eq!(*pool.acquire().unwrap(), 1);
    }

    #[test]
    fn full_free_list_discards_without_reset() {
        let resets = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&resets);
        let pool = ObjectPool::new(PoolConfig::new("small", 2), || 0u32)
            .unwrap()
            .with_reset(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let leases: Vec<_> = (0..4).map(|_| pool.acquire().unwrap()).collect();
        let outcomes: Vec<_> = leases.into_iter().map(|l| pool.release(l)).collect();

        assert_eq!(
            outcomes,
            [
                Release::Recycled,
                Release::Recycled,
                Release::Discarded,
                Release::Discarded
            ]
        );
        assert_eq!(resets.load(Ordering::SeqCst), 2);

        let stats = pool.stats();
        assert_eq!(stats.available_objects, 2);
        assert_eq!(stats.created_count, 4);
        assert_eq!(stats.discarded_count, 2);
        assert_eq!(stats.total_objects, 2);
    }

    #[test]
    fn evict_oldest_keeps_incoming_entry() {
        let next = AtomicU64::new(0);
        let config = PoolConfig::new("evict", 2).overflow(OverflowPolicy::EvictOldest);
        let pool = ObjectPool::new(config, move || next.fetch_add(1, Ordering::Relaxed)).unwrap();
        let leases: Vec<_> = (0..3).map(|_| pool.acquire().unwrap()).collect();
        for lease in leases {
            assert_eq!(pool.release(lease), Release::Recycled);
        }

        // 0 was evicted to make room for 2
        assert_eq!(pool.available(), 2);
        assert_eq!(*pool.acquire().unwrap(), 1);
        assert_eq!(*pool.acquire().unwrap(), 2);
        assert_eq!(pool.stats().discarded_count, 1);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let config = PoolConfig::new("none", 0).overflow(OverflowPolicy::EvictOldest);
        let pool = ObjectPool::new(config.warm_up(5), || 0u8).unwrap();
        assert_eq!(pool.available(), 0);

        let lease = pool.acquire().unwrap();
        assert_eq!(pool.release(lease), Release::Discarded);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn duplicate_release_is_ignored() {
        let pool = counting_pool(4);
        let (ticket, value) = pool.acquire().unwrap().into_parts();

        assert_eq!(pool.release(Lease::from_parts(ticket, value)), Release::Recycled);
        let once = pool.stats();
        assert_eq!(pool.release(Lease::from_parts(ticket, value)), Release::Ignored);
        let twice = pool.stats();

        assert_eq!(once.available_objects, twice.available_objects);
        assert_eq!(once.in_use_objects, twice.in_use_objects);
        assert_eq!(twice.ignored_releases, 1);
    }

    #[test]
    fn foreign_release_is_ignored() {
        let ours = counting_pool(4);
        let theirs = counting_pool(4);
        let lease = theirs.acquire().unwrap();

        assert_eq!(ours.release(lease), Release::Ignored);
        assert_eq!(ours.available(), 0);
        assert_eq!(theirs.in_use(), 1);
    }

    #[test]
    fn reset_runs_before_reuse() {
        let pool = ObjectPool::new(PoolConfig::new("strings", 4), String::new)
            .unwrap()
            .with_reset(String::clear);

        let mut lease = pool.acquire().unwrap();
        lease.push_str("stale");
        pool.release(lease);

        assert_eq!(&*pool.acquire().unwrap(), "");
    }

    #[test]
    fn poolable_pool_uses_default_and_reset() {
        let pool = ObjectPool::<Vec<String>>::poolable(PoolConfig::new("lists", 2)).unwrap();
        let mut lease = pool.acquire().unwrap();
        lease.push("row".into());
        pool.release(lease);

        assert!(pool.acquire().unwrap().is_empty());
    }

    #[test]
    fn factory_failure_leaves_pool_untouched() {
        let pool = ObjectPool::try_new(PoolConfig::new("flaky", 4), || {
            Err::<u8, _>(std::io::Error::other("no memory"))
        })
        .unwrap();

        let err = pool.acquire().unwrap_err();
        assert!(matches!(err, Error::Factory { ref pool, .. } if pool == "flaky"));

        let stats = pool.stats();
        assert_eq!(stats.created_count, 0);
        assert_eq!(stats.in_use_objects, 0);
    }

    #[test]
    fn warm_up_failure_propagates() {
        let result = ObjectPool::try_new(PoolConfig::new("broken", 4).warm_up(2), || {
            Err::<u8, _>("allocator refused")
        });
        assert!(matches!(result, Err(Error::Factory { .. })));
    }

    #[test]
    fn clear_forgets_everything_but_counters() {
        let pool = counting_pool(4);
        let kept = pool.acquire().unwrap();
        let returned = pool.acquire().unwrap();
        pool.release(returned);

        pool.clear();
        let stats = pool.stats();
        assert_eq!(stats.available_objects, 0);
        assert_eq!(stats.in_use_objects, 0);
        assert_eq!(stats.created_count, 2);

        assert_eq!(pool.release(kept), Release::Ignored);
    }

    #[test]
    fn outstanding_ticket_lookup() {
        let pool = counting_pool(4);
        let lease = pool.acquire().unwrap();
        let ticket = lease.ticket();

        assert!(pool.is_outstanding(ticket));
        pool.release(lease);
        assert!(!pool.is_outstanding(ticket));
    }
}
