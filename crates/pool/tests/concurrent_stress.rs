//! Concurrent stress tests for the object pool and the registry.
//!
//! Many threads hammer one shared pool with acquire/release cycles; the
//! counters must add up exactly and the free list must never hold an entry
//! twice.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use tradepool::{ObjectPool, PoolConfig, RegistryConfig, TradingPools};

const THREADS: usize = 16;
const CYCLES: usize = 500;

#[test]
fn stress_threads_acquire_release() {
    let next_id = Arc::new(AtomicU64::new(0));
    let ids = Arc::clone(&next_id);
    let pool = ObjectPool::new(PoolConfig::new("stress", 8).warm_up(4), move || {
        ids.fetch_add(1, Ordering::Relaxed)
    })
    .unwrap();

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for i in 0..CYCLES {
                    let lease = pool.acquire().unwrap();
                    if i % 7 == 0 {
                        // hold two at once now and then to force fresh creation
                        let extra = pool.acquire().unwrap();
                        pool.release(extra);
                    }
                    pool.release(lease);
                }
            });
        }
    });

    let stats = pool.stats();
    let extra_per_thread = (0..CYCLES).filter(|i| i % 7 == 0).count();
    let expected = (THREADS * (CYCLES + extra_per_thread)) as u64;

    assert_eq!(stats.created_count + stats.recycled_count, expected + 4);
    assert_eq!(stats.in_use_objects, 0);
    assert!(stats.available_objects <= 8);
    assert!(stats.available_objects as u64 <= stats.created_count);
    assert_eq!(stats.created_count, next_id.load(Ordering::Relaxed));
    assert_eq!(stats.ignored_releases, 0);

    // every retained entry is distinct
    let mut seen = HashSet::new();
    let drained: Vec<_> = (0..stats.available_objects)
        .map(|_| pool.acquire().unwrap())
        .collect();
    for lease in &drained {
        assert!(seen.insert(**lease), "entry {} is in the free list twice", **lease);
    }
}

#[test]
fn stress_scoped_leases_never_leak() {
    let pool = ObjectPool::new(PoolConfig::new("scoped-stress", 4), String::new)
        .unwrap()
        .with_reset(String::clear);

    thread::scope(|s| {
        for t in 0..THREADS {
            let pool = &pool;
            s.spawn(move || {
                for i in 0..CYCLES {
                    let mut line = pool.scoped().unwrap();
                    assert!(line.is_empty(), "entry was handed out without a reset");
                    line.push_str(&format!("{t}:{i}"));
                }
            });
        }
    });

    let stats = pool.stats();
    assert_eq!(stats.total_acquires(), (THREADS * CYCLES) as u64);
    assert_eq!(stats.in_use_objects, 0);
    assert!(stats.available_objects <= 4);
}

#[test]
fn stress_registry_from_many_streams() {
    let pools = Arc::new(TradingPools::new(&RegistryConfig::default()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|stream| {
            let pools = Arc::clone(&pools);
            thread::spawn(move || {
                for i in 0..200 {
                    let mut tick = pools.scoped_market_tick().unwrap();
                    tick.symbol.push_str("BTC-USD");
                    tick.bid = 64_000.0 + f64::from(i);
                    tick.ask = tick.bid + 0.5;

                    let mut order = pools.get_order().unwrap();
                    order.order_id = format!("{stream}-{i}");
                    order.price = tick.mid();
                    pools.release_order(order);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("stream thread should not panic");
    }

    for stats in pools.get_all_stats() {
        assert_eq!(stats.in_use_objects, 0, "{} leaked", stats.name);
    }
    // 8 streams x 200 ticks, plus the 10 built at warm-up
    let ticks = pools.stats(tradepool::PoolKind::MarketTicks);
    assert_eq!(ticks.total_acquires(), 1610);
}
