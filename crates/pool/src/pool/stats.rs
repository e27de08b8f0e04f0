//! Point-in-time pool statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one pool's occupancy and lifetime counters.
///
/// Taken under the pool lock, so every field comes from the same instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Pool name
    pub name: String,
    /// Entries currently tracked (`available_objects + in_use_objects`)
    pub total_objects: usize,
    /// Entries sitting in the free list
    pub available_objects: usize,
    /// Entries checked out and not yet released
    pub in_use_objects: usize,
    /// Lifetime count of entries produced by the factory
    pub created_count: u64,
    /// Lifetime count of acquires served from the free list
    pub recycled_count: u64,
    /// Lifetime count of entries dropped because the free list was full
    pub discarded_count: u64,
    /// Lifetime count of releases ignored as foreign or duplicate
    pub ignored_releases: u64,
    /// `recycled_count / max(created_count, 1)`
    pub hit_rate: f64,
    /// When the snapshot was taken
    pub sampled_at: DateTime<Utc>,
}

impl PoolStats {
    /// Hit rate as a percentage
    #[must_use]
    pub fn hit_rate_percent(&self) -> f64 {
        self.hit_rate * 100.0
    }

    /// `created_count + recycled_count`: every acquire served plus the
    /// entries built during warm-up
    #[must_use]
    pub fn total_acquires(&self) -> u64 {
        self.created_count + self.recycled_count
    }
}

pub(crate) fn hit_rate(recycled: u64, created: u64) -> f64 {
    recycled as f64 / created.max(1) as f64
}
