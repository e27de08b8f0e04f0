//! Pool configuration types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Order in which free entries are handed back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReuseOrder {
    /// Oldest released entry is reused first; wear is spread over the free list.
    #[default]
    Fifo,
    /// Most recently released entry is reused first; the hot entry stays in cache.
    Lifo,
}

/// What a release does when the free list is already at `max_free`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop the incoming entry without resetting it.
    #[default]
    DropIncoming,
    /// Drop the oldest free entry and keep the incoming one.
    EvictOldest,
}

/// Configuration for a single object pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Human-readable pool name, used in stats and log events
    pub name: String,
    /// Maximum number of free entries retained for reuse
    pub max_free: usize,
    /// Entries created at construction (capped by `max_free`)
    pub warm_up: usize,
    /// Free-list discipline
    pub reuse_order: ReuseOrder,
    /// Behaviour of a release into a full free list
    pub overflow: OverflowPolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "pool".to_string(),
            max_free: 100,
            warm_up: 0,
            reuse_order: ReuseOrder::Fifo,
            overflow: OverflowPolicy::DropIncoming,
        }
    }
}

impl PoolConfig {
    /// Named configuration with the given free-list capacity and no warm-up
    pub fn new(name: impl Into<String>, max_free: usize) -> Self {
        Self {
            name: name.into(),
            max_free,
            ..Self::default()
        }
    }

    /// Set the number of entries created at construction
    pub fn warm_up(mut self, count: usize) -> Self {
        self.warm_up = count;
        self
    }

    /// Set the free-list discipline
    pub fn reuse_order(mut self, order: ReuseOrder) -> Self {
        self.reuse_order = order;
        self
    }

    /// Set the overflow policy
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    /// Number of entries warm-up will actually create
    #[must_use]
    pub fn effective_warm_up(&self) -> usize {
        self.warm_up.min(self.max_free)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration("pool name must not be empty"));
        }
        Ok(())
    }
}
