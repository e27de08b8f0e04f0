//! RAII guard for pool leases

use crate::pool::{Lease, ObjectPool, Release};

/// RAII guard that owns one lease and the pool it came from.
///
/// When the guard is dropped (end of scope, early `?` return, or panic
/// unwinding) the lease is released to its pool. Call
/// [`release`](ScopedLease::release) to return it earlier, or
/// [`into_lease`](ScopedLease::into_lease) to take it out of the guard.
///
/// # Example
/// ```
/// use tradepool::{ObjectPool, PoolConfig};
///
/// let pool = ObjectPool::new(PoolConfig::new("fills", 8), Vec::<u64>::new)?;
/// {
///     let mut fills = pool.scoped()?;
///     fills.push(42);
/// } // released here
/// assert_eq!(pool.stats().in_use_objects, 0);
/// # Ok::<(), tradepool::Error>(())
/// ```
pub struct ScopedLease<'a, T: Send + 'static> {
    pool: &'a ObjectPool<T>,
    lease: Option<Lease<T>>,
}

impl<'a, T: Send + 'static> ScopedLease<'a, T> {
    /// Guard an already-acquired lease
    pub fn new(pool: &'a ObjectPool<T>, lease: Lease<T>) -> Self {
        Self {
            pool,
            lease: Some(lease),
        }
    }

    /// Release the lease now instead of at scope end
    pub fn release(mut self) -> Release {
        match self.lease.take() {
            Some(lease) => self.pool.release(lease),
            None => Release::Ignored,
        }
    }

    /// Take the lease out of the guard; it will not be released on drop
    #[must_use]
    pub fn into_lease(mut self) -> Lease<T> {
        self.lease.take().expect("scoped lease already taken")
    }

    /// Pool the lease will be returned to
    pub fn pool(&self) -> &'a ObjectPool<T> {
        self.pool
    }

    fn lease(&self) -> &Lease<T> {
        self.lease.as_ref().expect("scoped lease already taken")
    }

    fn lease_mut(&mut self) -> &mut Lease<T> {
        self.lease.as_mut().expect("scoped lease already taken")
    }
}

impl<T: Send + 'static> std::ops::Deref for ScopedLease<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.lease()
    }
}

impl<T: Send + 'static> std::ops::DerefMut for ScopedLease<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.lease_mut()
    }
}

impl<T: Send + 'static> Drop for ScopedLease<'_, T> {
    fn drop(&mut self) {
        if let Some(lease) = self.lease.take() {
            self.pool.release(lease);
        }
    }
}

impl<T: Send + std::fmt::Debug + 'static> std::fmt::Debug for ScopedLease<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedLease")
            .field("pool", &self.pool.name())
            .field("lease", &self.lease)
            .finish()
    }
}
