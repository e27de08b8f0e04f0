//! Checked-out entries and the tickets that identify them

use core::fmt;
use core::ops::{Deref, DerefMut};

/// Identity of one checkout.
///
/// `pool_id` is unique per pool within the process, `seq` is unique per
/// acquire within a pool. A pool accepts a release only for a ticket it
/// issued and has not yet taken back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub(crate) pool_id: u64,
    pub(crate) seq: u64,
}

impl Ticket {
    /// Identifier of the issuing pool
    #[must_use]
    pub fn pool_id(&self) -> u64 {
        self.pool_id
    }

    /// Per-pool sequence number of the checkout
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.pool_id, self.seq)
    }
}

/// A checked-out pool entry.
///
/// The caller owns the value until it hands the lease back with
/// [`ObjectPool::release`](crate::ObjectPool::release). Dropping a lease
/// without releasing it leaves its ticket counted as in use until the pool
/// is cleared.
pub struct Lease<T> {
    ticket: Ticket,
    value: T,
}

impl<T> Lease<T> {
    pub(crate) fn new(ticket: Ticket, value: T) -> Self {
        Self { ticket, value }
    }

    /// Reassemble a lease from parts previously split with [`Lease::into_parts`]
    pub fn from_parts(ticket: Ticket, value: T) -> Self {
        Self { ticket, value }
    }

    /// Split the lease into its ticket and value
    pub fn into_parts(self) -> (Ticket, T) {
        (self.ticket, self.value)
    }

    /// Ticket of this checkout
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

impl<T> Deref for Lease<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Lease<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T> AsRef<T> for Lease<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> AsMut<T> for Lease<T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Lease<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("ticket", &self.ticket)
            .field("value", &self.value)
            .finish()
    }
}
