//! Trait for entries that know how to return to their empty shape

use bytes::BytesMut;

/// Trait for values that can be pooled
///
/// `reset` must restore the value to the same state its `Default` impl (or
/// pool factory) produces, mutating in place so backing storage is kept.
///
/// # Example
/// ```
/// use tradepool::Poolable;
///
/// #[derive(Default)]
/// struct Quote {
///     venue: String,
///     px: f64,
/// }
///
/// impl Poolable for Quote {
///     fn reset(&mut self) {
///         self.venue.clear();
///         self.px = 0.0;
///     }
/// }
/// ```
pub trait Poolable: Send + 'static {
    /// Reset the value to its empty shape
    fn reset(&mut self);
}

impl Poolable for String {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T: Send + 'static> Poolable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Poolable for BytesMut {
    fn reset(&mut self) {
        self.clear();
    }
}
