use std::cmp::Ordering;
use std::hash::Hash;

/// Maps an item onto the key that identifies it.
///
/// Two items are the same queue entry (or the same graph node) exactly when
/// their keys compare equal.
pub trait Identity<T> {
    type Key: Hash + Eq + Clone;

    fn key(&self, item: &T) -> Self::Key;
}

/// Total order over priorities. `Less` means "dequeued first".
pub trait Order<P> {
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// Whether `a` is strictly better than `b`.
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

// ---------------------------------------------------------------------------
// Identity strategies
// ---------------------------------------------------------------------------

/// Items are their own key (`Hash + Eq`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByValue;

impl<T: Hash + Eq + Clone> Identity<T> for ByValue {
    type Key = T;

    #[inline]
    fn key(&self, item: &T) -> T {
        item.clone()
    }
}

/// Identity through a key-extraction closure.
///
/// ```
/// use waypath_queue::{ByKey, Identity};
///
/// let id = ByKey(|s: &String| s.to_ascii_lowercase());
/// assert_eq!(id.key(&"Cold".to_string()), id.key(&"COLD".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Identity<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Hash + Eq + Clone,
{
    type Key = K;

    #[inline]
    fn key(&self, item: &T) -> K {
        (self.0)(item)
    }
}

impl<T, I: Identity<T> + ?Sized> Identity<T> for &I {
    type Key = I::Key;

    #[inline]
    fn key(&self, item: &T) -> I::Key {
        (**self).key(item)
    }
}

// ---------------------------------------------------------------------------
// Order strategies
// ---------------------------------------------------------------------------

/// The priority type's own `Ord`, smallest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<P: Ord> Order<P> for Natural {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// Order through a comparison closure. This is how floating-point costs
/// are used: `OrderBy(|a: &f64, b: &f64| a.total_cmp(b))`.
#[derive(Clone, Copy)]
pub struct OrderBy<F>(pub F);

impl<P, F> Order<P> for OrderBy<F>
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        (self.0)(a, b)
    }
}

/// Flips another order, turning the min-queue into a max-queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending<O>(pub O);

impl<P, O: Order<P>> Order<P> for Descending<O> {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<P, O: Order<P> + ?Sized> Order<P> for &O {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        (**self).compare(a, b)
    }
}
