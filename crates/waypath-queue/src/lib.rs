//! **waypath-queue**: a minimum-priority queue with decrease-key.
//!
//! [`DecreaseKeyQueue`] holds at most one entry per item identity. Pushing an
//! item that is already queued only takes effect when the new priority is
//! strictly better, in which case the existing entry is updated in place
//! instead of being duplicated. This is the operation shortest-path searches
//! rely on to keep their frontier small.
//!
//! Both item identity and priority order are pluggable strategies:
//!
//! | Trait | Default | Closure form |
//! |---|---|---|
//! | [`Identity`] | [`ByValue`] | [`ByKey`] |
//! | [`Order`] | [`Natural`] | [`OrderBy`] |
//!
//! ```
//! use waypath_queue::DecreaseKeyQueue;
//!
//! let mut q = DecreaseKeyQueue::new();
//! q.enqueue_if_better("a", 5);
//! q.enqueue_if_better("a", 3);
//! q.enqueue_if_better("a", 4);
//! assert_eq!(q.len(), 1);
//! assert_eq!(q.try_dequeue(), Some(("a", 3)));
//! ```

mod queue;
mod strategy;

pub use queue::DecreaseKeyQueue;
pub use strategy::{ByKey, ByValue, Descending, Identity, Natural, Order, OrderBy};
