use std::cmp::Ordering;

use waypath_queue::Order;

// ---------------------------------------------------------------------------
// A* priority
// ---------------------------------------------------------------------------

/// Queue priority used by A*: the caller's estimate of the total cost of a
/// path through a node, and the cost actually traversed to reach it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate<C> {
    pub estimate: C,
    pub traversed: C,
}

/// Orders [`Estimate`]s by estimate, smallest first. Among equal estimates
/// the one that has traversed more comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateOrder<O>(pub O);

impl<C, O: Order<C>> Order<Estimate<C>> for EstimateOrder<O> {
    fn compare(&self, a: &Estimate<C>, b: &Estimate<C>) -> Ordering {
        self.0
            .compare(&a.estimate, &b.estimate)
            .then_with(|| self.0.compare(&b.traversed, &a.traversed))
    }
}

// ---------------------------------------------------------------------------
// Frontier entries
// ---------------------------------------------------------------------------

/// Dijkstra frontier entry: cost so far and the node it was reached from.
pub(crate) struct Reached<N, C> {
    pub(crate) cost: C,
    pub(crate) parent: Option<N>,
}

/// Orders [`Reached`] entries by cost alone; the parent is payload.
pub(crate) struct ByCost<O>(pub(crate) O);

impl<N, C, O: Order<C>> Order<Reached<N, C>> for ByCost<O> {
    #[inline]
    fn compare(&self, a: &Reached<N, C>, b: &Reached<N, C>) -> Ordering {
        self.0.compare(&a.cost, &b.cost)
    }
}

/// A* frontier entry.
pub(crate) struct Guess<N, C> {
    pub(crate) priority: Estimate<C>,
    pub(crate) parent: Option<N>,
}

pub(crate) struct ByEstimate<O>(pub(crate) EstimateOrder<O>);

impl<N, C, O: Order<C>> Order<Guess<N, C>> for ByEstimate<O> {
    #[inline]
    fn compare(&self, a: &Guess<N, C>, b: &Guess<N, C>) -> Ordering {
        self.0.compare(&a.priority, &b.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_queue::{DecreaseKeyQueue, Natural};

    fn est(estimate: u32, traversed: u32) -> Estimate<u32> {
        Estimate {
            estimate,
            traversed,
        }
    }

    #[test]
    fn estimate_decides_first() {
        let o = EstimateOrder(Natural);
        assert_eq!(o.compare(&est(3, 0), &est(4, 9)), Ordering::Less);
    }

    #[test]
    fn ties_prefer_more_ground() {
        let o = EstimateOrder(Natural);
        assert_eq!(o.compare(&est(5, 4), &est(5, 1)), Ordering::Less);
        assert_eq!(o.compare(&est(5, 4), &est(5, 4)), Ordering::Equal);
    }

    #[test]
    fn parent_does_not_affect_order() {
        let mut q = DecreaseKeyQueue::with_strategies(waypath_queue::ByValue, ByCost(Natural));
        q.enqueue_if_better(
            'x',
            Reached {
                cost: 4,
                parent: Some('a'),
            },
        );
        // Same cost through another parent is not an improvement.
        assert!(!q.enqueue_if_better(
            'x',
            Reached {
                cost: 4,
                parent: Some('b'),
            },
        ));
        let (_, reached) = q.try_dequeue().unwrap();
        assert_eq!(reached.parent, Some('a'));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn estimate_round_trip() {
        let e = Estimate {
            estimate: 12,
            traversed: 7,
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: Estimate<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
