//! A* search over implicit graphs.
//!
//! The frontier is ordered by the caller's estimate of the total path cost,
//! ties going to the entry that has traversed more. A settled node is
//! re-opened when a strictly cheaper path to it turns up later, which keeps
//! results optimal for admissible heuristics that are not consistent.

use std::collections::HashMap;
use std::hash::Hash;

use waypath_queue::{ByValue, DecreaseKeyQueue, Identity, Natural, Order};

use crate::error::{PartialPaths, SearchError};
use crate::frontier::{ByEstimate, Estimate, EstimateOrder, Guess};
use crate::settlement::{
    Aborted, Run, SearchStats, Settlement, SettledMap, ShortestPaths, infallible,
};

/// A* search configured with node identity and cost order strategies.
///
/// The neighbor callback receives a node and its settled cost and returns
/// `(neighbor, cost to neighbor, estimate)` triples. Both costs are
/// cumulative; `estimate` is the best guess of the total cost of reaching
/// the goal through `neighbor`, i.e. the cost to the neighbor plus a
/// heuristic. With an estimate equal to the cost, A* behaves like Dijkstra.
///
/// ```
/// use waypath::AStar;
///
/// let goal = 6i32;
/// let step = |n: &i32, c: &u32| {
///     [n - 1, n + 1].map(|m| (m, c + 1, c + 1 + m.abs_diff(goal)))
/// };
/// assert_eq!(AStar::new().path_cost(0, step, goal), Ok(6));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar<I = ByValue, O = Natural> {
    identity: I,
    order: O,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I, O> AStar<I, O> {
    /// Replace the node identity strategy.
    pub fn with_identity<J>(self, identity: J) -> AStar<J, O> {
        AStar {
            identity,
            order: self.order,
        }
    }

    /// Replace the cost order strategy. It orders both traversed costs and
    /// estimates.
    pub fn with_order<P>(self, order: P) -> AStar<I, P> {
        AStar {
            identity: self.identity,
            order,
        }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    // -----------------------------------------------------------------------
    // Cost only
    // -----------------------------------------------------------------------

    /// Cost of the cheapest path from `start` to `target`.
    pub fn path_cost<N, C, F, It>(
        &self,
        start: N,
        mut neighbors: F,
        target: N,
    ) -> Result<C, SearchError>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C, C)>,
    {
        self.try_path_cost(start, infallible(&mut neighbors), target)
    }

    /// Cost of the cheapest path from `start` to any node satisfying `is_goal`.
    pub fn path_cost_by<N, C, F, It, G>(
        &self,
        start: N,
        mut neighbors: F,
        is_goal: G,
    ) -> Result<C, SearchError>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C, C)>,
        G: FnMut(&N) -> bool,
    {
        self.try_path_cost_by(start, infallible(&mut neighbors), is_goal)
    }

    /// [`path_cost`](Self::path_cost) with a fallible neighbor callback.
    pub fn try_path_cost<N, C, E, F, It>(
        &self,
        start: N,
        neighbors: F,
        target: N,
    ) -> Result<C, SearchError<E>>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
    {
        let target = self.identity.key(&target);
        self.try_path_cost_by(start, neighbors, |n: &N| self.identity.key(n) == target)
    }

    /// [`path_cost_by`](Self::path_cost_by) with a fallible neighbor callback.
    pub fn try_path_cost_by<N, C, E, F, It, G>(
        &self,
        start: N,
        neighbors: F,
        is_goal: G,
    ) -> Result<C, SearchError<E>>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
        G: FnMut(&N) -> bool,
    {
        self.run(start, neighbors, is_goal)?.into_cost()
    }

    // -----------------------------------------------------------------------
    // Single path
    // -----------------------------------------------------------------------

    /// Cheapest path from `start` to `target` as `(node, cumulative cost)`
    /// steps, both ends included.
    pub fn path<N, C, F, It>(
        &self,
        start: N,
        mut neighbors: F,
        target: N,
    ) -> Result<Vec<(N, C)>, SearchError>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C, C)>,
    {
        self.try_path(start, infallible(&mut neighbors), target)
    }

    /// Cheapest path from `start` to the nearest node satisfying `is_goal`.
    pub fn path_by<N, C, F, It, G>(
        &self,
        start: N,
        mut neighbors: F,
        is_goal: G,
    ) -> Result<Vec<(N, C)>, SearchError>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C, C)>,
        G: FnMut(&N) -> bool,
    {
        self.try_path_by(start, infallible(&mut neighbors), is_goal)
    }

    /// [`path`](Self::path) with a fallible neighbor callback.
    pub fn try_path<N, C, E, F, It>(
        &self,
        start: N,
        neighbors: F,
        target: N,
    ) -> Result<Vec<(N, C)>, SearchError<E>>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
    {
        let target = self.identity.key(&target);
        self.try_path_by(start, neighbors, |n: &N| self.identity.key(n) == target)
    }

    /// [`path_by`](Self::path_by) with a fallible neighbor callback.
    pub fn try_path_by<N, C, E, F, It, G>(
        &self,
        start: N,
        neighbors: F,
        is_goal: G,
    ) -> Result<Vec<(N, C)>, SearchError<E>>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
        G: FnMut(&N) -> bool,
    {
        self.run(start, neighbors, is_goal)?.into_path(&self.identity)
    }

    // -----------------------------------------------------------------------
    // Full map
    // -----------------------------------------------------------------------

    /// Shortest-path tree of every node reachable from `start`, explored in
    /// estimate order. Re-opening guarantees the final costs are shortest
    /// regardless of the estimates. Never returns on an infinite graph.
    pub fn paths<N, C, F, It>(&self, start: N, mut neighbors: F) -> ShortestPaths<N, C, I>
    where
        I: Identity<N> + Clone,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C, C)>,
    {
        match self.try_paths(start, infallible(&mut neighbors)) {
            Ok(paths) => paths,
            Err(partial) => match partial.error {},
        }
    }

    /// [`paths`](Self::paths) with a fallible neighbor callback. On failure
    /// the settlements made so far are returned alongside the error.
    pub fn try_paths<N, C, E, F, It>(
        &self,
        start: N,
        neighbors: F,
    ) -> Result<ShortestPaths<N, C, I>, PartialPaths<N, C, I, E>>
    where
        I: Identity<N> + Clone,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
    {
        match self.run(start, neighbors, |_: &N| false) {
            Ok(run) => Ok(run.into_paths(self.identity.clone())),
            Err(aborted) => Err(aborted.into_partial(self.identity.clone())),
        }
    }

    // -----------------------------------------------------------------------
    // Driver loop
    // -----------------------------------------------------------------------

    fn run<N, C, E, F, It, G>(
        &self,
        start: N,
        mut neighbors: F,
        mut is_goal: G,
    ) -> Result<Run<N, C, I::Key>, Aborted<N, C, I::Key, E>>
    where
        I: Identity<N>,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> Result<It, E>,
        It: IntoIterator<Item = (N, C, C)>,
        G: FnMut(&N) -> bool,
    {
        let identity = &self.identity;
        let order = &self.order;
        let mut settled: SettledMap<I::Key, N, C> = HashMap::new();
        let mut frontier =
            DecreaseKeyQueue::with_strategies(identity, ByEstimate(EstimateOrder(order)));
        let mut stats = SearchStats::default();

        frontier.enqueue_if_better(
            start.clone(),
            Guess {
                priority: Estimate {
                    estimate: C::default(),
                    traversed: C::default(),
                },
                parent: None,
            },
        );
        stats.pushed += 1;

        while let Some((node, Guess { priority, parent })) = frontier.try_dequeue() {
            let key = identity.key(&node);
            let cost = priority.traversed;
            if let Some(previous) = settled.get(&key) {
                if !order.less(&cost, &previous.cost) {
                    continue;
                }
                stats.reopened += 1;
                log::trace!("astar: re-opening a node settled at a higher cost");
            }
            stats.settled += 1;
            log::trace!(
                "astar: settled node #{} ({} on frontier)",
                stats.settled,
                frontier.len()
            );

            let reached = is_goal(&node);
            settled.insert(
                key.clone(),
                Settlement {
                    node: node.clone(),
                    predecessor: parent,
                    cost: cost.clone(),
                },
            );
            if reached {
                log_finish("goal reached", &stats);
                return Ok(Run {
                    start,
                    settled,
                    goal: Some(key),
                    stats,
                });
            }

            stats.expanded += 1;
            let successors = match neighbors(&node, &cost) {
                Ok(successors) => successors,
                Err(error) => {
                    log_finish("neighbor callback failed", &stats);
                    return Err(Aborted {
                        start,
                        settled,
                        stats,
                        error,
                    });
                }
            };
            for (next, next_cost, estimate) in successors {
                if let Some(previous) = settled.get(&identity.key(&next)) {
                    if !order.less(&next_cost, &previous.cost) {
                        continue;
                    }
                }
                let entry = Guess {
                    priority: Estimate {
                        estimate,
                        traversed: next_cost,
                    },
                    parent: Some(node.clone()),
                };
                if frontier.enqueue_if_better(next, entry) {
                    stats.pushed += 1;
                }
            }
        }

        log_finish("frontier exhausted", &stats);
        Ok(Run {
            start,
            settled,
            goal: None,
            stats,
        })
    }
}

fn log_finish(outcome: &str, stats: &SearchStats) {
    log::debug!(
        "astar: {outcome}: {} settled ({} re-opened), {} expanded, {} pushed",
        stats.settled,
        stats.reopened,
        stats.expanded,
        stats.pushed
    );
}

// ---------------------------------------------------------------------------
// Shorthands with default strategies
// ---------------------------------------------------------------------------

/// Cost of the cheapest path from `start` to `target`.
pub fn shortest_path_cost<N, C, F, It>(start: N, neighbors: F, target: N) -> Result<C, SearchError>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C, C)>,
{
    AStar::new().path_cost(start, neighbors, target)
}

/// Cost of the cheapest path from `start` to any node satisfying `is_goal`.
pub fn shortest_path_cost_by<N, C, F, It, G>(
    start: N,
    neighbors: F,
    is_goal: G,
) -> Result<C, SearchError>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C, C)>,
    G: FnMut(&N) -> bool,
{
    AStar::new().path_cost_by(start, neighbors, is_goal)
}

/// Cheapest path from `start` to `target`, both ends included.
pub fn shortest_path<N, C, F, It>(
    start: N,
    neighbors: F,
    target: N,
) -> Result<Vec<(N, C)>, SearchError>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C, C)>,
{
    AStar::new().path(start, neighbors, target)
}

/// Cheapest path from `start` to the nearest node satisfying `is_goal`.
pub fn shortest_path_by<N, C, F, It, G>(
    start: N,
    neighbors: F,
    is_goal: G,
) -> Result<Vec<(N, C)>, SearchError>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C, C)>,
    G: FnMut(&N) -> bool,
{
    AStar::new().path_by(start, neighbors, is_goal)
}

/// Shortest-path tree of every node reachable from `start`.
pub fn shortest_paths<N, C, F, It>(start: N, neighbors: F) -> ShortestPaths<N, C>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C, C)>,
{
    AStar::new().paths(start, neighbors)
}
