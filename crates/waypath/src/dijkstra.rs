//! Dijkstra search over implicit graphs.
//!
//! Every node is settled at most once: the first time it leaves the
//! frontier its cost is final. This is only correct when no edge lowers the
//! cumulative cost, which the engine assumes but does not check.

use std::collections::HashMap;
use std::hash::Hash;

use waypath_queue::{ByValue, DecreaseKeyQueue, Identity, Natural, Order};

use crate::error::{PartialPaths, SearchError};
use crate::frontier::{ByCost, Reached};
use crate::settlement::{
    Aborted, Run, SearchStats, Settlement, SettledMap, ShortestPaths, infallible,
};

/// Dijkstra search configured with node identity and cost order strategies.
///
/// The neighbor callback receives a node and its settled cost and returns
/// `(neighbor, cost to neighbor)` pairs, where the cost is cumulative: the
/// callback adds the edge weight itself. The start node is settled at
/// `C::default()`.
///
/// ```
/// use waypath::Dijkstra;
///
/// let edges = |n: &u32, c: &u32| match n {
///     0 => vec![(1, c + 3), (2, c + 9)],
///     1 => vec![(2, c + 4)],
///     2 => vec![(3, c + 2)],
///     _ => vec![],
/// };
/// let path = Dijkstra::new().path(0, edges, 3).unwrap();
/// assert_eq!(path, vec![(0, 0), (1, 3), (2, 7), (3, 9)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra<I = ByValue, O = Natural> {
    identity: I,
    order: O,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I, O> Dijkstra<I, O> {
    /// Replace the node identity strategy.
    pub fn with_identity<J>(self, identity: J) -> Dijkstra<J, O> {
        Dijkstra {
            identity,
            order: self.order,
        }
    }

    /// Replace the cost order strategy.
    pub fn with_order<P>(self, order: P) -> Dijkstra<I, P> {
        Dijkstra {
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
        G: FnMut(&N) -> bool,
    {
        self.run(start, neighbors, is_goal)?.into_path(&self.identity)
    }

    // -----------------------------------------------------------------------
    // Full map
    // -----------------------------------------------------------------------

    /// Shortest-path tree of every node reachable from `start`.
    ///
    /// Runs until the frontier is empty, so it never returns on an infinite
    /// graph.
    pub fn paths<N, C, F, It>(&self, start: N, mut neighbors: F) -> ShortestPaths<N, C, I>
    where
        I: Identity<N> + Clone,
        O: Order<C>,
        N: Clone,
        C: Clone + Default,
        F: FnMut(&N, &C) -> It,
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
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
        It: IntoIterator<Item = (N, C)>,
        G: FnMut(&N) -> bool,
    {
        let identity = &self.identity;
        let mut settled: SettledMap<I::Key, N, C> = HashMap::new();
        let mut frontier = DecreaseKeyQueue::with_strategies(identity, ByCost(&self.order));
        let mut stats = SearchStats::default();

        frontier.enqueue_if_better(
            start.clone(),
            Reached {
                cost: C::default(),
                parent: None,
            },
        );
        stats.pushed += 1;

        while let Some((node, Reached { cost, parent })) = frontier.try_dequeue() {
            let key = identity.key(&node);
            if settled.contains_key(&key) {
                continue;
            }
            stats.settled += 1;
            log::trace!(
                "dijkstra: settled node #{} ({} on frontier)",
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
            for (next, next_cost) in successors {
                if settled.contains_key(&identity.key(&next)) {
                    continue;
                }
                let entry = Reached {
                    cost: next_cost,
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
        "dijkstra: {outcome}: {} settled, {} expanded, {} pushed",
        stats.settled,
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
    It: IntoIterator<Item = (N, C)>,
{
    Dijkstra::new().path_cost(start, neighbors, target)
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
    It: IntoIterator<Item = (N, C)>,
    G: FnMut(&N) -> bool,
{
    Dijkstra::new().path_cost_by(start, neighbors, is_goal)
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
    It: IntoIterator<Item = (N, C)>,
{
    Dijkstra::new().path(start, neighbors, target)
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
    It: IntoIterator<Item = (N, C)>,
    G: FnMut(&N) -> bool,
{
    Dijkstra::new().path_by(start, neighbors, is_goal)
}

/// Shortest-path tree of every node reachable from `start`.
pub fn shortest_paths<N, C, F, It>(start: N, neighbors: F) -> ShortestPaths<N, C>
where
    N: Hash + Eq + Clone,
    C: Ord + Clone + Default,
    F: FnMut(&N, &C) -> It,
    It: IntoIterator<Item = (N, C)>,
{
    Dijkstra::new().paths(start, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use waypath_queue::{ByKey, OrderBy};

    fn line(n: &u32, c: &u32) -> Vec<(u32, u32)> {
        match n {
            0 => vec![(1, c + 3), (2, c + 9)],
            1 => vec![(2, c + 4)],
            2 => vec![(3, c + 2)],
            _ => vec![],
        }
    }

    fn diamond(n: &u32, c: &u32) -> Vec<(u32, u32)> {
        match n {
            0 => vec![(1, c + 1), (2, c + 1)],
            1 | 2 => vec![(3, c + 1)],
            _ => vec![],
        }
    }

    #[test]
    fn line_graph_path() {
        let path = shortest_path(0, line, 3).unwrap();
        assert_eq!(path, vec![(0, 0), (1, 3), (2, 7), (3, 9)]);
        assert_eq!(shortest_path_cost(0, line, 3), Ok(9));
    }

    #[test]
    fn unreachable_goal() {
        let none = |_: &char, _: &u32| Vec::<(char, u32)>::new();
        assert_eq!(shortest_path_cost('A', none, 'B'), Err(SearchError::Unreachable));
        assert_eq!(shortest_path('A', none, 'B'), Err(SearchError::Unreachable));
    }

    #[test]
    fn start_is_goal() {
        assert_eq!(shortest_path(2, line, 2), Ok(vec![(2, 0)]));
        assert_eq!(shortest_path_cost(2, line, 2), Ok(0));
    }

    #[test]
    fn diamond_full_map() {
        let paths = shortest_paths(0, diamond);
        assert_eq!(paths.len(), 4);
        for (node, cost) in [(0, 0), (1, 1), (2, 1), (3, 2)] {
            assert_eq!(paths.cost(&node), Some(&cost));
        }
        let pred = paths.predecessor(&3).copied();
        assert!(pred == Some(1) || pred == Some(2));
        assert_eq!(paths.predecessor(&0), None);
        let path = paths.path_to(&3).unwrap();
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(3, 2)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn diamond_tie_break_is_stable() {
        let a = shortest_paths(0, diamond);
        let b = shortest_paths(0, diamond);
        assert_eq!(a.predecessor(&3), b.predecessor(&3));
    }

    #[test]
    fn cycle_does_not_revisit() {
        let visits = Cell::new(0u32);
        let ring = |n: &u32, c: &u32| {
            visits.set(visits.get() + 1);
            vec![((n + 1) % 5, c + 1), ((n + 4) % 5, c + 1)]
        };
        let paths = shortest_paths(0u32, ring);
        assert_eq!(paths.len(), 5);
        assert_eq!(visits.get(), 5);
        assert_eq!(paths.cost(&2), Some(&2));
        assert_eq!(paths.cost(&3), Some(&2));
    }

    #[test]
    fn zero_cost_cycle_terminates() {
        let loopy = |n: &u32, c: &u32| match n {
            0 => vec![(1, *c)],
            1 => vec![(0, *c), (2, c + 5)],
            _ => vec![],
        };
        assert_eq!(shortest_path(0, loopy, 2), Ok(vec![(0, 0), (1, 0), (2, 5)]));
    }

    #[test]
    fn predicate_goal_finds_nearest() {
        // Number line from 11; exits at 7 (four steps) and 14 (three).
        let walk = |n: &i32, c: &u32| vec![(n - 1, c + 1), (n + 1, c + 1)];
        let path = shortest_path_by(11, walk, |n: &i32| n % 7 == 0).unwrap();
        assert_eq!(path.last(), Some(&(14, 3)));
        assert_eq!(path.len(), 4);
        assert_eq!(shortest_path_cost_by(11, walk, |n: &i32| n % 7 == 0), Ok(3));
    }

    #[test]
    fn decrease_key_updates_parent() {
        // 0→2 is expensive; 0→1→2 is cheaper but discovered second.
        let g = |n: &u32, c: &u32| match n {
            0 => vec![(2, c + 10), (1, c + 1)],
            1 => vec![(2, c + 1)],
            _ => vec![],
        };
        let paths = shortest_paths(0, g);
        assert_eq!(paths.cost(&2), Some(&2));
        assert_eq!(paths.predecessor(&2), Some(&1));
    }

    #[test]
    fn custom_identity() {
        // Nodes carry a label that identity ignores.
        let g = |n: &(u32, &'static str), c: &u32| match n.0 {
            0 => vec![((1, "via a"), c + 1)],
            1 => vec![((2, "via b"), c + 1)],
            _ => vec![],
        };
        let search = Dijkstra::new().with_identity(ByKey(|n: &(u32, &'static str)| n.0));
        let path = search.path((0, "start"), g, (2, "anything")).unwrap();
        assert_eq!(path.last(), Some(&((2, "via b"), 2)));
    }

    #[test]
    fn float_costs_with_custom_order() {
        let g = |n: &u8, c: &f64| match n {
            0 => vec![(1, c + 0.5), (2, c + 2.0)],
            1 => vec![(2, c + 0.25)],
            _ => vec![],
        };
        let search = Dijkstra::new().with_order(OrderBy(|a: &f64, b: &f64| a.total_cmp(b)));
        assert_eq!(search.path_cost(0, g, 2), Ok(0.75));
    }

    #[test]
    fn callback_error_propagates() {
        let g = |n: &u32, c: &u32| {
            if *n == 2 {
                Err("edge table corrupt")
            } else {
                Ok(vec![(n + 1, c + 1)])
            }
        };
        let search = Dijkstra::new();
        assert_eq!(
            search.try_path_cost(0, g, 5),
            Err(SearchError::Neighbors("edge table corrupt"))
        );
        let partial = search.try_paths(0, g).unwrap_err();
        assert_eq!(partial.error, "edge table corrupt");
        assert_eq!(partial.paths.len(), 3);
        assert_eq!(partial.paths.cost(&2), Some(&2));
    }

    #[test]
    fn stats_are_counted() {
        let paths = shortest_paths(0, line);
        let stats = paths.stats();
        assert_eq!(stats.settled, 4);
        assert_eq!(stats.expanded, 4);
        assert_eq!(stats.reopened, 0);
        // Start, 1, 2 (at 9), 2 again (decreased to 7), 3.
        assert_eq!(stats.pushed, 5);
    }
}
