use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use waypath_queue::{ByValue, Identity};

use crate::error::{PartialPaths, SearchError};

/// A node whose shortest cost has been finalized, with the node it was
/// reached from. The start node has no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement<N, C> {
    pub node: N,
    pub predecessor: Option<N>,
    pub cost: C,
}

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Settlements written, re-openings included.
    pub settled: usize,
    /// Neighbor callback invocations.
    pub expanded: usize,
    /// Frontier insertions and decrease-key updates.
    pub pushed: usize,
    /// Settled nodes overwritten by a cheaper path (A* only).
    pub reopened: usize,
}

pub(crate) type SettledMap<K, N, C> = HashMap<K, Settlement<N, C>>;

// ---------------------------------------------------------------------------
// Driver output
// ---------------------------------------------------------------------------

/// What a driver loop produced: the settlement map and the goal's key, if
/// the goal was settled before the frontier ran dry.
pub(crate) struct Run<N, C, K> {
    pub(crate) start: N,
    pub(crate) settled: SettledMap<K, N, C>,
    pub(crate) goal: Option<K>,
    pub(crate) stats: SearchStats,
}

/// A driver loop cut short by a failing neighbor callback.
pub(crate) struct Aborted<N, C, K, E> {
    pub(crate) start: N,
    pub(crate) settled: SettledMap<K, N, C>,
    pub(crate) stats: SearchStats,
    pub(crate) error: E,
}

impl<N, C, K, E> From<Aborted<N, C, K, E>> for SearchError<E> {
    fn from(aborted: Aborted<N, C, K, E>) -> Self {
        SearchError::Neighbors(aborted.error)
    }
}

impl<N, C, K> Run<N, C, K>
where
    N: Clone,
    C: Clone,
    K: Hash + Eq,
{
    pub(crate) fn into_cost<E>(mut self) -> Result<C, SearchError<E>> {
        let goal = self.goal.ok_or(SearchError::Unreachable)?;
        self.settled
            .remove(&goal)
            .map(|s| s.cost)
            .ok_or(SearchError::Unreachable)
    }

    pub(crate) fn into_path<I, E>(self, identity: &I) -> Result<Vec<(N, C)>, SearchError<E>>
    where
        I: Identity<N, Key = K>,
    {
        let goal = self.goal.as_ref().ok_or(SearchError::Unreachable)?;
        Ok(trace_back(identity, &self.settled, goal))
    }

    pub(crate) fn into_paths<I>(self, identity: I) -> ShortestPaths<N, C, I>
    where
        I: Identity<N, Key = K>,
    {
        ShortestPaths {
            start: self.start,
            settled: self.settled,
            identity,
            stats: self.stats,
        }
    }
}

impl<N, C, K, E> Aborted<N, C, K, E> {
    pub(crate) fn into_partial<I>(self, identity: I) -> PartialPaths<N, C, I, E>
    where
        I: Identity<N, Key = K>,
    {
        PartialPaths {
            paths: ShortestPaths {
                start: self.start,
                settled: self.settled,
                identity,
                stats: self.stats,
            },
            error: self.error,
        }
    }
}

/// Lift an infallible neighbor callback into the fallible shape.
pub(crate) fn infallible<'f, N, C, F, It>(
    neighbors: &'f mut F,
) -> impl FnMut(&N, &C) -> Result<It, Infallible> + 'f
where
    F: FnMut(&N, &C) -> It,
{
    move |n: &N, c: &C| Ok(neighbors(n, c))
}

/// Walk predecessor links from `goal` back to the start and return the
/// steps in start → goal order.
///
/// The walk is capped at one step per settled node, so it always
/// terminates even if the non-negative cost precondition was violated.
pub(crate) fn trace_back<N, C, I>(
    identity: &I,
    settled: &SettledMap<I::Key, N, C>,
    goal: &I::Key,
) -> Vec<(N, C)>
where
    N: Clone,
    C: Clone,
    I: Identity<N>,
{
    let steps = std::iter::successors(settled.get(goal), |step| {
        step.predecessor
            .as_ref()
            .and_then(|p| settled.get(&identity.key(p)))
    });
    let mut path: Vec<(N, C)> = steps
        .take(settled.len())
        .map(|s| (s.node.clone(), s.cost.clone()))
        .collect();
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// ShortestPaths
// ---------------------------------------------------------------------------

/// Single-source shortest-path tree produced by a full-map search.
///
/// Holds a [`Settlement`] for every node the search reached. It is built
/// once per search and never modified afterwards; any number of paths can
/// be read out of it with [`path_to`](Self::path_to).
pub struct ShortestPaths<N, C, I: Identity<N> = ByValue> {
    start: N,
    settled: SettledMap<I::Key, N, C>,
    identity: I,
    stats: SearchStats,
}

impl<N, C, I: Identity<N>> ShortestPaths<N, C, I> {
    /// The node the search started from.
    pub fn start(&self) -> &N {
        &self.start
    }

    /// Settlement for `node`, or `None` if it was never reached.
    pub fn get(&self, node: &N) -> Option<&Settlement<N, C>> {
        self.settled.get(&self.identity.key(node))
    }

    /// Shortest cost from the start to `node`.
    pub fn cost(&self, node: &N) -> Option<&C> {
        self.get(node).map(|s| &s.cost)
    }

    /// The node `node` was reached from. `None` for the start node and for
    /// nodes that were never reached; use [`contains`](Self::contains) to
    /// tell them apart.
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.get(node).and_then(|s| s.predecessor.as_ref())
    }

    pub fn contains(&self, node: &N) -> bool {
        self.settled.contains_key(&self.identity.key(node))
    }

    /// Number of reached nodes, start included.
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }

    /// All settlements, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Settlement<N, C>> {
        self.settled.values()
    }

    /// Counters from the search that produced this map.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Take the raw mapping from node key to settlement.
    pub fn into_settlements(self) -> HashMap<I::Key, Settlement<N, C>> {
        self.settled
    }
}

impl<N, C, I> ShortestPaths<N, C, I>
where
    N: Clone,
    C: Clone,
    I: Identity<N>,
{
    /// Reconstruct the path from the start to `node` as `(node, cost)`
    /// steps, or `None` if `node` was never reached.
    pub fn path_to(&self, node: &N) -> Option<Vec<(N, C)>> {
        let key = self.identity.key(node);
        if !self.settled.contains_key(&key) {
            return None;
        }
        Some(trace_back(&self.identity, &self.settled, &key))
    }
}

impl<N, C, I> fmt::Debug for ShortestPaths<N, C, I>
where
    N: fmt::Debug,
    C: fmt::Debug,
    I: Identity<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.settled
                    .values()
                    .map(|s| (&s.node, (&s.predecessor, &s.cost))),
            )
            .finish()
    }
}
