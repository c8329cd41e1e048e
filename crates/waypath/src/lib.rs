//! Shortest-path search over implicit graphs.
//!
//! Graphs are never materialized: the caller supplies a start node and a
//! neighbor callback, and the search asks for a node's neighbors only when it
//! expands that node. This makes the crate usable on grids, state spaces,
//! puzzles and other graphs that are too large (or infinite) to build.
//!
//! Two algorithms, each in three shapes:
//!
//! | | cost only | single path | full map |
//! |---|---|---|---|
//! | **Dijkstra** ([`Dijkstra`]) | [`dijkstra::shortest_path_cost`] | [`dijkstra::shortest_path`] | [`dijkstra::shortest_paths`] |
//! | **A\*** ([`AStar`]) | [`astar::shortest_path_cost`] | [`astar::shortest_path`] | [`astar::shortest_paths`] |
//!
//! The free functions use the nodes' own `Hash + Eq` and the costs' own
//! `Ord`. The [`Dijkstra`] and [`AStar`] builders accept custom
//! [`Identity`] and [`Order`] strategies, goal predicates instead of target
//! nodes, and fallible neighbor callbacks.
//!
//! # Costs
//!
//! The engine never adds costs. The callback receives the settled cost of
//! the node being expanded and returns the cumulative cost of each
//! neighbor. Costs must never decrease along a path; negative edges give
//! undefined (but terminating) results.
//!
//! ```
//! use waypath::dijkstra;
//!
//! // 0 →(1) 1 →(1) 3, 0 →(1) 2 →(1) 3
//! let diamond = |n: &u8, c: &u32| match n {
//!     0 => vec![(1, c + 1), (2, c + 1)],
//!     1 | 2 => vec![(3, c + 1)],
//!     _ => vec![],
//! };
//! let paths = dijkstra::shortest_paths(0, diamond);
//! assert_eq!(paths.cost(&3), Some(&2));
//! assert_eq!(paths.path_to(&3).map(|p| p.len()), Some(3));
//! ```

pub mod astar;
pub mod dijkstra;
mod error;
mod frontier;
mod settlement;

pub use astar::AStar;
pub use dijkstra::Dijkstra;
pub use error::{PartialPaths, SearchError};
pub use frontier::{Estimate, EstimateOrder};
pub use settlement::{SearchStats, Settlement, ShortestPaths};
pub use waypath_queue::{ByKey, ByValue, DecreaseKeyQueue, Identity, Natural, Order, OrderBy};
