use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use waypath::{AStar, Dijkstra, SearchError, astar, dijkstra};

type Adjacency = Vec<Vec<(usize, u32)>>;

fn random_graph(
    rng: &mut SmallRng,
    n: usize,
    edges: usize,
    weights: std::ops::RangeInclusive<u32>,
) -> Adjacency {
    let mut adj = vec![Vec::new(); n];
    for _ in 0..edges {
        let from = rng.random_range(0..n);
        let to = rng.random_range(0..n);
        adj[from].push((to, rng.random_range(weights.clone())));
    }
    adj
}

fn random_dag(rng: &mut SmallRng, n: usize, edges: usize) -> Adjacency {
    let mut adj = vec![Vec::new(); n];
    for _ in 0..edges {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a == b {
            continue;
        }
        let (from, to) = (a.min(b), a.max(b));
        adj[from].push((to, rng.random_range(0..=20)));
    }
    adj
}

fn reversed(adj: &Adjacency) -> Adjacency {
    let mut rev = vec![Vec::new(); adj.len()];
    for (from, out) in adj.iter().enumerate() {
        for &(to, w) in out {
            rev[to].push((from, w));
        }
    }
    rev
}

/// Bellman-Ford reference distances from `start`.
fn reference(adj: &Adjacency, start: usize) -> Vec<Option<u32>> {
    let mut dist = vec![None; adj.len()];
    dist[start] = Some(0);
    for _ in 0..adj.len() {
        let mut changed = false;
        for (from, out) in adj.iter().enumerate() {
            let Some(d) = dist[from] else {
                continue;
            };
            for &(to, w) in out {
                if dist[to].is_none_or(|old| d + w < old) {
                    dist[to] = Some(d + w);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

fn edges_of(adj: &Adjacency) -> impl FnMut(&usize, &u32) -> Vec<(usize, u32)> + '_ {
    move |n: &usize, c: &u32| adj[*n].iter().map(|&(m, w)| (m, c + w)).collect()
}

fn edges_with_estimate<'a>(
    adj: &'a Adjacency,
    h: &'a [u32],
) -> impl FnMut(&usize, &u32) -> Vec<(usize, u32, u32)> + 'a {
    move |n: &usize, c: &u32| {
        adj[*n]
            .iter()
            .map(|&(m, w)| (m, c + w, c + w + h[m]))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn line_graph_example() {
    let line = |n: &u32, c: &u32| match n {
        0 => vec![(1, c + 3), (2, c + 9)],
        1 => vec![(2, c + 4)],
        2 => vec![(3, c + 2)],
        _ => vec![],
    };
    assert_eq!(
        dijkstra::shortest_path(0, line, 3),
        Ok(vec![(0, 0), (1, 3), (2, 7), (3, 9)])
    );
}

#[test]
fn unreachable_example() {
    let nothing = |_: &&str, _: &u32| std::iter::empty::<(&str, u32)>();
    assert_eq!(
        dijkstra::shortest_path_cost("A", nothing, "B"),
        Err(SearchError::Unreachable)
    );
    let nothing = |_: &&str, _: &u32| std::iter::empty::<(&str, u32, u32)>();
    assert_eq!(
        astar::shortest_path_cost("A", nothing, "B"),
        Err(SearchError::Unreachable)
    );
}

#[test]
fn diamond_example() {
    let diamond = |n: &u32, c: &u32| match n {
        0 => vec![(1, c + 1), (2, c + 1)],
        1 | 2 => vec![(3, c + 1)],
        _ => vec![],
    };
    let paths = dijkstra::shortest_paths(0, diamond);
    let mut costs: Vec<(u32, u32)> = paths.iter().map(|s| (s.node, s.cost)).collect();
    costs.sort();
    assert_eq!(costs, vec![(0, 0), (1, 1), (2, 1), (3, 2)]);
    assert!(matches!(paths.predecessor(&3), Some(1) | Some(2)));
}

// ---------------------------------------------------------------------------
// Properties over random graphs
// ---------------------------------------------------------------------------

#[test]
fn dijkstra_matches_reference_distances() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..40 {
        let adj = random_graph(&mut rng, 30, 90, 0..=12);
        let expected = reference(&adj, 0);
        let paths = dijkstra::shortest_paths(0, edges_of(&adj));
        for (node, want) in expected.iter().enumerate() {
            assert_eq!(paths.cost(&node), want.as_ref(), "node {node}");
        }
    }
}

#[test]
fn unit_cost_astar_with_zero_heuristic_matches_dijkstra() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..40 {
        let adj = random_graph(&mut rng, 25, 60, 1..=1);
        let zero = vec![0; adj.len()];
        let goal = rng.random_range(0..adj.len());

        let d = dijkstra::shortest_path(0, edges_of(&adj), goal);
        let a = astar::shortest_path(0, edges_with_estimate(&adj, &zero), goal);
        match (d, a) {
            (Ok(d), Ok(a)) => {
                assert_eq!(d.last().map(|s| s.1), a.last().map(|s| s.1));
                assert_eq!(d.len(), a.len());
            }
            (Err(d), Err(a)) => {
                assert!(d.is_unreachable());
                assert!(a.is_unreachable());
            }
            (d, a) => panic!("dijkstra {d:?} disagrees with astar {a:?}"),
        }
    }
}

#[test]
fn astar_with_inconsistent_admissible_heuristic_is_optimal() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut reopened = 0;
    for _ in 0..60 {
        let adj = random_graph(&mut rng, 30, 100, 1..=10);
        let goal = rng.random_range(1..adj.len());
        // True remaining distance, then a random admissible guess below it.
        let to_goal = reference(&reversed(&adj), goal);
        let h: Vec<u32> = to_goal
            .iter()
            .map(|d| d.map_or(0, |d| rng.random_range(0..=d)))
            .collect();

        let want = dijkstra::shortest_path_cost(0, edges_of(&adj), goal);
        let search = AStar::new();
        let got = search.path_cost(0, edges_with_estimate(&adj, &h), goal);
        assert_eq!(got, want);

        let full = search.paths(0, edges_with_estimate(&adj, &h));
        reopened += full.stats().reopened;
        let expected = reference(&adj, 0);
        for (node, want) in expected.iter().enumerate() {
            assert_eq!(full.cost(&node), want.as_ref(), "node {node}");
        }
    }
    assert!(reopened > 0, "no graph exercised re-opening");
}

#[test]
fn dag_paths_are_non_decreasing_and_end_at_cost() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..40 {
        let adj = random_dag(&mut rng, 20, 50);
        let goal = adj.len() - 1;
        let search = Dijkstra::new();
        let Ok(path) = search.path(0, edges_of(&adj), goal) else {
            assert_eq!(
                search.path_cost(0, edges_of(&adj), goal),
                Err(SearchError::Unreachable)
            );
            continue;
        };
        assert_eq!(path.first(), Some(&(0, 0)));
        assert!(path.windows(2).all(|w| w[0].1 <= w[1].1));
        let cost = search.path_cost(0, edges_of(&adj), goal).unwrap();
        assert_eq!(path.last(), Some(&(goal, cost)));
    }
}

#[test]
fn cycles_terminate_without_worse_resettlement() {
    // 0 → 1 → 2 → 0 with a spur to 3; every node settles exactly once.
    let adj: Adjacency = vec![vec![(1, 2)], vec![(2, 2)], vec![(0, 2), (3, 1)], vec![]];
    let paths = dijkstra::shortest_paths(0, edges_of(&adj));
    assert_eq!(paths.stats().settled, 4);
    assert_eq!(paths.cost(&0), Some(&0));
    assert_eq!(paths.predecessor(&0), None);
    assert_eq!(paths.cost(&3), Some(&5));

    let zero = vec![0; adj.len()];
    let paths = astar::shortest_paths(0, edges_with_estimate(&adj, &zero));
    assert_eq!(paths.stats().settled, 4);
    assert_eq!(paths.stats().reopened, 0);
}

#[test]
fn path_to_every_node_walks_back_to_start() {
    let mut rng = SmallRng::seed_from_u64(99);
    let adj = random_graph(&mut rng, 40, 160, 1..=9);
    let paths = dijkstra::shortest_paths(0, edges_of(&adj));
    for settlement in paths.iter() {
        let path = paths.path_to(&settlement.node).unwrap();
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(settlement.node, settlement.cost)));
        for step in path.windows(2) {
            let (from, c0) = step[0];
            let (to, c1) = step[1];
            assert!(adj[from].iter().any(|&(m, w)| m == to && c0 + w == c1));
        }
    }
}
