//! Shared model for the waypath demo binaries.
//!
//! Demonstrates: A* and Dijkstra on an ASCII maze, distance maps, custom
//! node identity on a word-ladder graph, and search logging.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use log::{debug, info};
use waypath::{AStar, ByKey, Dijkstra, SearchError, ShortestPaths};

pub const DEFAULT_MAZE: &str = "\
##########
#S.....#.#
#.##.#.#.#
#.#..#...#
#.#.####.#
#...#..#.#
###.#.##.#
#.....#.G#
##########";

pub const DEFAULT_WORDS: &[&str] = &[
    "cold", "cord", "card", "ward", "warm", "word", "worm", "wore", "core", "care", "bore",
    "born", "corn", "cork", "wart", "cart", "dart", "dare", "bare", "barn", "warn", "worn",
];

// ---------------------------------------------------------------------------
// Cell geometry
// ---------------------------------------------------------------------------

/// A maze cell. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// The four cardinal neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        const DIRS: [Cell; 4] = [
            Cell::new(0, -1),
            Cell::new(1, 0),
            Cell::new(0, 1),
            Cell::new(-1, 0),
        ];
        DIRS.map(|d| self + d)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Chebyshev (L∞) distance between two cells.
#[inline]
pub fn chebyshev(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tile {
    Wall,
    Floor,
}

/// Errors from parsing an ASCII maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    UnknownGlyph { glyph: char, at: Cell },
    MissingMarker(char),
    DuplicateMarker(char),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::Empty => write!(f, "maze has no rows"),
            MazeError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            MazeError::UnknownGlyph { glyph, at } => write!(f, "unknown glyph {glyph:?} at {at}"),
            MazeError::MissingMarker(m) => write!(f, "maze has no {m:?} marker"),
            MazeError::DuplicateMarker(m) => write!(f, "maze has more than one {m:?} marker"),
        }
    }
}

impl std::error::Error for MazeError {}

/// Which search drives [`Maze::solve`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            other => Err(format!("unknown algorithm {other:?} (expected astar or dijkstra)")),
        }
    }
}

/// A rectangular grid of walls (`#`) and floor (`.`), with one start (`S`)
/// and one goal (`G`). Moves are cardinal and cost 1.
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    start: Cell,
    goal: Cell,
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = s.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
        let width = rows.first().ok_or(MazeError::Empty)?.chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        let (mut start, mut goal) = (None, None);

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let at = Cell::new(x as i32, y as i32);
                let marker = match glyph {
                    '#' => {
                        tiles.push(Tile::Wall);
                        continue;
                    }
                    '.' => {
                        tiles.push(Tile::Floor);
                        continue;
                    }
                    'S' => &mut start,
                    'G' => &mut goal,
                    _ => return Err(MazeError::UnknownGlyph { glyph, at }),
                };
                if marker.replace(at).is_some() {
                    return Err(MazeError::DuplicateMarker(glyph));
                }
                tiles.push(Tile::Floor);
            }
        }

        Ok(Maze {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
            start: start.ok_or(MazeError::MissingMarker('S'))?,
            goal: goal.ok_or(MazeError::MissingMarker('G'))?,
        })
    }
}

impl Maze {
    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    fn index(&self, c: Cell) -> Option<usize> {
        let inside = (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y);
        inside.then(|| (c.y * self.width + c.x) as usize)
    }

    /// Whether `c` is inside the maze and not a wall.
    pub fn is_open(&self, c: Cell) -> bool {
        self.index(c).map(|i| self.tiles[i]) == Some(Tile::Floor)
    }

    /// Open cardinal neighbours of `c` with their cumulative costs.
    pub fn steps(&self, c: &Cell, cost: &u32) -> Vec<(Cell, u32)> {
        c.neighbors_4()
            .into_iter()
            .filter(|&n| self.is_open(n))
            .map(|n| (n, cost + 1))
            .collect()
    }

    /// [`steps`](Self::steps) with a Manhattan estimate of the total cost
    /// through each neighbour to the goal.
    pub fn guided_steps(&self, c: &Cell, cost: &u32) -> Vec<(Cell, u32, u32)> {
        self.steps(c, cost)
            .into_iter()
            .map(|(n, reached)| (n, reached, reached + manhattan(n, self.goal)))
            .collect()
    }

    /// Shortest path from the start marker to the goal marker.
    pub fn solve(&self, algorithm: Algorithm) -> Result<Vec<(Cell, u32)>, SearchError> {
        let path = match algorithm {
            Algorithm::AStar => AStar::new().path(
                self.start,
                |c: &Cell, cost: &u32| self.guided_steps(c, cost),
                self.goal,
            ),
            Algorithm::Dijkstra => Dijkstra::new().path(
                self.start,
                |c: &Cell, cost: &u32| self.steps(c, cost),
                self.goal,
            ),
        }?;
        info!("{algorithm:?}: {} steps to {}", path.len() - 1, self.goal);
        Ok(path)
    }

    /// Distance from the start to every reachable cell.
    pub fn distance_map(&self) -> ShortestPaths<Cell, u32> {
        let map = Dijkstra::new().paths(self.start, |c: &Cell, cost: &u32| self.steps(c, cost));
        debug!("distance map covers {} cells", map.len());
        map
    }

    /// Draw the maze with `path` overlaid as `*`.
    pub fn render(&self, path: &[(Cell, u32)]) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = Cell::new(x, y);
                let glyph = if c == self.start {
                    'S'
                } else if c == self.goal {
                    'G'
                } else if path.iter().any(|&(p, _)| p == c) {
                    '*'
                } else if self.is_open(c) {
                    '.'
                } else {
                    '#'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Word ladder
// ---------------------------------------------------------------------------

/// Case-folded identity, so `Cold` and `COLD` are the same node.
#[allow(clippy::ptr_arg)]
fn fold(word: &String) -> String {
    word.to_ascii_lowercase()
}

/// Whether `a` and `b` have equal length and differ in exactly one letter,
/// ignoring case.
pub fn one_letter_apart(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .filter(|(x, y)| !x.eq_ignore_ascii_case(y))
            .count()
            == 1
}

/// An implicit graph over a dictionary: two words are adjacent when they
/// differ in one letter.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn new<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_owned()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn next_words(&self, word: &str, cost: &u32) -> Vec<(String, u32)> {
        self.words
            .iter()
            .filter(|w| one_letter_apart(word, w))
            .map(|w| (w.clone(), cost + 1))
            .collect()
    }

    /// Shortest chain of one-letter changes from `from` to `to`. Words are
    /// compared case-insensitively; `from` need not be in the dictionary.
    pub fn ladder(&self, from: &str, to: &str) -> Result<Vec<(String, u32)>, SearchError> {
        let search = Dijkstra::new().with_identity(ByKey(fold));
        search.path(
            from.to_owned(),
            |w: &String, cost: &u32| self.next_words(w, cost),
            to.to_owned(),
        )
    }

    /// Every word reachable from `from`, with its distance in changes.
    pub fn reachable(&self, from: &str) -> Vec<(String, u32)> {
        let search = Dijkstra::new().with_identity(ByKey(fold));
        let map = search.paths(from.to_owned(), |w: &String, cost: &u32| {
            self.next_words(w, cost)
        });
        let mut words: Vec<(String, u32)> = map.iter().map(|s| (s.node.clone(), s.cost)).collect();
        words.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        words
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().copied())
    }
}
