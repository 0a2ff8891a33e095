use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One edge `(x, y)` of a shifted graph, 1-based on both coordinates.
pub type Edge = (usize, usize);

/// Which staircase family a graph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `x` and `y` on two disjoint sides `1..=s`.
    Bipartite,
    /// One vertex range `1..=2s`, edges `(x, y)` with `y < x`.
    General,
}

impl Family {
    /// Largest `x` coordinate for parameter `s`.
    pub fn max_x(self, s: usize) -> usize {
        match self {
            Family::Bipartite => s,
            Family::General => 2 * s,
        }
    }

    /// Edge count of the complete graph of the family.
    pub fn max_size(self, s: usize) -> usize {
        match self {
            Family::Bipartite => s * s,
            Family::General => s * (2 * s).saturating_sub(1),
        }
    }

    /// Height of column `x` inside a block closed by a breakpoint of height `y0`.
    pub fn column_height(self, x: usize, y0: usize) -> usize {
        match self {
            Family::Bipartite => y0,
            Family::General => y0.min(x.saturating_sub(1)),
        }
    }

    /// Edges a breakpoint `(x, y)` adds on top of columns `< current_x`.
    ///
    /// For the general family this counts pairs `(vx, vy)` with
    /// `vx ∈ [current_x, x]`, `vy ∈ [1, y]`, `vy < vx` without walking them.
    /// Columns up to `y + 1` are cut by the diagonal, later ones are full.
    pub fn new_edges(self, current_x: usize, x: usize, y: usize) -> usize {
        if x < current_x {
            return 0;
        }
        let width = x - current_x + 1;
        match self {
            Family::Bipartite => width * y,
            Family::General => {
                if current_x > y + 1 {
                    width * y
                } else if x <= y + 1 {
                    width * (current_x + x - 2) / 2
                } else {
                    let cut = (y + 2 - current_x) * (current_x + y - 1) / 2;
                    cut + (x - y - 1) * y
                }
            }
        }
    }

    /// Node id of `y` in a materialized [`UnGraphMap`].
    fn y_node(self, s: usize, y: usize) -> usize {
        match self {
            Family::Bipartite => s + y,
            Family::General => y,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Bipartite => write!(f, "bipartite"),
            Family::General => write!(f, "general"),
        }
    }
}

impl FromStr for Family {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bipartite" | "2-partite" => Ok(Family::Bipartite),
            "general" => Ok(Family::General),
            other => anyhow::bail!("Unknown graph family: {other}"),
        }
    }
}

/// A staircase graph described by its antipath.
///
/// Breakpoints are kept in increasing `x` (and therefore decreasing `y`)
/// order. Column `x` in the block `prev_x0 + 1 ..= x0` holds the edges
/// `(x, 1) ..= (x, h)` where `h` is [`Family::column_height`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftedGraph {
    pub family: Family,
    pub s: usize,
    pub antipath: Vec<(usize, usize)>,
    pub edge_count: usize,
}

impl ShiftedGraph {
    pub fn new(family: Family, s: usize, antipath: Vec<(usize, usize)>) -> Self {
        debug_assert!(
            antipath
                .windows(2)
                .all(|w| w[0].0 < w[1].0 && w[0].1 > w[1].1),
            "antipath must be strictly monotone: {antipath:?}"
        );
        let mut prev_x = 0;
        let mut edge_count = 0;
        for &(x0, y0) in &antipath {
            edge_count += (prev_x + 1..=x0)
                .map(|x| family.column_height(x, y0))
                .sum::<usize>();
            prev_x = x0;
        }
        Self {
            family,
            s,
            antipath,
            edge_count,
        }
    }

    /// `(x, height)` for every column the antipath covers, in increasing `x`.
    pub fn columns(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let family = self.family;
        let mut prev_x = 0;
        self.antipath.iter().flat_map(move |&(x0, y0)| {
            let start = prev_x + 1;
            prev_x = x0;
            (start..=x0).map(move |x| (x, family.column_height(x, y0)))
        })
    }

    /// Edges in traversal order: columns left to right, rows bottom up.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.columns()
            .flat_map(|(x, height)| (1..=height).map(move |y| (x, y)))
    }

    pub fn contains_edge(&self, (x, y): Edge) -> bool {
        self.columns()
            .find(|&(cx, _)| cx == x)
            .is_some_and(|(_, height)| y >= 1 && y <= height)
    }

    /// Materialize the edge set. Bipartite `y` coordinates are shifted by `s`
    /// so the two sides never share a node.
    pub fn to_graph_map(&self) -> UnGraphMap<usize, ()> {
        let mut g = UnGraphMap::with_capacity(2 * self.family.max_x(self.s), self.edge_count);
        for (x, y) in self.edges() {
            g.add_edge(x, self.family.y_node(self.s, y), ());
        }
        g
    }

    /// Whether every edge of `self` is also an edge of `other`.
    pub fn lies_inside(&self, other: &ShiftedGraph) -> bool {
        if self.family != other.family || self.edge_count > other.edge_count {
            return false;
        }
        let outer = other.to_graph_map();
        self.edges()
            .all(|(x, y)| outer.contains_edge(x, other.family.y_node(other.s, y)))
    }
}
