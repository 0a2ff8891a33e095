use crate::generate::GraphCatalog;
use crate::graph::ShiftedGraph;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::ops::Deref;
use std::str::FromStr;

/// Edge counts, one per position of a graph sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeSequence(Vec<usize>);

impl SizeSequence {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self(sizes)
    }

    /// Componentwise `self >= other`. Equal sequences dominate each other.
    pub fn dominates(&self, other: &SizeSequence) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SizeSequence {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for SizeSequence {
    fn from(sizes: Vec<usize>) -> Self {
        Self(sizes)
    }
}

impl fmt::Display for SizeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for SizeSequence {
    type Err = ParseIntError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        line.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<usize>, _>>()
            .map(Self)
    }
}

// =============== size sequences ===============

/// Every non-decreasing sequence of length `len` with values in `[min, max]`,
/// in lexicographic order.
#[derive(Debug, Clone)]
pub struct SizeSequences {
    current: Option<Vec<usize>>,
    max: usize,
}

impl SizeSequences {
    pub fn new(len: usize, min: usize, max: usize) -> Self {
        let current = (len == 0 || min <= max).then(|| vec![min; len]);
        Self { current, max }
    }
}

impl Iterator for SizeSequences {
    type Item = SizeSequence;

    fn next(&mut self) -> Option<SizeSequence> {
        let current = self.current.as_mut()?;
        let out = SizeSequence(current.clone());
        // bump the rightmost position below max and level everything after it
        match current.iter().rposition(|&v| v < self.max) {
            Some(pos) => {
                let value = current[pos] + 1;
                current[pos..].fill(value);
            }
            None => self.current = None,
        }
        Some(out)
    }
}

// =============== graph combinations ===============

/// Every choice of one catalog graph per position of a size sequence.
///
/// The last position varies fastest. [`GraphSequences::advance`] and
/// [`GraphSequences::current`] walk the combinations without allocating.
pub struct GraphSequences<'a> {
    pools: Vec<&'a [ShiftedGraph]>,
    indices: Vec<usize>,
    current: Vec<&'a ShiftedGraph>,
    started: bool,
    exhausted: bool,
    nested: bool,
}

impl<'a> GraphSequences<'a> {
    pub fn new(sizes: &SizeSequence, catalog: &'a GraphCatalog) -> Self {
        let pools: Vec<&'a [ShiftedGraph]> = sizes.iter().map(|&k| catalog.graphs(k)).collect();
        let exhausted = pools.iter().any(|pool| pool.is_empty());
        Self {
            indices: vec![0; pools.len()],
            current: Vec::with_capacity(pools.len()),
            pools,
            started: false,
            exhausted,
            nested: false,
        }
    }

    /// Only keep chains in which every graph lies inside the next one.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    /// Number of combinations before any nesting filter.
    pub fn total(&self) -> usize {
        self.pools.iter().map(|pool| pool.len()).product()
    }

    /// Moves to the next combination. Returns `false` once exhausted.
    pub fn advance(&mut self) -> bool {
        loop {
            if !self.step() {
                return false;
            }
            self.current.clear();
            self.current
                .extend(self.pools.iter().zip(&self.indices).map(|(&pool, &i)| &pool[i]));
            if !self.nested || is_chain(&self.current) {
                return true;
            }
        }
    }

    pub fn current(&self) -> &[&'a ShiftedGraph] {
        &self.current
    }

    fn step(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if !self.started {
            self.started = true;
            return true;
        }
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.pools[pos].len() {
                return true;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
        false
    }
}

impl<'a> Iterator for GraphSequences<'a> {
    type Item = Vec<&'a ShiftedGraph>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().then(|| self.current.clone())
    }
}

/// Whether each graph lies inside its successor.
pub fn is_chain(graphs: &[&ShiftedGraph]) -> bool {
    graphs.windows(2).all(|pair| pair[0].lies_inside(pair[1]))
}
