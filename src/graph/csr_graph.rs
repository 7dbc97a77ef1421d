use std::time::Duration;

/// Immutable graph store in compressed sparse row form. Neighbor lists are
/// concatenated in `edge_to`, with `edges_begin[v]` marking the first
/// neighbor of `v`. Every list is sorted ascending and free of duplicates
/// and self-loops.
#[derive(Clone, Debug)]
pub struct CsrGraph {
    name: String,
    n: usize,
    m: usize,
    min_degree: usize,
    max_degree: usize,
    edge_to: Vec<usize>,
    edges_begin: Vec<usize>,
    degree: Vec<usize>,
    alias: Vec<usize>,
    read_time: Duration,
}

impl CsrGraph {
    /// Builds the store from raw adjacency lists. The lists are canonicalized
    /// here: sorted, de-duplicated, self-loops dropped. `alias[v]` is the
    /// user-visible label of vertex `v`.
    pub fn new(
        name: impl Into<String>,
        mut adjacency: Vec<Vec<usize>>,
        alias: Vec<usize>,
        read_time: Duration,
    ) -> Self {
        let n = adjacency.len();
        assert_eq!(alias.len(), n, "one alias per vertex");

        let mut degree = Vec::with_capacity(n);
        for (v, list) in adjacency.iter_mut().enumerate() {
            list.sort_unstable();
            list.dedup();
            list.retain(|&u| u != v);
            degree.push(list.len());
        }

        let m = degree.iter().sum::<usize>() / 2;
        let min_degree = degree.iter().copied().min().unwrap_or(0);
        let max_degree = degree.iter().copied().max().unwrap_or(0);

        let mut edges_begin = Vec::with_capacity(n);
        let mut edge_to = Vec::with_capacity(2 * m);
        for list in &adjacency {
            edges_begin.push(edge_to.len());
            edge_to.extend_from_slice(list);
        }

        Self {
            name: name.into(),
            n,
            m,
            min_degree,
            max_degree,
            edge_to,
            edges_begin,
            degree,
            alias,
            read_time,
        }
    }

    /// Convenience constructor with identity aliases, mainly for tests and
    /// programmatic callers.
    pub fn from_adjacency(name: impl Into<String>, adjacency: Vec<Vec<usize>>) -> Self {
        let n = adjacency.len();
        Self::new(name, adjacency, (0..n).collect(), Duration::ZERO)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> usize {
        self.n
    }

    pub fn size(&self) -> usize {
        self.m
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn degree(&self, v: usize) -> usize {
        self.degree[v]
    }

    pub fn alias(&self, v: usize) -> usize {
        self.alias[v]
    }

    pub fn read_time(&self) -> Duration {
        self.read_time
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        let begin = self.edges_begin[v];
        &self.edge_to[begin..begin + self.degree[v]]
    }

    /// Adjacency test through the sorted list of the smaller-degree endpoint.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        if self.degree[u] <= self.degree[v] {
            self.neighbors(u).binary_search(&v).is_ok()
        } else {
            self.neighbors(v).binary_search(&u).is_ok()
        }
    }
}
