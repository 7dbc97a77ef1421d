use crate::graph::{CsrGraph, RightNeighborhood};
use crate::BitSet;
use std::collections::VecDeque;

/// The result of the smallest-last ordering pass: the degeneracy `d`, the
/// ordering itself with its inverse, the per-vertex right-degrees, and the
/// clique bounds the pass produces on the side.
///
/// Invariants: `right_degree[v] <= degeneracy` for all `v`, and
/// `clique_lb <= clique_ub <= degeneracy + 1`.
#[derive(Clone, Debug)]
pub struct DegeneracyOrdering {
    pub degeneracy: usize,
    pub clique_lb: usize,
    pub clique_ub: usize,
    pub ordering: Vec<usize>,
    pub position: Vec<usize>,
    pub right_degree: Vec<usize>,
}

/// Smallest-last ordering without neighborhood capture.
pub fn ordering(graph: &CsrGraph) -> DegeneracyOrdering {
    smallest_last(graph, false).0
}

/// Smallest-last ordering that also records, for every vertex, its closed
/// right-neighborhood, ready for lazy complement construction. When
/// `refine_upper_bound` is set and the residual graph from some point on is
/// d-regular, the upper bound is tightened to `d` unless one of its connected
/// components is a (d+1)-clique.
pub fn ordering_with_neighborhoods(
    graph: &CsrGraph,
    refine_upper_bound: bool,
) -> (DegeneracyOrdering, Vec<RightNeighborhood>) {
    let (mut ord, neighborhoods, regular_from) = smallest_last(graph, true);
    if refine_upper_bound && ord.clique_lb < ord.clique_ub {
        if let Some(regular_from) = regular_from {
            if !regular_core_has_full_clique(graph, &ord, regular_from) {
                ord.clique_ub = ord.degeneracy;
            }
        }
    }
    (ord, neighborhoods)
}

/// Bucket-based Matula–Beck. Buckets are ranges of the `ordering` array
/// indexed by current degree; removing a vertex relocates each still-present
/// neighbor to the front of its bucket and shifts the bucket boundary, all in
/// O(1). Returns the ordering data, the captured neighborhoods (empty unless
/// `capture`), and the ordering position from which the residual graph is
/// d-regular, if any.
fn smallest_last(
    graph: &CsrGraph,
    capture: bool,
) -> (DegeneracyOrdering, Vec<RightNeighborhood>, Option<usize>) {
    let n = graph.order();
    let mut right_degree = vec![0usize; n];
    let mut position = vec![0usize; n];
    let mut ordering = vec![0usize; n];
    let mut buckets = vec![0usize; graph.max_degree() + 1];

    for v in 0..n {
        right_degree[v] = graph.degree(v);
        buckets[right_degree[v]] += 1;
    }
    let mut count = 0;
    for k in 0..buckets.len() {
        let tmp = buckets[k];
        buckets[k] = count;
        count += tmp;
    }
    for v in 0..n {
        position[v] = buckets[right_degree[v]];
        ordering[position[v]] = v;
        buckets[right_degree[v]] += 1;
    }
    for k in (1..buckets.len()).rev() {
        buckets[k] = buckets[k - 1];
    }
    buckets[0] = 0;

    let mut neighborhoods: Vec<RightNeighborhood> = Vec::new();
    if capture {
        neighborhoods = (0..n).map(|_| RightNeighborhood::default()).collect();
    }

    let mut degeneracy = 0;
    let mut clique_lb = 0;
    let mut regular_from = None;

    for i in 0..n {
        // ordering[i] is a vertex of minimum degree in the residual graph;
        // its current degree becomes its right-degree
        let min_v = ordering[i];
        let mut members = Vec::new();
        if capture {
            members = Vec::with_capacity(right_degree[min_v] + 1);
            members.push(min_v);
        }
        buckets[right_degree[min_v]] += 1;

        if right_degree[min_v] > degeneracy {
            degeneracy = right_degree[min_v];
            if right_degree[ordering[n - 1]] == degeneracy {
                // min and max residual degree agree, so everything from here
                // on is d-regular
                regular_from = Some(i);
            }
        }

        if clique_lb == 0 && right_degree[min_v] == n - i - 1 {
            // the residual vertices form a clique
            clique_lb = right_degree[min_v] + 1;
        }

        for &nb in graph.neighbors(min_v) {
            if position[nb] <= position[min_v] {
                continue;
            }
            if capture {
                members.push(nb);
            }
            if right_degree[nb] == right_degree[min_v] {
                if nb != ordering[buckets[right_degree[min_v]]] {
                    let pu = buckets[right_degree[min_v]];
                    let u = ordering[pu];
                    ordering[pu] = nb;
                    ordering[position[nb]] = u;
                    position[u] = position[nb];
                    position[nb] = pu;
                }
                buckets[right_degree[min_v] - 1] = position[min_v] + 1;
                buckets[right_degree[nb]] += 1;
                right_degree[nb] -= 1;
            } else {
                let pu = buckets[right_degree[nb]];
                let u = ordering[pu];
                if nb != u {
                    ordering[pu] = nb;
                    ordering[position[nb]] = u;
                    position[u] = position[nb];
                    position[nb] = pu;
                }
                buckets[right_degree[nb]] += 1;
                right_degree[nb] -= 1;
            }
        }

        if capture {
            assert_eq!(
                members.len(),
                right_degree[min_v] + 1,
                "right-neighborhood of {} disagrees with its right-degree",
                min_v
            );
            neighborhoods[min_v] = RightNeighborhood::new(members);
        }
    }

    let ord = DegeneracyOrdering {
        degeneracy,
        clique_lb,
        clique_ub: degeneracy + 1,
        ordering,
        position,
        right_degree,
    };
    (ord, neighborhoods, regular_from)
}

/// BFS over the d-regular residual graph. A connected component of exactly
/// `d + 1` vertices in a d-regular graph is complete, so the graph hosts a
/// (d+1)-clique exactly when such a component exists.
fn regular_core_has_full_clique(
    graph: &CsrGraph,
    ord: &DegeneracyOrdering,
    regular_from: usize,
) -> bool {
    let n = graph.order();
    let mut discovered = BitSet::new(n);
    let mut queue = VecDeque::new();
    for &start in &ord.ordering[regular_from..] {
        if discovered.at(start) {
            continue;
        }
        let mut count = 1;
        discovered.set_bit(start);
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            for &u in graph.neighbors(v) {
                if ord.position[u] >= regular_from && !discovered.at(u) {
                    discovered.set_bit(u);
                    queue.push_back(u);
                    count += 1;
                }
            }
        }
        if count == ord.degeneracy + 1 {
            return true;
        }
    }
    false
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{ordering, ordering_with_neighborhoods};
    use crate::graph::CsrGraph;

    pub(crate) fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> CsrGraph {
        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        CsrGraph::from_adjacency("test", adjacency)
    }

    pub(crate) fn petersen() -> CsrGraph {
        graph_from_edges(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (5, 7),
                (7, 9),
                (9, 6),
                (6, 8),
                (8, 5),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
            ],
        )
    }

    #[test]
    fn triangle() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let ord = ordering(&graph);
        assert_eq!(ord.degeneracy, 2);
        assert_eq!(ord.clique_lb, 3);
        assert_eq!(ord.clique_ub, 3);
    }

    #[test]
    fn path() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let ord = ordering(&graph);
        assert_eq!(ord.degeneracy, 1);
        assert_eq!(ord.clique_lb, 2);
        assert_eq!(ord.clique_ub, 2);
    }

    #[test]
    fn complete_graph_catches_lower_bound() {
        let mut edges = Vec::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                edges.push((u, v));
            }
        }
        let graph = graph_from_edges(5, &edges);
        let ord = ordering(&graph);
        assert_eq!(ord.degeneracy, 4);
        assert_eq!(ord.clique_lb, 5);
        assert_eq!(ord.clique_ub, 5);
    }

    #[test]
    fn petersen_refinement_lowers_upper_bound() {
        let graph = petersen();
        let (ord, _) = ordering_with_neighborhoods(&graph, true);
        assert_eq!(ord.degeneracy, 3);
        // triangle-free and 3-regular: no residual component is a K4, so the
        // bound drops from d + 1 to d
        assert_eq!(ord.clique_ub, 3);

        let (unrefined, _) = ordering_with_neighborhoods(&graph, false);
        assert_eq!(unrefined.clique_ub, 4);
    }

    #[test]
    fn ordering_invariants() {
        let graph = petersen();
        let ord = ordering(&graph);
        let n = graph.order();
        for i in 0..n {
            assert_eq!(ord.position[ord.ordering[i]], i);
        }
        for v in 0..n {
            assert!(ord.right_degree[v] <= ord.degeneracy);
            let rights = graph
                .neighbors(v)
                .iter()
                .filter(|&&u| ord.position[u] > ord.position[v])
                .count();
            assert_eq!(ord.right_degree[v], rights);
            let lefts = graph.degree(v) - rights;
            assert_eq!(ord.right_degree[v] + lefts, graph.degree(v));
        }
    }

    #[test]
    fn neighborhoods_match_right_degrees() {
        let graph = petersen();
        let (ord, neighborhoods) = ordering_with_neighborhoods(&graph, true);
        for v in 0..graph.order() {
            let members = neighborhoods[v].members();
            assert_eq!(members.len(), ord.right_degree[v] + 1);
            assert_eq!(members[0], v);
            for pair in members[1..].windows(2) {
                assert!(pair[0] < pair[1], "right-neighbors must stay sorted");
            }
            for &u in &members[1..] {
                assert!(graph.has_edge(v, u));
                assert!(ord.position[u] > ord.position[v]);
            }
        }
    }

    #[test]
    fn reruns_are_identical() {
        let graph = petersen();
        let first = ordering(&graph);
        let second = ordering(&graph);
        assert_eq!(first.degeneracy, second.degeneracy);
        assert_eq!(first.ordering, second.ordering);
        assert_eq!(first.right_degree, second.right_degree);
    }

    #[test]
    fn empty_and_edgeless() {
        let empty = CsrGraph::from_adjacency("empty", vec![]);
        let ord = ordering(&empty);
        assert_eq!(ord.degeneracy, 0);
        assert_eq!(ord.clique_lb, 0);

        let edgeless = CsrGraph::from_adjacency("edgeless", vec![vec![], vec![], vec![]]);
        let ord = ordering(&edgeless);
        assert_eq!(ord.degeneracy, 0);
        assert_eq!(ord.clique_lb, 1);
        assert_eq!(ord.clique_ub, 1);
    }
}
