use crate::graph::Subgraph;

mod branch;
mod buss;
mod nemhauser_trotter;

pub use buss::BussKernel;
pub use nemhauser_trotter::NemhauserTrotter;

/// Outcome of one kernelization step: the question may already be settled, or
/// a smaller equivalent instance remains.
pub enum KernelResult {
    /// A cover within the budget certainly exists.
    Covered,
    /// No cover within the budget exists.
    Uncovered,
    /// Open: `kernel` has a cover of size `budget` iff the input has one of
    /// size `k`.
    Reduced { kernel: Subgraph, budget: usize },
}

pub trait Kernelization {
    fn kernelize(sg: &Subgraph, k: usize) -> KernelResult;
}

/// Decides whether `sg` has a vertex cover of at most `k` vertices: Buss
/// kernel, then the Nemhauser–Trotter kernel, then branch-and-bound with
/// degree reductions on whatever survives.
pub fn has_cover(sg: &Subgraph, k: usize) -> bool {
    let (kernel, budget) = match BussKernel::kernelize(sg, k) {
        KernelResult::Covered => return true,
        KernelResult::Uncovered => return false,
        KernelResult::Reduced { kernel, budget } => (kernel, budget),
    };
    let (kernel, budget) = match NemhauserTrotter::kernelize(&kernel, budget) {
        KernelResult::Covered => return true,
        KernelResult::Uncovered => return false,
        KernelResult::Reduced { kernel, budget } => (kernel, budget),
    };
    branch::search(kernel, budget)
}

#[cfg(test)]
mod tests {
    use super::has_cover;
    use crate::graph::Subgraph;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub(crate) fn subgraph_from_edges(n: usize, edges: &[(usize, usize)]) -> Subgraph {
        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        let m = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        let mut vertices = Vec::with_capacity(n);
        let mut largest = 0;
        let mut largest_degree = 0;
        for (pos, list) in adjacency.iter().enumerate() {
            if list.len() > largest_degree {
                largest_degree = list.len();
                largest = pos;
            }
            vertices.push(crate::graph::LocalVertex {
                v: pos,
                degree: list.len(),
                pos,
            });
        }
        Subgraph {
            n,
            m,
            vertices,
            adj_lists: adjacency,
            largest_degree_vertex: largest,
        }
    }

    pub(crate) fn brute_force_cover(sg: &Subgraph, k: usize) -> bool {
        assert!(sg.n <= 20);
        'subset: for mask in 0u32..(1 << sg.n) {
            if mask.count_ones() as usize > k {
                continue;
            }
            for i in 0..sg.n {
                for &u in &sg.adj_lists[i] {
                    if u > i && mask & (1 << i) == 0 && mask & (1 << u) == 0 {
                        continue 'subset;
                    }
                }
            }
            return true;
        }
        false
    }

    #[test]
    fn small_fixed_instances() {
        let triangle = subgraph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        assert!(!has_cover(&triangle, 1));
        assert!(has_cover(&triangle, 2));

        let path5 = subgraph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert!(has_cover(&path5, 2));
        assert!(!has_cover(&path5, 1));

        let star = subgraph_from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(has_cover(&star, 1));
        assert!(!has_cover(&star, 0));

        let c5 = subgraph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        assert!(has_cover(&c5, 3));
        assert!(!has_cover(&c5, 2));
    }

    #[test]
    fn edgeless_graph_is_covered_by_nothing() {
        let sg = subgraph_from_edges(4, &[]);
        assert!(has_cover(&sg, 0));
    }

    #[test]
    fn complete_graph_needs_all_but_one() {
        let mut edges = Vec::new();
        for u in 0..6 {
            for v in (u + 1)..6 {
                edges.push((u, v));
            }
        }
        let k6 = subgraph_from_edges(6, &edges);
        assert!(has_cover(&k6, 5));
        assert!(!has_cover(&k6, 4));
    }

    #[test]
    fn agrees_with_brute_force_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(20180614);
        for round in 0..60 {
            let n = rng.gen_range(1..=11);
            let p = rng.gen_range(0.1..0.9);
            let mut edges = Vec::new();
            for u in 0..n {
                for v in (u + 1)..n {
                    if rng.gen_bool(p) {
                        edges.push((u, v));
                    }
                }
            }
            let sg = subgraph_from_edges(n, &edges);
            for k in 0..=n {
                assert_eq!(
                    has_cover(&sg, k),
                    brute_force_cover(&sg, k),
                    "round {} n {} k {} edges {:?}",
                    round,
                    n,
                    k,
                    edges
                );
            }
        }
    }
}
