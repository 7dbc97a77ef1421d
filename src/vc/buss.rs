use crate::graph::Subgraph;
use crate::vc::{KernelResult, Kernelization};
use crate::BitSet;

/// The Buss kernel. Any vertex whose residual degree exceeds the remaining
/// budget must be in every cover; forcing those in, then discarding the
/// vertices that end up isolated, leaves an equivalent instance with at most
/// `k * budget` edges.
pub struct BussKernel;

impl Kernelization for BussKernel {
    fn kernelize(sg: &Subgraph, k: usize) -> KernelResult {
        let mut removed = BitSet::new(sg.n);
        let mut deg_decrease = vec![0usize; sg.n];
        let mut high_degree = 0usize;

        let mut change = true;
        while change && high_degree <= k {
            change = false;
            for v in &sg.vertices {
                if high_degree > k {
                    break;
                }
                if !removed.at(v.pos) && v.degree - deg_decrease[v.pos] > k - high_degree {
                    removed.set_bit(v.pos);
                    high_degree += 1;
                    change = true;
                    for &u in &sg.adj_lists[v.pos] {
                        if !removed.at(u) {
                            deg_decrease[u] += 1;
                        }
                    }
                }
            }
        }

        if high_degree > k {
            return KernelResult::Uncovered;
        }
        if high_degree == 0 {
            return KernelResult::Reduced {
                kernel: sg.clone(),
                budget: k,
            };
        }

        // vertices isolated by the removals are covered for free
        for v in &sg.vertices {
            if !removed.at(v.pos) && v.degree - deg_decrease[v.pos] == 0 {
                removed.set_bit(v.pos);
            }
        }

        let kernel = sg.retain(&removed);
        let budget = k - high_degree;
        if kernel.n <= budget {
            return KernelResult::Covered;
        }
        if kernel.m > k * budget {
            return KernelResult::Uncovered;
        }
        KernelResult::Reduced { kernel, budget }
    }
}

#[cfg(test)]
mod tests {
    use super::BussKernel;
    use crate::vc::tests::subgraph_from_edges;
    use crate::vc::{KernelResult, Kernelization};

    #[test]
    fn high_degree_vertex_is_forced() {
        // star center has degree 4 > k = 1, leaves become isolated
        let star = subgraph_from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        match BussKernel::kernelize(&star, 1) {
            KernelResult::Covered => {}
            _ => panic!("forcing the center must settle the star"),
        }
    }

    #[test]
    fn budget_overrun_is_uncovered() {
        // two disjoint stars of degree 3, budget 1: only one center fits
        let sg = subgraph_from_edges(
            8,
            &[(0, 1), (0, 2), (0, 3), (4, 5), (4, 6), (4, 7)],
        );
        match BussKernel::kernelize(&sg, 1) {
            KernelResult::Uncovered => {}
            _ => panic!("two forced centers cannot fit a budget of one"),
        }
    }

    #[test]
    fn untouched_graph_passes_through() {
        let c5 = subgraph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        match BussKernel::kernelize(&c5, 3) {
            KernelResult::Reduced { kernel, budget } => {
                assert_eq!(kernel.n, 5);
                assert_eq!(kernel.m, 5);
                assert_eq!(budget, 3);
            }
            _ => panic!("no degree exceeds the budget, nothing is decided"),
        }
    }

    #[test]
    fn residual_degrees_guard_the_threshold() {
        // the center is forced at k = 2; vertex 3 had degree 2 but its
        // residual degree drops to 1, so it is not forced and the pendant
        // edge 3-4 survives into the kernel
        let sg = subgraph_from_edges(5, &[(0, 1), (0, 2), (0, 3), (3, 4)]);
        match BussKernel::kernelize(&sg, 2) {
            KernelResult::Reduced { kernel, budget } => {
                assert_eq!(budget, 1);
                assert_eq!(kernel.n, 2);
                assert_eq!(kernel.m, 1);
            }
            _ => panic!("the pendant edge must stay open"),
        }
    }
}
