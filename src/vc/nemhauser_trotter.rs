use crate::graph::Subgraph;
use crate::vc::{KernelResult, Kernelization};
use crate::BitSet;

/// The Nemhauser–Trotter kernel. Solves the half-integral LP relaxation of
/// vertex cover combinatorially: a maximum matching on the bipartite double
/// cover (Hopcroft–Karp), strongly connected components of the residual
/// orientation (Tarjan), then peeling of removable sink components. Vertices
/// whose LP value is integral are decided here; only the half-integral core
/// survives into the kernel.
pub struct NemhauserTrotter;

impl Kernelization for NemhauserTrotter {
    fn kernelize(sg: &Subgraph, k: usize) -> KernelResult {
        let n = sg.n;
        let mut match_l: Vec<Option<usize>> = vec![None; n];
        let mut match_r: Vec<Option<usize>> = vec![None; n];
        hopcroft_karp(sg, &mut match_l, &mut match_r);
        let scc = strongly_connected_components(sg, &match_r);

        // condense to the component graph; `comp_in[p]` lists, reversed, the
        // components with an arc into p, so removing p can lower their
        // remaining out-degrees
        let num_components = scc.components.len();
        assert!(
            num_components <= 2 * n,
            "more components than double-cover nodes"
        );
        let mut comp_in: Vec<Vec<usize>> = vec![Vec::new(); num_components];
        let mut out_degree = vec![0usize; num_components];
        let mut connected = vec![usize::MAX; num_components];
        for (t, component) in scc.components.iter().enumerate() {
            for &x in component {
                if x < n {
                    for &u in &sg.adj_lists[x] {
                        let target = scc.component_map[u + n];
                        if target != t && connected[target] != t {
                            comp_in[target].push(t);
                            out_degree[t] += 1;
                            connected[target] = t;
                        }
                    }
                } else if let Some(mate) = match_r[x - n] {
                    let target = scc.component_map[mate];
                    if target != t && connected[target] != t {
                        comp_in[target].push(t);
                        out_degree[t] += 1;
                        connected[target] = t;
                    }
                }
            }
        }

        // peel removable components in reverse topological order: the right
        // copies of a peeled component enter the cover, the left copies leave
        // the graph
        let mut removed = BitSet::new(n);
        let mut comp_removed = vec![false; num_components];
        let mut num_removed = 0usize;
        let mut num_in_vc = 0usize;
        let mut update = true;
        while update {
            update = false;
            for p in 0..num_components {
                if comp_removed[p] || out_degree[p] != 0 || !scc.removable[p] {
                    continue;
                }
                comp_removed[p] = true;

                if scc.components[p].len() == 1 {
                    let base = scc.components[p][0] % n;
                    if !removed.at(base) {
                        removed.set_bit(base);
                        num_removed += 1;
                    }
                    continue;
                }

                for &x in &scc.components[p] {
                    let base = x % n;
                    if !removed.at(base) {
                        removed.set_bit(base);
                        num_removed += 1;
                        if x >= n {
                            num_in_vc += 1;
                        }
                    }
                }
                for &source in &comp_in[p] {
                    out_degree[source] -= 1;
                }
                update = true;
            }
        }

        if num_in_vc > k {
            return KernelResult::Uncovered;
        }
        if num_removed == 0 {
            return KernelResult::Reduced {
                kernel: sg.clone(),
                budget: k,
            };
        }
        if n - num_removed <= k - num_in_vc {
            return KernelResult::Covered;
        }
        let kernel = sg.retain(&removed);
        if kernel.m > k * (k - num_in_vc) {
            return KernelResult::Uncovered;
        }
        KernelResult::Reduced {
            kernel,
            budget: k - num_in_vc,
        }
    }
}

/// Maximum matching on the bipartite double cover: the left copy of a vertex
/// is matched against right copies of its neighbors.
fn hopcroft_karp(sg: &Subgraph, match_l: &mut [Option<usize>], match_r: &mut [Option<usize>]) {
    let n = sg.n;
    let mut dist = vec![usize::MAX; n];
    loop {
        let free_dist = layer(sg, match_l, match_r, &mut dist);
        if free_dist == usize::MAX {
            return;
        }
        for u in 0..n {
            if match_l[u].is_none() {
                augment(sg, u, match_l, match_r, &mut dist, free_dist);
            }
        }
    }
}

/// BFS phase: distances along alternating paths from free left vertices.
/// Returns the length at which a free right vertex is first reached, or
/// `usize::MAX` when no augmenting path exists.
fn layer(
    sg: &Subgraph,
    match_l: &[Option<usize>],
    match_r: &[Option<usize>],
    dist: &mut [usize],
) -> usize {
    let mut queue = std::collections::VecDeque::new();
    for u in 0..sg.n {
        if match_l[u].is_none() {
            dist[u] = 0;
            queue.push_back(u);
        } else {
            dist[u] = usize::MAX;
        }
    }
    let mut free_dist = usize::MAX;
    while let Some(u) = queue.pop_front() {
        if dist[u] < free_dist {
            for &v in &sg.adj_lists[u] {
                match match_r[v] {
                    None => {
                        if free_dist == usize::MAX {
                            free_dist = dist[u] + 1;
                        }
                    }
                    Some(w) => {
                        if dist[w] == usize::MAX {
                            dist[w] = dist[u] + 1;
                            queue.push_back(w);
                        }
                    }
                }
            }
        }
    }
    free_dist
}

/// DFS phase: flips the matching along one shortest augmenting path from `u`.
fn augment(
    sg: &Subgraph,
    u: usize,
    match_l: &mut [Option<usize>],
    match_r: &mut [Option<usize>],
    dist: &mut [usize],
    free_dist: usize,
) -> bool {
    for idx in 0..sg.adj_lists[u].len() {
        let v = sg.adj_lists[u][idx];
        let next = match_r[v];
        let next_dist = match next {
            Some(w) => dist[w],
            None => free_dist,
        };
        if next_dist == dist[u] + 1 {
            let reached = match next {
                None => true,
                Some(w) => augment(sg, w, match_l, match_r, dist, free_dist),
            };
            if reached {
                match_r[v] = Some(u);
                match_l[u] = Some(v);
                return true;
            }
        }
    }
    dist[u] = usize::MAX;
    false
}

struct SccForest {
    /// Component index per double-cover node; `usize::MAX` for right copies
    /// that are unreachable (never dereferenced for those).
    component_map: Vec<usize>,
    components: Vec<Vec<usize>>,
    /// A component is removable when no vertex has both of its copies inside.
    removable: Vec<bool>,
}

/// Tarjan over the residual orientation of the double cover: node `u < n` is
/// the left copy of `u` with arcs to the right copies of its neighbors; node
/// `n + v` is the right copy of `v` with a single arc back to its mate, if
/// matched. Iterative with an explicit frame stack, so the recursion depth
/// never depends on the graph.
fn strongly_connected_components(sg: &Subgraph, match_r: &[Option<usize>]) -> SccForest {
    let n = sg.n;
    let total = 2 * n;
    let mut index = vec![usize::MAX; total];
    let mut low = vec![0usize; total];
    let mut on_stack = BitSet::new(total);
    let mut stack: Vec<usize> = Vec::new();
    let mut counter = 0usize;

    let mut component_map = vec![usize::MAX; total];
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut removable: Vec<bool> = Vec::new();
    let mut vertex_map = vec![usize::MAX; n];

    let mut frames: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if index[root] != usize::MAX {
            continue;
        }
        index[root] = counter;
        low[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack.set_bit(root);
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let x = frame.0;
            let successor = if x < n {
                let list = &sg.adj_lists[x];
                if frame.1 < list.len() {
                    let s = list[frame.1] + n;
                    frame.1 += 1;
                    Some(s)
                } else {
                    None
                }
            } else if frame.1 == 0 {
                frame.1 = 1;
                match_r[x - n]
            } else {
                None
            };

            match successor {
                Some(s) => {
                    if index[s] == usize::MAX {
                        index[s] = counter;
                        low[s] = counter;
                        counter += 1;
                        stack.push(s);
                        on_stack.set_bit(s);
                        frames.push((s, 0));
                    } else if on_stack.at(s) {
                        low[x] = low[x].min(low[s]);
                    }
                }
                None => {
                    frames.pop();
                    if low[x] == index[x] {
                        let id = components.len();
                        let mut component = Vec::new();
                        let mut keep_apart = true;
                        loop {
                            let y = stack.pop().expect("component root still on stack");
                            on_stack.unset_bit(y);
                            component_map[y] = id;
                            let base = if y < n { y } else { y - n };
                            if vertex_map[base] == id {
                                keep_apart = false;
                            }
                            vertex_map[base] = id;
                            component.push(y);
                            if y == x {
                                break;
                            }
                        }
                        components.push(component);
                        removable.push(keep_apart);
                    }
                    if let Some(parent) = frames.last() {
                        low[parent.0] = low[parent.0].min(low[x]);
                    }
                }
            }
        }
    }

    SccForest {
        component_map,
        components,
        removable,
    }
}

#[cfg(test)]
mod tests {
    use super::NemhauserTrotter;
    use crate::vc::tests::subgraph_from_edges;
    use crate::vc::{KernelResult, Kernelization};

    #[test]
    fn star_is_fully_decided() {
        // LP sets the center to 1 and the leaves to 0, nothing survives
        let star = subgraph_from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        match NemhauserTrotter::kernelize(&star, 1) {
            KernelResult::Covered => {}
            _ => panic!("the star kernelizes away at k = 1"),
        }
        match NemhauserTrotter::kernelize(&star, 0) {
            KernelResult::Uncovered => {}
            _ => panic!("the forced center exceeds a budget of zero"),
        }
    }

    #[test]
    fn edgeless_vertices_drop_out() {
        let sg = subgraph_from_edges(3, &[]);
        match NemhauserTrotter::kernelize(&sg, 0) {
            KernelResult::Covered => {}
            _ => panic!("isolated vertices never enter the cover"),
        }
    }

    #[test]
    fn odd_cycle_is_all_half_integral() {
        // the LP gives every C5 vertex value 1/2: nothing is decided
        let c5 = subgraph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        match NemhauserTrotter::kernelize(&c5, 3) {
            KernelResult::Reduced { kernel, budget } => {
                assert_eq!(kernel.n, 5);
                assert_eq!(kernel.m, 5);
                assert_eq!(budget, 3);
            }
            _ => panic!("an odd cycle must pass through untouched"),
        }
    }

    #[test]
    fn pendant_path_is_partially_decided() {
        // path 0-1-2: matching saturates it, endpoints get value 0 and the
        // middle 1; k = 1 is answered immediately
        let path = subgraph_from_edges(3, &[(0, 1), (1, 2)]);
        match NemhauserTrotter::kernelize(&path, 1) {
            KernelResult::Covered => {}
            _ => panic!("one vertex covers a 2-edge path"),
        }
    }
}
