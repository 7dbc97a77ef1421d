use crate::graph::Subgraph;
use crate::BitSet;

enum Reduction {
    Solved(bool),
    Open { kernel: Subgraph, budget: usize },
}

/// Branch-and-bound over the reduced instance. Each frame is reduced to a
/// fixed point first; if the question stays open, the largest-degree vertex
/// `a` splits it: either `a` joins the cover, or all of `N(a)` does. The
/// explicit stack keeps the depth bounded by the budget, not the graph.
pub(crate) fn search(sg: Subgraph, k: usize) -> bool {
    let mut stack: Vec<(Subgraph, usize)> = vec![(sg, k)];
    while let Some((sg, k)) = stack.pop() {
        match reduce(sg, k) {
            Reduction::Solved(true) => return true,
            Reduction::Solved(false) => continue,
            Reduction::Open { kernel, budget } => {
                let a = kernel.largest_degree_vertex;
                let a_degree = kernel.vertices[a].degree;
                debug_assert!(budget >= 1);
                debug_assert!(a_degree <= budget, "over-budget degree survived reduction");
                // second branch: N(a) joins the cover
                stack.push((kernel.remove_closed_neighborhood(a), budget - a_degree));
                // first branch: a joins the cover
                stack.push((kernel.remove_vertex(a), budget - 1));
            }
        }
    }
    false
}

/// Degree reductions to a fixed point. Degrees are tracked against a signed
/// `deg_decrease` side array instead of rewriting lists on every removal;
/// folding can push an entry negative when the folded vertex gains
/// neighbors:
///   - residual degree > budget: the vertex is forced into the cover;
///   - residual degree 0: drop it;
///   - residual degree 1: take the neighbor instead;
///   - residual degree 2: take both neighbors if they are adjacent,
///     otherwise fold the three vertices into one.
/// Whatever survives is compacted into a fresh kernel.
fn reduce(mut sg: Subgraph, k: usize) -> Reduction {
    let n = sg.n;
    let mut budget = k;
    let mut deg_decrease = vec![0isize; n];
    let mut removed = BitSet::new(n);
    let mut num_removed = 0usize;

    let mut change = true;
    while change && n - num_removed > budget {
        change = false;
        for i in 0..n {
            if removed.at(i) {
                continue;
            }
            let live = live_degree(&sg, i, &deg_decrease);

            if live > budget {
                if budget == 0 {
                    return Reduction::Solved(false);
                }
                removed.set_bit(i);
                num_removed += 1;
                budget -= 1;
                change = true;
                decrease_neighbors(&sg, i, &removed, &mut deg_decrease);
                continue;
            }

            if live <= 1 {
                removed.set_bit(i);
                num_removed += 1;
                if live == 1 {
                    if budget == 0 {
                        return Reduction::Solved(false);
                    }
                    budget -= 1;
                    change = true;
                    let nb = live_neighbor(&sg, i, &removed, 0);
                    removed.set_bit(nb);
                    num_removed += 1;
                    decrease_neighbors(&sg, nb, &removed, &mut deg_decrease);
                }
                continue;
            }

            if live == 2 {
                let a = live_neighbor(&sg, i, &removed, 0);
                let b = live_neighbor(&sg, i, &removed, a + 1);
                let a_live = live_degree(&sg, a, &deg_decrease);
                let b_live = live_degree(&sg, b, &deg_decrease);
                let adjacent = if a_live <= b_live {
                    sg.adj_lists[a].binary_search(&b).is_ok()
                } else {
                    sg.adj_lists[b].binary_search(&a).is_ok()
                };

                removed.set_bit(a);
                removed.set_bit(b);
                change = true;

                if adjacent {
                    // a triangle through i: both neighbors must be covered
                    if budget < 2 {
                        return Reduction::Solved(false);
                    }
                    removed.set_bit(i);
                    budget -= 2;
                    num_removed += 3;
                    decrease_neighbors(&sg, a, &removed, &mut deg_decrease);
                    decrease_neighbors(&sg, b, &removed, &mut deg_decrease);
                } else {
                    if budget == 0 {
                        return Reduction::Solved(false);
                    }
                    budget -= 1;
                    num_removed += 2;
                    fold(&mut sg, i, a, b, &removed, &mut deg_decrease);
                }
            }
        }
    }

    if n - num_removed <= budget {
        return Reduction::Solved(true);
    }
    if budget == 0 {
        return Reduction::Solved(false);
    }

    let kernel = sg.retain(&removed);
    if kernel.m > k * budget {
        return Reduction::Solved(false);
    }
    Reduction::Open { kernel, budget }
}

fn live_degree(sg: &Subgraph, v: usize, deg_decrease: &[isize]) -> usize {
    (sg.vertices[v].degree as isize - deg_decrease[v]) as usize
}

fn decrease_neighbors(sg: &Subgraph, v: usize, removed: &BitSet, deg_decrease: &mut [isize]) {
    for &u in &sg.adj_lists[v] {
        if !removed.at(u) {
            deg_decrease[u] += 1;
        }
    }
}

fn live_neighbor(sg: &Subgraph, v: usize, removed: &BitSet, from: usize) -> usize {
    sg.adj_lists[v]
        .iter()
        .copied()
        .filter(|&u| u >= from)
        .find(|&u| !removed.at(u))
        .expect("a live neighbor must exist at this degree")
}

/// Vertex folding: the degree-2 vertex's slot is reused as the contraction
/// of it and its two neighbors. Its new neighborhood is the live union of
/// `N(a)` and `N(b)` minus itself; each such neighbor learns about the folded
/// vertex through a sorted insert. A neighbor adjacent to both `a` and `b`
/// loses net degree one, everyone else breaks even.
fn fold(
    sg: &mut Subgraph,
    center: usize,
    a: usize,
    b: usize,
    removed: &BitSet,
    deg_decrease: &mut [isize],
) {
    deg_decrease[center] += 2;
    let list_a = std::mem::take(&mut sg.adj_lists[a]);
    let list_b = std::mem::take(&mut sg.adj_lists[b]);
    let mut merged = Vec::with_capacity(list_a.len() + list_b.len());

    let mut ia = 0;
    let mut ib = 0;
    while ia < list_a.len() && ib < list_b.len() {
        let x = list_a[ia];
        let y = list_b[ib];
        if removed.at(x) || x == center {
            ia += 1;
            continue;
        }
        if removed.at(y) || y == center {
            ib += 1;
            continue;
        }
        if x < y {
            attach(sg, x, center);
            merged.push(x);
            deg_decrease[center] -= 1;
            ia += 1;
        } else if y < x {
            attach(sg, y, center);
            merged.push(y);
            deg_decrease[center] -= 1;
            ib += 1;
        } else {
            // common neighbor: one new edge replaces two old ones
            attach(sg, x, center);
            merged.push(x);
            deg_decrease[center] -= 1;
            deg_decrease[x] += 1;
            ia += 1;
            ib += 1;
        }
    }
    while ia < list_a.len() {
        let x = list_a[ia];
        if !removed.at(x) && x != center {
            attach(sg, x, center);
            merged.push(x);
            deg_decrease[center] -= 1;
        }
        ia += 1;
    }
    while ib < list_b.len() {
        let y = list_b[ib];
        if !removed.at(y) && y != center {
            attach(sg, y, center);
            merged.push(y);
            deg_decrease[center] -= 1;
        }
        ib += 1;
    }

    sg.adj_lists[center] = merged;
}

fn attach(sg: &mut Subgraph, to: usize, v: usize) {
    let list = &mut sg.adj_lists[to];
    let pos = list
        .binary_search(&v)
        .expect_err("folded vertex cannot already be a neighbor");
    list.insert(pos, v);
}
