use crate::degeneracy::{self, DegeneracyOrdering};
use crate::graph::{CsrGraph, RightNeighborhood};
use crate::vc;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

pub struct MaxCliqueBuilder {
    num_threads: usize,
    refine_upper_bound: bool,
}

impl MaxCliqueBuilder {
    pub fn new() -> Self {
        Self {
            num_threads: 1,
            refine_upper_bound: true,
        }
    }

    impl_setter!(self, num_threads, usize);
    impl_setter!(self, refine_upper_bound, bool);

    pub fn build(self) -> MaxClique {
        MaxClique {
            num_threads: self.num_threads.max(1),
            refine_upper_bound: self.refine_upper_bound,
        }
    }
}

impl Default for MaxCliqueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MaxClique {
    num_threads: usize,
    refine_upper_bound: bool,
}

#[derive(Clone, Debug)]
pub struct MaxCliqueResult {
    pub clique_number: usize,
    pub degeneracy: usize,
    /// The lower bound the ordering pass produced, before any search.
    pub ordering_lb: usize,
    pub degeneracy_time: Duration,
    pub total_time: Duration,
    pub num_threads: usize,
}

impl MaxClique {
    /// Computes the clique number. A clique of size `t` exists iff some root
    /// `v` with `right_degree[v] + 1 >= t` has a complement neighborhood with
    /// a vertex cover of `right_degree[v] + 1 - t` vertices, so the search
    /// walks the target between the degeneracy bounds and asks the cover
    /// oracle per root until the bounds meet.
    pub fn solve(&self, graph: &CsrGraph) -> MaxCliqueResult {
        let start = Instant::now();
        let (ord, neighborhoods) =
            degeneracy::ordering_with_neighborhoods(graph, self.refine_upper_bound);
        let degeneracy_time = start.elapsed();

        let mut lb = ord.clique_lb;
        let mut ub = ord.clique_ub;
        if lb < ub {
            let sorted = descending_by_right_degree(&ord);
            let mut target = ub;
            while lb < ub {
                debug!("round: target {} within [{}, {}]", target, lb, ub);
                if self.scan(graph, &ord, &neighborhoods, &sorted, target) {
                    lb = target;
                } else {
                    ub = target - 1;
                }
                target = (lb + ub + 1) / 2;
            }
        }
        let total_time = start.elapsed();

        info!("threads used: {}", self.num_threads);
        info!("degeneracy: {}", ord.degeneracy);
        info!("lower bound from the ordering: {}", ord.clique_lb);
        info!("maximum clique size: {}", ub);
        info!("total running time: {:?}", total_time);

        MaxCliqueResult {
            clique_number: ub,
            degeneracy: ord.degeneracy,
            ordering_lb: ord.clique_lb,
            degeneracy_time,
            total_time,
            num_threads: self.num_threads,
        }
    }

    /// One search round: striped workers walk the roots in descending
    /// right-degree order and ask the cover oracle; any hit wins the round
    /// and the others bail out at their next poll.
    fn scan(
        &self,
        graph: &CsrGraph,
        ord: &DegeneracyOrdering,
        neighborhoods: &[RightNeighborhood],
        sorted: &[usize],
        target: usize,
    ) -> bool {
        let num_threads = self.num_threads;
        let found = AtomicBool::new(false);
        thread::scope(|scope| {
            for t in 0..num_threads {
                let found = &found;
                let right_degree = &ord.right_degree;
                scope.spawn(move || {
                    let mut i = t;
                    while i < sorted.len() && !found.load(Ordering::Relaxed) {
                        let v = sorted[i];
                        let Some(budget) = (right_degree[v] + 1).checked_sub(target) else {
                            // roots are sorted, the rest are even smaller
                            return;
                        };
                        let complement = neighborhoods[v].complement(graph);
                        if vc::has_cover(complement, budget) {
                            found.store(true, Ordering::Release);
                            return;
                        }
                        i += num_threads;
                    }
                });
            }
        });
        found.load(Ordering::Acquire)
    }
}

/// Bucket sort by right-degree, largest first; equal degrees keep ascending
/// vertex order. Roots with large right-neighborhoods are the most likely
/// clique hosts, and any early hit aborts the round.
fn descending_by_right_degree(ord: &DegeneracyOrdering) -> Vec<usize> {
    let n = ord.right_degree.len();
    let mut buckets = vec![0usize; ord.degeneracy + 1];
    for v in 0..n {
        buckets[ord.right_degree[v]] += 1;
    }
    let mut count = 0;
    for k in (0..buckets.len()).rev() {
        let tmp = buckets[k];
        buckets[k] = count;
        count += tmp;
    }
    let mut sorted = vec![0usize; n];
    for v in 0..n {
        sorted[buckets[ord.right_degree[v]]] = v;
        buckets[ord.right_degree[v]] += 1;
    }
    sorted
}
