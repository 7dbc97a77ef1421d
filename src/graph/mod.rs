pub use csr_graph::CsrGraph;
pub use subgraph::{LocalVertex, RightNeighborhood, Subgraph};

mod csr_graph;
mod subgraph;
