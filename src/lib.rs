//! Graph core of a biased random-walk engine for node embeddings.
//!
//! The crate loads a possibly weighted, possibly typed edge list into
//! a compact graph, precomputes Walker alias tables for the
//! second-order node2vec transitions (and for their edge-type aware
//! variant) and draws random walks in expected constant time per
//! step.
//!
//! # Definitions
//! * `half-edge`: one directed side of an undirected edge; the graph
//!   stores both sides of every edge of the source data.
//! * `trap`: a node without outbound half-edges; walks reaching a
//!   trap terminate early.
//! * `alias table`: the pair of arrays of Walker's method, allowing
//!   O(1) sampling from a fixed discrete distribution.

pub mod types;
pub use crate::types::*;

mod to_from_usize;
pub use crate::to_from_usize::*;

mod utils;
pub(crate) use crate::utils::*;

mod vocabulary;
pub use crate::vocabulary::*;

mod alias;
pub use crate::alias::*;

mod csv_file_reader;
pub use crate::csv_file_reader::*;

mod edge_file_reader;
pub use crate::edge_file_reader::*;

mod node_file_reader;
pub use crate::node_file_reader::*;

mod graph;
pub use crate::graph::*;

mod constructors;

mod parameters;
pub use crate::parameters::*;

mod walks;
pub use crate::walks::*;
