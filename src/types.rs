//! Types used to represent nodes, edges and their attributes.

/// Type used to index the nodes.
pub type NodeT = u32;
/// Type used to index the node types.
pub type NodeTypeT = u16;
/// Type used to index the directed half-edges.
pub type EdgeT = u64;
/// Type used to index the edge types.
pub type EdgeTypeT = u16;
/// Type used for the weights of the edges.
pub type WeightT = f32;
/// Type used for the walk bias parameters such as the return parameter (p)
/// and the in-out parameter (q), and for all probability arithmetic.
pub type ParamsT = f64;

pub type Result<T> = std::result::Result<T, String>;
