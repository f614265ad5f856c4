//! A compact graph representation optimized for repeated neighbour
//! enumeration during random walks.
use super::*;
use counter::Counter;
use std::collections::HashMap;
use std::fmt;

/// A possibly weighted, possibly typed graph in compressed sparse row form.
///
/// Every undirected edge of the source data is stored as the two
/// opposing directed half-edges, so for an input with `E` edges the
/// graph holds `M = 2E` half-edges. The half-edges leaving a node are
/// stored contiguously and sorted by destination: the sorted order is
/// what makes the edge lookups a binary search and the neighbour
/// enumeration reproducible.
///
/// The graph is built once by the constructors and never mutated
/// afterwards, which is what makes it freely shareable between the
/// walkers.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    pub(crate) name: String,
    pub(crate) has_traps: bool,
    // CSR structs: the half-edges of node u are the range
    // outbounds[u - 1]..outbounds[u] of the parallel vectors below.
    pub(crate) outbounds: Vec<EdgeT>,
    pub(crate) sources: Vec<NodeT>,
    pub(crate) destinations: Vec<NodeT>,
    pub(crate) weights: Vec<WeightT>,
    pub(crate) nodes: Vocabulary<NodeT>,
    pub(crate) node_types: Option<VocabularyVec<NodeTypeT>>,
    pub(crate) edge_types: Option<VocabularyVec<EdgeTypeT>>,
}

/// # Graph utility methods
impl Graph {
    /// Returns number of nodes in the graph.
    pub fn get_nodes_number(&self) -> NodeT {
        self.nodes.len() as NodeT
    }

    /// Returns number of directed half-edges in the graph.
    ///
    /// Since every undirected edge is stored in both directions, this
    /// is twice the number of edges of the source edge list.
    pub fn get_edges_number(&self) -> EdgeT {
        self.sources.len() as EdgeT
    }

    /// Returns the name of the graph.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Return range of outbound half-edge IDs for given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node, panics when out of range.
    pub(crate) fn get_min_max_edge(&self, node: NodeT) -> (EdgeT, EdgeT) {
        let min_edge: EdgeT = if node == 0 {
            0
        } else {
            self.outbounds[(node - 1) as usize]
        };
        let max_edge: EdgeT = self.outbounds[node as usize];
        (min_edge, max_edge)
    }

    /// Returns the neighbours of given node, sorted by node ID.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node, panics when out of range.
    pub fn get_node_neighbours(&self, node: NodeT) -> &[NodeT] {
        let (min_edge, max_edge) = self.get_min_max_edge(node);
        &self.destinations[min_edge as usize..max_edge as usize]
    }

    /// Returns the IDs of the outbound half-edges of given node,
    /// sorted by destination.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node, panics when out of range.
    pub fn iter_node_out_edges(&self, node: NodeT) -> impl Iterator<Item = EdgeT> {
        let (min_edge, max_edge) = self.get_min_max_edge(node);
        min_edge..max_edge
    }

    /// Returns the number of outbound neighbours of given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node, panics when out of range.
    pub fn degree(&self, node: NodeT) -> NodeT {
        let (min_edge, max_edge) = self.get_min_max_edge(node);
        (max_edge - min_edge) as NodeT
    }

    /// Returns boolean representing if given node is a trap.
    ///
    /// A trap is a node without any outbound half-edge: a walk
    /// reaching it has nowhere to go and terminates.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node, panics when out of range.
    pub fn is_node_trap(&self, node: NodeT) -> bool {
        self.degree(node) == 0
    }

    /// Returns boolean representing if the destination of given edge is a trap.
    ///
    /// # Arguments
    ///
    /// * `edge`: EdgeT - The half-edge, panics when out of range.
    pub fn is_edge_trap(&self, edge: EdgeT) -> bool {
        self.is_node_trap(self.destinations[edge as usize])
    }

    /// Returns boolean representing if the graph contains any trap node.
    pub fn has_traps(&self) -> bool {
        self.has_traps
    }

    /// Returns boolean representing if edge passing between given nodes exists.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn has_edge(&self, src: NodeT, dst: NodeT) -> bool {
        src < self.get_nodes_number()
            && dst < self.get_nodes_number()
            && self.get_node_neighbours(src).binary_search(&dst).is_ok()
    }

    /// Returns the ID of the half-edge passing between given nodes.
    ///
    /// The lookup is a binary search over the sorted neighbours of the
    /// source, hence O(log d) in its degree.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_edge_id(&self, src: NodeT, dst: NodeT) -> Result<EdgeT> {
        if src >= self.get_nodes_number() || dst >= self.get_nodes_number() {
            return Err(format!(
                "The edge ({}, {}) was requested but the graph has {} nodes.",
                src,
                dst,
                self.get_nodes_number()
            ));
        }
        let (min_edge, _) = self.get_min_max_edge(src);
        match self.get_node_neighbours(src).binary_search(&dst) {
            Ok(position) => Ok(min_edge + position as EdgeT),
            Err(_) => Err(format!(
                "The edge passing between {} ({}) and {} ({}) does not exist in the graph.",
                self.nodes.translate(src),
                src,
                self.nodes.translate(dst),
                dst
            )),
        }
    }

    /// Returns the weight of the edge passing between given nodes.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_weight(&self, src: NodeT, dst: NodeT) -> Result<WeightT> {
        let edge = self.get_edge_id(src, dst)?;
        Ok(self.weights[edge as usize])
    }

    /// Returns the numeric edge type of the edge passing between given nodes.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_edge_type(&self, src: NodeT, dst: NodeT) -> Result<EdgeTypeT> {
        let edge = self.get_edge_id(src, dst)?;
        self.get_edge_type_id(edge)
    }

    /// Returns the original edge type tag of the edge passing between given nodes.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the edge.
    /// * `dst`: NodeT - The destination node of the edge.
    pub fn get_edge_type_name(&self, src: NodeT, dst: NodeT) -> Result<String> {
        let edge_type = self.get_edge_type(src, dst)?;
        match &self.edge_types {
            Some(ets) => Ok(ets.translate(edge_type).to_string()),
            None => Err("Edge types are not defined for current graph instance.".to_string()),
        }
    }

    /// Returns numeric edge type of given edge.
    ///
    /// # Arguments
    ///
    /// * `edge`: EdgeT - The half-edge whose edge type is to be returned.
    pub fn get_edge_type_id(&self, edge: EdgeT) -> Result<EdgeTypeT> {
        match &self.edge_types {
            Some(ets) => {
                if (edge as usize) < ets.ids.len() {
                    Ok(ets.ids[edge as usize])
                } else {
                    Err(format!(
                        "The edge ID {} is too big for the edge types vector which has length {}.",
                        edge,
                        ets.ids.len()
                    ))
                }
            }
            None => Err("Edge types are not defined for current graph instance.".to_string()),
        }
    }

    /// Returns numeric node type of given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The node whose node type is to be returned.
    pub fn get_node_type_id(&self, node: NodeT) -> Result<NodeTypeT> {
        match &self.node_types {
            Some(nts) => {
                if (node as usize) < nts.ids.len() {
                    Ok(nts.ids[node as usize])
                } else {
                    Err(format!(
                        "The node ID {} is too big for the node types vector which has length {}.",
                        node,
                        nts.ids.len()
                    ))
                }
            }
            None => Err("Node types are not defined for current graph instance.".to_string()),
        }
    }

    /// Returns boolean representing if graph has edge types.
    pub fn has_edge_types(&self) -> bool {
        self.edge_types.is_some()
    }

    /// Returns boolean representing if graph has node types.
    pub fn has_node_types(&self) -> bool {
        self.node_types.is_some()
    }

    /// Returns the numeric ID of the node with given name.
    ///
    /// # Arguments
    ///
    /// * `node_name`: &str - The name of the node.
    pub fn get_node_id(&self, node_name: &str) -> Result<NodeT> {
        match self.nodes.get(node_name) {
            Some(node_id) => Ok(*node_id),
            None => Err(format!(
                "The node name {} is not present in the graph.",
                node_name
            )),
        }
    }

    /// Returns the original name of the node with given ID.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The numeric ID of the node.
    pub fn get_node_name(&self, node: NodeT) -> Result<String> {
        if node >= self.get_nodes_number() {
            return Err(format!(
                "The node ID {} was requested but the graph has {} nodes.",
                node,
                self.get_nodes_number()
            ));
        }
        Ok(self.nodes.translate(node).to_string())
    }

    /// Return iterator over the node IDs of the graph.
    pub fn iter_node_ids(&self) -> impl Iterator<Item = NodeT> {
        0..self.get_nodes_number()
    }

    /// Return iterator over the half-edges of the graph as
    /// (edge ID, source, destination) triples, sorted by (source, destination).
    pub fn iter_edges(&self) -> impl Iterator<Item = (EdgeT, NodeT, NodeT)> + '_ {
        self.sources
            .iter()
            .zip(self.destinations.iter())
            .enumerate()
            .map(|(edge, (src, dst))| (edge as EdgeT, *src, *dst))
    }

    /// Returns how many half-edges carry each edge type tag.
    pub fn get_edge_type_counts(&self) -> Result<HashMap<EdgeTypeT, usize>> {
        match &self.edge_types {
            Some(ets) => Ok(Counter::init(ets.ids.clone()).into_map()),
            None => Err("Edge types are not defined for current graph instance.".to_string()),
        }
    }

    /// Returns how many nodes carry each node type tag.
    pub fn get_node_type_counts(&self) -> Result<HashMap<NodeTypeT, usize>> {
        match &self.node_types {
            Some(nts) => Ok(Counter::init(nts.ids.clone()).into_map()),
            None => Err("Node types are not defined for current graph instance.".to_string()),
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph {} with {} nodes and {} directed half-edges ({} edge types, {} node types).",
            self.name,
            self.get_nodes_number(),
            self.get_edges_number(),
            self.edge_types.as_ref().map_or(0, |ets| ets.len()),
            self.node_types.as_ref().map_or(0, |nts| nts.len())
        )
    }
}
