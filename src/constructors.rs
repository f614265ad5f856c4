use super::*;
use log::info;
use rayon::prelude::*;

/// Directed half-edge as accumulated during the load:
/// (source, destination, edge type, weight).
type Quadruple = (NodeT, NodeT, EdgeTypeT, WeightT);

/// Sort the given half-edges by (source, destination), drop the
/// duplicated ones keeping the first occurrence, and build the
/// compressed sparse row vectors.
///
/// The sort is stable so the first occurrence in file order is the
/// one that survives the deduplication; a duplicate with a different
/// weight than the surviving one is a conflict and stops the build.
fn build_graph(
    name: String,
    nodes: Vocabulary<NodeT>,
    mut half_edges: Vec<Quadruple>,
    edge_types_vocabulary: Option<Vocabulary<EdgeTypeT>>,
    node_types: Option<VocabularyVec<NodeTypeT>>,
) -> Result<Graph> {
    let nodes_number = nodes.len();

    info!("Sorting the half-edges.");
    half_edges.par_sort_by(|(src1, dst1, _, _), (src2, dst2, _, _)| {
        (*src1, *dst1).cmp(&(*src2, *dst2))
    });

    let mut sources: Vec<NodeT> = Vec::with_capacity(half_edges.len());
    let mut destinations: Vec<NodeT> = Vec::with_capacity(half_edges.len());
    let mut weights: Vec<WeightT> = Vec::with_capacity(half_edges.len());
    let mut edge_type_ids: Vec<EdgeTypeT> = Vec::with_capacity(half_edges.len());

    info!("Building the compressed neighbour lists.");
    for (src, dst, edge_type, weight) in half_edges {
        if let (Some(last_src), Some(last_dst)) = (sources.last(), destinations.last()) {
            if *last_src == src && *last_dst == dst {
                let last_weight = *weights.last().unwrap();
                if (last_weight - weight).abs() >= WeightT::EPSILON {
                    return Err(format!(
                        concat!(
                            "The edge between {} ({}) and {} ({}) is provided multiple ",
                            "times with the conflicting weights {} and {}."
                        ),
                        nodes.translate(src),
                        src,
                        nodes.translate(dst),
                        dst,
                        last_weight,
                        weight
                    ));
                }
                continue;
            }
        }
        sources.push(src);
        destinations.push(dst);
        weights.push(weight);
        edge_type_ids.push(edge_type);
    }

    let mut outbounds = vec![0 as EdgeT; nodes_number];
    for src in &sources {
        outbounds[*src as usize] += 1;
    }
    for node in 1..nodes_number {
        outbounds[node] += outbounds[node - 1];
    }

    let has_traps = match nodes_number {
        0 => false,
        _ => {
            outbounds[0] == 0
                || (1..nodes_number).any(|node| outbounds[node] == outbounds[node - 1])
        }
    };

    Ok(Graph {
        name,
        has_traps,
        outbounds,
        sources,
        destinations,
        weights,
        nodes,
        node_types,
        edge_types: edge_types_vocabulary.map(|vocabulary| VocabularyVec {
            ids: edge_type_ids,
            vocabulary,
        }),
    })
}

/// Read the node type file and assign a numeric type to every node of
/// the given vocabulary. Every node name of the file must be known and
/// every node of the graph must receive a type.
fn parse_node_types(
    node_file_reader: &NodeFileReader,
    nodes: &Vocabulary<NodeT>,
) -> Result<VocabularyVec<NodeTypeT>> {
    let mut vocabulary: Vocabulary<NodeTypeT> = Vocabulary::new();
    let mut ids: Vec<Option<NodeTypeT>> = vec![None; nodes.len()];
    for row in node_file_reader.read_lines()? {
        let (node_name, node_type) = row?;
        let node_id = match nodes.get(&node_name) {
            Some(node_id) => *node_id,
            None => {
                return Err(format!(
                    "The node type file refers to the node {} which is not present in the edge list.",
                    node_name
                ))
            }
        };
        let node_type_id = vocabulary.insert(node_type)?;
        ids[node_id as usize] = Some(node_type_id);
    }
    let ids = ids
        .into_iter()
        .enumerate()
        .map(|(node_id, node_type)| {
            node_type.ok_or_else(|| {
                format!(
                    "The node {} does not appear in the given node type file.",
                    nodes.translate(node_id as NodeT)
                )
            })
        })
        .collect::<Result<Vec<NodeTypeT>>>()?;
    Ok(VocabularyVec { ids, vocabulary })
}

/// # Graph constructors
impl Graph {
    /// Build the graph from an edge list file and an optional node type file.
    ///
    /// The edge file is streamed twice: a first pass interns the node
    /// names in first-seen order, a second pass accumulates the
    /// half-edges. Every record of the file describes an undirected
    /// edge and is stored in both directions; files that already list
    /// both directions load to the same graph because the duplicated
    /// direction is dropped.
    ///
    /// # Arguments
    ///
    /// * `edge_file_reader`: EdgeFileReader - Reader of the edge list.
    /// * `node_file_reader`: Option<NodeFileReader> - Optional reader of the node type file.
    /// * `name`: Option<String> - Name of the graph, by default "Graph".
    pub fn from_csv(
        edge_file_reader: EdgeFileReader,
        node_file_reader: Option<NodeFileReader>,
        name: Option<String>,
    ) -> Result<Graph> {
        let mut nodes: Vocabulary<NodeT> = Vocabulary::new();

        info!("Reading the node names from the edge list.");
        for row in edge_file_reader.read_lines()? {
            let (source_node_name, destination_node_name, _, _) = row?;
            nodes.insert(source_node_name)?;
            nodes.insert(destination_node_name)?;
        }

        info!("Reading the half-edges from the edge list.");
        let has_edge_types = edge_file_reader.edge_types_column_number.is_some();
        let mut edge_types_vocabulary: Vocabulary<EdgeTypeT> = Vocabulary::new();
        let mut half_edges: Vec<Quadruple> = Vec::new();
        for row in edge_file_reader.read_lines()? {
            let (source_node_name, destination_node_name, edge_type, weight) = row?;
            // The names were interned by the first pass, so these lookups
            // return the already assigned IDs.
            let src = nodes.insert(source_node_name)?;
            let dst = nodes.insert(destination_node_name)?;
            let edge_type_id = match edge_type {
                Some(edge_type) => edge_types_vocabulary.insert(edge_type)?,
                None => 0,
            };
            half_edges.push((src, dst, edge_type_id, weight));
            if src != dst {
                half_edges.push((dst, src, edge_type_id, weight));
            }
        }

        let node_types = match &node_file_reader {
            Some(node_file_reader) => Some(parse_node_types(node_file_reader, &nodes)?),
            None => None,
        };

        build_graph(
            name.unwrap_or_else(|| "Graph".to_string()),
            nodes,
            half_edges,
            if has_edge_types {
                Some(edge_types_vocabulary)
            } else {
                None
            },
            node_types,
        )
    }

    /// Build the graph from vectors of numeric edges.
    ///
    /// The endpoints are undirected edges exactly as the records of an
    /// edge file; `nodes_number` may exceed the largest endpoint, in
    /// which case the unreferenced nodes are traps.
    ///
    /// # Arguments
    ///
    /// * `nodes_number`: NodeT - Number of nodes of the graph.
    /// * `sources`: Vec<NodeT> - Source of every undirected edge.
    /// * `destinations`: Vec<NodeT> - Destination of every undirected edge.
    /// * `weights`: Option<Vec<WeightT>> - Optional weight of every edge, by default 1.0.
    /// * `edge_types`: Option<Vec<EdgeTypeT>> - Optional type tag of every edge.
    /// * `node_types`: Option<Vec<NodeTypeT>> - Optional type tag of every node.
    /// * `name`: Option<String> - Name of the graph, by default "Graph".
    pub fn from_integer_edges(
        nodes_number: NodeT,
        sources: Vec<NodeT>,
        destinations: Vec<NodeT>,
        weights: Option<Vec<WeightT>>,
        edge_types: Option<Vec<EdgeTypeT>>,
        node_types: Option<Vec<NodeTypeT>>,
        name: Option<String>,
    ) -> Result<Graph> {
        if sources.len() != destinations.len() {
            return Err(format!(
                "Given sources length {} does not match destinations length {}.",
                sources.len(),
                destinations.len()
            ));
        }
        if let Some(ws) = &weights {
            if ws.len() != sources.len() {
                return Err(format!(
                    "Given weights length {} does not match edges length {}.",
                    ws.len(),
                    sources.len()
                ));
            }
            for weight in ws {
                if !weight.is_finite() || *weight <= 0.0 {
                    return Err(format!(
                        "Found the edge weight {} but weights must be strictly positive finite numbers.",
                        weight
                    ));
                }
            }
        }
        if let Some(ets) = &edge_types {
            if ets.len() != sources.len() {
                return Err(format!(
                    "Given edge types length {} does not match edges length {}.",
                    ets.len(),
                    sources.len()
                ));
            }
        }
        if let Some(nts) = &node_types {
            if nts.len() != nodes_number as usize {
                return Err(format!(
                    "Given node types length {} does not match the number of nodes {}.",
                    nts.len(),
                    nodes_number
                ));
            }
        }
        if let Some(endpoint) = sources
            .iter()
            .chain(destinations.iter())
            .find(|endpoint| **endpoint >= nodes_number)
        {
            return Err(format!(
                "The node ID {} appears in the edges but the graph has {} nodes.",
                endpoint, nodes_number
            ));
        }

        let mut nodes: Vocabulary<NodeT> = Vocabulary::with_capacity(nodes_number as usize);
        for node in 0..nodes_number {
            nodes.insert(node.to_string())?;
        }

        let mut half_edges: Vec<Quadruple> = Vec::with_capacity(sources.len() * 2);
        for (i, (src, dst)) in sources.iter().zip(destinations.iter()).enumerate() {
            let weight = weights.as_ref().map_or(1.0, |ws| ws[i]);
            let edge_type_id = edge_types.as_ref().map_or(0, |ets| ets[i]);
            half_edges.push((*src, *dst, edge_type_id, weight));
            if src != dst {
                half_edges.push((*dst, *src, edge_type_id, weight));
            }
        }

        // Numeric type tags are interned as their decimal strings so the
        // provided IDs and the vocabulary IDs coincide.
        let edge_types_vocabulary = match &edge_types {
            Some(ets) => {
                let mut vocabulary: Vocabulary<EdgeTypeT> = Vocabulary::new();
                let max_edge_type = ets.iter().max().cloned().unwrap_or(0);
                for edge_type in 0..=max_edge_type {
                    vocabulary.insert(edge_type.to_string())?;
                }
                Some(vocabulary)
            }
            None => None,
        };
        let node_types = match node_types {
            Some(nts) => {
                let mut vocabulary: Vocabulary<NodeTypeT> = Vocabulary::new();
                let max_node_type = nts.iter().max().cloned().unwrap_or(0);
                for node_type in 0..=max_node_type {
                    vocabulary.insert(node_type.to_string())?;
                }
                Some(VocabularyVec {
                    ids: nts,
                    vocabulary,
                })
            }
            None => None,
        };

        build_graph(
            name.unwrap_or_else(|| "Graph".to_string()),
            nodes,
            half_edges,
            edge_types_vocabulary,
            node_types,
        )
    }
}
