//! Precomputed transition probabilities and the biased random walker.
use super::*;
use counter::Counter;
use indicatif::ParallelProgressIterator;
use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashMap;

/// Build the first-order transition table of the given node: its
/// outbound edge weights, normalized. Trap nodes get the empty
/// sentinel and are handled by the walker.
fn build_node_alias(graph: &Graph, node: NodeT) -> Result<AliasTable> {
    let (min_edge, max_edge) = graph.get_min_max_edge(node);
    if min_edge == max_edge {
        return Ok(AliasTable::sentinel());
    }
    let weights = &graph.weights[min_edge as usize..max_edge as usize];
    let total: ParamsT = weights.iter().map(|weight| *weight as ParamsT).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(format!(
            concat!(
                "The outbound weights of the node {} ({}) sum to {}: ",
                "the transition distribution is degenerate."
            ),
            graph.nodes.translate(node),
            node,
            total
        ));
    }
    let probabilities: Vec<ParamsT> = weights
        .iter()
        .map(|weight| *weight as ParamsT / total)
        .collect();
    AliasTable::new(&probabilities)
}

/// Compute the per-edge-type probability mass of the edge-type aware
/// transitions for the context of the given traversed half-edge.
///
/// Every type reachable from the destination other than the traversed
/// one receives mass `gamma / (count * types_number)`, split uniformly
/// among its edges; the traversed type keeps whatever mass is left.
fn build_type_probabilities(
    edge_type_ids: &[EdgeTypeT],
    jump_param: ParamsT,
    edge: EdgeT,
    min_edge: EdgeT,
    max_edge: EdgeT,
) -> Result<HashMap<EdgeTypeT, ParamsT>> {
    let reference_type = edge_type_ids[edge as usize];
    let counts: HashMap<EdgeTypeT, usize> = Counter::init(
        edge_type_ids[min_edge as usize..max_edge as usize]
            .iter()
            .cloned(),
    )
    .into_map();
    let types_number = counts.len();

    let mut probabilities: HashMap<EdgeTypeT, ParamsT> = HashMap::with_capacity(types_number);
    let mut other_types_mass = 0.0;
    for (edge_type, count) in counts.iter() {
        if *edge_type != reference_type {
            let mass = jump_param / (*count * types_number) as ParamsT;
            probabilities.insert(*edge_type, mass);
            other_types_mass += mass;
        }
    }
    match counts.get(&reference_type) {
        None => {
            probabilities.insert(reference_type, 0.0);
        }
        Some(count) => {
            let residual = (1.0 - other_types_mass) / *count as ParamsT;
            if residual < 0.0 {
                return Err(format!(
                    concat!(
                        "The jump parameter {} leaves a negative probability mass ",
                        "to the edge type {} of the edge with ID {}: ",
                        "the transition distribution is degenerate."
                    ),
                    jump_param, reference_type, edge
                ));
            }
            probabilities.insert(reference_type, residual);
        }
    }
    Ok(probabilities)
}

/// Build the second-order transition table of the given traversed
/// half-edge, scoring every neighbour of its destination with the
/// node2vec factor and, in edge-type aware mode, the per-type mass.
fn build_edge_alias(
    graph: &Graph,
    weights: &WalkWeights,
    mode: WalkMode,
    edge: EdgeT,
) -> Result<AliasTable> {
    let src = graph.sources[edge as usize];
    let dst = graph.destinations[edge as usize];
    let (min_edge, max_edge) = graph.get_min_max_edge(dst);
    if min_edge == max_edge {
        // The destination is a trap: the walker never samples from here.
        return Ok(AliasTable::sentinel());
    }
    let type_context = match (mode, &graph.edge_types) {
        (WalkMode::Homogeneous, _) => None,
        (WalkMode::HeterogeneousByEdgeType, Some(edge_types)) => {
            let probabilities = build_type_probabilities(
                &edge_types.ids,
                weights.jump_param,
                edge,
                min_edge,
                max_edge,
            )?;
            Some((&edge_types.ids, probabilities))
        }
        (WalkMode::HeterogeneousByEdgeType, None) => {
            return Err(concat!(
                "The edge-type aware transitions were requested ",
                "but the graph has no edge types."
            )
            .to_string())
        }
    };

    let neighbours = &graph.destinations[min_edge as usize..max_edge as usize];
    let mut scores: Vec<ParamsT> = Vec::with_capacity(neighbours.len());
    for (i, neighbour) in neighbours.iter().enumerate() {
        let edge_weight = graph.weights[min_edge as usize + i] as ParamsT;
        let node2vec_factor = if *neighbour == src {
            1.0 / weights.return_param
        } else if graph.has_edge(*neighbour, src) {
            1.0
        } else {
            1.0 / weights.explore_param
        };
        let type_mass = match &type_context {
            Some((edge_type_ids, probabilities)) => {
                probabilities[&edge_type_ids[min_edge as usize + i]]
            }
            None => 1.0,
        };
        scores.push(type_mass * edge_weight * node2vec_factor);
    }

    let total: ParamsT = scores.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(format!(
            concat!(
                "The transition scores of the edge with ID {} between {} and {} ",
                "sum to {}: the transition distribution is degenerate."
            ),
            edge,
            graph.nodes.translate(src),
            graph.nodes.translate(dst),
            total
        ));
    }
    let probabilities: Vec<ParamsT> = scores.iter().map(|score| score / total).collect();
    AliasTable::new(&probabilities)
}

/// Biased random-walk engine over an immutable graph.
///
/// The engine owns the graph together with the two families of alias
/// tables of the node2vec transitions: one table per node for the
/// first step and one table per directed half-edge for all the later,
/// second-order steps. Preprocessing is single-shot: the engine is
/// created unbuilt, [`WalkEngine::preprocess`] moves it to ready (or
/// leaves it unusable when the parameters are degenerate) and the walk
/// methods refuse to run before that.
///
/// After preprocessing every structure is read-only, so the walks can
/// be freely parallelized; each walk owns its seeded random source
/// and consumes exactly two draws per step.
pub struct WalkEngine {
    pub(crate) graph: Graph,
    pub(crate) weights: WalkWeights,
    pub(crate) mode: WalkMode,
    pub(crate) nodes_alias: Vec<AliasTable>,
    pub(crate) edges_alias: Vec<AliasTable>,
    pub(crate) is_preprocessed: bool,
    pub(crate) verbose: bool,
    walks_cache: HashMap<(usize, usize), Vec<Vec<NodeT>>>,
}

impl WalkEngine {
    /// Return new unbuilt WalkEngine over the given graph.
    ///
    /// # Arguments
    ///
    /// * `graph`: Graph - The graph to walk on.
    pub fn new(graph: Graph) -> WalkEngine {
        WalkEngine {
            graph,
            weights: WalkWeights::default(),
            mode: WalkMode::Homogeneous,
            nodes_alias: Vec::new(),
            edges_alias: Vec::new(),
            is_preprocessed: false,
            verbose: false,
            walks_cache: HashMap::new(),
        }
    }

    /// Set the verbosity.
    ///
    /// # Arguments
    ///
    /// * `verbose`: Option<bool> - Whether to show the loading bars.
    pub fn set_verbose(mut self, verbose: Option<bool>) -> WalkEngine {
        if let Some(verbose) = verbose {
            self.verbose = verbose;
        }
        self
    }

    /// Returns reference to the graph of the engine.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns boolean representing if the transitions have been preprocessed.
    pub fn is_preprocessed(&self) -> bool {
        self.is_preprocessed
    }

    /// Returns the walk weights the transitions were preprocessed with.
    pub fn walk_weights(&self) -> &WalkWeights {
        &self.weights
    }

    /// Returns the transition model the engine was preprocessed with.
    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    fn must_be_preprocessed(&self) -> Result<()> {
        if !self.is_preprocessed {
            return Err(concat!(
                "The transition probabilities of the engine have not been ",
                "preprocessed yet. Call the preprocess method before walking."
            )
            .to_string());
        }
        Ok(())
    }

    /// Precompute the alias tables of the biased transitions.
    ///
    /// The construction is fanned out with a thread pool over the
    /// nodes and over the half-edges: every work item only reads the
    /// graph and writes its own slot, so no synchronization is needed.
    /// Preprocessing is single-shot; on failure the engine is left
    /// unusable and the error is surfaced to the caller.
    ///
    /// # Arguments
    ///
    /// * `weights`: WalkWeights - The bias parameters of the walks.
    /// * `mode`: WalkMode - Which transition model to use.
    pub fn preprocess(&mut self, weights: WalkWeights, mode: WalkMode) -> Result<()> {
        if self.is_preprocessed {
            return Err(concat!(
                "The transition probabilities of the engine have already been ",
                "preprocessed. Build a new engine to use different parameters."
            )
            .to_string());
        }
        if mode == WalkMode::HeterogeneousByEdgeType && !self.graph.has_edge_types() {
            return Err(concat!(
                "The edge-type aware transitions were requested ",
                "but the graph has no edge types."
            )
            .to_string());
        }

        let graph = &self.graph;
        info!("Computing the per-node transition tables.");
        let pb_nodes = get_loading_bar(
            self.verbose,
            "Computing node transitions",
            graph.get_nodes_number() as usize,
        );
        let nodes_alias = (0..graph.get_nodes_number())
            .into_par_iter()
            .progress_with(pb_nodes)
            .map(|node| build_node_alias(graph, node))
            .collect::<Result<Vec<AliasTable>>>();
        let nodes_alias = match nodes_alias {
            Ok(nodes_alias) => nodes_alias,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        info!("Computing the per-edge transition tables.");
        let pb_edges = get_loading_bar(
            self.verbose,
            "Computing edge transitions",
            graph.get_edges_number() as usize,
        );
        let edges_alias = (0..graph.get_edges_number() as usize)
            .into_par_iter()
            .progress_with(pb_edges)
            .map(|edge| build_edge_alias(graph, &weights, mode, edge as EdgeT))
            .collect::<Result<Vec<AliasTable>>>();
        let edges_alias = match edges_alias {
            Ok(edges_alias) => edges_alias,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        self.weights = weights;
        self.mode = mode;
        self.nodes_alias = nodes_alias;
        self.edges_alias = edges_alias;
        self.is_preprocessed = true;
        Ok(())
    }

    fn clear(&mut self) {
        self.nodes_alias.clear();
        self.edges_alias.clear();
        self.is_preprocessed = false;
    }

    /// Returns the transition table of the first step from given node.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The starting node.
    pub fn get_node_alias_table(&self, node: NodeT) -> Result<&AliasTable> {
        self.must_be_preprocessed()?;
        if node >= self.graph.get_nodes_number() {
            return Err(format!(
                "The node ID {} was requested but the graph has {} nodes.",
                node,
                self.graph.get_nodes_number()
            ));
        }
        Ok(&self.nodes_alias[node as usize])
    }

    /// Returns the transition table of the steps after traversing the
    /// half-edge passing between given nodes.
    ///
    /// # Arguments
    ///
    /// * `src`: NodeT - The source node of the traversed edge.
    /// * `dst`: NodeT - The destination node of the traversed edge.
    pub fn get_edge_alias_table(&self, src: NodeT, dst: NodeT) -> Result<&AliasTable> {
        self.must_be_preprocessed()?;
        let edge = self.graph.get_edge_id(src, dst)?;
        Ok(&self.edges_alias[edge as usize])
    }

    /// Return new sampled neighbour of given node with the half-edge
    /// used for the transition.
    fn extract_node_transition(&self, node: NodeT, rng: &mut SmallRng) -> (NodeT, EdgeT) {
        let (min_edge, _) = self.graph.get_min_max_edge(node);
        let index = self.nodes_alias[node as usize].draw(rng);
        let edge = min_edge + index as EdgeT;
        (self.graph.destinations[edge as usize], edge)
    }

    /// Return new sampled neighbour of the destination of given
    /// half-edge with the half-edge used for the transition.
    fn extract_edge_transition(&self, edge: EdgeT, rng: &mut SmallRng) -> (NodeT, EdgeT) {
        let dst = self.graph.destinations[edge as usize];
        let (min_edge, _) = self.graph.get_min_max_edge(dst);
        let index = self.edges_alias[edge as usize].draw(rng);
        let next_edge = min_edge + index as EdgeT;
        (self.graph.destinations[next_edge as usize], next_edge)
    }

    /// Returns single walk from given node, assuming the engine is ready.
    fn single_walk(&self, node: NodeT, walk_length: usize, rng: &mut SmallRng) -> Vec<NodeT> {
        let mut walk: Vec<NodeT> = Vec::with_capacity(walk_length);
        walk.push(node);
        if walk_length == 1 || self.graph.is_node_trap(node) {
            return walk;
        }
        let (dst, mut edge) = self.extract_node_transition(node, rng);
        walk.push(dst);
        while walk.len() < walk_length {
            if self.graph.is_edge_trap(edge) {
                break;
            }
            let (dst, next_edge) = self.extract_edge_transition(edge, rng);
            edge = next_edge;
            walk.push(dst);
        }
        walk
    }

    /// Returns biased random walk of at most `walk_length` nodes from
    /// given node.
    ///
    /// The walk is deterministic for a given seed. A walk reaching a
    /// trap node terminates there, so the returned walk can be shorter
    /// than requested; walks never fail once the engine is ready.
    ///
    /// # Arguments
    ///
    /// * `node`: NodeT - The starting node.
    /// * `walk_length`: usize - Maximum number of nodes of the walk.
    /// * `seed`: u64 - Seed of the random source of this walk.
    pub fn walk(&self, node: NodeT, walk_length: usize, seed: u64) -> Result<Vec<NodeT>> {
        self.must_be_preprocessed()?;
        if walk_length == 0 {
            return Err("The walk length must be strictly positive.".to_string());
        }
        if node >= self.graph.get_nodes_number() {
            return Err(format!(
                "The walk was requested from the node ID {} but the graph has {} nodes.",
                node,
                self.graph.get_nodes_number()
            ));
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        Ok(self.single_walk(node, walk_length, &mut rng))
    }

    /// Repeatedly walk from every node of the graph.
    ///
    /// Every iteration walks once from every node, in a freshly
    /// shuffled order; the walks of an iteration run in parallel and
    /// are collected by slot, so the outcome only depends on the seed.
    /// The result is jagged: walks stopped by a trap are shorter than
    /// `walk_length`.
    ///
    /// # Arguments
    ///
    /// * `num_walks`: usize - Number of iterations over the nodes.
    /// * `walk_length`: usize - Maximum number of nodes of each walk.
    /// * `seed`: u64 - Seed of the random sources.
    /// * `use_cache`: bool - Whether to memoize the corpus for these
    ///   (num_walks, walk_length) parameters.
    pub fn simulate_walks(
        &mut self,
        num_walks: usize,
        walk_length: usize,
        seed: u64,
        use_cache: bool,
    ) -> Result<Vec<Vec<NodeT>>> {
        self.must_be_preprocessed()?;
        if num_walks == 0 {
            return Err("The number of walks must be strictly positive.".to_string());
        }
        if walk_length == 0 {
            return Err("The walk length must be strictly positive.".to_string());
        }

        let key = (num_walks, walk_length);
        if use_cache {
            if let Some(walks) = self.walks_cache.get(&key) {
                return Ok(walks.clone());
            }
        }

        let nodes_number = self.graph.get_nodes_number() as usize;
        info!("Starting the random walks.");
        let pb = get_loading_bar(
            self.verbose,
            "Computing random walks",
            num_walks * nodes_number,
        );

        let mut walks: Vec<Vec<NodeT>> = Vec::with_capacity(num_walks * nodes_number);
        let mut order_rng = SmallRng::seed_from_u64(seed);
        for iteration in 0..num_walks {
            let mut order: Vec<NodeT> = self.graph.iter_node_ids().collect();
            order.shuffle(&mut order_rng);
            let engine = &*self;
            let iteration_walks: Vec<Vec<NodeT>> = order
                .par_iter()
                .enumerate()
                .progress_with(pb.clone())
                .map(|(slot, node)| {
                    let walk_seed =
                        seed.wrapping_add((1 + iteration * nodes_number + slot) as u64);
                    let mut rng = SmallRng::seed_from_u64(walk_seed);
                    engine.single_walk(*node, walk_length, &mut rng)
                })
                .collect();
            walks.extend(iteration_walks);
        }
        pb.finish();

        if use_cache {
            self.walks_cache.insert(key, walks.clone());
        }
        Ok(walks)
    }
}
