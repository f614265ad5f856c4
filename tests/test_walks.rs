use xn2v_graph::*;

/// Load the six genes fixture used by the transition tests.
fn load_het_graph() -> Graph {
    let _ = env_logger::builder().is_test(true).try_init();
    let edge_reader = EdgeFileReader::new("tests/data/small_het_graph_edges.tsv")
        .unwrap()
        .set_sources_column(Some("subject"))
        .unwrap()
        .set_destinations_column(Some("object"))
        .unwrap()
        .set_weights_column(Some("weight"))
        .unwrap()
        .set_edge_types_column(Some("edge_label"))
        .unwrap();
    Graph::from_csv(edge_reader, None, Some("small het graph".to_string())).unwrap()
}

/// Return a ready engine over the fixture with p = q = gamma = 1.
fn heterogeneous_engine() -> WalkEngine {
    let mut engine = WalkEngine::new(load_het_graph()).set_verbose(Some(false));
    engine
        .preprocess(WalkWeights::default(), WalkMode::HeterogeneousByEdgeType)
        .unwrap();
    engine
}

fn homogeneous_engine() -> WalkEngine {
    let mut engine = WalkEngine::new(load_het_graph()).set_verbose(Some(false));
    engine
        .preprocess(WalkWeights::default(), WalkMode::Homogeneous)
        .unwrap();
    engine
}

fn node(graph: &Graph, name: &str) -> NodeT {
    graph.get_node_id(name).unwrap()
}

fn assert_probabilities(table: &AliasTable, expected: &[f64]) {
    assert_eq!(expected.len(), table.len());
    for (expected, reconstructed) in expected.iter().zip(table.expected_probabilities().iter()) {
        assert!(
            (expected - reconstructed).abs() < 1e-9,
            "expected probability {} but the table reconstructs {}",
            expected,
            reconstructed
        );
    }
}

#[test]
fn test_fixture_counts() {
    let graph = load_het_graph();
    assert_eq!(6, graph.get_nodes_number());
    assert_eq!(18, graph.get_edges_number());
}

#[test]
fn test_engine_reports_its_parameters() {
    let engine = heterogeneous_engine();
    assert!(engine.is_preprocessed());
    assert_eq!(WalkMode::HeterogeneousByEdgeType, engine.mode());
    assert_eq!(&WalkWeights::default(), engine.walk_weights());
}

#[test]
/// Transitions out of a context whose destination has a single
/// neighbour collapse to a certainty.
fn test_transitions_after_edge_into_dead_end() {
    let engine = heterogeneous_engine();
    let graph = engine.graph();
    let table = engine
        .get_edge_alias_table(node(graph, "g2"), node(graph, "g6"))
        .unwrap();
    assert_probabilities(table, &[1.0]);
}

#[test]
/// When both neighbours of the destination share the traversed edge
/// type the transitions only follow the edge weights.
fn test_transitions_with_uniform_edge_type() {
    let engine = heterogeneous_engine();
    let graph = engine.graph();
    // The neighbours of g4 are g1 and g2 with weights 10 and 9.
    let table = engine
        .get_edge_alias_table(node(graph, "g2"), node(graph, "g4"))
        .unwrap();
    assert_probabilities(table, &[10.0 / 19.0, 9.0 / 19.0]);
}

#[test]
/// The jump parameter redistributes the mass towards the neighbours
/// reached through an edge type different from the traversed one.
fn test_transitions_with_mixed_edge_types() {
    let engine = heterogeneous_engine();
    let graph = engine.graph();
    // The neighbours of g3 are g1 and g2 through the traversed type
    // with weights 10 and 14, and g5 through another type with
    // weight 12: the other type takes half of the mass.
    let table = engine
        .get_edge_alias_table(node(graph, "g1"), node(graph, "g3"))
        .unwrap();
    assert_probabilities(table, &[2.5 / 12.0, 3.5 / 12.0, 6.0 / 12.0]);
}

#[test]
fn test_node_transitions_follow_the_weights() {
    let engine = heterogeneous_engine();
    let graph = engine.graph();
    assert_probabilities(
        engine.get_node_alias_table(node(graph, "g6")).unwrap(),
        &[1.0],
    );
    assert_probabilities(
        engine.get_node_alias_table(node(graph, "g4")).unwrap(),
        &[10.0 / 19.0, 9.0 / 19.0],
    );
}

#[test]
/// Consecutive nodes of a walk must always be connected.
fn test_walks_follow_the_edges() {
    for engine in &[homogeneous_engine(), heterogeneous_engine()] {
        let graph = engine.graph();
        for start in graph.iter_node_ids() {
            let walk = engine.walk(start, 80, 42).unwrap();
            // The fixture has no traps, so the walks are full length.
            assert_eq!(80, walk.len());
            assert_eq!(start, walk[0]);
            for pair in walk.windows(2) {
                assert!(
                    graph.has_edge(pair[0], pair[1]),
                    "the walk traversed the missing edge ({}, {})",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn test_walks_are_deterministic() {
    let engine = homogeneous_engine();
    let graph = engine.graph();
    let g2 = node(graph, "g2");
    assert_eq!(
        engine.walk(g2, 64, 42).unwrap(),
        engine.walk(g2, 64, 42).unwrap()
    );
    assert_ne!(
        engine.walk(g2, 64, 42).unwrap(),
        engine.walk(g2, 64, 43).unwrap()
    );
}

#[test]
fn test_second_order_weights_change_the_walks() {
    let mut returning_engine = WalkEngine::new(load_het_graph());
    returning_engine
        .preprocess(
            WalkWeights::default()
                .set_return_param(Some(0.25))
                .unwrap()
                .set_explore_param(Some(4.0))
                .unwrap(),
            WalkMode::Homogeneous,
        )
        .unwrap();
    let baseline_engine = homogeneous_engine();
    let g2 = node(baseline_engine.graph(), "g2");
    assert_ne!(
        baseline_engine.walk(g2, 64, 42).unwrap(),
        returning_engine.walk(g2, 64, 42).unwrap()
    );
}

#[test]
fn test_traps_shorten_the_walks() {
    // Node 2 has no edge at all and node 1 only leads back to node 0.
    let graph =
        Graph::from_integer_edges(3, vec![0], vec![1], None, None, None, None).unwrap();
    assert!(graph.has_traps());
    assert!(graph.is_node_trap(2));
    let mut engine = WalkEngine::new(graph);
    engine
        .preprocess(WalkWeights::default(), WalkMode::Homogeneous)
        .unwrap();
    assert_eq!(vec![2], engine.walk(2, 10, 7).unwrap());
    // Walking between the two connected nodes never stops early.
    assert_eq!(10, engine.walk(0, 10, 7).unwrap().len());
    let walks = engine.simulate_walks(2, 10, 7, false).unwrap();
    assert_eq!(6, walks.len());
    for walk in walks {
        match walk[0] {
            2 => assert_eq!(1, walk.len()),
            _ => assert_eq!(10, walk.len()),
        }
    }
}

#[test]
fn test_walks_before_preprocessing_fail() {
    let engine = WalkEngine::new(load_het_graph());
    assert!(!engine.is_preprocessed());
    assert!(engine.walk(0, 10, 42).is_err());
    assert!(engine.get_node_alias_table(0).is_err());
    assert!(engine.get_edge_alias_table(0, 1).is_err());
    let mut engine = engine;
    assert!(engine.simulate_walks(1, 10, 42, false).is_err());
}

#[test]
fn test_preprocessing_is_single_shot() {
    let mut engine = homogeneous_engine();
    assert!(engine
        .preprocess(WalkWeights::default(), WalkMode::Homogeneous)
        .is_err());
}

#[test]
fn test_heterogeneous_mode_requires_edge_types() {
    let graph =
        Graph::from_integer_edges(2, vec![0], vec![1], None, None, None, None).unwrap();
    let mut engine = WalkEngine::new(graph);
    assert!(engine
        .preprocess(WalkWeights::default(), WalkMode::HeterogeneousByEdgeType)
        .is_err());
}

#[test]
/// A jump parameter granting more than the whole probability mass to
/// the other edge types leaves a negative mass to the traversed one,
/// which must abort the preprocessing and leave the engine unusable.
fn test_degenerate_jump_parameter_fails() {
    let mut engine = WalkEngine::new(load_het_graph());
    let outcome = engine.preprocess(
        WalkWeights::default().set_jump_param(Some(100.0)).unwrap(),
        WalkMode::HeterogeneousByEdgeType,
    );
    assert!(outcome.is_err());
    assert!(!engine.is_preprocessed());
    assert!(engine.walk(0, 10, 42).is_err());
}

#[test]
fn test_simulate_walks_shape_and_determinism() {
    let mut engine = homogeneous_engine();
    let nodes_number = engine.graph().get_nodes_number() as usize;
    let walks = engine.simulate_walks(4, 10, 42, false).unwrap();
    assert_eq!(4 * nodes_number, walks.len());
    assert!(walks.iter().all(|walk| walk.len() == 10));
    // Every iteration starts exactly once from every node.
    for iteration in 0..4 {
        let mut starts: Vec<NodeT> = walks[iteration * nodes_number..(iteration + 1) * nodes_number]
            .iter()
            .map(|walk| walk[0])
            .collect();
        starts.sort_unstable();
        assert_eq!(
            engine.graph().iter_node_ids().collect::<Vec<NodeT>>(),
            starts
        );
    }
    let mut twin_engine = homogeneous_engine();
    assert_eq!(walks, twin_engine.simulate_walks(4, 10, 42, false).unwrap());
    assert_ne!(walks, twin_engine.simulate_walks(4, 10, 43, false).unwrap());
}

#[test]
/// The memoization is keyed by (number of walks, walk length) alone:
/// a cached corpus is returned as-is for those parameters.
fn test_simulate_walks_cache() {
    let mut engine = homogeneous_engine();
    let first = engine.simulate_walks(2, 10, 42, true).unwrap();
    assert_eq!(first, engine.simulate_walks(2, 10, 42, true).unwrap());
    assert_eq!(first, engine.simulate_walks(2, 10, 1337, true).unwrap());
    // Without the cache a different seed produces a different corpus.
    assert_ne!(first, engine.simulate_walks(2, 10, 1337, false).unwrap());
    // Different parameters are computed anew.
    let longer = engine.simulate_walks(2, 20, 42, true).unwrap();
    assert!(longer.iter().all(|walk| walk.len() == 20));
}

#[test]
fn test_invalid_walk_arguments_fail() {
    let mut engine = homogeneous_engine();
    assert!(engine.walk(0, 0, 42).is_err());
    assert!(engine.walk(100, 10, 42).is_err());
    assert!(engine.simulate_walks(0, 10, 42, false).is_err());
    assert!(engine.simulate_walks(1, 0, 42, false).is_err());
}
