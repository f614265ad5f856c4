use xn2v_graph::*;

/// Load the six genes fixture with its node type file.
fn load_small_graph() -> Graph {
    let edge_reader = EdgeFileReader::new("tests/data/small_graph_edges.tsv")
        .unwrap()
        .set_sources_column(Some("subject"))
        .unwrap()
        .set_destinations_column(Some("object"))
        .unwrap()
        .set_weights_column(Some("weight"))
        .unwrap()
        .set_edge_types_column(Some("edge_label"))
        .unwrap();
    let node_reader = NodeFileReader::new("tests/data/small_graph_nodes.tsv")
        .unwrap()
        .set_nodes_column(Some("id"))
        .unwrap()
        .set_node_types_column(Some("category"))
        .unwrap();
    Graph::from_csv(edge_reader, Some(node_reader), Some("small graph".to_string())).unwrap()
}

fn node(graph: &Graph, name: &str) -> NodeT {
    graph.get_node_id(name).unwrap()
}

#[test]
fn test_counts() {
    let graph = load_small_graph();
    // The fixture has 9 undirected edges, stored as 18 half-edges.
    assert_eq!(6, graph.get_nodes_number());
    assert_eq!(18, graph.get_edges_number());
}

#[test]
fn test_neighbours_are_sorted() {
    let graph = load_small_graph();
    for node in graph.iter_node_ids() {
        let neighbours = graph.get_node_neighbours(node);
        assert!(
            neighbours.windows(2).all(|pair| pair[0] < pair[1]),
            "the neighbours {:?} of node {} are not strictly increasing",
            neighbours,
            node
        );
    }
}

#[test]
fn test_neighbours_and_degrees() {
    let graph = load_small_graph();
    let expected_g2: Vec<NodeT> = ["g1", "g3", "g4", "g5", "g6"]
        .iter()
        .map(|name| node(&graph, name))
        .collect();
    assert_eq!(expected_g2, graph.get_node_neighbours(node(&graph, "g2")));
    let expected_g4: Vec<NodeT> = ["g1", "g2"]
        .iter()
        .map(|name| node(&graph, name))
        .collect();
    assert_eq!(expected_g4, graph.get_node_neighbours(node(&graph, "g4")));
    assert_eq!(4, graph.degree(node(&graph, "g1")));
    assert_eq!(5, graph.degree(node(&graph, "g2")));
    assert_eq!(2, graph.degree(node(&graph, "g4")));
}

#[test]
fn test_weights() {
    let graph = load_small_graph();
    let (g1, g2) = (node(&graph, "g1"), node(&graph, "g2"));
    let (g3, g5) = (node(&graph, "g3"), node(&graph, "g5"));
    assert_eq!(10.0, graph.get_weight(g1, g2).unwrap());
    assert_eq!(15.0, graph.get_weight(g3, g5).unwrap());
    // Both half-edges of an undirected edge carry the same weight.
    assert_eq!(10.0, graph.get_weight(g2, g1).unwrap());
    assert_eq!(15.0, graph.get_weight(g5, g3).unwrap());
    assert!(graph.get_weight(node(&graph, "g4"), node(&graph, "g6")).is_err());
}

#[test]
fn test_edge_types() {
    let graph = load_small_graph();
    let (g1, g2) = (node(&graph, "g1"), node(&graph, "g2"));
    let (g3, g5, g6) = (node(&graph, "g3"), node(&graph, "g5"), node(&graph, "g6"));
    assert_eq!("interacts", graph.get_edge_type_name(g1, g3).unwrap());
    assert_eq!("coexpressed", graph.get_edge_type_name(g1, g5).unwrap());
    assert_eq!("coexpressed", graph.get_edge_type_name(g2, g6).unwrap());
    assert_eq!(
        graph.get_edge_type(g1, g3).unwrap(),
        graph.get_edge_type(g3, g1).unwrap()
    );
}

#[test]
fn test_edge_type_counts() {
    let graph = load_small_graph();
    // Three undirected edges per tag, hence six half-edges each.
    let counts = graph.get_edge_type_counts().unwrap();
    assert_eq!(3, counts.len());
    assert!(counts.values().all(|count| *count == 6));
}

#[test]
fn test_node_types() {
    let graph = load_small_graph();
    assert!(graph.has_node_types());
    let gene = graph.get_node_type_id(node(&graph, "g1")).unwrap();
    let protein = graph.get_node_type_id(node(&graph, "g4")).unwrap();
    assert_ne!(gene, protein);
    assert_eq!(gene, graph.get_node_type_id(node(&graph, "g3")).unwrap());
    let counts = graph.get_node_type_counts().unwrap();
    assert_eq!(Some(&3), counts.get(&gene));
    assert_eq!(Some(&3), counts.get(&protein));
}

#[test]
fn test_out_edges_are_contiguous() {
    let graph = load_small_graph();
    let mut total = 0;
    for node_id in graph.iter_node_ids() {
        let out_edges: Vec<EdgeT> = graph.iter_node_out_edges(node_id).collect();
        assert_eq!(graph.degree(node_id) as usize, out_edges.len());
        for (edge, neighbour) in out_edges.iter().zip(graph.get_node_neighbours(node_id)) {
            assert_eq!(*edge, graph.get_edge_id(node_id, *neighbour).unwrap());
        }
        total += out_edges.len();
    }
    assert_eq!(graph.get_edges_number() as usize, total);
}

#[test]
/// Every half-edge must have its opposite with matching weight and type.
fn test_half_edge_symmetry() {
    let graph = load_small_graph();
    for (_, src, dst) in graph.iter_edges() {
        assert!(graph.has_edge(dst, src));
        assert_eq!(
            graph.get_weight(src, dst).unwrap(),
            graph.get_weight(dst, src).unwrap()
        );
        assert_eq!(
            graph.get_edge_type(src, dst).unwrap(),
            graph.get_edge_type(dst, src).unwrap()
        );
    }
}

#[test]
fn test_label_round_trip() {
    let graph = load_small_graph();
    for node_id in graph.iter_node_ids() {
        let name = graph.get_node_name(node_id).unwrap();
        assert_eq!(node_id, graph.get_node_id(&name).unwrap());
    }
}

#[test]
fn test_failing_lookups() {
    let graph = load_small_graph();
    assert!(graph.get_node_id("g9").is_err());
    assert!(graph.get_node_name(100).is_err());
    assert!(!graph.has_edge(node(&graph, "g1"), node(&graph, "g6")));
    assert!(graph
        .get_edge_id(node(&graph, "g1"), node(&graph, "g6"))
        .is_err());
    assert!(graph.get_edge_id(0, 100).is_err());
}

#[test]
fn test_no_traps_in_fixture() {
    let graph = load_small_graph();
    assert!(!graph.has_traps());
    assert!(graph.iter_node_ids().all(|node| !graph.is_node_trap(node)));
}

#[test]
fn test_display() {
    let graph = load_small_graph();
    let report = graph.to_string();
    assert!(report.contains("small graph"));
    assert!(report.contains('6'));
    assert!(report.contains("18"));
}
