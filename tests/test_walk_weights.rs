use xn2v_graph::WalkWeights;

#[test]
fn test_invalid_weights_are_rejected() {
    assert!(WalkWeights::default().set_return_param(Some(0.0)).is_err());
    assert!(WalkWeights::default().set_return_param(Some(-1.0)).is_err());
    assert!(WalkWeights::default()
        .set_explore_param(Some(f64::NAN))
        .is_err());
    assert!(WalkWeights::default()
        .set_jump_param(Some(f64::INFINITY))
        .is_err());
    assert!(WalkWeights::default()
        .set_change_node_type_weight(Some(0.0))
        .is_err());
    assert!(WalkWeights::default()
        .set_change_edge_type_weight(Some(0.0))
        .is_err());
}

#[test]
fn test_default_weights_are_first_order() {
    assert!(WalkWeights::default().is_first_order());
    assert!(!WalkWeights::default()
        .set_explore_param(Some(2.0))
        .unwrap()
        .is_first_order());
}

#[test]
fn test_none_leaves_the_defaults() {
    let weights = WalkWeights::default()
        .set_return_param(None)
        .unwrap()
        .set_explore_param(None)
        .unwrap()
        .set_jump_param(None)
        .unwrap();
    assert_eq!(WalkWeights::default(), weights);
}
