use spannet_core::{NodeId, Point, RngHandle, SpanError};
use spannet_graph::{is_connected, path_graph, GeoGraph};
use spannet_mcmc::moves::{
    addable_pairs, choose_move_kind, deletable_edges, proposal_density, propose_addition,
    propose_deletion, q_addition, q_deletion, MoveKind,
};

fn node(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
}

fn unit_square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ]
}

fn square_with_closing_edge() -> GeoGraph {
    let mut graph = path_graph(4, &unit_square()).unwrap();
    graph.add_edge(node(0), node(3)).unwrap();
    graph
}

#[test]
fn q_addition_counts_open_pairs() {
    let graph = path_graph(3, &line(3)).unwrap();
    assert_eq!(addable_pairs(&graph).len(), 1);
    assert_eq!(q_addition(&graph).unwrap(), 1.0);
}

#[test]
fn q_deletion_on_a_triangle_is_a_third() {
    let mut graph = path_graph(3, &line(3)).unwrap();
    graph.add_edge(node(0), node(2)).unwrap();
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(deletable_edges(&graph).unwrap().len(), 3);
    assert_eq!(q_deletion(&graph).unwrap(), 1.0 / 3.0);
}

#[test]
fn q_deletion_is_undefined_on_a_spanning_tree() {
    let graph = path_graph(3, &line(3)).unwrap();
    let err = q_deletion(&graph).unwrap_err();
    assert!(matches!(err, SpanError::Numeric(_)));
    assert_eq!(err.info().code, "empty-deletion-space");
}

#[test]
fn q_addition_is_undefined_on_a_complete_graph() {
    let mut graph = path_graph(3, &line(3)).unwrap();
    graph.add_edge(node(0), node(2)).unwrap();
    let err = q_addition(&graph).unwrap_err();
    assert!(matches!(err, SpanError::Numeric(_)));
    assert_eq!(err.info().code, "empty-addition-space");
}

#[test]
fn addition_adds_exactly_one_new_edge() {
    let graph = square_with_closing_edge();
    let mut rng = RngHandle::from_seed(7);

    let first = propose_addition(&graph, &mut rng).unwrap();
    assert_eq!(first.kind, MoveKind::Addition);
    assert_eq!(first.candidate.edge_count(), graph.edge_count() + 1);
    let (u, v) = first.edge.endpoints();
    assert!(!graph.has_edge(u, v));
    assert!(first.candidate.has_edge(u, v));
    assert_eq!(first.forward_prob, 0.5);

    let second = propose_addition(&first.candidate, &mut rng).unwrap();
    assert_eq!(second.candidate.edge_count(), 6);
    assert_eq!(second.forward_prob, 1.0);
}

#[test]
fn deletion_keeps_the_graph_connected() {
    let graph = square_with_closing_edge();
    let mut rng = RngHandle::from_seed(11);

    let proposal = propose_deletion(&graph, &mut rng).unwrap();
    assert_eq!(proposal.kind, MoveKind::Deletion);
    assert_eq!(proposal.candidate.edge_count(), graph.edge_count() - 1);
    assert!(is_connected(&proposal.candidate).unwrap());
    assert_eq!(proposal.forward_prob, 0.25);
}

#[test]
fn proposal_never_mutates_the_current_state() {
    let graph = square_with_closing_edge();
    let edges_before: Vec<_> = graph.edges().collect();
    let mut rng = RngHandle::from_seed(13);

    let _ = propose_addition(&graph, &mut rng).unwrap();
    let _ = propose_deletion(&graph, &mut rng).unwrap();

    assert_eq!(graph.edges().collect::<Vec<_>>(), edges_before);
}

#[test]
fn move_kind_is_forced_at_the_boundaries() {
    let tree = path_graph(4, &unit_square()).unwrap();
    let mut complete = path_graph(3, &line(3)).unwrap();
    complete.add_edge(node(0), node(2)).unwrap();

    for seed in 0..16 {
        let mut rng = RngHandle::from_seed(seed);
        assert_eq!(choose_move_kind(&tree, &mut rng), MoveKind::Addition);
        let mut rng = RngHandle::from_seed(seed);
        assert_eq!(choose_move_kind(&complete, &mut rng), MoveKind::Deletion);
    }
}

#[test]
fn proposal_density_follows_the_move_direction() {
    let smaller = path_graph(4, &unit_square()).unwrap();
    let larger = square_with_closing_edge();

    assert_eq!(
        proposal_density(&larger, &smaller).unwrap(),
        q_deletion(&larger).unwrap()
    );
    assert_eq!(
        proposal_density(&smaller, &larger).unwrap(),
        q_addition(&smaller).unwrap()
    );
}

#[test]
fn reverse_probability_matches_the_inverse_move() {
    let graph = square_with_closing_edge();
    let mut rng = RngHandle::from_seed(17);

    let addition = propose_addition(&graph, &mut rng).unwrap();
    assert_eq!(
        addition.reverse_prob,
        q_deletion(&addition.candidate).unwrap()
    );

    let deletion = propose_deletion(&graph, &mut rng).unwrap();
    assert_eq!(
        deletion.reverse_prob,
        q_addition(&deletion.candidate).unwrap()
    );
}
