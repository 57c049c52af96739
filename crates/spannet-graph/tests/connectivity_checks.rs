use spannet_core::{NodeId, Point, SpanError};
use spannet_graph::{is_bridge, is_connected, path_graph};

fn node(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
}

#[test]
fn path_graph_is_connected() {
    let graph = path_graph(3, &line(3)).unwrap();
    assert!(is_connected(&graph).unwrap());
}

#[test]
fn removing_an_edge_disconnects_a_path() {
    let mut graph = path_graph(3, &line(3)).unwrap();
    graph.remove_edge(node(0), node(1)).unwrap();
    assert!(!is_connected(&graph).unwrap());
}

#[test]
fn every_path_edge_is_a_bridge() {
    let graph = path_graph(3, &line(3)).unwrap();
    assert!(is_bridge(&graph, node(0), node(1)).unwrap());
    assert!(is_bridge(&graph, node(1), node(2)).unwrap());
}

#[test]
fn cycle_edges_are_not_bridges() {
    let mut graph = path_graph(3, &line(3)).unwrap();
    graph.add_edge(node(0), node(2)).unwrap();
    assert!(!is_bridge(&graph, node(0), node(1)).unwrap());
    assert!(!is_bridge(&graph, node(1), node(2)).unwrap());
    assert!(!is_bridge(&graph, node(0), node(2)).unwrap());
}

#[test]
fn bridge_check_leaves_the_graph_untouched() {
    let graph = path_graph(3, &line(3)).unwrap();
    let weight_before = graph.edge_weight(node(0), node(1)).unwrap();

    assert!(is_bridge(&graph, node(0), node(1)).unwrap());

    assert!(graph.has_edge(node(0), node(1)));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_weight(node(0), node(1)).unwrap(), weight_before);
}

#[test]
fn bridge_check_on_missing_edge_fails() {
    let graph = path_graph(3, &line(3)).unwrap();
    let err = is_bridge(&graph, node(0), node(2)).unwrap_err();
    assert!(matches!(err, SpanError::Graph(_)));
    assert_eq!(err.info().code, "missing-edge");
}
