use spannet_core::{NodeId, Point, SpanError};
use spannet_graph::{path_graph, GeoGraph};

fn node(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
}

#[test]
fn path_lengths_accumulate_edge_weights() {
    let graph = path_graph(4, &line(4)).unwrap();
    assert_eq!(graph.shortest_path_length(node(0), node(0)).unwrap(), 0.0);
    assert_eq!(graph.shortest_path_length(node(0), node(1)).unwrap(), 1.0);
    assert_eq!(graph.shortest_path_length(node(0), node(3)).unwrap(), 3.0);
}

#[test]
fn shortcut_edges_shorten_paths() {
    let coords = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    let mut graph = path_graph(4, &coords).unwrap();
    assert_eq!(graph.shortest_path_length(node(0), node(3)).unwrap(), 3.0);

    graph.add_edge(node(0), node(3)).unwrap();
    assert_eq!(graph.shortest_path_length(node(0), node(3)).unwrap(), 1.0);
    assert_eq!(graph.shortest_path_length(node(0), node(2)).unwrap(), 2.0);
}

#[test]
fn unreachable_targets_are_reported() {
    let mut graph = GeoGraph::new();
    let a = graph.add_node(Point::new(0.0, 0.0));
    let b = graph.add_node(Point::new(1.0, 0.0));

    assert!(!graph.has_path(a, b).unwrap());
    let err = graph.shortest_path_length(a, b).unwrap_err();
    assert!(matches!(err, SpanError::Graph(_)));
    assert_eq!(err.info().code, "no-path");
}

#[test]
fn unknown_nodes_are_rejected() {
    let graph = path_graph(3, &line(3)).unwrap();
    let err = graph.has_path(node(0), node(9)).unwrap_err();
    assert_eq!(err.info().code, "unknown-node");
}
