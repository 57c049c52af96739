use proptest::prelude::*;
use rand::Rng;
use spannet_core::{NodeId, Point, RngHandle};
use spannet_graph::{
    canonical_hash, distance, is_bridge, is_connected, path_graph, EdgeSetKey, GeoGraph,
};

fn random_coordinates(rng: &mut RngHandle, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect()
}

fn random_connected_graph(seed: u64, nodes: usize, chords: usize) -> GeoGraph {
    let mut rng = RngHandle::from_seed(seed);
    let coords = random_coordinates(&mut rng, nodes);
    let mut graph = path_graph(nodes, &coords).unwrap();
    for _ in 0..chords {
        let u = NodeId::from_raw(rng.gen_range(0..nodes as u64));
        let v = NodeId::from_raw(rng.gen_range(0..nodes as u64));
        if u == v || graph.has_edge(u, v) {
            continue;
        }
        graph.add_edge(u, v).unwrap();
    }
    graph
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        ax in -100.0f64..100.0,
        ay in -100.0f64..100.0,
        bx in -100.0f64..100.0,
        by in -100.0f64..100.0,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        prop_assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn non_bridge_removal_preserves_connectivity(
        seed in any::<u64>(),
        nodes in 3usize..9,
        chords in 0usize..6,
    ) {
        let graph = random_connected_graph(seed, nodes, chords);
        prop_assert!(is_connected(&graph).unwrap());

        for edge in graph.edges().collect::<Vec<_>>() {
            let (u, v) = edge.endpoints();
            if !is_bridge(&graph, u, v).unwrap() {
                let mut trimmed = graph.clone();
                trimmed.remove_edge(u, v).unwrap();
                prop_assert!(is_connected(&trimmed).unwrap());
            }
        }
    }

    #[test]
    fn canonical_key_ignores_insertion_order(
        seed in any::<u64>(),
        nodes in 3usize..9,
        chords in 0usize..6,
    ) {
        let graph = random_connected_graph(seed, nodes, chords);
        let key = EdgeSetKey::from_graph(&graph);

        let coords: Vec<Point> = graph.nodes().map(|n| graph.point(n).unwrap()).collect();
        let mut rebuilt = GeoGraph::new();
        for point in &coords {
            rebuilt.add_node(*point);
        }
        for edge in key.edges().iter().rev() {
            let (u, v) = edge.endpoints();
            rebuilt.add_edge(u, v).unwrap();
        }

        prop_assert_eq!(EdgeSetKey::from_graph(&rebuilt), key);
        prop_assert_eq!(canonical_hash(&rebuilt), canonical_hash(&graph));
    }
}
