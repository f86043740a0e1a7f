use railmap_graph::{
    Adjacency, GraphSnapshot, Network, PlatformRecord, ServiceKind, StationRecord,
};

fn network(ids: &[&str], connections: &[(&str, &str)]) -> Network {
    let mut net = Network::new();
    for id in ids {
        net.insert_station(*id, StationRecord::default());
    }
    for (n, (from, to)) in connections.iter().enumerate() {
        net.insert_platform(from, n.to_string(), PlatformRecord::new(*to))
            .unwrap();
    }
    net
}

#[test]
fn snapshot_keeps_network_order() {
    let net = network(&["C", "A", "B"], &[]);
    let g = GraphSnapshot::build(&net);

    assert_eq!(g.ids(), ["C", "A", "B"]);
    assert_eq!(g.index_of("A"), Some(1));
    assert_eq!(g.id(2), Some("B"));
    assert_eq!(g.index_of("Z"), None);
    assert_eq!(g.len(), 3);
}

#[test]
fn one_way_connections_still_count_as_adjacent_both_ways() {
    let net = network(&["A", "B", "C"], &[("A", "B")]);
    let g = GraphSnapshot::build(&net);

    assert!(g.adjacent(0, 1));
    assert!(g.adjacent(1, 0));
    assert!(g.directed(0, 1));
    assert!(!g.directed(1, 0));
    assert!(!g.adjacent(0, 2));
    assert!(!g.adjacent(2, 1));
}

#[test]
fn stations_without_connections_have_no_neighbors() {
    let net = network(&["A", "B", "LONE"], &[("A", "B"), ("B", "A")]);
    let g = GraphSnapshot::build(&net);

    assert!(g.neighbors(2).is_empty());
    assert_eq!(g.degree(2), 0);
    assert!((0..3).all(|j| !g.adjacent(2, j)));
}

#[test]
fn neighbors_are_sorted_and_deduplicated() {
    let net = network(
        &["A", "B", "C", "D"],
        &[("D", "A"), ("A", "D"), ("A", "B"), ("C", "A"), ("A", "B")],
    );
    let g = GraphSnapshot::build(&net);

    assert_eq!(g.neighbors(0), [1, 2, 3]);
    assert_eq!(g.neighbors(3), [0]);
}

#[test]
fn dangling_platforms_and_self_loops_are_ignored() {
    let net = network(&["A", "B"], &[("A", "GHOST"), ("A", "A"), ("A", "B")]);
    let g = GraphSnapshot::build(&net);

    assert!(!g.adjacent(0, 0));
    assert_eq!(g.neighbors(0), [1]);
    assert_eq!(g.links().len(), 1);
}

#[test]
fn links_are_deduplicated_and_carry_both_platforms() {
    let mut net = Network::new();
    for id in ["A", "B", "C"] {
        net.insert_station(id, StationRecord::default());
    }
    net.insert_platform(
        "A",
        "a1",
        PlatformRecord::new("B").with_kind(ServiceKind::A),
    )
    .unwrap();
    net.insert_platform("B", "b1", PlatformRecord::new("A"))
        .unwrap();
    net.insert_platform("C", "c1", PlatformRecord::new("B"))
        .unwrap();

    let g = GraphSnapshot::build(&net);
    let links = g.links();
    assert_eq!(links.len(), 2);

    assert_eq!((links[0].a, links[0].b), (0, 1));
    assert_eq!(links[0].a_platform, "a1");
    assert_eq!(links[0].b_platform, "b1");
    assert_eq!(links[0].kind, ServiceKind::A);

    assert_eq!((links[1].a, links[1].b), (2, 1));
    assert_eq!(links[1].a_platform, "c1");
    assert_eq!(links[1].b_platform, "?");
}
