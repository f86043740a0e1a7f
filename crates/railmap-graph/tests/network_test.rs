use railmap_graph::{Error, MissingReverse, Network, PlatformRecord, ServiceKind, StationRecord};

fn two_way(net: &mut Network, a: &str, b: &str) {
    net.insert_platform(a, format!("{a}-{b}"), PlatformRecord::new(b))
        .unwrap();
    net.insert_platform(b, format!("{b}-{a}"), PlatformRecord::new(a))
        .unwrap();
}

#[test]
fn network_parses_loader_json_in_order() {
    let net = Network::from_json_str(
        r#"{
            "ZZZ": { "name": "Zed", "cx": 100.0, "cz": -200.0,
                     "platforms": { "1": { "to": "AAA", "type": "Y", "service": "Local" } } },
            "AAA": { "platforms": { "2": { "to": "ZZZ" } } }
        }"#,
    )
    .unwrap();

    assert_eq!(net.shortcodes().collect::<Vec<_>>(), vec!["ZZZ", "AAA"]);
    let zzz = net.station("ZZZ").unwrap();
    assert_eq!(zzz.name.as_deref(), Some("Zed"));
    assert_eq!(zzz.platforms["1"].kind, ServiceKind::Y);
    assert_eq!(zzz.platforms["1"].service.as_deref(), Some("Local"));
    assert_eq!(net.station("AAA").unwrap().platforms["2"].kind, ServiceKind::X);
}

#[test]
fn unknown_service_kinds_are_preserved() {
    let net = Network::from_json_str(r#"{"A": {"platforms": {"p": {"to": "A", "kind": "Q"}}}}"#)
        .unwrap();
    let kind = &net.station("A").unwrap().platforms["p"].kind;
    assert_eq!(kind, &ServiceKind::Other("Q".to_string()));
    assert_eq!(kind.as_str(), "Q");
}

#[test]
fn malformed_json_is_an_error() {
    let err = Network::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn fixed_coordinate_treats_origin_and_blanks_as_missing() {
    let mut net = Network::new();
    net.insert_station("A", StationRecord::anchored(300.0, 0.0));
    net.insert_station("B", StationRecord::anchored(0.0, 0.0));
    net.insert_station(
        "C",
        StationRecord {
            cz: Some(-50.0),
            ..Default::default()
        },
    );
    net.insert_station("D", StationRecord::default());

    assert_eq!(net.fixed_coordinate("A"), Some((300.0, 0.0)));
    assert_eq!(net.fixed_coordinate("B"), None);
    assert_eq!(net.fixed_coordinate("C"), Some((0.0, -50.0)));
    assert_eq!(net.fixed_coordinate("D"), None);
    assert_eq!(net.fixed_coordinate("missing"), None);
}

#[test]
fn insert_platform_requires_a_known_source() {
    let mut net = Network::new();
    let err = net
        .insert_platform("nowhere", "1", PlatformRecord::new("A"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownStation { shortcode } if shortcode == "nowhere"));
}

#[test]
fn validate_reports_dangling_platforms() {
    let mut net = Network::new();
    net.insert_station("A", StationRecord::default());
    net.insert_platform("A", "1", PlatformRecord::new("GHOST"))
        .unwrap();

    match net.validate() {
        Err(Error::DanglingPlatform { from, platform, to }) => {
            assert_eq!((from.as_str(), platform.as_str(), to.as_str()), ("A", "1", "GHOST"));
        }
        other => panic!("expected a dangling platform, got {other:?}"),
    }
}

#[test]
fn missing_reverse_connections_are_listed() {
    let mut net = Network::new();
    for id in ["A", "B", "C"] {
        net.insert_station(id, StationRecord::default());
    }
    two_way(&mut net, "A", "B");
    net.insert_platform("B", "to-c", PlatformRecord::new("C"))
        .unwrap();

    assert_eq!(
        net.missing_reverse_connections(),
        vec![MissingReverse {
            from: "B".to_string(),
            platform: "to-c".to_string(),
            to: "C".to_string(),
        }]
    );
    assert!(net.validate().is_ok());
}

#[test]
fn prune_platformless_drops_isolated_records() {
    let mut net = Network::new();
    for id in ["A", "B", "LONELY"] {
        net.insert_station(id, StationRecord::default());
    }
    two_way(&mut net, "A", "B");

    assert_eq!(net.prune_platformless(), vec!["LONELY".to_string()]);
    assert_eq!(net.len(), 2);
    assert!(!net.contains("LONELY"));
}
