use super::{RING4, SINGLE_EDGE, topo};
use crate::config::RoutingConfig;
use crate::routing::{ArbiterError, DistanceMatrix, UNREACHABLE};

#[test]
fn ring_hop_counts() {
    let t = topo(RING4);
    let d = DistanceMatrix::compute(&t, &RoutingConfig::default()).unwrap();
    assert_eq!(d.num_nodes(), 4);
    for i in 0..4 {
        assert_eq!(d.get(i, i), 0);
        for j in 0..4 {
            assert_eq!(d.get(i, j), d.get(j, i), "asymmetric at ({i}, {j})");
        }
    }
    assert_eq!(d.get(0, 1), 1);
    assert_eq!(d.get(0, 2), 1);
    assert_eq!(d.get(0, 3), 2);
    assert_eq!(d.get(1, 2), 2);
    assert_eq!(d.get(1, 3), 1);
    assert_eq!(d.diameter(), Some(2));
}

#[test]
fn disconnected_pairs_are_unreachable() {
    // Two components: 0-1 and 2-3.
    let t = topo(
        "num_nodes=4\nnum_undirected_edges=2\nswitches=set(0,1,2,3)\nswitches_which_are_tors=set(0,1,2,3)\nservers=set()\nundirected_edges=set(0-1,2-3)\n",
    );
    let d = DistanceMatrix::compute(&t, &RoutingConfig::default()).unwrap();
    assert_eq!(d.get(0, 1), 1);
    assert_eq!(d.get(0, 2), UNREACHABLE);
    assert!(!d.is_reachable(1, 3));
    assert!(d.is_reachable(2, 3));
    assert_eq!(d.diameter(), Some(1));
}

#[test]
fn empty_topology_has_no_diameter() {
    let t = topo(
        "num_nodes=0\nnum_undirected_edges=0\nswitches=set()\nswitches_which_are_tors=set()\nservers=set()\nundirected_edges=set()\n",
    );
    let d = DistanceMatrix::compute(&t, &RoutingConfig::default()).unwrap();
    assert_eq!(d.num_nodes(), 0);
    assert_eq!(d.diameter(), None);
}

#[test]
fn node_limit_is_enforced() {
    let t = topo(RING4);
    let cfg = RoutingConfig {
        max_nodes: 3,
        warn_nodes: 2,
        ..RoutingConfig::default()
    };
    let err = DistanceMatrix::compute(&t, &cfg).unwrap_err();
    assert!(
        matches!(err, ArbiterError::TooManyNodes { num_nodes: 4, max_nodes: 3 }),
        "{err}"
    );

    // At the limit is fine; above the warning threshold only logs.
    let cfg = RoutingConfig {
        max_nodes: 2,
        warn_nodes: 1,
        ..RoutingConfig::default()
    };
    assert!(DistanceMatrix::compute(&topo(SINGLE_EDGE), &cfg).is_ok());
}
