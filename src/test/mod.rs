mod config;
mod distance;
mod flow_hash;

use crate::topo::Topology;

/// 4 nodes, edges 0-1, 1-3, 0-2, 2-3; ToRs 0 and 3.
pub(crate) const RING4: &str = "\
num_nodes=4
num_undirected_edges=4
switches=set(0,1,2,3)
switches_which_are_tors=set(0,3)
servers=set()
undirected_edges=set(0-1,1-3,0-2,2-3)
";

/// 4 nodes, edges 0-1, 1-2, 2-3, 0-3; all ToRs.
pub(crate) const SQUARE4: &str = "\
num_nodes=4
num_undirected_edges=4
switches=set(0,1,2,3)
switches_which_are_tors=set(0,1,2,3)
servers=set()
undirected_edges=set(0-1,1-2,2-3,0-3)
";

pub(crate) const SINGLE_EDGE: &str = "\
num_nodes=2
num_undirected_edges=1
switches=set(0,1)
switches_which_are_tors=set(0,1)
servers=set()
undirected_edges=set(1-0)
";

pub(crate) fn topo(text: &str) -> Topology {
    Topology::from_properties_str(text).expect("valid topology")
}
