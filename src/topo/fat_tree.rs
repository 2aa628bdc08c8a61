//! Fat-tree 拓扑生成
//!
//! 生成 k-ary fat-tree 的拓扑描述：core / aggregation / edge 三层交换机，
//! edge 交换机即 ToR，主机即服务器。

use super::topology::TopologySpec;
use crate::net::NodeId;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self { k: 4 }
    }
}

impl FatTreeOpts {
    /// 节点总数 `k^3/4 + 5k^2/4`（core + agg + edge + host）；溢出时为 `None`
    pub fn num_nodes(&self) -> Option<usize> {
        let half = self.k / 2;
        let core = half.checked_mul(half)?;
        let per_layer = self.k.checked_mul(half)?;
        let hosts = per_layer.checked_mul(half)?;
        core.checked_add(per_layer.checked_mul(2)?)?.checked_add(hosts)
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub k: usize,
    pub hosts: Vec<NodeId>,
    pub edge_switches: Vec<NodeId>,
    pub agg_switches: Vec<NodeId>,
    pub core_switches: Vec<NodeId>,
    pub spec: TopologySpec,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.k / 2
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + edge;
        self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + agg;
        self.agg_switches[idx]
    }

    pub fn core(&self, group: usize, index: usize) -> NodeId {
        let half = self.half();
        let idx = group * half + index;
        self.core_switches[idx]
    }
}

pub fn build_fat_tree(opts: &FatTreeOpts) -> FatTreeTopology {
    let k = opts.k;
    assert!(k >= 2 && k % 2 == 0, "fat-tree k must be even and >= 2");

    let half = k / 2;
    let mut next_id = 0usize;
    let mut alloc = || {
        let id = NodeId(next_id);
        next_id += 1;
        id
    };

    let mut core_switches = Vec::with_capacity(half * half);
    for _ in 0..half * half {
        core_switches.push(alloc());
    }

    let mut hosts = Vec::with_capacity(k * half * half);
    let mut edge_switches = Vec::with_capacity(k * half);
    let mut agg_switches = Vec::with_capacity(k * half);
    let mut pod_edges: Vec<Vec<NodeId>> = Vec::with_capacity(k);
    let mut pod_aggs: Vec<Vec<NodeId>> = Vec::with_capacity(k);
    let mut links: Vec<(usize, usize)> = Vec::new();

    for _pod in 0..k {
        let edges: Vec<NodeId> = (0..half).map(|_| alloc()).collect();
        let aggs: Vec<NodeId> = (0..half).map(|_| alloc()).collect();

        for edge_id in &edges {
            for _ in 0..half {
                let host_id = alloc();
                links.push((host_id.0, edge_id.0));
                hosts.push(host_id);
            }
        }

        edge_switches.extend(edges.iter().copied());
        agg_switches.extend(aggs.iter().copied());
        pod_edges.push(edges);
        pod_aggs.push(aggs);
    }

    for pod in 0..k {
        for edge in 0..half {
            for agg in 0..half {
                links.push((pod_edges[pod][edge].0, pod_aggs[pod][agg].0));
            }
        }
    }

    for aggs in &pod_aggs {
        for (agg, agg_id) in aggs.iter().enumerate() {
            for index in 0..half {
                let core_id = core_switches[agg * half + index];
                links.push((agg_id.0, core_id.0));
            }
        }
    }

    let switches: Vec<usize> = core_switches
        .iter()
        .chain(&agg_switches)
        .chain(&edge_switches)
        .map(|n| n.0)
        .collect();

    let spec = TopologySpec {
        num_nodes: next_id,
        num_undirected_edges: links.len(),
        switches,
        switches_which_are_tors: edge_switches.iter().map(|n| n.0).collect(),
        servers: hosts.iter().map(|n| n.0).collect(),
        undirected_edges: links,
    };

    FatTreeTopology {
        k,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
        spec,
    }
}
