//! 拓扑模型
//!
//! 经过校验的无向图：节点角色划分（交换机 / ToR 交换机 / 服务器）、
//! 排序后的边列表与邻接表。构造完成后不可变。

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use tracing::{debug, info};

use super::error::TopologyError;
use crate::net::NodeId;

/// 拓扑的原始描述（由加载器或生成器产生，尚未校验）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologySpec {
    pub num_nodes: usize,
    pub num_undirected_edges: usize,
    pub switches: Vec<usize>,
    pub switches_which_are_tors: Vec<usize>,
    pub servers: Vec<usize>,
    /// 无向边，端点顺序任意
    pub undirected_edges: Vec<(usize, usize)>,
}

/// 经过校验的拓扑
#[derive(Debug, Clone)]
pub struct Topology {
    num_nodes: usize,
    switches: BTreeSet<NodeId>,
    tors: BTreeSet<NodeId>,
    servers: BTreeSet<NodeId>,
    /// 排序后的边列表，每条边满足 a < b；其下标即链路安装顺序
    edges: Vec<(NodeId, NodeId)>,
    edge_set: HashSet<(NodeId, NodeId)>,
    /// 升序邻接表
    adjacency: Vec<Vec<NodeId>>,
}

fn collect_role(
    role: &'static str,
    ids: &[usize],
    num_nodes: usize,
) -> Result<BTreeSet<NodeId>, TopologyError> {
    let mut set = BTreeSet::new();
    for &node in ids {
        if node >= num_nodes {
            return Err(TopologyError::NodeOutOfRange {
                role,
                node,
                num_nodes,
            });
        }
        if !set.insert(NodeId(node)) {
            return Err(TopologyError::DuplicateNode { role, node });
        }
    }
    Ok(set)
}

impl Topology {
    /// 校验并构造拓扑
    #[tracing::instrument(skip(spec), fields(num_nodes = spec.num_nodes, num_edges = spec.num_undirected_edges))]
    pub fn new(spec: TopologySpec) -> Result<Self, TopologyError> {
        let n = spec.num_nodes;

        let switches = collect_role("switch", &spec.switches, n)?;
        let tors = collect_role("ToR", &spec.switches_which_are_tors, n)?;
        let servers = collect_role("server", &spec.servers, n)?;

        // 角色校验必须在按 n 分配邻接表之前完成
        if let Some(node) = servers.intersection(&switches).next() {
            return Err(TopologyError::RolesOverlap(node.0));
        }
        if let Some(node) = tors.difference(&switches).next() {
            return Err(TopologyError::TorNotSwitch(node.0));
        }
        let covered = switches.len() + servers.len();
        if covered != n {
            return Err(TopologyError::RolesIncomplete {
                covered,
                num_nodes: n,
            });
        }

        let mut edges = Vec::with_capacity(spec.undirected_edges.len());
        let mut edge_set = HashSet::with_capacity(spec.undirected_edges.len());
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in &spec.undirected_edges {
            if a == b {
                return Err(TopologyError::SelfLoop(a));
            }
            for node in [a, b] {
                if node >= n {
                    return Err(TopologyError::NodeOutOfRange {
                        role: "edge",
                        node,
                        num_nodes: n,
                    });
                }
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            if !edge_set.insert((NodeId(lo), NodeId(hi))) {
                return Err(TopologyError::DuplicateEdge(lo, hi));
            }
            edges.push((NodeId(lo), NodeId(hi)));
            adjacency[lo].push(NodeId(hi));
            adjacency[hi].push(NodeId(lo));
        }
        edges.sort();
        for nbrs in &mut adjacency {
            nbrs.sort();
        }

        if edges.len() != spec.num_undirected_edges {
            return Err(TopologyError::EdgeCountMismatch {
                declared: spec.num_undirected_edges,
                actual: edges.len(),
            });
        }

        for server in &servers {
            if let Some(neighbor) = adjacency[server.0].iter().find(|nb| !tors.contains(*nb)) {
                return Err(TopologyError::ServerToNonTor {
                    server: server.0,
                    neighbor: neighbor.0,
                });
            }
        }

        let topo = Self {
            num_nodes: n,
            switches,
            tors,
            servers,
            edges,
            edge_set,
            adjacency,
        };

        info!(
            nodes = topo.num_nodes,
            undirected_edges = topo.edges.len(),
            switches = topo.switches.len(),
            tors = topo.tors.len(),
            servers = topo.servers.len(),
            "🗺️  拓扑校验通过"
        );
        if topo.has_zero_servers() {
            debug!("没有服务器，ToR 被视为合法流端点");
        } else {
            debug!("只有服务器是合法流端点");
        }
        Ok(topo)
    }

    /// 从 properties 文本解析并校验
    pub fn from_properties_str(text: &str) -> Result<Self, TopologyError> {
        Self::new(TopologySpec::from_properties_str(text)?)
    }

    /// 从 properties 文件读取并校验
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_properties_str(&text)
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_undirected_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn switches(&self) -> &BTreeSet<NodeId> {
        &self.switches
    }

    pub fn switches_which_are_tors(&self) -> &BTreeSet<NodeId> {
        &self.tors
    }

    pub fn servers(&self) -> &BTreeSet<NodeId> {
        &self.servers
    }

    /// 排序后的边列表（a < b）
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// 两节点之间是否存在边（与端点顺序无关）
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edge_set.contains(&key)
    }

    /// 节点的邻居（升序）；越界节点返回空切片
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.num_nodes
    }

    pub fn is_switch(&self, node: NodeId) -> bool {
        self.switches.contains(&node)
    }

    pub fn is_tor(&self, node: NodeId) -> bool {
        self.tors.contains(&node)
    }

    pub fn is_server(&self, node: NodeId) -> bool {
        self.servers.contains(&node)
    }

    pub fn has_zero_servers(&self) -> bool {
        self.servers.is_empty()
    }

    /// 合法流端点：没有服务器时是 ToR，否则恰好是服务器。
    pub fn is_valid_endpoint(&self, node: NodeId) -> bool {
        self.endpoints().contains(&node)
    }

    pub fn endpoints(&self) -> &BTreeSet<NodeId> {
        if self.has_zero_servers() {
            &self.tors
        } else {
            &self.servers
        }
    }
}
