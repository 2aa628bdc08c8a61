//! 路由仲裁器（转发决策入口）
//!
//! 每次转发时：查候选表 -> 五元组哈希 -> `candidates[hash % len]` -> 查出接口。
//! 决策是纯函数，只读取构建阶段产生的不可变状态，因此 `EcmpArbiter` 可以在
//! 多个线程之间无锁共享。

use std::fmt::Write as _;
use std::net::Ipv4Addr;

use tracing::{debug, error, info, trace};

use super::candidates::CandidateTable;
use super::error::ArbiterError;
use super::hash::FlowHasher;
use crate::config::RoutingConfig;
use crate::net::{
    AddressPlan, FlowFields, IfIndex, InterfaceIndex, LinkTable, NodeId, SOURCE_ADDRESS_REQUEST,
};
use crate::topo::Topology;

/// 选中的出口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Egress {
    pub neighbor: NodeId,
    pub if_index: IfIndex,
    /// 邻居在共享链路上的地址
    pub gateway: Ipv4Addr,
}

/// 一次决策的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Forward(Egress),
    /// 当前节点不可达目的地：调用方应丢包或让发起操作失败
    NoRoute,
    /// 当前节点就是目的地
    LocalDelivery,
}

impl Outcome {
    pub fn egress(&self) -> Option<&Egress> {
        match self {
            Outcome::Forward(e) => Some(e),
            _ => None,
        }
    }
}

/// 转发决策
pub trait Arbiter {
    /// 决定 `current` 上一个发往 `destination` 的包从哪个接口出去。
    fn decide(
        &self,
        current: NodeId,
        source: NodeId,
        destination: NodeId,
        fields: &FlowFields,
    ) -> Result<Outcome, ArbiterError>;
}

/// 基于五元组哈希的 ECMP 仲裁器
#[derive(Debug, Clone)]
pub struct EcmpArbiter {
    num_nodes: usize,
    candidates: CandidateTable,
    interfaces: InterfaceIndex,
    addresses: AddressPlan,
    hasher: FlowHasher,
}

impl EcmpArbiter {
    /// 安装链路并构建全部转发状态
    pub fn new(topo: &Topology, cfg: &RoutingConfig) -> Result<Self, ArbiterError> {
        let links = LinkTable::install(topo)?;
        Self::with_links(topo, &links, cfg)
    }

    /// 使用已安装的链路构建转发状态
    #[tracing::instrument(skip(topo, links, cfg), fields(num_nodes = topo.num_nodes(), hash_seed = cfg.hash_seed))]
    pub fn with_links(
        topo: &Topology,
        links: &LinkTable,
        cfg: &RoutingConfig,
    ) -> Result<Self, ArbiterError> {
        let candidates = CandidateTable::from_topology(topo, cfg)?;
        let interfaces = InterfaceIndex::new(topo, &links.interface_pairs())?;
        let addresses = AddressPlan::new(links);
        info!(
            interfaces = interfaces.len(),
            addresses = addresses.len(),
            "✅ ECMP 仲裁器就绪"
        );
        Ok(Self {
            num_nodes: topo.num_nodes(),
            candidates,
            interfaces,
            addresses,
            hasher: FlowHasher::new(cfg.hash_seed),
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn candidates(&self) -> &CandidateTable {
        &self.candidates
    }

    pub fn interfaces(&self) -> &InterfaceIndex {
        &self.interfaces
    }

    pub fn addresses(&self) -> &AddressPlan {
        &self.addresses
    }

    pub fn hasher(&self) -> &FlowHasher {
        &self.hasher
    }

    fn check_node(&self, node: NodeId) -> Result<(), ArbiterError> {
        if node.0 >= self.num_nodes {
            error!(node = node.0, num_nodes = self.num_nodes, "节点编号越界");
            return Err(ArbiterError::NodeOutOfRange {
                node: node.0,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }

    fn resolve(&self, addr: Ipv4Addr) -> Result<NodeId, ArbiterError> {
        self.addresses.resolve(addr).ok_or_else(|| {
            error!(%addr, "地址无法映射到节点");
            ArbiterError::UnknownAddress(addr)
        })
    }

    /// 根据包头地址解析源/目的节点后再决策。
    ///
    /// 源地址为 `SOURCE_ADDRESS_REQUEST` 时表示 socket 还在询问源地址：
    /// 源节点即当前节点，且包里没有可读的传输层头，只按 3 元组哈希。
    pub fn decide_header(
        &self,
        current: NodeId,
        fields: &FlowFields,
    ) -> Result<Outcome, ArbiterError> {
        let (source, fields) = if fields.src_addr == SOURCE_ADDRESS_REQUEST {
            trace!(node = %current, "源地址请求，忽略端口");
            (current, fields.without_ports())
        } else {
            (self.resolve(fields.src_addr)?, *fields)
        };
        let destination = self.resolve(fields.dst_addr)?;
        self.decide(current, source, destination, &fields)
    }

    /// 从 `source` 出发逐跳应用 `decide`，返回经过的节点序列。
    ///
    /// 某一跳无路由时返回 `None`。
    pub fn route_path(
        &self,
        source: NodeId,
        destination: NodeId,
        fields: &FlowFields,
    ) -> Result<Option<Vec<NodeId>>, ArbiterError> {
        let mut path = vec![source];
        let mut current = source;
        loop {
            match self.decide(current, source, destination, fields)? {
                Outcome::LocalDelivery => return Ok(Some(path)),
                Outcome::NoRoute => return Ok(None),
                Outcome::Forward(egress) => {
                    path.push(egress.neighbor);
                    current = egress.neighbor;
                    if path.len() > self.num_nodes {
                        error!(path = ?path, "路由成环");
                        return Err(ArbiterError::RoutingLoop {
                            source_node: source.0,
                            destination: destination.0,
                            hops: path.len() - 1,
                        });
                    }
                }
            }
        }
    }

    /// 渲染节点的 ECMP 转发状态
    pub fn forwarding_state(&self, node: NodeId) -> String {
        let mut res = String::new();
        let _ = writeln!(res, "ECMP state of node {}", node.0);
        for dst in 0..self.num_nodes {
            let hops = self
                .candidates
                .get(node, NodeId(dst))
                .iter()
                .map(|n| n.0.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(res, "  -> {}: {{{}}}", dst, hops);
        }
        res
    }
}

impl Arbiter for EcmpArbiter {
    #[tracing::instrument(level = "debug", skip_all, fields(current = %current, dst = %destination))]
    fn decide(
        &self,
        current: NodeId,
        source: NodeId,
        destination: NodeId,
        fields: &FlowFields,
    ) -> Result<Outcome, ArbiterError> {
        self.check_node(current)?;
        self.check_node(source)?;
        self.check_node(destination)?;

        if current == destination {
            trace!("本地交付");
            return Ok(Outcome::LocalDelivery);
        }

        let cands = self.candidates.get(current, destination);
        if cands.is_empty() {
            debug!("❌ 无路由");
            return Ok(Outcome::NoRoute);
        }

        let hash = self.hasher.hash(current, fields);
        let neighbor = cands[hash as usize % cands.len()];
        trace!(hash, candidates = ?cands, neighbor = %neighbor, "ECMP 选择下一跳");

        let not_a_neighbor = || {
            error!(node = current.0, neighbor = neighbor.0, destination = destination.0, "选中的下一跳不是邻居");
            ArbiterError::NotANeighbor {
                node: current.0,
                neighbor: neighbor.0,
                destination: destination.0,
            }
        };
        let if_index = self.interfaces.get(current, neighbor).ok_or_else(not_a_neighbor)?;
        let gateway = self
            .addresses
            .gateway(current, neighbor)
            .ok_or_else(not_a_neighbor)?;

        debug!(neighbor = %neighbor, if_index = if_index.0, %gateway, "🚀 转发");
        Ok(Outcome::Forward(Egress {
            neighbor,
            if_index,
            gateway,
        }))
    }
}
