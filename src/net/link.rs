//! 链路安装
//!
//! 按排序后的边列表逐条安装点对点链路：每个节点的接口从 1 开始按安装顺序编号
//! （0 保留给 loopback），每条链路独占一个 /24 子网，第一端 `.1`，第二端 `.2`。

use std::net::Ipv4Addr;

use tracing::{debug, info};

use super::error::NetError;
use super::id::{IfIndex, LinkId, NodeId};
use crate::topo::Topology;

/// 第一条链路所在的子网
pub const BASE_NETWORK: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 0);

/// 一条已安装的点对点链路
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub a: NodeId,
    pub b: NodeId,
    pub if_a: IfIndex,
    pub if_b: IfIndex,
    pub addr_a: Ipv4Addr,
    pub addr_b: Ipv4Addr,
}

impl Link {
    /// `node` 在本链路上的另一端
    pub fn peer(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// 全部链路（下标与拓扑的边列表一一对应）
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: Vec<Link>,
}

impl LinkTable {
    #[tracing::instrument(skip(topo), fields(edges = topo.num_undirected_edges()))]
    pub fn install(topo: &Topology) -> Result<Self, NetError> {
        let base = u32::from(BASE_NETWORK);
        let mut next_if = vec![0u32; topo.num_nodes()];
        let mut links = Vec::with_capacity(topo.num_undirected_edges());

        for (i, &(a, b)) in topo.edges().iter().enumerate() {
            let network = u32::try_from(i)
                .ok()
                .and_then(|i| i.checked_mul(256))
                .and_then(|off| base.checked_add(off))
                .filter(|net| net.checked_add(2).is_some())
                .ok_or(NetError::AddressSpaceExhausted { links: i })?;

            next_if[a.0] += 1;
            next_if[b.0] += 1;
            let link = Link {
                id: LinkId(i),
                a,
                b,
                if_a: IfIndex(next_if[a.0]),
                if_b: IfIndex(next_if[b.0]),
                addr_a: Ipv4Addr::from(network + 1),
                addr_b: Ipv4Addr::from(network + 2),
            };
            debug!(
                link = i,
                a = %a,
                b = %b,
                if_a = link.if_a.0,
                if_b = link.if_b.0,
                addr_a = %link.addr_a,
                addr_b = %link.addr_b,
                "安装链路"
            );
            links.push(link);
        }

        info!(links = links.len(), "🔗 链路安装完成");
        Ok(Self { links })
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 每条链路两端的接口编号，顺序与边列表一致
    pub fn interface_pairs(&self) -> Vec<(IfIndex, IfIndex)> {
        self.links.iter().map(|l| (l.if_a, l.if_b)).collect()
    }
}
