//! 地址规划
//!
//! 每个接口一个 IPv4 地址，一个节点因此有多个地址。这里维护地址 -> 节点的反查，
//! 以及 (node, neighbor) -> 邻居在共享链路上的地址（即网关）。

use std::collections::HashMap;
use std::net::Ipv4Addr;

use super::id::{IfIndex, NodeId};
use super::link::LinkTable;

/// socket 在建立连接前用来询问“应该用哪个源地址”的占位源地址
pub const SOURCE_ADDRESS_REQUEST: Ipv4Addr = Ipv4Addr::new(102, 102, 102, 102);

#[derive(Debug, Clone, Default)]
pub struct AddressPlan {
    owner: HashMap<Ipv4Addr, NodeId>,
    local: HashMap<(NodeId, IfIndex), Ipv4Addr>,
    gateway: HashMap<(NodeId, NodeId), Ipv4Addr>,
}

impl AddressPlan {
    pub fn new(links: &LinkTable) -> Self {
        let mut plan = Self::default();
        for link in links.links() {
            plan.owner.insert(link.addr_a, link.a);
            plan.owner.insert(link.addr_b, link.b);
            plan.local.insert((link.a, link.if_a), link.addr_a);
            plan.local.insert((link.b, link.if_b), link.addr_b);
            plan.gateway.insert((link.a, link.b), link.addr_b);
            plan.gateway.insert((link.b, link.a), link.addr_a);
        }
        plan
    }

    /// 地址所属节点；未分配的地址返回 `None`
    pub fn resolve(&self, addr: Ipv4Addr) -> Option<NodeId> {
        self.owner.get(&addr).copied()
    }

    /// 节点在某个接口上的地址
    pub fn address(&self, node: NodeId, if_index: IfIndex) -> Option<Ipv4Addr> {
        self.local.get(&(node, if_index)).copied()
    }

    /// 节点的首个接口地址，用作流的源/目的地址
    pub fn primary_address(&self, node: NodeId) -> Option<Ipv4Addr> {
        self.address(node, IfIndex(1))
    }

    /// 从 `node` 发往 `neighbor` 时的网关（邻居在共享链路上的地址）
    pub fn gateway(&self, node: NodeId, neighbor: NodeId) -> Option<Ipv4Addr> {
        self.gateway.get(&(node, neighbor)).copied()
    }

    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }
}
