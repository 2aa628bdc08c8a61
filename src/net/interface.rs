//! 邻居 -> 出接口索引
//!
//! 由排序后的边列表和链路安装时分配的接口对构建，构建后不可变。

use std::collections::HashMap;

use super::error::NetError;
use super::id::{IfIndex, NodeId};
use crate::topo::Topology;

#[derive(Debug, Clone, Default)]
pub struct InterfaceIndex {
    /// (node, neighbor) -> node 上连向 neighbor 的接口
    egress: HashMap<(NodeId, NodeId), IfIndex>,
}

impl InterfaceIndex {
    /// `pairs[i]` 是第 i 条边两端（a 侧、b 侧）的接口编号。
    pub fn new(topo: &Topology, pairs: &[(IfIndex, IfIndex)]) -> Result<Self, NetError> {
        let edges = topo.edges();
        if edges.len() != pairs.len() {
            return Err(NetError::InterfaceCountMismatch {
                edges: edges.len(),
                pairs: pairs.len(),
            });
        }

        let mut egress = HashMap::with_capacity(edges.len() * 2);
        for (i, (&(a, b), &(if_a, if_b))) in edges.iter().zip(pairs).enumerate() {
            if if_a.is_loopback() || if_b.is_loopback() {
                return Err(NetError::LoopbackInterface {
                    link: i,
                    a: a.0,
                    b: b.0,
                });
            }
            egress.insert((a, b), if_a);
            egress.insert((b, a), if_b);
        }
        Ok(Self { egress })
    }

    /// 不相邻时返回 `None`
    pub fn get(&self, node: NodeId, neighbor: NodeId) -> Option<IfIndex> {
        self.egress.get(&(node, neighbor)).copied()
    }

    /// 与 `get` 相同，但以 loopback（0）作为“不是邻居”的哨兵
    pub fn get_or_sentinel(&self, node: NodeId, neighbor: NodeId) -> IfIndex {
        self.get(node, neighbor).unwrap_or(IfIndex::LOOPBACK)
    }

    pub fn len(&self) -> usize {
        self.egress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.egress.is_empty()
    }
}
