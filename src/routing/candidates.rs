//! 等价多路径（ECMP）候选下一跳表
//!
//! 对每条边 a-b 和每个目的 t：若 dist(b, t) == dist(a, t) - 1，则 a -> b 一定位于
//! 某条 a 到 t 的最短路上，b 即成为 (a, t) 的候选；反方向同理。
//! 候选顺序即排序后的边列表的扫描顺序。

use tracing::{debug, info};

use super::distance::{DistanceMatrix, UNREACHABLE};
use super::error::ArbiterError;
use crate::config::RoutingConfig;
use crate::net::NodeId;
use crate::topo::Topology;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTable {
    n: usize,
    /// (current, destination) -> 候选下一跳，按 current * n + destination 展开
    lists: Vec<Vec<NodeId>>,
}

impl CandidateTable {
    /// 由拓扑直接构建（内部计算距离矩阵，构建完成后即丢弃）
    pub fn from_topology(topo: &Topology, cfg: &RoutingConfig) -> Result<Self, ArbiterError> {
        let dist = DistanceMatrix::compute(topo, cfg)?;
        Ok(Self::build(topo, &dist))
    }

    #[tracing::instrument(skip(topo, dist), fields(num_nodes = topo.num_nodes(), edges = topo.num_undirected_edges()))]
    pub fn build(topo: &Topology, dist: &DistanceMatrix) -> Self {
        let n = topo.num_nodes();
        debug_assert_eq!(dist.num_nodes(), n);

        let mut lists = vec![Vec::new(); n * n];
        for &(a, b) in topo.edges() {
            for t in 0..n {
                let d_a = dist.get(a.0, t);
                let d_b = dist.get(b.0, t);
                if d_a == UNREACHABLE || d_b == UNREACHABLE {
                    continue;
                }
                if d_a.checked_sub(1) == Some(d_b) {
                    lists[a.0 * n + t].push(b);
                }
                if d_b.checked_sub(1) == Some(d_a) {
                    lists[b.0 * n + t].push(a);
                }
            }
        }

        let table = Self { n, lists };
        debug!(
            multipath_pairs = table.multipath_pairs(),
            "统计多候选 (node, dst) 对"
        );
        info!(num_nodes = n, "🧭 ECMP 候选表构建完成");
        table
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// (current, destination) 的候选下一跳；越界或 current == destination 时为空
    pub fn get(&self, current: NodeId, destination: NodeId) -> &[NodeId] {
        if current.0 >= self.n || destination.0 >= self.n {
            return &[];
        }
        &self.lists[current.0 * self.n + destination.0]
    }

    /// 候选数大于 1 的 (node, dst) 对数量
    pub fn multipath_pairs(&self) -> usize {
        self.lists.iter().filter(|l| l.len() > 1).count()
    }
}
