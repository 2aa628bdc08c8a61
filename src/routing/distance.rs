//! 全源最短路（跳数）
//!
//! Floyd-Warshall，所有边权为 1。只在构建阶段运行一次，转发路径上从不重算。

use tracing::{debug, info, warn};

use super::error::ArbiterError;
use crate::config::RoutingConfig;
use crate::topo::Topology;

/// 不可达的距离哨兵
pub const UNREACHABLE: u32 = u32::MAX;

/// n x n 距离矩阵（按行展开）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<u32>,
}

impl DistanceMatrix {
    /// 计算拓扑的跳数距离矩阵。节点数超过 `cfg.max_nodes` 时拒绝。
    #[tracing::instrument(skip(topo, cfg), fields(num_nodes = topo.num_nodes()))]
    pub fn compute(topo: &Topology, cfg: &RoutingConfig) -> Result<Self, ArbiterError> {
        let n = topo.num_nodes();
        if n > cfg.max_nodes {
            return Err(ArbiterError::TooManyNodes {
                num_nodes: n,
                max_nodes: cfg.max_nodes,
            });
        }
        if n > cfg.warn_nodes {
            warn!(
                num_nodes = n,
                warn_nodes = cfg.warn_nodes,
                "⚠️  节点数较多，O(n^3) 最短路计算可能很慢"
            );
        }

        let mut data = vec![UNREACHABLE; n * n];
        for i in 0..n {
            data[i * n + i] = 0;
        }
        for &(a, b) in topo.edges() {
            data[a.0 * n + b.0] = 1;
            data[b.0 * n + a.0] = 1;
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = data[i * n + k];
                if d_ik == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let d_kj = data[k * n + j];
                    if d_kj == UNREACHABLE {
                        continue;
                    }
                    let via_k = d_ik + d_kj;
                    if via_k < data[i * n + j] {
                        data[i * n + j] = via_k;
                    }
                }
            }
        }

        let matrix = Self { n, data };
        debug!(diameter = ?matrix.diameter(), "距离矩阵计算完成");
        info!(num_nodes = n, "📏 全源最短路计算完成");
        Ok(matrix)
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// `i` 到 `j` 的跳数；不可达为 `UNREACHABLE`
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.data[i * self.n + j]
    }

    pub fn is_reachable(&self, i: usize, j: usize) -> bool {
        self.get(i, j) != UNREACHABLE
    }

    /// 可达节点对之间的最大跳数；没有节点时为 `None`
    pub fn diameter(&self) -> Option<u32> {
        self.data.iter().copied().filter(|&d| d != UNREACHABLE).max()
    }
}
