//! 路由错误类型

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::net::NetError;

/// 路由构建或决策中的致命错误。
///
/// 无路由（`Outcome::NoRoute`）不是错误；这里的每个变体都意味着预计算的表
/// 或输入本身有问题，调用方应中止运行而不是猜测一条路由。
#[derive(Debug, Error)]
pub enum ArbiterError {
    #[error("node {node} is out of node id range [0, {num_nodes})")]
    NodeOutOfRange { node: usize, num_nodes: usize },

    #[error("the selected next node {neighbor} is not a neighbor of node {node} (destination {destination})")]
    NotANeighbor {
        node: usize,
        neighbor: usize,
        destination: usize,
    },

    #[error("IP address {0} is not mapped to a node id")]
    UnknownAddress(Ipv4Addr),

    #[error("routing loop from {source_node} to {destination}: exceeded {hops} hops")]
    RoutingLoop {
        source_node: usize,
        destination: usize,
        hops: usize,
    },

    #[error("cannot handle {num_nodes} nodes (limit is {max_nodes})")]
    TooManyNodes { num_nodes: usize, max_nodes: usize },

    #[error(transparent)]
    Net(#[from] NetError),
}
