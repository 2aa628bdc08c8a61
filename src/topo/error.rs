//! 拓扑错误类型

use std::path::PathBuf;

use thiserror::Error;

/// 拓扑读取或校验失败。
///
/// 所有变体都在构造阶段产生，且都是致命的：拓扑不合法时整个运行不应启动。
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read topology file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("necessary parameter '{0}' is not set")]
    MissingParam(String),

    #[error("line {line} is not of the form key=value: {content:?}")]
    InvalidLine { line: usize, content: String },

    #[error("value {0:?} is not a non-negative integer")]
    InvalidInteger(String),

    #[error("set {0:?} is not encased in set(...)")]
    InvalidSet(String),

    #[error("set {0:?} contains duplicates")]
    DuplicateSetEntry(String),

    #[error("edge {0:?} is not of the form a-b")]
    InvalidEdge(String),

    #[error("{role} node {node} is out of node id range [0, {num_nodes})")]
    NodeOutOfRange {
        role: &'static str,
        node: usize,
        num_nodes: usize,
    },

    #[error("{role} set lists node {node} more than once")]
    DuplicateNode { role: &'static str, node: usize },

    #[error("cannot have edge to itself on node {0}")]
    SelfLoop(usize),

    #[error("duplicate edge {0}-{1}")]
    DuplicateEdge(usize, usize),

    #[error("indicated number of undirected edges ({declared}) does not match edge set ({actual})")]
    EdgeCountMismatch { declared: usize, actual: usize },

    #[error("node {0} is marked both as server and as switch")]
    RolesOverlap(usize),

    #[error("ToR {0} is not a switch")]
    TorNotSwitch(usize),

    #[error("servers and switches cover {covered} nodes, expected {num_nodes}")]
    RolesIncomplete { covered: usize, num_nodes: usize },

    #[error("server node {server} has an edge to node {neighbor} which is not a ToR")]
    ServerToNonTor { server: usize, neighbor: usize },
}
