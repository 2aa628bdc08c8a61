//! 标识符类型
//!
//! 定义节点、链路和接口的唯一标识符。

use std::fmt;

/// 节点标识符，取值范围 `[0, num_nodes)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// 链路标识符（即链路安装顺序，对应排序后的边列表下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub usize);

/// 节点本地的出接口编号
///
/// 编号 0 固定为 loopback，同时作为“不是邻居”的哨兵值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IfIndex(pub u32);

impl IfIndex {
    pub const LOOPBACK: IfIndex = IfIndex(0);

    pub fn is_loopback(self) -> bool {
        self == Self::LOOPBACK
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IfIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if{}", self.0)
    }
}
