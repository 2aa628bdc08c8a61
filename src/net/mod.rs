//! 网络模块
//!
//! 节点/链路/接口标识符、链路安装与地址规划、邻居到出接口的索引，
//! 以及路由决策所读取的包头字段。

// 子模块声明
mod id;
mod packet;
mod error;
mod link;
mod interface;
mod address;

// 重新导出公共接口
pub use id::{IfIndex, LinkId, NodeId};
pub use packet::{FlowFields, Ports, TCP_PROTOCOL, UDP_PROTOCOL};
pub use error::NetError;
pub use link::{BASE_NETWORK, Link, LinkTable};
pub use interface::InterfaceIndex;
pub use address::{AddressPlan, SOURCE_ADDRESS_REQUEST};
