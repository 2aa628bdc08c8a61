//! 拓扑模块
//!
//! 拓扑的读取、校验与生成。

mod error;
mod properties;
mod topology;
pub mod fat_tree;

pub use error::TopologyError;
pub use properties::{get_param, parse_edge, parse_id_set, parse_properties, parse_set, parse_uint};
pub use topology::{Topology, TopologySpec};
