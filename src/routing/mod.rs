//! 路由模块
//!
//! 全源最短路、ECMP 候选表、五元组哈希与转发决策。

mod error;
mod distance;
mod candidates;
mod hash;
mod arbiter;

pub use error::ArbiterError;
pub use distance::{DistanceMatrix, UNREACHABLE};
pub use candidates::CandidateTable;
pub use hash::{FIELD_SEPARATOR, FlowHasher, murmur3_32};
pub use arbiter::{Arbiter, EcmpArbiter, Egress, Outcome};
