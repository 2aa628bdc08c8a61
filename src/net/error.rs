//! 链路安装与接口索引的错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("address space exhausted after {links} links")]
    AddressSpaceExhausted { links: usize },

    #[error("got {pairs} interface pairs for {edges} undirected edges")]
    InterfaceCountMismatch { edges: usize, pairs: usize },

    #[error("link {link} ({a}-{b}) is mapped to the loopback interface")]
    LoopbackInterface { link: usize, a: usize, b: usize },
}
