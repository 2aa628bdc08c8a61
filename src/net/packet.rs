//! 数据包路由字段
//!
//! 路由核心只读取数据包头中与转发相关的字段，不持有也不修改数据包本身。

use std::net::Ipv4Addr;

/// TCP 协议号
pub const TCP_PROTOCOL: u8 = 6;
/// UDP 协议号
pub const UDP_PROTOCOL: u8 = 17;

/// 传输层端口对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ports {
    pub src: u16,
    pub dst: u16,
}

/// 参与 ECMP 决策的包头字段（5 元组，或非 TCP/UDP 时的 3 元组）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowFields {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub protocol: u8,
    /// 只有 TCP/UDP 才会读取端口；其他协议即使带了端口也会被忽略
    pub ports: Option<Ports>,
}

impl FlowFields {
    pub fn tcp(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, src_port: u16, dst_port: u16) -> Self {
        Self {
            src_addr,
            dst_addr,
            protocol: TCP_PROTOCOL,
            ports: Some(Ports {
                src: src_port,
                dst: dst_port,
            }),
        }
    }

    pub fn udp(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, src_port: u16, dst_port: u16) -> Self {
        Self {
            src_addr,
            dst_addr,
            protocol: UDP_PROTOCOL,
            ports: Some(Ports {
                src: src_port,
                dst: dst_port,
            }),
        }
    }

    /// 不带传输层端口的包（例如 ICMP）
    pub fn other(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, protocol: u8) -> Self {
        Self {
            src_addr,
            dst_addr,
            protocol,
            ports: None,
        }
    }

    /// 参与哈希的端口：协议为 TCP/UDP 且确实携带端口时才返回。
    pub fn hashed_ports(&self) -> Option<Ports> {
        match self.protocol {
            TCP_PROTOCOL | UDP_PROTOCOL => self.ports,
            _ => None,
        }
    }

    /// 去掉端口后的副本（用于“没有更多包头可读”的场景）
    pub fn without_ports(self) -> Self {
        Self {
            ports: None,
            ..self
        }
    }
}
