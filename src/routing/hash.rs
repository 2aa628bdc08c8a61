//! 五元组哈希
//!
//! 输入为决策节点编号 + 源/目的地址 + 协议号（+ TCP/UDP 端口），各字段定宽写入，
//! 字段之间插入分隔字节。节点编号参与哈希，使同一条流在路径上不同节点处得到
//! 不同的哈希值，避免哈希极化。
//!
//! 哈希函数为 MurmurHash3 (x86, 32-bit)。

use crate::net::{FlowFields, NodeId};

/// 字段分隔字节
pub const FIELD_SEPARATOR: u8 = b'|';

/// 节点(8) + 地址(4+4) + 协议(1) + 端口(2+2) + 分隔符(5)
const MAX_INPUT: usize = 26;

/// 单次哈希的局部输入缓冲
struct HashInput {
    buf: [u8; MAX_INPUT],
    len: usize,
}

impl HashInput {
    fn new() -> Self {
        Self {
            buf: [0; MAX_INPUT],
            len: 0,
        }
    }

    fn field(&mut self, bytes: &[u8]) {
        if self.len > 0 {
            self.buf[self.len] = FIELD_SEPARATOR;
            self.len += 1;
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// 流指纹哈希器。无内部可变状态，可在线程间共享。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowHasher {
    seed: u32,
}

impl FlowHasher {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// 计算 (node, fields) 的哈希；与包长、负载无关。
    pub fn hash(&self, node: NodeId, fields: &FlowFields) -> u32 {
        let input = Self::encode(node, fields);
        murmur3_32(input.as_bytes(), self.seed)
    }

    /// 哈希输入的字节序列
    pub fn input_bytes(node: NodeId, fields: &FlowFields) -> Vec<u8> {
        Self::encode(node, fields).as_bytes().to_vec()
    }

    fn encode(node: NodeId, fields: &FlowFields) -> HashInput {
        let mut input = HashInput::new();
        input.field(&(node.0 as u64).to_le_bytes());
        input.field(&fields.src_addr.octets());
        input.field(&fields.dst_addr.octets());
        input.field(&[fields.protocol]);
        if let Some(ports) = fields.hashed_ports() {
            input.field(&ports.src.to_le_bytes());
            input.field(&ports.dst.to_le_bytes());
        }
        input
    }
}

/// MurmurHash3 x86_32
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut h = seed;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        h ^= k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k |= (b as u32) << (8 * i);
        }
        h ^= k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
    }

    h ^= data.len() as u32;
    fmix32(h)
}

fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
