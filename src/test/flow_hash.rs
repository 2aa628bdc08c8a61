use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::net::{FlowFields, NodeId, Ports, TCP_PROTOCOL, UDP_PROTOCOL};
use crate::routing::{FIELD_SEPARATOR, FlowHasher, murmur3_32};

const ICMP: u8 = 1;

fn addr(v: u32) -> Ipv4Addr {
    Ipv4Addr::from(v)
}

#[test]
fn murmur3_known_vectors() {
    assert_eq!(murmur3_32(b"", 0), 0);
    assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
    assert_eq!(murmur3_32(b"", 0xffff_ffff), 0x81f1_6f39);
    assert_eq!(murmur3_32(b"test", 0), 0xba6b_d213);
    assert_eq!(
        murmur3_32(b"The quick brown fox jumps over the lazy dog", 0),
        0x2e4f_f723
    );
}

#[test]
fn every_field_changes_the_hash() {
    let h = FlowHasher::default();
    let mut cases: Vec<(usize, FlowFields)> = Vec::new();

    for proto in [TCP_PROTOCOL, UDP_PROTOCOL] {
        let make = |s: u32, d: u32, sp: u16, dp: u16| {
            if proto == TCP_PROTOCOL {
                FlowFields::tcp(addr(s), addr(d), sp, dp)
            } else {
                FlowFields::udp(addr(s), addr(d), sp, dp)
            }
        };
        cases.push((1, make(2, 3, 4, 5)));
        cases.push((6, make(2, 3, 4, 5)));
        cases.push((1, make(6, 3, 4, 5)));
        cases.push((1, make(2, 6, 4, 5)));
        cases.push((1, make(2, 3, 6, 5)));
        cases.push((1, make(2, 3, 4, 6)));
    }
    cases.push((1, FlowFields::other(addr(2), addr(3), ICMP)));
    cases.push((6, FlowFields::other(addr(2), addr(3), ICMP)));
    cases.push((1, FlowFields::other(addr(6), addr(3), ICMP)));
    cases.push((1, FlowFields::other(addr(2), addr(6), ICMP)));
    assert_eq!(cases.len(), 16);

    let hashes: Vec<u32> = cases
        .iter()
        .map(|(node, f)| h.hash(NodeId(*node), f))
        .collect();
    let distinct: HashSet<u32> = hashes.iter().copied().collect();
    assert_eq!(distinct.len(), cases.len(), "hash collision in {hashes:x?}");
}

#[test]
fn hash_is_deterministic_per_seed() {
    let f = FlowFields::tcp(addr(0x0a00_0001), addr(0x0a00_0102), 10000, 80);
    let a = FlowHasher::new(7);
    let b = FlowHasher::new(7);
    assert_eq!(a.seed(), 7);
    for node in 0..32 {
        assert_eq!(a.hash(NodeId(node), &f), b.hash(NodeId(node), &f));
    }
    let c = FlowHasher::new(8);
    let differs = (0..32).any(|node| a.hash(NodeId(node), &f) != c.hash(NodeId(node), &f));
    assert!(differs, "seed had no effect");
}

#[test]
fn non_tcp_udp_ignores_ports() {
    let h = FlowHasher::default();
    let mut with_ports = FlowFields::other(addr(2), addr(3), ICMP);
    with_ports.ports = Some(Ports { src: 4, dst: 5 });
    let mut other_ports = with_ports;
    other_ports.ports = Some(Ports { src: 40, dst: 50 });
    let without = FlowFields::other(addr(2), addr(3), ICMP);

    let node = NodeId(1);
    assert_eq!(h.hash(node, &with_ports), h.hash(node, &other_ports));
    assert_eq!(h.hash(node, &with_ports), h.hash(node, &without));
}

#[test]
fn tcp_and_udp_with_same_tuple_differ() {
    let h = FlowHasher::default();
    let tcp = FlowFields::tcp(addr(2), addr(3), 4, 5);
    let udp = FlowFields::udp(addr(2), addr(3), 4, 5);
    assert_ne!(h.hash(NodeId(1), &tcp), h.hash(NodeId(1), &udp));
}

#[test]
fn input_layout_has_separators_between_fields() {
    let f = FlowFields::tcp(addr(0x0102_0304), addr(0x0506_0708), 0x1122, 0x3344);
    let bytes = FlowHasher::input_bytes(NodeId(9), &f);
    assert_eq!(bytes.len(), 26);
    assert_eq!(&bytes[..8], &9u64.to_le_bytes());
    for pos in [8, 13, 18, 20, 23] {
        assert_eq!(bytes[pos], FIELD_SEPARATOR, "separator at {pos}");
    }
    assert_eq!(&bytes[9..13], &[1, 2, 3, 4]);
    assert_eq!(&bytes[14..18], &[5, 6, 7, 8]);
    assert_eq!(bytes[19], TCP_PROTOCOL);
    assert_eq!(&bytes[21..23], &0x1122u16.to_le_bytes());
    assert_eq!(&bytes[24..26], &0x3344u16.to_le_bytes());

    let icmp = FlowFields::other(addr(0x0102_0304), addr(0x0506_0708), ICMP);
    let bytes = FlowHasher::input_bytes(NodeId(9), &icmp);
    assert_eq!(bytes.len(), 20);
    assert_eq!(bytes[19], ICMP);

    let h = FlowHasher::new(3);
    assert_eq!(
        h.hash(NodeId(9), &f),
        murmur3_32(&FlowHasher::input_bytes(NodeId(9), &f), 3)
    );
}
