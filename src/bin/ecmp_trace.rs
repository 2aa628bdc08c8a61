//! ECMP 路由追踪
//!
//! 加载拓扑（properties 文件或 fat-tree），构建 ECMP 仲裁器，然后：
//! - 打印某个节点的转发状态（`--state`）
//! - 追踪一条流的逐跳路径（`--src/--dst`）
//! - 统计 N 条流（源端口递增）在路径上每个多路径节点处的下一跳分布（`--flows`）

use clap::Parser;
use ecmp_rs::config::RoutingConfig;
use ecmp_rs::net::{FlowFields, NodeId, TCP_PROTOCOL, UDP_PROTOCOL};
use ecmp_rs::routing::EcmpArbiter;
use ecmp_rs::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use ecmp_rs::topo::Topology;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "ecmp-trace", about = "Inspect ECMP forwarding state and trace flows")]
struct Args {
    /// Path to topology.properties
    #[arg(long, conflicts_with = "fat_tree_k")]
    topology: Option<PathBuf>,

    /// Generate a k-ary fat-tree instead of reading a topology file
    #[arg(long)]
    fat_tree_k: Option<usize>,

    /// Routing config JSON (max_nodes, warn_nodes, hash_seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the ECMP state of this node
    #[arg(long)]
    state: Option<usize>,

    /// Flow source node
    #[arg(long, requires = "dst")]
    src: Option<usize>,

    /// Flow destination node
    #[arg(long, requires = "src")]
    dst: Option<usize>,

    /// tcp, udp, or a protocol number
    #[arg(long, default_value = "tcp")]
    protocol: String,

    #[arg(long, default_value_t = 10000)]
    src_port: u16,

    #[arg(long, default_value_t = 80)]
    dst_port: u16,

    /// Trace this many flows (source port incremented per flow) and print the
    /// next-hop distribution at every multi-path node
    #[arg(long)]
    flows: Option<u16>,
}

fn parse_protocol(s: &str) -> Result<u8, String> {
    match s.to_ascii_lowercase().as_str() {
        "tcp" => Ok(TCP_PROTOCOL),
        "udp" => Ok(UDP_PROTOCOL),
        other => other
            .parse::<u8>()
            .map_err(|_| format!("unknown protocol: {other} (expected tcp, udp, or 0-255)")),
    }
}

fn load_topology(args: &Args, cfg: &RoutingConfig) -> Result<Topology, Box<dyn Error>> {
    match (&args.topology, args.fat_tree_k) {
        (Some(path), _) => Ok(Topology::from_file(path)?),
        (None, Some(k)) => {
            if k < 2 || k % 2 != 0 {
                return Err(format!("fat-tree k must be even and >= 2, got {k}").into());
            }
            let opts = FatTreeOpts { k };
            match opts.num_nodes() {
                Some(n) if n <= cfg.max_nodes => debug!(k, num_nodes = n, "生成 fat-tree"),
                Some(n) => {
                    return Err(format!(
                        "fat-tree k={k} has {n} nodes, above max_nodes ({})",
                        cfg.max_nodes
                    )
                    .into());
                }
                None => return Err(format!("fat-tree k={k} node count overflows").into()),
            }
            let ft = build_fat_tree(&opts);
            Ok(Topology::new(ft.spec)?)
        }
        (None, None) => Err("either --topology or --fat-tree-k is required".into()),
    }
}

fn flow_fields(
    arbiter: &EcmpArbiter,
    src: NodeId,
    dst: NodeId,
    protocol: u8,
    src_port: u16,
    dst_port: u16,
) -> Result<FlowFields, Box<dyn Error>> {
    let addr = |node: NodeId| {
        arbiter
            .addresses()
            .primary_address(node)
            .ok_or_else(|| format!("node {node} has no interface address"))
    };
    let (src_addr, dst_addr) = (addr(src)?, addr(dst)?);
    Ok(match protocol {
        TCP_PROTOCOL => FlowFields::tcp(src_addr, dst_addr, src_port, dst_port),
        UDP_PROTOCOL => FlowFields::udp(src_addr, dst_addr, src_port, dst_port),
        other => FlowFields::other(src_addr, dst_addr, other),
    })
}

fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|n| n.0.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = match &args.config {
        Some(path) => RoutingConfig::from_file(path)?,
        None => RoutingConfig::default(),
    };
    let protocol = parse_protocol(&args.protocol)?;
    let topo = load_topology(&args, &cfg)?;
    let arbiter = EcmpArbiter::new(&topo, &cfg)?;

    if let Some(node) = args.state {
        if node >= topo.num_nodes() {
            return Err(format!("node {node} is out of range [0, {})", topo.num_nodes()).into());
        }
        print!("{}", arbiter.forwarding_state(NodeId(node)));
    }

    let (Some(src), Some(dst)) = (args.src, args.dst) else {
        return Ok(());
    };
    let (src, dst) = (NodeId(src), NodeId(dst));
    for node in [src, dst] {
        if !topo.contains(node) {
            return Err(format!("node {node} is out of range [0, {})", topo.num_nodes()).into());
        }
    }
    info!(src = %src, dst = %dst, protocol, "追踪流");

    match args.flows {
        None => {
            let fields = flow_fields(&arbiter, src, dst, protocol, args.src_port, args.dst_port)?;
            match arbiter.route_path(src, dst, &fields)? {
                Some(path) => println!("path {}", format_path(&path)),
                None => println!("no_route"),
            }
        }
        Some(n) => {
            // (node, next) -> count
            let mut choices: BTreeMap<(usize, usize), u64> = BTreeMap::new();
            let mut routed = 0u64;
            let mut unrouted = 0u64;
            for i in 0..n {
                let port = args.src_port.wrapping_add(i);
                let fields = flow_fields(&arbiter, src, dst, protocol, port, args.dst_port)?;
                let Some(path) = arbiter.route_path(src, dst, &fields)? else {
                    unrouted += 1;
                    continue;
                };
                debug!(port, path = %format_path(&path), "flow path");
                routed += 1;
                for hop in path.windows(2) {
                    if arbiter.candidates().get(hop[0], dst).len() > 1 {
                        *choices.entry((hop[0].0, hop[1].0)).or_default() += 1;
                    }
                }
            }
            println!("flows routed={routed} no_route={unrouted}");
            for ((node, next), count) in choices {
                println!("next_hop node={node} next={next} flows={count}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
