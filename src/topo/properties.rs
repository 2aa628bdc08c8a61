//! 拓扑 properties 文件解析
//!
//! 格式为逐行 `key=value`，空行与 `#` 开头的行被忽略，值中的双引号会被去掉。
//! 集合写作 `set(a,b,c)` 或 `set()`，边写作 `a-b`。

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::error::TopologyError;
use super::topology::TopologySpec;

/// 把 properties 文本读成键值表（后出现的键覆盖先出现的键）
pub fn parse_properties(text: &str) -> Result<HashMap<String, String>, TopologyError> {
    let mut config = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('=').collect();
        let [key, value] = parts.as_slice() else {
            return Err(TopologyError::InvalidLine {
                line: idx + 1,
                content: line.to_string(),
            });
        };
        config.insert(key.trim().to_string(), value.trim().replace('"', ""));
    }
    Ok(config)
}

/// 取出必需参数
pub fn get_param<'a>(
    config: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, TopologyError> {
    config
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| TopologyError::MissingParam(key.to_string()))
}

/// 解析非负整数
pub fn parse_uint(value: &str) -> Result<usize, TopologyError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| TopologyError::InvalidInteger(value.to_string()))
}

/// 解析 `set(...)`，返回去掉空白后的元素（保持原顺序，不允许重复）
pub fn parse_set(value: &str) -> Result<Vec<String>, TopologyError> {
    let value = value.trim();
    let inner = value
        .strip_prefix("set(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| TopologyError::InvalidSet(value.to_string()))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<String> = inner.split(',').map(|s| s.trim().to_string()).collect();
    let mut seen = HashSet::with_capacity(items.len());
    if !items.iter().all(|s| seen.insert(s.as_str())) {
        return Err(TopologyError::DuplicateSetEntry(value.to_string()));
    }
    Ok(items)
}

/// 解析节点编号集合
pub fn parse_id_set(value: &str) -> Result<Vec<usize>, TopologyError> {
    let ids = parse_set(value)?
        .iter()
        .map(|s| parse_uint(s))
        .collect::<Result<Vec<_>, _>>()?;
    // "1" 与 "01" 在字符串层面不同，但数值相同
    let distinct: HashSet<usize> = ids.iter().copied().collect();
    if distinct.len() != ids.len() {
        return Err(TopologyError::DuplicateSetEntry(value.trim().to_string()));
    }
    Ok(ids)
}

/// 解析单条边 `a-b`（不做归一化，也不校验范围）
pub fn parse_edge(token: &str) -> Result<(usize, usize), TopologyError> {
    let parts: Vec<&str> = token.split('-').collect();
    let [a, b] = parts.as_slice() else {
        return Err(TopologyError::InvalidEdge(token.to_string()));
    };
    let a = parse_uint(a).map_err(|_| TopologyError::InvalidEdge(token.to_string()))?;
    let b = parse_uint(b).map_err(|_| TopologyError::InvalidEdge(token.to_string()))?;
    Ok((a, b))
}

impl TopologySpec {
    /// 从 properties 文本中读出拓扑描述
    pub fn from_properties_str(text: &str) -> Result<Self, TopologyError> {
        let config = parse_properties(text)?;
        trace!(keys = config.len(), "读取 properties");

        let undirected_edges = parse_set(get_param(&config, "undirected_edges")?)?
            .iter()
            .map(|s| parse_edge(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num_nodes: parse_uint(get_param(&config, "num_nodes")?)?,
            num_undirected_edges: parse_uint(get_param(&config, "num_undirected_edges")?)?,
            switches: parse_id_set(get_param(&config, "switches")?)?,
            switches_which_are_tors: parse_id_set(get_param(&config, "switches_which_are_tors")?)?,
            servers: parse_id_set(get_param(&config, "servers")?)?,
            undirected_edges,
        })
    }

    /// 渲染为 properties 文本（`from_properties_str` 的逆操作）
    pub fn to_properties_string(&self) -> String {
        fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
            items.map(|x| x.to_string()).collect::<Vec<_>>().join(",")
        }
        format!(
            "num_nodes={}\nnum_undirected_edges={}\nswitches=set({})\nswitches_which_are_tors=set({})\nservers=set({})\nundirected_edges=set({})\n",
            self.num_nodes,
            self.num_undirected_edges,
            join(self.switches.iter()),
            join(self.switches_which_are_tors.iter()),
            join(self.servers.iter()),
            join(self.undirected_edges.iter().map(|(a, b)| format!("{a}-{b}"))),
        )
    }
}
