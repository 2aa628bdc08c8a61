//! 路由配置
//!
//! 以 JSON 形式提供，缺省字段取默认值。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Floyd-Warshall 为 O(n^3)，且距离矩阵为 n*n，超过此节点数直接拒绝。
pub const DEFAULT_MAX_NODES: usize = 40_000;
/// 超过此节点数时给出告警
pub const DEFAULT_WARN_NODES: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("warn_nodes ({warn_nodes}) must not exceed max_nodes ({max_nodes})")]
    Thresholds { warn_nodes: usize, max_nodes: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub max_nodes: usize,
    pub warn_nodes: usize,
    /// 五元组哈希的种子；同一种子下结果可复现
    pub hash_seed: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            warn_nodes: DEFAULT_WARN_NODES,
            hash_seed: 0,
        }
    }
}

impl RoutingConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warn_nodes > self.max_nodes {
            return Err(ConfigError::Thresholds {
                warn_nodes: self.warn_nodes,
                max_nodes: self.max_nodes,
            });
        }
        Ok(())
    }
}
