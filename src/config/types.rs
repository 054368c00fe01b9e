use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Origin prefixed to passthrough request paths (`/<path>.m3u8`, `/<path>.ts`)
    #[serde(default)]
    pub base_url: String,

    /// Host suffixes `/el` may fetch manifests and segments from
    #[serde(default)]
    pub allowed_el_upstreams: Vec<String>,

    /// Host suffixes whose segment URLs get the `..%2F` path rewrite
    #[serde(default)]
    pub happy_el_upstreams: Vec<String>,

    /// User-Agent values rotated across upstream requests
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Maximum number of cached segment payloads
    #[serde(default = "default_max_cache_entries")]
    pub max_cache_entries: usize,

    /// Lifetime of a cached payload in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

fn default_user_agents() -> Vec<String> {
    vec![DEFAULT_USER_AGENT.to_string()]
}
fn default_max_cache_entries() -> usize {
    10
}
fn default_cache_ttl() -> u64 {
    3600
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            allowed_el_upstreams: Vec::new(),
            happy_el_upstreams: Vec::new(),
            user_agents: default_user_agents(),
            max_cache_entries: default_max_cache_entries(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg binary; looked up on PATH when unset
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Directory for per-track scratch files; system temp dir when unset
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,

    /// Upper bound on a single ffmpeg run; unlimited when unset
    #[serde(default)]
    pub remux_timeout_secs: Option<u64>,
}
