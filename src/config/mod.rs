mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Load configuration from a TOML file, resolving overrides through `lookup`.
pub fn load_config_with_env<F>(path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./clearcast.toml",
        "~/.config/clearcast/config.toml",
        "/etc/clearcast/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config)?;
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` resolves a variable name; production passes `std::env::var`,
/// tests pass a map.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("PORT is not a valid port: {port:?}"))?;
    }
    if let Some(upstream) = lookup("UPSTREAM") {
        config.upstream.base_url = upstream;
    }
    if let Some(list) = lookup("ALLOWED_EL_UPSTREAMS") {
        config.upstream.allowed_el_upstreams = parse_optional_list(&list);
    }
    if let Some(list) = lookup("HAPPY_EL_UPSTREAMS") {
        config.upstream.happy_el_upstreams = parse_optional_list(&list);
    }
    if let Some(max) = lookup("MAX_CACHE_ENTRIES") {
        config.upstream.max_cache_entries = max
            .trim()
            .parse()
            .with_context(|| format!("MAX_CACHE_ENTRIES is not a number: {max:?}"))?;
    }
    if let Some(ttl) = lookup("CACHE_TTL_SECS") {
        config.upstream.cache_ttl_secs = ttl
            .trim()
            .parse()
            .with_context(|| format!("CACHE_TTL_SECS is not a number: {ttl:?}"))?;
    }
    if let Some(path) = lookup("FFMPEG_PATH") {
        config.tools.ffmpeg_path = Some(PathBuf::from(path));
    }
    Ok(())
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_optional_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.upstream.max_cache_entries == 0 {
        anyhow::bail!("upstream.max_cache_entries must be at least 1");
    }

    if config.upstream.user_agents.is_empty() {
        anyhow::bail!("upstream.user_agents must contain at least one entry");
    }

    if config.tools.remux_timeout_secs == Some(0) {
        anyhow::bail!("tools.remux_timeout_secs must be positive when set");
    }

    if config.upstream.allowed_el_upstreams.is_empty() {
        tracing::warn!("No allowed /el upstreams configured; every /el request will be rejected");
    }

    if config.upstream.base_url.is_empty() {
        tracing::warn!("No upstream base URL configured; passthrough requests will fail");
    }

    if let Some(ref dir) = config.tools.scratch_dir {
        if !dir.is_dir() {
            tracing::warn!("Scratch directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}
