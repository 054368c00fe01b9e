use crate::config::Config;
use crate::fetch::{start_cleanup_task, Fetch, FetchCache, UpstreamFetcher};
use crate::pipeline::SegmentPipeline;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use clearcast_av::{check_ffmpeg, get_tool_path, scratch_dir, Remuxer, FFMPEG};
use clearcast_common::HostAllowList;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod responses;
pub mod routes_api;
pub mod routes_el;
pub mod routes_passthrough;

pub use error::GatewayError;

/// Interval between expired-entry sweeps of the fetch cache.
const CACHE_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Hosts `/el` may fetch manifests and segments from
    pub allowed_hosts: Arc<HostAllowList>,
    pub fetcher: Arc<dyn Fetch>,
    pub cache: Arc<FetchCache>,
    pub pipeline: Arc<SegmentPipeline>,
}

impl AppContext {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn Fetch>,
        cache: Arc<FetchCache>,
        remuxer: Remuxer,
    ) -> Self {
        let allowed_hosts = HostAllowList::new(&config.upstream.allowed_el_upstreams);
        let scratch = scratch_dir(config.tools.scratch_dir.as_deref());
        let pipeline = SegmentPipeline::new(fetcher.clone(), remuxer, scratch);
        Self {
            config: Arc::new(config),
            allowed_hosts: Arc::new(allowed_hosts),
            fetcher,
            cache,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Build the production context: a reqwest fetcher over a fresh cache
    /// and the ffmpeg binary found via config or `PATH`.
    pub fn from_config(config: Config) -> Result<Self> {
        let cache = Arc::new(FetchCache::new(
            config.upstream.max_cache_entries,
            config.upstream.cache_ttl_secs,
        ));
        let fetcher = UpstreamFetcher::new(
            cache.clone(),
            config.upstream.user_agents.clone(),
            &config.upstream.happy_el_upstreams,
        )
        .context("Failed to build upstream fetcher")?;

        let ffmpeg = get_tool_path(FFMPEG, config.tools.ffmpeg_path.as_deref())
            .context("ffmpeg is required")?;
        let remuxer = Remuxer::new(ffmpeg)
            .with_timeout(config.tools.remux_timeout_secs.map(Duration::from_secs));

        Ok(Self::new(config, Arc::new(fetcher), cache, remuxer))
    }

    /// Origin prefixed to passthrough paths.
    pub fn upstream_base(&self) -> &str {
        self.config.upstream.base_url.trim_end_matches('/')
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::RANGE]);

    Router::new()
        .merge(routes_api::api_routes())
        .route("/el", get(routes_el::el))
        .fallback(routes_passthrough::passthrough)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ffmpeg = check_ffmpeg(config.tools.ffmpeg_path.as_deref());
    match ffmpeg.version {
        Some(ref version) => tracing::info!("Using {}", version),
        None => tracing::warn!("Could not determine ffmpeg version"),
    }

    let ctx = AppContext::from_config(config)?;
    let cleanup = start_cleanup_task(ctx.cache.clone(), CACHE_CLEANUP_INTERVAL_SECS);

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
