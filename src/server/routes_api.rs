use crate::server::AppContext;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessesToUpdate, System};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(hello))
        .route("/_stats", get(stats))
}

async fn hello() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "hello world!" }))
}

/// Process memory diagnostics.
#[derive(Debug, Serialize)]
pub struct ProcessStats {
    /// Resident set size in bytes.
    pub rss: u64,
    /// Virtual memory size in bytes.
    pub virtual_memory: u64,
    /// Segment payloads currently held by the fetch cache.
    pub cache_entries: usize,
}

async fn stats(State(ctx): State<AppContext>) -> impl IntoResponse {
    let (rss, virtual_memory) = process_memory();
    Json(ProcessStats {
        rss,
        virtual_memory,
        cache_entries: ctx.cache.len(),
    })
}

fn process_memory() -> (u64, u64) {
    let Ok(pid) = get_current_pid() else {
        return (0, 0);
    };
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system
        .process(pid)
        .map(|p| (p.memory(), p.virtual_memory()))
        .unwrap_or((0, 0))
}
