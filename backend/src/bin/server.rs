//! Timetable HTTP Server Binary
//!
//! Builds the repository, sets up the HTTP router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Seeded from backend/repository.toml (if present)
//! cargo run --bin timetable-server
//!
//! # Seeded from an explicit dataset
//! TIMETABLE_SEED_FILE=backend/data/sample_dataset.json cargo run --bin timetable-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (only `local`)
//! - `TIMETABLE_SEED_FILE`: JSON dataset to load at startup
//! - `RUST_LOG`: Filter directives, e.g. `timetable_engine=debug` (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use timetable_engine::db::RepositoryBuilder;
use timetable_engine::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting timetable HTTP server");

    let builder = match RepositoryBuilder::new().from_default_config() {
        Ok(builder) => builder,
        Err(e) => {
            warn!("{}; falling back to environment only", e);
            RepositoryBuilder::new()
        }
    };
    let repository = builder.from_env()?.build()?;
    info!("Repository initialized successfully");

    let state = AppState::new(repository);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter from `RUST_LOG`-style directives, falling back to `info` when they
/// are missing or unparseable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_keeps_per_target_directives() {
        assert_eq!(
            log_filter(Some("timetable_engine=debug")).to_string(),
            "timetable_engine=debug"
        );
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
    }
}
