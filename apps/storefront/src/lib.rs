//! # Pares Storefront
//!
//! HTTP service behind the ordering site: menu, per-shopper carts, checkout
//! and the Messenger handoff.
//!
//! ## Module Organization
//! ```text
//! pares_storefront/
//! ├── lib.rs          ◄─── You are here (startup & serve)
//! ├── config.rs       ◄─── StorefrontConfig (defaults → TOML → env)
//! ├── error.rs        ◄─── API error type for routes
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── catalog.rs  ◄─── Catalog snapshot + refresh
//! │   └── session.rs  ◄─── Shopping sessions (cart + checkout)
//! └── routes/
//!     ├── mod.rs      ◄─── Router
//!     ├── catalog.rs  ◄─── Menu, categories, settings, payment methods
//!     ├── session.rs  ◄─── Session creation
//!     ├── cart.rs     ◄─── Cart manipulation
//!     └── checkout.rs ◄─── Details, payment, place order
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pares_db::{Database, DbConfig, SqliteCatalog};

use crate::config::StorefrontConfig;
use crate::state::{AppState, SessionStore};

/// Runs the storefront until Ctrl+C or SIGTERM.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,pares=debug,sqlx=warn; override with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → PARES_* → validate                   │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Menu, categories, payment methods, site settings                  │
/// │                                                                         │
/// │  5. Serve ────────────────────────────────────────────────────────────► │
/// │     • Idle session sweeper on its own task                              │
/// │     • axum router, permissive CORS                                      │
/// │     • Graceful shutdown on signal                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();
    info!("Starting Pares Storefront");

    let config = StorefrontConfig::load()?;

    if let Some(dir) = config.database.path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let db = Database::new(DbConfig::new(&config.database.path)).await?;
    info!("Database connected and migrations applied");

    let bind_address = config.bind_address();
    let sweep_interval = config.sessions.sweep_interval();
    let state = AppState::new(config, Arc::new(SqliteCatalog::new(db.clone())))
        .with_database(db.clone());
    state.catalog.refresh().await;

    let listener = TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Storefront listening");

    let sweeper = spawn_session_sweeper(state.sessions.clone(), sweep_interval);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `info`, with `debug` for the pares crates and `warn` for sqlx
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pares=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Evicts idle sessions every `every` until aborted.
fn spawn_session_sweeper(sessions: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sessions.evict_idle(Utc::now());
        }
    })
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweeper_evicts_idle_sessions() {
        let sessions = SessionStore::with_idle_ttl(Duration::ZERO);
        sessions.create();
        sessions.create();

        let sweeper = spawn_session_sweeper(sessions.clone(), Duration::from_secs(60));
        // The first tick fires immediately; yield until the task has run it.
        for _ in 0..10 {
            if sessions.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        sweeper.abort();

        assert!(sessions.is_empty());
    }
}
