//! Axum-based RPC server.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use fairdice_engine::RollEngine;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

pub struct RpcServer {
    pub bind: String,
    pub port: u16,
    engine: Arc<RollEngine>,
}

impl RpcServer {
    pub fn new(bind: impl Into<String>, port: u16, engine: Arc<RollEngine>) -> Self {
        Self {
            bind: bind.into(),
            port,
            engine,
        }
    }

    /// The router with every endpoint mounted, sharing this server's engine.
    pub fn router(&self) -> Router {
        router(self.engine.clone())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(&self) -> Result<(), RpcError> {
        let addr = format!("{}:{}", self.bind, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {addr}: {e}")))?;
        info!("RPC server listening on {}", addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("RPC server stopped");
        Ok(())
    }
}

pub fn router(engine: Arc<RollEngine>) -> Router {
    Router::new()
        .route("/roll", post(handlers::roll))
        .route("/verify", post(handlers::verify_current))
        .route("/verify/round", post(handlers::verify_round))
        .route("/history", get(handlers::history))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .with_state(engine)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
