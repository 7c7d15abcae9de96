//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the purchase order handlers
//! - Mount every API route at the root and again under `/api`
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Serve plain HTTP or TLS on the given listener
//! - Apply network map changes from config reloads

use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validation::validate_network, NodeConfig};
use crate::http::{api, request};
use crate::ledger::{NetworkSnapshot, ServiceHub};
use crate::lifecycle::shutdown;
use crate::net::tls::load_tls_config;

/// Grace period for in-flight TLS connections on shutdown.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub hub: ServiceHub,
    /// Legal name of this node, captured once at construction.
    pub me: Arc<str>,
    pub coordinator_name: Arc<str>,
    pub config: Arc<NodeConfig>,
    pub request_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: NodeConfig, hub: ServiceHub) -> Self {
        Self {
            me: Arc::from(hub.me().name.as_str()),
            coordinator_name: Arc::from(config.node.coordinator_name.as_str()),
            hub,
            config: Arc::new(config),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// HTTP server for the node API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: NodeConfig, hub: ServiceHub) -> Self {
        Self::with_state(AppState::new(config, hub))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Routes served under both `/` and `/api`.
    fn api_routes() -> Router<AppState> {
        Router::new()
            .route("/example/me", get(api::whoami))
            .route("/example/peers", get(api::get_peers))
            .route("/example/purchase-orders", get(api::get_purchase_orders))
            .route(
                "/example/{party}/create-purchase-order",
                put(api::create_purchase_order),
            )
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        Router::new()
            .merge(Self::api_routes())
            .nest("/api", Self::api_routes())
            .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
            .layer(middleware::from_fn_with_state(state.clone(), request::track_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config reloads received on `config_updates` replace the network map.
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<NodeConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let tls = self.state.config.listener.tls.clone();

        tracing::info!(
            address = %addr,
            tls = tls.is_some(),
            legal_name = %self.state.me,
            "HTTP server starting"
        );

        tokio::spawn(apply_config_updates(self.state.clone(), config_updates));

        match tls {
            None => {
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(shutdown::wait(shutdown))
                    .await?;
            }
            Some(tls) => {
                let rustls =
                    load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
                let handle = axum_server::Handle::new();
                let drain = handle.clone();
                tokio::spawn(async move {
                    shutdown::wait(shutdown).await;
                    drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Rebuild the network map from each reloaded config.
async fn apply_config_updates(state: AppState, mut updates: mpsc::UnboundedReceiver<NodeConfig>) {
    while let Some(config) = updates.recv().await {
        if config.node.legal_name != state.config.node.legal_name {
            tracing::warn!(
                current = %state.config.node.legal_name,
                reloaded = %config.node.legal_name,
                "Legal name changes take effect on restart only"
            );
        }

        let errors = validate_network(&config.network);
        if !errors.is_empty() {
            for e in &errors {
                tracing::warn!(field = %e.field, error = %e.message, "Rejected network reload");
            }
            continue;
        }

        match NetworkSnapshot::from_config(&config.network, &state.hub.my_info) {
            Ok(snapshot) => state.hub.network_map.replace_snapshot(snapshot),
            Err(e) => tracing::warn!(error = %e, "Rejected network reload"),
        }
    }
}
