//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::ListResource;
use super::registry::{ResourceDescriptor, ResourceRegistry};
use crate::config::SelectConfig;
use crate::core::cell::EntityAdapter;
use crate::core::entity::Data;
use crate::core::store::ItemStore;
use anyhow::Result;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// A registered resource as listed by `GET /resources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub kind: String,
    pub path: String,
}

/// Builder for creating HTTP servers with one list route per resource kind
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(SelectConfig::from_yaml_file("dataselect.yaml")?)
///     .register_entity::<Product, _>(product_store)
///     .register(SecretResource::new(secret_store))
///     .build();
/// ```
pub struct ServerBuilder {
    config: SelectConfig,
    registry: ResourceRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: SelectConfig::default(),
            registry: ResourceRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the configuration used by every list route
    pub fn with_config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register a resource descriptor
    pub fn register(mut self, descriptor: impl ResourceDescriptor + 'static) -> Self {
        tracing::debug!(
            kind = descriptor.kind(),
            plural = descriptor.plural(),
            "registering resource"
        );
        self.registry.register(Box::new(descriptor));
        self
    }

    /// Register the list route of an entity backed by `store`
    pub fn register_entity<T, S>(self, store: S) -> Self
    where
        T: Data + Serialize + Send + Sync + 'static,
        S: ItemStore<T> + 'static,
    {
        self.register(ListResource::<EntityAdapter<T>, S>::for_entity(store))
    }

    /// Kinds registered so far, sorted
    pub fn kinds(&self) -> Vec<&str> {
        self.registry.kinds()
    }

    /// Build the final router
    ///
    /// This generates:
    /// - `GET /{plural}` for every registered resource
    /// - `GET /resources` listing the registered kinds
    /// - `GET /health` and `GET /healthz`
    pub fn build(self) -> Router {
        let config = Arc::new(self.config);

        let resources: Vec<ResourceInfo> = self
            .registry
            .kinds()
            .into_iter()
            .filter_map(|kind| {
                self.registry.plural_of(kind).map(|plural| ResourceInfo {
                    kind: kind.to_string(),
                    path: format!("/{}", plural),
                })
            })
            .collect();

        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
            .route("/resources", get(list_resource_kinds))
            .with_state(Arc::new(resources))
            .merge(self.registry.build_routes(config));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dataselect"
    }))
}

/// List registered resources - GET /resources
async fn list_resource_kinds(State(resources): State<Arc<Vec<ResourceInfo>>>) -> Json<Value> {
    Json(json!({ "resources": resources.as_ref() }))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::product::Product;
    use crate::resources::rulechain_log::RuleChainMsgLog;
    use crate::resources::secret::{ClusterSecret, SecretResource};
    use crate::storage::InMemoryStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_new_builder_has_no_kinds() {
        let builder = ServerBuilder::new();
        assert!(builder.kinds().is_empty());
    }

    #[test]
    fn test_register_collects_sorted_kinds() {
        let builder = ServerBuilder::new()
            .register(SecretResource::new(InMemoryStore::<ClusterSecret>::new()))
            .register_entity::<RuleChainMsgLog, _>(InMemoryStore::<RuleChainMsgLog>::new())
            .register_entity::<Product, _>(InMemoryStore::<Product>::new());

        assert_eq!(
            builder.kinds(),
            vec!["product", "rule_chain_msg_log", "secret"]
        );
    }

    #[test]
    fn test_build_with_custom_routes() {
        let _app = ServerBuilder::default()
            .with_config(SelectConfig::default())
            .with_custom_routes(Router::new().route("/ping", get(|| async { "pong" })))
            .register_entity::<Product, _>(InMemoryStore::<Product>::new())
            .build();
    }

    #[tokio::test]
    async fn test_resources_route_lists_registered_kinds() {
        let app = ServerBuilder::new()
            .register_entity::<Product, _>(InMemoryStore::<Product>::new())
            .register(SecretResource::new(InMemoryStore::<ClusterSecret>::new()))
            .build();

        let response = app
            .oneshot(Request::builder().uri("/resources").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "resources": [
                    { "kind": "product", "path": "/products" },
                    { "kind": "secret", "path": "/secrets" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_query_is_rejected_before_listing() {
        let app = ServerBuilder::new()
            .register_entity::<Product, _>(InMemoryStore::<Product>::new())
            .build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products?sortBy=name:sideways")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
