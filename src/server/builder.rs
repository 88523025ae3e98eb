//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::GraphQLExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::context::ContextFactory;
use crate::core::definition::TypeDefinition;
use crate::core::store::Db;
use crate::schema::{TypeRegistry, artifacts};
use crate::storage::InMemoryDb;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating a GraphQL server from registered type fragments
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("config/app.yaml")?)
///     .register_all(schemata::blog::definitions())?
///     .build()?;
/// ```
pub struct ServerBuilder {
    registry: TypeRegistry,
    db: Option<Arc<dyn Db>>,
    config: AppConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            db: None,
            config: AppConfig::default(),
        }
    }

    /// Set the data store
    ///
    /// Defaults to an [`InMemoryDb`] loaded with `store.seed` from the config.
    pub fn with_db(mut self, db: impl Db + 'static) -> Self {
        self.db = Some(Arc::new(db));
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Register one type fragment
    pub fn register(mut self, definition: impl Into<TypeDefinition>) -> Result<Self> {
        self.registry.register(definition)?;
        Ok(self)
    }

    /// Register several type fragments in order
    pub fn register_all(
        mut self,
        definitions: impl IntoIterator<Item = TypeDefinition>,
    ) -> Result<Self> {
        self.registry.register_all(definitions)?;
        Ok(self)
    }

    /// Build the transport-agnostic host
    ///
    /// This will:
    /// 1. Check the server config and compile the registered fragments
    ///    (failing startup on any conflict)
    /// 2. Write the configured SDL and type model artifacts
    /// 3. Attach the context factory over the data store
    pub fn build_host(self) -> Result<ServerHost> {
        self.config.server.validate()?;
        let schema = Arc::new(self.registry.compile()?);

        if let Some(path) = &self.config.schema.sdl_path {
            artifacts::write_sdl(&schema, path)?;
        }
        if let Some(path) = &self.config.schema.type_model_path {
            artifacts::write_type_model(&schema, path)?;
        }

        let db = match self.db {
            Some(db) => db,
            None => Arc::new(InMemoryDb::seeded(self.config.store.seed.clone())),
        };

        tracing::info!(types = schema.object_types().count(), "schema host ready");

        Ok(ServerHost::new(schema, ContextFactory::new(db), self.config))
    }

    /// Build the final GraphQL router
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(GraphQLExposure::build_router(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` from the config and handles SIGTERM and
    /// SIGINT (Ctrl+C) for graceful shutdown.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

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

/// Resolves on Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed never resolves, so the server
/// keeps running instead of shutting down immediately.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
