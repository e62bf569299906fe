//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::pagination::Paginator;
use yatube_core::ports::{GroupRepository, PostRepository, UserRepository};
use yatube_infra::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    DatabaseConnections, PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub paginator: Paginator,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let paginator = Paginator::new(config.posts_per_page);

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(Arc::new(connections), paginator);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(paginator)
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    #[cfg(feature = "postgres")]
    fn postgres(connections: Arc<DatabaseConnections>, paginator: Paginator) -> Self {
        let conn = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(Arc::clone(conn))),
            groups: Arc::new(PostgresGroupRepository::new(Arc::clone(conn))),
            posts: Arc::new(PostgresPostRepository::new(Arc::clone(conn))),
            paginator,
            db: Some(connections),
        }
    }

    /// State backed by one shared in-memory store.
    pub fn in_memory(paginator: Paginator) -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
            groups: Arc::new(InMemoryGroupRepository::new(Arc::clone(&store))),
            posts: Arc::new(InMemoryPostRepository::new(store)),
            paginator,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
