/// Document store access layer
///
/// This module provides:
/// - `DocumentStore`: the adapter owning the MongoDB client and pool lifecycle
/// - `schema`: idempotent collection/index provisioning
/// - `seed`: development fixture data
///
/// The adapter is constructed once in `main` and injected into every service;
/// a successfully constructed store has already passed a liveness probe, so
/// "used before connect" is not a representable state.
use std::time::Duration;

use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection, Database,
};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Post, Reaction, Tag};

pub mod schema;
pub mod seed;

pub const POSTS: &str = "posts";
pub const REACTIONS: &str = "reactions";
pub const FLAGS: &str = "flags";
pub const TAGS: &str = "tags";

/// Pooled connection to the backing MongoDB database.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Clone)]
pub struct DocumentStore {
    client: Client,
    database: Database,
    operation_timeout: Duration,
}

impl DocumentStore {
    /// Establish a pooled connection and verify it with a bounded ping.
    pub async fn connect(config: &Config) -> Result<Self> {
        let db = &config.database;

        let mut options = ClientOptions::parse(&db.uri)
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(db.max_pool_size);
        options.min_pool_size = Some(db.min_pool_size);
        options.max_idle_time = Some(Duration::from_millis(db.max_idle_time_ms));
        options.server_selection_timeout =
            Some(Duration::from_millis(db.server_selection_timeout_ms));
        options.connect_timeout = Some(Duration::from_millis(db.connect_timeout_ms));

        let client =
            Client::with_options(options).map_err(|e| AppError::Connection(e.to_string()))?;
        let database = client.database(&db.name);

        let store = Self {
            client,
            database,
            operation_timeout: Duration::from_millis(db.operation_timeout_ms),
        };
        store.ping().await?;
        tracing::info!(database = %db.name, "connected to MongoDB");

        Ok(store)
    }

    /// Release the pool. Safe to call exactly once at process teardown.
    pub async fn disconnect(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("disconnected from MongoDB");
    }

    /// Typed handle to an arbitrary collection.
    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    pub fn posts(&self) -> Collection<Post> {
        self.collection(POSTS)
    }

    pub fn reactions(&self) -> Collection<Reaction> {
        self.collection(REACTIONS)
    }

    pub fn tags(&self) -> Collection<Tag> {
        self.collection(TAGS)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Liveness probe; any fault degrades to `false`, never an error.
    pub async fn health_check(&self) -> bool {
        self.ping().await.is_ok()
    }

    async fn ping(&self) -> Result<()> {
        let command = self.database.run_command(doc! { "ping": 1 }, None);
        match tokio::time::timeout(self.operation_timeout, command).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(AppError::Connection(e.to_string())),
            Err(_) => Err(AppError::Connection("liveness probe timed out".to_string())),
        }
    }
}
