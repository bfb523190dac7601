//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::{
    config::Config,
    db::repositories::{ProblemRepository, SubmissionRepository},
    judge::HttpExecutionClient,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager
    pub redis: ConnectionManager,

    /// Client for the external execution service
    pub executor: HttpExecutionClient,

    /// Problem and test case lookups
    pub problems: ProblemRepository,

    /// Submission persistence
    pub submissions: SubmissionRepository,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: ConnectionManager,
        executor: HttpExecutionClient,
        config: Config,
    ) -> Self {
        let problems = ProblemRepository::new(db.clone());
        let submissions = SubmissionRepository::new(db.clone());

        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                executor,
                problems,
                submissions,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get a reference to the execution service client
    pub fn executor(&self) -> &HttpExecutionClient {
        &self.inner.executor
    }

    /// Get a reference to the problem repository
    pub fn problems(&self) -> &ProblemRepository {
        &self.inner.problems
    }

    /// Get a reference to the submission repository
    pub fn submissions(&self) -> &SubmissionRepository {
        &self.inner.submissions
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
