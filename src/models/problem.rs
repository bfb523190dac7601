//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Problem database model
///
/// Problems are authored elsewhere; the judge only reads them to anchor
/// submissions and to resolve test-case sets.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub statement: String,
    pub time_limit_ms: i32,
    pub memory_limit_kb: i32,
    pub created_at: DateTime<Utc>,
}
