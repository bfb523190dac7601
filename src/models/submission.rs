//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::verdict::Verdict;

/// Submission database model
///
/// Rows are inserted with verdict `Pending` before the first execution
/// call and receive exactly one terminal update afterwards.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: String,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub verdict: String,
    pub execution_time_ms: f64,
    pub memory_used_kb: i64,
    pub compile_message: String,
    pub test_results: Json<Vec<CaseResult>>,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Whether the evaluation for this row has finished
    pub fn is_judged(&self) -> bool {
        self.verdict != Verdict::Pending.as_str()
    }
}

/// Outcome of one graded test case, persisted in the `test_results`
/// JSONB array and echoed back in API responses.
///
/// Inputs and outputs are deliberately absent: graded runs never leak
/// test-case data, hidden or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub test_case_id: Uuid,
    pub is_hidden: bool,
    pub status: Verdict,
    pub execution_time: f64,
    pub memory_used: i64,
    #[serde(default)]
    pub message: String,
}
