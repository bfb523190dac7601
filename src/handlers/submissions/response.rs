//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::judge::aggregator::GradedSummary;
use crate::models::{CaseResult, Verdict};

/// Outcome of one sample case, inputs and outputs included; sample runs
/// only touch visible cases, so nothing here is secret
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleCaseResult {
    pub test_case_id: Uuid,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub status: Verdict,
    pub compile_message: String,
}

/// Sample run response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRunResponse {
    pub verdicts: Vec<SampleCaseResult>,
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
}

/// Custom run response: the execution service's answer passed through
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRunResponse {
    pub success: bool,
    pub output: String,
    pub compile_message: String,
}

/// Graded submission response
///
/// Returned for every graded run that got far enough to create a
/// submission, service failures included; the verdict tells the story.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedSubmissionResponse {
    pub submission_id: Uuid,
    pub verdict: Verdict,
    pub execution_time: f64,
    pub memory_used: i64,
    pub compile_message: String,
    pub verdicts: Vec<CaseResult>,
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
}

impl GradedSubmissionResponse {
    pub fn from_summary(submission_id: Uuid, total_test_cases: usize, summary: GradedSummary) -> Self {
        let passed_test_cases = summary.passed_count();
        Self {
            submission_id,
            verdict: summary.verdict,
            execution_time: summary.execution_time_ms,
            memory_used: summary.memory_used_kb,
            compile_message: summary.compile_message,
            verdicts: summary.results,
            total_test_cases,
            passed_test_cases,
        }
    }
}

/// Submission summary for lists and detail reads
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub problem_title: String,
    pub language: String,
    pub verdict: String,
    pub execution_time: f64,
    pub memory_used: i64,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

/// Full submission detail; per-case records included, source code not
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub problem_title: String,
    pub language: String,
    pub verdict: String,
    pub execution_time: f64,
    pub memory_used: i64,
    pub compile_message: String,
    pub verdicts: Vec<CaseResult>,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

/// Submission list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
