//! Submission request DTOs
//!
//! JSON bodies use camelCase field names, matching the contract shared
//! with the frontend and the execution service.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Graded submission request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    /// Problem ID to submit for
    pub problem_id: Uuid,

    /// Programming language
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub code: String,
}

/// Sample run request: same shape as a graded submission, but the run
/// stays transient
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SampleRunRequest {
    /// Problem ID whose visible cases to run against
    pub problem_id: Uuid,

    /// Programming language
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))]
    pub code: String,
}

/// Custom run request: code plus caller-supplied input, no problem
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomRunRequest {
    /// Programming language
    #[validate(length(min = 1, max = 20))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))]
    pub code: String,

    /// Stdin for the run; must be present, may be empty
    #[validate(length(max = 1048576))]
    pub custom_input: String,
}

/// List submissions query parameters
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub problem_id: Option<Uuid>,
    pub verdict: Option<String>,
}
