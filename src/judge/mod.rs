//! Evaluation engine
//!
//! Drives code through the external execution service one test case at a
//! time and resolves a single verdict per run. The collaborators the
//! engine needs (execution calls, problem data, submission persistence)
//! are traits so the orchestration logic can run against scripted fakes.

pub mod aggregator;
pub mod client;
pub mod coordinator;
pub mod mode;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Problem, Submission, TestCase};

pub use aggregator::{compare_output, FoldStep, GradedAggregate, GradedSummary, SampleAggregate};
pub use client::{ExecutionClient, ExecutionError, HttpExecutionClient};
pub use coordinator::EvaluationCoordinator;
pub use mode::{EvaluationPlan, PlannedCase, RunMode, TestCaseFilter};

/// Read access to problems and their test cases
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    /// Look up a problem by id
    async fn find_problem(&self, problem_id: &Uuid) -> AppResult<Option<Problem>>;

    /// Fetch a problem's test cases in creation order, narrowed by the
    /// given filter
    async fn test_cases(
        &self,
        problem_id: &Uuid,
        filter: TestCaseFilter,
    ) -> AppResult<Vec<TestCase>>;
}

/// Persistence for graded submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a submission with verdict `Pending`. Runs before the first
    /// execution call so an interrupted run stays discoverable.
    async fn create_pending(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        language: &str,
        source_code: &str,
    ) -> AppResult<Submission>;

    /// Write the terminal result. At most one terminal write lands per
    /// submission; implementations must leave already-judged rows alone.
    async fn finalize(&self, submission_id: &Uuid, summary: &GradedSummary) -> AppResult<()>;
}
