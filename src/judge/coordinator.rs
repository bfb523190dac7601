//! Evaluation coordinator
//!
//! Owns one run end to end: resolve the plan, create the Pending row for
//! graded runs, execute cases strictly in order, fold outcomes, and
//! issue the single terminal write. There is no parallelism within a
//! run; a dropped request future cancels the in-flight execution call at
//! its await point and the Pending row stays behind as evidence.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::submissions::request::{
    CreateSubmissionRequest, CustomRunRequest, SampleRunRequest,
};
use crate::handlers::submissions::response::{
    CustomRunResponse, GradedSubmissionResponse, SampleCaseResult, SampleRunResponse,
};
use crate::models::CaseResult;

use super::aggregator::{compare_output, FoldStep, GradedAggregate, SampleAggregate};
use super::client::{ExecutionClient, ExecutionError, RunRequest, SubmitRequest};
use super::mode::RunMode;
use super::{ProblemCatalog, SubmissionStore};

/// Coordinates a single evaluation run against injected collaborators
pub struct EvaluationCoordinator<'a> {
    client: &'a dyn ExecutionClient,
    catalog: &'a dyn ProblemCatalog,
    store: &'a dyn SubmissionStore,
}

impl<'a> EvaluationCoordinator<'a> {
    pub fn new(
        client: &'a dyn ExecutionClient,
        catalog: &'a dyn ProblemCatalog,
        store: &'a dyn SubmissionStore,
    ) -> Self {
        Self {
            client,
            catalog,
            store,
        }
    }

    /// Run code against a problem's visible cases. Transient: no
    /// submission row; inputs and outputs go back to the caller.
    ///
    /// An execution service failure aborts the whole run as an error,
    /// since there is nothing to persist and nothing partial worth
    /// returning.
    pub async fn run_sample(&self, request: &SampleRunRequest) -> AppResult<SampleRunResponse> {
        let plan = RunMode::Sample
            .resolve(self.catalog, Some(&request.problem_id))
            .await?;
        let total_test_cases = plan.cases.len();

        let mut aggregate = SampleAggregate::new();
        for case in &plan.cases {
            let outcome = self
                .client
                .run(RunRequest {
                    code: &request.code,
                    language: &request.language,
                    input: &case.input,
                })
                .await?;

            let expected = case.expected_output.as_deref().unwrap_or_default();
            let record = SampleCaseResult {
                test_case_id: case.test_case_id,
                input: case.input.clone(),
                expected_output: expected.to_string(),
                actual_output: outcome.output.clone(),
                status: compare_output(&outcome.output, expected),
                compile_message: outcome.compile_message,
            };

            match aggregate.absorb(record) {
                FoldStep::Continue(next) => aggregate = next,
                FoldStep::Halted(next) => {
                    aggregate = next;
                    break;
                }
            }
        }

        let passed_test_cases = aggregate.passed_count();
        Ok(SampleRunResponse {
            verdicts: aggregate.into_verdicts(),
            total_test_cases,
            passed_test_cases,
        })
    }

    /// Run code against caller-supplied input. One synthetic case, no
    /// comparison, no persistence; the raw output goes straight back.
    pub async fn run_custom(&self, request: &CustomRunRequest) -> AppResult<CustomRunResponse> {
        let plan = RunMode::Custom {
            input: request.custom_input.clone(),
        }
        .resolve(self.catalog, None)
        .await?;

        let case = plan
            .cases
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("custom plan resolved no case")))?;

        let outcome = self
            .client
            .run(RunRequest {
                code: &request.code,
                language: &request.language,
                input: &case.input,
            })
            .await?;

        Ok(CustomRunResponse {
            success: outcome.success,
            output: outcome.output,
            compile_message: outcome.compile_message,
        })
    }

    /// Grade a submission against the full case set and persist it.
    ///
    /// The Pending row is created after the plan resolves but before the
    /// first execution call. A service failure mid-run does not bubble
    /// up as an error here: the submission is finalized as
    /// `Internal Error` with whatever outcomes were gathered, and the
    /// graded shape is returned so the caller still sees a verdict.
    pub async fn submit(
        &self,
        user_id: &Uuid,
        request: &CreateSubmissionRequest,
    ) -> AppResult<GradedSubmissionResponse> {
        let plan = RunMode::Graded
            .resolve(self.catalog, Some(&request.problem_id))
            .await?;
        let total_test_cases = plan.cases.len();

        let submission = self
            .store
            .create_pending(user_id, &request.problem_id, &request.language, &request.code)
            .await?;
        tracing::info!(
            submission_id = %submission.id,
            problem_id = %request.problem_id,
            cases = total_test_cases,
            "Graded evaluation started"
        );

        let mut aggregate = GradedAggregate::new();
        let mut service_failure: Option<ExecutionError> = None;

        for (index, case) in plan.cases.iter().enumerate() {
            let outcome = match self
                .client
                .submit(SubmitRequest {
                    id: submission.id,
                    problem_id: request.problem_id,
                    code: &request.code,
                    language: &request.language,
                    input: &case.input,
                    expected_output: case.expected_output.as_deref().unwrap_or_default(),
                })
                .await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!(
                        submission_id = %submission.id,
                        case = index + 1,
                        error = %err,
                        "Execution service failed mid-run"
                    );
                    service_failure = Some(err);
                    break;
                }
            };

            let record = CaseResult {
                test_case_id: case.test_case_id,
                is_hidden: case.is_hidden,
                status: outcome.verdict,
                execution_time: outcome.time_ms,
                memory_used: outcome.memory_kb,
                message: outcome.message,
            };

            match aggregate.absorb(record) {
                FoldStep::Continue(next) => aggregate = next,
                FoldStep::Halted(next) => {
                    aggregate = next;
                    break;
                }
            }
        }

        let summary = match service_failure {
            Some(err) => aggregate.abort(err.to_string()),
            None => aggregate.finish(),
        };

        self.store.finalize(&submission.id, &summary).await?;
        tracing::info!(
            submission_id = %submission.id,
            verdict = %summary.verdict,
            time_ms = summary.execution_time_ms,
            memory_kb = summary.memory_used_kb,
            "Graded evaluation finished"
        );

        Ok(GradedSubmissionResponse::from_summary(
            submission.id,
            total_test_cases,
            summary,
        ))
    }
}
