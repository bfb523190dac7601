//! Submission service

use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    db::repositories::{ProblemRepository, SubmissionRepository},
    error::{AppError, AppResult},
    handlers::submissions::{
        request::ListSubmissionsQuery,
        response::{SubmissionDetailResponse, SubmissionResponse, SubmissionsListResponse},
    },
    models::{Submission, Verdict},
};

/// Read-side service over graded submissions
pub struct SubmissionService;

impl SubmissionService {
    /// Get submission by ID with its per-case records
    pub async fn get_submission(
        submissions: &SubmissionRepository,
        problems: &ProblemRepository,
        id: &Uuid,
    ) -> AppResult<SubmissionDetailResponse> {
        let submission = submissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let problem_title = problems.title_of(&submission.problem_id).await?;

        Ok(SubmissionDetailResponse {
            id: submission.id,
            user_id: submission.user_id,
            problem_id: submission.problem_id,
            problem_title: problem_title.unwrap_or_default(),
            language: submission.language,
            verdict: submission.verdict,
            execution_time: submission.execution_time_ms,
            memory_used: submission.memory_used_kb,
            compile_message: submission.compile_message,
            verdicts: submission.test_results.0,
            submitted_at: submission.submitted_at,
            judged_at: submission.judged_at,
        })
    }

    /// List one user's submissions, newest first
    pub async fn list_user_submissions(
        submissions: &SubmissionRepository,
        problems: &ProblemRepository,
        user_id: &Uuid,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<SubmissionsListResponse> {
        let (page, per_page) = Self::page_window(page, per_page);
        let offset = (page as i64 - 1) * per_page as i64;
        let limit = per_page as i64;

        let (rows, total) = submissions.list_for_user(user_id, offset, limit).await?;

        let responses: Vec<SubmissionResponse> = futures::future::try_join_all(
            rows.into_iter()
                .map(|s| Self::to_submission_response(problems, s)),
        )
        .await?;

        Ok(SubmissionsListResponse {
            submissions: responses,
            total,
            page,
            per_page,
        })
    }

    /// List submissions across all users with optional filters
    pub async fn list_submissions(
        submissions: &SubmissionRepository,
        problems: &ProblemRepository,
        query: &ListSubmissionsQuery,
    ) -> AppResult<SubmissionsListResponse> {
        let verdict = match query.verdict.as_deref() {
            Some(raw) => Some(Verdict::parse(raw).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown verdict: {}", raw))
            })?),
            None => None,
        };

        let (page, per_page) = Self::page_window(query.page, query.per_page);
        let offset = (page as i64 - 1) * per_page as i64;
        let limit = per_page as i64;

        let (rows, total) = submissions
            .list(
                offset,
                limit,
                query.problem_id.as_ref(),
                verdict.map(|v| v.as_str()),
            )
            .await?;

        let responses: Vec<SubmissionResponse> = futures::future::try_join_all(
            rows.into_iter()
                .map(|s| Self::to_submission_response(problems, s)),
        )
        .await?;

        Ok(SubmissionsListResponse {
            submissions: responses,
            total,
            page,
            per_page,
        })
    }

    // Helper functions

    fn page_window(page: Option<u32>, per_page: Option<u32>) -> (u32, u32) {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        (page, per_page)
    }

    async fn to_submission_response(
        problems: &ProblemRepository,
        submission: Submission,
    ) -> AppResult<SubmissionResponse> {
        let problem_title = problems.title_of(&submission.problem_id).await?;

        Ok(SubmissionResponse {
            id: submission.id,
            user_id: submission.user_id,
            problem_id: submission.problem_id,
            problem_title: problem_title.unwrap_or_default(),
            language: submission.language,
            verdict: submission.verdict,
            execution_time: submission.execution_time_ms,
            memory_used: submission.memory_used_kb,
            submitted_at: submission.submitted_at,
            judged_at: submission.judged_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        assert_eq!(SubmissionService::page_window(None, None), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_page_window_clamps_per_page() {
        assert_eq!(
            SubmissionService::page_window(Some(3), Some(100_000)),
            (3, MAX_PAGE_SIZE)
        );
        assert_eq!(SubmissionService::page_window(Some(3), Some(0)), (3, 1));
    }

    #[test]
    fn test_page_window_floors_page_at_one() {
        assert_eq!(SubmissionService::page_window(Some(0), Some(10)), (1, 10));
    }
}
