//! Submission repository

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    judge::{GradedSummary, SubmissionStore},
    models::{Submission, Verdict},
};

/// Repository for submission database operations.
///
/// Holds its pool so it can stand behind the judge's store trait.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new submission in the Pending state
    pub async fn create(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        language: &str,
        source_code: &str,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, problem_id, language, source_code, verdict)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(language)
        .bind(source_code)
        .bind(Verdict::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(submission)
    }

    /// Write the terminal verdict, metrics and per-case records.
    ///
    /// Guarded so a submission moves out of Pending at most once. A second
    /// writer matches zero rows and the first result stands.
    pub async fn finalize_result(&self, id: &Uuid, summary: &GradedSummary) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE submissions
            SET
                verdict = $2,
                execution_time_ms = $3,
                memory_used_kb = $4,
                compile_message = $5,
                test_results = $6,
                judged_at = NOW()
            WHERE id = $1 AND verdict = 'Pending'
            "#,
        )
        .bind(id)
        .bind(summary.verdict.as_str())
        .bind(summary.execution_time_ms)
        .bind(summary.memory_used_kb)
        .bind(&summary.compile_message)
        .bind(Json(&summary.results))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(submission_id = %id, "Terminal write skipped: submission already judged");
        }

        Ok(())
    }

    /// List one user's submissions, newest first
    pub async fn list_for_user(
        &self,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
            ORDER BY submitted_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((submissions, count))
    }

    /// List submissions with pagination and filters
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        problem_id: Option<&Uuid>,
        verdict: Option<&str>,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE
                ($1::uuid IS NULL OR problem_id = $1)
                AND ($2::text IS NULL OR verdict = $2)
            ORDER BY submitted_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(problem_id)
        .bind(verdict)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE
                ($1::uuid IS NULL OR problem_id = $1)
                AND ($2::text IS NULL OR verdict = $2)
            "#,
        )
        .bind(problem_id)
        .bind(verdict)
        .fetch_one(&self.pool)
        .await?;

        Ok((submissions, count))
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn create_pending(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        language: &str,
        source_code: &str,
    ) -> AppResult<Submission> {
        self.create(user_id, problem_id, language, source_code).await
    }

    async fn finalize(&self, submission_id: &Uuid, summary: &GradedSummary) -> AppResult<()> {
        self.finalize_result(submission_id, summary).await
    }
}
