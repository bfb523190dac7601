//! Problem repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    judge::{ProblemCatalog, TestCaseFilter},
    models::{Problem, TestCase},
};

/// Repository for problem and test case lookups.
///
/// Holds its pool so it can stand behind the judge's catalog trait.
#[derive(Clone)]
pub struct ProblemRepository {
    pool: PgPool,
}

impl ProblemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find problem by ID
    pub async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(problem)
    }

    /// Fetch a problem's test cases in grading order.
    ///
    /// Ordering is by insertion time with the ID as a tiebreaker, so every
    /// evaluation of the same problem walks the cases in the same sequence.
    pub async fn test_cases_for_problem(
        &self,
        problem_id: &Uuid,
        filter: TestCaseFilter,
    ) -> AppResult<Vec<TestCase>> {
        let include_hidden = matches!(filter, TestCaseFilter::All);

        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"
            SELECT * FROM test_cases
            WHERE problem_id = $1 AND ($2 OR is_hidden = FALSE)
            ORDER BY created_at, id
            "#,
        )
        .bind(problem_id)
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await?;

        Ok(test_cases)
    }

    /// Look up just the title, for list responses
    pub async fn title_of(&self, id: &Uuid) -> AppResult<Option<String>> {
        let title: Option<String> =
            sqlx::query_scalar(r#"SELECT title FROM problems WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(title)
    }
}

#[async_trait]
impl ProblemCatalog for ProblemRepository {
    async fn find_problem(&self, problem_id: &Uuid) -> AppResult<Option<Problem>> {
        self.find_by_id(problem_id).await
    }

    async fn test_cases(
        &self,
        problem_id: &Uuid,
        filter: TestCaseFilter,
    ) -> AppResult<Vec<TestCase>> {
        self.test_cases_for_problem(problem_id, filter).await
    }
}
