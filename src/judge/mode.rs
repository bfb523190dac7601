//! Run mode selection
//!
//! A run is either sample (visible cases, transient), custom (one
//! synthetic case, no comparison), or graded (every case, persisted).
//! The mode decides which test cases execute and whether a submission
//! row exists at all; preconditions are checked here, before anything
//! executes or persists.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::TestCase;

use super::ProblemCatalog;

/// Which stored test cases a mode evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseFilter {
    /// Only cases visible to submitters
    VisibleOnly,
    /// Every case, hidden ones included
    All,
}

/// The three ways a piece of code can be run
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Visible cases only, nothing persisted
    Sample,
    /// One synthetic case built from caller input, comparison skipped
    Custom { input: String },
    /// Full case set, persisted with a verdict
    Graded,
}

/// A test case scheduled for execution
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCase {
    /// Stored case id; nil for the synthetic custom case
    pub test_case_id: Uuid,
    pub input: String,
    /// None for custom runs, where no comparison happens
    pub expected_output: Option<String>,
    pub is_hidden: bool,
}

impl From<TestCase> for PlannedCase {
    fn from(case: TestCase) -> Self {
        Self {
            test_case_id: case.id,
            input: case.input,
            expected_output: Some(case.expected_output),
            is_hidden: case.is_hidden,
        }
    }
}

/// Resolved execution plan for one run
#[derive(Debug, Clone)]
pub struct EvaluationPlan {
    /// Cases in execution order
    pub cases: Vec<PlannedCase>,
    /// Whether this run leaves a submission row behind
    pub persist: bool,
}

impl RunMode {
    pub fn persists(&self) -> bool {
        matches!(self, RunMode::Graded)
    }

    /// Resolve the test-case set for this mode.
    ///
    /// Sample and graded runs require an existing problem with a
    /// non-empty case set; both are rejected here so no execution call
    /// and no submission row happens for a doomed run.
    pub async fn resolve(
        &self,
        catalog: &dyn ProblemCatalog,
        problem_id: Option<&Uuid>,
    ) -> AppResult<EvaluationPlan> {
        let (filter, empty_message) = match self {
            RunMode::Custom { input } => {
                return Ok(EvaluationPlan {
                    cases: vec![PlannedCase {
                        test_case_id: Uuid::nil(),
                        input: input.clone(),
                        expected_output: None,
                        is_hidden: false,
                    }],
                    persist: self.persists(),
                });
            }
            RunMode::Sample => (
                TestCaseFilter::VisibleOnly,
                "No sample test cases found for this problem",
            ),
            RunMode::Graded => (TestCaseFilter::All, "No test cases found for this problem"),
        };

        let problem_id = problem_id
            .ok_or_else(|| AppError::InvalidInput("problem id is required".to_string()))?;

        catalog
            .find_problem(problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let cases = catalog.test_cases(problem_id, filter).await?;
        if cases.is_empty() {
            return Err(AppError::Precondition(empty_message.to_string()));
        }

        Ok(EvaluationPlan {
            cases: cases.into_iter().map(PlannedCase::from).collect(),
            persist: self.persists(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::models::Problem;

    struct StubCatalog {
        problem: Option<Problem>,
        cases: Vec<TestCase>,
    }

    #[async_trait]
    impl ProblemCatalog for StubCatalog {
        async fn find_problem(&self, _problem_id: &Uuid) -> AppResult<Option<Problem>> {
            Ok(self.problem.clone())
        }

        async fn test_cases(
            &self,
            _problem_id: &Uuid,
            filter: TestCaseFilter,
        ) -> AppResult<Vec<TestCase>> {
            Ok(match filter {
                TestCaseFilter::All => self.cases.clone(),
                TestCaseFilter::VisibleOnly => self
                    .cases
                    .iter()
                    .filter(|c| !c.is_hidden)
                    .cloned()
                    .collect(),
            })
        }
    }

    fn problem() -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: "Sum of Two".to_string(),
            statement: String::new(),
            time_limit_ms: 2000,
            memory_limit_kb: 262144,
            created_at: Utc::now(),
        }
    }

    fn test_case(problem_id: Uuid, hidden: bool) -> TestCase {
        TestCase {
            id: Uuid::new_v4(),
            problem_id,
            input: "1 2".to_string(),
            expected_output: "3".to_string(),
            is_hidden: hidden,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sample_mode_excludes_hidden_cases() {
        let problem = problem();
        let catalog = StubCatalog {
            cases: vec![
                test_case(problem.id, false),
                test_case(problem.id, true),
                test_case(problem.id, false),
            ],
            problem: Some(problem.clone()),
        };

        let plan = RunMode::Sample
            .resolve(&catalog, Some(&problem.id))
            .await
            .unwrap();

        assert_eq!(plan.cases.len(), 2);
        assert!(!plan.persist);
        assert!(plan.cases.iter().all(|c| !c.is_hidden));
    }

    #[tokio::test]
    async fn test_graded_mode_includes_hidden_cases() {
        let problem = problem();
        let catalog = StubCatalog {
            cases: vec![test_case(problem.id, false), test_case(problem.id, true)],
            problem: Some(problem.clone()),
        };

        let plan = RunMode::Graded
            .resolve(&catalog, Some(&problem.id))
            .await
            .unwrap();

        assert_eq!(plan.cases.len(), 2);
        assert!(plan.persist);
        assert!(plan.cases.iter().all(|c| c.expected_output.is_some()));
    }

    #[tokio::test]
    async fn test_unknown_problem_is_not_found() {
        let catalog = StubCatalog {
            problem: None,
            cases: Vec::new(),
        };

        let err = RunMode::Graded
            .resolve(&catalog, Some(&Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_case_set_fails_the_precondition() {
        let problem = problem();
        let catalog = StubCatalog {
            // Hidden-only problems have no sample cases to run
            cases: vec![test_case(problem.id, true)],
            problem: Some(problem.clone()),
        };

        let err = RunMode::Sample
            .resolve(&catalog, Some(&problem.id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_missing_problem_id_is_rejected() {
        let catalog = StubCatalog {
            problem: None,
            cases: Vec::new(),
        };

        let err = RunMode::Sample.resolve(&catalog, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_custom_mode_builds_one_synthetic_case() {
        let catalog = StubCatalog {
            problem: None,
            cases: Vec::new(),
        };

        let plan = RunMode::Custom {
            input: "7 9".to_string(),
        }
        .resolve(&catalog, None)
        .await
        .unwrap();

        assert!(!plan.persist);
        assert_eq!(plan.cases.len(), 1);
        assert_eq!(plan.cases[0].test_case_id, Uuid::nil());
        assert_eq!(plan.cases[0].input, "7 9");
        assert_eq!(plan.cases[0].expected_output, None);
    }
}
