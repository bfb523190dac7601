//! Execution service client
//!
//! All code execution happens in a separate service reached over HTTP:
//! `POST /run` executes code against one input and returns the raw
//! output, `POST /submit` executes one graded test case and returns a
//! verdict with time and memory figures. This module owns the wire
//! contract and the failure taxonomy for those calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ExecutionConfig;
use crate::models::{FailureKind, Verdict};

/// One `/run` call: execute code against a single input
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
    pub input: &'a str,
}

/// One `/submit` call: execute and judge a single graded test case
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest<'a> {
    /// Submission id, forwarded so the service can label its artifacts
    pub id: Uuid,
    pub problem_id: Uuid,
    pub code: &'a str,
    pub language: &'a str,
    pub input: &'a str,
    pub expected_output: &'a str,
}

/// Outcome of a `/run` call, passed through to callers verbatim
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub success: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub compile_message: String,
}

/// Raw body of a `/submit` response; verdict arrives as a string
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponseBody {
    verdict: String,
    #[serde(default)]
    total_time_ms: f64,
    #[serde(default)]
    memory_used: f64,
    #[serde(default)]
    compile_message: String,
}

/// Typed outcome of a `/submit` call
#[derive(Debug, Clone, PartialEq)]
pub struct GradedOutcome {
    pub verdict: Verdict,
    pub time_ms: f64,
    pub memory_kb: i64,
    /// Compiler or runtime output attached to the case, empty when clean
    pub message: String,
}

/// Lenient shape for non-2xx bodies; the service is not consistent
/// about which field carries the explanation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    verdict: Option<String>,
}

/// Failure of a single execution service call
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// Could not reach the service at all
    #[error("execution service unreachable: {0}")]
    Transport(String),

    /// The call exceeded the configured request timeout
    #[error("execution service call timed out")]
    Timeout,

    /// The service answered with a non-2xx status
    #[error("execution service returned {status}: {message}")]
    Service {
        status: u16,
        message: String,
        kind: FailureKind,
    },

    /// The service answered 2xx but the body made no sense
    #[error("malformed execution service response: {0}")]
    Malformed(String),
}

impl ExecutionError {
    /// Coarse classification for error surfaces
    pub fn kind(&self) -> FailureKind {
        match self {
            ExecutionError::Timeout => FailureKind::Timeout,
            ExecutionError::Service { kind, .. } => *kind,
            ExecutionError::Transport(_) | ExecutionError::Malformed(_) => FailureKind::Unknown,
        }
    }
}

/// Client for the execution service
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// Execute code against one input without judging it
    async fn run(&self, request: RunRequest<'_>) -> Result<RunOutcome, ExecutionError>;

    /// Execute and judge one graded test case
    async fn submit(&self, request: SubmitRequest<'_>) -> Result<GradedOutcome, ExecutionError>;
}

/// HTTP implementation backed by reqwest
///
/// The per-call timeout is baked into the underlying client at
/// construction; connect-level failures are retried up to the configured
/// count, everything else fails the call immediately.
pub struct HttpExecutionClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpExecutionClient {
    pub fn new(config: &ExecutionConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ExecutionError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0u32;

        loop {
            match self.http.post(&url).json(body).send().await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_timeout() => return Err(ExecutionError::Timeout),
                Err(err) if err.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_retries = self.max_retries,
                        "Execution service connect failed, retrying"
                    );
                }
                Err(err) => return Err(ExecutionError::Transport(err.to_string())),
            }
        }
    }

    /// Turn a non-2xx response into a classified error
    async fn service_failure(response: reqwest::Response) -> ExecutionError {
        let status = response.status().as_u16();
        let body: ServiceErrorBody = response.json().await.unwrap_or_default();

        let verdict = body.verdict.as_deref().and_then(Verdict::parse);
        let message = body
            .error
            .or(body.message)
            .unwrap_or_else(|| "no error details provided".to_string());

        ExecutionError::Service {
            status,
            message,
            kind: FailureKind::from_verdict(verdict.as_ref()),
        }
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn run(&self, request: RunRequest<'_>) -> Result<RunOutcome, ExecutionError> {
        tracing::debug!(language = request.language, "Dispatching /run call");

        let response = self.post_json("/run", &request).await?;
        if !response.status().is_success() {
            return Err(Self::service_failure(response).await);
        }

        response
            .json::<RunOutcome>()
            .await
            .map_err(|err| ExecutionError::Malformed(err.to_string()))
    }

    async fn submit(&self, request: SubmitRequest<'_>) -> Result<GradedOutcome, ExecutionError> {
        tracing::debug!(
            submission_id = %request.id,
            language = request.language,
            "Dispatching /submit call"
        );

        let response = self.post_json("/submit", &request).await?;
        if !response.status().is_success() {
            return Err(Self::service_failure(response).await);
        }

        let body = response
            .json::<SubmitResponseBody>()
            .await
            .map_err(|err| ExecutionError::Malformed(err.to_string()))?;

        let verdict = Verdict::parse(&body.verdict)
            .ok_or_else(|| ExecutionError::Malformed(format!("unknown verdict {:?}", body.verdict)))?;

        Ok(GradedOutcome {
            verdict,
            time_ms: body.total_time_ms,
            memory_kb: body.memory_used as i64,
            message: body.compile_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn config(base_url: &str, timeout_secs: u64, max_retries: u32) -> ExecutionConfig {
        ExecutionConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: timeout_secs,
            max_retries,
        }
    }

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_run_parses_success_body() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let sink = captured.clone();

        let app = Router::new().route(
            "/run",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({
                        "success": true,
                        "output": "42\n",
                        "compileMessage": ""
                    }))
                }
            }),
        );

        // Trailing slash on the base URL must not produce a double slash
        let base = format!("{}/", spawn_stub(app).await);
        let client = HttpExecutionClient::new(&config(&base, 5, 0)).unwrap();

        let outcome = client
            .run(RunRequest {
                code: "print(42)",
                language: "python",
                input: "",
            })
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.output, "42\n");
        assert_eq!(outcome.compile_message, "");

        let body = captured.lock().unwrap().take().unwrap();
        assert_eq!(body["code"], "print(42)");
        assert_eq!(body["language"], "python");
        assert_eq!(body["input"], "");
    }

    #[tokio::test]
    async fn test_submit_parses_verdict_and_figures() {
        let app = Router::new().route(
            "/submit",
            post(|Json(body): Json<Value>| async move {
                assert!(body["expectedOutput"].is_string());
                assert!(body["problemId"].is_string());
                Json(json!({
                    "verdict": "Wrong Answer",
                    "totalTimeMs": 12.5,
                    "memoryUsed": 2048,
                    "compileMessage": ""
                }))
            }),
        );

        let base = spawn_stub(app).await;
        let client = HttpExecutionClient::new(&config(&base, 5, 0)).unwrap();

        let outcome = client
            .submit(SubmitRequest {
                id: Uuid::new_v4(),
                problem_id: Uuid::new_v4(),
                code: "int main() {}",
                language: "cpp",
                input: "1 2",
                expected_output: "3",
            })
            .await
            .unwrap();

        assert_eq!(outcome.verdict, Verdict::WrongAnswer);
        assert_eq!(outcome.time_ms, 12.5);
        assert_eq!(outcome.memory_kb, 2048);
    }

    #[tokio::test]
    async fn test_error_body_is_classified() {
        let app = Router::new().route(
            "/run",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "main.cpp:1: expected ';'",
                        "verdict": "Compilation Error"
                    })),
                )
            }),
        );

        let base = spawn_stub(app).await;
        let client = HttpExecutionClient::new(&config(&base, 5, 0)).unwrap();

        let err = client
            .run(RunRequest {
                code: "int main( {}",
                language: "cpp",
                input: "",
            })
            .await
            .unwrap_err();

        match err {
            ExecutionError::Service {
                status,
                ref message,
                kind,
            } => {
                assert_eq!(status, 400);
                assert!(message.contains("expected ';'"));
                assert_eq!(kind, FailureKind::Compile);
            }
            other => panic!("expected Service error, got {other:?}"),
        }
        assert_eq!(err.kind(), FailureKind::Compile);
    }

    #[tokio::test]
    async fn test_unknown_verdict_is_malformed() {
        let app = Router::new().route(
            "/submit",
            post(|| async { Json(json!({ "verdict": "Exploded" })) }),
        );

        let base = spawn_stub(app).await;
        let client = HttpExecutionClient::new(&config(&base, 5, 0)).unwrap();

        let err = client
            .submit(SubmitRequest {
                id: Uuid::new_v4(),
                problem_id: Uuid::new_v4(),
                code: "",
                language: "python",
                input: "",
                expected_output: "",
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Malformed(_)));
        assert_eq!(err.kind(), FailureKind::Unknown);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Nothing listens on port 1; retries still end in the same error
        let client = HttpExecutionClient::new(&config("http://127.0.0.1:1", 5, 2)).unwrap();

        let err = client
            .run(RunRequest {
                code: "",
                language: "python",
                input: "",
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Transport(_)));
        assert_eq!(err.kind(), FailureKind::Unknown);
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let app = Router::new().route(
            "/run",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({ "success": true, "output": "" }))
            }),
        );

        let base = spawn_stub(app).await;
        let client = HttpExecutionClient::new(&config(&base, 1, 0)).unwrap();

        let err = client
            .run(RunRequest {
                code: "while True: pass",
                language: "python",
                input: "",
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Timeout));
        assert_eq!(err.kind(), FailureKind::Timeout);
    }
}
