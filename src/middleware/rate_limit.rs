//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::{constants, state::AppState};

/// Fixed-window rate limit middleware backed by Redis.
///
/// A Redis outage never blocks traffic. Failed counter reads fall back to
/// zero and the request goes through.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let ip = addr.ip().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (limit, window) = get_rate_limit(&method, &path);

    let key = format!("rate_limit:{}:{}", ip, path_bucket(&method, &path));
    let mut redis = state.redis();

    let count: i64 = redis.incr(&key, 1).await.unwrap_or(0);

    if count == 1 {
        // Set expiry on first request
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            format!("Rate limit exceeded. Try again in {} seconds.", window),
        ));
    }

    Ok(next.run(request).await)
}

/// Pick the limit for a request.
///
/// Evaluation requests fan out to the execution service, so they get a much
/// tighter budget than plain reads.
fn get_rate_limit(method: &Method, path: &str) -> (i64, i64) {
    if is_evaluation(method, path) {
        (
            constants::rate_limits::EVALUATION_MAX_REQUESTS,
            constants::rate_limits::EVALUATION_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Get bucket for the counter key (for grouping similar endpoints)
fn path_bucket(method: &Method, path: &str) -> &'static str {
    if is_evaluation(method, path) {
        "evaluation"
    } else {
        "general"
    }
}

fn is_evaluation(method: &Method, path: &str) -> bool {
    method == Method::POST && path.starts_with("/api/v1/submissions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_endpoints_get_tight_budget() {
        let (limit, _) = get_rate_limit(&Method::POST, "/api/v1/submissions");
        assert_eq!(limit, constants::rate_limits::EVALUATION_MAX_REQUESTS);

        let (limit, _) = get_rate_limit(&Method::POST, "/api/v1/submissions/run-sample");
        assert_eq!(limit, constants::rate_limits::EVALUATION_MAX_REQUESTS);
    }

    #[test]
    fn test_reads_get_general_budget() {
        let (limit, _) = get_rate_limit(
            &Method::GET,
            "/api/v1/submissions/0a0b5dd6-3f36-46f2-9a48-28708213a4e3",
        );
        assert_eq!(limit, constants::rate_limits::GENERAL_MAX_REQUESTS);

        let (limit, _) = get_rate_limit(&Method::GET, "/api/v1/health");
        assert_eq!(limit, constants::rate_limits::GENERAL_MAX_REQUESTS);
    }

    #[test]
    fn test_buckets_split_by_cost() {
        assert_eq!(path_bucket(&Method::POST, "/api/v1/submissions"), "evaluation");
        assert_eq!(path_bucket(&Method::GET, "/api/v1/submissions"), "general");
    }
}
