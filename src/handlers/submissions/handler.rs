//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::languages,
    error::{AppError, AppResult},
    judge::EvaluationCoordinator,
    middleware::auth::CurrentUser,
    models::Verdict,
    services::SubmissionService,
    state::AppState,
    utils::validate_language,
};

use super::{
    request::{CreateSubmissionRequest, CustomRunRequest, ListSubmissionsQuery, SampleRunRequest},
    response::{
        CustomRunResponse, GradedSubmissionResponse, SampleRunResponse, SubmissionDetailResponse,
        SubmissionsListResponse,
    },
};

/// Submit a solution for grading against the problem's full test suite
pub async fn create_submission(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<GradedSubmissionResponse>)> {
    payload.validate()?;
    check_language(&payload.language)?;

    let coordinator =
        EvaluationCoordinator::new(state.executor(), state.problems(), state.submissions());
    let response = coordinator.submit(&user.id, &payload).await?;

    // Internal failures still return the full graded body, just under a 502
    let status = if response.verdict == Verdict::InternalError {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    Ok((status, Json(response)))
}

/// Run a solution against the problem's visible sample cases
pub async fn run_sample(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<SampleRunRequest>,
) -> AppResult<Json<SampleRunResponse>> {
    payload.validate()?;
    check_language(&payload.language)?;

    let coordinator =
        EvaluationCoordinator::new(state.executor(), state.problems(), state.submissions());
    let response = coordinator.run_sample(&payload).await?;

    Ok(Json(response))
}

/// Run a solution once against caller-provided input
pub async fn run_custom(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<CustomRunRequest>,
) -> AppResult<Json<CustomRunResponse>> {
    payload.validate()?;
    check_language(&payload.language)?;

    let coordinator =
        EvaluationCoordinator::new(state.executor(), state.problems(), state.submissions());
    let response = coordinator.run_custom(&payload).await?;

    Ok(Json(response))
}

/// Get a specific submission with its per-case records
pub async fn get_submission(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionDetailResponse>> {
    let submission =
        SubmissionService::get_submission(state.submissions(), state.problems(), &id).await?;

    // Users can only view their own submissions (unless admin)
    if submission.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot view other users' submissions".to_string(),
        ));
    }

    Ok(Json(submission))
}

/// List one user's submissions, newest first
pub async fn list_user_submissions(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    if user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot list other users' submissions".to_string(),
        ));
    }

    let response = SubmissionService::list_user_submissions(
        state.submissions(),
        state.problems(),
        &user_id,
        query.page,
        query.per_page,
    )
    .await?;

    Ok(Json(response))
}

/// List submissions across all users (admin only)
pub async fn list_submissions(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can list all submissions".to_string(),
        ));
    }

    let response =
        SubmissionService::list_submissions(state.submissions(), state.problems(), &query).await?;

    Ok(Json(response))
}

// Helper function

fn check_language(language: &str) -> AppResult<()> {
    validate_language(language).map_err(|_| {
        AppError::InvalidInput(format!(
            "Unsupported language: {}. Supported languages: {:?}",
            language,
            languages::ALL
        ))
    })
}
