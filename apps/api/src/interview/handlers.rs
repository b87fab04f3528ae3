use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::bank::{stage_info, StageInfo, MAX_STAGE, STAGE_CATALOG};
use crate::errors::AppError;
use crate::interview::report::{summarize, PerformanceSummary};
use crate::interview::session::{SessionResult, SessionState, SubmissionOutcome};
use crate::interview::timer::spawn_session_clock;
use crate::models::question::Question;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StageCatalogResponse {
    pub stages: &'static [StageInfo],
}

/// GET /api/v1/stages
pub async fn handle_get_stages() -> Json<StageCatalogResponse> {
    Json(StageCatalogResponse {
        stages: STAGE_CATALOG,
    })
}

#[derive(Deserialize)]
pub struct StageSelection {
    pub stage: u8,
}

/// PUT /api/v1/contexts/:id/stage
/// Locks in the difficulty tier for the next attempt. Requires a processed
/// resume; resets any previous attempt.
pub async fn handle_select_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<StageSelection>,
) -> Result<StatusCode, AppError> {
    let context = state.store.get(id).await?;
    let mut guard = context.write().await;
    if guard.profile.is_none() {
        return Err(AppError::Validation(
            "Upload and process a resume before selecting a stage".to_string(),
        ));
    }
    if !state.engine.bank().contains_stage(selection.stage) {
        return Err(AppError::InvalidStage(selection.stage));
    }
    let info = stage_info(selection.stage)
        .ok_or(AppError::InvalidStage(selection.stage))?;
    if !info.unlocked {
        return Err(AppError::Validation(format!(
            "Stage {} ({}) is locked",
            info.id, info.name
        )));
    }
    guard.selected_stage = Some(selection.stage);
    guard.reset_attempt();
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct InterviewView {
    pub stage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<Question>,
    pub score: u32,
    pub mastered: usize,
    pub needs_practice: usize,
    pub total_questions: usize,
    pub elapsed_secs: u64,
    pub completion_percent: u32,
    pub completed: bool,
}

impl InterviewView {
    fn from_session(session: &SessionState) -> Self {
        Self {
            stage: session.stage,
            current_question: session.current_question.clone(),
            score: session.score,
            mastered: session.answered.len(),
            needs_practice: session.incorrect.len(),
            total_questions: session.total_questions,
            elapsed_secs: session.elapsed_secs,
            completion_percent: session.completion_percent(),
            completed: session.completed,
        }
    }
}

/// POST /api/v1/contexts/:id/interview
/// Starts a session for the selected stage and presents the first question.
/// A stage whose bank is empty completes on the spot with score 0.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<InterviewView>), AppError> {
    let context = state.store.get(id).await?;
    let mut guard = context.write().await;
    if guard.profile.is_none() {
        return Err(AppError::Validation(
            "Upload and process a resume before starting an interview".to_string(),
        ));
    }
    let stage = guard.selected_stage.ok_or_else(|| {
        AppError::Validation("Select a stage before starting an interview".to_string())
    })?;

    let session = state.engine.start_session(stage)?;
    let view = InterviewView::from_session(&session);
    if session.completed {
        guard.result = Some(session.result());
        guard.session = None;
    } else {
        let session = Arc::new(RwLock::new(session));
        spawn_session_clock(Arc::downgrade(&session));
        guard.session = Some(session);
        guard.result = None;
    }
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/contexts/:id/interview
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let context = state.store.get(id).await?;
    let guard = context.read().await;
    let session = guard
        .session
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No active interview session".to_string()))?
        .clone();
    drop(guard);
    let session = session.read().await;
    Ok(Json(InterviewView::from_session(&session)))
}

#[derive(Deserialize)]
pub struct AnswerSubmission {
    pub answer: String,
}

/// POST /api/v1/contexts/:id/interview/answers
/// Submits an answer for the presented question. At most one submission may
/// be in flight per session; a transient evaluator failure keeps the answer
/// buffered for resubmission.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<AnswerSubmission>,
) -> Result<Json<SubmissionOutcome>, AppError> {
    let context = state.store.get(id).await?;
    let session = {
        let guard = context.read().await;
        guard
            .session
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No active interview session".to_string()))?
            .clone()
    };

    // The context lock is released here: only the session's own lock is
    // involved while the evaluator runs.
    let outcome = state
        .engine
        .submit_answer(&session, &submission.answer)
        .await?;

    if let Some(result) = &outcome.result {
        let mut guard = context.write().await;
        guard.result = Some(result.clone());
        guard.session = None;
    }
    Ok(Json(outcome))
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub result: SessionResult,
    pub performance: PerformanceSummary,
    pub evaluator_backend: &'static str,
}

/// GET /api/v1/contexts/:id/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultsResponse>, AppError> {
    let context = state.store.get(id).await?;
    let guard = context.read().await;
    let result = guard
        .result
        .clone()
        .ok_or_else(|| AppError::NotFound("No completed session for this context".to_string()))?;
    let performance = summarize(&result);
    Ok(Json(ResultsResponse {
        result,
        performance,
        evaluator_backend: state.engine.backend(),
    }))
}

/// POST /api/v1/contexts/:id/retry
/// Discards the finished attempt; stage and profile stay for another run.
pub async fn handle_retry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let context = state.store.get(id).await?;
    context.write().await.reset_attempt();
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct AdvanceResponse {
    pub selected_stage: u8,
}

/// POST /api/v1/contexts/:id/advance
/// Moves the selection to the next stage after a completed attempt.
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>, AppError> {
    let context = state.store.get(id).await?;
    let mut guard = context.write().await;
    let current = guard.result.as_ref().map(|r| r.stage).or(guard.selected_stage);
    let current = current.ok_or_else(|| {
        AppError::Validation("Complete a session before advancing".to_string())
    })?;
    if current >= MAX_STAGE {
        return Err(AppError::Validation(format!(
            "Stage {MAX_STAGE} is the final stage"
        )));
    }
    let next = current + 1;
    guard.selected_stage = Some(next);
    guard.reset_attempt();
    Ok(Json(AdvanceResponse {
        selected_stage: next,
    }))
}
