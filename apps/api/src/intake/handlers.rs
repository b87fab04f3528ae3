use std::time::Duration;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::{spawn_extraction, validate_upload, IntakeJob, IntakeStatus};
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

#[derive(Serialize)]
pub struct IntakeStartedResponse {
    pub context_id: Uuid,
    pub file_name: String,
    pub status: IntakeStatus,
}

#[derive(Serialize)]
pub struct IntakeStatusResponse {
    pub file_name: String,
    pub status: IntakeStatus,
    pub progress: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CandidateProfile>,
}

/// POST /api/v1/intake
/// Accepts a resume as the multipart field `resume`, creates a prep context
/// and starts the extraction job.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<IntakeStartedResponse>), AppError> {
    let mut upload: Option<(String, usize)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let file_name = field
            .file_name()
            .ok_or_else(|| AppError::Validation("Resume field has no file name".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, data.len()));
        break;
    }

    let (file_name, size) =
        upload.ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    validate_upload(&file_name, size)?;

    let (context_id, context) = state.store.create().await;
    let job = IntakeJob::new(file_name.clone());
    let cancel = job.cancel_token();
    context.write().await.intake = Some(job);
    spawn_extraction(
        context,
        Duration::from_millis(state.config.intake_step_ms),
        cancel,
    );

    tracing::info!(%context_id, %file_name, "resume upload accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(IntakeStartedResponse {
            context_id,
            file_name,
            status: IntakeStatus::Processing,
        }),
    ))
}

/// GET /api/v1/contexts/:id/intake
pub async fn handle_intake_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeStatusResponse>, AppError> {
    let context = state.store.get(id).await?;
    let guard = context.read().await;
    let job = guard
        .intake
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No intake job for this context".to_string()))?;
    Ok(Json(IntakeStatusResponse {
        file_name: job.file_name.clone(),
        status: job.status,
        progress: job.progress,
        message: job.message.clone(),
        profile: (job.status == IntakeStatus::Complete)
            .then(|| guard.profile.clone())
            .flatten(),
    }))
}

/// DELETE /api/v1/contexts/:id/intake
/// Cancels an in-flight extraction. Completed jobs stay completed.
pub async fn handle_intake_cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let context = state.store.get(id).await?;
    let mut guard = context.write().await;
    let job = guard
        .intake
        .as_mut()
        .ok_or_else(|| AppError::NotFound("No intake job for this context".to_string()))?;
    if job.status == IntakeStatus::Processing {
        job.request_cancel();
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/contexts/:id
/// The "start over" action: drops the context and everything in it.
pub async fn handle_delete_context(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
