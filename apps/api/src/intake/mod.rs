//! Resume intake: upload validation and the mocked extraction pipeline.
//!
//! Extraction is a cancellable background task that walks a fixed sequence
//! of progress steps and ends by committing the mock profile to the context.
//! A real document parser would replace the step loop; the validation
//! boundary and the job state machine stay the same.

pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::mock_extracted_profile;
use crate::store::PrepContext;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Progress checkpoints of the mocked extraction pass.
pub const EXTRACTION_STEPS: &[(u8, &str)] = &[
    (20, "Extracting text from resume..."),
    (40, "Analyzing skills and experience..."),
    (60, "Identifying key technologies..."),
    (80, "Generating question categories..."),
    (100, "Processing complete!"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    Processing,
    Complete,
    Cancelled,
    Failed,
}

/// Mutable state of one extraction job, owned by its prep context.
pub struct IntakeJob {
    pub file_name: String,
    pub status: IntakeStatus,
    pub progress: u8,
    pub message: String,
    cancel: CancellationToken,
}

impl IntakeJob {
    pub fn new(file_name: String) -> Self {
        Self {
            file_name,
            status: IntakeStatus::Processing,
            progress: 0,
            message: "Queued for processing...".to_string(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn request_cancel(&mut self) {
        self.cancel.cancel();
        self.status = IntakeStatus::Cancelled;
        self.message = "Processing cancelled".to_string();
    }
}

/// Rejects uploads that are not resume documents or exceed the size cap.
pub fn validate_upload(file_name: &str, size: usize) -> Result<(), AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(
            "Please upload a PDF or Word document".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > MAX_RESUME_BYTES {
        return Err(AppError::Validation(
            "Please upload a file smaller than 5MB".to_string(),
        ));
    }
    Ok(())
}

/// Runs the mocked extraction in the background, updating the context's
/// intake job after each step and committing the profile at the end.
/// Cancellation wins over a pending step; a cancelled job never writes a
/// profile.
pub fn spawn_extraction(
    context: Arc<RwLock<PrepContext>>,
    step_delay: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for (progress, message) in EXTRACTION_STEPS {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("resume extraction cancelled");
                    return;
                }
                _ = tokio::time::sleep(step_delay) => {}
            }
            let mut guard = context.write().await;
            match guard.intake.as_mut() {
                Some(job) if job.status == IntakeStatus::Processing => {
                    job.progress = *progress;
                    job.message = message.to_string();
                }
                // Job cancelled or replaced while we slept.
                _ => return,
            }
        }

        let profile = mock_extracted_profile();
        let mut guard = context.write().await;
        let Some(job) = guard.intake.as_mut() else {
            return;
        };
        if job.status != IntakeStatus::Processing {
            return;
        }
        match profile.validate() {
            Ok(()) => {
                job.status = IntakeStatus::Complete;
                guard.profile = Some(profile);
                info!("resume extraction complete");
            }
            Err(e) => {
                job.status = IntakeStatus::Failed;
                job.message = e.to_string();
            }
        }
    })
}
