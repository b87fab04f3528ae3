pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::intake::handlers as intake_handlers;
use crate::intake::MAX_RESUME_BYTES;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume intake
        .route("/api/v1/intake", post(intake_handlers::handle_upload))
        .route(
            "/api/v1/contexts/:id/intake",
            get(intake_handlers::handle_intake_status)
                .delete(intake_handlers::handle_intake_cancel),
        )
        // Stage selection
        .route("/api/v1/stages", get(interview_handlers::handle_get_stages))
        .route(
            "/api/v1/contexts/:id/stage",
            put(interview_handlers::handle_select_stage),
        )
        // Interview session
        .route(
            "/api/v1/contexts/:id/interview",
            post(interview_handlers::handle_start_interview)
                .get(interview_handlers::handle_get_interview),
        )
        .route(
            "/api/v1/contexts/:id/interview/answers",
            post(interview_handlers::handle_submit_answer),
        )
        // Results and flow control
        .route(
            "/api/v1/contexts/:id/results",
            get(interview_handlers::handle_get_results),
        )
        .route(
            "/api/v1/contexts/:id/retry",
            post(interview_handlers::handle_retry),
        )
        .route(
            "/api/v1/contexts/:id/advance",
            post(interview_handlers::handle_advance),
        )
        .route(
            "/api/v1/contexts/:id",
            delete(intake_handlers::handle_delete_context),
        )
        // Uploads may exceed axum's 2MB default body limit.
        .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + 64 * 1024))
        .with_state(state)
}
