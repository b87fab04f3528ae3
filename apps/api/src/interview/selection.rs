//! Question selection policy.
//!
//! Deliberately FIFO in bank order, not difficulty-adaptive: novel questions
//! first, then retries of previously-missed questions only after every novel
//! question is exhausted.

use crate::bank::QuestionBank;
use crate::errors::AppError;
use crate::models::question::Question;

/// Chooses the next question for a session, or `None` when the session has no
/// more work (the caller marks the session completed).
pub fn select_next<'a>(
    bank: &'a QuestionBank,
    stage: u8,
    answered: &[String],
    incorrect: &[String],
) -> Result<Option<&'a Question>, AppError> {
    let questions = bank.questions_for(stage)?;

    if let Some(novel) = questions
        .iter()
        .find(|q| !answered.contains(&q.id) && !incorrect.contains(&q.id))
    {
        return Ok(Some(novel));
    }

    // Retry pass. Ids in `incorrect` that no longer exist in the bank are
    // skipped silently so a mutated bank cannot wedge a session.
    Ok(questions.iter().find(|q| incorrect.contains(&q.id)))
}
