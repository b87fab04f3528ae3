//! Per-session progress and outcome tracking.
//!
//! One `SessionState` per interview attempt, exclusively owned by its
//! session's lock. Transitions:
//! awaiting question → presenting → submitting → (correct | incorrect) →
//! awaiting question | completed. There is no skip or pause.
//!
//! Invariants maintained here:
//! - a question id is never in both `answered` and `incorrect`;
//! - `score == answered.len()` and never decreases;
//! - once `completed`, `current_question` is `None` and outcomes, score and
//!   the clock are frozen.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bank::QuestionBank;
use crate::errors::AppError;
use crate::interview::selection::select_next;
use crate::models::question::Question;

#[derive(Debug)]
pub struct SessionState {
    pub stage: u8,
    pub current_question: Option<Question>,
    /// Ids judged correct, in mastery order.
    pub answered: Vec<String>,
    /// Ids judged incorrect and pending retry.
    pub incorrect: Vec<String>,
    /// In-progress answer buffer; cleared on resolution, preserved on
    /// transient evaluator failure so the user can resubmit.
    pub current_answer: String,
    pub score: u32,
    pub elapsed_secs: u64,
    pub completed: bool,
    pub total_questions: usize,
    /// At-most-one-in-flight evaluation guard.
    evaluating: bool,
}

/// Immutable snapshot handed to the results reporter at completion.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub stage: u8,
    pub score: u32,
    pub elapsed_secs: u64,
    pub total_questions: usize,
    pub incorrect_questions: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// What the engine reports back after one resolved submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub correct: bool,
    pub score: u32,
    pub completed: bool,
    pub next_question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SessionResult>,
}

impl SessionState {
    /// Creates a session for a stage and draws its first question. A valid
    /// stage with an empty bank yields a session that is already completed
    /// with score 0; an unknown stage is a hard `InvalidStage` error and no
    /// session is created.
    pub fn start(bank: &QuestionBank, stage: u8) -> Result<Self, AppError> {
        let total_questions = bank.questions_for(stage)?.len();
        let first = select_next(bank, stage, &[], &[])?.cloned();
        let completed = first.is_none();
        Ok(Self {
            stage,
            current_question: first,
            answered: Vec::new(),
            incorrect: Vec::new(),
            current_answer: String::new(),
            score: 0,
            elapsed_secs: 0,
            completed,
            total_questions,
            evaluating: false,
        })
    }

    /// Validates a submission and claims the in-flight slot. On success the
    /// presented question is snapshotted for the evaluator call; the session
    /// lock can then be released while evaluation runs.
    pub fn begin_submission(
        &mut self,
        text: &str,
        max_answer_chars: usize,
    ) -> Result<(Question, String), AppError> {
        if self.completed {
            return Err(AppError::Validation(
                "Session is already completed".to_string(),
            ));
        }
        if self.evaluating {
            return Err(AppError::EvaluationInFlight);
        }
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter your response before submitting".to_string(),
            ));
        }
        if text.chars().count() > max_answer_chars {
            return Err(AppError::Validation(format!(
                "Answer exceeds the {max_answer_chars}-character limit"
            )));
        }
        let question = self
            .current_question
            .clone()
            .ok_or_else(|| AppError::Validation("No question is currently presented".to_string()))?;

        self.current_answer = text.to_string();
        self.evaluating = true;
        Ok((question, text.to_string()))
    }

    /// Evaluator failed: release the in-flight slot without touching
    /// outcomes. The answer buffer stays so the user can resubmit as-is.
    pub fn abort_submission(&mut self) {
        self.evaluating = false;
    }

    /// Applies a verdict to the in-flight submission, clears the buffer and
    /// advances to the next question (or to completion).
    pub fn resolve(
        &mut self,
        bank: &QuestionBank,
        correct: bool,
    ) -> Result<SubmissionOutcome, AppError> {
        if !self.evaluating {
            return Err(AppError::Internal(anyhow::anyhow!(
                "resolve called without an in-flight submission"
            )));
        }
        let question_id = match &self.current_question {
            Some(q) => q.id.clone(),
            None => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "in-flight submission with no presented question"
                )))
            }
        };

        if correct {
            self.incorrect.retain(|id| id != &question_id);
            if !self.answered.contains(&question_id) {
                self.answered.push(question_id);
                self.score += 1;
            }
        } else if !self.incorrect.contains(&question_id) {
            self.incorrect.push(question_id);
        }

        self.current_answer.clear();
        self.evaluating = false;

        let next = select_next(bank, self.stage, &self.answered, &self.incorrect)?.cloned();
        if next.is_none() {
            self.completed = true;
        }
        self.current_question = next;

        Ok(SubmissionOutcome {
            correct,
            score: self.score,
            completed: self.completed,
            next_question: self.current_question.clone(),
            result: self.completed.then(|| self.result()),
        })
    }

    /// One second of wall time. Applied while the session is active, even
    /// during an in-flight evaluation; frozen after completion.
    pub fn tick(&mut self) {
        if !self.completed {
            self.elapsed_secs += 1;
        }
    }

    pub fn result(&self) -> SessionResult {
        SessionResult {
            stage: self.stage,
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            total_questions: self.total_questions,
            incorrect_questions: self.incorrect.clone(),
            completed_at: Utc::now(),
        }
    }

    /// Share of the bank mastered so far. An empty bank is 0%, consistent
    /// with the results report: completing a stage with no questions
    /// demonstrates nothing.
    pub fn completion_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        ((self.answered.len() as f64 / self.total_questions as f64) * 100.0).round() as u32
    }

    #[cfg(test)]
    pub fn is_evaluating(&self) -> bool {
        self.evaluating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        QuestionBank::default()
    }

    /// begin + resolve in one step, for tests that do not exercise the
    /// in-flight window itself.
    fn submit(session: &mut SessionState, bank: &QuestionBank, correct: bool) -> SubmissionOutcome {
        session
            .begin_submission("a placeholder answer long enough to matter", 10_000)
            .unwrap();
        session.resolve(bank, correct).unwrap()
    }

    #[test]
    fn test_start_presents_first_bank_question() {
        let bank = bank();
        let session = SessionState::start(&bank, 1).unwrap();
        assert_eq!(session.current_question.as_ref().unwrap().id, "hr_1");
        assert_eq!(session.total_questions, 4);
        assert!(!session.completed);
    }

    #[test]
    fn test_invalid_stage_creates_no_session() {
        let bank = bank();
        assert!(matches!(
            SessionState::start(&bank, 99),
            Err(AppError::InvalidStage(99))
        ));
    }

    #[test]
    fn test_empty_bank_stage_completes_immediately_with_zero_score() {
        let bank = bank();
        let session = SessionState::start(&bank, 6).unwrap();
        assert!(session.completed);
        assert_eq!(session.score, 0);
        assert!(session.current_question.is_none());
        // Agrees with the results report: an empty bank is 0%, not a
        // perfect run.
        assert_eq!(session.completion_percent(), 0);
    }

    #[test]
    fn test_completion_percent_tracks_mastery() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        assert_eq!(session.completion_percent(), 0);
        submit(&mut session, &bank, true);
        assert_eq!(session.completion_percent(), 25);
        submit(&mut session, &bank, false);
        assert_eq!(session.completion_percent(), 25);
    }

    #[test]
    fn test_four_correct_answers_complete_stage_one_with_score_four() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        for _ in 0..3 {
            let outcome = submit(&mut session, &bank, true);
            assert!(!outcome.completed);
        }
        let last = submit(&mut session, &bank, true);
        assert!(last.completed);
        assert_eq!(session.score, 4);
        assert!(session.incorrect.is_empty());
        assert!(session.current_question.is_none());
        assert!(last.result.is_some());
    }

    #[test]
    fn test_incorrect_then_retry_reaches_full_score() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        // Miss hr_1, answer the rest, then clear hr_1 on retry.
        let outcome = submit(&mut session, &bank, false);
        assert!(!outcome.correct);
        assert_eq!(session.incorrect, vec!["hr_1"]);
        for _ in 0..3 {
            submit(&mut session, &bank, true);
        }
        // Novel questions exhausted; hr_1 comes back.
        assert_eq!(session.current_question.as_ref().unwrap().id, "hr_1");
        let last = submit(&mut session, &bank, true);
        assert!(last.completed);
        assert_eq!(session.score, 4);
        assert!(session.incorrect.is_empty());
    }

    #[test]
    fn test_repeated_incorrect_is_idempotent() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 2).unwrap();
        submit(&mut session, &bank, false);
        // Answer the remaining novel questions so the miss is re-presented.
        submit(&mut session, &bank, true);
        submit(&mut session, &bank, true);
        assert_eq!(session.current_question.as_ref().unwrap().id, "tech_int_1");
        submit(&mut session, &bank, false);
        assert_eq!(session.incorrect, vec!["tech_int_1"]);
    }

    #[test]
    fn test_answered_and_incorrect_stay_disjoint() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        submit(&mut session, &bank, false);
        submit(&mut session, &bank, true);
        submit(&mut session, &bank, true);
        submit(&mut session, &bank, true);
        // hr_1 retried and now correct: must leave `incorrect`.
        submit(&mut session, &bank, true);
        for id in &session.answered {
            assert!(!session.incorrect.contains(id));
        }
        assert_eq!(session.score as usize, session.answered.len());
    }

    #[test]
    fn test_score_is_monotone_and_tracks_answered() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        let mut last_score = 0;
        let verdicts = [false, true, false, true, true, true, true];
        for &correct in &verdicts {
            if session.completed {
                break;
            }
            submit(&mut session, &bank, correct);
            assert!(session.score >= last_score);
            assert_eq!(session.score as usize, session.answered.len());
            last_score = session.score;
        }
    }

    #[test]
    fn test_empty_answer_rejected_without_state_change() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        let before_id = session.current_question.as_ref().unwrap().id.clone();
        let err = session.begin_submission("   \n ", 10_000).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.current_question.as_ref().unwrap().id, before_id);
        assert_eq!(session.score, 0);
        assert!(!session.is_evaluating());
    }

    #[test]
    fn test_oversized_answer_rejected() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        let huge = "x".repeat(11);
        assert!(matches!(
            session.begin_submission(&huge, 10),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_second_submission_rejected_while_in_flight() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        session.begin_submission("first answer, long enough", 10_000).unwrap();
        assert!(matches!(
            session.begin_submission("second answer", 10_000),
            Err(AppError::EvaluationInFlight)
        ));
    }

    #[test]
    fn test_abort_preserves_buffer_and_releases_slot() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        session.begin_submission("my pending answer", 10_000).unwrap();
        session.abort_submission();
        assert_eq!(session.current_answer, "my pending answer");
        assert!(!session.is_evaluating());
        assert_eq!(session.score, 0);
        assert!(session.incorrect.is_empty());
        // Resubmission goes through.
        assert!(session.begin_submission("my pending answer", 10_000).is_ok());
    }

    #[test]
    fn test_resolution_clears_answer_buffer() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        session.begin_submission("some answer text", 10_000).unwrap();
        session.resolve(&bank, false).unwrap();
        assert!(session.current_answer.is_empty());
    }

    #[test]
    fn test_submission_after_completion_rejected() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 6).unwrap();
        assert!(matches!(
            session.begin_submission("anything", 10_000),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_tick_stops_at_completion() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_secs, 2);
        for _ in 0..4 {
            submit(&mut session, &bank, true);
        }
        assert!(session.completed);
        session.tick();
        assert_eq!(session.elapsed_secs, 2);
    }

    #[test]
    fn test_result_snapshot_fields() {
        let bank = bank();
        let mut session = SessionState::start(&bank, 1).unwrap();
        session.tick();
        submit(&mut session, &bank, false);
        for _ in 0..3 {
            submit(&mut session, &bank, true);
        }
        submit(&mut session, &bank, false); // hr_1 missed again, stays pending
        // Only hr_1 remains; clear it.
        submit(&mut session, &bank, true);
        let result = session.result();
        assert_eq!(result.stage, 1);
        assert_eq!(result.score, 4);
        assert_eq!(result.total_questions, 4);
        assert_eq!(result.elapsed_secs, 1);
        assert!(result.incorrect_questions.is_empty());
    }
}
