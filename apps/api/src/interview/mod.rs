//! The interview progression engine: question selection, outcome tracking
//! and the evaluation round-trip.

pub mod evaluator;
pub mod handlers;
pub mod report;
pub mod selection;
pub mod session;
pub mod timer;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::bank::QuestionBank;
use crate::errors::AppError;
use crate::interview::evaluator::AnswerEvaluator;
use crate::interview::session::{SessionState, SubmissionOutcome};

/// Drives one session at a time through the submit/evaluate/advance loop.
/// The evaluator is the only suspending operation; the session lock is
/// released while it runs so the clock keeps ticking, and the in-flight flag
/// inside `SessionState` keeps concurrent submissions out.
pub struct InterviewEngine {
    bank: Arc<QuestionBank>,
    evaluator: Arc<dyn AnswerEvaluator>,
    max_answer_chars: usize,
}

impl InterviewEngine {
    pub fn new(
        bank: Arc<QuestionBank>,
        evaluator: Arc<dyn AnswerEvaluator>,
        max_answer_chars: usize,
    ) -> Self {
        Self {
            bank,
            evaluator,
            max_answer_chars,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn backend(&self) -> &'static str {
        self.evaluator.backend()
    }

    pub fn start_session(&self, stage: u8) -> Result<SessionState, AppError> {
        let session = SessionState::start(&self.bank, stage)?;
        info!(
            stage,
            total = session.total_questions,
            completed = session.completed,
            "interview session started"
        );
        Ok(session)
    }

    /// Submits an answer for the currently-presented question. Holds the
    /// session lock only to claim the submission and to apply the verdict,
    /// never across the evaluator call.
    pub async fn submit_answer(
        &self,
        session: &RwLock<SessionState>,
        text: &str,
    ) -> Result<SubmissionOutcome, AppError> {
        let (question, answer) = {
            let mut guard = session.write().await;
            guard.begin_submission(text, self.max_answer_chars)?
        };

        let verdict = self.evaluator.evaluate(&question, &answer).await;

        let mut guard = session.write().await;
        match verdict {
            Ok(v) => {
                let outcome = guard.resolve(&self.bank, v.correct)?;
                info!(
                    question_id = %question.id,
                    correct = outcome.correct,
                    score = outcome.score,
                    completed = outcome.completed,
                    "answer resolved"
                );
                Ok(outcome)
            }
            Err(e) => {
                guard.abort_submission();
                Err(AppError::EvaluationTransient(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use crate::interview::evaluator::{EvalError, Verdict};
    use crate::models::question::Question;

    struct FixedEvaluator {
        correct: bool,
        delay: Duration,
    }

    #[async_trait]
    impl AnswerEvaluator for FixedEvaluator {
        async fn evaluate(&self, _q: &Question, _a: &str) -> Result<Verdict, EvalError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(Verdict {
                correct: self.correct,
            })
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct BrokenEvaluator;

    #[async_trait]
    impl AnswerEvaluator for BrokenEvaluator {
        async fn evaluate(&self, _q: &Question, _a: &str) -> Result<Verdict, EvalError> {
            Err(EvalError::Unreachable("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    fn engine(evaluator: Arc<dyn AnswerEvaluator>) -> Arc<InterviewEngine> {
        Arc::new(InterviewEngine::new(
            Arc::new(QuestionBank::default()),
            evaluator,
            10_000,
        ))
    }

    #[tokio::test]
    async fn test_full_stage_completes_through_engine() {
        let engine = engine(Arc::new(FixedEvaluator {
            correct: true,
            delay: Duration::ZERO,
        }));
        let session = RwLock::new(engine.start_session(1).unwrap());
        let mut last = None;
        for _ in 0..4 {
            last = Some(engine.submit_answer(&session, "good answer").await.unwrap());
        }
        let last = last.unwrap();
        assert!(last.completed);
        assert_eq!(last.score, 4);
        assert!(last.result.is_some());
        assert!(last.next_question.is_none());
    }

    #[tokio::test]
    async fn test_transient_failure_preserves_pending_answer() {
        let engine = engine(Arc::new(BrokenEvaluator));
        let session = RwLock::new(engine.start_session(1).unwrap());
        let err = engine
            .submit_answer(&session, "my careful answer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EvaluationTransient(_)));

        let guard = session.read().await;
        assert_eq!(guard.current_answer, "my careful answer");
        assert_eq!(guard.score, 0);
        assert!(guard.incorrect.is_empty());
        assert!(!guard.is_evaluating());
        assert_eq!(guard.current_question.as_ref().unwrap().id, "hr_1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submission_is_rejected_while_in_flight() {
        let engine = engine(Arc::new(FixedEvaluator {
            correct: true,
            delay: Duration::from_secs(5),
        }));
        let session = Arc::new(RwLock::new(engine.start_session(1).unwrap()));

        let bg_engine = engine.clone();
        let bg_session = session.clone();
        let first = tokio::spawn(async move {
            bg_engine.submit_answer(&bg_session, "slow first answer").await
        });

        // Let the first submission claim the in-flight slot and park in the
        // evaluator.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let err = engine
            .submit_answer(&session, "eager second answer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EvaluationInFlight));

        let outcome = first.await.unwrap().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);
    }
}
