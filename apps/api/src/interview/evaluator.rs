//! Answer evaluation — pluggable, trait-based grader behind the engine.
//!
//! Default: `HeuristicEvaluator` (pure-Rust, deterministic, fully testable).
//! Alternative: `RemoteEvaluator`, which forwards to an external grading
//! service (e.g. an LLM-backed one) without the engine noticing the swap.
//!
//! `AppState` holds an `Arc<dyn AnswerEvaluator>`, chosen at startup via
//! `GRADER_URL`. Evaluation failures are transient by definition: the engine
//! never converts them into an "incorrect" outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::question::{Question, QuestionType};

/// Correctness verdict for one submitted answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Evaluator unreachable: {0}")]
    Unreachable(String),

    #[error("Evaluator returned an unusable response: {0}")]
    BadResponse(String),
}

/// The evaluator seam. Callers must reject empty submissions before invoking
/// this; implementations may assume a non-empty answer.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, question: &Question, answer: &str) -> Result<Verdict, EvalError>;

    /// Backend label surfaced in logs and responses for transparency.
    fn backend(&self) -> &'static str;
}

/// Deterministic length/keyword heuristic, graded per question type.
pub struct HeuristicEvaluator {
    hr_min_chars: usize,
    technical_min_chars: usize,
    coding_keywords: Vec<String>,
}

impl HeuristicEvaluator {
    pub fn new(config: &Config) -> Self {
        Self {
            hr_min_chars: config.hr_min_chars,
            technical_min_chars: config.technical_min_chars,
            coding_keywords: config.coding_keywords.clone(),
        }
    }

    fn grade(&self, question: &Question, answer: &str) -> bool {
        let normalized = answer.trim().to_lowercase();
        match question.question_type {
            QuestionType::Hr | QuestionType::Behavioral => {
                normalized.chars().count() > self.hr_min_chars
            }
            QuestionType::Technical => {
                let keyword = question.category.to_lowercase();
                normalized.contains(&keyword)
                    || normalized.chars().count() > self.technical_min_chars
            }
            QuestionType::Coding => self
                .coding_keywords
                .iter()
                .any(|kw| normalized.contains(kw)),
        }
    }
}

#[async_trait]
impl AnswerEvaluator for HeuristicEvaluator {
    async fn evaluate(&self, question: &Question, answer: &str) -> Result<Verdict, EvalError> {
        let correct = self.grade(question, answer);
        debug!(
            question_id = %question.id,
            correct,
            "heuristic evaluation"
        );
        Ok(Verdict { correct })
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

#[derive(Serialize)]
struct GradeRequest<'a> {
    question: &'a Question,
    answer: &'a str,
}

/// Remote grading service client. Any transport failure, timeout, or non-2xx
/// status is reported as transient so the caller preserves the pending answer
/// and lets the user resubmit.
pub struct RemoteEvaluator {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteEvaluator {
    pub fn new(endpoint: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AnswerEvaluator for RemoteEvaluator {
    async fn evaluate(&self, question: &Question, answer: &str) -> Result<Verdict, EvalError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GradeRequest { question, answer })
            .send()
            .await
            .map_err(|e| EvalError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvalError::Unreachable(format!(
                "grader returned status {status}"
            )));
        }

        response
            .json::<Verdict>()
            .await
            .map_err(|e| EvalError::BadResponse(e.to_string()))
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
