//! Results reporting: performance tiering and practice recommendations
//! derived from a completed session's result snapshot.

use serde::Serialize;

use crate::bank::{stage_name, MAX_STAGE};
use crate::interview::session::SessionResult;

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub percentage: u32,
    pub level: &'static str,
    pub stage_name: &'static str,
    pub recommendations: Vec<String>,
}

pub fn summarize(result: &SessionResult) -> PerformanceSummary {
    let percentage = score_percentage(result.score, result.total_questions);
    PerformanceSummary {
        percentage,
        level: performance_level(percentage),
        stage_name: stage_name(result.stage),
        recommendations: recommendations(percentage, result.stage),
    }
}

/// A session against an empty bank completes with nothing demonstrated, so
/// it reports 0%, not a perfect run.
fn score_percentage(score: u32, total_questions: usize) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    ((score as f64 / total_questions as f64) * 100.0).round() as u32
}

fn performance_level(percentage: u32) -> &'static str {
    match percentage {
        90.. => "Excellent",
        75..=89 => "Good",
        60..=74 => "Average",
        _ => "Needs Improvement",
    }
}

fn recommendations(percentage: u32, stage: u8) -> Vec<String> {
    let mut recommendations = Vec::new();

    if percentage < 60 {
        recommendations.push("Review fundamental concepts for this stage".to_string());
        recommendations
            .push("Practice with similar questions before moving to next level".to_string());
    } else if percentage < 80 {
        recommendations.push("Good progress! Focus on areas where you struggled".to_string());
        recommendations.push("Consider reviewing advanced topics for this stage".to_string());
    } else {
        recommendations.push("Excellent performance! You're ready for the next level".to_string());
        recommendations
            .push("Consider challenging yourself with higher difficulty stages".to_string());
    }

    if stage < MAX_STAGE {
        recommendations.push(format!(
            "Consider attempting Stage {} when ready",
            stage + 1
        ));
    }

    recommendations
}
