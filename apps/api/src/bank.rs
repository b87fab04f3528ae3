//! Question bank and stage catalog.
//!
//! Static per-stage reference data: an ordered question sequence per stage
//! (1..=6) plus display metadata for the stage picker. The bank is read-only
//! for the lifetime of a session; selection order is bank definition order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::question::{Question, QuestionType};

pub const MIN_STAGE: u8 = 1;
pub const MAX_STAGE: u8 = 6;

pub struct QuestionBank {
    stages: BTreeMap<u8, Vec<Question>>,
}

impl QuestionBank {
    pub fn new(stages: BTreeMap<u8, Vec<Question>>) -> Self {
        Self { stages }
    }

    /// The ordered question sequence for a stage, or `InvalidStage` when the
    /// stage is not a bank key. An existing-but-empty stage is a valid answer
    /// here; callers treat it as a session with no work.
    pub fn questions_for(&self, stage: u8) -> Result<&[Question], AppError> {
        self.stages
            .get(&stage)
            .map(Vec::as_slice)
            .ok_or(AppError::InvalidStage(stage))
    }

    pub fn contains_stage(&self, stage: u8) -> bool {
        self.stages.contains_key(&stage)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        let mut stages = BTreeMap::new();
        stages.insert(
            1,
            vec![
                Question::new(
                    "hr_1",
                    "Tell me about yourself and your background in software development.",
                    QuestionType::Hr,
                    1,
                    "Introduction",
                    &["Focus on your education, key experiences, and what drives you in tech"],
                ),
                Question::new(
                    "hr_2",
                    "Why are you interested in this role and our company?",
                    QuestionType::Hr,
                    1,
                    "Motivation",
                    &["Research the company, mention specific projects or values that attract you"],
                ),
                Question::new(
                    "tech_basic_1",
                    "What is the difference between let, const, and var in JavaScript?",
                    QuestionType::Technical,
                    1,
                    "JavaScript Fundamentals",
                    &["Think about scope, hoisting, and reassignment"],
                ),
                Question::new(
                    "tech_basic_2",
                    "Explain what REST API is and its principles.",
                    QuestionType::Technical,
                    1,
                    "Web Development",
                    &["Consider HTTP methods, statelessness, and resource-based URLs"],
                ),
            ],
        );
        stages.insert(
            2,
            vec![
                Question::new(
                    "tech_int_1",
                    "Based on your resume, you worked with React. Can you explain the React component lifecycle?",
                    QuestionType::Technical,
                    2,
                    "React",
                    &["Think about mounting, updating, and unmounting phases"],
                ),
                Question::new(
                    "tech_int_2",
                    "You mentioned using Node.js in your projects. How does Node.js handle asynchronous operations?",
                    QuestionType::Technical,
                    2,
                    "Node.js",
                    &["Consider event loop, callbacks, promises, and async/await"],
                ),
                Question::new(
                    "tech_int_3",
                    "Describe a challenging project from your resume and how you solved technical difficulties.",
                    QuestionType::Behavioral,
                    2,
                    "Problem Solving",
                    &["Use STAR method: Situation, Task, Action, Result"],
                ),
            ],
        );
        stages.insert(
            3,
            vec![
                Question::new(
                    "coding_1",
                    "Write a function to find the two numbers in an array that add up to a target sum. Optimize for time complexity.",
                    QuestionType::Coding,
                    3,
                    "Algorithms",
                    &["Consider using a hash map for O(n) solution"],
                ),
                Question::new(
                    "system_1",
                    "Design a URL shortening service like bit.ly. Consider scalability and performance.",
                    QuestionType::Technical,
                    3,
                    "System Design",
                    &["Think about database design, caching, load balancing"],
                ),
                Question::new(
                    "coding_2",
                    "Implement a debounce function in JavaScript. Explain when you would use it.",
                    QuestionType::Coding,
                    3,
                    "JavaScript",
                    &["Consider setTimeout, closure, and performance optimization"],
                ),
            ],
        );
        // Content for the locked tiers has not been authored yet; the stages
        // exist so a session against them completes immediately with score 0.
        for stage in 4..=MAX_STAGE {
            stages.insert(stage, Vec::new());
        }
        Self::new(stages)
    }
}

/// Display metadata for one stage of the picker.
#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    pub id: u8,
    pub name: &'static str,
    pub difficulty: &'static str,
    pub duration: &'static str,
    pub questions: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
    pub unlocked: bool,
}

pub const STAGE_CATALOG: &[StageInfo] = &[
    StageInfo {
        id: 1,
        name: "Basic",
        difficulty: "Beginner",
        duration: "15-20 min",
        questions: "10-12 questions",
        description: "HR fundamentals and basic technical concepts",
        topics: &[
            "Introduction",
            "Behavioral questions",
            "Basic CS concepts",
            "Communication skills",
        ],
        unlocked: true,
    },
    StageInfo {
        id: 2,
        name: "Intermediate",
        difficulty: "Intermediate",
        duration: "25-30 min",
        questions: "12-15 questions",
        description: "Resume-based questions and technical reasoning",
        topics: &[
            "Experience deep-dive",
            "Technical problem solving",
            "Project discussions",
            "Architecture basics",
        ],
        unlocked: true,
    },
    StageInfo {
        id: 3,
        name: "Professional",
        difficulty: "Advanced",
        duration: "35-45 min",
        questions: "15-18 questions",
        description: "Advanced coding and system design challenges",
        topics: &[
            "Live coding",
            "System design",
            "Performance optimization",
            "Best practices",
        ],
        unlocked: true,
    },
    StageInfo {
        id: 4,
        name: "Expert",
        difficulty: "Expert",
        duration: "45-60 min",
        questions: "18-22 questions",
        description: "Complex algorithms and distributed systems",
        topics: &[
            "Advanced algorithms",
            "Distributed systems",
            "Scalability",
            "Trade-offs",
        ],
        unlocked: false,
    },
    StageInfo {
        id: 5,
        name: "Senior",
        difficulty: "Senior",
        duration: "50-70 min",
        questions: "20-25 questions",
        description: "Leadership scenarios and strategic thinking",
        topics: &[
            "Technical leadership",
            "Team management",
            "Strategic decisions",
            "Mentoring",
        ],
        unlocked: false,
    },
    StageInfo {
        id: 6,
        name: "Principal",
        difficulty: "Principal",
        duration: "60-90 min",
        questions: "25-30 questions",
        description: "Industry expertise and innovation challenges",
        topics: &[
            "Industry vision",
            "Technology strategy",
            "Innovation",
            "Cross-team collaboration",
        ],
        unlocked: false,
    },
];

pub fn stage_info(stage: u8) -> Option<&'static StageInfo> {
    STAGE_CATALOG.iter().find(|s| s.id == stage)
}

pub fn stage_name(stage: u8) -> &'static str {
    stage_info(stage).map(|s| s.name).unwrap_or("Unknown")
}
