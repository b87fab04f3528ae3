use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Structured candidate profile produced by resume intake.
/// Validated once at the intake boundary, read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub technologies: Vec<String>,
    pub description: String,
}

impl CandidateProfile {
    /// Boundary validation for intake output. Extraction is mocked today, but
    /// a real parser plugs in here and its output must pass the same checks.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.personal_info.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Profile is missing a candidate name".to_string(),
            ));
        }
        if self.skills.is_empty() {
            return Err(AppError::Validation(
                "Profile must list at least one skill".to_string(),
            ));
        }
        if self
            .experience
            .iter()
            .any(|e| e.company.trim().is_empty() || e.position.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Experience entries must have a company and position".to_string(),
            ));
        }
        Ok(())
    }
}

/// The fixture returned by the mocked extraction pass.
pub fn mock_extracted_profile() -> CandidateProfile {
    CandidateProfile {
        personal_info: PersonalInfo {
            name: "John Doe".to_string(),
            email: "john.doe@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
        },
        skills: [
            "JavaScript",
            "TypeScript",
            "React",
            "Node.js",
            "Python",
            "SQL",
            "MongoDB",
            "AWS",
            "Docker",
            "Git",
            "REST APIs",
            "GraphQL",
            "Redux",
            "Express.js",
            "Jest",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        experience: vec![
            ExperienceEntry {
                company: "Tech Corp".to_string(),
                position: "Senior Software Engineer".to_string(),
                duration: "2021-Present".to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "AWS".to_string(),
                    "TypeScript".to_string(),
                ],
            },
            ExperienceEntry {
                company: "StartupXYZ".to_string(),
                position: "Full Stack Developer".to_string(),
                duration: "2019-2021".to_string(),
                technologies: vec![
                    "JavaScript".to_string(),
                    "Python".to_string(),
                    "MongoDB".to_string(),
                    "Express.js".to_string(),
                ],
            },
        ],
        education: vec![EducationEntry {
            degree: "Bachelor of Science in Computer Science".to_string(),
            institution: "State University".to_string(),
            year: "2019".to_string(),
        }],
        projects: vec![
            ProjectEntry {
                name: "E-commerce Platform".to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "PostgreSQL".to_string(),
                    "Stripe API".to_string(),
                ],
                description: "Built a full-stack e-commerce platform with payment integration"
                    .to_string(),
            },
            ProjectEntry {
                name: "Task Management App".to_string(),
                technologies: vec![
                    "React Native".to_string(),
                    "Firebase".to_string(),
                    "Redux".to_string(),
                ],
                description: "Mobile app for team task management with real-time updates"
                    .to_string(),
            },
        ],
    }
}
