use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every knob has a default so the service runs with no environment at all;
/// `.env` is honored when present.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Minimum normalized answer length for HR and behavioral questions.
    pub hr_min_chars: usize,
    /// Minimum normalized answer length for technical questions (the fallback
    /// when the category keyword is absent).
    pub technical_min_chars: usize,
    /// Keywords any one of which makes a coding answer acceptable.
    pub coding_keywords: Vec<String>,
    /// Hard cap on submitted answer length, in characters.
    pub max_answer_chars: usize,
    /// When set, answers are graded by the remote service at this URL instead
    /// of the built-in heuristic.
    pub grader_url: Option<String>,
    pub grader_timeout_secs: u64,
    /// Pacing of the mock resume-extraction steps, in milliseconds.
    pub intake_step_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            hr_min_chars: env_or("HR_MIN_CHARS", 50usize)?,
            technical_min_chars: env_or("TECHNICAL_MIN_CHARS", 100usize)?,
            coding_keywords: std::env::var("CODING_KEYWORDS")
                .unwrap_or_else(|_| "function,algorithm,complexity,solution".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            max_answer_chars: env_or("MAX_ANSWER_CHARS", 10_000usize)?,
            grader_url: std::env::var("GRADER_URL").ok().filter(|s| !s.is_empty()),
            grader_timeout_secs: env_or("GRADER_TIMEOUT_SECS", 30u64)?,
            intake_step_ms: env_or("INTAKE_STEP_MS", 800u64)?,
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_defaults_on_unset_key() {
        // Keys chosen to never exist in a real environment, so the test does
        // not depend on the process environment.
        assert_eq!(env_or("PREPDECK_TEST_UNSET_HR_MIN", 50usize).unwrap(), 50);
        assert_eq!(env_or("PREPDECK_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);
    }

    #[test]
    fn test_env_or_parses_and_rejects_garbage() {
        std::env::set_var("PREPDECK_TEST_PARSE_OK", "17");
        assert_eq!(env_or("PREPDECK_TEST_PARSE_OK", 3usize).unwrap(), 17);

        std::env::set_var("PREPDECK_TEST_PARSE_BAD", "not-a-number");
        assert!(env_or("PREPDECK_TEST_PARSE_BAD", 3usize).is_err());
    }

    #[test]
    fn test_default_coding_keywords() {
        std::env::remove_var("CODING_KEYWORDS");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.coding_keywords,
            vec!["function", "algorithm", "complexity", "solution"]
        );
    }
}
