use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Research provider
    pub sonar_api_key: String,
    pub sonar_base_url: Option<String>,
    pub sonar_model: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // URL verification
    pub verify_budget: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            sonar_api_key: required_env("SONAR_API_KEY"),
            sonar_base_url: env::var("SONAR_BASE_URL").ok(),
            sonar_model: env::var("SONAR_MODEL").unwrap_or_else(|_| "sonar-pro".to_string()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            verify_budget: Duration::from_secs(
                env::var("VERIFY_BUDGET_SECS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("VERIFY_BUDGET_SECS must be a number"),
            ),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
