use crate::error::{Error, Result};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Settings baked in at build time, see build.rs.
#[derive(Clone, PartialEq)]
pub struct Config {
    api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Config {
    pub fn new(api_key: Option<&str>, model: Option<&str>, endpoint: Option<&str>) -> Self {
        Config {
            api_key: non_empty(api_key).map(String::from),
            model: non_empty(model).unwrap_or(DEFAULT_MODEL).to_string(),
            endpoint: non_empty(endpoint)
                .unwrap_or(DEFAULT_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Config::new(
            option_env!("GEMINI_API_KEY"),
            option_env!("GEMINI_MODEL"),
            option_env!("GEMINI_ENDPOINT"),
        )
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_when_unset() {
        let config = Config::new(None, None, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_key(), Err(Error::MissingApiKey));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::new(Some("  "), Some(""), Some(" "));
        assert_eq!(config, Config::new(None, None, None));
    }

    #[test]
    fn values_are_trimmed() {
        let config = Config::new(Some(" k \n"), Some(" gemini-x "), Some(" http://h/ "));
        assert_eq!(config.api_key(), Ok("k"));
        assert_eq!(config.model, "gemini-x");
        assert_eq!(config.endpoint, "http://h");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::new(Some("secret-key"), None, None);
        assert!(!format!("{:?}", config).contains("secret-key"));
    }

    #[test]
    fn url_names_the_model() {
        let config = Config::new(Some("k"), Some("gemini-2.0-flash"), Some("http://localhost:8080/"));
        assert_eq!(config.api_key(), Ok("k"));
        assert_eq!(
            config.generate_content_url(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
