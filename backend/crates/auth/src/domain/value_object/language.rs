//! Preferred interface language.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[display("en")]
    #[serde(rename = "en")]
    English,
    #[display("ta")]
    #[serde(rename = "ta")]
    Tamil,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim() {
            "en" => Ok(Language::English),
            "ta" => Ok(Language::Tamil),
            other => Err(AppError::bad_request(format!(
                "Unsupported language '{other}'"
            ))
            .with_action("Use 'en' or 'ta'")),
        }
    }

    /// Lenient read of a stored code; unknown values fall back to English.
    pub fn from_db(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for lang in [Language::English, Language::Tamil] {
            assert_eq!(Language::from_code(lang.code()).unwrap(), lang);
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(Language::from_code("fr").unwrap_err().status_code(), 400);
        assert_eq!(Language::from_db("fr"), Language::English);
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Language::Tamil).unwrap(), "\"ta\"");
    }
}
