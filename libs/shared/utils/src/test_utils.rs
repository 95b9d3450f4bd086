use chrono::NaiveDate;
use serde_json::json;

use shared_config::AppConfig;

use crate::clock::{Clock, FixedClock, ManualClock};

pub struct TestConfig {
    pub advice_api_key: String,
    pub advice_base_url: String,
    pub roster_seed: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            advice_api_key: "test-openai-key".to_string(),
            advice_base_url: "http://localhost:54321".to_string(),
            roster_seed: 42,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            advice_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            advice_api_key: String::new(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            advice_api_key: self.advice_api_key.clone(),
            advice_base_url: self.advice_base_url.clone(),
            roster_seed: Some(self.roster_seed),
            ..AppConfig::default()
        }
    }
}

/// Monday 4 August 2025: the two-week booking horizon from here covers
/// the 12th and 13th as well as two weekends.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).unwrap_or_default()
}

pub fn test_clock() -> FixedClock {
    FixedClock::on(test_today())
}

/// Starts at the same instant as `test_clock` but can be moved forward.
pub fn test_manual_clock() -> ManualClock {
    ManualClock::new(test_clock().now())
}

pub struct MockAdviceResponses;

impl MockAdviceResponses {
    pub fn chat_completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    pub fn malformed() -> serde_json::Value {
        json!({ "choices": [] })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
