use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use doctor_cell::models::Specialty;
use shared_config::AppConfig;

use crate::models::{AdviceError, AdviceResponse, FALLBACK_CONFIDENCE, MODEL_CONFIDENCE};
use crate::services::guidance::local_guidance;
use crate::services::specialties::extract_specialties;

const SYSTEM_PROMPT: &str = "You are a professional AI health assistant for a healthcare application. Your role is to:

1. Provide helpful, accurate health information and guidance
2. Analyze symptoms and suggest appropriate medical specialties
3. Offer immediate care advice for common health concerns
4. Always recommend professional medical consultation for serious symptoms
5. Maintain a caring, professional, and reassuring tone

Guidelines:
- Keep responses concise but comprehensive (max 500 words)
- Use bullet points and clear formatting
- Include relevant emojis for better readability
- Always include appropriate disclaimers about seeking professional care
- For serious symptoms, emphasize emergency care
- Focus on evidence-based information

Format your response with:
- Brief assessment of the concern
- Immediate care recommendations
- When to seek professional help
- Relevant specialty recommendations (if applicable)

Never provide specific diagnoses or replace professional medical advice.";

const EMPTY_REPLY: &str = "I apologize, but I'm unable to provide a response at this time. Please try again or consult with a healthcare professional.";

const TEMPERATURE: f32 = 0.5;

/// Source of free-text health advice. Implementations never fail: any
/// problem reaching the model degrades to offline topic guidance.
#[async_trait]
pub trait HealthAdvisor: Send + Sync {
    async fn get_health_advice(&self, query: &str, context: &str) -> AdviceResponse;
}

/// Pick the advisor for a configuration: the model-backed client when a key
/// is present, otherwise the static "not configured" fallback.
pub fn advisor_from_config(config: &AppConfig) -> Arc<dyn HealthAdvisor> {
    if config.is_advice_configured() {
        info!("Health advice backed by model {}", config.advice_model);
        Arc::new(OpenAiAdvisor::new(config))
    } else {
        warn!("OPENAI_API_KEY not configured, health advice will use the static fallback");
        Arc::new(FallbackAdvisor::not_configured())
    }
}

pub struct OpenAiAdvisor {
    api_key: String,
    base_url: String,
    model: String,
    configured: bool,
    http_client: Client,
}

impl OpenAiAdvisor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.advice_api_key.clone(),
            base_url: config.advice_base_url.trim_end_matches('/').to_string(),
            model: config.advice_model.clone(),
            configured: config.is_advice_configured(),
            http_client: Client::new(),
        }
    }

    fn build_prompt(query: &str, context: &str) -> String {
        if context.trim().is_empty() {
            query.to_string()
        } else {
            format!("Previous conversation context: {}\n\nCurrent question: {}", context, query)
        }
    }

    async fn try_advice(&self, query: &str, context: &str) -> Result<String, AdviceError> {
        if !self.configured {
            return Err(AdviceError::NotConfigured);
        }

        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::build_prompt(query, context) }
            ],
            "temperature": TEMPERATURE
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(AdviceError::MalformedResponse)?
            .trim();

        if content.is_empty() {
            Ok(EMPTY_REPLY.to_string())
        } else {
            Ok(content.to_string())
        }
    }
}

#[async_trait]
impl HealthAdvisor for OpenAiAdvisor {
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    async fn get_health_advice(&self, query: &str, context: &str) -> AdviceResponse {
        match self.try_advice(query, context).await {
            Ok(message) => {
                debug!("Advice received ({} chars)", message.len());
                let suggested_specialties = extract_specialties(&message);
                AdviceResponse {
                    message,
                    confidence: MODEL_CONFIDENCE,
                    suggested_specialties,
                }
            }
            Err(AdviceError::NotConfigured) => {
                error!("Advice requested but no API key is configured");
                fallback_response(FallbackReason::NotConfigured, query)
            }
            Err(e) => {
                error!("Advice service error: {}", e);
                fallback_response(FallbackReason::TechnicalIssue, query)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NotConfigured,
    TechnicalIssue,
}

/// Advisor that always answers offline.
pub struct FallbackAdvisor {
    reason: FallbackReason,
}

impl FallbackAdvisor {
    pub fn not_configured() -> Self {
        Self {
            reason: FallbackReason::NotConfigured,
        }
    }

    pub fn technical_issue() -> Self {
        Self {
            reason: FallbackReason::TechnicalIssue,
        }
    }
}

#[async_trait]
impl HealthAdvisor for FallbackAdvisor {
    async fn get_health_advice(&self, query: &str, _context: &str) -> AdviceResponse {
        fallback_response(self.reason, query)
    }
}

/// Offline reply: the reason notice, guidance for the query's topic and the
/// disclaimer.
pub fn fallback_response(reason: FallbackReason, query: &str) -> AdviceResponse {
    let notice = match reason {
        FallbackReason::NotConfigured => {
            "\n\n🔧 **Configuration Issue:** The AI service requires an API key to provide personalized responses. Please set OPENAI_API_KEY.\n\n"
        }
        FallbackReason::TechnicalIssue => {
            "\n\n⚠️ **Technical Issue:** I'm experiencing temporary difficulties connecting to the AI service.\n\n"
        }
    };

    let message = format!(
        "Thank you for your question about your health concerns.{}In the meantime, here's some guidance:

{}

**⚠️ Important:** This is general information only. Please consult with a qualified healthcare professional for personalized medical advice.",
        notice,
        local_guidance(query)
    );

    AdviceResponse {
        message,
        confidence: FALLBACK_CONFIDENCE,
        suggested_specialties: vec![Specialty::GeneralPractice],
    }
}
