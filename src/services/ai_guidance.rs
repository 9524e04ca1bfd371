use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::Settings;

const GUIDANCE_SYSTEM_PROMPT: &str = "You are an experienced JEE/NEET preparation mentor. \
A student asks for study guidance. You are given their performance summary as context. \
Reply with a short, encouraging, concrete study recommendation in plain text. \
Keep it under 200 words. Do not invent scores that are not in the context.";

// Providers occasionally ignore max_tokens; the insight is a side dish and
// must not dwarf the deterministic payload it rides along with.
const MAX_INSIGHT_CHARS: usize = 2000;

#[derive(Debug, Clone)]
struct Provider {
    name: &'static str,
    api_key: String,
    base_url: String,
    model: String,
}

/// Optional elaboration layer over the deterministic recommender. Providers
/// are tried in order; every failure is logged and swallowed by the caller,
/// never surfaced as a request error.
#[derive(Debug, Clone)]
pub(crate) struct AiGuidanceService {
    client: Client,
    providers: Vec<Provider>,
    max_tokens: u32,
    temperature: f64,
}

impl AiGuidanceService {
    /// Returns `None` when no provider is configured; the guidance endpoint
    /// then stays purely deterministic.
    pub(crate) fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let ai = settings.ai();

        let mut providers = Vec::new();
        if ai.primary.is_configured() {
            providers.push(Provider {
                name: "primary",
                api_key: ai.primary.api_key.clone(),
                base_url: ai.primary.base_url.trim_end_matches('/').to_string(),
                model: ai.primary.model.clone(),
            });
        }
        if ai.secondary.is_configured() {
            providers.push(Provider {
                name: "secondary",
                api_key: ai.secondary.api_key.clone(),
                base_url: ai.secondary.base_url.trim_end_matches('/').to_string(),
                model: ai.secondary.model.clone(),
            });
        }
        if providers.is_empty() {
            return Ok(None);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(ai.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Some(Self { client, providers, max_tokens: ai.max_tokens, temperature: ai.temperature }))
    }

    /// Asks the configured providers, in order, to elaborate on a guidance
    /// summary. Returns the first successful completion.
    pub(crate) async fn elaborate(&self, context_summary: &str) -> Result<String> {
        let timer = Instant::now();
        let mut last_error = None;

        for provider in &self.providers {
            match self.call_provider(provider, context_summary).await {
                Ok(text) => {
                    tracing::info!(
                        provider = provider.name,
                        duration_seconds = timer.elapsed().as_secs_f64(),
                        "AI guidance completed"
                    );
                    return Ok(truncate_chars(text, MAX_INSIGHT_CHARS));
                }
                Err(err) => {
                    tracing::warn!(provider = provider.name, error = %err, "AI provider failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no AI provider configured")))
    }

    async fn call_provider(&self, provider: &Provider, context_summary: &str) -> Result<String> {
        let payload = json!({
            "model": provider.model,
            "messages": [
                {"role": "system", "content": GUIDANCE_SYSTEM_PROMPT},
                {"role": "user", "content": context_summary}
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        });

        let url = format!("{}/chat/completions", provider.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&provider.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to call chat-completions API")?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            anyhow::bail!("chat-completions API error ({status}): {body}");
        }

        let content = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|value| value.as_str())
            .context("Missing chat-completions response content")?;

        Ok(content.trim().to_string())
    }
}

fn truncate_chars(text: String, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text;
    }
    text.chars().take(limit).collect()
}

/// Static template used when every provider fails. The deterministic
/// recommendation still carries the numbers; this only keeps the insight
/// field populated.
pub(crate) fn fallback_insight(focus: &str) -> String {
    format!(
        "Personalised AI insight is temporarily unavailable. Based on your recent results, \
keep working on {focus}: review the fundamentals first, then practice a timed set of \
questions every day and finish the week with a full mock test."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn service_is_absent_without_provider_keys() {
        let _guard = test_support::env_lock();
        test_support::set_test_env();
        std::env::remove_var("AI_PRIMARY_API_KEY");
        std::env::remove_var("AI_SECONDARY_API_KEY");

        let settings = Settings::load().expect("settings");
        let service = AiGuidanceService::from_settings(&settings).expect("build");

        assert!(service.is_none());
    }

    #[test]
    fn primary_key_enables_the_service() {
        let _guard = test_support::env_lock();
        test_support::set_test_env();
        std::env::set_var("AI_PRIMARY_API_KEY", "sk-test");
        std::env::remove_var("AI_SECONDARY_API_KEY");

        let settings = Settings::load().expect("settings");
        let service = AiGuidanceService::from_settings(&settings).expect("build");

        std::env::remove_var("AI_PRIMARY_API_KEY");
        let service = service.expect("configured");
        assert_eq!(service.providers.len(), 1);
        assert_eq!(service.providers[0].name, "primary");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "αβγδε".repeat(500);
        let truncated = truncate_chars(text, MAX_INSIGHT_CHARS);
        assert_eq!(truncated.chars().count(), MAX_INSIGHT_CHARS);
    }

    #[test]
    fn fallback_insight_mentions_focus_area() {
        let insight = fallback_insight("Mechanics");
        assert!(insight.contains("Mechanics"));
    }
}
