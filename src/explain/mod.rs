//! Match explanation generation.
//!
//! Optional enrichment of a ranked match list via a chat-completion
//! backend: either a short per-match reason for the leading matches, or a
//! single overall evaluation of the whole ranking. Both modes degrade
//! silently — a missing key or failed call yields `None`, never an error
//! visible to the API caller.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::GenerationError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockChat;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::index::RecordMetadata;
use crate::profile::{Record, RecordType};
use crate::ranking::Match;

/// Leading matches that get a per-match reason attempt.
pub const DEFAULT_MAX_REASONS: usize = 3;

/// Matches listed in the overall-summary prompt.
const SUMMARY_TOP_N: usize = 5;

const REASON_MAX_TOKENS: u32 = 150;
const SUMMARY_MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.3;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Single-turn chat completion backend.
pub trait ChatBackend: Send + Sync {
    /// Runs one user-prompt completion and returns the trimmed content.
    fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}

#[derive(Debug, Clone)]
/// Chat-completion client for the OpenAI REST endpoint.
pub struct OpenAiChat {
    http: Client,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChat {
    /// Creates a client. The key may be absent; completions then fail
    /// with [`GenerationError::MissingApiKey`], which callers degrade to
    /// "no explanation".
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    /// Whether a key is configured (explanations possible at all).
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatBackend for OpenAiChat {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let payload = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyContent)
    }
}

/// One-line summary of a matched record, built from its hit metadata.
///
/// `record_type` is the type of the SOURCE record; the match always comes
/// from the opposite namespace.
fn match_summary(metadata: &RecordMetadata, record_type: RecordType) -> String {
    let name = metadata.name.as_deref().unwrap_or("");
    let skills = metadata.skills.as_deref().unwrap_or("");
    let position = metadata.position.as_deref().unwrap_or("");
    let location = metadata.location.as_deref().unwrap_or("");

    match record_type {
        RecordType::Jobseeker => {
            format!("求人: {name} | スキル: {skills} | 職種: {position} | 勤務地: {location}")
        }
        RecordType::Job => {
            format!("求職者: {name} | スキル: {skills} | 希望職種: {position} | 希望勤務地: {location}")
        }
    }
}

/// Numbered line for one match in the overall-summary prompt.
fn match_line(metadata: &RecordMetadata, record_type: RecordType, index: usize) -> String {
    let name = metadata.name.as_deref().unwrap_or("");

    match record_type {
        RecordType::Jobseeker => {
            let position = metadata.position.as_deref().unwrap_or("");
            let location = metadata.location.as_deref().unwrap_or("");
            format!("{index}. {name}（{position} · {location}）")
        }
        RecordType::Job => {
            let skills = metadata.skills.as_deref().unwrap_or("");
            format!("{index}. {name}（{skills}）")
        }
    }
}

fn reason_prompt(source_summary: &str, candidate_summary: &str, score: f64) -> String {
    format!(
        "以下はマッチングした2件の情報です。このマッチングが適している理由を1文で述べてください（日本語・50字程度）。理由のみ出力し、敬語は不要です。\n\n【現在のレコード】\n{source_summary}\n\n【マッチした候補】\n{candidate_summary}\n\nマッチングスコア: {score}%\n理由:"
    )
}

fn summary_prompt(source_summary: &str, match_lines: &str) -> String {
    format!(
        "以下は「現在のレコード」と「マッチした候補の一覧」です。このランキング全体を1〜2文で総合評価してください（日本語・80字程度）。求職者なら求人との相性、求人なら候補者との相性を簡潔に述べ、敬語は不要です。\n\n【現在のレコード】\n{source_summary}\n\n【マッチした候補（上位）】\n{match_lines}\n\n総合評価:"
    )
}

/// Attaches a generated reason to each of the first `max_reasons` matches.
///
/// Generation runs strictly sequentially in ranked order. A failed call
/// is logged and leaves that reason `None`; matches past the cap keep
/// `None` without any outbound call.
pub async fn attach_reasons<C: ChatBackend>(
    chat: &C,
    record: &Record,
    record_type: RecordType,
    matches: &mut [Match],
    max_reasons: usize,
) {
    let source_summary = record.summary(record_type);

    for (position, entry) in matches.iter_mut().enumerate() {
        if position >= max_reasons {
            entry.reason = None;
            continue;
        }

        let prompt = reason_prompt(
            &source_summary,
            &match_summary(&entry.metadata, record_type),
            entry.score,
        );

        entry.reason = match chat.complete(&prompt, REASON_MAX_TOKENS).await {
            Ok(text) => Some(text),
            Err(GenerationError::MissingApiKey) => {
                debug!("OPENAI_API_KEY not set, skipping reason generation");
                None
            }
            Err(err) => {
                warn!(match_id = %entry.id, error = %err, "reason generation failed");
                None
            }
        };
    }
}

/// Generates a single 1–2 sentence evaluation of the whole ranking.
///
/// Returns `None` for an empty match list, a missing key, or any backend
/// failure; the caller treats all three the same way.
pub async fn overall_summary<C: ChatBackend>(
    chat: &C,
    record: &Record,
    record_type: RecordType,
    matches: &[Match],
) -> Option<String> {
    if matches.is_empty() {
        return None;
    }

    let source_summary = record.summary(record_type);
    let match_lines = matches
        .iter()
        .take(SUMMARY_TOP_N)
        .enumerate()
        .map(|(index, entry)| match_line(&entry.metadata, record_type, index + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match chat
        .complete(&summary_prompt(&source_summary, &match_lines), SUMMARY_MAX_TOKENS)
        .await
    {
        Ok(text) => Some(text),
        Err(GenerationError::MissingApiKey) => {
            debug!("OPENAI_API_KEY not set, skipping summary generation");
            None
        }
        Err(err) => {
            warn!(error = %err, "overall summary generation failed");
            None
        }
    }
}
