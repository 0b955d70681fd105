use crate::agents::ChatMessage;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shown in place of a reply when a 2xx response carries neither a
/// `reply` field nor a usable `choices` entry.
pub const MISSING_REPLY_FALLBACK: &str = "Sorry—no response was returned.";

#[derive(Debug, Serialize)]
struct WorkerRequest {
    messages: Vec<WorkerMessage>,
}

#[derive(Debug, Serialize)]
struct WorkerMessage {
    role: String,
    content: String,
}

/// The worker answers either with a bare `{ "reply": … }` or with an
/// OpenAI-style `choices` array; both shapes are accepted.
#[derive(Debug, Deserialize)]
struct WorkerResponse {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    choices: Vec<WorkerChoice>,
}

/// `message` may be absent or null in a malformed choice; that still
/// counts as "no usable reply", not as a parse error.
#[derive(Debug, Deserialize)]
struct WorkerChoice {
    #[serde(default)]
    message: Option<WorkerChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct WorkerChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for the completion relay. The relay holds the model
/// credentials; this side only ever posts a message list.
#[derive(Debug, Clone)]
pub struct WorkerClient {
    client: Client,
    url: String,
}

impl WorkerClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            url: url.into(),
        })
    }

    /// Sends one turn request and returns the reply text. Errors carry
    /// the raw response body so upstream failures stay diagnosable from
    /// the transcript.
    pub fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = WorkerRequest {
            messages: convert_messages(messages),
        };
        let response = self.client.post(&self.url).json(&request).send()?;
        let status = response.status();
        let raw = response.text()?;
        parse_reply(status, &raw)
    }
}

fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()?)
}

fn convert_messages(messages: &[ChatMessage]) -> Vec<WorkerMessage> {
    messages
        .iter()
        .map(|msg| WorkerMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        })
        .collect()
}

/// Turns a raw worker response into a reply. Status and body are read
/// before parsing so a non-2xx or non-JSON body survives verbatim in
/// the error message.
fn parse_reply(status: StatusCode, raw: &str) -> Result<String> {
    if !status.is_success() {
        return Err(eyre!("Worker HTTP {}: {}", status.as_u16(), raw));
    }
    let payload: WorkerResponse =
        serde_json::from_str(raw).map_err(|_| eyre!("Non-JSON from worker: {}", raw))?;
    Ok(payload
        .reply
        .or_else(|| {
            payload
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.and_then(|message| message.content))
        })
        .unwrap_or_else(|| MISSING_REPLY_FALLBACK.to_string()))
}
