use serde::{Deserialize, Serialize};

/// One role-tagged message in a chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Errors from the external text-generation service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// The seam between the dispatcher and the external service, so tests can
/// substitute a stub. One synchronous call, no retry, no internal timeout.
pub trait AnalysisClient {
    fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ClientError>;
}

/// Client for an Ollama-compatible `/api/chat` endpoint.
pub struct OllamaClient {
    base_url: String,
    agent: ureq::Agent,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new(),
        }
    }
}

impl AnalysisClient for OllamaClient {
    fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ClientError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        let response = match self
            .agent
            .post(&url)
            .set("content-type", "application/json")
            .send_string(&payload.to_string())
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                return Err(ClientError::Status {
                    status,
                    body: resp.into_string().unwrap_or_default(),
                });
            }
            Err(err) => return Err(ClientError::Transport(err.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let reply: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Malformed(e.to_string()))?;
        reply["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ClientError::Malformed("reply has no message.content".to_string()))
    }
}
