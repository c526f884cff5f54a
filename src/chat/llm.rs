// src/chat/llm.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

/// Modelo de linguagem que completa uma conversa de um turno.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaReply,
}

#[derive(Debug, Deserialize)]
struct OllamaReply {
    content: String,
}

/// Cliente do endpoint `/api/chat` de uma instância local do Ollama.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AppError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChatRequest {
            model: &self.model,
            messages: vec![
                OllamaMessage { role: "system", content: system },
                OllamaMessage { role: "user", content: user },
            ],
            stream: false,
        };

        tracing::debug!("Chamando o modelo {} em {}", self.model, url);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::LanguageModel(format!("Ollama injoignable à {}: {}", self.base_url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LanguageModel(format!("Ollama a répondu {status}: {text}")));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LanguageModel(format!("Réponse Ollama invalide: {e}")))?;

        Ok(parsed.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_system_and_user_messages_without_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "mistral-nemo:latest",
                "stream": false,
                "messages": [
                    { "role": "system", "content": "contexte" },
                    { "role": "user", "content": "Bonjour ?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral-nemo:latest",
                "message": { "role": "assistant", "content": "Bonjour !" },
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            OllamaClient::new(&server.uri(), "mistral-nemo:latest", Duration::from_secs(5)).unwrap();
        let answer = client.complete("contexte", "Bonjour ?").await.unwrap();

        assert_eq!(answer, "Bonjour !");
    }

    #[tokio::test]
    async fn server_errors_become_language_model_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not found"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), "absent", Duration::from_secs(5)).unwrap();
        let err = client.complete("s", "u").await.unwrap_err();

        assert!(matches!(err, AppError::LanguageModel(msg) if msg.contains("model not found")));
    }
}
