// src/models/chat.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::collection::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub session_id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendMessagePayload {
    pub role: ChatRole,
    pub content: String,
}

// --- Preferências de apresentação ---

/// Natureza dos dados, deduzida do primeiro registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Numerical,
    Temporal,
    Textual,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    List,
    Table,
    Chart,
    Timeline,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Documento único com as configurações do assistente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettings {
    // Responde só com os dados da base, sem passar pelo modelo de linguagem
    #[serde(default)]
    pub force_database_mode: bool,

    #[serde(default)]
    pub format_preferences: BTreeMap<DataKind, DisplayFormat>,

    #[serde(default)]
    pub detail_level: DetailLevel,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            force_database_mode: false,
            format_preferences: BTreeMap::new(),
            detail_level: DetailLevel::Medium,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChatSettingsRequest {
    pub force_database_mode: Option<bool>,
    pub format_preferences: Option<BTreeMap<DataKind, DisplayFormat>>,
    pub detail_level: Option<DetailLevel>,
}

// --- Turno de conversa ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub session_id: String,

    // Coleções ativas no front; vazio = todas
    #[serde(default)]
    pub collections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResults {
    pub collection: Collection,

    #[schema(value_type = Vec<Object>)]
    pub documents: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub db_results: Vec<CollectionResults>,
    pub collections: Vec<Collection>,
}

/// Eventos enviados pelo socket do assistente.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChatEvent {
    Response(ChatReply),
    Error { message: String },
}
