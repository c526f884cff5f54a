// src/db/store.rs

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::filter::Filter,
    models::{
        chat::{ChatMessage, ChatRole, ChatSettings},
        Collection,
    },
};

/// Armazenamento de documentos JSON, uma coleção por entidade.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Próximo valor do contador da coleção (1, 2, 3...)
    async fn next_sequence(&self, collection: Collection) -> Result<i64, AppError>;

    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> Result<(), AppError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, AppError>;

    /// Substitui o documento; `false` se ele não existe.
    async fn replace(&self, collection: Collection, id: Uuid, doc: Value) -> Result<bool, AppError>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;

    /// Documentos que satisfazem o filtro, em ordem de criação.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, AppError>;
}

/// Histórico das conversas e configurações do assistente.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn append_message(
        &self,
        session_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, AppError>;

    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, AppError>;

    async fn get_settings(&self) -> Result<ChatSettings, AppError>;

    async fn save_settings(&self, settings: &ChatSettings) -> Result<ChatSettings, AppError>;
}
