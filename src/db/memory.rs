// src/db/memory.rs
//
// Armazenamento em memória: usado nos testes e quando DATABASE_URL não está
// definida. Nada sobrevive a um reinício.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        filter::Filter,
        store::{ChatStore, DocumentStore},
    },
    models::{
        chat::{ChatMessage, ChatRole, ChatSettings},
        Collection,
    },
};

fn poisoned() -> AppError {
    AppError::InternalServerError(anyhow!("verrou du stockage en mémoire empoisonné"))
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    // Vec para manter a ordem de inserção, como o ORDER BY created_at do Postgres
    collections: RwLock<HashMap<Collection, Vec<(Uuid, Value)>>>,
    sequences: RwLock<HashMap<Collection, i64>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn next_sequence(&self, collection: Collection) -> Result<i64, AppError> {
        let mut sequences = self.sequences.write().map_err(|_| poisoned())?;
        let seq = sequences.entry(collection).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> Result<(), AppError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let docs = collections.entry(collection).or_default();
        if docs.iter().any(|(existing, _)| *existing == id) {
            return Err(AppError::Conflict(format!(
                "Le document {id} existe déjà dans {collection}"
            )));
        }
        docs.push((id, doc));
        Ok(())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, AppError> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|(existing, _)| *existing == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn replace(&self, collection: Collection, id: Uuid, doc: Value) -> Result<bool, AppError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let slot = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| *existing == id));

        match slot {
            Some((_, current)) => {
                *current = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(existing, _)| *existing != id);
        Ok(docs.len() != before)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, AppError> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryChatStore {
    messages: RwLock<Vec<ChatMessage>>,
    settings: RwLock<Option<ChatSettings>>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn append_message(
        &self,
        session_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, AppError> {
        let message = ChatMessage {
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.messages.write().map_err(|_| poisoned())?.push(message.clone());
        Ok(message)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        let messages = self.messages.read().map_err(|_| poisoned())?;
        Ok(messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn get_settings(&self) -> Result<ChatSettings, AppError> {
        let settings = self.settings.read().map_err(|_| poisoned())?;
        Ok(settings.clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: &ChatSettings) -> Result<ChatSettings, AppError> {
        let mut saved = settings.clone();
        saved.updated_at = Some(Utc::now());
        *self.settings.write().map_err(|_| poisoned())? = Some(saved.clone());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn sequences_are_per_collection() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.next_sequence(Collection::Artistes).await.unwrap(), 1);
        assert_eq!(store.next_sequence(Collection::Artistes).await.unwrap(), 2);
        assert_eq!(store.next_sequence(Collection::Ventes).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_keeps_insertion_order_and_limit() {
        let store = MemoryDocumentStore::new();
        for nom in ["Alice", "Bruno", "Alicia"] {
            store
                .insert(Collection::Clients, Uuid::new_v4(), json!({ "nom": nom }))
                .await
                .unwrap();
        }

        let filter = Filter::Contains { field: "nom", needle: "ali".into() };
        let found = store.find(Collection::Clients, &filter, None).await.unwrap();
        let names: Vec<_> = found.iter().map(|d| d["nom"].as_str().unwrap()).collect();
        assert_eq!(names, ["Alice", "Alicia"]);

        let limited = store.find(Collection::Clients, &Filter::All, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_documents() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();
        assert!(!store.replace(Collection::Budget, id, json!({})).await.unwrap());

        store.insert(Collection::Budget, id, json!({ "montant": 1.0 })).await.unwrap();
        assert!(store.replace(Collection::Budget, id, json!({ "montant": 2.0 })).await.unwrap());
        assert_eq!(store.get(Collection::Budget, id).await.unwrap(), Some(json!({ "montant": 2.0 })));

        assert!(store.delete(Collection::Budget, id).await.unwrap());
        assert!(!store.delete(Collection::Budget, id).await.unwrap());
    }

    #[tokio::test]
    async fn chat_history_is_scoped_to_the_session() {
        let store = MemoryChatStore::new();
        store.append_message("s1", ChatRole::User, "Bonjour").await.unwrap();
        store.append_message("s2", ChatRole::User, "Autre").await.unwrap();
        store.append_message("s1", ChatRole::Assistant, "Salut").await.unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
    }
}
