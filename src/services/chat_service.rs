// src/services/chat_service.rs

use std::sync::Arc;

use crate::{
    chat::{
        formatter::{self, NO_DATA_MESSAGE},
        prompt::system_prompt,
        query::{build_filter, FieldRegistry},
        record::Record,
        IntentResolver, LanguageModel,
    },
    common::error::AppError,
    db::{ChatStore, DocumentStore},
    models::{
        chat::{
            AppendMessagePayload, ChatEvent, ChatMessage, ChatReply, ChatRequest, ChatRole,
            ChatSettings, CollectionResults, UpdateChatSettingsRequest,
        },
        Collection,
    },
};

pub const GENERIC_ERROR: &str = "Une erreur est survenue lors du traitement de votre demande.";

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn DocumentStore>,
    chat_store: Arc<dyn ChatStore>,
    resolver: Arc<dyn IntentResolver>,
    llm: Arc<dyn LanguageModel>,
    search_limit: usize,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        chat_store: Arc<dyn ChatStore>,
        resolver: Arc<dyn IntentResolver>,
        llm: Arc<dyn LanguageModel>,
        search_limit: usize,
    ) -> Self {
        Self { store, chat_store, resolver, llm, search_limit }
    }

    /// Turno completo, com qualquer falha reduzida à mensagem genérica.
    pub async fn respond(&self, request: ChatRequest) -> ChatEvent {
        match self.handle_turn(request).await {
            Ok(reply) => ChatEvent::Response(reply),
            Err(err) => {
                tracing::error!("Erro no turno do chat: {}", err);
                ChatEvent::Error { message: GENERIC_ERROR.to_string() }
            }
        }
    }

    /// Quadro de texto recebido pelo socket; JSON inválido vira o evento de erro.
    pub async fn respond_to_frame(&self, frame: &str) -> ChatEvent {
        match serde_json::from_str::<ChatRequest>(frame) {
            Ok(request) => self.respond(request).await,
            Err(err) => {
                tracing::warn!("Mensagem de chat inválida: {}", err);
                ChatEvent::Error { message: GENERIC_ERROR.to_string() }
            }
        }
    }

    pub async fn handle_turn(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        let content = request.content.trim();
        let session_id = request.session_id.trim();
        if content.is_empty() || session_id.is_empty() {
            return Err(AppError::Validation(
                "Le message et l'identifiant de session sont requis".into(),
            ));
        }

        self.chat_store.append_message(session_id, ChatRole::User, content).await?;

        let active: Vec<Collection> = request
            .collections
            .iter()
            .filter_map(|name| Collection::from_name(name))
            .collect();
        let collections = self.resolver.resolve(content, &active);
        tracing::debug!("Coleções para '{}': {:?}", content, collections);

        let db_results = self.search(&collections, content).await?;

        let response = if db_results.is_empty() {
            NO_DATA_MESSAGE.to_string()
        } else {
            let settings = self.chat_store.get_settings().await?;
            if settings.force_database_mode {
                Self::format_from_database(&db_results, content, &settings)
            } else {
                let system = system_prompt(&db_results, content)?;
                self.llm.complete(&system, content).await?
            }
        };

        self.chat_store
            .append_message(session_id, ChatRole::Assistant, &response)
            .await?;

        Ok(ChatReply { response, db_results, collections })
    }

    async fn search(
        &self,
        collections: &[Collection],
        query: &str,
    ) -> Result<Vec<CollectionResults>, AppError> {
        let mut results = Vec::new();
        for &collection in collections {
            let filter = build_filter(FieldRegistry::of(collection), query);
            let documents = self
                .store
                .find(collection, &filter, Some(self.search_limit))
                .await?;
            if !documents.is_empty() {
                results.push(CollectionResults { collection, documents });
            }
        }
        Ok(results)
    }

    fn format_from_database(
        results: &[CollectionResults],
        message: &str,
        settings: &ChatSettings,
    ) -> String {
        let sections: Vec<(Collection, Vec<Record>)> = results
            .iter()
            .map(|result| {
                let records = result
                    .documents
                    .iter()
                    .filter_map(|doc| {
                        Record::from_document(result.collection, doc.clone())
                            .inspect_err(|e| {
                                tracing::warn!("Documento ilegível em {}: {}", result.collection, e)
                            })
                            .ok()
                    })
                    .collect();
                (result.collection, records)
            })
            .collect();

        formatter::format_results(&sections, message, settings)
    }

    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        self.chat_store.history(session_id).await
    }

    pub async fn append(
        &self,
        session_id: &str,
        payload: AppendMessagePayload,
    ) -> Result<ChatMessage, AppError> {
        if payload.content.trim().is_empty() {
            return Err(AppError::Validation("Le contenu du message est requis".into()));
        }
        self.chat_store
            .append_message(session_id, payload.role, &payload.content)
            .await
    }

    pub async fn get_settings(&self) -> Result<ChatSettings, AppError> {
        self.chat_store.get_settings().await
    }

    pub async fn update_settings(
        &self,
        request: UpdateChatSettingsRequest,
    ) -> Result<ChatSettings, AppError> {
        let mut settings = self.chat_store.get_settings().await?;
        if let Some(force) = request.force_database_mode {
            settings.force_database_mode = force;
        }
        if let Some(preferences) = request.format_preferences {
            settings.format_preferences = preferences;
        }
        if let Some(level) = request.detail_level {
            settings.detail_level = level;
        }

        let saved = self.chat_store.save_settings(&settings).await?;
        tracing::info!("Configurações do chat atualizadas (modo base: {})", saved.force_database_mode);
        Ok(saved)
    }

    pub async fn reset_settings(&self) -> Result<ChatSettings, AppError> {
        self.chat_store.save_settings(&ChatSettings::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::KeywordResolver;
    use crate::db::{MemoryChatStore, MemoryDocumentStore};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, system: &str, _user: &str) -> Result<String, AppError> {
            if self.fail {
                return Err(AppError::LanguageModel("connexion refusée".into()));
            }
            self.prompts.lock().unwrap().push(system.to_string());
            Ok("Camille Martin est représentée par la galerie.".into())
        }
    }

    async fn service(model: Arc<RecordingModel>) -> (ChatService, Arc<MemoryChatStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .insert(
                Collection::Artistes,
                Uuid::new_v4(),
                json!({
                    "id": Uuid::new_v4(),
                    "reference": "A1",
                    "nom": "Camille Martin",
                    "statut": "represented"
                }),
            )
            .await
            .unwrap();

        let chat_store = Arc::new(MemoryChatStore::new());
        let service = ChatService::new(
            store,
            chat_store.clone(),
            Arc::new(KeywordResolver),
            model,
            50,
        );
        (service, chat_store)
    }

    fn request(content: &str) -> ChatRequest {
        ChatRequest {
            content: content.into(),
            session_id: "s1".into(),
            collections: vec!["artistes".into(), "oeuvres".into()],
        }
    }

    #[tokio::test]
    async fn language_model_receives_database_context() {
        let model = Arc::new(RecordingModel::default());
        let (service, chat_store) = service(model.clone()).await;

        let reply = service.handle_turn(request("Quels artistes sont représentés ?")).await.unwrap();

        assert_eq!(reply.collections, vec![Collection::Artistes]);
        assert_eq!(reply.db_results.len(), 1);
        assert!(reply.response.starts_with("Camille Martin"));

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Camille Martin"));

        let history = chat_store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn force_database_mode_skips_the_model() {
        let model = Arc::new(RecordingModel::default());
        let (service, _) = service(model.clone()).await;
        service
            .update_settings(UpdateChatSettingsRequest {
                force_database_mode: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let reply = service.handle_turn(request("Quels artistes sont représentés ?")).await.unwrap();

        assert!(reply.response.starts_with(formatter::RESULTS_HEADER));
        assert!(reply.response.contains("1. reference: A1, nom: Camille Martin"));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn nothing_found_gets_the_apology() {
        let (service, _) = service(Arc::new(RecordingModel::default())).await;
        let reply = service.handle_turn(request("Quelles oeuvres de Picasso ?")).await.unwrap();

        assert_eq!(reply.response, NO_DATA_MESSAGE);
        assert!(reply.db_results.is_empty());
    }

    #[tokio::test]
    async fn failures_collapse_to_the_generic_message() {
        let (service, _) = service(Arc::new(RecordingModel { fail: true, ..Default::default() })).await;

        let event = service.respond(request("Quels artistes sont représentés ?")).await;
        assert!(matches!(event, ChatEvent::Error { ref message } if message == GENERIC_ERROR));

        let mut empty = request("   ");
        empty.session_id = "s2".into();
        assert!(matches!(service.respond(empty).await, ChatEvent::Error { .. }));
    }

    #[tokio::test]
    async fn socket_frames_become_tagged_events() {
        let (service, _) = service(Arc::new(RecordingModel::default())).await;

        let event = service
            .respond_to_frame(r#"{"content":"Quels artistes ?","sessionId":"s3"}"#)
            .await;
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "response");
        assert!(value["response"].as_str().unwrap().starts_with("Camille Martin"));
        assert_eq!(value["collections"], json!(["artistes"]));
        assert_eq!(value["dbResults"][0]["collection"], "artistes");

        let event = service.respond_to_frame("pas du json").await;
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "error", "message": GENERIC_ERROR })
        );

        let event = service.respond_to_frame(r#"{"content":"Quels artistes ?"}"#).await;
        assert_eq!(serde_json::to_value(&event).unwrap()["type"], "error");
    }
}
