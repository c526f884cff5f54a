// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    chat::{KeywordResolver, LanguageModel, OllamaClient},
    db::{ChatStore, DocumentStore, MemoryChatStore, MemoryDocumentStore, PgChatStore, PgDocumentStore},
    services::{
        ArtistService, ArtworkService, BudgetService, ChatService, ClientService,
        DashboardService, FollowUpService, PartnerService, SaleService,
    },
};

/// Configuração lida do ambiente (e do .env, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    // Sem URL, os dados ficam em memória
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub llm_timeout: Duration,
    pub chat_search_limit: usize,
    pub db_max_connections: u32,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} invalide: '{raw}'")),
        _ => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:5000"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "mistral-nemo:latest"),
            llm_timeout: Duration::from_secs(env_parse("LLM_TIMEOUT_SECS", 60u64)?),
            chat_search_limit: env_parse("CHAT_SEARCH_LIMIT", 50usize)?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", 5u32)?,
        })
    }
}

// O estado compartilhado, injetado nos handlers via State
#[derive(Clone)]
pub struct AppState {
    pub artist_service: ArtistService,
    pub artwork_service: ArtworkService,
    pub client_service: ClientService,
    pub partner_service: PartnerService,
    pub sale_service: SaleService,
    pub budget_service: BudgetService,
    pub follow_up_service: FollowUpService,
    pub dashboard_service: DashboardService,
    pub chat_service: ChatService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let (store, chat_store): (Arc<dyn DocumentStore>, Arc<dyn ChatStore>) =
            match &settings.database_url {
                Some(url) => {
                    let pool = PgPoolOptions::new()
                        .max_connections(settings.db_max_connections)
                        .acquire_timeout(Duration::from_secs(3))
                        .connect(url)
                        .await
                        .context("Falha ao conectar ao banco de dados")?;
                    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                    sqlx::migrate!()
                        .run(&pool)
                        .await
                        .context("Falha ao rodar as migrações do banco de dados")?;
                    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                    let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool.clone()));
                    let chat_store: Arc<dyn ChatStore> = Arc::new(PgChatStore::new(pool));
                    (store, chat_store)
                }
                None => {
                    tracing::warn!("DATABASE_URL não definida: usando armazenamento em memória");
                    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
                    let chat_store: Arc<dyn ChatStore> = Arc::new(MemoryChatStore::new());
                    (store, chat_store)
                }
            };

        let llm = OllamaClient::new(&settings.ollama_url, &settings.ollama_model, settings.llm_timeout)?;
        tracing::info!("Modelo de linguagem: {} em {}", settings.ollama_model, settings.ollama_url);

        Ok(Self::from_parts(store, chat_store, Arc::new(llm), settings.chat_search_limit))
    }

    /// Monta o gráfico de dependências sobre armazenamentos já criados.
    pub fn from_parts(
        store: Arc<dyn DocumentStore>,
        chat_store: Arc<dyn ChatStore>,
        llm: Arc<dyn LanguageModel>,
        chat_search_limit: usize,
    ) -> Self {
        Self {
            artist_service: ArtistService::new(store.clone()),
            artwork_service: ArtworkService::new(store.clone()),
            client_service: ClientService::new(store.clone()),
            partner_service: PartnerService::new(store.clone()),
            sale_service: SaleService::new(store.clone()),
            budget_service: BudgetService::new(store.clone()),
            follow_up_service: FollowUpService::new(store.clone()),
            dashboard_service: DashboardService::new(store.clone()),
            chat_service: ChatService::new(
                store,
                chat_store,
                Arc::new(KeywordResolver),
                llm,
                chat_search_limit,
            ),
        }
    }
}
