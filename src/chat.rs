// src/chat.rs
//
// Assistente de consultas: detecta as coleções citadas na mensagem, monta o
// filtro de busca e formata a resposta (ou delega ao modelo de linguagem).

pub mod formatter;
pub mod llm;
pub mod prompt;
pub mod query;
pub mod record;
pub mod resolver;

pub use llm::{LanguageModel, OllamaClient};
pub use resolver::{IntentResolver, KeywordResolver};
