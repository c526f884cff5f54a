// src/db/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
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

/// Coleções em tabelas `(id, doc JSONB, created_at)`.
/// O nome da tabela vem sempre de `Collection::name`, nunca da entrada do usuário.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ILIKE usa '\' como escape por padrão
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Contains { field, needle } => {
            builder
                .push("(doc ->> ")
                .push_bind(*field)
                .push(") ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)));
        }
        Filter::NumberEq { field, value } => {
            builder
                .push("(doc -> ")
                .push_bind(*field)
                .push(") = to_jsonb(")
                .push_bind(*value)
                .push("::float8)");
        }
        Filter::DateEq { field, date } => {
            builder
                .push("LEFT(doc ->> ")
                .push_bind(*field)
                .push(", 10) = ")
                .push_bind(date.format("%Y-%m-%d").to_string());
        }
        Filter::RefEq { field, id } => {
            builder
                .push("(doc ->> ")
                .push_bind(*field)
                .push(") = ")
                .push_bind(id.to_string());
        }
        Filter::Or(clauses) if clauses.is_empty() => {
            builder.push("FALSE");
        }
        Filter::Or(clauses) => {
            builder.push("(");
            for (i, clause) in clauses.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                push_filter(builder, clause);
            }
            builder.push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn next_sequence(&self, collection: Collection) -> Result<i64, AppError> {
        let seq = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO collection_sequences (name, seq) VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET seq = collection_sequences.seq + 1
            RETURNING seq
            "#,
        )
        .bind(collection.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(seq)
    }

    async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> Result<(), AppError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.name());
        sqlx::query(&sql)
            .bind(id)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::Conflict(format!(
                            "Le document {id} existe déjà dans {collection}"
                        ));
                    }
                }
                e.into()
            })?;

        Ok(())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", collection.name());
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn replace(&self, collection: Collection, id: Uuid, doc: Value) -> Result<bool, AppError> {
        let sql = format!("UPDATE {} SET doc = $2 WHERE id = $1", collection.name());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(doc)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT doc FROM {} WHERE ",
            collection.name()
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at, id");

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        tracing::debug!("Busca em {}: {}", collection, builder.sql());

        let docs = builder
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await?;

        Ok(docs)
    }
}

#[derive(Clone)]
pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for PgChatStore {
    async fn append_message(
        &self,
        session_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, AppError> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO chat_messages (session_id, role, content)
            VALUES ($1, $2, $3)
            RETURNING created_at
            "#,
        )
        .bind(session_id)
        .bind(role.as_str())
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(ChatMessage {
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at,
        })
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        let rows = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            r#"
            SELECT role, content, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .filter_map(|(role, content, created_at)| {
                // Papel desconhecido é ignorado em vez de derrubar o histórico inteiro
                let Some(role) = ChatRole::parse(&role) else {
                    tracing::warn!("Mensagem com papel desconhecido '{}' ignorada", role);
                    return None;
                };
                Some(ChatMessage {
                    session_id: session_id.to_string(),
                    role,
                    content,
                    created_at,
                })
            })
            .collect();

        Ok(messages)
    }

    async fn get_settings(&self) -> Result<ChatSettings, AppError> {
        let stored = sqlx::query_scalar::<_, Value>("SELECT settings FROM chat_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        match stored {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(ChatSettings::default()),
        }
    }

    async fn save_settings(&self, settings: &ChatSettings) -> Result<ChatSettings, AppError> {
        let mut saved = settings.clone();
        saved.updated_at = Some(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO chat_settings (id, settings, updated_at) VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE SET settings = EXCLUDED.settings, updated_at = NOW()
            "#,
        )
        .bind(serde_json::to_value(&saved)?)
        .execute(&self.pool)
        .await?;

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render(filter: &Filter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("");
        push_filter(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Monet"), "Monet");
    }

    #[test]
    fn or_of_clauses_uses_bound_parameters() {
        let filter = Filter::Or(vec![
            Filter::Contains { field: "nom", needle: "monet".into() },
            Filter::NumberEq { field: "prixVente", value: 1200.0 },
            Filter::DateEq {
                field: "dateVente",
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
        ]);

        assert_eq!(
            render(&filter),
            "((doc ->> $1) ILIKE $2 OR (doc -> $3) = to_jsonb($4::float8) OR LEFT(doc ->> $5, 10) = $6)"
        );
    }

    #[test]
    fn empty_or_never_matches() {
        assert_eq!(render(&Filter::Or(vec![])), "FALSE");
        assert_eq!(render(&Filter::All), "TRUE");
    }
}
