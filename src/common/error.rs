use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Mensagens voltadas ao usuário ficam em francês, como na interface da galeria.
#[derive(Debug, Error)]
pub enum AppError {
    // Campo obrigatório ausente ou regra de negócio simples
    #[error("{0}")]
    Validation(String),

    #[error("Erreur de validation")]
    FieldValidation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    // Regra de integridade (ex: cliente com vendas, obra vendida)
    #[error("{0}")]
    Conflict(String),

    #[error("Erreur de base de données: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document invalide: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur de communication avec le modèle de langue: {0}")]
    LanguageModel(String),

    #[error("Erreur interne du serveur")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::FieldValidation(errors) => {
                let mut details = std::collections::HashMap::new();
                let mut first_message = None;
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    if first_message.is_none() {
                        first_message = messages.first().cloned();
                    }
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": first_message.unwrap_or_else(|| "Un ou plusieurs champs sont invalides.".to_string()),
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),

            // O resto vira 500, com a mensagem bruta anexada.
            e => {
                tracing::error!("Erro interno do servidor: {}", e);
                let body = Json(json!({
                    "message": "Erreur interne du serveur",
                    "error": e.to_string(),
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_business_errors_to_status_codes() {
        let cases = [
            (AppError::Validation("Le titre est requis".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Client non trouvé".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("Œuvre vendue".into()), StatusCode::CONFLICT),
            (AppError::LanguageModel("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
