// src/handlers.rs

pub mod artists;
pub mod artworks;
pub mod budget;
pub mod chat;
pub mod clients;
pub mod dashboard;
pub mod follow_ups;
pub mod partners;
pub mod sales;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Corpo das respostas de exclusão.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Client supprimé avec succès")]
    pub message: String,
}

pub(crate) fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse { message: text.to_string() })
}
