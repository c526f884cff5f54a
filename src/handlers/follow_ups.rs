// src/handlers/follow_ups.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{message, MessageResponse},
    models::follow_up::{FollowUpDetail, FollowUpPayload, FollowUpQuery},
};

// Os obrigatórios são validados no serviço, cada campo com sua mensagem.

#[utoipa::path(
    get,
    path = "/api/suivis",
    tag = "Suivis",
    params(FollowUpQuery),
    responses((status = 200, description = "Acompanhamentos, mais recentes primeiro", body = Vec<FollowUpDetail>))
)]
pub async fn list_follow_ups(
    State(app_state): State<AppState>,
    Query(query): Query<FollowUpQuery>,
) -> Result<impl IntoResponse, AppError> {
    let follow_ups = app_state.follow_up_service.list(query).await?;
    Ok((StatusCode::OK, Json(follow_ups)))
}

#[utoipa::path(
    get,
    path = "/api/suivis/{id}",
    tag = "Suivis",
    params(("id" = Uuid, Path, description = "ID do acompanhamento")),
    responses(
        (status = 200, description = "Acompanhamento encontrado", body = FollowUpDetail),
        (status = 404, description = "Suivi non trouvé")
    )
)]
pub async fn get_follow_up(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let follow_up = app_state.follow_up_service.get(id).await?;
    Ok((StatusCode::OK, Json(follow_up)))
}

#[utoipa::path(
    post,
    path = "/api/suivis",
    tag = "Suivis",
    request_body = FollowUpPayload,
    responses(
        (status = 201, description = "Acompanhamento criado", body = FollowUpDetail),
        (status = 400, description = "Campo obrigatório ausente ou cliente inexistente")
    )
)]
pub async fn create_follow_up(
    State(app_state): State<AppState>,
    Json(payload): Json<FollowUpPayload>,
) -> Result<impl IntoResponse, AppError> {
    let follow_up = app_state.follow_up_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(follow_up)))
}

#[utoipa::path(
    put,
    path = "/api/suivis/{id}",
    tag = "Suivis",
    params(("id" = Uuid, Path, description = "ID do acompanhamento")),
    request_body = FollowUpPayload,
    responses(
        (status = 200, description = "Acompanhamento atualizado", body = FollowUpDetail),
        (status = 404, description = "Suivi non trouvé")
    )
)]
pub async fn update_follow_up(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FollowUpPayload>,
) -> Result<impl IntoResponse, AppError> {
    let follow_up = app_state.follow_up_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(follow_up)))
}

#[utoipa::path(
    delete,
    path = "/api/suivis/{id}",
    tag = "Suivis",
    params(("id" = Uuid, Path, description = "ID do acompanhamento")),
    responses(
        (status = 200, description = "Acompanhamento removido", body = MessageResponse),
        (status = 404, description = "Suivi non trouvé")
    )
)]
pub async fn delete_follow_up(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.follow_up_service.delete(id).await?;
    Ok((StatusCode::OK, message("Suivi supprimé avec succès")))
}
