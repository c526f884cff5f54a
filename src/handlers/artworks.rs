// src/handlers/artworks.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{message, MessageResponse},
    models::artwork::{ArtworkDetail, ArtworkPayload},
};

#[utoipa::path(
    get,
    path = "/api/oeuvres",
    tag = "Oeuvres",
    responses((status = 200, description = "Obras com o artista populado", body = Vec<ArtworkDetail>))
)]
pub async fn list_artworks(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let artworks = app_state.artwork_service.list().await?;
    Ok((StatusCode::OK, Json(artworks)))
}

// Usado no formulário de venda: só obras ainda não vendidas
#[utoipa::path(
    get,
    path = "/api/oeuvres/disponibles",
    tag = "Oeuvres",
    responses((status = 200, description = "Obras disponíveis para venda", body = Vec<ArtworkDetail>))
)]
pub async fn list_available_artworks(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let artworks = app_state.artwork_service.list_available().await?;
    Ok((StatusCode::OK, Json(artworks)))
}

#[utoipa::path(
    get,
    path = "/api/oeuvres/{id}",
    tag = "Oeuvres",
    params(("id" = Uuid, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Obra encontrada", body = ArtworkDetail),
        (status = 404, description = "Oeuvre non trouvée")
    )
)]
pub async fn get_artwork(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let artwork = app_state.artwork_service.get(id).await?;
    Ok((StatusCode::OK, Json(artwork)))
}

#[utoipa::path(
    post,
    path = "/api/oeuvres",
    tag = "Oeuvres",
    request_body = ArtworkPayload,
    responses(
        (status = 201, description = "Obra criada", body = ArtworkDetail),
        (status = 400, description = "Titre ou artiste manquant, artiste inconnu")
    )
)]
pub async fn create_artwork(
    State(app_state): State<AppState>,
    Json(payload): Json<ArtworkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let artwork = app_state.artwork_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(artwork)))
}

#[utoipa::path(
    put,
    path = "/api/oeuvres/{id}",
    tag = "Oeuvres",
    params(("id" = Uuid, Path, description = "ID da obra")),
    request_body = ArtworkPayload,
    responses(
        (status = 200, description = "Obra atualizada", body = ArtworkDetail),
        (status = 404, description = "Oeuvre non trouvée"),
        (status = 409, description = "Obra vendida não volta para venda")
    )
)]
pub async fn update_artwork(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArtworkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let artwork = app_state.artwork_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(artwork)))
}

#[utoipa::path(
    delete,
    path = "/api/oeuvres/{id}",
    tag = "Oeuvres",
    params(("id" = Uuid, Path, description = "ID da obra")),
    responses(
        (status = 200, description = "Obra removida", body = MessageResponse),
        (status = 404, description = "Oeuvre non trouvée"),
        (status = 409, description = "Obra vendida")
    )
)]
pub async fn delete_artwork(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.artwork_service.delete(id).await?;
    Ok((StatusCode::OK, message("Oeuvre supprimée avec succès")))
}
