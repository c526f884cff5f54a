// src/handlers/artists.rs

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
    models::artist::{Artist, ArtistPayload},
};

#[utoipa::path(
    get,
    path = "/api/artistes",
    tag = "Artistes",
    responses((status = 200, description = "Lista de artistas", body = Vec<Artist>))
)]
pub async fn list_artists(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let artists = app_state.artist_service.list().await?;
    Ok((StatusCode::OK, Json(artists)))
}

#[utoipa::path(
    get,
    path = "/api/artistes/{id}",
    tag = "Artistes",
    params(("id" = Uuid, Path, description = "ID do artista")),
    responses(
        (status = 200, description = "Artista encontrado", body = Artist),
        (status = 404, description = "Artiste non trouvé")
    )
)]
pub async fn get_artist(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let artist = app_state.artist_service.get(id).await?;
    Ok((StatusCode::OK, Json(artist)))
}

#[utoipa::path(
    post,
    path = "/api/artistes",
    tag = "Artistes",
    request_body = ArtistPayload,
    responses(
        (status = 201, description = "Artista criado", body = Artist),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_artist(
    State(app_state): State<AppState>,
    Json(payload): Json<ArtistPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let artist = app_state.artist_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

#[utoipa::path(
    put,
    path = "/api/artistes/{id}",
    tag = "Artistes",
    params(("id" = Uuid, Path, description = "ID do artista")),
    request_body = ArtistPayload,
    responses(
        (status = 200, description = "Artista atualizado", body = Artist),
        (status = 404, description = "Artiste non trouvé")
    )
)]
pub async fn update_artist(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArtistPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let artist = app_state.artist_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(artist)))
}

#[utoipa::path(
    delete,
    path = "/api/artistes/{id}",
    tag = "Artistes",
    params(("id" = Uuid, Path, description = "ID do artista")),
    responses(
        (status = 200, description = "Artista removido", body = MessageResponse),
        (status = 404, description = "Artiste non trouvé"),
        (status = 409, description = "O artista ainda tem obras")
    )
)]
pub async fn delete_artist(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.artist_service.delete(id).await?;
    Ok((StatusCode::OK, message("Artiste supprimé avec succès")))
}
