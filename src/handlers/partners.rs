// src/handlers/partners.rs

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
    models::partner::{Partner, PartnerPayload},
};

#[utoipa::path(
    get,
    path = "/api/partenaires",
    tag = "Partenaires",
    responses((status = 200, description = "Lista de parceiros", body = Vec<Partner>))
)]
pub async fn list_partners(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let partners = app_state.partner_service.list().await?;
    Ok((StatusCode::OK, Json(partners)))
}

#[utoipa::path(
    get,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Parceiro encontrado", body = Partner),
        (status = 404, description = "Partenaire non trouvé")
    )
)]
pub async fn get_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let partner = app_state.partner_service.get(id).await?;
    Ok((StatusCode::OK, Json(partner)))
}

#[utoipa::path(
    post,
    path = "/api/partenaires",
    tag = "Partenaires",
    request_body = PartnerPayload,
    responses((status = 201, description = "Parceiro criado", body = Partner))
)]
pub async fn create_partner(
    State(app_state): State<AppState>,
    Json(payload): Json<PartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let partner = app_state.partner_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

#[utoipa::path(
    put,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    request_body = PartnerPayload,
    responses(
        (status = 200, description = "Parceiro atualizado", body = Partner),
        (status = 404, description = "Partenaire non trouvé")
    )
)]
pub async fn update_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let partner = app_state.partner_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(partner)))
}

#[utoipa::path(
    delete,
    path = "/api/partenaires/{id}",
    tag = "Partenaires",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Parceiro removido", body = MessageResponse),
        (status = 404, description = "Partenaire non trouvé")
    )
)]
pub async fn delete_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.partner_service.delete(id).await?;
    Ok((StatusCode::OK, message("Partenaire supprimé avec succès")))
}
