// src/handlers/sales.rs

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
    models::sale::{SaleDetail, SalePayload},
};

#[utoipa::path(
    get,
    path = "/api/ventes",
    tag = "Ventes",
    responses((status = 200, description = "Vendas com cliente e obra", body = Vec<SaleDetail>))
)]
pub async fn list_sales(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.list().await?;
    Ok((StatusCode::OK, Json(sales)))
}

#[utoipa::path(
    get,
    path = "/api/ventes/{id}",
    tag = "Ventes",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda encontrada", body = SaleDetail),
        (status = 404, description = "Vente non trouvée")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.get(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/ventes
// Marca a obra como vendida e lança receita e comissão no orçamento.
#[utoipa::path(
    post,
    path = "/api/ventes",
    tag = "Ventes",
    request_body = SalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = SaleDetail),
        (status = 400, description = "Dados inválidos ou obra indisponível"),
        (status = 404, description = "Obra ou cliente inexistente")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let sale = app_state.sale_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

#[utoipa::path(
    put,
    path = "/api/ventes/{id}",
    tag = "Ventes",
    params(("id" = Uuid, Path, description = "ID da venda")),
    request_body = SalePayload,
    responses(
        (status = 200, description = "Venda atualizada", body = SaleDetail),
        (status = 404, description = "Vente non trouvée"),
        (status = 409, description = "Troca de obra não permitida")
    )
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let sale = app_state.sale_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(sale)))
}

#[utoipa::path(
    delete,
    path = "/api/ventes/{id}",
    tag = "Ventes",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda removida, obra volta a ficar disponível", body = MessageResponse),
        (status = 404, description = "Vente non trouvée")
    )
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete(id).await?;
    Ok((StatusCode::OK, message("Vente supprimée avec succès")))
}
