// src/handlers/budget.rs

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
    models::budget::{BudgetEntry, BudgetPayload, BudgetSummary},
};

#[utoipa::path(
    get,
    path = "/api/budget",
    tag = "Budget",
    responses((status = 200, description = "Lançamentos, mais recentes primeiro", body = Vec<BudgetEntry>))
)]
pub async fn list_entries(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.budget_service.list().await?;
    Ok((StatusCode::OK, Json(entries)))
}

#[utoipa::path(
    get,
    path = "/api/budget/resume",
    tag = "Budget",
    responses((status = 200, description = "Receitas, despesas e saldo", body = BudgetSummary))
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.budget_service.summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/budget/{id}",
    tag = "Budget",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento encontrado", body = BudgetEntry),
        (status = 404, description = "Entrée budgétaire non trouvée")
    )
)]
pub async fn get_entry(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state.budget_service.get(id).await?;
    Ok((StatusCode::OK, Json(entry)))
}

#[utoipa::path(
    post,
    path = "/api/budget",
    tag = "Budget",
    request_body = BudgetPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = BudgetEntry),
        (status = 400, description = "Date, catégorie ou montant ausente")
    )
)]
pub async fn create_entry(
    State(app_state): State<AppState>,
    Json(payload): Json<BudgetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let entry = app_state.budget_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    put,
    path = "/api/budget/{id}",
    tag = "Budget",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    request_body = BudgetPayload,
    responses(
        (status = 200, description = "Lançamento atualizado", body = BudgetEntry),
        (status = 404, description = "Entrée budgétaire non trouvée")
    )
)]
pub async fn update_entry(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let entry = app_state.budget_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(entry)))
}

#[utoipa::path(
    delete,
    path = "/api/budget/{id}",
    tag = "Budget",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento removido", body = MessageResponse),
        (status = 404, description = "Entrée budgétaire non trouvée")
    )
)]
pub async fn delete_entry(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.budget_service.delete(id).await?;
    Ok((StatusCode::OK, message("Entrée budgétaire supprimée avec succès")))
}
