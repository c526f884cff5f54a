// src/services.rs

pub mod artist_service;
pub mod artwork_service;
pub mod budget_service;
pub mod chat_service;
pub mod client_service;
pub mod dashboard_service;
pub mod follow_up_service;
pub mod partner_service;
pub mod sale_service;

pub use artist_service::ArtistService;
pub use artwork_service::ArtworkService;
pub use budget_service::BudgetService;
pub use chat_service::ChatService;
pub use client_service::ClientService;
pub use dashboard_service::DashboardService;
pub use follow_up_service::FollowUpService;
pub use partner_service::PartnerService;
pub use sale_service::SaleService;

use crate::common::error::AppError;

/// Campo obrigatório: a mensagem vai tal qual para o usuário.
pub(crate) fn required<T>(value: Option<T>, message: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Texto opcional vazio vira `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
