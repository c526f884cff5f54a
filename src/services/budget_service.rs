// src/services/budget_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Repository},
    models::budget::{BudgetEntry, BudgetKind, BudgetPayload, BudgetSummary},
    services::{non_blank, required},
};

const BUDGET_REQUIRED: &str = "La date, la catégorie et le montant sont obligatoires";

/// Totais de receitas, despesas e saldo. Despesas já estão negativas.
pub fn summarize(entries: &[BudgetEntry]) -> BudgetSummary {
    let (revenus, depenses) = entries.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(revenus, depenses), entry| match entry.kind {
            BudgetKind::Revenu => (revenus + entry.montant, depenses),
            BudgetKind::Depense => (revenus, depenses + entry.montant.abs()),
        },
    );

    BudgetSummary {
        revenus,
        depenses,
        solde: revenus - depenses,
        nombre_entrees: entries.len(),
    }
}

#[derive(Clone)]
pub struct BudgetService {
    entries: Repository<BudgetEntry>,
}

impl BudgetService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { entries: Repository::new(store) }
    }

    /// Mais recentes primeiro.
    pub async fn list(&self) -> Result<Vec<BudgetEntry>, AppError> {
        let mut entries = self.entries.find_all().await?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    pub async fn get(&self, id: Uuid) -> Result<BudgetEntry, AppError> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entrée budgétaire non trouvée".into()))
    }

    pub async fn create(&self, payload: BudgetPayload) -> Result<BudgetEntry, AppError> {
        let entry = BudgetEntry {
            id: Uuid::new_v4(),
            reference: self.entries.next_reference().await?,
            date: required(payload.date, BUDGET_REQUIRED)?,
            categorie: required(non_blank(payload.categorie), BUDGET_REQUIRED)?,
            description: non_blank(payload.description),
            montant: payload.kind.signed(required(payload.montant, BUDGET_REQUIRED)?),
            kind: payload.kind,
            id_vente: None,
        };

        self.entries.insert(&entry).await?;
        tracing::info!(
            "Lançamento {} ({}) de {}",
            entry.reference,
            entry.kind.as_str(),
            entry.montant
        );
        Ok(entry)
    }

    pub async fn update(&self, id: Uuid, payload: BudgetPayload) -> Result<BudgetEntry, AppError> {
        let current = self.get(id).await?;

        let entry = BudgetEntry {
            date: required(payload.date, BUDGET_REQUIRED)?,
            categorie: required(non_blank(payload.categorie), BUDGET_REQUIRED)?,
            description: non_blank(payload.description),
            montant: payload.kind.signed(required(payload.montant, BUDGET_REQUIRED)?),
            kind: payload.kind,
            ..current
        };

        self.entries.update(&entry).await?;
        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.entries.delete(id).await? {
            return Err(AppError::NotFound("Entrée budgétaire non trouvée".into()));
        }
        Ok(())
    }

    pub async fn summary(&self) -> Result<BudgetSummary, AppError> {
        let entries = self.entries.find_all().await?;
        Ok(summarize(&entries))
    }
}
