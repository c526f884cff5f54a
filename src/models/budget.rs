// src/models/budget.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::collection::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    Revenu,
    #[default]
    Depense,
}

impl BudgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetKind::Revenu => "revenu",
            BudgetKind::Depense => "depense",
        }
    }

    /// Despesas ficam negativas, receitas positivas.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            BudgetKind::Revenu => amount.abs(),
            BudgetKind::Depense => -amount.abs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    pub id: Uuid,

    #[schema(example = "B40")]
    pub reference: String,

    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,

    #[schema(example = "ventes")]
    pub categorie: String,

    pub description: Option<String>,

    #[schema(example = -120.0)]
    pub montant: Decimal,

    #[serde(rename = "type")]
    pub kind: BudgetKind,

    // Preenchido quando a linha foi gerada por uma venda
    pub id_vente: Option<Uuid>,
}

impl Document for BudgetEntry {
    const COLLECTION: Collection = Collection::Budget;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPayload {
    #[validate(required(message = "La date, la catégorie et le montant sont obligatoires"))]
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-15")]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "La date, la catégorie et le montant sont obligatoires"), length(min = 1, message = "La date, la catégorie et le montant sont obligatoires"))]
    #[schema(example = "loyer")]
    pub categorie: Option<String>,

    pub description: Option<String>,

    // Valor absoluto; o sinal vem do tipo
    #[validate(required(message = "La date, la catégorie et le montant sont obligatoires"))]
    #[schema(example = 120.0)]
    pub montant: Option<Decimal>,

    #[serde(rename = "type", default)]
    pub kind: BudgetKind,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub revenus: Decimal,
    pub depenses: Decimal,
    pub solde: Decimal,
    pub nombre_entrees: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expenses_are_stored_negative_whatever_the_input_sign() {
        assert_eq!(BudgetKind::Depense.signed(Decimal::from(100)), Decimal::from(-100));
        assert_eq!(BudgetKind::Depense.signed(Decimal::from(-100)), Decimal::from(-100));
        assert_eq!(BudgetKind::Revenu.signed(Decimal::new(-425, 1)), Decimal::new(425, 1));
        assert_eq!(BudgetKind::Revenu.signed(Decimal::ZERO), Decimal::ZERO);
    }
}
