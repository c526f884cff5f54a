// src/models/sale.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::artwork::{Artwork, PropertyStatus};
use super::client::Client;
use super::collection::{Collection, Document};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,

    #[schema(example = "V7")]
    pub reference: String,

    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date_vente: NaiveDate,

    pub id_client: Uuid,
    pub id_oeuvre: Uuid,

    // Preço final, já com a redução da obra aplicada
    #[schema(example = 4050.0)]
    pub prix_vente: Decimal,

    // Valor (não percentual) da comissão paga
    #[schema(example = 405.0)]
    pub commission: Option<Decimal>,

    #[schema(example = "Virement")]
    pub mode_paiement: Option<String>,

    pub commentaires: Option<String>,

    // Estado de propriedade da obra antes da venda, reposto ao anular
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut_precedent: Option<PropertyStatus>,
}

impl Document for Sale {
    const COLLECTION: Collection = Collection::Ventes;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Venda com cliente e obra populados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,

    pub client: Option<Client>,
    pub oeuvre: Option<Artwork>,
}

fn validate_rate(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("Le taux de commission doit être compris entre 0 et 100".into());
        return Err(err);
    }
    Ok(())
}

// Os obrigatórios (obra, cliente, data) são checados no serviço: a mensagem é uma só.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub id_oeuvre: Option<Uuid>,
    pub id_client: Option<Uuid>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-15")]
    pub date_vente: Option<NaiveDate>,

    // Percentual de comissão sobre o preço final
    #[validate(custom(function = "validate_rate"))]
    #[schema(example = 10.0)]
    pub taux_commission: Option<Decimal>,

    pub mode_paiement: Option<String>,
    pub commentaires: Option<String>,
}
