// src/models/partner.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::collection::{Collection, Document};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,

    #[schema(example = "P2")]
    pub reference: String,

    #[schema(example = "Maison Lumière")]
    pub nom: String,

    // Galeria, encadreur, transporteur...
    #[serde(rename = "type")]
    #[schema(example = "Encadreur")]
    pub kind: Option<String>,

    pub coordonnees: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date_partenariat: Option<NaiveDate>,

    pub conditions: Option<String>,
    pub commentaires: Option<String>,
}

impl Document for Partner {
    const COLLECTION: Collection = Collection::Partenaires;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPayload {
    #[validate(required(message = "Le nom du partenaire est requis"), length(min = 1, message = "Le nom du partenaire est requis"))]
    #[schema(example = "Maison Lumière")]
    pub nom: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub coordonnees: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date_partenariat: Option<NaiveDate>,

    pub conditions: Option<String>,
    pub commentaires: Option<String>,
}
