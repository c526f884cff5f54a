// src/models/artwork.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::artist::Artist;
use super::collection::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Gallery,
    Consignment,
    Other,
}

impl PropertyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::Gallery => "gallery",
            PropertyStatus::Consignment => "consignment",
            PropertyStatus::Other => "other",
        }
    }
}

// Duração do depósito (só faz sentido para obras em consignação)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ConsignmentDuration {
    #[serde(rename = "less3")]
    LessThanThreeMonths,
    #[serde(rename = "3to6")]
    ThreeToSixMonths,
    #[serde(rename = "more6")]
    MoreThanSixMonths,
}

impl ConsignmentDuration {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsignmentDuration::LessThanThreeMonths => "less3",
            ConsignmentDuration::ThreeToSixMonths => "3to6",
            ConsignmentDuration::MoreThanSixMonths => "more6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Reserved => "reserved",
            Availability::Sold => "sold",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: Uuid,

    #[schema(example = "O7")]
    pub reference: String,

    #[schema(example = "Nocturne bleu")]
    pub titre: String,

    pub id_artiste: Uuid,

    #[schema(example = 2021)]
    pub annee_creation: Option<i32>,

    #[schema(example = "Huile sur toile")]
    pub technique: Option<String>,

    #[schema(example = "80x120 cm")]
    pub dimensions: Option<String>,

    #[schema(example = 4500.0)]
    pub prix_vente: Option<Decimal>,

    // Percentual de desconto (0-100)
    #[schema(example = 10.0)]
    pub reduction: Option<Decimal>,

    pub property_status: Option<PropertyStatus>,
    pub consignment_duration: Option<ConsignmentDuration>,

    #[serde(default)]
    pub availability: Availability,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-15")]
    pub date_vente: Option<NaiveDate>,

    pub commentaires: Option<String>,
}

impl Artwork {
    pub fn is_sold(&self) -> bool {
        self.availability == Availability::Sold
    }
}

impl Document for Artwork {
    const COLLECTION: Collection = Collection::Oeuvres;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Obra com o artista populado, como o front espera nas listagens.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDetail {
    #[serde(flatten)]
    pub artwork: Artwork,

    pub artiste: Option<Artist>,
}

fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("La réduction doit être comprise entre 0 et 100".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Le prix de vente ne peut pas être négatif".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkPayload {
    #[validate(required(message = "Le titre et l'artiste sont requis"), length(min = 1, message = "Le titre et l'artiste sont requis"))]
    #[schema(example = "Nocturne bleu")]
    pub titre: Option<String>,

    #[validate(required(message = "Le titre et l'artiste sont requis"))]
    pub id_artiste: Option<Uuid>,

    pub annee_creation: Option<i32>,
    pub technique: Option<String>,
    pub dimensions: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub prix_vente: Option<Decimal>,

    #[validate(custom(function = "validate_percentage"))]
    pub reduction: Option<Decimal>,

    pub property_status: Option<PropertyStatus>,
    pub consignment_duration: Option<ConsignmentDuration>,
    pub availability: Option<Availability>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-15")]
    pub date_vente: Option<NaiveDate>,

    pub commentaires: Option<String>,
}
