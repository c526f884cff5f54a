// src/models/artist.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::collection::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArtistStatus {
    Portfolio,
    Prospect,
    Represented,
    Archived,
}

impl ArtistStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtistStatus::Portfolio => "portfolio",
            ArtistStatus::Prospect => "prospect",
            ArtistStatus::Represented => "represented",
            ArtistStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: Uuid,

    #[schema(example = "A12")]
    pub reference: String,

    #[schema(example = "Camille Martin")]
    pub nom: String,

    pub statut: Option<ArtistStatus>,

    #[schema(example = "camille@atelier.fr")]
    pub coordonnees: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2023-04-01")]
    pub date_integration: Option<NaiveDate>,

    pub commentaires: Option<String>,

    pub lien_catalogue: Option<String>,
}

impl Document for Artist {
    const COLLECTION: Collection = Collection::Artistes;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPayload {
    #[validate(required(message = "Le nom de l'artiste est requis"), length(min = 1, message = "Le nom de l'artiste est requis"))]
    #[schema(example = "Camille Martin")]
    pub nom: Option<String>,

    pub statut: Option<ArtistStatus>,
    pub coordonnees: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2023-04-01")]
    pub date_integration: Option<NaiveDate>,

    pub commentaires: Option<String>,

    #[validate(url(message = "Le lien du catalogue doit être une URL valide"))]
    pub lien_catalogue: Option<String>,
}
