// src/models/client.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::collection::{Collection, Document};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    #[schema(example = "C3")]
    pub reference: String,

    #[schema(example = "Hélène Dubois")]
    pub nom: String,

    pub email: Option<String>,
    pub telephone: Option<String>,
    pub coordonnees: Option<String>,

    #[schema(example = "Collectionneur")]
    pub categorie: Option<String>,

    // Parceiro que trouxe o cliente (opcional)
    pub id_partenaire: Option<Uuid>,

    pub historique_achats: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date_dernier_contact: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub derniere_relance: Option<NaiveDate>,

    pub commentaires: Option<String>,
}

impl Document for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(required(message = "Le nom du client est requis"), length(min = 1, message = "Le nom du client est requis"))]
    #[schema(example = "Hélène Dubois")]
    pub nom: Option<String>,

    #[validate(email(message = "L'adresse e-mail est invalide"))]
    pub email: Option<String>,

    pub telephone: Option<String>,
    pub coordonnees: Option<String>,
    pub categorie: Option<String>,
    pub id_partenaire: Option<Uuid>,
    pub historique_achats: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date_dernier_contact: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub derniere_relance: Option<NaiveDate>,

    pub commentaires: Option<String>,
}
