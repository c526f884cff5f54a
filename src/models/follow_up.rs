// src/models/follow_up.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::client::Client;
use super::collection::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ContactType {
    Email,
    #[serde(rename = "Téléphone")]
    Telephone,
    #[serde(rename = "Rendez-vous")]
    RendezVous,
    Autre,
}

impl ContactType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactType::Email => "Email",
            ContactType::Telephone => "Téléphone",
            ContactType::RendezVous => "Rendez-vous",
            ContactType::Autre => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum FollowUpStatus {
    #[default]
    #[serde(rename = "En cours")]
    EnCours,
    #[serde(rename = "Terminé")]
    Termine,
    #[serde(rename = "En attente")]
    EnAttente,
}

impl FollowUpStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FollowUpStatus::EnCours => "En cours",
            FollowUpStatus::Termine => "Terminé",
            FollowUpStatus::EnAttente => "En attente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    Haute,
    #[default]
    Moyenne,
    Basse,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Haute => "Haute",
            Priority::Moyenne => "Moyenne",
            Priority::Basse => "Basse",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: Uuid,

    #[schema(example = "S5")]
    pub reference: String,

    pub id_client: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-05-02")]
    pub date_contact: NaiveDate,

    pub type_contact: ContactType,

    pub contenu: Option<String>,

    // Próximos passos combinados com o cliente
    pub suite: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-05-16")]
    pub rappel: Option<NaiveDate>,

    #[serde(default)]
    pub statut: FollowUpStatus,

    #[serde(default)]
    pub priorite: Priority,
}

impl Document for FollowUp {
    const COLLECTION: Collection = Collection::Suivis;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpDetail {
    #[serde(flatten)]
    pub follow_up: FollowUp,

    pub client: Option<Client>,
}

// Obrigatórios checados um a um no serviço, cada um com sua mensagem.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPayload {
    pub id_client: Option<Uuid>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-05-02")]
    pub date_contact: Option<NaiveDate>,

    pub type_contact: Option<ContactType>,
    pub contenu: Option<String>,
    pub suite: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub rappel: Option<NaiveDate>,

    pub statut: Option<FollowUpStatus>,
    pub priorite: Option<Priority>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpQuery {
    pub priorite: Option<Priority>,

    // Busca livre no nome do cliente e no conteúdo
    pub q: Option<String>,
}
