// src/models/collection.rs

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// As coleções de documentos da galeria. O nome serializado é também o nome
/// da tabela no Postgres e o que o assistente procura nas mensagens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Artistes,
    Oeuvres,
    Clients,
    Partenaires,
    Ventes,
    Budget,
    Suivis,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Artistes,
        Collection::Oeuvres,
        Collection::Clients,
        Collection::Partenaires,
        Collection::Ventes,
        Collection::Budget,
        Collection::Suivis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Artistes => "artistes",
            Collection::Oeuvres => "oeuvres",
            Collection::Clients => "clients",
            Collection::Partenaires => "partenaires",
            Collection::Ventes => "ventes",
            Collection::Budget => "budget",
            Collection::Suivis => "suivis",
        }
    }

    /// Prefixo da referência legível (A1, O12, ...)
    pub fn reference_prefix(self) -> char {
        match self {
            Collection::Artistes => 'A',
            Collection::Oeuvres => 'O',
            Collection::Clients => 'C',
            Collection::Partenaires => 'P',
            Collection::Ventes => 'V',
            Collection::Budget => 'B',
            Collection::Suivis => 'S',
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Um documento persistido numa coleção.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Collection::from_name(" Artistes "), Some(Collection::Artistes));
        assert_eq!(Collection::from_name("budget"), Some(Collection::Budget));
        assert_eq!(Collection::from_name("galeries"), None);
    }

    #[test]
    fn serde_name_matches_table_name() {
        for collection in Collection::ALL {
            let json = serde_json::to_value(collection).unwrap();
            assert_eq!(json.as_str(), Some(collection.name()));
        }
    }
}
