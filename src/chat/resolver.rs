// src/chat/resolver.rs

use crate::models::Collection;

/// Decide quais coleções uma mensagem consulta.
pub trait IntentResolver: Send + Sync {
    /// `active` vazio significa todas as coleções.
    fn resolve(&self, query: &str, active: &[Collection]) -> Vec<Collection>;
}

/// Palavras-chave em francês que apontam para cada coleção.
pub fn keywords(collection: Collection) -> &'static [&'static str] {
    match collection {
        Collection::Artistes => &["artiste", "peintre", "sculpteur", "photographe", "créateur"],
        Collection::Oeuvres => &["oeuvre", "œuvre", "toile", "peinture", "sculpture", "pièce", "création"],
        Collection::Clients => &["client", "acheteur", "collectionneur", "acquéreur"],
        Collection::Partenaires => &["partenaire", "fournisseur", "encadreur", "prestataire"],
        Collection::Ventes => &["vente", "vendu", "transaction", "chiffre d'affaires"],
        Collection::Budget => &["budget", "dépense", "depense", "revenu", "recette", "frais", "comptab"],
        Collection::Suivis => &["suivi", "relance", "rappel", "rendez-vous", "contact"],
    }
}

/// Casamento literal: primeiro o nome da coleção, depois as palavras-chave.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResolver;

impl IntentResolver for KeywordResolver {
    fn resolve(&self, query: &str, active: &[Collection]) -> Vec<Collection> {
        let active: &[Collection] = if active.is_empty() { &Collection::ALL } else { active };
        let query = query.to_lowercase();

        let by_name: Vec<Collection> = active
            .iter()
            .copied()
            .filter(|c| query.contains(c.name()))
            .collect();
        if !by_name.is_empty() {
            return by_name;
        }

        active
            .iter()
            .copied()
            .filter(|c| keywords(*c).iter().any(|k| query.contains(k)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_name_wins_over_keywords() {
        let resolved = KeywordResolver.resolve(
            "Quels artistes sont représentés ?",
            &[Collection::Artistes, Collection::Oeuvres],
        );
        assert_eq!(resolved, vec![Collection::Artistes]);
    }

    #[test]
    fn keywords_can_hit_several_collections() {
        let resolved = KeywordResolver.resolve(
            "Quel peintre a fait la plus grosse vente ?",
            &[Collection::Artistes, Collection::Ventes, Collection::Budget],
        );
        assert_eq!(resolved, vec![Collection::Artistes, Collection::Ventes]);
    }

    #[test]
    fn empty_active_set_means_every_collection() {
        let resolved = KeywordResolver.resolve("Les RELANCES prévues", &[]);
        assert_eq!(resolved, vec![Collection::Suivis]);
    }

    #[test]
    fn inactive_collections_are_never_returned() {
        let resolved = KeywordResolver.resolve("liste des clients", &[Collection::Artistes]);
        assert!(resolved.is_empty());
    }

    #[test]
    fn unrelated_message_resolves_to_nothing() {
        assert!(KeywordResolver.resolve("Bonjour, il fait beau", &[]).is_empty());
    }
}
