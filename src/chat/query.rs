// src/chat/query.rs

use chrono::NaiveDate;

use crate::{chat::resolver::keywords, db::Filter, models::Collection};

/// Campos pesquisáveis de uma coleção, por tipo.
#[derive(Debug)]
pub struct CollectionFields {
    pub text: &'static [&'static str],
    pub numeric: &'static [&'static str],
    pub dates: &'static [&'static str],
    pub categorical: &'static [&'static str],
}

pub struct FieldRegistry;

impl FieldRegistry {
    pub fn of(collection: Collection) -> &'static CollectionFields {
        match collection {
            Collection::Artistes => &CollectionFields {
                text: &["reference", "nom", "coordonnees", "commentaires"],
                numeric: &[],
                dates: &["dateIntegration"],
                categorical: &["statut"],
            },
            Collection::Oeuvres => &CollectionFields {
                text: &["reference", "titre", "technique", "dimensions", "commentaires"],
                numeric: &["anneeCreation", "prixVente", "reduction"],
                dates: &["dateVente"],
                categorical: &["propertyStatus", "consignmentDuration", "availability"],
            },
            Collection::Clients => &CollectionFields {
                text: &[
                    "reference",
                    "nom",
                    "email",
                    "telephone",
                    "coordonnees",
                    "historiqueAchats",
                    "commentaires",
                ],
                numeric: &[],
                dates: &["dateDernierContact", "derniereRelance"],
                categorical: &["categorie"],
            },
            Collection::Partenaires => &CollectionFields {
                text: &["reference", "nom", "coordonnees", "conditions", "commentaires"],
                numeric: &[],
                dates: &["datePartenariat"],
                categorical: &["type"],
            },
            Collection::Ventes => &CollectionFields {
                text: &["reference", "modePaiement", "commentaires"],
                numeric: &["prixVente", "commission"],
                dates: &["dateVente"],
                categorical: &[],
            },
            Collection::Budget => &CollectionFields {
                text: &["reference", "description", "categorie"],
                numeric: &["montant"],
                dates: &["date"],
                categorical: &["type"],
            },
            Collection::Suivis => &CollectionFields {
                text: &["reference", "contenu", "suite"],
                numeric: &[],
                dates: &["dateContact", "rappel"],
                categorical: &["typeContact", "statut", "priorite"],
            },
        }
    }
}

const STOP_WORDS: &[&str] = &[
    "les", "des", "une", "est", "sont", "quel", "quels", "quelle", "quelles", "qui", "que",
    "quoi", "dans", "pour", "avec", "sur", "par", "mes", "nos", "vos", "tous", "toutes", "tout",
    "montre", "montrer", "montrez", "affiche", "afficher", "affichez", "donne", "donner",
    "donnez", "moi", "combien", "avons", "avez", "ont", "pas", "plus", "cette", "ces", "ceux",
    "leur", "leurs", "votre", "notre", "lister", "trouve", "trouver", "cherche", "chercher",
    "recherche", "aux", "entre", "depuis", "fait", "faites", "sous", "forme", "liste",
    "tableau", "graphique", "chronologie", "frise", "a-t-il", "montrez-moi", "montre-moi",
    "donnez-moi", "donne-moi", "affichez-moi", "affiche-moi",
];

// Vocabulário em francês -> valores gravados nos campos categóricos
const CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    ("représenté", "represented"),
    ("represente", "represented"),
    ("disponible", "available"),
    ("vendu", "sold"),
    ("réservé", "reserved"),
    ("reserve", "reserved"),
    ("archivé", "archived"),
    ("consignation", "consignment"),
    ("dépôt", "consignment"),
    ("galerie", "gallery"),
];

fn tokenize(query: &str) -> impl Iterator<Item = String> + '_ {
    query
        .split(|c: char| c.is_whitespace() || c == '\'' || c == '’')
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty())
}

fn is_collection_word(word: &str) -> bool {
    Collection::ALL.iter().any(|c| {
        word == c.name() || keywords(*c).iter().any(|k| word.starts_with(k))
    })
}

/// Termos de busca: a mensagem inteira mais as palavras significativas.
/// `None` quando nenhuma palavra significativa sobra (listar a coleção).
pub fn search_terms(query: &str) -> Option<Vec<String>> {
    let mut words: Vec<String> = Vec::new();
    for word in tokenize(query) {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        // "vendues" é palavra-chave de vendas mas também um status de obra
        if let Some((_, value)) = CATEGORY_SYNONYMS.iter().find(|(fr, _)| word.starts_with(fr)) {
            push_unique(&mut words, value.to_string());
            push_unique(&mut words, word);
            continue;
        }
        if !is_collection_word(&word) {
            push_unique(&mut words, word);
        }
    }

    if words.is_empty() {
        return None;
    }

    let mut terms = vec![query.trim().to_string()];
    for word in words {
        push_unique(&mut terms, word);
    }
    Some(terms)
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

/// Aceita a vírgula decimal francesa ("4500,50").
pub fn parse_number(term: &str) -> Option<f64> {
    let normalized = term.trim().replace(' ', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn parse_date(term: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(term.trim(), format).ok())
}

/// OU de todas as cláusulas possíveis entre os campos da coleção e os termos.
pub fn build_filter(fields: &CollectionFields, query: &str) -> Filter {
    let Some(terms) = search_terms(query) else {
        return Filter::All;
    };

    let mut clauses = Vec::new();

    for term in &terms {
        for field in fields.text.iter().chain(fields.categorical).copied() {
            clauses.push(Filter::Contains { field, needle: term.clone() });
        }

        if let Some(value) = parse_number(term) {
            for field in fields.numeric.iter().copied() {
                clauses.push(Filter::NumberEq { field, value });
            }
        }

        if let Some(date) = parse_date(term) {
            for field in fields.dates.iter().copied() {
                clauses.push(Filter::DateEq { field, date });
            }
        }
    }

    Filter::Or(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_words_and_stop_words_are_dropped() {
        assert_eq!(search_terms("Liste des clients"), None);
        assert_eq!(search_terms("Montrez-moi les oeuvres en tableau"), None);
    }

    #[test]
    fn french_status_words_also_search_stored_values() {
        let terms = search_terms("Quels artistes sont représentés ?").unwrap();
        assert_eq!(terms[0], "Quels artistes sont représentés ?");
        assert!(terms.contains(&"represented".to_string()));
        assert!(terms.contains(&"représentés".to_string()));
    }

    #[test]
    fn numbers_and_dates_in_french_formats() {
        assert_eq!(parse_number("4500,50"), Some(4500.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_date("15/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_date("15-03-2024"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_date("mars"), None);
    }

    #[test]
    fn numeric_query_matches_price() {
        let fields = FieldRegistry::of(Collection::Oeuvres);
        let filter = build_filter(fields, "4500");

        assert!(filter.matches(&json!({ "titre": "Nocturne", "prixVente": 4500.0 })));
        assert!(!filter.matches(&json!({ "titre": "Nocturne", "prixVente": 3200.0 })));
    }

    #[test]
    fn date_query_matches_sale_date() {
        let fields = FieldRegistry::of(Collection::Ventes);
        let filter = build_filter(fields, "ventes du 15/03/2024");

        assert!(filter.matches(&json!({ "reference": "V1", "dateVente": "2024-03-15" })));
        assert!(!filter.matches(&json!({ "reference": "V2", "dateVente": "2024-03-16" })));
    }

    #[test]
    fn represented_artists_are_found_by_status() {
        let fields = FieldRegistry::of(Collection::Artistes);
        let filter = build_filter(fields, "Quels artistes sont représentés ?");

        assert!(filter.matches(&json!({ "nom": "Camille Martin", "statut": "represented" })));
        assert!(!filter.matches(&json!({ "nom": "Jules Petit", "statut": "prospect" })));
    }

    #[test]
    fn sold_artworks_are_searched_by_availability() {
        let fields = FieldRegistry::of(Collection::Oeuvres);
        let filter = build_filter(fields, "Quelles oeuvres sont vendues ?");

        assert!(filter.matches(&json!({ "titre": "Nocturne", "availability": "sold" })));
        assert!(!filter.matches(&json!({ "titre": "Aube", "availability": "available" })));
    }

    #[test]
    fn no_search_word_lists_everything() {
        let fields = FieldRegistry::of(Collection::Clients);
        assert_eq!(build_filter(fields, "Quels sont nos clients ?"), Filter::All);
    }
}
