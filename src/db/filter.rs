// src/db/filter.rs

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

/// Filtro independente do armazenamento. O Postgres traduz para SQL sobre o
/// JSONB; o armazenamento em memória avalia direto no documento.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    // Substring sem diferenciar maiúsculas
    Contains { field: &'static str, needle: String },
    NumberEq { field: &'static str, value: f64 },
    DateEq { field: &'static str, date: NaiveDate },
    // Referência para outro documento (idClient, idOeuvre, ...)
    RefEq { field: &'static str, id: Uuid },
    Or(Vec<Filter>),
}

impl Filter {
    pub fn reference(field: &'static str, id: Uuid) -> Self {
        Filter::RefEq { field, id }
    }

    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Contains { field, needle } => doc
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            Filter::NumberEq { field, value } => doc
                .get(*field)
                .and_then(Value::as_f64)
                .is_some_and(|n| (n - value).abs() < 1e-9),
            Filter::DateEq { field, date } => doc
                .get(*field)
                .and_then(Value::as_str)
                .and_then(|s| s.get(..10))
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .is_some_and(|d| d == *date),
            Filter::RefEq { field, id } => doc
                .get(*field)
                .and_then(Value::as_str)
                .and_then(|s| Uuid::parse_str(s).ok())
                .is_some_and(|found| found == *id),
            Filter::Or(clauses) => clauses.iter().any(|c| c.matches(doc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contains_ignores_case_and_missing_fields() {
        let doc = json!({ "nom": "Camille MARTIN", "commentaires": null });
        let filter = Filter::Contains { field: "nom", needle: "martin".into() };
        assert!(filter.matches(&doc));

        let missing = Filter::Contains { field: "commentaires", needle: "martin".into() };
        assert!(!missing.matches(&doc));
    }

    #[test]
    fn number_and_date_equality() {
        let doc = json!({ "prixVente": 4500.0, "dateVente": "2024-03-15" });

        assert!(Filter::NumberEq { field: "prixVente", value: 4500.0 }.matches(&doc));
        assert!(!Filter::NumberEq { field: "prixVente", value: 450.0 }.matches(&doc));

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(Filter::DateEq { field: "dateVente", date }.matches(&doc));
    }

    #[test]
    fn empty_or_matches_nothing() {
        assert!(!Filter::Or(vec![]).matches(&json!({ "nom": "x" })));
        assert!(Filter::All.matches(&json!({})));
    }

    #[test]
    fn reference_matches_uuid_strings() {
        let id = Uuid::new_v4();
        let doc = json!({ "idClient": id.to_string() });
        assert!(Filter::reference("idClient", id).matches(&doc));
        assert!(!Filter::reference("idClient", Uuid::new_v4()).matches(&doc));
    }
}
