// src/chat/record.rs

use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_json::Value;

use crate::models::{
    artist::Artist, artwork::Artwork, budget::BudgetEntry, client::Client, follow_up::FollowUp,
    partner::Partner, sale::Sale, Collection,
};

/// Um resultado de busca já tipado, um caso por entidade.
#[derive(Debug, Clone)]
pub enum Record {
    Artist(Artist),
    Artwork(Artwork),
    Client(Client),
    Partner(Partner),
    Sale(Sale),
    Budget(BudgetEntry),
    FollowUp(FollowUp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    // Valor de um conjunto fechado (status, tipo, categoria...)
    Category(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Category(s) => f.write_str(s),
            FieldValue::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
            FieldValue::Empty => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: FieldValue,
}

fn text(name: &'static str, value: &str) -> Field {
    Field { name, value: FieldValue::Text(value.to_string()) }
}

fn opt_text(name: &'static str, value: Option<&String>) -> Field {
    let value = match value {
        Some(s) if !s.trim().is_empty() => FieldValue::Text(s.clone()),
        _ => FieldValue::Empty,
    };
    Field { name, value }
}

fn category(name: &'static str, value: Option<&str>) -> Field {
    let value = match value {
        Some(s) if !s.is_empty() => FieldValue::Category(s.to_string()),
        _ => FieldValue::Empty,
    };
    Field { name, value }
}

fn decimal(name: &'static str, value: Option<Decimal>) -> Field {
    let value = value
        .and_then(|d| d.to_f64())
        .map_or(FieldValue::Empty, FieldValue::Number);
    Field { name, value }
}

fn date(name: &'static str, value: Option<NaiveDate>) -> Field {
    Field { name, value: value.map_or(FieldValue::Empty, FieldValue::Date) }
}

impl Record {
    pub fn from_document(collection: Collection, doc: Value) -> Result<Self, serde_json::Error> {
        Ok(match collection {
            Collection::Artistes => Record::Artist(serde_json::from_value(doc)?),
            Collection::Oeuvres => Record::Artwork(serde_json::from_value(doc)?),
            Collection::Clients => Record::Client(serde_json::from_value(doc)?),
            Collection::Partenaires => Record::Partner(serde_json::from_value(doc)?),
            Collection::Ventes => Record::Sale(serde_json::from_value(doc)?),
            Collection::Budget => Record::Budget(serde_json::from_value(doc)?),
            Collection::Suivis => Record::FollowUp(serde_json::from_value(doc)?),
        })
    }

    /// Campos exibíveis, em ordem fixa. Identificadores internos ficam de fora.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Record::Artist(a) => vec![
                text("reference", &a.reference),
                text("nom", &a.nom),
                category("statut", a.statut.map(|s| s.as_str())),
                opt_text("coordonnees", a.coordonnees.as_ref()),
                date("dateIntegration", a.date_integration),
                opt_text("commentaires", a.commentaires.as_ref()),
                opt_text("lienCatalogue", a.lien_catalogue.as_ref()),
            ],
            Record::Artwork(o) => vec![
                text("reference", &o.reference),
                text("titre", &o.titre),
                decimal("anneeCreation", o.annee_creation.map(Decimal::from)),
                opt_text("technique", o.technique.as_ref()),
                opt_text("dimensions", o.dimensions.as_ref()),
                decimal("prixVente", o.prix_vente),
                decimal("reduction", o.reduction),
                category("propertyStatus", o.property_status.map(|s| s.as_str())),
                category("consignmentDuration", o.consignment_duration.map(|d| d.as_str())),
                category("availability", Some(o.availability.as_str())),
                date("dateVente", o.date_vente),
                opt_text("commentaires", o.commentaires.as_ref()),
            ],
            Record::Client(c) => vec![
                text("reference", &c.reference),
                text("nom", &c.nom),
                opt_text("email", c.email.as_ref()),
                opt_text("telephone", c.telephone.as_ref()),
                opt_text("coordonnees", c.coordonnees.as_ref()),
                category("categorie", c.categorie.as_deref()),
                opt_text("historiqueAchats", c.historique_achats.as_ref()),
                date("dateDernierContact", c.date_dernier_contact),
                date("derniereRelance", c.derniere_relance),
                opt_text("commentaires", c.commentaires.as_ref()),
            ],
            Record::Partner(p) => vec![
                text("reference", &p.reference),
                text("nom", &p.nom),
                category("type", p.kind.as_deref()),
                opt_text("coordonnees", p.coordonnees.as_ref()),
                date("datePartenariat", p.date_partenariat),
                opt_text("conditions", p.conditions.as_ref()),
                opt_text("commentaires", p.commentaires.as_ref()),
            ],
            Record::Sale(v) => vec![
                text("reference", &v.reference),
                date("dateVente", Some(v.date_vente)),
                decimal("prixVente", Some(v.prix_vente)),
                decimal("commission", v.commission),
                opt_text("modePaiement", v.mode_paiement.as_ref()),
                opt_text("commentaires", v.commentaires.as_ref()),
            ],
            Record::Budget(b) => vec![
                text("reference", &b.reference),
                date("date", Some(b.date)),
                category("categorie", Some(b.categorie.as_str())),
                opt_text("description", b.description.as_ref()),
                decimal("montant", Some(b.montant)),
                category("type", Some(b.kind.as_str())),
            ],
            Record::FollowUp(s) => vec![
                text("reference", &s.reference),
                date("dateContact", Some(s.date_contact)),
                category("typeContact", Some(s.type_contact.as_str())),
                opt_text("contenu", s.contenu.as_ref()),
                opt_text("suite", s.suite.as_ref()),
                date("rappel", s.rappel),
                category("statut", Some(s.statut.as_str())),
                category("priorite", Some(s.priorite.as_str())),
            ],
        }
    }

    /// Campo de data principal, usado na cronologia.
    pub fn timeline_field(&self) -> Option<&'static str> {
        match self {
            Record::Sale(_) => Some("dateVente"),
            Record::Budget(_) => Some("date"),
            Record::FollowUp(_) => Some("dateContact"),
            _ => None,
        }
    }

    pub fn timeline_date(&self) -> Option<NaiveDate> {
        match self {
            Record::Sale(v) => Some(v.date_vente),
            Record::Budget(b) => Some(b.date),
            Record::FollowUp(s) => Some(s.date_contact),
            _ => None,
        }
    }

    /// Par (rótulo, valor) para o gráfico de barras.
    pub fn chart_point(&self) -> Option<(String, f64)> {
        match self {
            Record::Artwork(o) => Some((o.titre.clone(), o.prix_vente?.to_f64()?)),
            Record::Sale(v) => Some((v.reference.clone(), v.prix_vente.to_f64()?)),
            Record::Budget(b) => {
                let label = b.description.clone().unwrap_or_else(|| b.categorie.clone());
                Some((label, b.montant.to_f64()?))
            }
            _ => None,
        }
    }
}
