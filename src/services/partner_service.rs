// src/services/partner_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Repository},
    models::partner::{Partner, PartnerPayload},
    services::{non_blank, required},
};

#[derive(Clone)]
pub struct PartnerService {
    partners: Repository<Partner>,
}

impl PartnerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { partners: Repository::new(store) }
    }

    pub async fn list(&self) -> Result<Vec<Partner>, AppError> {
        self.partners.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Partner, AppError> {
        self.partners
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Partenaire non trouvé".into()))
    }

    pub async fn create(&self, payload: PartnerPayload) -> Result<Partner, AppError> {
        let partner = Partner {
            id: Uuid::new_v4(),
            reference: self.partners.next_reference().await?,
            nom: required(non_blank(payload.nom), "Le nom du partenaire est requis")?,
            kind: non_blank(payload.kind),
            coordonnees: non_blank(payload.coordonnees),
            date_partenariat: payload.date_partenariat,
            conditions: non_blank(payload.conditions),
            commentaires: non_blank(payload.commentaires),
        };

        self.partners.insert(&partner).await?;
        Ok(partner)
    }

    pub async fn update(&self, id: Uuid, payload: PartnerPayload) -> Result<Partner, AppError> {
        let current = self.get(id).await?;

        let partner = Partner {
            nom: required(non_blank(payload.nom), "Le nom du partenaire est requis")?,
            kind: non_blank(payload.kind),
            coordonnees: non_blank(payload.coordonnees),
            date_partenariat: payload.date_partenariat,
            conditions: non_blank(payload.conditions),
            commentaires: non_blank(payload.commentaires),
            ..current
        };

        self.partners.update(&partner).await?;
        Ok(partner)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.partners.delete(id).await? {
            return Err(AppError::NotFound("Partenaire non trouvé".into()));
        }
        Ok(())
    }
}
