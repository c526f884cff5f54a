// src/services/artwork_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Repository},
    models::{
        artist::Artist,
        artwork::{Artwork, ArtworkDetail, ArtworkPayload, Availability},
    },
    services::{non_blank, required},
};

const TITLE_AND_ARTIST_REQUIRED: &str = "Le titre et l'artiste sont requis";

// Vendida => data de venda preenchida
fn check_sale_date(availability: Availability, date_vente: Option<NaiveDate>) -> Result<(), AppError> {
    if availability == Availability::Sold && date_vente.is_none() {
        return Err(AppError::Validation(
            "La date de vente est obligatoire pour une œuvre vendue".into(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ArtworkService {
    artworks: Repository<Artwork>,
    artists: Repository<Artist>,
}

impl ArtworkService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            artworks: Repository::new(store.clone()),
            artists: Repository::new(store),
        }
    }

    async fn with_artists(&self, artworks: Vec<Artwork>) -> Result<Vec<ArtworkDetail>, AppError> {
        let artists: HashMap<Uuid, Artist> = self
            .artists
            .find_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(artworks
            .into_iter()
            .map(|artwork| ArtworkDetail {
                artiste: artists.get(&artwork.id_artiste).cloned(),
                artwork,
            })
            .collect())
    }

    async fn detail(&self, artwork: Artwork) -> Result<ArtworkDetail, AppError> {
        let artiste = self.artists.find_by_id(artwork.id_artiste).await?;
        Ok(ArtworkDetail { artwork, artiste })
    }

    async fn find(&self, id: Uuid) -> Result<Artwork, AppError> {
        self.artworks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Oeuvre non trouvée".into()))
    }

    async fn ensure_artist(&self, id: Uuid) -> Result<(), AppError> {
        match self.artists.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::Validation("Artiste non trouvé".into())),
        }
    }

    pub async fn list(&self) -> Result<Vec<ArtworkDetail>, AppError> {
        let artworks = self.artworks.find_all().await?;
        self.with_artists(artworks).await
    }

    /// Obras que ainda podem ser vendidas (tudo menos `sold`).
    pub async fn list_available(&self) -> Result<Vec<ArtworkDetail>, AppError> {
        let artworks = self
            .artworks
            .find_all()
            .await?
            .into_iter()
            .filter(|a| !a.is_sold())
            .collect();
        self.with_artists(artworks).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ArtworkDetail, AppError> {
        let artwork = self.find(id).await?;
        self.detail(artwork).await
    }

    pub async fn create(&self, payload: ArtworkPayload) -> Result<ArtworkDetail, AppError> {
        let titre = required(non_blank(payload.titre), TITLE_AND_ARTIST_REQUIRED)?;
        let id_artiste = required(payload.id_artiste, TITLE_AND_ARTIST_REQUIRED)?;
        self.ensure_artist(id_artiste).await?;

        let availability = payload.availability.unwrap_or_default();
        check_sale_date(availability, payload.date_vente)?;

        let artwork = Artwork {
            id: Uuid::new_v4(),
            reference: self.artworks.next_reference().await?,
            titre,
            id_artiste,
            annee_creation: payload.annee_creation,
            technique: non_blank(payload.technique),
            dimensions: non_blank(payload.dimensions),
            prix_vente: payload.prix_vente,
            reduction: payload.reduction,
            property_status: payload.property_status,
            consignment_duration: payload.consignment_duration,
            availability,
            date_vente: payload.date_vente,
            commentaires: non_blank(payload.commentaires),
        };

        self.artworks.insert(&artwork).await?;
        tracing::info!("Obra {} criada ({})", artwork.reference, artwork.titre);
        self.detail(artwork).await
    }

    pub async fn update(&self, id: Uuid, payload: ArtworkPayload) -> Result<ArtworkDetail, AppError> {
        let current = self.find(id).await?;

        let titre = required(non_blank(payload.titre), TITLE_AND_ARTIST_REQUIRED)?;
        let id_artiste = required(payload.id_artiste, TITLE_AND_ARTIST_REQUIRED)?;
        if id_artiste != current.id_artiste {
            self.ensure_artist(id_artiste).await?;
        }

        let availability = payload.availability.unwrap_or(current.availability);
        if current.is_sold() && availability != Availability::Sold {
            return Err(AppError::Conflict(
                "Une œuvre vendue ne peut pas être remise en vente".into(),
            ));
        }

        let date_vente = match availability {
            Availability::Sold => payload.date_vente.or(current.date_vente),
            _ => payload.date_vente,
        };
        check_sale_date(availability, date_vente)?;

        let artwork = Artwork {
            titre,
            id_artiste,
            annee_creation: payload.annee_creation,
            technique: non_blank(payload.technique),
            dimensions: non_blank(payload.dimensions),
            prix_vente: payload.prix_vente,
            reduction: payload.reduction,
            property_status: payload.property_status,
            consignment_duration: payload.consignment_duration,
            availability,
            date_vente,
            commentaires: non_blank(payload.commentaires),
            ..current
        };

        self.artworks.update(&artwork).await?;
        self.detail(artwork).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let artwork = self.find(id).await?;
        if artwork.is_sold() {
            return Err(AppError::Conflict("Impossible de supprimer une œuvre vendue".into()));
        }

        self.artworks.delete(id).await?;
        tracing::info!("Obra {} removida", artwork.reference);
        Ok(())
    }
}
