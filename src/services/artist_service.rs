// src/services/artist_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Filter, Repository},
    models::{
        artist::{Artist, ArtistPayload},
        artwork::Artwork,
    },
    services::{non_blank, required},
};

#[derive(Clone)]
pub struct ArtistService {
    artists: Repository<Artist>,
    artworks: Repository<Artwork>,
}

impl ArtistService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            artists: Repository::new(store.clone()),
            artworks: Repository::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<Artist>, AppError> {
        self.artists.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Artist, AppError> {
        self.artists
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Artiste non trouvé".into()))
    }

    pub async fn create(&self, payload: ArtistPayload) -> Result<Artist, AppError> {
        let artist = Artist {
            id: Uuid::new_v4(),
            reference: self.artists.next_reference().await?,
            nom: required(non_blank(payload.nom), "Le nom de l'artiste est requis")?,
            statut: payload.statut,
            coordonnees: non_blank(payload.coordonnees),
            date_integration: payload.date_integration,
            commentaires: non_blank(payload.commentaires),
            lien_catalogue: non_blank(payload.lien_catalogue),
        };

        self.artists.insert(&artist).await?;
        tracing::info!("Artista {} criado ({})", artist.reference, artist.nom);
        Ok(artist)
    }

    pub async fn update(&self, id: Uuid, payload: ArtistPayload) -> Result<Artist, AppError> {
        let current = self.get(id).await?;

        let artist = Artist {
            nom: required(non_blank(payload.nom), "Le nom de l'artiste est requis")?,
            statut: payload.statut,
            coordonnees: non_blank(payload.coordonnees),
            date_integration: payload.date_integration,
            commentaires: non_blank(payload.commentaires),
            lien_catalogue: non_blank(payload.lien_catalogue),
            ..current
        };

        self.artists.update(&artist).await?;
        Ok(artist)
    }

    /// Recusa enquanto houver obras do artista.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let artist = self.get(id).await?;

        let works = self.artworks.find(&Filter::reference("idArtiste", id)).await?;
        if !works.is_empty() {
            return Err(AppError::Conflict(format!(
                "Impossible de supprimer l'artiste : {} œuvre(s) lui sont encore associées",
                works.len()
            )));
        }

        self.artists.delete(id).await?;
        tracing::info!("Artista {} removido", artist.reference);
        Ok(())
    }
}
