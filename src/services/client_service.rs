// src/services/client_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Filter, Repository},
    models::{
        client::{Client, ClientPayload},
        follow_up::FollowUp,
        partner::Partner,
        sale::Sale,
    },
    services::{non_blank, required},
};

#[derive(Clone)]
pub struct ClientService {
    clients: Repository<Client>,
    partners: Repository<Partner>,
    sales: Repository<Sale>,
    follow_ups: Repository<FollowUp>,
}

impl ClientService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            clients: Repository::new(store.clone()),
            partners: Repository::new(store.clone()),
            sales: Repository::new(store.clone()),
            follow_ups: Repository::new(store),
        }
    }

    async fn ensure_partner(&self, id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(id) = id {
            if self.partners.find_by_id(id).await?.is_none() {
                return Err(AppError::Validation("Partenaire non trouvé".into()));
            }
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        self.clients.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client non trouvé".into()))
    }

    pub async fn create(&self, payload: ClientPayload) -> Result<Client, AppError> {
        let nom = required(non_blank(payload.nom), "Le nom du client est requis")?;
        self.ensure_partner(payload.id_partenaire).await?;

        let client = Client {
            id: Uuid::new_v4(),
            reference: self.clients.next_reference().await?,
            nom,
            email: non_blank(payload.email),
            telephone: non_blank(payload.telephone),
            coordonnees: non_blank(payload.coordonnees),
            categorie: non_blank(payload.categorie),
            id_partenaire: payload.id_partenaire,
            historique_achats: non_blank(payload.historique_achats),
            date_dernier_contact: payload.date_dernier_contact,
            derniere_relance: payload.derniere_relance,
            commentaires: non_blank(payload.commentaires),
        };

        self.clients.insert(&client).await?;
        tracing::info!("Cliente {} criado", client.reference);
        Ok(client)
    }

    pub async fn update(&self, id: Uuid, payload: ClientPayload) -> Result<Client, AppError> {
        let current = self.get(id).await?;
        let nom = required(non_blank(payload.nom), "Le nom du client est requis")?;
        if payload.id_partenaire != current.id_partenaire {
            self.ensure_partner(payload.id_partenaire).await?;
        }

        let client = Client {
            nom,
            email: non_blank(payload.email),
            telephone: non_blank(payload.telephone),
            coordonnees: non_blank(payload.coordonnees),
            categorie: non_blank(payload.categorie),
            id_partenaire: payload.id_partenaire,
            historique_achats: non_blank(payload.historique_achats),
            date_dernier_contact: payload.date_dernier_contact,
            derniere_relance: payload.derniere_relance,
            commentaires: non_blank(payload.commentaires),
            ..current
        };

        self.clients.update(&client).await?;
        Ok(client)
    }

    /// Recusa se o cliente tem vendas; senão apaga também os seus suivis.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let client = self.get(id).await?;

        let sales = self.sales.find(&Filter::reference("idClient", id)).await?;
        if !sales.is_empty() {
            return Err(AppError::Conflict(format!(
                "Impossible de supprimer ce client : {} vente(s) enregistrée(s)",
                sales.len()
            )));
        }

        let follow_ups = self.follow_ups.find(&Filter::reference("idClient", id)).await?;
        for follow_up in &follow_ups {
            self.follow_ups.delete(follow_up.id).await?;
        }

        self.clients.delete(id).await?;
        tracing::info!(
            "Cliente {} removido com {} suivi(s)",
            client.reference,
            follow_ups.len()
        );
        Ok(())
    }
}
