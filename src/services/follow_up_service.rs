// src/services/follow_up_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Repository},
    models::{
        client::Client,
        follow_up::{FollowUp, FollowUpDetail, FollowUpPayload, FollowUpQuery},
    },
    services::{non_blank, required},
};

#[derive(Clone)]
pub struct FollowUpService {
    follow_ups: Repository<FollowUp>,
    clients: Repository<Client>,
}

impl FollowUpService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            follow_ups: Repository::new(store.clone()),
            clients: Repository::new(store),
        }
    }

    async fn find(&self, id: Uuid) -> Result<FollowUp, AppError> {
        self.follow_ups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Suivi non trouvé".into()))
    }

    async fn detail(&self, follow_up: FollowUp) -> Result<FollowUpDetail, AppError> {
        let client = self.clients.find_by_id(follow_up.id_client).await?;
        Ok(FollowUpDetail { follow_up, client })
    }

    async fn existing_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Validation("Erreur: Client non trouvé".into()))
    }

    /// Filtra por prioridade e por texto livre (nome do cliente, conteúdo, suite).
    /// Ordem: contato mais recente primeiro.
    pub async fn list(&self, query: FollowUpQuery) -> Result<Vec<FollowUpDetail>, AppError> {
        let clients: HashMap<Uuid, Client> = self
            .clients
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let needle = non_blank(query.q).map(|q| q.to_lowercase());

        let mut details: Vec<FollowUpDetail> = self
            .follow_ups
            .find_all()
            .await?
            .into_iter()
            .filter(|s| query.priorite.is_none_or(|p| s.priorite == p))
            .map(|follow_up| FollowUpDetail {
                client: clients.get(&follow_up.id_client).cloned(),
                follow_up,
            })
            .filter(|d| match &needle {
                None => true,
                Some(needle) => {
                    let haystacks = [
                        d.client.as_ref().map(|c| c.nom.as_str()),
                        d.follow_up.contenu.as_deref(),
                        d.follow_up.suite.as_deref(),
                    ];
                    haystacks
                        .into_iter()
                        .flatten()
                        .any(|text| text.to_lowercase().contains(needle))
                }
            })
            .collect();

        details.sort_by(|a, b| b.follow_up.date_contact.cmp(&a.follow_up.date_contact));
        Ok(details)
    }

    pub async fn get(&self, id: Uuid) -> Result<FollowUpDetail, AppError> {
        let follow_up = self.find(id).await?;
        self.detail(follow_up).await
    }

    pub async fn create(&self, payload: FollowUpPayload) -> Result<FollowUpDetail, AppError> {
        let id_client = required(payload.id_client, "Erreur: Client requis")?;
        let date_contact = required(payload.date_contact, "Erreur: Date de contact requise")?;
        let type_contact = required(payload.type_contact, "Erreur: Type de contact requis")?;
        let client = self.existing_client(id_client).await?;

        let follow_up = FollowUp {
            id: Uuid::new_v4(),
            reference: self.follow_ups.next_reference().await?,
            id_client,
            date_contact,
            type_contact,
            contenu: non_blank(payload.contenu),
            suite: non_blank(payload.suite),
            rappel: payload.rappel,
            statut: payload.statut.unwrap_or_default(),
            priorite: payload.priorite.unwrap_or_default(),
        };

        self.follow_ups.insert(&follow_up).await?;
        tracing::info!("Suivi {} registrado para {}", follow_up.reference, client.nom);
        Ok(FollowUpDetail { follow_up, client: Some(client) })
    }

    /// Atualização parcial: campo omitido ou em branco mantém o valor atual.
    pub async fn update(&self, id: Uuid, payload: FollowUpPayload) -> Result<FollowUpDetail, AppError> {
        let current = self.find(id).await?;

        let id_client = payload.id_client.unwrap_or(current.id_client);
        if id_client != current.id_client {
            self.existing_client(id_client).await?;
        }

        let follow_up = FollowUp {
            id_client,
            date_contact: payload.date_contact.unwrap_or(current.date_contact),
            type_contact: payload.type_contact.unwrap_or(current.type_contact),
            contenu: non_blank(payload.contenu).or(current.contenu),
            suite: non_blank(payload.suite).or(current.suite),
            rappel: payload.rappel.or(current.rappel),
            statut: payload.statut.unwrap_or(current.statut),
            priorite: payload.priorite.unwrap_or(current.priorite),
            ..current
        };

        self.follow_ups.update(&follow_up).await?;
        self.detail(follow_up).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.follow_ups.delete(id).await? {
            return Err(AppError::NotFound("Suivi non trouvé".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::{
        client::ClientPayload,
        follow_up::{ContactType, FollowUpStatus, Priority},
    };
    use crate::services::ClientService;
    use chrono::NaiveDate;

    fn follow_up_payload(id_client: Option<Uuid>, day: u32, priorite: Priority, contenu: &str) -> FollowUpPayload {
        FollowUpPayload {
            id_client,
            date_contact: NaiveDate::from_ymd_opt(2024, 5, day),
            type_contact: Some(ContactType::Telephone),
            contenu: Some(contenu.into()),
            suite: None,
            rappel: None,
            statut: None,
            priorite: Some(priorite),
        }
    }

    async fn setup() -> (FollowUpService, Client) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let client = ClientService::new(store.clone())
            .create(ClientPayload {
                nom: Some("Hélène Dubois".into()),
                email: None,
                telephone: None,
                coordonnees: None,
                categorie: None,
                id_partenaire: None,
                historique_achats: None,
                date_dernier_contact: None,
                derniere_relance: None,
                commentaires: None,
            })
            .await
            .unwrap();
        (FollowUpService::new(store), client)
    }

    #[tokio::test]
    async fn each_missing_field_has_its_own_message() {
        let (service, client) = setup().await;

        let err = service
            .create(follow_up_payload(None, 2, Priority::Haute, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Erreur: Client requis"));

        let mut no_type = follow_up_payload(Some(client.id), 2, Priority::Haute, "x");
        no_type.type_contact = None;
        let err = service.create(no_type).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Erreur: Type de contact requis"));

        let err = service
            .create(follow_up_payload(Some(Uuid::new_v4()), 2, Priority::Haute, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Erreur: Client non trouvé"));
    }

    #[tokio::test]
    async fn defaults_and_filters() {
        let (service, client) = setup().await;

        let created = service
            .create(follow_up_payload(Some(client.id), 2, Priority::Haute, "Devis envoyé"))
            .await
            .unwrap();
        assert_eq!(created.follow_up.statut, FollowUpStatus::EnCours);
        assert_eq!(created.client.as_ref().map(|c| c.nom.as_str()), Some("Hélène Dubois"));

        service
            .create(follow_up_payload(Some(client.id), 9, Priority::Basse, "Vernissage"))
            .await
            .unwrap();

        let all = service.list(FollowUpQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].follow_up.contenu.as_deref(), Some("Vernissage"));

        let urgent = service
            .list(FollowUpQuery { priorite: Some(Priority::Haute), q: None })
            .await
            .unwrap();
        assert_eq!(urgent.len(), 1);

        let by_client = service
            .list(FollowUpQuery { priorite: None, q: Some("dubois".into()) })
            .await
            .unwrap();
        assert_eq!(by_client.len(), 2);

        let by_content = service
            .list(FollowUpQuery { priorite: None, q: Some("devis".into()) })
            .await
            .unwrap();
        assert_eq!(by_content.len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_omitted_fields() {
        let (service, client) = setup().await;

        let mut payload = follow_up_payload(Some(client.id), 2, Priority::Haute, "Devis envoyé");
        payload.suite = Some("Rappeler après le vernissage".into());
        payload.rappel = NaiveDate::from_ymd_opt(2024, 6, 1);
        let created = service.create(payload).await.unwrap();

        let partial = FollowUpPayload {
            id_client: None,
            date_contact: None,
            type_contact: None,
            contenu: None,
            suite: Some("  ".into()),
            rappel: None,
            statut: Some(FollowUpStatus::Termine),
            priorite: None,
        };
        let updated = service.update(created.follow_up.id, partial).await.unwrap();

        assert_eq!(updated.follow_up.statut, FollowUpStatus::Termine);
        assert_eq!(updated.follow_up.contenu.as_deref(), Some("Devis envoyé"));
        assert_eq!(updated.follow_up.suite.as_deref(), Some("Rappeler après le vernissage"));
        assert_eq!(updated.follow_up.rappel, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(updated.follow_up.priorite, Priority::Haute);
    }
}
