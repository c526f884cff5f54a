// src/services/sale_service.rs

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Filter, Repository},
    models::{
        artwork::{Artwork, Availability, PropertyStatus},
        budget::{BudgetEntry, BudgetKind},
        client::Client,
        sale::{Sale, SaleDetail, SalePayload},
    },
    services::{non_blank, required},
};

const SALE_REQUIRED: &str = "L'œuvre, le client et la date sont obligatoires";

type Compensation = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send>>;

/// Sequência de escritas com desfazer. Cada etapa concluída registra a sua
/// compensação; se uma etapa falha, as compensações rodam em ordem inversa.
struct Saga {
    name: &'static str,
    compensations: Vec<(&'static str, Compensation)>,
}

impl Saga {
    fn new(name: &'static str) -> Self {
        Self { name, compensations: Vec::new() }
    }

    fn compensate_with<F>(&mut self, step: &'static str, undo: F)
    where
        F: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        self.compensations.push((step, Box::pin(undo)));
    }

    async fn step<T, F>(&mut self, step: &'static str, action: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match action.await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!("{}: etapa '{}' falhou: {}", self.name, step, err);
                self.rollback().await;
                Err(err)
            }
        }
    }

    async fn rollback(&mut self) {
        while let Some((step, undo)) = self.compensations.pop() {
            match undo.await {
                Ok(()) => tracing::info!("{}: etapa '{}' desfeita", self.name, step),
                Err(err) => tracing::error!(
                    "{}: falha ao desfazer a etapa '{}': {}",
                    self.name,
                    step,
                    err
                ),
            }
        }
    }
}

/// Preço final com a redução aplicada, arredondado ao centavo.
pub fn final_price(prix: Decimal, reduction: Option<Decimal>) -> Decimal {
    let reduction = reduction.unwrap_or(Decimal::ZERO);
    (prix * (Decimal::ONE_HUNDRED - reduction) / Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn commission_amount(price: Decimal, rate: Decimal) -> Decimal {
    (price * rate / Decimal::ONE_HUNDRED).round_dp(2)
}

fn positive_rate(rate: Option<Decimal>) -> Option<Decimal> {
    rate.filter(|r| *r > Decimal::ZERO)
}

#[derive(Clone)]
pub struct SaleService {
    sales: Repository<Sale>,
    artworks: Repository<Artwork>,
    clients: Repository<Client>,
    budget: Repository<BudgetEntry>,
}

impl SaleService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            sales: Repository::new(store.clone()),
            artworks: Repository::new(store.clone()),
            clients: Repository::new(store.clone()),
            budget: Repository::new(store),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Sale, AppError> {
        self.sales
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vente non trouvée".into()))
    }

    async fn load_artwork(&self, id: Uuid) -> Result<Artwork, AppError> {
        self.artworks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Oeuvre non trouvée".into()))
    }

    async fn load_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client non trouvé".into()))
    }

    fn price_of(artwork: &Artwork) -> Result<Decimal, AppError> {
        let prix = artwork.prix_vente.ok_or_else(|| {
            AppError::Validation(format!("L'œuvre « {} » n'a pas de prix de vente", artwork.titre))
        })?;
        Ok(final_price(prix, artwork.reduction))
    }

    pub async fn list(&self) -> Result<Vec<SaleDetail>, AppError> {
        let clients: HashMap<Uuid, Client> =
            self.clients.find_all().await?.into_iter().map(|c| (c.id, c)).collect();
        let artworks: HashMap<Uuid, Artwork> =
            self.artworks.find_all().await?.into_iter().map(|o| (o.id, o)).collect();

        let mut sales = self.sales.find_all().await?;
        sales.sort_by(|a, b| b.date_vente.cmp(&a.date_vente));

        Ok(sales
            .into_iter()
            .map(|sale| SaleDetail {
                client: clients.get(&sale.id_client).cloned(),
                oeuvre: artworks.get(&sale.id_oeuvre).cloned(),
                sale,
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self.find(id).await?;
        self.detail(sale).await
    }

    async fn detail(&self, sale: Sale) -> Result<SaleDetail, AppError> {
        let client = self.clients.find_by_id(sale.id_client).await?;
        let oeuvre = self.artworks.find_by_id(sale.id_oeuvre).await?;
        Ok(SaleDetail { sale, client, oeuvre })
    }

    /// Registra a venda, marca a obra como vendida e lança receita e comissão no budget.
    pub async fn create(&self, payload: SalePayload) -> Result<SaleDetail, AppError> {
        let id_oeuvre = required(payload.id_oeuvre, SALE_REQUIRED)?;
        let id_client = required(payload.id_client, SALE_REQUIRED)?;
        let date_vente = required(payload.date_vente, SALE_REQUIRED)?;

        let artwork = self.load_artwork(id_oeuvre).await?;
        let client = self.load_client(id_client).await?;
        if artwork.is_sold() {
            return Err(AppError::Conflict(format!(
                "L'œuvre « {} » est déjà vendue",
                artwork.titre
            )));
        }

        let price = Self::price_of(&artwork)?;
        let rate = positive_rate(payload.taux_commission);
        let commission = rate.map(|r| commission_amount(price, r));

        let mut saga = Saga::new("criação de venda");

        let sale = Sale {
            id: Uuid::new_v4(),
            reference: saga.step("référence", self.sales.next_reference()).await?,
            date_vente,
            id_client,
            id_oeuvre,
            prix_vente: price,
            commission,
            mode_paiement: non_blank(payload.mode_paiement),
            commentaires: non_blank(payload.commentaires),
            statut_precedent: artwork.property_status,
        };

        saga.step("enregistrer la vente", self.sales.insert(&sale)).await?;
        let sales = self.sales.clone();
        let sale_id = sale.id;
        saga.compensate_with("enregistrer la vente", async move {
            sales.delete(sale_id).await.map(|_| ())
        });

        let previous = artwork.clone();
        let sold = Artwork {
            availability: Availability::Sold,
            property_status: Some(PropertyStatus::Other),
            date_vente: Some(date_vente),
            ..artwork
        };
        saga.step("marquer l'œuvre vendue", self.artworks.update(&sold)).await?;
        let artworks = self.artworks.clone();
        saga.compensate_with("marquer l'œuvre vendue", async move {
            artworks.update(&previous).await.map(|_| ())
        });

        let revenue = BudgetEntry {
            id: Uuid::new_v4(),
            reference: saga.step("référence", self.budget.next_reference()).await?,
            date: date_vente,
            categorie: "ventes".into(),
            description: Some(format!("Vente: {} à {}", sold.titre, client.nom)),
            montant: BudgetKind::Revenu.signed(price),
            kind: BudgetKind::Revenu,
            id_vente: Some(sale.id),
        };
        saga.step("écrire la recette", self.budget.insert(&revenue)).await?;
        let budget = self.budget.clone();
        let revenue_id = revenue.id;
        saga.compensate_with("écrire la recette", async move {
            budget.delete(revenue_id).await.map(|_| ())
        });

        if let (Some(rate), Some(amount)) = (rate, commission) {
            let entry = BudgetEntry {
                id: Uuid::new_v4(),
                reference: saga.step("référence", self.budget.next_reference()).await?,
                date: date_vente,
                categorie: "commissions".into(),
                description: Some(format!("Commission pour {} ({}%)", sold.titre, rate.normalize())),
                montant: BudgetKind::Depense.signed(amount),
                kind: BudgetKind::Depense,
                id_vente: Some(sale.id),
            };
            saga.step("écrire la commission", self.budget.insert(&entry)).await?;
        }

        tracing::info!(
            "Venda {} registrada: {} para {} por {}",
            sale.reference,
            sold.titre,
            client.nom,
            price
        );

        Ok(SaleDetail { sale, client: Some(client), oeuvre: Some(sold) })
    }

    /// Recalcula o preço a partir da obra e sincroniza os lançamentos ligados.
    pub async fn update(&self, id: Uuid, payload: SalePayload) -> Result<SaleDetail, AppError> {
        let current = self.find(id).await?;

        let id_oeuvre = required(payload.id_oeuvre, SALE_REQUIRED)?;
        let id_client = required(payload.id_client, SALE_REQUIRED)?;
        let date_vente = required(payload.date_vente, SALE_REQUIRED)?;
        if id_oeuvre != current.id_oeuvre {
            return Err(AppError::Conflict(
                "L'œuvre d'une vente existante ne peut pas être changée".into(),
            ));
        }

        let artwork = self.load_artwork(id_oeuvre).await?;
        let client = self.load_client(id_client).await?;
        let price = Self::price_of(&artwork)?;
        let rate = positive_rate(payload.taux_commission);
        let commission = rate.map(|r| commission_amount(price, r));

        let sale = Sale {
            date_vente,
            id_client,
            prix_vente: price,
            commission,
            mode_paiement: non_blank(payload.mode_paiement),
            commentaires: non_blank(payload.commentaires),
            ..current
        };
        self.sales.update(&sale).await?;

        if artwork.date_vente != Some(date_vente) {
            let artwork = Artwork { date_vente: Some(date_vente), ..artwork.clone() };
            self.artworks.update(&artwork).await?;
        }

        let linked = self.budget.find(&Filter::reference("idVente", id)).await?;
        let mut commission_written = false;
        for entry in linked {
            let categorie = entry.categorie.clone();
            match (categorie.as_str(), rate, commission) {
                ("ventes", _, _) => {
                    let entry = BudgetEntry {
                        date: date_vente,
                        description: Some(format!("Vente: {} à {}", artwork.titre, client.nom)),
                        montant: BudgetKind::Revenu.signed(price),
                        ..entry
                    };
                    self.budget.update(&entry).await?;
                }
                ("commissions", Some(rate), Some(amount)) => {
                    let entry = BudgetEntry {
                        date: date_vente,
                        description: Some(format!("Commission pour {} ({}%)", artwork.titre, rate.normalize())),
                        montant: BudgetKind::Depense.signed(amount),
                        ..entry
                    };
                    self.budget.update(&entry).await?;
                    commission_written = true;
                }
                ("commissions", _, _) => {
                    self.budget.delete(entry.id).await?;
                }
                _ => {}
            }
        }

        if let (Some(rate), Some(amount), false) = (rate, commission, commission_written) {
            let entry = BudgetEntry {
                id: Uuid::new_v4(),
                reference: self.budget.next_reference().await?,
                date: date_vente,
                categorie: "commissions".into(),
                description: Some(format!("Commission pour {} ({}%)", artwork.titre, rate.normalize())),
                montant: BudgetKind::Depense.signed(amount),
                kind: BudgetKind::Depense,
                id_vente: Some(id),
            };
            self.budget.insert(&entry).await?;
        }

        self.detail(sale).await
    }

    /// Apaga a venda e os seus lançamentos; a obra volta a ficar disponível.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let sale = self.find(id).await?;

        for entry in self.budget.find(&Filter::reference("idVente", id)).await? {
            self.budget.delete(entry.id).await?;
        }

        if let Some(artwork) = self.artworks.find_by_id(sale.id_oeuvre).await? {
            let restored = Artwork {
                availability: Availability::Available,
                date_vente: None,
                property_status: sale.statut_precedent,
                ..artwork
            };
            self.artworks.update(&restored).await?;
        }

        self.sales.delete(id).await?;
        tracing::info!("Venda {} anulada", sale.reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::Collection;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::Value;

    /// Delega ao armazenamento em memória, mas recusa gravações no budget.
    struct BudgetDownStore {
        inner: MemoryDocumentStore,
    }

    #[async_trait]
    impl DocumentStore for BudgetDownStore {
        async fn next_sequence(&self, collection: Collection) -> Result<i64, AppError> {
            self.inner.next_sequence(collection).await
        }

        async fn insert(&self, collection: Collection, id: Uuid, doc: Value) -> Result<(), AppError> {
            if collection == Collection::Budget {
                return Err(AppError::InternalServerError(anyhow!("budget indisponible")));
            }
            self.inner.insert(collection, id, doc).await
        }

        async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, AppError> {
            self.inner.get(collection, id).await
        }

        async fn replace(&self, collection: Collection, id: Uuid, doc: Value) -> Result<bool, AppError> {
            self.inner.replace(collection, id, doc).await
        }

        async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
            self.inner.delete(collection, id).await
        }

        async fn find(
            &self,
            collection: Collection,
            filter: &Filter,
            limit: Option<usize>,
        ) -> Result<Vec<Value>, AppError> {
            self.inner.find(collection, filter, limit).await
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    async fn seed(store: &Arc<dyn DocumentStore>, prix: Decimal, reduction: Decimal) -> (Artwork, Client) {
        let artwork = Artwork {
            id: Uuid::new_v4(),
            reference: "O1".into(),
            titre: "Nocturne bleu".into(),
            id_artiste: Uuid::new_v4(),
            annee_creation: None,
            technique: None,
            dimensions: None,
            prix_vente: Some(prix),
            reduction: Some(reduction),
            property_status: Some(PropertyStatus::Consignment),
            consignment_duration: None,
            availability: Availability::Available,
            date_vente: None,
            commentaires: None,
        };
        let client = Client {
            id: Uuid::new_v4(),
            reference: "C1".into(),
            nom: "Hélène Dubois".into(),
            email: None,
            telephone: None,
            coordonnees: None,
            categorie: None,
            id_partenaire: None,
            historique_achats: None,
            date_dernier_contact: None,
            derniere_relance: None,
            commentaires: None,
        };
        Repository::<Artwork>::new(store.clone()).insert(&artwork).await.unwrap();
        Repository::<Client>::new(store.clone()).insert(&client).await.unwrap();
        (artwork, client)
    }

    fn payload(artwork: &Artwork, client: &Client, rate: Option<Decimal>) -> SalePayload {
        SalePayload {
            id_oeuvre: Some(artwork.id),
            id_client: Some(client.id),
            date_vente: Some(date()),
            taux_commission: rate,
            mode_paiement: Some("Virement".into()),
            commentaires: None,
        }
    }

    #[test]
    fn price_applies_discount_and_rounds_to_cents() {
        assert_eq!(final_price(Decimal::from(4500), Some(Decimal::from(10))), Decimal::from(4050));
        assert_eq!(final_price(Decimal::from(1000), None), Decimal::from(1000));
        // 333.33 * 0.85 = 283.3305
        assert_eq!(
            final_price(Decimal::new(33333, 2), Some(Decimal::from(15))),
            Decimal::new(28333, 2)
        );
        assert_eq!(commission_amount(Decimal::from(4050), Decimal::from(10)), Decimal::from(405));
    }

    #[tokio::test]
    async fn sale_marks_artwork_sold_and_writes_budget() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let (artwork, client) = seed(&store, Decimal::from(4500), Decimal::from(10)).await;
        let service = SaleService::new(store.clone());

        let created = service
            .create(payload(&artwork, &client, Some(Decimal::from(10))))
            .await
            .unwrap();
        assert_eq!(created.sale.prix_vente, Decimal::from(4050));
        assert_eq!(created.sale.commission, Some(Decimal::from(405)));

        let stored = Repository::<Artwork>::new(store.clone())
            .find_by_id(artwork.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_sold());
        assert_eq!(stored.date_vente, Some(date()));
        assert_eq!(stored.property_status, Some(PropertyStatus::Other));

        let budget = Repository::<BudgetEntry>::new(store.clone()).find_all().await.unwrap();
        assert_eq!(budget.len(), 2);
        assert_eq!(budget[0].montant, Decimal::from(4050));
        assert_eq!(budget[0].description.as_deref(), Some("Vente: Nocturne bleu à Hélène Dubois"));
        assert_eq!(budget[1].montant, Decimal::from(-405));
        assert_eq!(budget[1].description.as_deref(), Some("Commission pour Nocturne bleu (10%)"));

        let again = service.create(payload(&artwork, &client, None)).await.unwrap_err();
        assert!(matches!(again, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_fields_share_one_message() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let (artwork, client) = seed(&store, Decimal::from(100), Decimal::ZERO).await;
        let service = SaleService::new(store);

        let mut incomplete = payload(&artwork, &client, None);
        incomplete.date_vente = None;
        let err = service.create(incomplete).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == SALE_REQUIRED));
    }

    #[tokio::test]
    async fn failed_budget_write_undoes_sale_and_artwork() {
        let store: Arc<dyn DocumentStore> =
            Arc::new(BudgetDownStore { inner: MemoryDocumentStore::new() });
        let (artwork, client) = seed(&store, Decimal::from(2000), Decimal::ZERO).await;
        let service = SaleService::new(store.clone());

        let err = service.create(payload(&artwork, &client, None)).await.unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));

        assert!(Repository::<Sale>::new(store.clone()).find_all().await.unwrap().is_empty());
        let restored = Repository::<Artwork>::new(store.clone())
            .find_by_id(artwork.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restored.availability, Availability::Available);
        assert_eq!(restored.date_vente, None);
        assert_eq!(restored.property_status, Some(PropertyStatus::Consignment));
    }

    #[tokio::test]
    async fn deleting_a_sale_restores_the_artwork_and_clears_budget() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let (artwork, client) = seed(&store, Decimal::from(800), Decimal::ZERO).await;
        let service = SaleService::new(store.clone());

        let created = service
            .create(payload(&artwork, &client, Some(Decimal::from(5))))
            .await
            .unwrap();
        service.delete(created.sale.id).await.unwrap();

        assert!(Repository::<BudgetEntry>::new(store.clone()).find_all().await.unwrap().is_empty());
        let restored = Repository::<Artwork>::new(store.clone())
            .find_by_id(artwork.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restored.availability, Availability::Available);
        assert_eq!(restored.date_vente, None);
        assert_eq!(restored.property_status, Some(PropertyStatus::Consignment));
    }

    #[tokio::test]
    async fn update_recomputes_price_and_commission_entry() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let (artwork, client) = seed(&store, Decimal::from(1000), Decimal::ZERO).await;
        let service = SaleService::new(store.clone());

        let created = service.create(payload(&artwork, &client, None)).await.unwrap();

        // Preço da obra alterado depois da venda
        let artworks = Repository::<Artwork>::new(store.clone());
        let mut current = artworks.find_by_id(artwork.id).await.unwrap().unwrap();
        current.reduction = Some(Decimal::from(20));
        artworks.update(&current).await.unwrap();

        let updated = service
            .update(created.sale.id, payload(&artwork, &client, Some(Decimal::from(10))))
            .await
            .unwrap();
        assert_eq!(updated.sale.prix_vente, Decimal::from(800));
        assert_eq!(updated.sale.commission, Some(Decimal::from(80)));

        let budget = Repository::<BudgetEntry>::new(store).find_all().await.unwrap();
        let montants: Vec<_> = budget.iter().map(|b| b.montant).collect();
        assert_eq!(montants, vec![Decimal::from(800), Decimal::from(-80)]);

        let mut moved = payload(&artwork, &client, None);
        moved.id_oeuvre = Some(Uuid::new_v4());
        let err = service.update(created.sale.id, moved).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
