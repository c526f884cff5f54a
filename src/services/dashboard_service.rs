// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentStore, Repository},
    models::{
        artist::Artist,
        artwork::{Artwork, Availability},
        budget::BudgetEntry,
        client::Client,
        dashboard::{ArtistRevenue, CategoryCount, Dashboard, MonthlySales},
        sale::Sale,
    },
};

const UNCATEGORIZED: &str = "Non catégorisé";
const TOP_ARTISTS: usize = 5;

/// Agregações do painel, sem acesso ao armazenamento.
pub fn compute(
    clients: &[Client],
    sales: &[Sale],
    artworks: &[Artwork],
    artists: &[Artist],
    budget: &[BudgetEntry],
) -> Dashboard {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for client in clients {
        let name = client
            .categorie
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        *categories.entry(name.to_string()).or_default() += 1;
    }

    let mut months: BTreeMap<String, MonthlySales> = BTreeMap::new();
    for sale in sales {
        let mois = sale.date_vente.format("%Y-%m").to_string();
        let entry = months.entry(mois.clone()).or_insert_with(|| MonthlySales {
            mois,
            ventes: 0,
            revenu: Decimal::ZERO,
            commission: Decimal::ZERO,
        });
        entry.ventes += 1;
        entry.revenu += sale.prix_vente;
        entry.commission += sale.commission.unwrap_or(Decimal::ZERO);
    }

    let artwork_artist: HashMap<Uuid, Uuid> =
        artworks.iter().map(|o| (o.id, o.id_artiste)).collect();
    let artist_names: HashMap<Uuid, &str> =
        artists.iter().map(|a| (a.id, a.nom.as_str())).collect();

    let mut per_artist: HashMap<Uuid, ArtistRevenue> = HashMap::new();
    for sale in sales {
        let Some(artist_id) = artwork_artist.get(&sale.id_oeuvre) else {
            continue;
        };
        let Some(nom) = artist_names.get(artist_id) else {
            continue;
        };
        let entry = per_artist.entry(*artist_id).or_insert_with(|| ArtistRevenue {
            nom: nom.to_string(),
            ventes: 0,
            revenue: Decimal::ZERO,
        });
        entry.ventes += 1;
        entry.revenue += sale.prix_vente;
    }
    let mut top_artistes: Vec<ArtistRevenue> = per_artist.into_values().collect();
    top_artistes.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.nom.cmp(&b.nom)));
    top_artistes.truncate(TOP_ARTISTS);

    let oeuvre_stats = [Availability::Available, Availability::Reserved, Availability::Sold]
        .into_iter()
        .map(|availability| CategoryCount {
            name: availability.as_str().to_string(),
            value: artworks.iter().filter(|o| o.availability == availability).count(),
        })
        .collect();

    Dashboard {
        client_stats: categories
            .into_iter()
            .map(|(name, value)| CategoryCount { name, value })
            .collect(),
        performance: months.into_values().collect(),
        top_artistes,
        oeuvre_stats,
        solde_budget: budget.iter().map(|b| b.montant).sum(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    clients: Repository<Client>,
    sales: Repository<Sale>,
    artworks: Repository<Artwork>,
    artists: Repository<Artist>,
    budget: Repository<BudgetEntry>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            clients: Repository::new(store.clone()),
            sales: Repository::new(store.clone()),
            artworks: Repository::new(store.clone()),
            artists: Repository::new(store.clone()),
            budget: Repository::new(store),
        }
    }

    pub async fn get_dashboard(&self) -> Result<Dashboard, AppError> {
        let clients = self.clients.find_all().await?;
        let sales = self.sales.find_all().await?;
        let artworks = self.artworks.find_all().await?;
        let artists = self.artists.find_all().await?;
        let budget = self.budget.find_all().await?;

        Ok(compute(&clients, &sales, &artworks, &artists, &budget))
    }
}
