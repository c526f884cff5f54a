// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Contagem genérica para os gráficos de pizza
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

// Desempenho mensal (linha/área no front)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    #[schema(example = "2024-03")]
    pub mois: String,
    pub ventes: usize,
    pub revenu: Decimal,
    pub commission: Decimal,
}

// Ranking de artistas por faturamento
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRevenue {
    pub nom: String,
    pub ventes: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub client_stats: Vec<CategoryCount>,
    pub performance: Vec<MonthlySales>,
    pub top_artistes: Vec<ArtistRevenue>,
    pub oeuvre_stats: Vec<CategoryCount>,
    pub solde_budget: Decimal,
}
