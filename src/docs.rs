// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Artistes ---
        handlers::artists::list_artists,
        handlers::artists::get_artist,
        handlers::artists::create_artist,
        handlers::artists::update_artist,
        handlers::artists::delete_artist,

        // --- Oeuvres ---
        handlers::artworks::list_artworks,
        handlers::artworks::list_available_artworks,
        handlers::artworks::get_artwork,
        handlers::artworks::create_artwork,
        handlers::artworks::update_artwork,
        handlers::artworks::delete_artwork,

        // --- Clients / Partenaires ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,
        handlers::partners::list_partners,
        handlers::partners::get_partner,
        handlers::partners::create_partner,
        handlers::partners::update_partner,
        handlers::partners::delete_partner,

        // --- Ventes ---
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::create_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- Budget ---
        handlers::budget::list_entries,
        handlers::budget::get_summary,
        handlers::budget::get_entry,
        handlers::budget::create_entry,
        handlers::budget::update_entry,
        handlers::budget::delete_entry,

        // --- Suivis ---
        handlers::follow_ups::list_follow_ups,
        handlers::follow_ups::get_follow_up,
        handlers::follow_ups::create_follow_up,
        handlers::follow_ups::update_follow_up,
        handlers::follow_ups::delete_follow_up,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Chat ---
        handlers::chat::send_message,
        handlers::chat::get_history,
        handlers::chat::append_history,
        handlers::chat::get_settings,
        handlers::chat::update_settings,
        handlers::chat::reset_settings,
    ),
    components(
        schemas(
            handlers::MessageResponse,
            models::Collection,

            models::artist::ArtistStatus,
            models::artist::Artist,
            models::artist::ArtistPayload,

            models::artwork::PropertyStatus,
            models::artwork::ConsignmentDuration,
            models::artwork::Availability,
            models::artwork::Artwork,
            models::artwork::ArtworkDetail,
            models::artwork::ArtworkPayload,

            models::client::Client,
            models::client::ClientPayload,
            models::partner::Partner,
            models::partner::PartnerPayload,

            models::sale::Sale,
            models::sale::SaleDetail,
            models::sale::SalePayload,

            models::budget::BudgetKind,
            models::budget::BudgetEntry,
            models::budget::BudgetPayload,
            models::budget::BudgetSummary,

            models::follow_up::ContactType,
            models::follow_up::FollowUpStatus,
            models::follow_up::Priority,
            models::follow_up::FollowUp,
            models::follow_up::FollowUpDetail,
            models::follow_up::FollowUpPayload,

            models::dashboard::CategoryCount,
            models::dashboard::MonthlySales,
            models::dashboard::ArtistRevenue,
            models::dashboard::Dashboard,

            models::chat::ChatRole,
            models::chat::ChatMessage,
            models::chat::AppendMessagePayload,
            models::chat::DataKind,
            models::chat::DisplayFormat,
            models::chat::DetailLevel,
            models::chat::ChatSettings,
            models::chat::UpdateChatSettingsRequest,
            models::chat::ChatRequest,
            models::chat::CollectionResults,
            models::chat::ChatReply,
        )
    ),
    tags(
        (name = "Artistes", description = "Artistas representados pela galeria"),
        (name = "Oeuvres", description = "Inventário de obras"),
        (name = "Clients", description = "Colecionadores e compradores"),
        (name = "Partenaires", description = "Parceiros que indicam clientes"),
        (name = "Ventes", description = "Vendas e comissões"),
        (name = "Budget", description = "Receitas e despesas"),
        (name = "Suivis", description = "Acompanhamento de clientes"),
        (name = "Dashboard", description = "Indicadores agregados"),
        (name = "Chat", description = "Assistente de consulta em linguagem natural")
    )
)]
pub struct ApiDoc;
