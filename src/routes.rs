// src/routes.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn router(app_state: AppState) -> Router {
    let artist_routes = Router::new()
        .route("/", get(handlers::artists::list_artists).post(handlers::artists::create_artist))
        .route(
            "/{id}",
            get(handlers::artists::get_artist)
                .put(handlers::artists::update_artist)
                .delete(handlers::artists::delete_artist),
        );

    // /disponibles antes de /{id}: rota estática tem prioridade no axum
    let artwork_routes = Router::new()
        .route("/", get(handlers::artworks::list_artworks).post(handlers::artworks::create_artwork))
        .route("/disponibles", get(handlers::artworks::list_available_artworks))
        .route(
            "/{id}",
            get(handlers::artworks::get_artwork)
                .put(handlers::artworks::update_artwork)
                .delete(handlers::artworks::delete_artwork),
        );

    let client_routes = Router::new()
        .route("/", get(handlers::clients::list_clients).post(handlers::clients::create_client))
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let partner_routes = Router::new()
        .route("/", get(handlers::partners::list_partners).post(handlers::partners::create_partner))
        .route(
            "/{id}",
            get(handlers::partners::get_partner)
                .put(handlers::partners::update_partner)
                .delete(handlers::partners::delete_partner),
        );

    let sale_routes = Router::new()
        .route("/", get(handlers::sales::list_sales).post(handlers::sales::create_sale))
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        );

    let budget_routes = Router::new()
        .route("/", get(handlers::budget::list_entries).post(handlers::budget::create_entry))
        .route("/resume", get(handlers::budget::get_summary))
        .route(
            "/{id}",
            get(handlers::budget::get_entry)
                .put(handlers::budget::update_entry)
                .delete(handlers::budget::delete_entry),
        );

    let follow_up_routes = Router::new()
        .route("/", get(handlers::follow_ups::list_follow_ups).post(handlers::follow_ups::create_follow_up))
        .route(
            "/{id}",
            get(handlers::follow_ups::get_follow_up)
                .put(handlers::follow_ups::update_follow_up)
                .delete(handlers::follow_ups::delete_follow_up),
        );

    let chat_routes = Router::new()
        .route("/", post(handlers::chat::send_message))
        .route("/ws", get(handlers::chat::chat_socket))
        .route(
            "/history/{session_id}",
            get(handlers::chat::get_history).post(handlers::chat::append_history),
        )
        .route(
            "/settings",
            get(handlers::chat::get_settings).put(handlers::chat::update_settings),
        )
        .route("/settings/reset", post(handlers::chat::reset_settings));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/api/artistes", artist_routes)
        .nest("/api/oeuvres", artwork_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/partenaires", partner_routes)
        .nest("/api/ventes", sale_routes)
        .nest("/api/budget", budget_routes)
        .nest("/api/suivis", follow_up_routes)
        .nest("/api/chat", chat_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
