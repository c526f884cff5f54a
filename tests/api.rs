// tests/api.rs

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use galerie::{
    chat::LanguageModel,
    common::error::AppError,
    config::AppState,
    db::{MemoryChatStore, MemoryDocumentStore},
    routes,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct CannedModel;

#[async_trait]
impl LanguageModel for CannedModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AppError> {
        Ok("Réponse du modèle".to_string())
    }
}

struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AppError> {
        Err(AppError::LanguageModel("connexion refusée".into()))
    }
}

fn app_with(llm: Arc<dyn LanguageModel>) -> Router {
    let state = AppState::from_parts(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryChatStore::new()),
        llm,
        50,
    );
    routes::router(state)
}

fn app() -> Router {
    app_with(Arc::new(CannedModel))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {value}");
    value
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/ventes"].is_object());
}

#[tokio::test]
async fn references_increase_per_collection() {
    let app = app();

    let first = create(&app, "/api/artistes", json!({ "nom": "Camille Martin" })).await;
    let second = create(&app, "/api/artistes", json!({ "nom": "Jules Roy" })).await;
    let client = create(&app, "/api/clients", json!({ "nom": "Léa Dubois" })).await;

    assert_eq!(first["reference"], "A1");
    assert_eq!(second["reference"], "A2");
    assert_eq!(client["reference"], "C1");
}

#[tokio::test]
async fn expenses_read_back_negative() {
    let app = app();

    let entry = create(
        &app,
        "/api/budget",
        json!({ "date": "2024-03-01", "categorie": "loyer", "montant": 100, "type": "depense" }),
    )
    .await;
    assert_eq!(entry["montant"].as_f64(), Some(-100.0));

    create(
        &app,
        "/api/budget",
        json!({ "date": "2024-03-02", "categorie": "ventes", "montant": 250, "type": "revenu" }),
    )
    .await;

    let (status, summary) = send(&app, Method::GET, "/api/budget/resume", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["solde"].as_f64(), Some(150.0));

    let (status, body) = send(&app, Method::POST, "/api/budget", Some(json!({ "categorie": "loyer" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "La date, la catégorie et le montant sont obligatoires");
}

#[tokio::test]
async fn sale_marks_artwork_sold_and_writes_budget() {
    let app = app();

    let artist = create(&app, "/api/artistes", json!({ "nom": "Camille Martin" })).await;
    let artwork = create(
        &app,
        "/api/oeuvres",
        json!({ "titre": "Nocturne", "idArtiste": artist["id"], "prixVente": 1000, "reduction": 10 }),
    )
    .await;
    let client = create(&app, "/api/clients", json!({ "nom": "Léa Dubois" })).await;

    let sale = create(
        &app,
        "/api/ventes",
        json!({
            "idOeuvre": artwork["id"],
            "idClient": client["id"],
            "dateVente": "2024-05-10",
            "tauxCommission": 20
        }),
    )
    .await;
    assert_eq!(sale["prixVente"].as_f64(), Some(900.0));
    assert_eq!(sale["commission"].as_f64(), Some(180.0));
    assert_eq!(sale["oeuvre"]["availability"], "sold");

    let (_, available) = send(&app, Method::GET, "/api/oeuvres/disponibles", None).await;
    assert_eq!(available.as_array().map(Vec::len), Some(0));

    let (_, summary) = send(&app, Method::GET, "/api/budget/resume", None).await;
    assert_eq!(summary["revenus"].as_f64(), Some(900.0));
    assert_eq!(summary["depenses"].as_f64(), Some(180.0));

    // Segunda venda da mesma obra
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ventes",
        Some(json!({ "idOeuvre": artwork["id"], "idClient": client["id"], "dateVente": "2024-05-11" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Cancelar a venda devolve a obra ao estoque
    let uri = format!("/api/ventes/{}", sale["id"].as_str().unwrap());
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vente supprimée avec succès");

    let (_, available) = send(&app, Method::GET, "/api/oeuvres/disponibles", None).await;
    assert_eq!(available.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn client_delete_rules() {
    let app = app();

    let lonely = create(&app, "/api/clients", json!({ "nom": "Paul Henry" })).await;
    create(
        &app,
        "/api/suivis",
        json!({ "idClient": lonely["id"], "dateContact": "2024-04-01", "typeContact": "Email" }),
    )
    .await;

    let uri = format!("/api/clients/{}", lonely["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, follow_ups) = send(&app, Method::GET, "/api/suivis", None).await;
    assert_eq!(follow_ups.as_array().map(Vec::len), Some(0));

    let artist = create(&app, "/api/artistes", json!({ "nom": "Camille Martin" })).await;
    let artwork = create(
        &app,
        "/api/oeuvres",
        json!({ "titre": "Aube", "idArtiste": artist["id"], "prixVente": 500 }),
    )
    .await;
    let buyer = create(&app, "/api/clients", json!({ "nom": "Léa Dubois" })).await;
    create(
        &app,
        "/api/ventes",
        json!({ "idOeuvre": artwork["id"], "idClient": buyer["id"], "dateVente": "2024-05-10" }),
    )
    .await;

    let uri = format!("/api/clients/{}", buyer["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn not_found_and_validation_messages() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/api/clients/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client non trouvé");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/oeuvres",
        Some(json!({ "titre": "Sans artiste", "idArtiste": missing })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Artiste non trouvé");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/suivis",
        Some(json!({ "idClient": missing, "dateContact": "2024-04-01", "typeContact": "Email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Erreur: Client non trouvé");
}

#[tokio::test]
async fn chat_answers_from_database_when_forced() {
    let app = app();
    create(&app, "/api/artistes", json!({ "nom": "Camille Martin" })).await;

    let (status, settings) = send(
        &app,
        Method::PUT,
        "/api/chat/settings",
        Some(json!({ "forceDatabaseMode": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["forceDatabaseMode"], true);

    let (status, reply) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "content": "Liste des artistes", "sessionId": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let text = reply["response"].as_str().unwrap();
    assert!(text.contains("Résultats de la base de données"));
    assert!(text.contains("Camille Martin"));
    assert_eq!(reply["collections"], json!(["artistes"]));

    let (_, history) = send(&app, Method::GET, "/api/chat/history/s1", None).await;
    let roles: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["role"].as_str())
        .collect();
    assert_eq!(roles, ["user", "assistant"]);

    let (_, settings) = send(&app, Method::POST, "/api/chat/settings/reset", None).await;
    assert_eq!(settings["forceDatabaseMode"], false);
}

#[tokio::test]
async fn chat_failure_returns_generic_message() {
    let app = app_with(Arc::new(FailingModel));
    create(&app, "/api/artistes", json!({ "nom": "Camille Martin" })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "content": "Quels artistes ?", "sessionId": "s2" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Une erreur est survenue lors du traitement de votre demande.");

    // Sessão ausente cai na mesma mensagem genérica
    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({ "content": "Quels artistes ?" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Une erreur est survenue lors du traitement de votre demande.");
}
