// src/handlers/chat.rs

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::MessageResponse,
    models::chat::{
        AppendMessagePayload, ChatMessage, ChatReply, ChatRequest, ChatSettings,
        UpdateChatSettingsRequest,
    },
    services::chat_service::{ChatService, GENERIC_ERROR},
};

// POST /api/chat
// Mesmo turno do socket, para clientes sem WebSocket.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Resposta do assistente", body = ChatReply),
        (status = 500, description = "Falha no turno, inclusive conteúdo ou sessão ausente", body = MessageResponse)
    )
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match app_state.chat_service.handle_turn(request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => {
            tracing::error!("Erro no turno do chat: {}", err);
            let body = Json(MessageResponse { message: GENERIC_ERROR.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

// GET /api/chat/ws
pub async fn chat_socket(
    State(app_state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let service = app_state.chat_service.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(mut socket: WebSocket, service: ChatService) {
    tracing::info!("Cliente conectado ao chat");

    while let Some(received) = socket.recv().await {
        let text = match received {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!("Erro na leitura do socket: {}", err);
                break;
            }
        };

        let event = service.respond_to_frame(text.as_str()).await;

        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!("Falha ao serializar evento do chat: {}", err);
                continue;
            }
        };

        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }

    tracing::info!("Cliente desconectado do chat");
}

#[utoipa::path(
    get,
    path = "/api/chat/history/{session_id}",
    tag = "Chat",
    params(("session_id" = String, Path, description = "Sessão do chat")),
    responses((status = 200, description = "Mensagens da sessão em ordem", body = Vec<ChatMessage>))
)]
pub async fn get_history(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.chat_service.history(&session_id).await?;
    Ok((StatusCode::OK, Json(messages)))
}

#[utoipa::path(
    post,
    path = "/api/chat/history/{session_id}",
    tag = "Chat",
    params(("session_id" = String, Path, description = "Sessão do chat")),
    request_body = AppendMessagePayload,
    responses(
        (status = 201, description = "Mensagem gravada", body = ChatMessage),
        (status = 400, description = "Conteúdo vazio")
    )
)]
pub async fn append_history(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<AppendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.chat_service.append(&session_id, payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/chat/settings",
    tag = "Chat",
    responses((status = 200, description = "Configurações atuais (padrão se nunca salvas)", body = ChatSettings))
)]
pub async fn get_settings(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.chat_service.get_settings().await?;
    Ok((StatusCode::OK, Json(settings)))
}

#[utoipa::path(
    put,
    path = "/api/chat/settings",
    tag = "Chat",
    request_body = UpdateChatSettingsRequest,
    responses((status = 200, description = "Configurações salvas", body = ChatSettings))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateChatSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.chat_service.update_settings(payload).await?;
    Ok((StatusCode::OK, Json(settings)))
}

#[utoipa::path(
    post,
    path = "/api/chat/settings/reset",
    tag = "Chat",
    responses((status = 200, description = "Configurações de volta ao padrão", body = ChatSettings))
)]
pub async fn reset_settings(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.chat_service.reset_settings().await?;
    Ok((StatusCode::OK, Json(settings)))
}
