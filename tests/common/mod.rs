//! In-process stand-in for the chat server, served by axum on an ephemeral port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct Row {
    pub id: i64,
    pub session_id: String,
    pub user: String,
    pub bot: String,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub rows: Vec<Row>,
    pub next_id: i64,
    /// Answer every call with a plain-text 502.
    pub broken: bool,
    /// Answer delete and clear with a JSON 500.
    pub refuse_writes: bool,
    pub chat_bodies: Vec<Value>,
}

pub type Shared = Arc<Mutex<StubState>>;

pub struct StubServer {
    pub url: String,
    pub state: Shared,
}

impl StubServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState {
            next_id: 1,
            ..StubState::default()
        }));
        let app = Router::new()
            .route("/chat", post(chat))
            .route("/history", get(history))
            .route("/get_session_conversation/{session_id}", get(conversation))
            .route("/delete_chat/{chat_id}", delete(delete_chat))
            .route("/clear_history", post(clear_history))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn seed(&self, session_id: &str, user: &str, bot: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.rows.push(Row {
            id,
            session_id: session_id.into(),
            user: user.into(),
            bot: bot.into(),
        });
        id
    }

    pub fn set_broken(&self, broken: bool) {
        self.state.lock().unwrap().broken = broken;
    }

    pub fn set_refuse_writes(&self, refuse: bool) {
        self.state.lock().unwrap().refuse_writes = refuse;
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }
}

/// URL of a port nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn broken() -> Response {
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

async fn chat(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if state.broken {
        return broken();
    }
    state.chat_bodies.push(body.clone());

    let message = body["message"].as_str().unwrap_or_default().to_string();
    let Some(session_id) = body["session_id"].as_str().filter(|s| !s.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"reply": "Error: Session ID not found in request."})),
        )
            .into_response();
    };

    let reply = format!("You said: **{message}**");
    let id = state.next_id;
    state.next_id += 1;
    state.rows.push(Row {
        id,
        session_id: session_id.to_string(),
        user: message,
        bot: reply.clone(),
    });
    Json(json!({ "reply": reply })).into_response()
}

async fn history(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.broken {
        return broken();
    }
    // Latest row per session, newest first.
    let mut latest: Vec<&Row> = Vec::new();
    for row in state.rows.iter().rev() {
        if !latest.iter().any(|r| r.session_id == row.session_id) {
            latest.push(row);
        }
    }
    let history: Vec<Value> = latest
        .into_iter()
        .map(|row| {
            json!({
                "id": row.id,
                "session_id": row.session_id,
                "user": row.user,
                "bot": row.bot,
                "timestamp": "2024-05-01 10:00:00",
            })
        })
        .collect();
    Json(json!({ "history": history })).into_response()
}

async fn conversation(State(state): State<Shared>, Path(session_id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    if state.broken {
        return broken();
    }
    let conversation: Vec<Value> = state
        .rows
        .iter()
        .filter(|row| row.session_id == session_id)
        .map(|row| json!({"user": row.user, "bot": row.bot, "timestamp": "2024-05-01 10:00:00"}))
        .collect();
    if conversation.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Conversation not found for this session"})),
        )
            .into_response();
    }
    Json(json!({ "conversation": conversation })).into_response()
}

async fn delete_chat(State(state): State<Shared>, Path(chat_id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if state.broken {
        return broken();
    }
    if state.refuse_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": "Failed to delete chat."})),
        )
            .into_response();
    }
    if let Some(session_id) = state
        .rows
        .iter()
        .find(|row| row.id == chat_id)
        .map(|row| row.session_id.clone())
    {
        state.rows.retain(|row| row.session_id != session_id);
    }
    Json(json!({"status": "success"})).into_response()
}

async fn clear_history(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    if state.broken {
        return broken();
    }
    if state.refuse_writes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": "Failed to clear history."})),
        )
            .into_response();
    }
    state.rows.clear();
    Json(json!({"status": "success"})).into_response()
}
