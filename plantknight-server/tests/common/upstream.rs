use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-key";

/// Local stand-in for the plant database and the language model.
pub struct Upstream {
    pub base_url: String,
    pub model_requests: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct UpstreamState {
    model_requests: Arc<Mutex<Vec<Value>>>,
}

pub async fn spawn_upstream() -> Upstream {
    let model_requests = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route("/species-list", get(species_list))
        .route("/species/details/:id", get(species_details))
        .route("/models/:call", post(generate_content))
        .with_state(UpstreamState {
            model_requests: model_requests.clone(),
        });

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{address}"),
        model_requests,
    }
}

fn authorized(query: &HashMap<String, String>) -> bool {
    query.get("key").map(String::as_str) == Some(TEST_API_KEY)
}

async fn species_list(Query(query): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if !authorized(&query) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid key" })));
    }

    match query.get("q").map(String::as_str) {
        Some("Ficus lyrata") => (
            StatusCode::OK,
            Json(json!({
                "data": [
                    { "id": 2961, "common_name": "fiddle-leaf fig", "scientific_name": ["Ficus lyrata"] },
                    { "id": 2962, "common_name": "dwarf fiddle-leaf fig", "scientific_name": null }
                ],
                "total": 2
            })),
        ),
        Some("broken") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server Error" })),
        ),
        Some("garbled") => (StatusCode::OK, Json(json!({ "results": "none" }))),
        _ => (StatusCode::OK, Json(json!({ "data": [], "total": 0 }))),
    }
}

async fn species_details(
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&query) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid key" })));
    }

    match id {
        2961 => (
            StatusCode::OK,
            Json(json!({
                "id": 2961,
                "common_name": "fiddle-leaf fig",
                "sunlight": ["part shade", "filtered shade"],
                "watering": "Average",
                "watering_general_benchmark": { "value": "7-10", "unit": "days" },
                "hardiness": { "min": "10", "max": "12" }
            })),
        ),
        2962 => (
            StatusCode::OK,
            Json(json!({ "data": [{ "id": 2962, "watering": "Minimum", "sunlight": null }] })),
        ),
        _ => (StatusCode::OK, Json(json!({ "message": "Species not found" }))),
    }
}

// Asks for the plant tool first, then answers once the tool result is present.
async fn generate_content(
    State(state): State<UpstreamState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(TEST_API_KEY) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": { "code": 403 } })));
    }

    if call != "test-model:generateContent" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": { "code": 404 } })));
    }

    state.model_requests.lock().unwrap().push(body.clone());

    let answered = body["contents"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|content| content["parts"].as_array().into_iter().flatten())
        .any(|part| part.get("functionResponse").is_some());

    let part = if answered {
        json!({
            "text": "```json\n{\"temperature_score\": 80, \"moisture_score\": 60, \"light_levels_score\": 45, \"recommendations\": {\"temperature\": \"Keep it warm.\", \"moisture\": \"Water weekly.\", \"light_levels\": \"Add light.\"}}\n```"
        })
    } else {
        json!({
            "functionCall": { "name": "retrieve_plant_data", "args": { "plant_name": "Ficus lyrata" } },
            "thoughtSignature": "c2lnLTE="
        })
    };

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [part] }, "finishReason": "STOP" }]
        })),
    )
}
