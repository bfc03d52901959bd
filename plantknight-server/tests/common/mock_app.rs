use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use plantknight_server::app::{AppContext, create_router};
use plantknight_server::configs::{Database, SchemaManager, Storage};
use plantknight_server::models::{Account, Reading};
use plantknight_server::services::{
    AuthService, Candidate, Content, GenerateContentRequest, GenerateContentResponse,
    LanguageModel, LlmError, Part, PlantMatch, ReferenceConditions, ReferenceSource,
};
use serde_json::{Value, json};
use time::OffsetDateTime;
use tower::ServiceExt;

pub const TEST_USERNAME: &str = "tester";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_DEVICE_ID: &str = "a1b2c3d4";

/// Language model answering from a fixed script and recording every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<GenerateContentResponse>>,
    pub requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<GenerateContentResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }
}

pub fn text_reply(text: &str) -> GenerateContentResponse {
    model_reply(Part::text(text))
}

pub fn tool_call_reply(name: &str, args: Value) -> GenerateContentResponse {
    let part: Part = serde_json::from_value(json!({
        "functionCall": { "name": name, "args": args }
    }))
    .unwrap();

    model_reply(part)
}

fn model_reply(part: Part) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: Some("model".to_string()),
                parts: vec![part],
            },
        }],
    }
}

/// Reference source knowing a single species, Ficus lyrata (id 2961).
#[derive(Default)]
pub struct StaticSource {
    pub searches: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn conditions() -> ReferenceConditions {
        ReferenceConditions {
            sunlight: vec!["part shade".to_string()],
            sunlight_level: None,
            watering_rate: Some("Average".to_string()),
            watering_days: Some(json!({ "value": "7", "unit": "days" })),
            watering_schedule: None,
            hardiness_zone: Some(json!({ "min": "10", "max": "12" })),
        }
    }
}

#[async_trait]
impl ReferenceSource for StaticSource {
    async fn find_plant_by_name(&self, name: &str) -> Vec<PlantMatch> {
        self.searches.lock().unwrap().push(name.to_string());

        if name.eq_ignore_ascii_case("ficus lyrata") {
            vec![PlantMatch {
                id: 2961,
                common_name: Some("fiddle-leaf fig".to_string()),
                scientific_name: vec!["Ficus lyrata".to_string()],
            }]
        } else {
            Vec::new()
        }
    }

    async fn get_conditions(&self, id: i64) -> Option<ReferenceConditions> {
        (id == 2961).then(Self::conditions)
    }
}

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub auth_service: Arc<AuthService>,
    pub language_model: Arc<ScriptedModel>,
    pub reference_source: Arc<StaticSource>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_replies(Vec::new()).await
    }

    pub async fn with_replies(replies: Vec<GenerateContentResponse>) -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let auth_service = Arc::new(AuthService::new());
        let language_model = Arc::new(ScriptedModel::new(replies));
        let reference_source = Arc::new(StaticSource::default());

        let router = create_router(AppContext {
            storage: storage.clone(),
            auth_service: auth_service.clone(),
            reference_source: reference_source.clone(),
            language_model: language_model.clone(),
        });

        Self {
            storage,
            auth_service,
            language_model,
            reference_source,
            router,
        }
    }

    /// Sends a request through the router and decodes the JSON body (`Null` when empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri).method(method);

        let body = match body {
            Some(body) => {
                request = request.header("Content-Type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// Account `tester` owning the fig device `a1b2c3d4`.
    pub async fn create_test_account(&self) -> Account {
        let password = self.auth_service.hash(TEST_PASSWORD).unwrap();

        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, password) VALUES ($1, $2) RETURNING *;",
        )
        .bind(TEST_USERNAME)
        .bind(password)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap();

        sqlx::query(
            r#"
            INSERT INTO devices (account_id, device_id, plant_name, species, is_connected)
                VALUES ($1, $2, 'Figgy', 'Ficus lyrata', FALSE);
            "#,
        )
        .bind(account.id)
        .bind(TEST_DEVICE_ID)
        .execute(self.storage.get_pool())
        .await
        .unwrap();

        account
    }

    pub async fn create_test_reading(&self, device_id: &str, timestamp: OffsetDateTime) -> Reading {
        sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO readings (device_id, species, temperature, moisture, light_levels, soil_ph, timestamp)
                VALUES ($1, 'Ficus lyrata', 71.6, 40.0, 800.0, 6.5, $2)
                RETURNING *;
            "#,
        )
        .bind(device_id)
        .bind(timestamp)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn is_connected(&self, device_id: &str) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT is_connected FROM devices WHERE device_id = $1;")
            .bind(device_id)
            .fetch_one(self.storage.get_pool())
            .await
            .unwrap()
    }
}
