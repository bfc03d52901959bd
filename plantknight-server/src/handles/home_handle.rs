use axum::routing::get;
use axum::{Json, Router};
use plantknight_api::models::*;
use utoipa::OpenApi;

use super::{account_handle, device_handle, reading_handle, recommendation_handle};

#[derive(OpenApi)]
#[openapi(
    info(title = "PlantKnight API"),
    paths(
        home,
        account_handle::register,
        account_handle::login,
        device_handle::add_plant,
        device_handle::remove_plant,
        device_handle::get_plants,
        reading_handle::catch_esp_data,
        reading_handle::get_plant_data,
        recommendation_handle::call_llm,
    ),
    components(schemas(
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        AccountResponse,
        DeviceResponse,
        AddPlantRequest,
        AddPlantResponse,
        RemovePlantRequest,
        RemovePlantResponse,
        TemperatureUnit,
        ReadingRequest,
        ReadingCreatedResponse,
        ReadingResponse,
        LatestReadingResponse,
        RecommendRequest,
        Scores,
        Advice,
        Recommendation,
        RecommendationResponse,
    )),
    tags(
        (name = "home", description = "Liveness"),
        (name = "account", description = "Registration and login"),
        (name = "device", description = "Plant devices of an account"),
        (name = "reading", description = "Sensor readings"),
        (name = "recommendation", description = "Care advice from the language model")
    )
)]
pub struct ApiDoc;

pub fn home_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/openapi.json", get(openapi))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Server is up", body = MessageResponse)
    )
)]
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("Connected to PlantKnight API"))
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
