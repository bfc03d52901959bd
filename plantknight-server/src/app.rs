use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{AccountRepository, DeviceRepository, ReadingRepository};
use crate::services::{
    AuthService, GeminiClient, LanguageModel, PerenualClient, RecommendationService,
    ReferenceSource,
};

/// Process-wide resources shared by every router.
#[derive(Clone)]
pub struct AppContext {
    pub storage: Arc<Storage>,
    pub auth_service: Arc<AuthService>,
    pub reference_source: Arc<dyn ReferenceSource>,
    pub language_model: Arc<dyn LanguageModel>,
}

impl AppContext {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let storage = Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .context("Failed to open database")?;

        let reference_source = PerenualClient::new(&settings.plant_api)
            .context("Failed to build plant API client")?;

        let language_model = GeminiClient::new(&settings.language_model)
            .context("Failed to build language model client")?;

        if settings.plant_api.api_key.is_empty() {
            tracing::warn!("plant_api.api_key is empty, plant lookups will fail");
        }
        if settings.language_model.api_key.is_empty() {
            tracing::warn!("language_model.api_key is empty, recommendations will fail");
        }

        Ok(Self {
            storage: Arc::new(storage),
            auth_service: Arc::new(AuthService::new()),
            reference_source: Arc::new(reference_source),
            language_model: Arc::new(language_model),
        })
    }
}

pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let context = AppContext::new(settings).await?;

    Ok(create_router(context))
}

pub fn create_router(context: AppContext) -> Router {
    let account_repository = Arc::new(AccountRepository::new(context.storage.clone()));
    let device_repository = Arc::new(DeviceRepository::new(context.storage.clone()));
    let reading_repository = Arc::new(ReadingRepository::new(context.storage.clone()));

    let recommendation_service = Arc::new(RecommendationService::new(
        context.language_model.clone(),
        context.reference_source.clone(),
    ));

    Router::new()
        .merge(home_router())
        .merge(account_router(AccountState {
            auth_service: context.auth_service.clone(),
            account_repository: account_repository.clone(),
            device_repository: device_repository.clone(),
        }))
        .merge(device_router(DeviceState {
            account_repository: account_repository.clone(),
            device_repository: device_repository.clone(),
        }))
        .merge(reading_router(ReadingState {
            reading_repository: reading_repository.clone(),
            device_repository: device_repository.clone(),
        }))
        .merge(recommendation_router(RecommendationState {
            reading_repository,
            recommendation_service,
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
