use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub device_id: String,
}

/// Health score per parameter, 1 (critical) to 100 (ideal).
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub temperature: u8,
    pub moisture: u8,
    pub light_levels: u8,
}

/// One or two sentences of advice per parameter.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub temperature: String,
    pub moisture: String,
    pub light_levels: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub scores: Scores,
    pub recommendations: Advice,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub message: String,
    pub output: Recommendation,
}
