mod auth_service;
mod llm_service;
mod plant_service;
mod recommendation_service;

pub use auth_service::*;
pub use llm_service::*;
pub use plant_service::*;
pub use recommendation_service::*;
