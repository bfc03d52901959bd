mod account;
mod device;
mod reading;
mod recommendation;

pub use account::*;
pub use device::*;
pub use reading::*;
pub use recommendation::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
