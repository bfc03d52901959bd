mod account_handle;
mod device_handle;
mod home_handle;
mod reading_handle;
mod recommendation_handle;

pub use account_handle::*;
pub use device_handle::*;
pub use home_handle::*;
pub use reading_handle::*;
pub use recommendation_handle::*;
