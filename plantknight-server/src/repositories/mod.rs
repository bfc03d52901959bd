mod account;
mod device;
mod reading;

pub use account::AccountRepository;
pub use device::DeviceRepository;
pub use reading::ReadingRepository;
