// RouterOS REST payload models

mod health;
mod interface;
mod resource;
mod wire;

pub use health::{Health, HealthEntry};
pub use interface::Interface;
pub use resource::Resource;
