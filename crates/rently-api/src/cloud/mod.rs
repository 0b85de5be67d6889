pub mod client;
pub mod device;
pub mod login;
pub mod models;

pub use client::CloudClient;
pub use models::{Commands, DeviceStatus};
