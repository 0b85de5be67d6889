// rently-api: Async Rust client for the Rently cloud and Home Assistant service calls

pub mod auth;
pub mod cloud;
pub mod error;
pub mod hub;
pub mod transport;

pub use auth::{AccessToken, BEARER_PREFIX, LoginCredentials};
pub use cloud::client::{DEFAULT_API_BASE, DEFAULT_LOGIN_URL};
pub use cloud::{CloudClient, Commands, DeviceStatus};
pub use error::{Error, truncate_body};
pub use hub::HubClient;
pub use hub::client::DEFAULT_HUB_URL;
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
