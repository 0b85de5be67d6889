// rently-core: Credential lifecycle, resilient device requests, and hub sync policy.

pub mod auth;
pub mod bridge;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod translate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::Authenticator;
pub use bridge::Bridge;
pub use config::{BridgeConfig, DeviceIds, HubConfig, HubEntities};
pub use error::CoreError;
pub use session::DeviceSession;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenKind};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    RoomTemperature, SyncTarget, TemperatureReading, TemperatureUnit, ThermostatCommand,
    ThermostatMode,
};

// Types consumers need to build a `BridgeConfig` without depending on the api crate.
pub use rently_api::{
    Commands, DEFAULT_API_BASE, DEFAULT_HUB_URL, DEFAULT_LOGIN_URL, LoginCredentials, TlsMode,
};
