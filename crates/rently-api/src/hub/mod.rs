pub mod client;
pub(crate) mod models;

pub use client::HubClient;
