//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the dashboard server and its upstream API.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the collaborator API, e.g. `https://crm-api.example.com`.
    pub api_base_url: String,
    pub templates_dir: String,
    /// Signing key for flash message cookies; at least 64 bytes.
    pub secret: String,
}
