//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Upload storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Route protection settings.
    #[serde(default)]
    pub auth: AuthSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
///
/// Without a `url` the server falls back to the in-memory post store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key shared with the token issuer.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Which storage backend holds uploaded images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Local filesystem under `root`.
    #[default]
    Local,
    /// S3-compatible bucket.
    S3,
    /// In-process memory (tests and demos).
    Memory,
}

/// Upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend to use.
    #[serde(default)]
    pub provider: StorageKind,
    /// Root directory for the local backend.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Base URL prepended to storage keys in upload responses.
    pub public_base_url: Option<String>,
    /// Maximum accepted image size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// S3 endpoint URL.
    pub endpoint: Option<String>,
    /// S3 bucket name.
    pub bucket: Option<String>,
    /// S3 access key ID.
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    pub secret_access_key: Option<String>,
    /// S3 region.
    pub region: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageKind::default(),
            root: default_storage_root(),
            public_base_url: None,
            max_file_size: default_max_file_size(),
            endpoint: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            region: None,
        }
    }
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024
}

/// Route protection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Put create, like, delete and upload behind token auth.
    #[serde(default)]
    pub protect_writes: bool,
    /// Roles accepted by the `is_user` gate.
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            protect_writes: false,
            allowed_roles: default_allowed_roles(),
        }
    }
}

fn default_allowed_roles() -> Vec<String> {
    vec!["user".to_string(), "admin".to_string()]
}

impl AuthSettings {
    /// Returns true if `role` passes the `is_user` gate.
    #[must_use]
    pub fn allows(&self, role: &str) -> bool {
        self.allowed_roles.iter().any(|r| r == role)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("POSTWALL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
