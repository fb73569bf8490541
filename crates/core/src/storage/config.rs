//! Storage configuration types.

use std::path::PathBuf;

use postwall_shared::config::{StorageKind, StorageSettings};
use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory, lost on restart
    Memory,
}

impl StorageProvider {
    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Provider name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
    /// Base URL prepended to keys in returned locations.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Default max file size: 5MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
            public_base_url: None,
        }
    }

    /// Build from the `storage` section of the app config.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` if the S3 provider is selected
    /// without its endpoint, bucket or credentials.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.provider {
            StorageKind::Local => StorageProvider::local_fs(&settings.root),
            StorageKind::Memory => StorageProvider::Memory,
            StorageKind::S3 => StorageProvider::s3(
                required(settings.endpoint.as_ref(), "storage.endpoint")?,
                required(settings.bucket.as_ref(), "storage.bucket")?,
                required(settings.access_key_id.as_ref(), "storage.access_key_id")?,
                required(settings.secret_access_key.as_ref(), "storage.secret_access_key")?,
                settings.region.clone().unwrap_or_else(|| "auto".to_string()),
            ),
        };

        let mut config = Self::new(provider).with_max_file_size(settings.max_file_size);
        if let Some(base) = &settings.public_base_url {
            config = config.with_public_base_url(base.clone());
        }
        Ok(config)
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set the public base URL.
    #[must_use]
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        self.public_base_url = Some(base.into());
        self
    }

    /// Default allowed MIME types for post images.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        vec![
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
        ]
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }

    /// Location handed back to clients for a stored key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        if let Some(base) = &self.public_base_url {
            return format!("{}/{key}", base.trim_end_matches('/'));
        }
        match &self.provider {
            StorageProvider::S3 {
                endpoint, bucket, ..
            } => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            StorageProvider::LocalFs { root } => {
                format!("{}/{key}", root.display().to_string().trim_end_matches('/'))
            }
            StorageProvider::Memory => format!("memory://{key}"),
        }
    }
}

fn required(value: Option<&String>, name: &str) -> Result<String, StorageError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| StorageError::configuration(format!("{name} is required for s3")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3() -> StorageProvider {
        StorageProvider::s3(
            "https://account.r2.cloudflarestorage.com/",
            "images",
            "access_key",
            "secret_key",
            "auto",
        )
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(s3().name(), "s3");
        assert_eq!(StorageProvider::local_fs("./uploads").name(), "local");
        assert_eq!(StorageProvider::Memory.name(), "memory");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::Memory);
        assert_eq!(config.max_file_size, StorageConfig::DEFAULT_MAX_FILE_SIZE);
        assert!(config.public_base_url.is_none());
        assert_eq!(config.allowed_mime_types.len(), 4);
    }

    #[test]
    fn test_mime_type_validation() {
        let config = StorageConfig::new(StorageProvider::Memory);
        assert!(config.is_mime_type_allowed("image/png"));
        assert!(config.is_mime_type_allowed("image/jpeg"));
        assert!(!config.is_mime_type_allowed("application/pdf"));
        assert!(!config.is_mime_type_allowed("image/svg+xml"));
        assert!(!config.is_mime_type_allowed("text/html"));
    }

    #[test]
    fn test_public_url_per_provider() {
        let key = "posts/abc/cat.png";
        assert_eq!(
            StorageConfig::new(s3()).public_url(key),
            "https://account.r2.cloudflarestorage.com/images/posts/abc/cat.png"
        );
        assert_eq!(
            StorageConfig::new(StorageProvider::local_fs("./uploads/")).public_url(key),
            "./uploads/posts/abc/cat.png"
        );
        assert_eq!(
            StorageConfig::new(StorageProvider::Memory).public_url(key),
            "memory://posts/abc/cat.png"
        );
    }

    #[test]
    fn test_public_base_url_wins() {
        let config = StorageConfig::new(s3()).with_public_base_url("https://cdn.example.com/");
        assert_eq!(
            config.public_url("posts/abc/cat.png"),
            "https://cdn.example.com/posts/abc/cat.png"
        );
    }

    #[test]
    fn test_from_settings_memory() {
        let settings = StorageSettings {
            provider: StorageKind::Memory,
            max_file_size: 1024,
            public_base_url: Some("http://localhost:8080/files".to_string()),
            ..StorageSettings::default()
        };
        let config = StorageConfig::from_settings(&settings).unwrap();
        assert_eq!(config.provider.name(), "memory");
        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.public_url("k"), "http://localhost:8080/files/k");
    }

    #[test]
    fn test_from_settings_s3_requires_bucket() {
        let settings = StorageSettings {
            provider: StorageKind::S3,
            endpoint: Some("https://s3.example.com".to_string()),
            access_key_id: Some("id".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..StorageSettings::default()
        };
        let err = StorageConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(msg) if msg.contains("storage.bucket")));
    }

    #[test]
    fn test_from_settings_s3_defaults_region() {
        let settings = StorageSettings {
            provider: StorageKind::S3,
            endpoint: Some("https://s3.example.com".to_string()),
            bucket: Some("images".to_string()),
            access_key_id: Some("id".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..StorageSettings::default()
        };
        let config = StorageConfig::from_settings(&settings).unwrap();
        assert!(matches!(config.provider, StorageProvider::S3 { ref region, .. } if region == "auto"));
    }
}
