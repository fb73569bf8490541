//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Builder, ErrorKind, Operator, services};
use tracing::info;
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// An image received from a client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original filename, as sent by the client.
    pub filename: String,
    /// Content type (MIME type), if the client sent one.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage key.
    pub key: String,
    /// Location returned to clients.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// Content type the file was accepted as.
    pub content_type: String,
}

/// Storage service for post images.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("provider", &self.config.provider.name())
            .field("max_file_size", &self.config.max_file_size)
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => finish(
                services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region),
            ),
            StorageProvider::LocalFs { root } => finish(
                services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                ),
            ),
            StorageProvider::Memory => finish(services::Memory::default()),
        }
    }

    /// Validate upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate storage key for an image.
    ///
    /// Format: `posts/{uuid}/{sanitized_filename}`
    #[must_use]
    pub fn generate_storage_key(filename: &str) -> String {
        let mut sanitized = sanitize_filename(filename);
        if sanitized.is_empty() {
            sanitized = "image".to_string();
        }
        format!("posts/{}/{sanitized}", Uuid::now_v7())
    }

    /// Validate and write an uploaded image.
    ///
    /// The content type is taken from the request, or guessed from the file
    /// extension when the client sent none.
    ///
    /// # Errors
    ///
    /// Returns a client error (`MissingFile`, `FileTooLarge`,
    /// `InvalidMimeType`) for rejected input, or `Operation` if the write
    /// fails.
    pub async fn store(&self, req: UploadRequest) -> Result<StoredFile, StorageError> {
        if req.data.is_empty() {
            return Err(StorageError::MissingFile);
        }

        let content_type = req
            .content_type
            .as_deref()
            .map(essence)
            .filter(|ct| !ct.is_empty())
            .map(str::to_ascii_lowercase)
            .or_else(|| guess_image_type(&req.filename).map(String::from))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let size = req.data.len() as u64;
        self.validate_upload(&content_type, size)?;

        let key = Self::generate_storage_key(&req.filename);
        self.operator
            .write(&key, req.data)
            .await
            .map_err(StorageError::from)?;

        info!(
            key = %key,
            size,
            content_type = %content_type,
            provider = self.config.provider.name(),
            "image stored"
        );

        Ok(StoredFile {
            url: self.config.public_url(&key),
            key,
            size,
            content_type,
        })
    }

    /// Read a stored file back.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing is stored under `key`.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        validate_key(key)?;
        let buffer = self.operator.read(key).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::not_found(key)
            } else {
                StorageError::from(e)
            }
        })?;
        Ok(buffer.to_bytes())
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

fn finish<B: Builder>(builder: B) -> Result<Operator, StorageError> {
    Ok(Operator::new(builder)
        .map_err(|e| StorageError::configuration(e.to_string()))?
        .finish())
}

/// Reject keys that are empty, absolute or climb out of the root.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// MIME type without parameters, e.g. `image/png; q=1` becomes `image/png`.
fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

fn guess_image_type(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
/// A leading run of dots is stripped so the result never names a parent dir.
fn sanitize_filename(filename: &str) -> String {
    let replaced: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced.trim_start_matches('.').to_string()
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
