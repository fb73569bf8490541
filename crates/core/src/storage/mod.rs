//! Image storage using Apache OpenDAL.
//!
//! One adapter over three backends:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, MinIO
//! - Local filesystem
//! - Memory (tests and throwaway runs)
//!
//! # Layout
//!
//! ```text
//! posts/{uuid}/{sanitized_filename}
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, StoredFile, UploadRequest};
