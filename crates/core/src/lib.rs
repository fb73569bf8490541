//! Core post logic for Postwall.
//!
//! This crate contains the domain with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `post` - Post entity, validation, store contract, and service
//! - `storage` - Image storage adapter backed by OpenDAL

pub mod post;
pub mod storage;
