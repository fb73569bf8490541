//! Posts: entity, validation, store contract and service.

mod error;
mod memory;
mod service;
mod store;
mod types;

pub use error::PostError;
pub use memory::InMemoryPostStore;
pub use service::PostService;
pub use store::PostStore;
pub use types::{CreatePostInput, NewPost, Post};
