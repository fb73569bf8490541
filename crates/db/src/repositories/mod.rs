//! Repository implementations for database access.

pub mod post;

pub use post::PostRepository;
