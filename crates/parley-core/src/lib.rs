//! Core types and traits for the Parley conversation engine

pub mod error;
pub mod message;
pub mod traits;

pub use error::{Error, Result};
pub use message::{ChatMessage, Role};
pub use traits::client::{ClientError, CompletionBackend, CompletionConfig, ResponseFormat};
