//! Shared types for the Godown stock client
//!
//! Wire-level data models and DTOs exchanged with the stock backend,
//! plus the pure form-input coercion helpers. No I/O lives here.

pub mod client;
pub mod convert;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{ErrorBody, LoginRequest, LoginResponse, RegisterRequest, UploadResponse, UserInfo};
pub use models::Role;
