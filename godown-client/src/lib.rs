//! Godown Client - stock backend client core
//!
//! Session handling, role gating, reference-data caching, product draft
//! assembly, and the upload-then-create submission pipeline over the
//! stock backend REST API.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;
pub mod image;
pub mod session;
pub mod submit;
pub mod users;
pub mod variant;

pub use api::StockApi;
pub use auth::{Action, can_perform, ensure_can};
pub use catalog::{CatalogCache, ProductCache};
pub use config::ClientConfig;
pub use draft::{ProductDraft, ProductForm};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use image::{ImagePicker, ImageSlot, ImageSource, StagedImage};
pub use session::{SessionStore, TokenStore};
pub use submit::{SubmissionPipeline, SubmitState};
pub use users::UserDirectory;
pub use variant::{VariantBuilder, VariantForm};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use shared::models::{Gender, Product, ProductPayload, Role, Variant};
