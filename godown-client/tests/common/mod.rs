//! Recording mock of the stock backend API, shared by the integration
//! tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use godown_client::api::StockApi;
use godown_client::error::{ClientError, ClientResult};
use godown_client::image::StagedImage;
use godown_client::session::{SessionStore, TokenStore};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductPayload, Role, Subcategory,
    SubcategoryCreate, UserAccount, UserUpdate,
};
use std::sync::Mutex;
use tempfile::TempDir;

/// Failure to inject for a given endpoint
#[derive(Debug, Clone)]
pub enum FailWith {
    Unauthorized,
    Server(String),
}

impl FailWith {
    fn to_error(&self) -> ClientError {
        match self {
            FailWith::Unauthorized => ClientError::Unauthorized,
            FailWith::Server(message) => ClientError::Server {
                status: 500,
                message: message.clone(),
            },
        }
    }
}

/// In-memory stand-in for the backend, recording every dispatched call
#[derive(Default)]
pub struct MockApi {
    token: Option<String>,
    pub calls: Mutex<Vec<String>>,

    pub login_response: Option<LoginResponse>,
    pub profile_user: Option<UserInfo>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub subcategories: Vec<Subcategory>,
    pub products: Vec<Product>,
    pub user_accounts: Vec<UserAccount>,
    pub uploaded_url: String,

    pub fail_login: Option<FailWith>,
    pub fail_profile: Option<FailWith>,
    pub fail_upload: Option<FailWith>,
    pub fail_products: Option<FailWith>,
    pub fail_create_product: Option<FailWith>,
    pub fail_categories: Option<FailWith>,
    pub fail_subcategories: Option<FailWith>,
    pub fail_create_category: Option<FailWith>,

    pub last_product_payload: Mutex<Option<ProductPayload>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            uploaded_url: "/uploads/mock.jpg".to_string(),
            ..Self::default()
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    /// Number of recorded calls matching the given `METHOD /path` prefix
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn check(&self, fail: &Option<FailWith>) -> ClientResult<()> {
        match fail {
            Some(f) => Err(f.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StockApi for MockApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn login(&self, _request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.record("POST /login");
        self.check(&self.fail_login)?;
        self.login_response
            .clone()
            .ok_or_else(|| ClientError::InvalidResponse("no login response configured".into()))
    }

    async fn profile(&self) -> ClientResult<UserInfo> {
        self.record("GET /profile");
        self.check(&self.fail_profile)?;
        self.profile_user
            .clone()
            .ok_or(ClientError::Unauthorized)
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<UserAccount> {
        self.record("POST /register");
        Ok(UserAccount {
            id: (self.user_accounts.len() as i64) + 1,
            username: request.username.clone(),
            email: Some(request.email.clone()),
            role: request.role,
            is_active: true,
        })
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.record("GET /categories");
        self.check(&self.fail_categories)?;
        Ok(self.categories.clone())
    }

    async fn create_category(&self, request: &CategoryCreate) -> ClientResult<Category> {
        self.record("POST /categories");
        self.check(&self.fail_create_category)?;
        Ok(Category {
            id: (self.categories.len() as i64) + 1,
            name: request.name.clone(),
            description: None,
            is_active: true,
        })
    }

    async fn brands(&self) -> ClientResult<Vec<Brand>> {
        self.record("GET /brands");
        Ok(self.brands.clone())
    }

    async fn create_brand(&self, request: &BrandCreate) -> ClientResult<Brand> {
        self.record("POST /brands");
        Ok(Brand {
            id: (self.brands.len() as i64) + 1,
            name: request.name.clone(),
            description: None,
            is_active: true,
        })
    }

    async fn subcategories(&self, category_id: i64) -> ClientResult<Vec<Subcategory>> {
        self.record(&format!("GET /subcategories?category_id={}", category_id));
        self.check(&self.fail_subcategories)?;
        Ok(self
            .subcategories
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_subcategory(&self, request: &SubcategoryCreate) -> ClientResult<Subcategory> {
        self.record("POST /subcategories");
        Ok(Subcategory {
            id: (self.subcategories.len() as i64) + 1,
            name: request.name.clone(),
            category_id: request.category_id,
            description: None,
            is_active: true,
        })
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.record("GET /products");
        self.check(&self.fail_products)?;
        Ok(self.products.clone())
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<Product> {
        self.record("POST /products");
        self.check(&self.fail_create_product)?;
        *self.last_product_payload.lock().unwrap() = Some(payload.clone());
        Ok(persist(payload, 1))
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<Product> {
        self.record(&format!("PUT /products/{}", id));
        *self.last_product_payload.lock().unwrap() = Some(payload.clone());
        Ok(persist(payload, id))
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.record(&format!("DELETE /products/{}", id));
        Ok(())
    }

    async fn upload_image(&self, _image: &StagedImage) -> ClientResult<String> {
        self.record("POST /upload-image");
        self.check(&self.fail_upload)?;
        Ok(self.uploaded_url.clone())
    }

    async fn users(&self) -> ClientResult<Vec<UserAccount>> {
        self.record("GET /users");
        Ok(self.user_accounts.clone())
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> ClientResult<UserAccount> {
        self.record(&format!("PUT /users/{}", id));
        let existing = self
            .user_accounts
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ClientError::NotFound("User not found".into()))?;
        let mut updated = existing.clone();
        if let Some(username) = &update.username {
            updated.username = username.clone();
        }
        if let Some(role) = update.role {
            updated.role = role;
        }
        if let Some(is_active) = update.is_active {
            updated.is_active = is_active;
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.record(&format!("DELETE /users/{}", id));
        Ok(())
    }
}

/// Server-side view of a submitted payload
fn persist(payload: &ProductPayload, id: i64) -> Product {
    Product {
        id,
        item_id: payload.item_id.clone(),
        item_name: payload.item_name.clone(),
        model: payload.model.clone(),
        description: payload.description.clone(),
        category_id: payload.category_id,
        subcategory_id: payload.subcategory_id,
        brand_id: payload.brand_id,
        category_name: None,
        subcategory_name: None,
        brand_name: None,
        image_url: payload.image_url.clone(),
        low_stock_threshold: payload.low_stock_threshold,
        variants: payload.variants.clone(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn user(role: Role) -> UserInfo {
    UserInfo {
        id: 1,
        username: "asha".to_string(),
        email: Some("asha@example.com".to_string()),
        role,
    }
}

/// Session logged in through the mock with the given role. The returned
/// `TempDir` owns the token file and must outlive the session.
pub async fn logged_in_session(api: &mut MockApi, role: Role) -> (SessionStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut session = SessionStore::new(TokenStore::new(dir.path()));
    api.login_response = Some(LoginResponse {
        token: "test-token".to_string(),
        user: user(role),
    });
    session.login(api, "asha", "password").await.unwrap();
    // Login itself is not under test here; keep call counts clean.
    api.calls.lock().unwrap().clear();
    (session, dir)
}
