//! Typed API surface over the stock backend
//!
//! The trait is the seam the session store, caches, and submission
//! pipeline are written against; tests substitute a recording mock.

use async_trait::async_trait;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductPayload, Subcategory,
    SubcategoryCreate, UserAccount, UserUpdate,
};

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::image::StagedImage;

/// Stock backend API
#[async_trait]
pub trait StockApi: Send + Sync {
    /// Replace or clear the bearer token used for authenticated calls
    fn set_token(&mut self, token: Option<String>);

    /// Current bearer token, if any
    fn token(&self) -> Option<&str>;

    // ========== Auth ==========

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;
    async fn profile(&self) -> ClientResult<UserInfo>;
    async fn register(&self, request: &RegisterRequest) -> ClientResult<UserAccount>;

    // ========== Reference data ==========

    async fn categories(&self) -> ClientResult<Vec<Category>>;
    async fn create_category(&self, request: &CategoryCreate) -> ClientResult<Category>;
    async fn brands(&self) -> ClientResult<Vec<Brand>>;
    async fn create_brand(&self, request: &BrandCreate) -> ClientResult<Brand>;
    async fn subcategories(&self, category_id: i64) -> ClientResult<Vec<Subcategory>>;
    async fn create_subcategory(&self, request: &SubcategoryCreate) -> ClientResult<Subcategory>;

    // ========== Products ==========

    async fn products(&self) -> ClientResult<Vec<Product>>;
    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<Product>;
    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;

    // ========== Upload ==========

    /// Upload a staged image, returning the server-assigned URL
    async fn upload_image(&self, image: &StagedImage) -> ClientResult<String>;

    // ========== Users (admin) ==========

    async fn users(&self) -> ClientResult<Vec<UserAccount>>;
    async fn update_user(&self, id: i64, update: &UserUpdate) -> ClientResult<UserAccount>;
    async fn delete_user(&self, id: i64) -> ClientResult<()>;
}

#[async_trait]
impl StockApi for HttpClient {
    fn set_token(&mut self, token: Option<String>) {
        HttpClient::set_token(self, token);
    }

    fn token(&self) -> Option<&str> {
        HttpClient::token(self)
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.post("/login", request).await
    }

    async fn profile(&self) -> ClientResult<UserInfo> {
        self.get("/profile").await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<UserAccount> {
        self.post("/register", request).await
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/categories").await
    }

    async fn create_category(&self, request: &CategoryCreate) -> ClientResult<Category> {
        self.post("/categories", request).await
    }

    async fn brands(&self) -> ClientResult<Vec<Brand>> {
        self.get("/brands").await
    }

    async fn create_brand(&self, request: &BrandCreate) -> ClientResult<Brand> {
        self.post("/brands", request).await
    }

    async fn subcategories(&self, category_id: i64) -> ClientResult<Vec<Subcategory>> {
        self.get(&format!("/subcategories?category_id={}", category_id))
            .await
    }

    async fn create_subcategory(&self, request: &SubcategoryCreate) -> ClientResult<Subcategory> {
        self.post("/subcategories", request).await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get("/products").await
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<Product> {
        self.post("/products", payload).await
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ClientResult<Product> {
        self.put(&format!("/products/{}", id), payload).await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/products/{}", id)).await
    }

    async fn upload_image(&self, image: &StagedImage) -> ClientResult<String> {
        self.upload(image).await
    }

    async fn users(&self) -> ClientResult<Vec<UserAccount>> {
        self.get("/users").await
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> ClientResult<UserAccount> {
        self.put(&format!("/users/{}", id), update).await
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/users/{}", id)).await
    }
}
