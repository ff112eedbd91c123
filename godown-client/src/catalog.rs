//! Reference data cache
//!
//! In-memory lists of categories, brands, and category-scoped
//! subcategories, plus the product list. Read-mostly, single-writer; a
//! failed fetch leaves the previous list intact so the UI keeps working
//! off stale data while the user retries.

use shared::models::{
    Brand, BrandCreate, Category, CategoryCreate, Product, Subcategory, SubcategoryCreate,
};
use tracing::debug;

use crate::api::StockApi;
use crate::auth::{Action, ensure_can};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Cached reference data for product classification
#[derive(Debug, Default)]
pub struct CatalogCache {
    categories: Vec<Category>,
    brands: Vec<Brand>,
    subcategories: Vec<Subcategory>,
    /// Category the subcategory list is currently scoped to
    subcategory_scope: Option<i64>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    pub fn subcategory_scope(&self) -> Option<i64> {
        self.subcategory_scope
    }

    /// Fetch and replace the category list
    pub async fn load_categories<A: StockApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        let fetched = api.categories().await?;
        debug!(count = fetched.len(), "categories refreshed");
        self.categories = fetched;
        Ok(())
    }

    /// Fetch and replace the brand list
    pub async fn load_brands<A: StockApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        let fetched = api.brands().await?;
        debug!(count = fetched.len(), "brands refreshed");
        self.brands = fetched;
        Ok(())
    }

    /// Fetch and replace the subcategory list for the given category.
    ///
    /// `None` clears the list without a fetch. Re-selecting the current
    /// scope is a no-op.
    pub async fn load_subcategories<A: StockApi + ?Sized>(
        &mut self,
        api: &A,
        category_id: Option<i64>,
    ) -> ClientResult<()> {
        match category_id {
            None => {
                self.subcategories.clear();
                self.subcategory_scope = None;
                Ok(())
            }
            Some(id) if self.subcategory_scope == Some(id) => Ok(()),
            Some(id) => {
                let fetched = api.subcategories(id).await?;
                debug!(category_id = id, count = fetched.len(), "subcategories refreshed");
                self.subcategories = fetched;
                self.subcategory_scope = Some(id);
                Ok(())
            }
        }
    }

    /// Create a category and append it to the local list, returning the
    /// assigned id so the caller can auto-select it.
    pub async fn create_category<A: StockApi + ?Sized>(
        &mut self,
        api: &A,
        session: &SessionStore,
        name: &str,
    ) -> ClientResult<i64> {
        Self::gate(session)?;
        let name = Self::required_name(name, "Category")?;
        let created = api.create_category(&CategoryCreate { name }).await?;
        let id = created.id;
        self.categories.push(created);
        Ok(id)
    }

    /// Create a brand and append it to the local list
    pub async fn create_brand<A: StockApi + ?Sized>(
        &mut self,
        api: &A,
        session: &SessionStore,
        name: &str,
    ) -> ClientResult<i64> {
        Self::gate(session)?;
        let name = Self::required_name(name, "Brand")?;
        let created = api.create_brand(&BrandCreate { name }).await?;
        let id = created.id;
        self.brands.push(created);
        Ok(id)
    }

    /// Create a subcategory under the given category.
    ///
    /// Appended to the local list only when it belongs to the current
    /// scope.
    pub async fn create_subcategory<A: StockApi + ?Sized>(
        &mut self,
        api: &A,
        session: &SessionStore,
        name: &str,
        category_id: i64,
    ) -> ClientResult<i64> {
        Self::gate(session)?;
        let name = Self::required_name(name, "Subcategory")?;
        let created = api
            .create_subcategory(&SubcategoryCreate { name, category_id })
            .await?;
        let id = created.id;
        if self.subcategory_scope == Some(category_id) {
            self.subcategories.push(created);
        }
        Ok(id)
    }

    fn gate(session: &SessionStore) -> ClientResult<()> {
        let role = session.role().ok_or(ClientError::Unauthorized)?;
        ensure_can(role, Action::ManageCatalog)
    }

    fn required_name(name: &str, kind: &str) -> ClientResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Validation(format!("{} name is required", kind)));
        }
        Ok(trimmed.to_string())
    }
}

/// Cached product list, refreshed after successful submissions
#[derive(Debug, Default)]
pub struct ProductCache {
    products: Vec<Product>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Fetch and replace the product list
    pub async fn refresh<A: StockApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        let fetched = api.products().await?;
        debug!(count = fetched.len(), "product list refreshed");
        self.products = fetched;
        Ok(())
    }

    /// Delete a product and drop it from the local list
    pub async fn remove<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        id: i64,
    ) -> ClientResult<()> {
        let role = session.role().ok_or(ClientError::Unauthorized)?;
        ensure_can(role, Action::DeleteProduct)?;
        match api.delete_product(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
                Ok(())
            }
            Err(err) => {
                if err.is_auth_error() {
                    session.invalidate(api);
                }
                Err(err)
            }
        }
    }
}
