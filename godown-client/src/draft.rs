//! Product draft
//!
//! Client-side representation of a product being created or edited, and
//! the pure assembly step that turns it into a submission payload.

use shared::convert;
use shared::models::{Product, ProductPayload};

use crate::error::{ClientError, ClientResult};
use crate::image::ImageSlot;
use crate::variant::VariantBuilder;

/// Base product fields as raw text-field input
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub item_id: String,
    pub item_name: String,
    pub model: String,
    pub description: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub brand_id: String,
    /// Optional, server-defaulted when blank
    pub low_stock_threshold: String,
}

/// A product being assembled for submission
#[derive(Debug, Default)]
pub struct ProductDraft {
    pub form: ProductForm,
    pub variants: VariantBuilder,
    pub image: ImageSlot,
    product_id: Option<i64>,
}

impl ProductDraft {
    /// Empty draft for the create flow
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft hydrated from an existing persisted product (edit flow)
    pub fn from_product(product: &Product) -> Self {
        let form = ProductForm {
            item_id: product.item_id.clone(),
            item_name: product.item_name.clone(),
            model: product.model.clone(),
            description: product.description.clone(),
            category_id: fk_to_field(product.category_id),
            subcategory_id: fk_to_field(product.subcategory_id),
            brand_id: fk_to_field(product.brand_id),
            low_stock_threshold: fk_to_field(product.low_stock_threshold),
        };

        let mut variants = VariantBuilder::new();
        variants.hydrate(product.variants.clone());

        Self {
            form,
            variants,
            image: ImageSlot::with_persisted_url(product.image_url.clone()),
            product_id: Some(product.id),
        }
    }

    /// Database id when editing an existing product
    pub fn product_id(&self) -> Option<i64> {
        self.product_id
    }

    pub fn is_edit(&self) -> bool {
        self.product_id.is_some()
    }

    /// Select a category, clearing the dependent subcategory when the
    /// selection actually changes.
    pub fn select_category(&mut self, category_id: Option<i64>) {
        let field = fk_to_field(category_id);
        if field != self.form.category_id {
            self.form.category_id = field;
            self.form.subcategory_id.clear();
        }
    }

    pub fn select_subcategory(&mut self, subcategory_id: Option<i64>) {
        self.form.subcategory_id = fk_to_field(subcategory_id);
    }

    pub fn select_brand(&mut self, brand_id: Option<i64>) {
        self.form.brand_id = fk_to_field(brand_id);
    }

    /// The single hard gate before any network call is made.
    pub fn validate(&self) -> ClientResult<()> {
        if !convert::is_present(&self.form.item_id) {
            return Err(ClientError::Validation("Item ID is required".to_string()));
        }
        if !convert::is_present(&self.form.item_name) {
            return Err(ClientError::Validation("Item name is required".to_string()));
        }
        if self.variants.is_empty() {
            return Err(ClientError::Validation(
                "At least one variant is required".to_string(),
            ));
        }
        if !self
            .variants
            .variants()
            .iter()
            .any(|v| convert::is_present(&v.size))
        {
            return Err(ClientError::Validation(
                "At least one variant needs a size".to_string(),
            ));
        }
        Ok(())
    }

    /// Assemble the submission payload. Pure transformation, no I/O;
    /// `image_url` is the uploaded (or still-persisted) URL decided by the
    /// submission pipeline.
    pub fn assemble(&self, image_url: Option<String>) -> ClientResult<ProductPayload> {
        self.validate()?;

        Ok(ProductPayload {
            item_id: self.form.item_id.trim().to_string(),
            item_name: self.form.item_name.trim().to_string(),
            model: self.form.model.trim().to_string(),
            description: self.form.description.trim().to_string(),
            category_id: convert::fk_or_null(&self.form.category_id),
            subcategory_id: convert::fk_or_null(&self.form.subcategory_id),
            brand_id: convert::fk_or_null(&self.form.brand_id),
            image_url,
            low_stock_threshold: convert::fk_or_null(&self.form.low_stock_threshold),
            variants: self.variants.variants().to_vec(),
        })
    }
}

fn fk_to_field(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}
