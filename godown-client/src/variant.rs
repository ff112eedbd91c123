//! Variant builder
//!
//! The editable collection of variants being assembled for one product,
//! plus the transient edit buffer. Only `commit` moves data from the
//! buffer into the committed sequence; removal goes through an explicit
//! confirmation step.

use shared::convert;
use shared::models::{Gender, Variant};

use crate::error::{ClientError, ClientResult};

/// Transient variant edit buffer
///
/// Numeric fields are kept as the raw text-field input; coercion happens
/// once, at commit.
#[derive(Debug, Clone, Default)]
pub struct VariantForm {
    pub gender: Gender,
    pub size: String,
    pub color: String,
    pub mrp: String,
    pub selling_price: String,
    pub cost_price: String,
    pub sku: String,
    pub barcode: String,
    pub quantity: String,
    /// Persisted variant image, carried through edits untouched
    pub image_url: Option<String>,
}

impl VariantForm {
    fn from_variant(variant: &Variant) -> Self {
        Self {
            gender: variant.gender,
            size: variant.size.clone(),
            color: variant.color.clone().unwrap_or_default(),
            mrp: variant.mrp.to_string(),
            selling_price: variant.selling_price.to_string(),
            cost_price: variant.cost_price.to_string(),
            sku: variant.sku.clone().unwrap_or_default(),
            barcode: variant.barcode.clone().unwrap_or_default(),
            quantity: variant.current_stock.to_string(),
            image_url: variant.image_url.clone(),
        }
    }

    /// Coerce the buffer into a wire variant. Assumes `size` was already
    /// checked.
    fn build(&self) -> Variant {
        Variant {
            gender: self.gender,
            size: self.size.trim().to_string(),
            color: opt_field(&self.color),
            mrp: convert::decimal_or_zero(&self.mrp),
            selling_price: convert::decimal_or_zero(&self.selling_price),
            cost_price: convert::decimal_or_zero(&self.cost_price),
            sku: opt_field(&self.sku),
            barcode: opt_field(&self.barcode),
            current_stock: convert::quantity_or_zero(&self.quantity),
            image_url: self.image_url.clone(),
        }
    }
}

fn opt_field(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ordered variant collection with one edit buffer
#[derive(Debug, Default)]
pub struct VariantBuilder {
    variants: Vec<Variant>,
    form: VariantForm,
    editing_index: Option<usize>,
    pending_removal: Option<usize>,
}

impl VariantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn form(&self) -> &VariantForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut VariantForm {
        &mut self.form
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn pending_removal(&self) -> Option<usize> {
        self.pending_removal
    }

    /// Reset the buffer for a new variant
    pub fn begin_add(&mut self) {
        self.form = VariantForm::default();
        self.editing_index = None;
    }

    /// Copy the committed variant at `index` into the buffer for editing
    pub fn begin_edit(&mut self, index: usize) -> ClientResult<()> {
        let variant = self
            .variants
            .get(index)
            .ok_or_else(|| ClientError::Validation(format!("no variant at index {}", index)))?;
        self.form = VariantForm::from_variant(variant);
        self.editing_index = Some(index);
        Ok(())
    }

    /// Validate and commit the buffer: append when adding, replace when
    /// editing. The buffer is left unchanged on failure.
    pub fn commit(&mut self) -> ClientResult<usize> {
        if !convert::is_present(&self.form.size) {
            return Err(ClientError::Validation("Size is required".to_string()));
        }

        let variant = self.form.build();
        let index = match self.editing_index {
            Some(i) => {
                let slot = self.variants.get_mut(i).ok_or_else(|| {
                    ClientError::Validation(format!("variant at index {} no longer exists", i))
                })?;
                *slot = variant;
                i
            }
            None => {
                self.variants.push(variant);
                self.variants.len() - 1
            }
        };

        self.form = VariantForm::default();
        self.editing_index = None;
        Ok(index)
    }

    /// Mark a variant for removal, pending confirmation
    pub fn request_remove(&mut self, index: usize) -> ClientResult<()> {
        if index >= self.variants.len() {
            return Err(ClientError::Validation(format!(
                "no variant at index {}",
                index
            )));
        }
        self.pending_removal = Some(index);
        Ok(())
    }

    /// Confirm the pending removal. Subsequent indices shift down; an
    /// in-progress edit is re-pointed or reset accordingly.
    pub fn confirm_remove(&mut self) -> Option<Variant> {
        let index = self.pending_removal.take()?;
        if index >= self.variants.len() {
            return None;
        }
        let removed = self.variants.remove(index);

        if let Some(editing) = self.editing_index {
            if editing == index {
                self.begin_add();
            } else if editing > index {
                self.editing_index = Some(editing - 1);
            }
        }

        Some(removed)
    }

    /// Abandon the pending removal
    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// Replace the committed sequence (edit-flow hydration)
    pub(crate) fn hydrate(&mut self, variants: Vec<Variant>) {
        self.variants = variants;
        self.form = VariantForm::default();
        self.editing_index = None;
        self.pending_removal = None;
    }
}
