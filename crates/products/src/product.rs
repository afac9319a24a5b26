use serde::Deserialize;

use sexyboom_core::{DomainError, DomainResult, Entity, ProductId, is_valid_price, is_valid_stock};

/// Largest stock a product can hold: 2^53, the last integer an `f64` input
/// represents exactly.
pub const MAX_STOCK: u64 = 1 << 53;

/// Untrusted product fields as submitted by a caller.
///
/// Numbers are kept as `f64` so that inputs like `3.5` units or `-1` can be
/// rejected with a message instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub stock: f64,
    pub cost: f64,
    pub initial_price: f64,
}

/// Partial update: only the present fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub stock: Option<f64>,
    pub cost: Option<f64>,
    pub initial_price: Option<f64>,
}

/// A catalog product with its on-hand quantity and unit prices.
///
/// Instances can only be built through [`Product::new`], so every product in
/// hand satisfies: non-empty name, whole non-negative stock, non-negative cost
/// and initial price.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    stock: u64,
    cost: f64,
    initial_price: f64,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        let name = validate_name(&draft.name)?;
        let stock = validate_stock(draft.stock)?;
        let cost = validate_price("cost", draft.cost)?;
        let initial_price = validate_price("initial_price", draft.initial_price)?;

        Ok(Self {
            id,
            name,
            stock,
            cost,
            initial_price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Merge `patch` into a copy of this product, re-validating every field.
    ///
    /// `self` is left untouched when validation fails.
    pub fn apply_patch(&self, patch: ProductPatch) -> DomainResult<Self> {
        let draft = ProductDraft {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            stock: patch.stock.unwrap_or(self.stock as f64),
            cost: patch.cost.unwrap_or(self.cost),
            initial_price: patch.initial_price.unwrap_or(self.initial_price),
        };
        Self::new(self.id, draft)
    }

    /// Check that `quantity` units are on hand.
    pub fn ensure_available(&self, quantity: u64) -> DomainResult<()> {
        if self.stock < quantity {
            return Err(DomainError::insufficient_stock(&self.name, self.stock, quantity));
        }
        Ok(())
    }

    /// Remove `quantity` units from stock. Stock never goes negative.
    pub fn take_stock(&mut self, quantity: u64) -> DomainResult<()> {
        self.ensure_available(quantity)?;
        self.stock -= quantity;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_stock(stock: f64) -> DomainResult<u64> {
    if !is_valid_stock(stock) {
        return Err(DomainError::validation(format!(
            "stock must be a non-negative whole number (got {stock})"
        )));
    }
    if stock > MAX_STOCK as f64 {
        return Err(DomainError::validation(format!(
            "stock must be at most {MAX_STOCK} (got {stock})"
        )));
    }
    // Whole, non-negative and exactly representable, so the cast is lossless.
    Ok(stock as u64)
}

fn validate_price(field: &str, value: f64) -> DomainResult<f64> {
    if !is_valid_price(value) || !value.is_finite() {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative number (got {value})"
        )));
    }
    Ok(value)
}
