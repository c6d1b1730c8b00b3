//! # Domain Types
//!
//! Core domain types for the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────────────┐      ┌───────────────────────┐           │
//! │  │       Product         │      │       CartLine        │           │
//! │  │  ───────────────────  │      │  ───────────────────  │           │
//! │  │  name (identity)      │◄─────│  product (Arc, shared)│           │
//! │  │  unit_price (> 0)     │      │  quantity (≤ cap)     │           │
//! │  │  max_purchase_quantity│      │  subtotal()           │           │
//! │  └───────────────────────┘      └───────────────────────┘           │
//! │                                                                     │
//! │  Both are immutable once constructed; "changing" a line's quantity │
//! │  produces a NEW line, re-validated against the product's cap.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products are identified by `name`. The cart keys its lines on it, and
//! discount rules target products by it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::validation::{validate_product_name, validate_purchase_cap, validate_unit_price};

// =============================================================================
// Product
// =============================================================================

/// A static catalog fact: what a product costs and how many of it one
/// checkout may carry.
///
/// Deserialization funnels through [`Product::new`] (via the `try_from`
/// shim below), so a serialized catalog cannot smuggle in a zero price or
/// cap that the constructor would reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductDraft")]
pub struct Product {
    /// Display name, also the product's identity within a cart.
    name: String,

    /// Unit price in whole currency units. Always positive.
    unit_price: Money,

    /// Per-checkout purchase cap. Always at least 1.
    max_purchase_quantity: u32,
}

impl Product {
    /// Creates a product, rejecting non-positive prices and zero caps.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::Product;
    ///
    /// let pencil = Product::new("Pencil", Money::new(20), 10).unwrap();
    /// assert_eq!(pencil.unit_price().units(), 20);
    ///
    /// assert!(Product::new("Freebie", Money::zero(), 10).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        unit_price: Money,
        max_purchase_quantity: u32,
    ) -> PricingResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_unit_price(unit_price)?;
        validate_purchase_cap(max_purchase_quantity)?;

        Ok(Product {
            name,
            unit_price,
            max_purchase_quantity,
        })
    }

    /// The product's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The product's unit price.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// The most units of this product a single checkout may hold.
    pub fn max_purchase_quantity(&self) -> u32 {
        self.max_purchase_quantity
    }
}

/// Unvalidated wire shape of a product; only exists so deserialization can
/// re-run the constructor checks.
#[derive(Deserialize)]
struct ProductDraft {
    name: String,
    unit_price: Money,
    max_purchase_quantity: u32,
}

impl TryFrom<ProductDraft> for Product {
    type Error = PricingError;

    fn try_from(draft: ProductDraft) -> PricingResult<Self> {
        Product::new(draft.name, draft.unit_price, draft.max_purchase_quantity)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line item: a shared product reference plus a capped quantity.
///
/// ## Design Notes
/// - `Arc<Product>`: products are shared between lines, rules, and the
///   caller's catalog; the line never owns or copies catalog data
/// - Immutable: `increase_quantity` returns a new line so the cap check
///   can never be bypassed by mutation
#[derive(Debug, Clone)]
pub struct CartLine {
    product: Arc<Product>,
    quantity: u32,
}

impl CartLine {
    /// Creates a line, enforcing `quantity <= product.max_purchase_quantity`.
    ///
    /// ## Errors
    /// - `InvalidInput` for a zero quantity
    /// - `QuantityExceeded` (naming the product and its cap) when the
    ///   quantity is over the product's purchase limit
    pub fn new(product: Arc<Product>, quantity: u32) -> PricingResult<Self> {
        if quantity == 0 {
            return Err(PricingError::InvalidInput {
                field: "quantity".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if quantity > product.max_purchase_quantity() {
            return Err(PricingError::QuantityExceeded {
                product: product.name().to_string(),
                max: product.max_purchase_quantity(),
                requested: quantity,
            });
        }

        Ok(CartLine { product, quantity })
    }

    /// Returns a new line with `delta` more units, re-validated against the
    /// product's cap using the COMBINED quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// cart holds Eraser × 10 (cap 10)
    ///      │
    ///      ▼
    /// line.increase_quantity(1)
    ///      │
    ///      ▼
    /// QuantityExceeded { product: "Eraser", max: 10, requested: 11 }
    /// ```
    pub fn increase_quantity(&self, delta: u32) -> PricingResult<Self> {
        // A sum past u32::MAX is over any cap; report it as a cap breach
        // (with the requested quantity saturated) rather than overflowing.
        let combined = self.quantity.checked_add(delta).ok_or_else(|| {
            PricingError::QuantityExceeded {
                product: self.product.name().to_string(),
                max: self.product.max_purchase_quantity(),
                requested: u32::MAX,
            }
        })?;
        CartLine::new(Arc::clone(&self.product), combined)
    }

    /// The product this line refers to.
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Shorthand for the product's name, the line's identity in a cart.
    pub fn product_name(&self) -> &str {
        self.product.name()
    }

    /// Units of the product on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line subtotal: `unit_price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.product.unit_price().times(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
