//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Product::new ──┐                                                   │
//! │  CartLine::new ─┼──► PricingError ──► immediate caller             │
//! │  rule ctors ────┤                                                   │
//! │  Cart::add ─────┘                                                   │
//! │                                                                     │
//! │  Every error is synchronous and non-retryable: it reports a        │
//! │  business-rule violation, never a transient failure. Nothing is    │
//! │  retried internally, and a failing operation never commits state.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, caps, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing engine errors.
///
/// These represent business rule violations detected before any state change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A construction parameter is out of range.
    ///
    /// ## When This Occurs
    /// - Product with non-positive unit price or zero purchase cap
    /// - QuantityDiscount with a percentage outside the allowed set
    /// - BundleDiscount with a non-positive deduction or identical products
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A line's quantity (initial or merged) exceeds the product's cap.
    ///
    /// ## User Workflow
    /// ```text
    /// add(Eraser × 1), cart already holds Eraser × 10 (cap 10)
    ///      │
    ///      ▼
    /// QuantityExceeded { product: "Eraser", max: 10, requested: 11 }
    /// ```
    #[error("quantity {requested} for {product} exceeds the purchase limit of {max}")]
    QuantityExceeded {
        product: String,
        max: u32,
        requested: u32,
    },

    /// An `add` would create a line for a sixth distinct product.
    #[error("cannot add {product}: cart already holds the maximum of {max} distinct products")]
    CartFull { product: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
