//! # Validation Module
//!
//! Construction-time validation for products, lines, and discount rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Type system                                               │
//! │  ├── quantities are u32 (never negative)                            │
//! │  └── money is integer (no float drift)                              │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE, called from fallible constructors            │
//! │  ├── positive prices and caps                                       │
//! │  └── discount parameters inside the allowed sets                    │
//! │                                                                     │
//! │  Everything a rule or line could violate is rejected before the    │
//! │  value exists; downstream code never re-checks.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::ALLOWED_PERCENT_OFF;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
pub fn validate_product_name(name: &str) -> PricingResult<()> {
    if name.trim().is_empty() {
        return Err(PricingError::InvalidInput {
            field: "name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validates the product pair of a bundle discount.
///
/// ## Rules
/// - The two product names must differ (a bundle of a product with itself
///   is just a quantity discount in disguise, and an ill-defined one)
pub fn validate_bundle_pair(product_a: &str, product_b: &str) -> PricingResult<()> {
    validate_product_name(product_a)?;
    validate_product_name(product_b)?;

    if product_a == product_b {
        return Err(PricingError::InvalidInput {
            field: "product_b_name".to_string(),
            reason: format!("must differ from product_a_name '{product_a}'"),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive; free products are not a thing this engine
///   prices
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
/// use checkout_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::new(20)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// assert!(validate_unit_price(Money::new(-5)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> PricingResult<()> {
    if !price.is_positive() {
        return Err(PricingError::InvalidInput {
            field: "unit_price".to_string(),
            reason: format!("must be positive, got {price}"),
        });
    }

    Ok(())
}

/// Validates a per-product purchase cap.
pub fn validate_purchase_cap(cap: u32) -> PricingResult<()> {
    if cap == 0 {
        return Err(PricingError::InvalidInput {
            field: "max_purchase_quantity".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity-discount threshold.
pub fn validate_threshold(threshold: u32) -> PricingResult<()> {
    if threshold == 0 {
        return Err(PricingError::InvalidInput {
            field: "threshold_quantity".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage against the fixed allowed set.
///
/// ## Rules
/// - Must be one of 5, 10, 15 (marketing owns this list, the engine
///   only enforces it)
pub fn validate_percent_off(percent: u32) -> PricingResult<()> {
    if !ALLOWED_PERCENT_OFF.contains(&percent) {
        return Err(PricingError::InvalidInput {
            field: "percent_off".to_string(),
            reason: format!("must be one of {ALLOWED_PERCENT_OFF:?}, got {percent}"),
        });
    }

    Ok(())
}

/// Validates a bundle's per-pair deduction amount.
pub fn validate_per_pair_deduction(deduction: Money) -> PricingResult<()> {
    if !deduction.is_positive() {
        return Err(PricingError::InvalidInput {
            field: "per_pair_deduction".to_string(),
            reason: format!("must be positive, got {deduction}"),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
