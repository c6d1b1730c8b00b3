//! # Discount Rules
//!
//! Pluggable pricing rules folded over the cart's line snapshot.
//!
//! ## Rule Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DiscountRule Contract                          │
//! │                                                                     │
//! │  lines: &[CartLine] ──► rule.deduction(lines) ──► Money (≥ 0)       │
//! │                                                                     │
//! │  • Pure function of the snapshot; no side effects, no cart access   │
//! │  • Returns zero when the rule's target product(s) are absent        │
//! │  • NEVER mutates or re-prices lines; the cart subtracts the        │
//! │    summed deductions from the gross subtotal itself                 │
//! │                                                                     │
//! │  Rules are additive: each one sees the SAME unmodified snapshot,   │
//! │  so stacking two rules never compounds one on the other's result.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a trait instead of an enum?
//! The rule set is open: a promotion service can ship new rule types
//! without touching the cart. The cart only needs the one capability.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::PricingResult;
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::{
    validate_bundle_pair, validate_per_pair_deduction, validate_percent_off,
    validate_product_name, validate_threshold,
};

// =============================================================================
// Rule Trait
// =============================================================================

/// A pricing rule that computes a deduction from a read-only line snapshot.
///
/// `Send + Sync` because rules are shared, read-only collaborators
/// (`Arc<dyn DiscountRule>`) that may be reused across carts.
pub trait DiscountRule: fmt::Debug + Send + Sync {
    /// The promotion's display name (e.g. "Pencil Day").
    fn name(&self) -> &str;

    /// The amount to deduct given the current lines. Must be pure and
    /// non-negative; returns zero when the target product(s) are absent.
    fn deduction(&self, lines: &[CartLine]) -> Money;
}

/// Locates the (single) line for a product name within a snapshot.
///
/// The cart guarantees at most one line per product, so `find` is enough.
fn line_for<'a>(lines: &'a [CartLine], product_name: &str) -> Option<&'a CartLine> {
    lines.iter().find(|line| line.product_name() == product_name)
}

// =============================================================================
// Quantity Discount
// =============================================================================

/// Percentage off each full multiple of a threshold quantity.
///
/// ## Behavior
/// The discount is REPEATABLE: quantity 4 against threshold 2 earns it
/// twice. A partial threshold earns nothing: `applied_times` is integer
/// division, the remainder is full price.
///
/// ## Example
/// ```rust
/// use checkout_core::discount::{DiscountRule, QuantityDiscount};
/// use checkout_core::money::Money;
/// use checkout_core::types::{CartLine, Product};
/// use std::sync::Arc;
///
/// let pencil = Arc::new(Product::new("Pencil", Money::new(20), 10).unwrap());
/// let rule = QuantityDiscount::new("Pencil Day", "Pencil", 2, 10).unwrap();
///
/// let lines = vec![CartLine::new(pencil, 4).unwrap()];
/// // Two full thresholds of 2 × 20 at 10% each: 4 + 4
/// assert_eq!(rule.deduction(&lines).units(), 8);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct QuantityDiscount {
    name: String,
    target_product_name: String,
    threshold_quantity: u32,
    percent_off: u32,
}

impl QuantityDiscount {
    /// Creates the rule, rejecting a zero threshold and any percentage
    /// outside the allowed set ([`crate::ALLOWED_PERCENT_OFF`]).
    pub fn new(
        name: impl Into<String>,
        target_product_name: impl Into<String>,
        threshold_quantity: u32,
        percent_off: u32,
    ) -> PricingResult<Self> {
        let target_product_name = target_product_name.into();
        validate_product_name(&target_product_name)?;
        validate_threshold(threshold_quantity)?;
        validate_percent_off(percent_off)?;

        Ok(QuantityDiscount {
            name: name.into(),
            target_product_name,
            threshold_quantity,
            percent_off,
        })
    }
}

impl DiscountRule for QuantityDiscount {
    fn name(&self) -> &str {
        &self.name
    }

    fn deduction(&self, lines: &[CartLine]) -> Money {
        let Some(line) = line_for(lines, &self.target_product_name) else {
            return Money::zero();
        };

        let applied_times = line.quantity() / self.threshold_quantity;
        if applied_times == 0 {
            return Money::zero();
        }

        // applied_times × threshold × unit_price × percent / 100,
        // truncated once at the end (the percent_of step).
        let discounted_units = line
            .product()
            .unit_price()
            .times(self.threshold_quantity)
            .times(applied_times);
        let deduction = discounted_units.percent_of(self.percent_off);

        debug!(
            rule = %self.name,
            product = %self.target_product_name,
            applied_times,
            deduction = %deduction,
            "quantity discount applied"
        );
        deduction
    }
}

// =============================================================================
// Bundle Discount
// =============================================================================

/// A fixed deduction for every pair formed across two distinct products.
///
/// `pairs = min(qty_a, qty_b)`; which product is "A" and which is "B" is
/// irrelevant to the result.
#[derive(Debug, Clone, Serialize)]
pub struct BundleDiscount {
    name: String,
    product_a_name: String,
    product_b_name: String,
    per_pair_deduction: Money,
}

impl BundleDiscount {
    /// Creates the rule, rejecting identical product names and
    /// non-positive deductions.
    pub fn new(
        name: impl Into<String>,
        product_a_name: impl Into<String>,
        product_b_name: impl Into<String>,
        per_pair_deduction: Money,
    ) -> PricingResult<Self> {
        let product_a_name = product_a_name.into();
        let product_b_name = product_b_name.into();
        validate_bundle_pair(&product_a_name, &product_b_name)?;
        validate_per_pair_deduction(per_pair_deduction)?;

        Ok(BundleDiscount {
            name: name.into(),
            product_a_name,
            product_b_name,
            per_pair_deduction,
        })
    }
}

impl DiscountRule for BundleDiscount {
    fn name(&self) -> &str {
        &self.name
    }

    fn deduction(&self, lines: &[CartLine]) -> Money {
        let (Some(line_a), Some(line_b)) = (
            line_for(lines, &self.product_a_name),
            line_for(lines, &self.product_b_name),
        ) else {
            return Money::zero();
        };

        let pairs_formed = line_a.quantity().min(line_b.quantity());
        let deduction = self.per_pair_deduction.times(pairs_formed);

        debug!(
            rule = %self.name,
            pairs_formed,
            deduction = %deduction,
            "bundle discount applied"
        );
        deduction
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
