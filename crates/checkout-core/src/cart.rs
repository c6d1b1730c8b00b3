//! # Cart Orchestration
//!
//! The cart holds the line snapshot, folds discount rules over it, and
//! settles the shipping fee.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Cart::add(line)                              │
//! │                                                                     │
//! │  line for same product? ──yes──► merge (cap re-checked on the      │
//! │        │                         SUMMED quantity, before commit)   │
//! │        no                                                           │
//! │        ▼                                                            │
//! │  5 distinct lines already? ──yes──► CartFull (nothing mutated)      │
//! │        │                                                            │
//! │        no ──► append                                                │
//! │        ▼                                                            │
//! │  gross = Σ line.subtotal()                                          │
//! │  deduction = Σ rule.deduction(lines)   ← same snapshot for each    │
//! │  net = gross − deduction               ← NOT clamped at zero       │
//! │  shipping = 0 if privileged member     ← checked first, always    │
//! │             0 if net > 500               waives                    │
//! │             60 otherwise                                            │
//! │  total = net + shipping                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most [`MAX_CART_LINES`] lines, at most one per product name
//! - Every line's quantity is within its product's purchase cap
//! - A failed `add` leaves the line sequence exactly as it was

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discount::DiscountRule;
use crate::error::{PricingError, PricingResult};
use crate::member::{MembershipStatus, NonMember};
use crate::money::Money;
use crate::types::CartLine;
use crate::{FREE_SHIPPING_THRESHOLD, MAX_CART_LINES, SHIPPING_FEE};

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// A priced snapshot of the cart, suitable for receipts and API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Sum of all line subtotals before any rule runs.
    pub gross_subtotal: Money,

    /// Sum of every rule's independent deduction over the same snapshot.
    pub total_deduction: Money,

    /// `gross_subtotal − total_deduction`; may be negative, by policy.
    pub net_before_shipping: Money,

    /// The applied fee: zero when waived, [`SHIPPING_FEE`] otherwise.
    pub shipping_fee: Money,

    /// The payable amount: `net_before_shipping + shipping_fee`.
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// One pricing session: an ordered line sequence, the rule list, and the
/// membership collaborator.
///
/// ## Lifecycle
/// Constructed once per checkout request, mutated only through [`Cart::add`],
/// discarded after the final total is read. Not designed for concurrent
/// mutation; give each session its own cart.
pub struct Cart {
    lines: Vec<CartLine>,
    rules: Vec<Arc<dyn DiscountRule>>,
    membership: Arc<dyn MembershipStatus>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Creates a cart with the default (non-privileged) membership provider.
    ///
    /// See [`Cart::with_membership`] for the full contract.
    pub fn new(lines: Vec<CartLine>, rules: Vec<Arc<dyn DiscountRule>>) -> PricingResult<Self> {
        Cart::with_membership(lines, rules, Arc::new(NonMember))
    }

    /// Creates a cart with an explicit membership provider.
    ///
    /// ## Errors
    /// - `CartFull` when the initial line set exceeds [`MAX_CART_LINES`]
    /// - `InvalidInput` when two initial lines share a product: the cart
    ///   keys lines by product name, so duplicates must be merged by the caller
    pub fn with_membership(
        lines: Vec<CartLine>,
        rules: Vec<Arc<dyn DiscountRule>>,
        membership: Arc<dyn MembershipStatus>,
    ) -> PricingResult<Self> {
        if lines.len() > MAX_CART_LINES {
            return Err(PricingError::CartFull {
                product: lines[MAX_CART_LINES].product_name().to_string(),
                max: MAX_CART_LINES,
            });
        }

        for (i, line) in lines.iter().enumerate() {
            if lines[..i]
                .iter()
                .any(|earlier| earlier.product_name() == line.product_name())
            {
                return Err(PricingError::InvalidInput {
                    field: "lines".to_string(),
                    reason: format!("duplicate line for product '{}'", line.product_name()),
                });
            }
        }

        Ok(Cart {
            lines,
            rules,
            membership,
        })
    }

    /// Adds a line and returns the recomputed total.
    ///
    /// A line for a product already in the cart is MERGED: the existing
    /// line is replaced by one carrying the summed quantity, re-validated
    /// against the product's cap. All validation happens before the line
    /// sequence is touched, so a failing `add` is a true no-op.
    pub fn add(&mut self, new_line: CartLine) -> PricingResult<Money> {
        match self
            .lines
            .iter()
            .position(|line| line.product_name() == new_line.product_name())
        {
            Some(index) => {
                let merged = self.lines[index].increase_quantity(new_line.quantity())?;
                debug!(
                    product = %merged.product_name(),
                    quantity = merged.quantity(),
                    "merged line for existing product"
                );
                self.lines[index] = merged;
            }
            None => {
                if self.lines.len() >= MAX_CART_LINES {
                    return Err(PricingError::CartFull {
                        product: new_line.product_name().to_string(),
                        max: MAX_CART_LINES,
                    });
                }
                debug!(
                    product = %new_line.product_name(),
                    quantity = new_line.quantity(),
                    "appended new line"
                );
                self.lines.push(new_line);
            }
        }

        Ok(self.total())
    }

    /// Prices the current snapshot. Read-only, callable at any time.
    pub fn breakdown(&self) -> PricingBreakdown {
        let gross_subtotal: Money = self.lines.iter().map(CartLine::subtotal).sum();

        // Every rule sees the same unmodified snapshot; deductions are
        // additive, never sequential.
        let total_deduction: Money = self
            .rules
            .iter()
            .map(|rule| rule.deduction(&self.lines))
            .sum();

        let net_before_shipping = gross_subtotal - total_deduction;

        // Privileged membership waives the fee unconditionally and is
        // checked before the amount threshold.
        let shipping_fee = if self.membership.is_privileged() {
            debug!("shipping fee waived: privileged member");
            Money::zero()
        } else if net_before_shipping > FREE_SHIPPING_THRESHOLD {
            debug!(net = %net_before_shipping, "shipping fee waived: over threshold");
            Money::zero()
        } else {
            SHIPPING_FEE
        };

        let breakdown = PricingBreakdown {
            gross_subtotal,
            total_deduction,
            net_before_shipping,
            shipping_fee,
            total: net_before_shipping + shipping_fee,
        };
        debug!(
            gross = %breakdown.gross_subtotal,
            deduction = %breakdown.total_deduction,
            total = %breakdown.total,
            "cart priced"
        );
        breakdown
    }

    /// The final payable amount for the current snapshot.
    pub fn total(&self) -> Money {
        self.breakdown().total
    }

    /// Read-only view of the current lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::{BundleDiscount, QuantityDiscount};
    use crate::types::Product;

    // Stationery fixture catalog shared across the scenarios.

    fn product(name: &str, unit_price: i64, cap: u32) -> Arc<Product> {
        Arc::new(Product::new(name, Money::new(unit_price), cap).unwrap())
    }

    fn pencil() -> Arc<Product> {
        product("Pencil", 20, 10)
    }

    fn eraser() -> Arc<Product> {
        product("Eraser", 10, 10)
    }

    fn keyboard() -> Arc<Product> {
        product("Keyboard", 800, 1)
    }

    fn mouse() -> Arc<Product> {
        product("Computer Mouse", 500, 1)
    }

    fn sharpener() -> Arc<Product> {
        product("Pencil Sharpener", 200, 2)
    }

    fn line(product: Arc<Product>, qty: u32) -> CartLine {
        CartLine::new(product, qty).unwrap()
    }

    /// Test double for the membership boundary.
    struct StubMember {
        privileged: bool,
    }

    impl MembershipStatus for StubMember {
        fn is_privileged(&self) -> bool {
            self.privileged
        }
    }

    fn cart_with(lines: Vec<CartLine>, rules: Vec<Arc<dyn DiscountRule>>) -> Cart {
        Cart::new(lines, rules).unwrap()
    }

    #[test]
    fn test_total_sums_subtotals_plus_shipping_fee() {
        let mut cart = cart_with(vec![line(eraser(), 5)], vec![]);

        let total = cart.add(line(pencil(), 10)).unwrap();

        // (10×5 + 20×10) + 60 shipping
        assert_eq!(total.units(), 310);
    }

    #[test]
    fn test_merge_rejects_quantity_over_cap_and_rolls_nothing_back() {
        let mut cart = cart_with(vec![line(eraser(), 10)], vec![]);
        let before = cart.breakdown();

        let err = cart.add(line(eraser(), 1)).unwrap_err();

        assert_eq!(
            err,
            PricingError::QuantityExceeded {
                product: "Eraser".to_string(),
                max: 10,
                requested: 11,
            }
        );
        // The failed add left the snapshot untouched.
        assert_eq!(cart.lines()[0].quantity(), 10);
        assert_eq!(cart.breakdown(), before);
    }

    #[test]
    fn test_merge_is_idempotent_with_single_add() {
        let mut split = cart_with(vec![], vec![]);
        split.add(line(pencil(), 3)).unwrap();
        let split_total = split.add(line(pencil(), 4)).unwrap();

        let mut single = cart_with(vec![], vec![]);
        let single_total = single.add(line(pencil(), 7)).unwrap();

        assert_eq!(split.line_count(), 1);
        assert_eq!(split.lines()[0].quantity(), 7);
        assert_eq!(split_total, single_total);
        assert_eq!(split.breakdown(), single.breakdown());
    }

    #[test]
    fn test_sixth_distinct_product_is_rejected_naming_it() {
        let mut cart = cart_with(
            vec![
                line(eraser(), 1),
                line(pencil(), 1),
                line(product("Blue Pen", 30, 10), 1),
                line(product("Notebook", 50, 5), 1),
                line(keyboard(), 1),
            ],
            vec![],
        );
        let before = cart.breakdown();

        let err = cart.add(line(sharpener(), 1)).unwrap_err();

        assert_eq!(
            err,
            PricingError::CartFull {
                product: "Pencil Sharpener".to_string(),
                max: MAX_CART_LINES,
            }
        );
        assert_eq!(cart.line_count(), 5);
        assert_eq!(cart.breakdown(), before);
    }

    #[test]
    fn test_merging_into_a_full_cart_is_still_allowed() {
        let mut cart = cart_with(
            vec![
                line(eraser(), 1),
                line(pencil(), 1),
                line(product("Blue Pen", 30, 10), 1),
                line(product("Notebook", 50, 5), 1),
                line(keyboard(), 1),
            ],
            vec![],
        );

        // Same product: merges instead of opening a sixth line.
        cart.add(line(pencil(), 2)).unwrap();

        assert_eq!(cart.line_count(), 5);
        assert_eq!(cart.lines()[1].quantity(), 3);
    }

    #[test]
    fn test_construction_rejects_more_than_five_lines() {
        let err = Cart::new(
            vec![
                line(product("P1", 30, 10), 1),
                line(product("P2", 30, 10), 1),
                line(product("P3", 30, 10), 1),
                line(product("P4", 50, 5), 1),
                line(product("P5", 800, 1), 1),
                line(product("P6", 800, 1), 1),
            ],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(err, PricingError::CartFull { .. }));
    }

    #[test]
    fn test_construction_rejects_duplicate_product_lines() {
        let err = Cart::new(vec![line(pencil(), 1), line(pencil(), 2)], vec![]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { .. }));
    }

    #[test]
    fn test_free_shipping_when_net_total_over_500() {
        let mut cart = cart_with(vec![line(sharpener(), 2)], vec![]);

        let total = cart.add(line(pencil(), 6)).unwrap();

        // 400 + 120 = 520 > 500, fee waived
        assert_eq!(total.units(), 520);
    }

    #[test]
    fn test_shipping_fee_applies_at_exactly_500() {
        // The waiver needs strictly MORE than 500.
        let cart = cart_with(vec![line(product("Gift Box", 500, 1), 1)], vec![]);
        assert_eq!(cart.total().units(), 560);

        let over = cart_with(vec![line(product("Gift Box", 501, 1), 1)], vec![]);
        assert_eq!(over.total().units(), 501);
    }

    #[test]
    fn test_privileged_member_always_skips_shipping_fee() {
        let mut cart = Cart::with_membership(
            vec![],
            vec![],
            Arc::new(StubMember { privileged: true }),
        )
        .unwrap();

        // Well under the free-shipping threshold, waived anyway.
        let total = cart.add(line(pencil(), 1)).unwrap();
        assert_eq!(total.units(), 20);
    }

    #[test]
    fn test_quantity_discount_applies_to_cart_total() {
        let rule = QuantityDiscount::new("Pencil Day", "Pencil", 10, 10).unwrap();
        let mut cart = cart_with(vec![], vec![Arc::new(rule)]);

        let total = cart.add(line(pencil(), 10)).unwrap();

        // 200 − 20 discount + 60 shipping
        assert_eq!(total.units(), 240);
    }

    #[test]
    fn test_repeatable_quantity_discount_below_threshold_pair() {
        let rule = QuantityDiscount::new("Pencil Day", "Pencil", 2, 10).unwrap();
        let mut cart = cart_with(vec![], vec![Arc::new(rule)]);

        let total = cart.add(line(pencil(), 2)).unwrap();

        // 40 − 4 + 60 shipping
        assert_eq!(total.units(), 96);
    }

    #[test]
    fn test_bundle_discount_applies_to_cart_total() {
        let rule =
            BundleDiscount::new("3C Day", "Keyboard", "Computer Mouse", Money::new(300)).unwrap();
        let mut cart = cart_with(vec![line(keyboard(), 1)], vec![Arc::new(rule)]);

        let total = cart.add(line(mouse(), 1)).unwrap();

        // 800 + 500 − 300 = 1000, over the free-shipping threshold
        assert_eq!(total.units(), 1000);
    }

    #[test]
    fn test_stacked_rules_deduct_additively_over_the_same_snapshot() {
        let quantity: Arc<dyn DiscountRule> =
            Arc::new(QuantityDiscount::new("Pencil Day", "Pencil", 2, 10).unwrap());
        let bundle: Arc<dyn DiscountRule> = Arc::new(
            BundleDiscount::new("Stationery", "Pencil", "Eraser", Money::new(10)).unwrap(),
        );

        let lines = vec![line(pencil(), 4), line(eraser(), 2)];
        let independent =
            quantity.deduction(&lines).units() + bundle.deduction(&lines).units();

        let cart = cart_with(lines, vec![quantity, bundle]);
        let breakdown = cart.breakdown();

        // 8 from the quantity rule, 20 from the bundle; neither sees the
        // other's effect.
        assert_eq!(breakdown.total_deduction.units(), independent);
        assert_eq!(breakdown.total_deduction.units(), 28);
        assert_eq!(breakdown.total.units(), 100 - 28 + 60);
    }

    #[test]
    fn test_net_below_zero_passes_through_uncapped() {
        // A mispriced promotion can out-deduct the subtotal; the engine
        // reports it rather than clamping.
        let rule =
            BundleDiscount::new("Overshoot", "Pencil", "Eraser", Money::new(100)).unwrap();
        let cart = cart_with(
            vec![line(pencil(), 1), line(eraser(), 1)],
            vec![Arc::new(rule)],
        );

        let breakdown = cart.breakdown();
        assert_eq!(breakdown.net_before_shipping.units(), -70);
        assert_eq!(breakdown.total.units(), -10);
    }

    #[test]
    fn test_total_on_empty_cart_charges_only_shipping() {
        let cart = cart_with(vec![], vec![]);
        assert!(cart.is_empty());
        assert_eq!(cart.total().units(), 60);
    }

    #[test]
    fn test_introspection_helpers() {
        let cart = cart_with(vec![line(pencil(), 4), line(eraser(), 2)], vec![]);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 6);
        assert!(!cart.is_empty());
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_breakdown_serializes_for_receipts() {
        let cart = cart_with(vec![line(pencil(), 2)], vec![]);
        let breakdown = cart.breakdown();

        let json = serde_json::to_value(breakdown).unwrap();
        assert_eq!(json["grossSubtotal"], 40);
        assert_eq!(json["shippingFee"], 60);
        assert_eq!(json["total"], 100);

        let back: PricingBreakdown = serde_json::from_value(json).unwrap();
        assert_eq!(back, breakdown);
    }
}
