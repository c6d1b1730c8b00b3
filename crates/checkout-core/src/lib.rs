//! # checkout-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the checkout engine. It turns a bounded
//! set of line items plus a list of pluggable discount rules into a final
//! payable total, deterministically.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Architecture                           │
//! │                                                                     │
//! │  Caller (API handler, session, test)                                │
//! │    builds Products ──► wraps CartLines ──► adds to Cart            │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │              ★ checkout-core (THIS CRATE) ★                   │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌────────┐  │  │
//! │  │  │  types  │ │  money  │ │ discount │ │  cart  │ │ member │  │  │
//! │  │  │ Product │ │  Money  │ │  rules   │ │  Cart  │ │  VIP?  │  │  │
//! │  │  │CartLine │ │ (int)   │ │ (trait)  │ │ totals │ │ (trait)│  │  │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └────────┘ └────────┘  │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same lines + same rules = same total, always
//! 2. **No I/O**: the only external boundary is the injected
//!    [`member::MembershipStatus`] collaborator
//! 3. **Integer Money**: every amount is an [`money::Money`] in whole
//!    currency units; fractional discount units truncate toward zero
//! 4. **Explicit Errors**: all failures are typed variants, detected before
//!    any state change, so a failing operation is a no-op
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use checkout_core::{Cart, CartLine, Money, Product};
//! use checkout_core::discount::{DiscountRule, QuantityDiscount};
//!
//! let pencil = Arc::new(Product::new("Pencil", Money::new(20), 10)?);
//! let rule: Arc<dyn DiscountRule> =
//!     Arc::new(QuantityDiscount::new("Pencil Day", "Pencil", 2, 10)?);
//!
//! let mut cart = Cart::new(vec![], vec![rule])?;
//! let total = cart.add(CartLine::new(pencil, 2)?)?;
//!
//! // 40 gross − 4 discount + 60 shipping
//! assert_eq!(total.units(), 96);
//! # Ok::<(), checkout_core::PricingError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod member;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Cart` instead of
// `use checkout_core::cart::Cart`

pub use cart::{Cart, PricingBreakdown};
pub use discount::{BundleDiscount, DiscountRule, QuantityDiscount};
pub use error::{PricingError, PricingResult};
pub use member::{MembershipStatus, NonMember};
pub use money::Money;
pub use types::{CartLine, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct product lines in a single cart.
///
/// ## Business Reason
/// The checkout flow is sized for small baskets; anything larger goes
/// through a different channel. Enforced at construction and on every add.
pub const MAX_CART_LINES: usize = 5;

/// Flat shipping fee added to a total unless waived.
pub const SHIPPING_FEE: Money = Money::new(60);

/// Net amount a non-privileged customer must STRICTLY exceed for the
/// shipping fee to be waived.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(500);

/// The only percentages a quantity discount may carry.
///
/// ## Business Reason
/// Promotions are pre-approved tiers; arbitrary percentages are a pricing
/// incident waiting to happen.
pub const ALLOWED_PERCENT_OFF: [u32; 3] = [5, 10, 15];
