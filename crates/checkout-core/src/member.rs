//! # Membership Collaborator
//!
//! The one external boundary of the engine: whether the current customer is
//! a privileged (VIP) member, which waives the shipping fee outright.
//!
//! The provider is injected at cart construction (never a hidden global)
//! and queried once per total computation.

/// Reports the current customer's membership standing.
pub trait MembershipStatus: Send + Sync {
    /// Whether the customer is a privileged/VIP member.
    fn is_privileged(&self) -> bool;
}

/// Default provider: nobody is privileged.
///
/// This is what [`crate::cart::Cart::new`] injects when the caller does not
/// supply a provider of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonMember;

impl MembershipStatus for NonMember {
    fn is_privileged(&self) -> bool {
        false
    }
}
