//! Checkout error taxonomy.
//!
//! Two families only: rejections the user must resolve (sign in, top up)
//! and transient collaborator failures. Both end up as a notice string on
//! the checkout state; nothing here corrupts ticket state.

use playslip_core::Money;
use thiserror::Error;

/// Errors surfaced by the checkout flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// No user is signed in; the storefront redirects to auth
    #[error("Sign in to add tickets to your cart")]
    NotAuthenticated,

    /// Wallet balance cannot cover the order
    #[error("Insufficient funds: need {needed}, wallet holds {available}")]
    InsufficientFunds {
        /// Order total
        needed: Money,
        /// Current wallet balance
        available: Money,
    },

    /// The cart collaborator rejected or failed the add
    #[error("Could not add to cart: {0}")]
    Cart(String),

    /// The wallet collaborator failed
    #[error("Wallet error: {0}")]
    Wallet(String),
}
