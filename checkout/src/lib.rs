//! # Playslip Checkout
//!
//! The boundary between the ticket builder and the storefront's hosted
//! collaborators: cart, wallet, auth, and the jackpot feed.
//!
//! The builder owns ticket state; this crate owns the handoff. Its reducer
//! is a small state machine that:
//!
//! - short-circuits "add to cart" when no user is signed in,
//! - snapshots a committed book into the [`types::CartItem`] wire shape,
//! - checks the wallet balance *before* any debit is attempted
//!   (check-then-act, never act-then-rollback),
//! - treats jackpot-feed failures as "unknown", never as blocking.
//!
//! External calls are modeled the same way as everywhere else in this
//! workspace: the environment trait returns [`Effect`](playslip_core::Effect)
//! values whose completion feeds a result action back into the reducer. A
//! failed call surfaces as a transient notice on the state; the ticket book
//! (owned by the session store) is never touched by a failure. There is no
//! retry policy — a failed add requires the user to press the button again.

pub mod environment;
pub mod error;
pub mod reducer;
pub mod types;

pub use environment::CheckoutEnvironment;
pub use error::CheckoutError;
pub use reducer::{CheckoutAction, CheckoutPhase, CheckoutReducer, CheckoutState};
pub use types::{CartId, CartItem, CartLine, UserId};
