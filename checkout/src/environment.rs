//! Injected collaborators for the checkout flow.
//!
//! Environment methods return [`Effect`] values, not futures: each
//! implementation owns its clones, boxes its async work, and yields exactly
//! one result action. This keeps the trait object-safe and the reducer pure.

use crate::reducer::CheckoutAction;
use crate::types::{CartItem, UserId};
use playslip_core::{Effect, Money};
use playslip_games::config::GameId;

/// The hosted collaborators checkout talks to
///
/// Production implementations wrap the storefront's backend service; tests
/// and demos use in-memory fakes. Every async method must resolve to a
/// [`CheckoutAction`] describing the outcome — failures included, since a
/// swallowed future would leave the flow stuck in its awaiting phase.
pub trait CheckoutEnvironment: Send + Sync {
    /// The signed-in user, if any
    ///
    /// Auth state is session-local, so this is synchronous; the auth
    /// provider itself is outside this crate.
    fn current_user(&self) -> Option<UserId>;

    /// Fetch the latest jackpot for a game
    ///
    /// Best effort: resolve to [`CheckoutAction::JackpotLoaded`] or
    /// [`CheckoutAction::JackpotUnavailable`]; never anything that blocks
    /// the cart.
    fn fetch_jackpot(&self, game: GameId) -> Effect<CheckoutAction>;

    /// Hand a snapshot to the cart collaborator
    ///
    /// Resolve to [`CheckoutAction::CartAccepted`] or
    /// [`CheckoutAction::CartFailed`].
    fn submit_cart(&self, item: CartItem) -> Effect<CheckoutAction>;

    /// Read the user's wallet balance
    ///
    /// Resolve to [`CheckoutAction::BalanceFetched`] or
    /// [`CheckoutAction::OrderFailed`].
    fn fetch_balance(&self, user: UserId) -> Effect<CheckoutAction>;

    /// Debit the wallet for an order total
    ///
    /// Only called after the balance check passed. Resolve to
    /// [`CheckoutAction::OrderPlaced`] or [`CheckoutAction::OrderFailed`].
    fn debit_wallet(&self, user: UserId, amount: Money) -> Effect<CheckoutAction>;
}
