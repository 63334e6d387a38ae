//! The checkout state machine.
//!
//! One instance per game page, alongside the ticket session. The phases
//! serialize the two money-touching flows (cart add, order placement) so a
//! double tap cannot fire two submissions, and the balance check always
//! happens before the debit.

use crate::environment::CheckoutEnvironment;
use crate::error::CheckoutError;
use crate::types::{CartId, CartItem, UserId};
use playslip_core::{Effect, Money, Reducer, SmallVec, smallvec};
use playslip_games::config::GameId;
use std::marker::PhantomData;

/// Where the checkout flow currently stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing in flight
    #[default]
    Idle,
    /// A cart add is awaiting the collaborator
    SubmittingCart,
    /// An order is awaiting the wallet balance
    CheckingFunds {
        /// Who is paying
        user: UserId,
        /// Order total being verified
        total: Money,
    },
    /// Balance verified; the debit is in flight
    Debiting {
        /// Order total being debited
        total: Money,
    },
}

/// Checkout-side state for one game page
#[derive(Clone, Debug, Default)]
pub struct CheckoutState {
    /// Latest known jackpot; `None` means unknown (feed failures land here)
    pub jackpot: Option<Money>,
    /// Current flow phase
    pub phase: CheckoutPhase,
    /// Transient user-visible message (toast)
    pub notice: Option<String>,
    /// Cart id of the most recently accepted add
    pub last_cart_id: Option<CartId>,
}

impl CheckoutState {
    /// Whether a money-touching call is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self.phase, CheckoutPhase::Idle)
    }
}

/// Inputs and collaborator outcomes for the checkout flow
#[derive(Clone, Debug)]
pub enum CheckoutAction {
    /// Ask the results collaborator for the current jackpot
    RefreshJackpot,
    /// Jackpot lookup succeeded
    JackpotLoaded(Money),
    /// Jackpot lookup failed; treated as unknown, never blocking
    JackpotUnavailable,
    /// User pressed "add to cart" with a snapshotted book
    AddToCart {
        /// The snapshot to hand over
        item: CartItem,
    },
    /// The cart collaborator accepted the item
    CartAccepted {
        /// Assigned cart id
        cart_id: CartId,
    },
    /// The cart collaborator failed or rejected the item
    CartFailed {
        /// User-visible reason
        reason: String,
    },
    /// User confirmed payment of an order total
    PlaceOrder {
        /// Total to charge against the wallet
        total: Money,
    },
    /// Wallet balance arrived for a pending order
    BalanceFetched {
        /// Current balance
        balance: Money,
    },
    /// Wallet debit completed; the order stands
    OrderPlaced,
    /// Order could not be completed; wallet state is unchanged
    OrderFailed {
        /// User-visible reason
        reason: String,
    },
}

/// Reducer for the checkout flow of one game page
///
/// Generic over the environment implementation so production and test
/// collaborators slot in without boxing.
#[derive(Debug)]
pub struct CheckoutReducer<E> {
    game: GameId,
    _phantom: PhantomData<E>,
}

impl<E> CheckoutReducer<E> {
    /// Create a checkout reducer for a game page
    #[must_use]
    pub const fn new(game: GameId) -> Self {
        Self {
            game,
            _phantom: PhantomData,
        }
    }
}

impl<E> Clone for CheckoutReducer<E> {
    fn clone(&self) -> Self {
        Self::new(self.game)
    }
}

type Effects = SmallVec<[Effect<CheckoutAction>; 4]>;

fn no_effects() -> Effects {
    smallvec![Effect::None]
}

impl<E: CheckoutEnvironment> Reducer for CheckoutReducer<E> {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::RefreshJackpot => smallvec![env.fetch_jackpot(self.game)],

            CheckoutAction::JackpotLoaded(amount) => {
                state.jackpot = Some(amount);
                no_effects()
            },

            CheckoutAction::JackpotUnavailable => {
                tracing::warn!(game = %self.game, "jackpot lookup failed, showing unknown");
                state.jackpot = None;
                no_effects()
            },

            CheckoutAction::AddToCart { item } => {
                if state.is_busy() {
                    return no_effects();
                }
                if env.current_user().is_none() {
                    state.notice = Some(CheckoutError::NotAuthenticated.to_string());
                    return no_effects();
                }
                state.phase = CheckoutPhase::SubmittingCart;
                state.notice = None;
                smallvec![env.submit_cart(item)]
            },

            CheckoutAction::CartAccepted { cart_id } => {
                if state.phase == CheckoutPhase::SubmittingCart {
                    state.phase = CheckoutPhase::Idle;
                    state.last_cart_id = Some(cart_id);
                    state.notice = Some("Added to cart".to_string());
                }
                no_effects()
            },

            CheckoutAction::CartFailed { reason } => {
                tracing::warn!(%reason, "cart add failed");
                if state.phase == CheckoutPhase::SubmittingCart {
                    state.phase = CheckoutPhase::Idle;
                }
                state.notice = Some(CheckoutError::Cart(reason).to_string());
                no_effects()
            },

            CheckoutAction::PlaceOrder { total } => {
                if state.is_busy() {
                    return no_effects();
                }
                let Some(user) = env.current_user() else {
                    state.notice = Some(CheckoutError::NotAuthenticated.to_string());
                    return no_effects();
                };
                state.phase = CheckoutPhase::CheckingFunds { user, total };
                state.notice = None;
                smallvec![env.fetch_balance(user)]
            },

            CheckoutAction::BalanceFetched { balance } => {
                let CheckoutPhase::CheckingFunds { user, total } = state.phase else {
                    return no_effects();
                };
                if balance < total {
                    // Check-then-act: the rejection happens before any debit
                    // is attempted, so nothing needs rolling back.
                    state.phase = CheckoutPhase::Idle;
                    state.notice = Some(
                        CheckoutError::InsufficientFunds {
                            needed: total,
                            available: balance,
                        }
                        .to_string(),
                    );
                    return no_effects();
                }
                state.phase = CheckoutPhase::Debiting { total };
                smallvec![env.debit_wallet(user, total)]
            },

            CheckoutAction::OrderPlaced => {
                if matches!(state.phase, CheckoutPhase::Debiting { .. }) {
                    state.phase = CheckoutPhase::Idle;
                    state.notice = Some("Order placed".to_string());
                }
                no_effects()
            },

            CheckoutAction::OrderFailed { reason } => {
                tracing::warn!(%reason, "order failed");
                state.phase = CheckoutPhase::Idle;
                state.notice = Some(reason);
                no_effects()
            },
        }
    }
}
