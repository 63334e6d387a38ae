//! Quickplay walkthrough binary
//!
//! Drives a Pick 3 ticket session and a checkout flow end to end: manual
//! digit picks, the debounced auto-commit, quick pick, per-line options,
//! pricing, and the cart handoff against in-memory collaborators.

use playslip_checkout::{
    CartId, CartItem, CheckoutAction, CheckoutEnvironment, CheckoutReducer, CheckoutState, UserId,
};
use playslip_core::{Effect, Money};
use playslip_games::config::{GameConfig, GameId};
use playslip_games::pricing;
use playslip_games::session::{SessionAction, SessionEnvironment, SessionReducer, TicketSession};
use playslip_runtime::Store;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// In-memory collaborators: one signed-in user with a $50 wallet
#[derive(Clone)]
struct DemoCollaborators {
    user: UserId,
    balance: Money,
}

impl CheckoutEnvironment for DemoCollaborators {
    fn current_user(&self) -> Option<UserId> {
        Some(self.user)
    }

    fn fetch_jackpot(&self, _game: GameId) -> Effect<CheckoutAction> {
        Effect::Future(Box::pin(async {
            Some(CheckoutAction::JackpotLoaded(Money::from_dollars(500_000)))
        }))
    }

    fn submit_cart(&self, item: CartItem) -> Effect<CheckoutAction> {
        Effect::Future(Box::pin(async move {
            tracing::info!(lines = item.line_count, total = %item.total_price, "cart accepted");
            Some(CheckoutAction::CartAccepted {
                cart_id: CartId::new(),
            })
        }))
    }

    fn fetch_balance(&self, _user: UserId) -> Effect<CheckoutAction> {
        let balance = self.balance;
        Effect::Future(Box::pin(async move {
            Some(CheckoutAction::BalanceFetched { balance })
        }))
    }

    fn debit_wallet(&self, _user: UserId, amount: Money) -> Effect<CheckoutAction> {
        Effect::Future(Box::pin(async move {
            tracing::info!(%amount, "wallet debited");
            Some(CheckoutAction::OrderPlaced)
        }))
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickplay=info,playslip_games=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Quickplay: Pick 3 ticket builder walkthrough ===\n");

    let config = GameConfig::pick3();
    let session = Store::new(
        TicketSession::new(&config),
        SessionReducer::new(config.clone()),
        SessionEnvironment::live(),
    );

    // Line 1: manual picks; the line auto-commits after the debounce.
    println!(">>> Picking 4-7-2 by hand");
    for digit in [4, 7, 2] {
        let _ = session.send(SessionAction::SelectValue(digit)).await;
    }
    let _ = session.wait_idle(Duration::from_secs(2)).await;
    println!(
        "Lines after auto-commit: {}",
        session.state(TicketSession::line_count).await
    );

    // Line 2: quick pick.
    println!("\n>>> Quick pick");
    let _ = session.send(SessionAction::QuickPick).await;
    let _ = session.wait_idle(Duration::from_secs(2)).await;
    println!(
        "Lines after quick pick: {}",
        session.state(TicketSession::line_count).await
    );

    // Options on line 1: add-on plus two draws.
    let _ = session
        .send(SessionAction::ToggleAddOn {
            index: 0,
            enabled: true,
        })
        .await;
    let _ = session
        .send(SessionAction::SetDrawCount { index: 0, count: 2 })
        .await;

    let lines = session.state(|s| s.lines.clone()).await;
    let total = pricing::total_price(&lines, &config);
    println!("\nTicket total: {total}");

    // Hand the book to checkout.
    let checkout = Store::new(
        CheckoutState::default(),
        CheckoutReducer::new(GameId::Pick3),
        DemoCollaborators {
            user: UserId::new(),
            balance: Money::from_dollars(50),
        },
    );

    let _ = checkout.send(CheckoutAction::RefreshJackpot).await;
    let item = CartItem::from_book(&config, &lines);
    println!("\n>>> Adding {} lines to the cart ({})", item.line_count, item.total_price);
    let _ = checkout.send(CheckoutAction::AddToCart { item }).await;
    let _ = checkout.wait_idle(Duration::from_secs(2)).await;

    if checkout.state(|s| s.last_cart_id.is_some()).await {
        let _ = session.send(SessionAction::ClearBook).await;
    }
    if let Some(notice) = checkout.state(|s| s.notice.clone()).await {
        println!("Notice: {notice}");
    }

    println!("\n>>> Placing the order");
    let _ = checkout.send(CheckoutAction::PlaceOrder { total }).await;
    let _ = checkout.wait_idle(Duration::from_secs(2)).await;
    if let Some(notice) = checkout.state(|s| s.notice.clone()).await {
        println!("Notice: {notice}");
    }

    println!("\n=== Walkthrough complete ===");
}
