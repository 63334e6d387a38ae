//! # Playslip Games
//!
//! The parametrized lottery ticket-builder engine.
//!
//! Every game family (3-digit and 4-digit pick games, daily numbers, the
//! 5-ball-plus-bonus draw game) runs on the *same* state machine; the
//! differences — slot count, value domains, play types and their wildcard
//! layouts, bet menu, add-on pricing basis, quick-pick behavior — are all
//! configuration data in [`config::GameConfig`], not code.
//!
//! ## Modules
//!
//! - [`config`]: the game catalog and per-family parameters
//! - [`line`]: slots and ticket lines, including the completion rule
//! - [`session`]: the selection state machine (reducer) — picks, quick pick,
//!   the debounced auto-commit, and the saved-lines book
//! - [`pricing`]: exact-cents price computation over the saved lines
//!
//! ## Example
//!
//! ```ignore
//! use playslip_games::{config::GameConfig, session::*};
//! use playslip_runtime::Store;
//!
//! let config = GameConfig::pick3();
//! let store = Store::new(
//!     TicketSession::new(&config),
//!     SessionReducer::new(config),
//!     SessionEnvironment::live(),
//! );
//! store.send(SessionAction::SelectValue(4)).await?;
//! ```

/// Game catalog and per-family configuration
pub mod config;

/// Slots, ticket lines, and the completion rule
pub mod line;

/// Exact price computation over saved lines
pub mod pricing;

/// The selection state machine: draft editing, quick pick, auto-commit,
/// saved-lines book
pub mod session;

pub use config::{AddOnBasis, GameConfig, GameId, PlayType, QuickPickOnFull, ValueDomain};
pub use line::{Slot, TicketLine};
pub use session::{EditTarget, SessionAction, SessionEnvironment, SessionReducer, TicketSession};
