//! # Playslip Core
//!
//! Core traits and types for the playslip ticket-builder architecture.
//!
//! A game page is modeled as a small event-driven state machine:
//!
//! - **State**: owned domain data for one feature (a ticket session, a checkout)
//! - **Action**: every input the feature can receive (user picks, timer
//!   firings, completed external calls)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a *description* of a side effect (a delay, an async call),
//!   executed later by the store runtime
//! - **Environment**: injected dependencies behind traits
//!
//! Reducers never perform I/O and never panic; invalid inputs are no-ops by
//! design, matching how a storefront treats a stray tap. All timing (the
//! auto-commit debounce) and all external calls (cart, wallet, jackpot feed)
//! travel through [`effect::Effect`] so they stay testable and cancellable.
//!
//! ## Example
//!
//! ```ignore
//! use playslip_core::{Reducer, Effect, smallvec, SmallVec};
//!
//! impl Reducer for SessionReducer {
//!     type State = TicketSession;
//!     type Action = SessionAction;
//!     type Environment = SessionEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TicketSession,
//!         action: SessionAction,
//!         env: &SessionEnvironment,
//!     ) -> SmallVec<[Effect<SessionAction>; 4]> {
//!         // selection logic here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Exact-cents money arithmetic for bet amounts and totals
pub mod money;

pub use money::Money;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action (invalid preconditions are silent no-ops)
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the runtime
        ///
        /// Most actions produce at most one effect, hence the inline
        /// capacity of 4.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime. They are
/// values (not execution) and are composable. The ticket builder uses
/// [`Effect::Delay`] for its auto-commit debounce and [`Effect::Future`] for
/// checkout-side calls; a stale delayed action is recognized and dropped by
/// the reducer at fire time, so cancellation needs no timer bookkeeping.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (debounces, countdowns)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// the Environment parameter. The ticket builder needs wall-clock time (for
/// commit stamps) and randomness (for quick pick); checkout collaborators
/// define their own traits in the `checkout` crate.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Randomness source for quick-pick fills
    ///
    /// Quick pick draws an index into a candidate list rather than a raw
    /// value, so distinct-number domains can exclude already-chosen values
    /// before drawing. Test doubles script the returned indices.
    pub trait RandomSource: Send + Sync {
        /// Return a uniformly distributed index in `0..bound`
        ///
        /// `bound` must be at least 1; the engine never draws from an empty
        /// candidate list.
        fn pick_index(&self, bound: usize) -> usize;
    }

    /// Production randomness backed by the thread-local RNG
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemRandom;

    impl RandomSource for SystemRandom {
        fn pick_index(&self, bound: usize) -> usize {
            use rand::Rng;
            rand::thread_rng().gen_range(0..bound)
        }
    }
}
