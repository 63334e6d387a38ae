//! # Playslip Runtime
//!
//! Runtime implementation for the playslip ticket-builder architecture.
//!
//! This crate provides the [`Store`] that coordinates reducer execution and
//! effect handling for one game page (or one checkout flow).
//!
//! ## Core Components
//!
//! - **Store**: owns the state and serializes reducer execution
//! - **Effect executor**: runs effect descriptions and feeds produced actions
//!   back into the reducer
//!
//! Input events are processed strictly in arrival order at the reducer (the
//! write lock serializes them); delayed actions re-enter through the same
//! door, so a debounced commit scheduled at time T is re-validated by the
//! reducer when it fires at T+delay.
//!
//! ## Example
//!
//! ```ignore
//! use playslip_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! store.send(Action::DigitPressed(7)).await?;
//! let total = store.state(|s| s.total()).await;
//! ```

use playslip_core::{effect::Effect, reducer::Reducer};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub use error::StoreError;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for in-flight effects to settle
        ///
        /// Returned by `wait_idle` when the timeout expires while effects
        /// (delays, external calls) are still pending.
        #[error("Timed out with {0} effects still pending")]
        IdleTimeout(usize),
    }
}

/// How often shutdown and idle waits re-check the pending-effect counter
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The Store - runtime for a single feature's state machine
///
/// The store:
/// 1. Owns the state behind a read-write lock
/// 2. Runs the reducer on each sent action while holding the write lock
/// 3. Executes returned effects on spawned tasks
/// 4. Feeds actions produced by effects back into the reducer
///
/// One store is created per game page instance; nothing is shared across
/// pages, so there is no cross-store coordination.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Send an action to the store
    ///
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Starts execution of the returned effects
    ///
    /// `send` returns after *starting* effect execution, not after effects
    /// complete. Delayed actions (the auto-commit debounce) arrive later
    /// through this same method.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down; the action is dropped, matching a torn-down page ignoring a
    /// late timer.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        for effect in effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    /// Read a value out of the current state
    ///
    /// Takes a closure so callers copy out exactly what they need while the
    /// read lock is held.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Number of effects currently in flight (delays waiting to fire,
    /// external calls awaiting completion)
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Wait until all in-flight effects have settled
    ///
    /// Useful in tests that need a debounce timer or an external call to
    /// finish before asserting on state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdleTimeout`] if effects are still pending when
    /// the timeout elapses.
    pub async fn wait_idle(&self, timeout: Duration) -> Result<(), StoreError> {
        let start = tokio::time::Instant::now();
        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);
            if pending == 0 {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(StoreError::IdleTimeout(pending));
            }
            tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
        }
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (new actions are rejected, pending delayed
    /// actions fall through harmlessly) and waits for in-flight effects to
    /// finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before
    /// all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");
        self.shutdown.store(true, Ordering::Release);

        let start = tokio::time::Instant::now();
        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);
            if pending == 0 {
                tracing::info!("All effects completed, shutdown successful");
                return Ok(());
            }
            if start.elapsed() >= timeout {
                tracing::error!(pending_effects = pending, "Shutdown timed out");
                return Err(StoreError::ShutdownTimeout(pending));
            }
            tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
        }
    }

    /// Start execution of one effect description
    ///
    /// `Effect::None` is discarded inline and `Effect::Parallel` just fans
    /// out; everything that actually waits runs on its own spawned task and
    /// is counted in `pending_effects`.
    fn execute_effect(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {
                tracing::trace!("Discarding Effect::None");
            },
            Effect::Parallel(effects) => {
                tracing::trace!(count = effects.len(), "Fanning out Effect::Parallel");
                for effect in effects {
                    self.execute_effect(effect);
                }
            },
            effect => {
                let store = self.clone();
                self.pending_effects.fetch_add(1, Ordering::AcqRel);
                tokio::spawn(async move {
                    store.run_effect(effect).await;
                    store.pending_effects.fetch_sub(1, Ordering::AcqRel);
                });
            },
        }
    }

    /// Run one effect to completion on the current task
    ///
    /// Boxed because `Effect::Sequential` recurses.
    fn run_effect<'a>(&'a self, effect: Effect<A>) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    if let Some(action) = fut.await {
                        self.feed_back(action).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "Executing Effect::Delay");
                    tokio::time::sleep(duration).await;
                    self.feed_back(*action).await;
                },
                Effect::Parallel(effects) => {
                    for effect in effects {
                        self.execute_effect(effect);
                    }
                },
                Effect::Sequential(effects) => {
                    tracing::trace!(count = effects.len(), "Executing Effect::Sequential");
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                },
            }
        })
    }

    /// Feed an effect-produced action back into the reducer
    ///
    /// A rejection here means the store shut down while the effect was in
    /// flight; the action is dropped, which is exactly the teardown
    /// semantics a cancelled timer needs.
    async fn feed_back(&self, action: A) {
        if let Err(error) = self.send(action).await {
            tracing::trace!(%error, "Dropping effect-produced action");
        }
    }
}

// Manual Clone: state and counters are shared, reducer and environment are
// cloned, so effect tasks talk to the same store they came from.
impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
        }
    }
}
