//! # Playslip Testing
//!
//! Testing utilities and helpers for the playslip ticket-builder
//! architecture.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//!   ([`FixedClock`], [`StepRandom`])
//! - The [`ReducerTest`] Given/When/Then harness
//! - Assertion helpers for effect lists
//!
//! ## Example
//!
//! ```ignore
//! use playslip_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(SessionReducer::new(config))
//!     .with_env(test_environment())
//!     .given_state(TicketSession::new(&config))
//!     .when_action(SessionAction::SelectValue(7))
//!     .then_state(|s| assert_eq!(s.draft.slots[0], Slot::Filled(7)))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

pub use mocks::{FixedClock, StepRandom, test_clock};
pub use reducer_test::ReducerTest;

/// Deterministic implementations of the environment traits
pub mod mocks {
    use chrono::{DateTime, Utc};
    use playslip_core::environment::{Clock, RandomSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Scripted randomness source for deterministic quick-pick tests
    ///
    /// Returns the scripted values in order (each reduced modulo the
    /// requested bound), then 0 forever once the script is exhausted. The
    /// quick-pick engine draws candidate-list *indices*, so a script of
    /// zeros always picks the smallest remaining legal value.
    #[derive(Debug, Default)]
    pub struct StepRandom {
        script: Vec<usize>,
        cursor: AtomicUsize,
    }

    impl StepRandom {
        /// Create a scripted source that replays `script` then returns 0
        #[must_use]
        pub fn new(script: Vec<usize>) -> Self {
            Self {
                script,
                cursor: AtomicUsize::new(0),
            }
        }

        /// Source that always draws index 0 (smallest legal value)
        #[must_use]
        pub fn zeros() -> Self {
            Self::new(Vec::new())
        }
    }

    impl RandomSource for StepRandom {
        fn pick_index(&self, bound: usize) -> usize {
            let position = self.cursor.fetch_add(1, Ordering::Relaxed);
            self.script.get(position).map_or(0, |value| value % bound)
        }
    }
}

/// Ergonomic testing utilities for reducers
pub mod reducer_test {
    use playslip_core::{effect::Effect, reducer::Reducer};

    /// Type alias for state assertion functions
    type StateAssertion<S> = Box<dyn FnOnce(&S)>;

    /// Type alias for effect assertion functions
    type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

    /// Fluent API for testing reducers with Given-When-Then syntax
    ///
    /// Multiple `when_action` calls queue up a scenario: every action is
    /// reduced in order and the assertions run against the final state and
    /// the effects of the *last* action, which is what selection-flow tests
    /// (pick, pick, pick, expect commit scheduled) want.
    pub struct ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        reducer: R,
        environment: Option<E>,
        initial_state: Option<S>,
        actions: Vec<A>,
        state_assertions: Vec<StateAssertion<S>>,
        effect_assertions: Vec<EffectAssertion<A>>,
    }

    impl<R, S, A, E> ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new reducer test with the given reducer
        #[must_use]
        pub const fn new(reducer: R) -> Self {
            Self {
                reducer,
                environment: None,
                initial_state: None,
                actions: Vec::new(),
                state_assertions: Vec::new(),
                effect_assertions: Vec::new(),
            }
        }

        /// Set the environment for the test
        #[must_use]
        pub fn with_env(mut self, env: E) -> Self {
            self.environment = Some(env);
            self
        }

        /// Set the initial state (Given)
        #[must_use]
        pub fn given_state(mut self, state: S) -> Self {
            self.initial_state = Some(state);
            self
        }

        /// Queue an action to reduce (When); repeatable
        #[must_use]
        pub fn when_action(mut self, action: A) -> Self {
            self.actions.push(action);
            self
        }

        /// Add an assertion about the final state (Then)
        #[must_use]
        pub fn then_state<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&S) + 'static,
        {
            self.state_assertions.push(Box::new(assertion));
            self
        }

        /// Add an assertion about the last action's effects (Then)
        #[must_use]
        pub fn then_effects<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&[Effect<A>]) + 'static,
        {
            self.effect_assertions.push(Box::new(assertion));
            self
        }

        /// Run the scenario and execute all assertions
        ///
        /// # Panics
        ///
        /// Panics if initial state, at least one action, or the environment
        /// is not set, or if any assertion fails.
        #[allow(clippy::panic)] // Test code can panic
        #[allow(clippy::expect_used)] // Test code can use expect
        pub fn run(self) {
            let mut state = self
                .initial_state
                .expect("Initial state must be set with given_state()");

            let env = self
                .environment
                .expect("Environment must be set with with_env()");

            assert!(
                !self.actions.is_empty(),
                "At least one action must be queued with when_action()"
            );

            let mut last_effects = smallvec::SmallVec::new();
            for action in self.actions {
                last_effects = self.reducer.reduce(&mut state, action, &env);
            }

            for assertion in self.state_assertions {
                assertion(&state);
            }

            for assertion in self.effect_assertions {
                assertion(&last_effects);
            }
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use playslip_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Delay effect
    ///
    /// The auto-commit debounce surfaces as a Delay, so session tests lean
    /// on this one.
    ///
    /// # Panics
    ///
    /// Panics if no Delay effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Delay { .. })),
            "Expected at least one Delay effect, but none found"
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}
