//! The selection state machine.
//!
//! One [`TicketSession`] per mounted game page: a draft line being edited, a
//! cursor over its slots, and the book of committed lines. Every user input
//! is a [`SessionAction`]; the [`SessionReducer`] applies it and, when a
//! fresh draft becomes complete, schedules the debounced auto-commit.
//!
//! Failure semantics follow the storefront rule: an action whose
//! preconditions do not hold is a silent no-op, never an error. Stray taps
//! must not wedge a ticket.

use crate::config::{GameConfig, PlayType, QuickPickOnFull};
use crate::line::{Slot, TicketLine};
use playslip_core::environment::{RandomSource, SystemRandom};
use playslip_core::{Effect, Money, Reducer, SmallVec, smallvec};
use std::sync::Arc;
use std::time::Duration;

/// Pause between a line completing and its auto-commit, long enough for a
/// final visual confirmation
pub const AUTO_COMMIT_DELAY: Duration = Duration::from_millis(300);

/// What the draft is being edited as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditTarget {
    /// A new line, appended on commit
    #[default]
    NewLine,
    /// A committed line being revised in place
    Existing(usize),
}

/// In-progress builder state for one game page
#[derive(Clone, Debug)]
pub struct TicketSession {
    /// The line currently being edited
    pub draft: TicketLine,
    /// Slot awaiting the next input, if any
    pub active_slot: Option<usize>,
    /// Whether the draft replaces a committed line or appends
    pub editing: EditTarget,
    /// Committed lines; insertion order is display order is line number
    pub lines: Vec<TicketLine>,
    /// Bumped on every draft-shape mutation; a scheduled auto-commit carries
    /// the epoch it saw and is dropped at fire time on a mismatch
    pub draft_epoch: u64,
}

impl TicketSession {
    /// Fresh session for a just-mounted game page
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let draft = TicketLine::empty(config, config.default_play_type(), config.default_bet());
        let active_slot = draft.first_open_slot();
        Self {
            draft,
            active_slot,
            editing: EditTarget::NewLine,
            lines: Vec::new(),
            draft_epoch: 0,
        }
    }

    /// Number of committed lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether a committed line is currently being revised
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.editing, EditTarget::Existing(_))
    }
}

/// Every input the session state machine can receive
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// A value was picked for the active slot
    SelectValue(u8),
    /// The cursor moved to a slot (revisiting a filled slot is allowed)
    SetActiveSlot(usize),
    /// The play type selector changed
    ChangePlayType(PlayType),
    /// The bet selector changed
    ChangeBetAmount(Money),
    /// Fill the remaining open slots randomly
    QuickPick,
    /// Reset the draft's slots
    ClearDraft,
    /// Explicit "add line" press; commits immediately if complete
    CommitLine,
    /// The auto-commit debounce elapsed
    AutoCommitFired {
        /// Epoch the commit was scheduled against
        epoch: u64,
    },
    /// Reopen a committed line into the draft
    StartEdit(usize),
    /// Remove a committed line
    RemoveLine(usize),
    /// Toggle the add-on on a committed line
    ToggleAddOn {
        /// Line index
        index: usize,
        /// New add-on state
        enabled: bool,
    },
    /// Change the draw count on a committed line
    SetDrawCount {
        /// Line index
        index: usize,
        /// New draw count
        count: u32,
    },
    /// Drop every committed line (cart add succeeded, or explicit clear)
    ClearBook,
}

/// Injected dependencies for the session reducer
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Randomness for quick pick
    pub random: Arc<dyn RandomSource>,
}

impl SessionEnvironment {
    /// Environment with the given randomness source
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Production environment
    #[must_use]
    pub fn live() -> Self {
        Self::new(Arc::new(SystemRandom))
    }
}

/// Reducer for one game page's ticket session
///
/// Owns the game configuration; the state stays pure data.
#[derive(Clone, Debug)]
pub struct SessionReducer {
    config: GameConfig,
}

type Effects = SmallVec<[Effect<SessionAction>; 4]>;

fn no_effects() -> Effects {
    smallvec![Effect::None]
}

impl SessionReducer {
    /// Create a reducer for `config`
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// The game configuration this session runs under
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Schedule the debounced auto-commit if the draft just became
    /// committable
    ///
    /// Only fresh lines auto-commit; revisions of an existing line wait for
    /// the explicit action. The scheduled action carries the current epoch,
    /// so any later draft mutation invalidates it.
    fn after_draft_mutation(&self, state: &TicketSession) -> Effects {
        if state.editing == EditTarget::NewLine && state.draft.is_complete() {
            tracing::debug!(epoch = state.draft_epoch, "draft complete, scheduling auto-commit");
            smallvec![Effect::Delay {
                duration: AUTO_COMMIT_DELAY,
                action: Box::new(SessionAction::AutoCommitFired {
                    epoch: state.draft_epoch,
                }),
            }]
        } else {
            no_effects()
        }
    }

    fn select_value(&self, state: &mut TicketSession, value: u8) -> Effects {
        let Some(index) = state.active_slot else {
            return no_effects();
        };
        let Some(slot) = state.draft.slots.get(index).copied() else {
            return no_effects();
        };
        if slot == Slot::Wildcard {
            return no_effects();
        }
        let Some((field, range)) = self.config.field_of(index) else {
            return no_effects();
        };
        if !field.domain.contains(value) {
            return no_effects();
        }
        if field.domain.distinct() {
            let clash = range
                .filter(|&other| other != index)
                .any(|other| state.draft.slots[other].value() == Some(value));
            if clash {
                return no_effects();
            }
        }

        state.draft.slots[index] = Slot::Filled(value);
        state.active_slot = state.draft.next_open_slot_after(index);
        state.draft_epoch += 1;
        self.after_draft_mutation(state)
    }

    fn set_active_slot(&self, state: &mut TicketSession, index: usize) -> Effects {
        let slot_count = self.config.slot_count();
        if index >= slot_count
            || state.draft.play_type.is_wildcard_slot(index, slot_count)
        {
            return no_effects();
        }
        state.active_slot = Some(index);
        no_effects()
    }

    fn change_play_type(&self, state: &mut TicketSession, play_type: PlayType) -> Effects {
        if !self.config.offers(play_type) || play_type == state.draft.play_type {
            return no_effects();
        }

        // Any transition that involves a pair variant moves the wildcard
        // layout, so entered values cannot survive it. Non-pair to non-pair
        // keeps them.
        let relayout = play_type.is_pair() || state.draft.play_type.is_pair();
        state.draft.play_type = play_type;
        if relayout {
            state.draft.slots =
                TicketLine::empty(&self.config, play_type, state.draft.bet_amount).slots;
            state.active_slot = match play_type {
                PlayType::BackPair => Some(1),
                _ => Some(0),
            };
        }
        state.draft_epoch += 1;
        self.after_draft_mutation(state)
    }

    fn change_bet_amount(&self, state: &mut TicketSession, bet: Money) -> Effects {
        if self.config.bet_menu.contains(&bet) {
            // A pending auto-commit stays valid: the bet is not part of the
            // draft's shape.
            state.draft.bet_amount = bet;
        }
        no_effects()
    }

    fn quick_pick(&self, state: &mut TicketSession, env: &SessionEnvironment) -> Effects {
        if state.draft.is_complete() {
            match self.config.quick_pick_on_full {
                QuickPickOnFull::LeaveUntouched => return no_effects(),
                QuickPickOnFull::Rerandomize => {
                    state.draft.slots = TicketLine::empty(
                        &self.config,
                        state.draft.play_type,
                        state.draft.bet_amount,
                    )
                    .slots;
                },
            }
        }

        for index in 0..state.draft.slots.len() {
            if !state.draft.slots[index].is_empty() {
                continue;
            }
            let Some((field, range)) = self.config.field_of(index) else {
                continue;
            };
            let used = if field.domain.distinct() {
                state.draft.values_in(range)
            } else {
                Vec::new()
            };
            let candidates: Vec<u8> = field
                .domain
                .values()
                .filter(|value| !used.contains(value))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            let choice = candidates[env.random.pick_index(candidates.len())];
            state.draft.slots[index] = Slot::Filled(choice);
        }

        state.active_slot = None;
        state.draft_epoch += 1;
        tracing::debug!("quick pick filled draft");
        self.after_draft_mutation(state)
    }

    fn clear_draft(&self, state: &mut TicketSession) -> Effects {
        state.draft.slots =
            TicketLine::empty(&self.config, state.draft.play_type, state.draft.bet_amount).slots;
        state.active_slot = state.draft.first_open_slot();
        state.draft_epoch += 1;
        no_effects()
    }

    /// Move the draft into the book and reset it
    ///
    /// The fresh draft inherits the previous line's play type and bet so
    /// repeat players are not forced to reselect their preferences.
    fn commit_draft(&self, state: &mut TicketSession) {
        match state.editing {
            EditTarget::Existing(index) if index < state.lines.len() => {
                state.lines[index] = state.draft.clone();
            },
            EditTarget::Existing(_) => return,
            EditTarget::NewLine => state.lines.push(state.draft.clone()),
        }

        state.draft =
            TicketLine::empty(&self.config, state.draft.play_type, state.draft.bet_amount);
        state.active_slot = state.draft.first_open_slot();
        state.editing = EditTarget::NewLine;
        state.draft_epoch += 1;
        tracing::debug!(lines = state.lines.len(), "committed line");
    }

    fn auto_commit_fired(&self, state: &mut TicketSession, epoch: u64) -> Effects {
        if epoch == state.draft_epoch
            && state.editing == EditTarget::NewLine
            && state.draft.is_complete()
        {
            self.commit_draft(state);
        } else {
            tracing::trace!(
                scheduled = epoch,
                current = state.draft_epoch,
                "dropping stale auto-commit"
            );
        }
        no_effects()
    }

    fn commit_line(&self, state: &mut TicketSession) -> Effects {
        if state.draft.is_complete() {
            self.commit_draft(state);
        }
        no_effects()
    }

    fn start_edit(&self, state: &mut TicketSession, index: usize) -> Effects {
        let Some(line) = state.lines.get(index) else {
            return no_effects();
        };
        state.draft = line.clone();
        state.editing = EditTarget::Existing(index);
        // An edited line is complete by definition; nothing awaits input.
        state.active_slot = None;
        state.draft_epoch += 1;
        no_effects()
    }

    /// Reset the draft to a fresh line after an edit session ends abruptly
    fn cancel_edit(&self, state: &mut TicketSession) {
        state.draft =
            TicketLine::empty(&self.config, state.draft.play_type, state.draft.bet_amount);
        state.active_slot = state.draft.first_open_slot();
        state.editing = EditTarget::NewLine;
        state.draft_epoch += 1;
    }

    fn remove_line(&self, state: &mut TicketSession, index: usize) -> Effects {
        if index >= state.lines.len() {
            return no_effects();
        }
        state.lines.remove(index);

        match state.editing {
            // Editing a line that no longer exists must never silently
            // continue.
            EditTarget::Existing(editing) if editing == index => self.cancel_edit(state),
            // Keep the edit target pointing at the same line after the
            // shift.
            EditTarget::Existing(editing) if editing > index => {
                state.editing = EditTarget::Existing(editing - 1);
            },
            _ => {},
        }
        no_effects()
    }

    fn toggle_add_on(&self, state: &mut TicketSession, index: usize, enabled: bool) -> Effects {
        if let Some(line) = state.lines.get_mut(index) {
            line.add_on = enabled;
        }
        no_effects()
    }

    fn set_draw_count(&self, state: &mut TicketSession, index: usize, count: u32) -> Effects {
        if count == 0 || count > self.config.max_draw_count {
            return no_effects();
        }
        if let Some(line) = state.lines.get_mut(index) {
            line.draw_count = count;
        }
        no_effects()
    }

    fn clear_book(&self, state: &mut TicketSession) -> Effects {
        state.lines.clear();
        if state.is_editing() {
            self.cancel_edit(state);
        }
        no_effects()
    }
}

impl Reducer for SessionReducer {
    type State = TicketSession;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::SelectValue(value) => self.select_value(state, value),
            SessionAction::SetActiveSlot(index) => self.set_active_slot(state, index),
            SessionAction::ChangePlayType(play_type) => self.change_play_type(state, play_type),
            SessionAction::ChangeBetAmount(bet) => self.change_bet_amount(state, bet),
            SessionAction::QuickPick => self.quick_pick(state, env),
            SessionAction::ClearDraft => self.clear_draft(state),
            SessionAction::CommitLine => self.commit_line(state),
            SessionAction::AutoCommitFired { epoch } => self.auto_commit_fired(state, epoch),
            SessionAction::StartEdit(index) => self.start_edit(state, index),
            SessionAction::RemoveLine(index) => self.remove_line(state, index),
            SessionAction::ToggleAddOn { index, enabled } => {
                self.toggle_add_on(state, index, enabled)
            },
            SessionAction::SetDrawCount { index, count } => {
                self.set_draw_count(state, index, count)
            },
            SessionAction::ClearBook => self.clear_book(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use playslip_core::Money;
    use playslip_testing::{ReducerTest, StepRandom, assertions};

    fn test_env() -> SessionEnvironment {
        SessionEnvironment::new(Arc::new(StepRandom::zeros()))
    }

    fn env_with_script(script: Vec<usize>) -> SessionEnvironment {
        SessionEnvironment::new(Arc::new(StepRandom::new(script)))
    }

    fn pick3_session() -> (SessionReducer, TicketSession) {
        let config = GameConfig::pick3();
        let session = TicketSession::new(&config);
        (SessionReducer::new(config), session)
    }

    #[test]
    fn select_fills_and_advances_cursor() {
        let (reducer, session) = pick3_session();

        ReducerTest::new(reducer)
            .with_env(test_env())
            .given_state(session)
            .when_action(SessionAction::SelectValue(4))
            .then_state(|s| {
                assert_eq!(s.draft.slots[0], Slot::Filled(4));
                assert_eq!(s.active_slot, Some(1));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn select_without_active_slot_is_a_no_op() {
        let (reducer, mut session) = pick3_session();
        session.active_slot = None;

        ReducerTest::new(reducer)
            .with_env(test_env())
            .given_state(session)
            .when_action(SessionAction::SelectValue(4))
            .then_state(|s| {
                assert_eq!(s.draft.slots[0], Slot::Empty);
                assert_eq!(s.draft_epoch, 0);
            })
            .run();
    }

    #[test]
    fn out_of_domain_value_is_ignored() {
        let (reducer, session) = pick3_session();

        ReducerTest::new(reducer)
            .with_env(test_env())
            .given_state(session)
            .when_action(SessionAction::SelectValue(10))
            .then_state(|s| {
                assert_eq!(s.draft.slots[0], Slot::Empty);
                assert_eq!(s.active_slot, Some(0));
            })
            .run();
    }

    #[test]
    fn completing_a_line_schedules_the_debounced_commit() {
        let (reducer, session) = pick3_session();

        ReducerTest::new(reducer)
            .with_env(test_env())
            .given_state(session)
            .when_action(SessionAction::SelectValue(4))
            .when_action(SessionAction::SelectValue(7))
            .when_action(SessionAction::SelectValue(2))
            .then_state(|s| {
                assert!(s.draft.is_complete());
                assert_eq!(s.active_slot, None);
                assert_eq!(s.lines.len(), 0);
            })
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn auto_commit_fires_only_for_matching_epoch() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        let epoch = session.draft_epoch;

        // A stale timer (scheduled before a later revision) is dropped.
        reducer.reduce(
            &mut session,
            SessionAction::AutoCommitFired { epoch: epoch - 1 },
            &env,
        );
        assert_eq!(session.lines.len(), 0);

        reducer.reduce(&mut session, SessionAction::AutoCommitFired { epoch }, &env);
        assert_eq!(session.lines.len(), 1);
        assert!(session.draft.first_open_slot().is_some());
    }

    #[test]
    fn revising_a_slot_cancels_the_pending_commit() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        let scheduled_epoch = session.draft_epoch;

        // User revisits slot 1 and changes it before the delay elapses.
        reducer.reduce(&mut session, SessionAction::SetActiveSlot(1), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(9), &env);

        reducer.reduce(
            &mut session,
            SessionAction::AutoCommitFired {
                epoch: scheduled_epoch,
            },
            &env,
        );
        assert_eq!(session.lines.len(), 0, "stale commit must not fire");

        // The revision itself rescheduled; the new epoch commits.
        let epoch = session.draft_epoch;
        reducer.reduce(&mut session, SessionAction::AutoCommitFired { epoch }, &env);
        assert_eq!(session.lines.len(), 1);
        assert_eq!(session.lines[0].slots[1], Slot::Filled(9));
    }

    #[test]
    fn manual_commit_requires_completeness() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        reducer.reduce(&mut session, SessionAction::SelectValue(4), &env);
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        assert_eq!(session.lines.len(), 0);

        reducer.reduce(&mut session, SessionAction::SelectValue(7), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(2), &env);
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        assert_eq!(session.lines.len(), 1);
    }

    #[test]
    fn committed_draft_inherits_play_type_and_bet() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        reducer.reduce(
            &mut session,
            SessionAction::ChangeBetAmount(Money::from_dollars(1)),
            &env,
        );
        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);

        assert_eq!(session.draft.bet_amount, Money::from_dollars(1));
        assert_eq!(session.draft.play_type, PlayType::Straight);
        assert!(session.draft.first_open_slot().is_some());
        assert_eq!(session.editing, EditTarget::NewLine);
    }

    #[test]
    fn back_pair_locks_slot_zero_and_completes_on_two() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        reducer.reduce(
            &mut session,
            SessionAction::ChangePlayType(PlayType::BackPair),
            &env,
        );
        assert_eq!(session.draft.slots[0], Slot::Wildcard);
        assert_eq!(session.active_slot, Some(1));

        reducer.reduce(&mut session, SessionAction::SelectValue(5), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(3), &env);

        assert!(session.draft.is_complete());
        assert_eq!(session.draft.slots[0], Slot::Wildcard);
    }

    #[test]
    fn pair_transitions_reset_slots_but_non_pair_switches_preserve() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        reducer.reduce(&mut session, SessionAction::SelectValue(4), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(7), &env);

        // Straight -> Box keeps entered digits.
        reducer.reduce(
            &mut session,
            SessionAction::ChangePlayType(PlayType::Box),
            &env,
        );
        assert_eq!(session.draft.slots[0], Slot::Filled(4));
        assert_eq!(session.draft.slots[1], Slot::Filled(7));

        // Box -> FrontPair clears them and applies the new layout.
        reducer.reduce(
            &mut session,
            SessionAction::ChangePlayType(PlayType::FrontPair),
            &env,
        );
        assert_eq!(
            session.draft.slots,
            vec![Slot::Empty, Slot::Empty, Slot::Wildcard]
        );
        assert_eq!(session.active_slot, Some(0));

        // FrontPair -> Straight clears again.
        reducer.reduce(
            &mut session,
            SessionAction::ChangePlayType(PlayType::Straight),
            &env,
        );
        assert_eq!(session.draft.slots, vec![Slot::Empty; 3]);
        assert_eq!(session.active_slot, Some(0));
    }

    #[test]
    fn unoffered_play_type_is_ignored() {
        let config = GameConfig::daily_numbers();
        let session = TicketSession::new(&config);
        let reducer = SessionReducer::new(config);

        ReducerTest::new(reducer)
            .with_env(test_env())
            .given_state(session)
            .when_action(SessionAction::ChangePlayType(PlayType::Combo))
            .then_state(|s| assert_eq!(s.draft.play_type, PlayType::Straight))
            .run();
    }

    #[test]
    fn quick_pick_fills_only_open_slots() {
        let (reducer, mut session) = pick3_session();
        let env = env_with_script(vec![3, 8]);

        reducer.reduce(&mut session, SessionAction::SelectValue(4), &env);
        reducer.reduce(&mut session, SessionAction::QuickPick, &env);

        assert_eq!(session.draft.slots[0], Slot::Filled(4));
        assert_eq!(session.draft.slots[1], Slot::Filled(3));
        assert_eq!(session.draft.slots[2], Slot::Filled(8));
        assert_eq!(session.active_slot, None);
    }

    #[test]
    fn quick_pick_on_full_rerandomizes_digit_games() {
        let (reducer, mut session) = pick3_session();
        let env = env_with_script(vec![0, 0, 0, 9, 9, 9]);

        reducer.reduce(&mut session, SessionAction::QuickPick, &env);
        assert_eq!(session.draft.slots, vec![Slot::Filled(0); 3]);

        // Full line + Rerandomize policy: cleared and refilled.
        reducer.reduce(&mut session, SessionAction::QuickPick, &env);
        assert_eq!(session.draft.slots, vec![Slot::Filled(9); 3]);
    }

    #[test]
    fn quick_pick_on_full_leaves_five_ball_untouched() {
        let config = GameConfig::five_ball(69, 26);
        let mut session = TicketSession::new(&config);
        let reducer = SessionReducer::new(config);
        let env = test_env();

        reducer.reduce(&mut session, SessionAction::QuickPick, &env);
        let filled = session.draft.slots.clone();
        let epoch = session.draft_epoch;

        reducer.reduce(&mut session, SessionAction::QuickPick, &env);
        assert_eq!(session.draft.slots, filled);
        assert_eq!(session.draft_epoch, epoch);
    }

    #[test]
    fn quick_pick_keeps_numbers_distinct_within_a_field() {
        let config = GameConfig::five_ball(69, 26);
        let mut session = TicketSession::new(&config);
        let reducer = SessionReducer::new(config);
        // Always draw index 0: without the exclusion this would pick 1 five
        // times over.
        let env = test_env();

        reducer.reduce(&mut session, SessionAction::QuickPick, &env);

        assert_eq!(
            session.draft.values_in(0..5),
            vec![1, 2, 3, 4, 5],
            "main field must exclude already-chosen numbers"
        );
        // The bonus field is its own distinctness scope.
        assert_eq!(session.draft.values_in(5..6), vec![1]);
    }

    #[test]
    fn distinct_field_rejects_duplicate_manual_pick() {
        let config = GameConfig::five_ball(69, 26);
        let mut session = TicketSession::new(&config);
        let reducer = SessionReducer::new(config);
        let env = test_env();

        reducer.reduce(&mut session, SessionAction::SelectValue(7), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(7), &env);

        assert_eq!(session.draft.slots[1], Slot::Empty, "duplicate must be refused");
        assert_eq!(session.active_slot, Some(1));

        // The same number is fine in the bonus field.
        reducer.reduce(&mut session, SessionAction::SetActiveSlot(5), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(7), &env);
        assert_eq!(session.draft.slots[5], Slot::Filled(7));
    }

    #[test]
    fn clear_draft_respects_wildcard_layout() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        reducer.reduce(
            &mut session,
            SessionAction::ChangePlayType(PlayType::FrontPair),
            &env,
        );
        reducer.reduce(&mut session, SessionAction::SelectValue(5), &env);
        reducer.reduce(&mut session, SessionAction::ClearDraft, &env);

        assert_eq!(
            session.draft.slots,
            vec![Slot::Empty, Slot::Empty, Slot::Wildcard]
        );
        assert_eq!(session.active_slot, Some(0));
    }

    #[test]
    fn commit_while_editing_replaces_in_place() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for line in 0..4 {
            for digit in [line, line, line] {
                reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
            }
            reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        }
        assert_eq!(session.lines.len(), 4);

        reducer.reduce(&mut session, SessionAction::StartEdit(2), &env);
        assert_eq!(session.editing, EditTarget::Existing(2));
        assert_eq!(session.active_slot, None);

        reducer.reduce(&mut session, SessionAction::SetActiveSlot(0), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(9), &env);
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);

        assert_eq!(session.lines.len(), 4, "replace must not change length");
        assert_eq!(session.lines[2].slots[0], Slot::Filled(9));
        assert_eq!(session.lines[3].slots[0], Slot::Filled(3));
        assert_eq!(session.editing, EditTarget::NewLine);
    }

    #[test]
    fn editing_never_schedules_auto_commit() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [1, 2, 3] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        reducer.reduce(&mut session, SessionAction::StartEdit(0), &env);
        reducer.reduce(&mut session, SessionAction::SetActiveSlot(0), &env);

        let effects = reducer.reduce(&mut session, SessionAction::SelectValue(8), &env);
        assertions::assert_no_effects(&effects);
        assert!(session.draft.is_complete());
        assert_eq!(session.lines.len(), 1, "edit must wait for explicit commit");
    }

    #[test]
    fn removing_the_edited_line_cancels_the_edit() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for line in 0..3 {
            for digit in [line, line, line] {
                reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
            }
            reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        }

        reducer.reduce(&mut session, SessionAction::StartEdit(2), &env);
        reducer.reduce(&mut session, SessionAction::RemoveLine(2), &env);

        assert_eq!(session.lines.len(), 2);
        assert_eq!(session.editing, EditTarget::NewLine);
        assert!(session.draft.first_open_slot().is_some(), "draft must be empty");
        assert_eq!(session.active_slot, Some(0));
    }

    #[test]
    fn removing_below_the_edited_line_shifts_the_target() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for line in 0..3 {
            for digit in [line, line, line] {
                reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
            }
            reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        }

        reducer.reduce(&mut session, SessionAction::StartEdit(2), &env);
        reducer.reduce(&mut session, SessionAction::RemoveLine(0), &env);
        assert_eq!(session.editing, EditTarget::Existing(1));

        reducer.reduce(&mut session, SessionAction::SetActiveSlot(0), &env);
        reducer.reduce(&mut session, SessionAction::SelectValue(9), &env);
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        assert_eq!(session.lines[1].slots[0], Slot::Filled(9));
    }

    #[test]
    fn line_option_toggles_update_in_place() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);

        reducer.reduce(
            &mut session,
            SessionAction::ToggleAddOn {
                index: 0,
                enabled: true,
            },
            &env,
        );
        reducer.reduce(
            &mut session,
            SessionAction::SetDrawCount { index: 0, count: 7 },
            &env,
        );
        assert!(session.lines[0].add_on);
        assert_eq!(session.lines[0].draw_count, 7);

        // Out-of-range draw counts are refused.
        reducer.reduce(
            &mut session,
            SessionAction::SetDrawCount {
                index: 0,
                count: 15,
            },
            &env,
        );
        reducer.reduce(
            &mut session,
            SessionAction::SetDrawCount { index: 0, count: 0 },
            &env,
        );
        assert_eq!(session.lines[0].draw_count, 7);
    }

    #[test]
    fn clear_book_drops_lines_and_cancels_edits() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        reducer.reduce(&mut session, SessionAction::CommitLine, &env);
        reducer.reduce(&mut session, SessionAction::StartEdit(0), &env);

        reducer.reduce(&mut session, SessionAction::ClearBook, &env);
        assert_eq!(session.lines.len(), 0);
        assert_eq!(session.editing, EditTarget::NewLine);
        assert!(!session.draft.is_complete());
    }

    #[test]
    fn bet_change_keeps_a_pending_commit_valid() {
        let (reducer, mut session) = pick3_session();
        let env = test_env();

        for digit in [4, 7, 2] {
            reducer.reduce(&mut session, SessionAction::SelectValue(digit), &env);
        }
        let epoch = session.draft_epoch;

        reducer.reduce(
            &mut session,
            SessionAction::ChangeBetAmount(Money::from_dollars(1)),
            &env,
        );
        assert_eq!(session.draft_epoch, epoch, "bet is not part of the draft shape");

        reducer.reduce(&mut session, SessionAction::AutoCommitFired { epoch }, &env);
        assert_eq!(session.lines.len(), 1);
        assert_eq!(session.lines[0].bet_amount, Money::from_dollars(1));
    }
}
