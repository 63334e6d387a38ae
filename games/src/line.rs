//! Slots and ticket lines.
//!
//! A [`TicketLine`] is one wagered combination: its slot values, play type,
//! bet amount, add-on flag, and draw count. Wildcard slots are fixed by the
//! play type at construction and count as filled for completeness.

use crate::config::{GameConfig, PlayType};
use playslip_core::Money;
use serde::{Deserialize, Serialize};

/// One position of a line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// Awaiting input
    #[default]
    Empty,
    /// A chosen digit or number
    Filled(u8),
    /// Intentionally not played under the current play type
    Wildcard,
}

impl Slot {
    /// Whether this slot still awaits input
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The chosen value, if one was entered
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            Self::Filled(value) => Some(value),
            _ => None,
        }
    }
}

/// One wagered line of a ticket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLine {
    /// Slot values, in display order
    pub slots: Vec<Slot>,
    /// Matching rule; fixes the wildcard layout
    pub play_type: PlayType,
    /// Wager per draw, from the game's bet menu
    pub bet_amount: Money,
    /// Whether the secondary-prize multiplier add-on is purchased
    pub add_on: bool,
    /// Number of consecutive draws entered, at least 1
    pub draw_count: u32,
}

impl TicketLine {
    /// A fresh line for `config` under `play_type`
    ///
    /// All playable slots start [`Slot::Empty`]; slots the play type does
    /// not play start [`Slot::Wildcard`].
    #[must_use]
    pub fn empty(config: &GameConfig, play_type: PlayType, bet_amount: Money) -> Self {
        let slot_count = config.slot_count();
        let slots = (0..slot_count)
            .map(|index| {
                if play_type.is_wildcard_slot(index, slot_count) {
                    Slot::Wildcard
                } else {
                    Slot::Empty
                }
            })
            .collect();

        Self {
            slots,
            play_type,
            bet_amount,
            add_on: false,
            draw_count: 1,
        }
    }

    /// Whether the line is ready to commit
    ///
    /// True iff no slot awaits input. Wildcard slots count as filled by
    /// construction, so a pair line completes on its two playable slots.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.slots.iter().any(|slot| slot.is_empty())
    }

    /// First slot awaiting input, in display order
    #[must_use]
    pub fn first_open_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_empty())
    }

    /// First slot awaiting input strictly after `index`
    #[must_use]
    pub fn next_open_slot_after(&self, index: usize) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, slot)| slot.is_empty())
            .map(|(position, _)| position)
    }

    /// Values already chosen within `range` of slots
    ///
    /// Used to enforce distinctness within one field of a number game.
    #[must_use]
    pub fn values_in(&self, range: std::ops::Range<usize>) -> Vec<u8> {
        self.slots[range]
            .iter()
            .filter_map(|slot| slot.value())
            .collect()
    }
}
