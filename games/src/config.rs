//! Game catalog and per-family configuration.
//!
//! A [`GameConfig`] is plain data: the selection reducer and pricing engine
//! read it, game pages supply it. The preset constructors at the bottom are
//! the catalog the storefront actually sells.

use playslip_core::Money;
use serde::{Deserialize, Serialize};

/// Identity of a game family in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    /// 3-digit pick game with pair play types
    Pick3,
    /// 4-digit pick game
    Pick4,
    /// Daily numbers game (3 digits, straight/box only)
    DailyNumbers,
    /// 5-of-N draw game with a separate bonus ball
    FiveBall,
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pick3 => write!(f, "pick-3"),
            Self::Pick4 => write!(f, "pick-4"),
            Self::DailyNumbers => write!(f, "daily-numbers"),
            Self::FiveBall => write!(f, "five-ball"),
        }
    }
}

/// The matching rule for a line
///
/// Which play types a game offers is configuration; the wildcard layout each
/// type imposes is intrinsic to the type and lives here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayType {
    /// Exact-order match
    Straight,
    /// Any-order match
    Box,
    /// Split wager: half straight, half box
    StraightBox,
    /// All orderings wagered as separate straight plays
    Combo,
    /// First digits only; the last slot is not played
    FrontPair,
    /// Last digits only; the first slot is not played
    BackPair,
}

impl PlayType {
    /// Whether this is a pair variant (plays a strict subset of the slots)
    #[must_use]
    pub const fn is_pair(self) -> bool {
        matches!(self, Self::FrontPair | Self::BackPair)
    }

    /// Whether `index` is wildcard-locked under this play type
    ///
    /// `FrontPair` locks the last slot, `BackPair` the first; every other
    /// play type plays all slots.
    #[must_use]
    pub const fn is_wildcard_slot(self, index: usize, slot_count: usize) -> bool {
        match self {
            Self::FrontPair => index + 1 == slot_count,
            Self::BackPair => index == 0,
            _ => false,
        }
    }
}

/// Legal values for one field of a game, and its repetition rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueDomain {
    /// Digits 0-9, repeats allowed within a line
    Digits,
    /// Numbers 1..=max, distinct within the field
    Numbers {
        /// Largest selectable number
        max: u8,
    },
}

impl ValueDomain {
    /// Whether `value` is a legal pick in this domain
    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        match self {
            Self::Digits => value <= 9,
            Self::Numbers { max } => value >= 1 && value <= max,
        }
    }

    /// Whether values must be distinct within the field
    #[must_use]
    pub const fn distinct(self) -> bool {
        matches!(self, Self::Numbers { .. })
    }

    /// All legal values, ascending
    pub fn values(self) -> impl Iterator<Item = u8> {
        match self {
            Self::Digits => 0..=9,
            Self::Numbers { max } => 1..=max,
        }
    }
}

/// One run of slots drawing from a single domain
///
/// Digit games have one field; the 5-ball game has a 5-slot main field and a
/// 1-slot bonus field. Distinctness applies per field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    /// Number of slots in this field
    pub slots: usize,
    /// Legal values for these slots
    pub domain: ValueDomain,
}

/// How the add-on price enters a line's price
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOnBasis {
    /// `(bet + add-on) * draws` — the add-on is paid per draw
    PerDraw,
    /// `bet * draws + add-on` — the add-on is a flat per-line charge
    PerLine,
}

/// What quick pick does when every slot is already filled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickPickOnFull {
    /// Clear the line and fill every slot afresh
    Rerandomize,
    /// Leave the line untouched
    LeaveUntouched,
}

/// Complete parameters for one game family
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Catalog identity
    pub game_id: GameId,
    /// Display name
    pub name: &'static str,
    /// Logo asset reference passed through to the cart
    pub logo_ref: &'static str,
    /// Ordered slot fields
    pub fields: Vec<FieldConfig>,
    /// Offered play types; the first is the default for a fresh line
    pub play_types: Vec<PlayType>,
    /// Offered bet amounts; the first is the default
    pub bet_menu: Vec<Money>,
    /// Price of the add-on multiplier
    pub add_on_price: Money,
    /// How the add-on price combines with bet and draw count
    pub add_on_basis: AddOnBasis,
    /// Quick-pick behavior on an already-full line
    pub quick_pick_on_full: QuickPickOnFull,
    /// Largest selectable consecutive-draw count
    pub max_draw_count: u32,
}

impl GameConfig {
    /// Total number of slots across all fields
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.fields.iter().map(|f| f.slots).sum()
    }

    /// The field containing `slot_index`, with the field's slot range
    ///
    /// Returns `None` for an out-of-range index.
    #[must_use]
    pub fn field_of(&self, slot_index: usize) -> Option<(&FieldConfig, std::ops::Range<usize>)> {
        let mut start = 0;
        for field in &self.fields {
            let range = start..start + field.slots;
            if range.contains(&slot_index) {
                return Some((field, range));
            }
            start = range.end;
        }
        None
    }

    /// Default play type for a fresh session
    #[must_use]
    pub fn default_play_type(&self) -> PlayType {
        self.play_types.first().copied().unwrap_or(PlayType::Straight)
    }

    /// Default bet amount for a fresh session
    #[must_use]
    pub fn default_bet(&self) -> Money {
        self.bet_menu.first().copied().unwrap_or(Money::from_dollars(1))
    }

    /// Whether `play_type` is offered by this game
    #[must_use]
    pub fn offers(&self, play_type: PlayType) -> bool {
        self.play_types.contains(&play_type)
    }

    /// 3-digit pick game: all six play types, $0.50/$1 bets, per-draw add-on
    #[must_use]
    pub fn pick3() -> Self {
        Self {
            game_id: GameId::Pick3,
            name: "Pick 3",
            logo_ref: "games/pick3.svg",
            fields: vec![FieldConfig {
                slots: 3,
                domain: ValueDomain::Digits,
            }],
            play_types: vec![
                PlayType::Straight,
                PlayType::Box,
                PlayType::StraightBox,
                PlayType::Combo,
                PlayType::FrontPair,
                PlayType::BackPair,
            ],
            bet_menu: vec![Money::from_cents(50), Money::from_dollars(1)],
            add_on_price: Money::from_dollars(1),
            add_on_basis: AddOnBasis::PerDraw,
            quick_pick_on_full: QuickPickOnFull::Rerandomize,
            max_draw_count: 14,
        }
    }

    /// 4-digit pick game: no pair plays, otherwise like Pick 3
    #[must_use]
    pub fn pick4() -> Self {
        Self {
            game_id: GameId::Pick4,
            name: "Pick 4",
            logo_ref: "games/pick4.svg",
            fields: vec![FieldConfig {
                slots: 4,
                domain: ValueDomain::Digits,
            }],
            play_types: vec![
                PlayType::Straight,
                PlayType::Box,
                PlayType::StraightBox,
                PlayType::Combo,
            ],
            bet_menu: vec![Money::from_cents(50), Money::from_dollars(1)],
            add_on_price: Money::from_dollars(1),
            add_on_basis: AddOnBasis::PerDraw,
            quick_pick_on_full: QuickPickOnFull::Rerandomize,
            max_draw_count: 14,
        }
    }

    /// Daily numbers game: straight/box only, $1/$2 bets
    #[must_use]
    pub fn daily_numbers() -> Self {
        Self {
            game_id: GameId::DailyNumbers,
            name: "Daily Numbers",
            logo_ref: "games/daily-numbers.svg",
            fields: vec![FieldConfig {
                slots: 3,
                domain: ValueDomain::Digits,
            }],
            play_types: vec![PlayType::Straight, PlayType::Box],
            bet_menu: vec![Money::from_dollars(1), Money::from_dollars(2)],
            add_on_price: Money::from_dollars(1),
            add_on_basis: AddOnBasis::PerDraw,
            quick_pick_on_full: QuickPickOnFull::Rerandomize,
            max_draw_count: 7,
        }
    }

    /// 5-of-`max` draw game plus a 1-of-`bonus_max` bonus ball
    ///
    /// Flat $2 line, flat per-line add-on, quick pick leaves a full line
    /// alone.
    #[must_use]
    pub fn five_ball(max: u8, bonus_max: u8) -> Self {
        Self {
            game_id: GameId::FiveBall,
            name: "Five Ball",
            logo_ref: "games/five-ball.svg",
            fields: vec![
                FieldConfig {
                    slots: 5,
                    domain: ValueDomain::Numbers { max },
                },
                FieldConfig {
                    slots: 1,
                    domain: ValueDomain::Numbers { max: bonus_max },
                },
            ],
            play_types: vec![PlayType::Straight],
            bet_menu: vec![Money::from_dollars(2)],
            add_on_price: Money::from_dollars(1),
            add_on_basis: AddOnBasis::PerLine,
            quick_pick_on_full: QuickPickOnFull::LeaveUntouched,
            max_draw_count: 10,
        }
    }
}
