//! Boundary shapes handed to the cart collaborator.
//!
//! The cart owns these after the handoff; nothing here refers back into
//! session state. Field names follow the collaborator's camelCase contract,
//! including `drawCount` traveling as a string.

use playslip_games::config::GameConfig;
use playslip_games::line::TicketLine;
use playslip_games::pricing;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a signed-in user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `UserId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier the cart collaborator assigns to an accepted item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(Uuid);

impl CartId {
    /// Creates a new random `CartId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `CartId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One committed line, snapshotted for the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Chosen values of the main field, in slot order
    pub numbers: Vec<u8>,
    /// Bonus-field value for two-field games, `null` otherwise
    pub wildcard_number: Option<u8>,
    /// Whether the add-on multiplier was purchased
    pub add_on_enabled: bool,
    /// Draw count; the collaborator contract carries it as a string
    pub draw_count: String,
}

impl CartLine {
    /// Snapshot one committed line
    ///
    /// Digit games flatten every chosen value into `numbers` (wildcard slots
    /// of pair plays are skipped). Two-field games put the main field into
    /// `numbers` and the bonus ball into `wildcard_number`.
    #[must_use]
    pub fn from_line(config: &GameConfig, line: &TicketLine) -> Self {
        let main_slots = config.fields.first().map_or(0, |field| field.slots);
        let (numbers, wildcard_number) = if config.fields.len() > 1 {
            (
                line.values_in(0..main_slots),
                line.values_in(main_slots..line.slots.len()).first().copied(),
            )
        } else {
            (line.values_in(0..line.slots.len()), None)
        };

        Self {
            numbers,
            wildcard_number,
            add_on_enabled: line.add_on,
            draw_count: line.draw_count.to_string(),
        }
    }
}

/// A committed book plus its total, handed to the cart collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog identity of the game
    pub game_id: String,
    /// Display name of the game
    pub game_name: String,
    /// Logo asset reference for the cart row
    pub logo_ref: String,
    /// Total price, formatted as currency (never a raw float)
    pub total_price: String,
    /// Number of lines in the snapshot
    pub line_count: usize,
    /// The snapshotted lines
    pub lines: Vec<CartLine>,
}

impl CartItem {
    /// Snapshot a committed book for the cart
    #[must_use]
    pub fn from_book(config: &GameConfig, lines: &[TicketLine]) -> Self {
        Self {
            game_id: config.game_id.to_string(),
            game_name: config.name.to_string(),
            logo_ref: config.logo_ref.to_string(),
            total_price: pricing::total_price(lines, config).to_string(),
            line_count: lines.len(),
            lines: lines
                .iter()
                .map(|line| CartLine::from_line(config, line))
                .collect(),
        }
    }
}
