//! Player identity and troop reserves.
//!
//! ## Color
//!
//! Players are identified by color. The search treats a color as an opaque
//! comparable key; nothing else about a player reaches the game tree.
//!
//! ## Player
//!
//! A color plus the pool of troops that have not been placed on the board
//! yet. Owned territories are read from the board, not duplicated here.

use serde::{Deserialize, Serialize};

/// Player color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Black,
}

impl Color {
    /// Every color, in seating order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Black,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A player: color and undeployed troop reserve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    reserve: u32,
}

impl Player {
    /// Create a player holding `reserve` undeployed troops.
    #[must_use]
    pub fn new(color: Color, reserve: u32) -> Self {
        Self { color, reserve }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Troops not yet placed on the board.
    #[must_use]
    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn add_troops(&mut self, troops: u32) {
        self.reserve += troops;
    }

    /// Take up to `troops` from the reserve, returning how many were taken.
    pub fn take_troops(&mut self, troops: u32) -> u32 {
        let taken = troops.min(self.reserve);
        self.reserve -= taken;
        taken
    }

    #[must_use]
    pub fn has_reserve(&self) -> bool {
        self.reserve > 0
    }
}
