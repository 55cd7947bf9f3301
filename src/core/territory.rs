//! Territories: the atomic ownership unit of the board.
//!
//! A territory has a stable id, a display name, an owner (or none while
//! unclaimed), a troop count and a fixed adjacency list. Adjacency is set
//! when the board is defined and never changes afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Color;

/// Stable territory identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// An attack along one border: `from` attacks `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attack {
    pub from: TerritoryId,
    pub to: TerritoryId,
}

impl Attack {
    #[must_use]
    pub const fn new(from: TerritoryId, to: TerritoryId) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Attack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A territory on the live board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,

    pub name: String,

    /// `None` while unclaimed.
    pub owner: Option<Color>,

    /// Troops stationed here. Always 0 while unclaimed, at least 1 once owned.
    pub troops: u32,

    /// Adjacent territories.
    /// Real maps rarely exceed six borders per territory.
    pub neighbors: SmallVec<[TerritoryId; 6]>,
}

impl Territory {
    /// Create an unclaimed territory with no borders.
    pub fn new(id: TerritoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            troops: 0,
            neighbors: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    #[must_use]
    pub fn is_adjacent(&self, other: TerritoryId) -> bool {
        self.neighbors.contains(&other)
    }

    /// A territory can launch an attack when it holds more than one troop.
    #[must_use]
    pub fn can_attack_from(&self) -> bool {
        self.is_claimed() && self.troops > 1
    }
}

impl std::fmt::Display for Territory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{} {} ({}, {})", self.id, self.name, owner, self.troops),
            None => write!(f, "{} {} (unclaimed)", self.id, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_territory_id() {
        let id = TerritoryId::new(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(id.to_string(), "T12");
        assert!(TerritoryId::new(3) < TerritoryId::new(4));
    }

    #[test]
    fn test_attack_display() {
        let attack = Attack::new(TerritoryId::new(2), TerritoryId::new(5));
        assert_eq!(attack.to_string(), "T2 -> T5");
    }

    #[test]
    fn test_new_territory_is_unclaimed() {
        let territory = Territory::new(TerritoryId::new(0), "Alaska");

        assert!(!territory.is_claimed());
        assert_eq!(territory.troops, 0);
        assert!(!territory.can_attack_from());
        assert_eq!(territory.to_string(), "T0 Alaska (unclaimed)");
    }

    #[test]
    fn test_can_attack_from() {
        let mut territory = Territory::new(TerritoryId::new(1), "Ontario");
        territory.owner = Some(Color::Red);
        territory.troops = 1;
        assert!(!territory.can_attack_from());

        territory.troops = 2;
        assert!(territory.can_attack_from());
        assert_eq!(territory.to_string(), "T1 Ontario (red, 2)");
    }
}
