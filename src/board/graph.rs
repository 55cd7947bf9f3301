//! The live board and the read-only graph view the search consumes.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::combat::BlitzResolver;
use crate::core::{Attack, Color, Territory, TerritoryId};
use crate::error::{Error, Result};

use super::continent::Continent;

/// Read-only view of the territory graph.
///
/// The search only reads ids, adjacency and an ownership/troop snapshot
/// through this trait; it never mutates the board.
pub trait TerritoryGraph {
    /// Every territory id, in board order.
    fn territory_ids(&self) -> Vec<TerritoryId>;

    fn neighbors_of(&self, id: TerritoryId) -> Result<&[TerritoryId]>;

    fn owner_of(&self, id: TerritoryId) -> Result<Option<Color>>;

    fn troops_of(&self, id: TerritoryId) -> Result<u32>;
}

/// What happened when an attack was resolved on the live board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Target taken; `moved` troops now occupy it and the source keeps 1.
    Captured { attack: Attack, moved: u32 },
    /// Attack failed; the source keeps 1 troop and the target `defenders`.
    Repelled { attack: Attack, defenders: u32 },
}

impl AttackOutcome {
    #[must_use]
    pub fn captured(&self) -> bool {
        matches!(self, AttackOutcome::Captured { .. })
    }

    #[must_use]
    pub fn attack(&self) -> Attack {
        match *self {
            AttackOutcome::Captured { attack, .. } | AttackOutcome::Repelled { attack, .. } => attack,
        }
    }
}

/// The live board: territories, borders, continents.
#[derive(Clone, Debug)]
pub struct Board {
    territories: Vec<Territory>,
    index: FxHashMap<TerritoryId, usize>,
    continents: Vec<Continent>,
}

impl Board {
    /// Start defining a board.
    #[must_use]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::default()
    }

    /// Look up a territory.
    pub fn get(&self, id: TerritoryId) -> Result<&Territory> {
        self.index
            .get(&id)
            .map(|&i| &self.territories[i])
            .ok_or(Error::TerritoryNotFound(id))
    }

    fn get_mut(&mut self, id: TerritoryId) -> Result<&mut Territory> {
        match self.index.get(&id) {
            Some(&i) => Ok(&mut self.territories[i]),
            None => Err(Error::TerritoryNotFound(id)),
        }
    }

    /// Iterate over territories in board order.
    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    #[must_use]
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Territories owned by `color`, in board order.
    #[must_use]
    pub fn territories_of(&self, color: Color) -> Vec<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.owner == Some(color))
            .map(|t| t.id)
            .collect()
    }

    /// Is every territory owned by someone?
    #[must_use]
    pub fn is_fully_claimed(&self) -> bool {
        self.territories.iter().all(Territory::is_claimed)
    }

    /// Claim an unclaimed territory, placing 1 troop on it. Continent owners
    /// are kept current.
    pub fn claim(&mut self, id: TerritoryId, color: Color) -> Result<()> {
        let territory = self.get_mut(id)?;
        if let Some(owner) = territory.owner {
            return Err(Error::invariant(format!(
                "{} claims {} but it is already owned by {}",
                color, id, owner
            )));
        }
        territory.owner = Some(color);
        territory.troops = 1;
        self.refresh_continents();
        Ok(())
    }

    /// Give a territory to `color` with exactly `troops` troops, replacing
    /// whatever was there.
    pub fn assign(&mut self, id: TerritoryId, color: Color, troops: u32) -> Result<()> {
        if troops == 0 {
            return Err(Error::invariant(format!("{} cannot hold zero troops", id)));
        }
        let territory = self.get_mut(id)?;
        territory.owner = Some(color);
        territory.troops = troops;
        self.refresh_continents();
        Ok(())
    }

    /// Add troops to an owned territory.
    pub fn add_troops(&mut self, id: TerritoryId, troops: u32) -> Result<()> {
        let territory = self.get_mut(id)?;
        if !territory.is_claimed() {
            return Err(Error::invariant(format!("troops added to unclaimed {}", id)));
        }
        territory.troops += troops;
        Ok(())
    }

    /// Neighbors of `id` held by someone other than its owner.
    pub fn attack_options(&self, id: TerritoryId) -> Result<Vec<TerritoryId>> {
        let territory = self.get(id)?;
        let Some(owner) = territory.owner else {
            return Ok(Vec::new());
        };

        let mut options = Vec::new();
        for &neighbor in &territory.neighbors {
            if matches!(self.get(neighbor)?.owner, Some(other) if other != owner) {
                options.push(neighbor);
            }
        }
        Ok(options)
    }

    /// Can `color` launch at least one attack?
    #[must_use]
    pub fn can_attack(&self, color: Color) -> bool {
        self.territories
            .iter()
            .filter(|t| t.owner == Some(color) && t.can_attack_from())
            .any(|t| {
                t.neighbors.iter().any(|&n| {
                    self.get(n)
                        .map(|other| matches!(other.owner, Some(o) if o != color))
                        .unwrap_or(false)
                })
            })
    }

    /// Recompute continent owners from territory ownership.
    pub fn refresh_continents(&mut self) {
        let territories = &self.territories;
        let index = &self.index;
        for continent in &mut self.continents {
            let mut owners = continent
                .members
                .iter()
                .filter_map(|id| index.get(id))
                .map(|&i| territories[i].owner);

            let first = owners.next().flatten();
            match first {
                Some(color) if owners.all(|o| o == Some(color)) => continent.monopolize(color),
                _ => continent.demonopolize(),
            }
        }
    }

    /// Troops `color` receives at the start of a turn: one per three
    /// territories (at least 3) plus the bonus of every continent it
    /// monopolizes.
    #[must_use]
    pub fn troop_income(&self, color: Color) -> u32 {
        let owned = self.territories_of(color).len() as u32;
        let territory_bonus = (owned / 3).max(3);
        let continent_bonus: u32 = self
            .continents
            .iter()
            .filter(|c| c.owner() == Some(color))
            .map(|c| c.bonus)
            .sum();
        territory_bonus + continent_bonus
    }

    /// Resolve an attack on the live board.
    ///
    /// The attack must run along a border between two different owners,
    /// from a territory with more than one troop.
    pub fn resolve_attack<B: BlitzResolver + ?Sized>(
        &mut self,
        attack: Attack,
        blitz: &mut B,
    ) -> Result<AttackOutcome> {
        let source = self.get(attack.from)?;
        let target = self.get(attack.to)?;

        let attacker = source
            .owner
            .ok_or_else(|| Error::invariant(format!("attack from unclaimed {}", attack.from)))?;
        if target.owner == Some(attacker) || target.owner.is_none() {
            return Err(Error::invariant(format!(
                "{} cannot attack {}: not held by an opponent",
                attacker, attack.to
            )));
        }
        if !source.is_adjacent(attack.to) {
            return Err(Error::invariant(format!("{} is not a border", attack)));
        }
        if source.troops < 2 || target.troops == 0 {
            return Err(Error::invariant(format!(
                "{} needs more than one attacker and at least one defender ({} vs {})",
                attack, source.troops, target.troops
            )));
        }

        let result = blitz.resolve(source.troops, target.troops)?;
        if result.attacker != 1 && result.defender != 0 {
            return Err(Error::invariant(format!(
                "blitz stopped early at {} vs {}",
                result.attacker, result.defender
            )));
        }

        let outcome = if result.captured() {
            let moved = result.attacker - 1;
            self.get_mut(attack.from)?.troops = 1;
            let target = self.get_mut(attack.to)?;
            target.owner = Some(attacker);
            target.troops = moved;
            AttackOutcome::Captured { attack, moved }
        } else {
            self.get_mut(attack.from)?.troops = 1;
            self.get_mut(attack.to)?.troops = result.defender;
            AttackOutcome::Repelled {
                attack,
                defenders: result.defender,
            }
        };

        debug!(%attack, %attacker, captured = outcome.captured(), "resolved attack");
        self.refresh_continents();
        Ok(outcome)
    }
}

impl TerritoryGraph for Board {
    fn territory_ids(&self) -> Vec<TerritoryId> {
        self.territories.iter().map(|t| t.id).collect()
    }

    fn neighbors_of(&self, id: TerritoryId) -> Result<&[TerritoryId]> {
        Ok(&self.get(id)?.neighbors)
    }

    fn owner_of(&self, id: TerritoryId) -> Result<Option<Color>> {
        Ok(self.get(id)?.owner)
    }

    fn troops_of(&self, id: TerritoryId) -> Result<u32> {
        Ok(self.get(id)?.troops)
    }
}

/// Builder for a [`Board`].
///
/// Borders are symmetric: `border(a, b)` makes each territory a neighbor
/// of the other.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    territories: Vec<Territory>,
    borders: Vec<(TerritoryId, TerritoryId)>,
    continents: Vec<Continent>,
}

impl BoardBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unclaimed territory.
    #[must_use]
    pub fn territory(mut self, id: u16, name: impl Into<String>) -> Self {
        self.territories.push(Territory::new(TerritoryId::new(id), name));
        self
    }

    /// Connect two territories.
    #[must_use]
    pub fn border(mut self, a: u16, b: u16) -> Self {
        self.borders.push((TerritoryId::new(a), TerritoryId::new(b)));
        self
    }

    /// Group territories into a continent.
    #[must_use]
    pub fn continent(mut self, name: impl Into<String>, bonus: u32, members: &[u16]) -> Self {
        let members = members.iter().copied().map(TerritoryId::new).collect();
        self.continents.push(Continent::new(name, bonus, members));
        self
    }

    /// Validate and build the board.
    pub fn build(self) -> Result<Board> {
        let mut index = FxHashMap::default();
        for (i, territory) in self.territories.iter().enumerate() {
            if index.insert(territory.id, i).is_some() {
                return Err(Error::invariant(format!("duplicate territory {}", territory.id)));
            }
        }

        let mut territories = self.territories;
        for (a, b) in self.borders {
            let ia = *index.get(&a).ok_or(Error::TerritoryNotFound(a))?;
            let ib = *index.get(&b).ok_or(Error::TerritoryNotFound(b))?;
            if ia == ib {
                return Err(Error::invariant(format!("{} cannot border itself", a)));
            }
            if !territories[ia].neighbors.contains(&b) {
                territories[ia].neighbors.push(b);
            }
            if !territories[ib].neighbors.contains(&a) {
                territories[ib].neighbors.push(a);
            }
        }

        for continent in &self.continents {
            if let Some(&missing) = continent.members.iter().find(|id| !index.contains_key(id)) {
                return Err(Error::TerritoryNotFound(missing));
            }
        }

        Ok(Board {
            territories,
            index,
            continents: self.continents,
        })
    }
}
