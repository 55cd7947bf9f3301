//! Hypothetical board positions: the nodes of the search tree.
//!
//! A `GameState` splits the board between the player whose attacks it
//! represents (the mover) and the other party. Each capture produces a
//! child in which the roles swap, one territory changes sides, and two
//! troop counts are adjusted. The troop maps are persistent (`im::OrdMap`),
//! so children share structure with their parent.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::TerritoryGraph;
use crate::core::{Attack, Color, TerritoryId};
use crate::error::{Error, Result};

/// Territory → troop count for one side of a position.
pub type TroopMap = OrdMap<TerritoryId, u32>;

/// Index into the [`StateTree`](super::StateTree) node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One node of the hypothetical-move tree.
///
/// Immutable once built, apart from its heuristic (set when its subtree
/// has been searched) and its children (appended during its expansion).
#[derive(Clone, Debug)]
pub struct GameState {
    mover: Color,
    opponent: Color,

    /// Edge that produced this node. `None` at the root.
    attack: Option<Attack>,

    /// Probability of reaching this node along its path. 1 at the root.
    likelihood: f64,

    mover_territories: TroopMap,
    opponent_territories: TroopMap,

    /// Depth below the root.
    depth: u16,

    heuristic: Option<f64>,

    /// Children in expansion order.
    children: SmallVec<[NodeId; 8]>,
}

impl GameState {
    /// Build a root position.
    ///
    /// Fails with [`Error::InvariantViolation`] if the two sides share a
    /// color or a territory, or if any territory holds zero troops.
    pub fn root(
        mover: Color,
        opponent: Color,
        mover_territories: TroopMap,
        opponent_territories: TroopMap,
    ) -> Result<Self> {
        if mover == opponent {
            return Err(Error::invariant(format!("{} cannot attack itself", mover)));
        }
        if let Some((id, _)) = mover_territories.iter().chain(opponent_territories.iter()).find(|(_, &t)| t == 0) {
            return Err(Error::invariant(format!("{} holds zero troops", id)));
        }
        if let Some(id) = mover_territories.keys().find(|&id| opponent_territories.contains_key(id)) {
            return Err(Error::invariant(format!("{} is owned by both {} and {}", id, mover, opponent)));
        }

        Ok(Self {
            mover,
            opponent,
            attack: None,
            likelihood: 1.0,
            mover_territories,
            opponent_territories,
            depth: 0,
            heuristic: None,
            children: SmallVec::new(),
        })
    }

    /// Snapshot a live board into a root position.
    ///
    /// Every territory must be owned by `mover` or `opponent`.
    pub fn from_graph<G: TerritoryGraph + ?Sized>(graph: &G, mover: Color, opponent: Color) -> Result<Self> {
        let mut mine = TroopMap::new();
        let mut theirs = TroopMap::new();

        for id in graph.territory_ids() {
            let troops = graph.troops_of(id)?;
            match graph.owner_of(id)? {
                Some(owner) if owner == mover => {
                    mine.insert(id, troops);
                }
                Some(owner) if owner == opponent => {
                    theirs.insert(id, troops);
                }
                Some(owner) => {
                    return Err(Error::invariant(format!(
                        "{} belongs to {}, outside the {}/{} search",
                        id, owner, mover, opponent
                    )))
                }
                None => return Err(Error::invariant(format!("{} is unclaimed", id))),
            }
        }

        Self::root(mover, opponent, mine, theirs)
    }

    /// The position after the mover captures `attack.to` from `attack.from`
    /// with probability `probability`.
    ///
    /// Roles swap in the child. The source keeps 1 troop and the captured
    /// territory receives the rest of the attacking army.
    pub fn capture(&self, attack: Attack, probability: f64) -> Result<GameState> {
        let attacking = *self
            .mover_territories
            .get(&attack.from)
            .ok_or_else(|| Error::invariant(format!("{} does not own {}", self.mover, attack.from)))?;
        if !self.opponent_territories.contains_key(&attack.to) {
            return Err(Error::invariant(format!("{} does not own {}", self.opponent, attack.to)));
        }
        if attacking < 2 {
            return Err(Error::invariant(format!("{} attacks with a single troop", attack)));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::invariant(format!("capture probability {} out of range", probability)));
        }

        let mut next_mover = self.opponent_territories.clone();
        next_mover.remove(&attack.to);

        let mut next_opponent = self.mover_territories.clone();
        next_opponent.insert(attack.from, 1);
        next_opponent.insert(attack.to, attacking - 1);

        Ok(GameState {
            mover: self.opponent,
            opponent: self.mover,
            attack: Some(attack),
            likelihood: probability * self.likelihood,
            mover_territories: next_mover,
            opponent_territories: next_opponent,
            depth: self.depth + 1,
            heuristic: None,
            children: SmallVec::new(),
        })
    }

    #[must_use]
    pub fn mover(&self) -> Color {
        self.mover
    }

    #[must_use]
    pub fn opponent(&self) -> Color {
        self.opponent
    }

    #[must_use]
    pub fn attack(&self) -> Option<Attack> {
        self.attack
    }

    #[must_use]
    pub fn likelihood(&self) -> f64 {
        self.likelihood
    }

    #[must_use]
    pub fn mover_territories(&self) -> &TroopMap {
        &self.mover_territories
    }

    #[must_use]
    pub fn opponent_territories(&self) -> &TroopMap {
        &self.opponent_territories
    }

    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Backed-up minimax value, once searched.
    #[must_use]
    pub fn heuristic(&self) -> Option<f64> {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, value: f64) {
        self.heuristic = Some(value);
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Troops on `id`, whichever side holds it.
    pub fn troops_of(&self, id: TerritoryId) -> Result<u32> {
        self.mover_territories
            .get(&id)
            .or_else(|| self.opponent_territories.get(&id))
            .copied()
            .ok_or(Error::TerritoryNotFound(id))
    }

    /// Who holds `id` in this position.
    #[must_use]
    pub fn owner_of(&self, id: TerritoryId) -> Option<Color> {
        if self.mover_territories.contains_key(&id) {
            Some(self.mover)
        } else if self.opponent_territories.contains_key(&id) {
            Some(self.opponent)
        } else {
            None
        }
    }

    /// One side holds the whole board.
    #[must_use]
    pub fn is_conquered(&self) -> bool {
        self.mover_territories.is_empty() || self.opponent_territories.is_empty()
    }

    /// Total troops across the mover's territories.
    #[must_use]
    pub fn mover_troops(&self) -> u32 {
        self.mover_territories.values().sum()
    }

    /// Every territory id in the position.
    pub fn territory_ids(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.mover_territories
            .keys()
            .chain(self.opponent_territories.keys())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;

    fn id(raw: u16) -> TerritoryId {
        TerritoryId::new(raw)
    }

    fn troops(entries: &[(u16, u32)]) -> TroopMap {
        entries.iter().map(|&(i, t)| (id(i), t)).collect()
    }

    #[test]
    fn test_node_id() {
        let node = NodeId::new(5);
        assert_eq!(node.raw(), 5);
        assert_eq!(node.to_string(), "NodeId(5)");
    }

    #[test]
    fn test_root_validation() {
        let ok = GameState::root(Color::Red, Color::Blue, troops(&[(0, 3)]), troops(&[(1, 2)])).unwrap();
        assert_eq!(ok.likelihood(), 1.0);
        assert_eq!(ok.depth(), 0);
        assert!(ok.attack().is_none());
        assert!(ok.heuristic().is_none());

        let same_color = GameState::root(Color::Red, Color::Red, troops(&[(0, 3)]), troops(&[(1, 2)]));
        assert!(matches!(same_color, Err(Error::InvariantViolation { .. })));

        let overlap = GameState::root(Color::Red, Color::Blue, troops(&[(0, 3)]), troops(&[(0, 2)]));
        assert!(matches!(overlap, Err(Error::InvariantViolation { .. })));

        let empty = GameState::root(Color::Red, Color::Blue, troops(&[(0, 0)]), troops(&[(1, 2)]));
        assert!(matches!(empty, Err(Error::InvariantViolation { .. })));
    }

    #[test]
    fn test_capture_moves_one_territory_and_swaps_roles() {
        let root = GameState::root(
            Color::Red,
            Color::Blue,
            troops(&[(0, 7), (2, 1)]),
            troops(&[(1, 3), (3, 4)]),
        )
        .unwrap();

        let child = root.capture(Attack::new(id(0), id(1)), 0.8).unwrap();

        assert_eq!(child.mover(), Color::Blue);
        assert_eq!(child.opponent(), Color::Red);
        assert_eq!(child.attack(), Some(Attack::new(id(0), id(1))));
        assert_eq!(child.likelihood(), 0.8);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.mover_territories(), &troops(&[(3, 4)]));
        assert_eq!(child.opponent_territories(), &troops(&[(0, 1), (1, 6), (2, 1)]));

        // Parent untouched.
        assert_eq!(root.troops_of(id(0)).unwrap(), 7);
        assert_eq!(root.owner_of(id(1)), Some(Color::Blue));
        assert_eq!(child.owner_of(id(1)), Some(Color::Red));
    }

    #[test]
    fn test_capture_rejects_inconsistent_attacks() {
        let root = GameState::root(Color::Red, Color::Blue, troops(&[(0, 1), (2, 5)]), troops(&[(1, 3)])).unwrap();

        assert!(root.capture(Attack::new(id(0), id(1)), 0.9).is_err());
        assert!(root.capture(Attack::new(id(1), id(2)), 0.9).is_err());
        assert!(root.capture(Attack::new(id(2), id(0)), 0.9).is_err());
        assert!(root.capture(Attack::new(id(2), id(1)), 1.5).is_err());
        assert!(root.capture(Attack::new(id(2), id(1)), 0.95).is_ok());
    }

    #[test]
    fn test_from_graph() {
        let mut board = maps::line(3).unwrap();
        board.assign(id(0), Color::Red, 4).unwrap();
        board.assign(id(1), Color::Blue, 2).unwrap();
        board.assign(id(2), Color::Red, 1).unwrap();

        let root = GameState::from_graph(&board, Color::Red, Color::Blue).unwrap();
        assert_eq!(root.mover_territories(), &troops(&[(0, 4), (2, 1)]));
        assert_eq!(root.opponent_territories(), &troops(&[(1, 2)]));
        assert_eq!(root.mover_troops(), 5);
        assert_eq!(root.territory_ids().count(), 3);
        assert_eq!(root.troops_of(id(9)), Err(Error::TerritoryNotFound(id(9))));
    }

    #[test]
    fn test_from_graph_rejects_third_parties() {
        let mut board = maps::line(3).unwrap();
        board.assign(id(0), Color::Red, 4).unwrap();
        board.assign(id(1), Color::Blue, 2).unwrap();

        // Territory 2 is unclaimed.
        assert!(GameState::from_graph(&board, Color::Red, Color::Blue).is_err());

        board.assign(id(2), Color::Green, 2).unwrap();
        assert!(GameState::from_graph(&board, Color::Red, Color::Blue).is_err());
    }

    #[test]
    fn test_is_conquered() {
        let open = GameState::root(Color::Red, Color::Blue, troops(&[(0, 3)]), troops(&[(1, 1)])).unwrap();
        assert!(!open.is_conquered());

        let done = GameState::root(Color::Red, Color::Blue, troops(&[(0, 3), (1, 1)]), TroopMap::new()).unwrap();
        assert!(done.is_conquered());
    }
}
