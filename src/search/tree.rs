//! Arena-based state tree.
//!
//! Uses a flat `Vec<GameState>` with index-based references. Nodes are
//! only ever appended; a search produces a fresh tree.

use std::collections::BTreeSet;

use text_trees::StringTreeNode;

use super::state::{GameState, NodeId};
use crate::core::TerritoryId;
use crate::error::{Error, Result};

/// Shape summary of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub leaf_count: usize,
}

/// Arena-based tree of hypothetical positions.
#[derive(Clone, Debug)]
pub struct StateTree {
    nodes: Vec<GameState>,

    /// Always 0.
    root: NodeId,
}

impl StateTree {
    pub fn new(root: GameState) -> Self {
        Self::with_capacity(root, 64)
    }

    pub fn with_capacity(root: GameState, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &GameState {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut GameState {
        &mut self.nodes[id.0 as usize]
    }

    /// Checked lookup.
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&GameState> {
        self.nodes.get(id.0 as usize)
    }

    /// Append `state` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, state: GameState) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(state);
        self.get_mut(parent).push_child(id);
        id
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).children()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in creation order with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GameState)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, state)| (NodeId::new(i as u32), state))
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for state in &self.nodes {
            stats.max_depth = stats.max_depth.max(state.depth());
            if state.children().is_empty() {
                stats.leaf_count += 1;
            }
        }
        stats
    }

    /// Verify the structural properties every search tree must hold:
    /// each node partitions the root's territories between its two sides
    /// with at least one troop everywhere, roles alternate along each edge,
    /// and likelihoods never grow with depth.
    pub fn check_invariants(&self) -> Result<()> {
        let root = self.get(self.root);
        let expected: BTreeSet<TerritoryId> = root.territory_ids().collect();

        for (id, state) in self.iter() {
            let owned: BTreeSet<TerritoryId> = state.territory_ids().collect();
            let total = state.mover_territories().len() + state.opponent_territories().len();
            if owned != expected || total != expected.len() {
                return Err(Error::invariant(format!("{} does not partition the board", id)));
            }
            if state
                .mover_territories()
                .values()
                .chain(state.opponent_territories().values())
                .any(|&t| t == 0)
            {
                return Err(Error::invariant(format!("{} has an empty territory", id)));
            }
            if !(0.0..=1.0).contains(&state.likelihood()) {
                return Err(Error::invariant(format!("{} likelihood {} out of range", id, state.likelihood())));
            }

            for &child_id in state.children() {
                let child = self
                    .try_get(child_id)
                    .ok_or_else(|| Error::invariant(format!("{} has dangling child {}", id, child_id)))?;
                if child.mover() != state.opponent() || child.opponent() != state.mover() {
                    return Err(Error::invariant(format!("{} does not swap roles from {}", child_id, id)));
                }
                if child.likelihood() > state.likelihood() {
                    return Err(Error::invariant(format!("{} is more likely than its parent {}", child_id, id)));
                }
                if child.depth() != state.depth() + 1 {
                    return Err(Error::invariant(format!("{} has depth {}", child_id, child.depth())));
                }
                match child.attack() {
                    Some(attack) if state.mover_territories().contains_key(&attack.from) => {}
                    _ => return Err(Error::invariant(format!("{} was not reached by a {} attack", child_id, state.mover()))),
                }
            }
        }
        Ok(())
    }

    /// Visual rendering of the tree: the attack, the side to move, the path
    /// likelihood and the backed-up value of every node.
    #[must_use]
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.text_tree_node(self.root))
    }

    fn text_tree_node(&self, id: NodeId) -> StringTreeNode {
        let state = self.get(id);
        let edge = match state.attack() {
            Some(attack) => attack.to_string(),
            None => "root".to_owned(),
        };
        let value = match state.heuristic() {
            Some(h) => format!("{:.3}", h),
            None => "-".to_owned(),
        };
        let mut node = StringTreeNode::new(format!(
            "{} [{} to move] p={:.3} h={}",
            edge,
            state.mover(),
            state.likelihood(),
            value
        ));
        for &child in state.children() {
            node.push_node(self.text_tree_node(child));
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attack, Color};
    use crate::search::TroopMap;

    fn id(raw: u16) -> TerritoryId {
        TerritoryId::new(raw)
    }

    fn root() -> GameState {
        let mine: TroopMap = [(id(0), 9u32), (id(2), 5)].into_iter().collect();
        let theirs: TroopMap = [(id(1), 2u32), (id(3), 1)].into_iter().collect();
        GameState::root(Color::Red, Color::Blue, mine, theirs).unwrap()
    }

    #[test]
    fn test_tree_creation() {
        let tree = StateTree::new(root());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.children(tree.root()).is_empty());
        assert!(tree.try_get(NodeId::new(1)).is_none());
    }

    #[test]
    fn test_add_child_keeps_expansion_order() {
        let mut tree = StateTree::new(root());
        let parent = tree.root();
        let a = tree.get(parent).capture(Attack::new(id(0), id(1)), 0.95).unwrap();
        let b = tree.get(parent).capture(Attack::new(id(2), id(3)), 0.92).unwrap();

        let first = tree.add_child(parent, a);
        let second = tree.add_child(parent, b);

        assert_eq!(tree.children(parent), &[first, second]);
        assert_eq!(tree.get(second).attack(), Some(Attack::new(id(2), id(3))));
        assert!(tree.check_invariants().is_ok());

        let stats = tree.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.leaf_count, 2);
    }

    #[test]
    fn test_check_invariants_detects_bad_child() {
        let mut tree = StateTree::new(root());
        let parent = tree.root();
        // A second root grafted as a child keeps the mover and the depth.
        tree.add_child(parent, root());
        assert!(matches!(tree.check_invariants(), Err(Error::InvariantViolation { .. })));
    }

    #[test]
    fn test_to_text_tree() {
        let mut tree = StateTree::new(root());
        let parent = tree.root();
        let child = tree.get(parent).capture(Attack::new(id(0), id(1)), 0.5).unwrap();
        let child = tree.add_child(parent, child);
        tree.get_mut(child).set_heuristic(0.0);
        tree.get_mut(parent).set_heuristic(0.0);

        let text = tree.to_text_tree();
        assert!(text.contains("root [red to move] p=1.000 h=0.000"));
        assert!(text.contains("T0 -> T1 [blue to move] p=0.500 h=0.000"));
    }
}
