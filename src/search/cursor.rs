//! A position marker that walks down a searched tree as the game is played.

use super::policy::{BestChild, MovePolicy};
use super::state::{GameState, NodeId};
use super::tree::StateTree;
use crate::error::{Error, Result};

/// Owns a [`StateTree`] and remembers which node the live game is at.
///
/// The cursor only moves from a node to one of its children.
#[derive(Clone, Debug)]
pub struct StatespaceCursor {
    tree: StateTree,
    current: NodeId,
}

impl StatespaceCursor {
    /// A cursor at the root of `tree`.
    pub fn new(tree: StateTree) -> Self {
        let current = tree.root();
        Self { tree, current }
    }

    #[must_use]
    pub fn current(&self) -> &GameState {
        self.tree.get(self.current)
    }

    #[must_use]
    pub fn current_id(&self) -> NodeId {
        self.current
    }

    #[must_use]
    pub fn tree(&self) -> &StateTree {
        &self.tree
    }

    pub fn into_tree(self) -> StateTree {
        self.tree
    }

    /// The current node has no explored children.
    #[must_use]
    pub fn is_at_horizon(&self) -> bool {
        self.current().children().is_empty()
    }

    /// Move to `child`, which must be a child of the current node.
    pub fn advance_to(&mut self, child: NodeId) -> Result<&GameState> {
        if !self.current().children().contains(&child) {
            return Err(Error::InvalidTransition {
                current: self.current,
                target: child,
            });
        }
        self.current = child;
        Ok(self.tree.get(child))
    }

    /// The child `policy` picks at the current node, without moving.
    #[must_use]
    pub fn select(&self, policy: &dyn MovePolicy) -> Option<NodeId> {
        policy.choose(&self.tree, self.current)
    }

    /// The highest-valued child, without moving.
    #[must_use]
    pub fn best_child(&self) -> Option<NodeId> {
        self.select(&BestChild)
    }

    /// Pick a child with `policy` and move there. `None` at the horizon.
    pub fn advance_with(&mut self, policy: &dyn MovePolicy) -> Option<&GameState> {
        let child = self.select(policy)?;
        self.current = child;
        Some(self.tree.get(child))
    }
}
