//! Move policies: how a player picks its next attack from a searched tree.
//!
//! - `BestChild`: greedy on the backed-up value
//! - `FirstChild`: always the first explored attack, a weak baseline

use super::state::NodeId;
use super::tree::StateTree;

/// Picks one child of `node`, or `None` at a leaf.
pub trait MovePolicy: Send + Sync {
    fn choose(&self, tree: &StateTree, node: NodeId) -> Option<NodeId>;
}

/// Greedy selection on the children's heuristics.
///
/// Ties go to the earliest child. Children without a value rank last.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestChild;

impl MovePolicy for BestChild {
    fn choose(&self, tree: &StateTree, node: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in tree.children(node) {
            let value = tree.get(child).heuristic().unwrap_or(f64::NEG_INFINITY);
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((child, value)),
            }
        }
        best.map(|(child, _)| child)
    }
}

/// Always the first child in expansion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChild;

impl MovePolicy for FirstChild {
    fn choose(&self, tree: &StateTree, node: NodeId) -> Option<NodeId> {
        tree.children(node).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attack, Color, TerritoryId};
    use crate::search::{GameState, TroopMap};

    fn id(raw: u16) -> TerritoryId {
        TerritoryId::new(raw)
    }

    /// Root with three explored children valued 5, 12 and 12.
    fn scored_tree() -> (StateTree, Vec<NodeId>) {
        let mine: TroopMap = [(id(0), 9u32), (id(2), 6), (id(4), 4)].into_iter().collect();
        let theirs: TroopMap = [(id(1), 1u32), (id(3), 1), (id(5), 1)].into_iter().collect();
        let root = GameState::root(Color::Red, Color::Blue, mine, theirs).unwrap();
        let mut tree = StateTree::new(root);

        let mut ids = Vec::new();
        for (attack, value) in [
            (Attack::new(id(0), id(1)), 5.0),
            (Attack::new(id(2), id(3)), 12.0),
            (Attack::new(id(4), id(5)), 12.0),
        ] {
            let child = tree.get(tree.root()).capture(attack, 0.95).unwrap();
            let child = tree.add_child(tree.root(), child);
            tree.get_mut(child).set_heuristic(value);
            ids.push(child);
        }
        (tree, ids)
    }

    #[test]
    fn test_best_child_first_max_wins() {
        let (tree, ids) = scored_tree();
        assert_eq!(BestChild.choose(&tree, tree.root()), Some(ids[1]));
    }

    #[test]
    fn test_first_child() {
        let (tree, ids) = scored_tree();
        assert_eq!(FirstChild.choose(&tree, tree.root()), Some(ids[0]));
    }

    #[test]
    fn test_leaf_has_no_choice() {
        let (tree, ids) = scored_tree();
        assert_eq!(BestChild.choose(&tree, ids[0]), None);
        assert_eq!(FirstChild.choose(&tree, ids[0]), None);
    }
}
