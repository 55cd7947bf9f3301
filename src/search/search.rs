//! Depth-limited alpha-beta search over hypothetical captures.
//!
//! Each ply, the side to move may capture any adjacent enemy territory it
//! outnumbers, provided the estimated capture probability clears the
//! threshold. The primary color maximizes, everyone else minimizes, and a
//! leaf is worth `likelihood * troops` to the primary color when it is the
//! one to move there and nothing otherwise.

use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::board::TerritoryGraph;
use crate::combat::CaptureEstimator;
use crate::core::{Attack, Color};
use crate::error::Result;

use super::config::SearchConfig;
use super::state::{GameState, NodeId};
use super::stats::SearchStats;
use super::tree::StateTree;

/// Progress is logged every this many created nodes.
const PROGRESS_INTERVAL: u32 = 100;

/// An attack worth estimating: the mover outnumbers the target by more
/// than the one troop left behind.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    attack: Attack,
    attacking: u32,
    defending: u32,
}

/// Per-search mutable state threaded through the recursion.
struct SearchContext {
    tree: StateTree,
    stats: SearchStats,
}

/// Alpha-beta search over a board's state space.
///
/// The capture estimator lives as long as the searcher, so repeated searches
/// reuse its memoized probabilities.
pub struct StateSpaceSearch<'g, G: TerritoryGraph + ?Sized> {
    graph: &'g G,
    config: SearchConfig,
    estimator: CaptureEstimator,
    stats: SearchStats,
}

impl<'g, G: TerritoryGraph + ?Sized> StateSpaceSearch<'g, G> {
    /// Create a searcher over `graph`'s adjacency.
    pub fn new(graph: &'g G, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let estimator = CaptureEstimator::new(config.seed, config.trials);
        Ok(Self {
            graph,
            config,
            estimator,
            stats: SearchStats::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last search. Cleared when a search starts, so they
    /// stay at zero if that search fails.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn estimator(&self) -> &CaptureEstimator {
        &self.estimator
    }

    /// Search from the graph's current ownership, `mover` to attack.
    pub fn search_board(&mut self, mover: Color, opponent: Color) -> Result<StateTree> {
        let root = GameState::from_graph(self.graph, mover, opponent)?;
        self.search(root)
    }

    /// Build the tree below `root`. Every explored node carries its
    /// backed-up value when this returns.
    pub fn search(&mut self, root: GameState) -> Result<StateTree> {
        let span = info_span!(
            "state_space_search",
            mover = %root.mover(),
            primary = %self.config.primary,
            max_depth = self.config.max_depth,
        );
        let _enter = span.enter();

        self.stats.reset();
        let start = Instant::now();
        let mut ctx = SearchContext {
            tree: StateTree::new(root),
            stats: SearchStats::new(),
        };
        ctx.stats.record_node(0);

        let root_id = ctx.tree.root();
        let value = self.expand(&mut ctx, root_id, f64::NEG_INFINITY, f64::INFINITY)?;

        ctx.stats.time_us = start.elapsed().as_micros() as u64;
        info!(
            nodes = ctx.stats.nodes_created,
            estimates = ctx.stats.estimates,
            cutoffs = ctx.stats.cutoffs,
            time_us = ctx.stats.time_us,
            value,
            "search complete"
        );

        self.stats = ctx.stats;
        Ok(ctx.tree)
    }

    /// Fail-soft alpha-beta. Returns the node's value and stores it on the
    /// node.
    fn expand(&mut self, ctx: &mut SearchContext, node: NodeId, mut alpha: f64, mut beta: f64) -> Result<f64> {
        let state = ctx.tree.get(node);
        let leaf_value = self.leaf_value(state);

        if u32::from(state.depth()) >= self.config.max_depth || state.is_conquered() {
            ctx.tree.get_mut(node).set_heuristic(leaf_value);
            return Ok(leaf_value);
        }

        let maximizing = state.mover() == self.config.primary;
        let candidates = self.candidates(state)?;
        let mut best: Option<f64> = None;

        for candidate in candidates {
            let probability = self
                .estimator
                .capture_probability(candidate.attacking, candidate.defending)?;
            ctx.stats.estimates += 1;
            if probability <= self.config.prob_threshold {
                continue;
            }

            let child = ctx.tree.get(node).capture(candidate.attack, probability)?;
            let depth = child.depth();
            let child = ctx.tree.add_child(node, child);
            ctx.stats.record_node(depth);
            if ctx.stats.nodes_created % PROGRESS_INTERVAL == 0 {
                debug!(
                    nodes = ctx.stats.nodes_created,
                    depth,
                    cutoffs = ctx.stats.cutoffs,
                    "search progress"
                );
            }

            let value = self.expand(ctx, child, alpha, beta)?;

            if maximizing {
                best = Some(best.map_or(value, |b| b.max(value)));
                alpha = alpha.max(value);
            } else {
                best = Some(best.map_or(value, |b| b.min(value)));
                beta = beta.min(value);
            }

            if self.config.pruning && beta <= alpha {
                ctx.stats.cutoffs += 1;
                break;
            }
        }

        let value = best.unwrap_or(leaf_value);
        ctx.tree.get_mut(node).set_heuristic(value);
        Ok(value)
    }

    fn leaf_value(&self, state: &GameState) -> f64 {
        if state.mover() == self.config.primary {
            state.likelihood() * f64::from(state.mover_troops())
        } else {
            0.0
        }
    }

    /// Attacks in source-territory order, then adjacency order.
    fn candidates(&self, state: &GameState) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for (&from, &attacking) in state.mover_territories().iter() {
            if attacking < 2 {
                continue;
            }
            for &to in self.graph.neighbors_of(from)? {
                let Some(&defending) = state.opponent_territories().get(&to) else {
                    continue;
                };
                if attacking - 1 > defending {
                    candidates.push(Candidate {
                        attack: Attack::new(from, to),
                        attacking,
                        defending,
                    });
                }
            }
        }
        Ok(candidates)
    }
}
