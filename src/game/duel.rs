//! A two-player game driven by the search: the primary color plans its
//! attacks with alpha-beta and follows the best line, the opponent follows
//! the first line the search explored.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{claim_territories, deploy_randomly, initialize_troops, AttackOutcome, Board, TerritoryGraph};
use crate::combat::{BlitzResolver, DiceBlitz};
use crate::core::{Attack, Color, GameRng, Player};
use crate::error::{Error, Result};
use crate::search::{BestChild, FirstChild, GameState, MovePolicy, StateSpaceSearch, StatespaceCursor};

use super::config::DuelConfig;

/// What one call to [`Duel::attack_turn`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub mover: Color,

    /// `None` when the mover had nothing worth attacking.
    pub outcome: Option<AttackOutcome>,

    /// The plan was rebuilt because the live board no longer allowed the
    /// planned attack.
    pub replanned: bool,
}

impl TurnReport {
    #[must_use]
    pub fn attack(&self) -> Option<Attack> {
        self.outcome.map(|o| o.attack())
    }
}

/// How a duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelResult {
    /// The last player holding territory, if the duel got that far.
    pub winner: Option<Color>,
    pub turns: u32,
}

/// Live board, two players in seating order, a combat resolver and the
/// current plan.
pub struct Duel<B: BlitzResolver> {
    board: Board,
    order: VecDeque<Player>,
    blitz: B,
    config: DuelConfig,
    rng: GameRng,
    cursor: Option<StatespaceCursor>,
    turns: u32,
}

impl Duel<DiceBlitz> {
    /// [`Duel::setup`] with dice rolled from a fork of the duel's seed.
    pub fn with_dice(board: Board, config: DuelConfig) -> Result<Self> {
        let blitz = DiceBlitz::new(GameRng::new(config.seed).fork());
        Self::setup(board, config, blitz)
    }
}

impl<B: BlitzResolver> Duel<B> {
    /// Seat both players in random order, claim every territory and spread
    /// the starting reserves.
    pub fn setup(mut board: Board, config: DuelConfig, blitz: B) -> Result<Self> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);

        let mut seats = vec![
            Player::new(config.primary(), config.initial_troops),
            Player::new(config.opponent, config.initial_troops),
        ];
        rng.shuffle(&mut seats);
        let mut order = VecDeque::from(seats);

        let ids = board.territory_ids();
        claim_territories(&mut order, &mut board, &ids)?;

        let mut players = Vec::from(order);
        initialize_troops(&mut players, &mut board, &mut rng)?;

        if let Some(unowned) = board.territories().find(|t| !t.is_claimed()) {
            return Err(Error::invariant(format!("{} left unowned after setup", unowned)));
        }

        info!(
            territories = board.len(),
            first = %players[0].color(),
            "duel set up"
        );

        Ok(Self {
            board,
            order: VecDeque::from(players),
            blitz,
            config,
            rng,
            cursor: None,
            turns: 0,
        })
    }

    /// Duel on a board whose owners and troops are already placed.
    /// `first` moves first.
    pub fn from_board(board: Board, config: DuelConfig, blitz: B, first: Color) -> Result<Self> {
        config.validate()?;
        GameState::from_graph(&board, config.primary(), config.opponent)?;

        let rng = GameRng::new(config.seed);
        let mut order = VecDeque::from(vec![
            Player::new(config.primary(), 0),
            Player::new(config.opponent, 0),
        ]);
        if first == config.opponent {
            order.rotate_left(1);
        } else if first != config.primary() {
            return Err(Error::PlayerNotFound(first));
        }

        Ok(Self {
            board,
            order,
            blitz,
            config,
            rng,
            cursor: None,
            turns: 0,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Remaining players in seating order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.order.iter()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<&StatespaceCursor> {
        self.cursor.as_ref()
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    fn other(&self, color: Color) -> Result<Color> {
        if color == self.config.primary() {
            Ok(self.config.opponent)
        } else if color == self.config.opponent {
            Ok(self.config.primary())
        } else {
            Err(Error::PlayerNotFound(color))
        }
    }

    /// Search from the live board with `mover` to attack and replace the
    /// current plan.
    pub fn plan(&mut self, mover: Color) -> Result<()> {
        let opponent = self.other(mover)?;
        let mut search = StateSpaceSearch::new(&self.board, self.config.search.clone())?;
        let tree = search.search_board(mover, opponent)?;
        debug!(%mover, nodes = tree.len(), "planned");
        self.cursor = Some(StatespaceCursor::new(tree));
        Ok(())
    }

    fn is_legal(&self, mover: Color, attack: Attack) -> Result<bool> {
        Ok(self.board.owner_of(attack.from)? == Some(mover)
            && self.board.troops_of(attack.from)? > 1
            && self.board.attack_options(attack.from)?.contains(&attack.to))
    }

    /// Let `mover` make one attack on the live board.
    pub fn attack_turn(&mut self, mover: Color) -> Result<TurnReport> {
        self.other(mover)?;
        if !self.board.can_attack(mover) {
            debug!(%mover, "no attack available");
            return Ok(TurnReport {
                mover,
                outcome: None,
                replanned: false,
            });
        }

        let stale = match &self.cursor {
            None => true,
            Some(cursor) => cursor.current().mover() != mover || cursor.is_at_horizon(),
        };
        if stale {
            self.plan(mover)?;
        }

        let policy: &dyn MovePolicy = if mover == self.config.primary() {
            &BestChild
        } else {
            &FirstChild
        };

        let mut replanned = false;
        let attack = loop {
            let cursor = self
                .cursor
                .as_ref()
                .ok_or_else(|| Error::invariant("no plan after planning"))?;
            let Some(child) = cursor.select(policy) else {
                debug!(%mover, "no attack clears the threshold");
                return Ok(TurnReport {
                    mover,
                    outcome: None,
                    replanned,
                });
            };
            let attack = cursor
                .tree()
                .get(child)
                .attack()
                .ok_or_else(|| Error::invariant(format!("{} has no attack", child)))?;

            if self.is_legal(mover, attack)? {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.advance_to(child)?;
                }
                break attack;
            }
            if replanned {
                return Err(Error::invariant(format!(
                    "fresh plan proposes illegal attack {}",
                    attack
                )));
            }

            warn!(%mover, %attack, "board diverged from plan, replanning");
            self.plan(mover)?;
            replanned = true;
        };

        let outcome = self.board.resolve_attack(attack, &mut self.blitz)?;
        if !outcome.captured() {
            self.cursor = None;
        }
        debug!(%mover, %attack, captured = outcome.captured(), "attack turn");

        Ok(TurnReport {
            mover,
            outcome: Some(outcome),
            replanned,
        })
    }

    fn remove_defeated(&mut self) {
        let board = &self.board;
        self.order.retain(|p| !board.territories_of(p.color()).is_empty());
    }

    fn winner(&self) -> Option<Color> {
        match self.order.len() {
            1 => self.order.front().map(Player::color),
            _ => None,
        }
    }

    /// Alternate turns until one player holds the board or `max_turns`
    /// turns have been played.
    pub fn play(&mut self) -> Result<DuelResult> {
        while self.turns < self.config.max_turns {
            self.remove_defeated();
            if self.winner().is_some() {
                break;
            }
            if self.order.iter().all(|p| !self.board.can_attack(p.color())) {
                debug!(turn = self.turns, "no one can attack this turn");
            }

            let Some(player) = self.order.pop_front() else {
                break;
            };
            let mover = player.color();
            self.order.push_back(player);

            if self.config.reinforce {
                if let Some(player) = self.order.back_mut() {
                    deploy_randomly(player, &mut self.board, &mut self.rng)?;
                }
            }

            self.attack_turn(mover)?;
            self.turns += 1;
        }

        self.remove_defeated();
        let result = DuelResult {
            winner: self.winner(),
            turns: self.turns,
        };
        info!(winner = ?result.winner, turns = result.turns, "duel finished");
        Ok(result)
    }
}
