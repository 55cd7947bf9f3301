//! Full combat resolution ("blitz").
//!
//! A blitz rolls exchanges until the attacker is down to one troop or the
//! defender is wiped out. The capture estimator is a statistical model of
//! exactly this process.

use smallvec::SmallVec;

use crate::core::GameRng;
use crate::error::{Error, Result};

use super::table::Dice;

/// Survivors of a blitz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlitzResult {
    pub attacker: u32,
    pub defender: u32,
}

impl BlitzResult {
    /// The attacker took the territory.
    #[must_use]
    pub fn captured(&self) -> bool {
        self.defender == 0
    }
}

/// Resolves a full attack between two troop counts.
///
/// Implementations must stop at a terminal state: attacker reduced to 1
/// or defender reduced to 0.
pub trait BlitzResolver {
    fn resolve(&mut self, attack: u32, defend: u32) -> Result<BlitzResult>;
}

/// Blitz that rolls real six-sided dice.
#[derive(Clone, Debug)]
pub struct DiceBlitz {
    rng: GameRng,
}

impl DiceBlitz {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Roll one exchange, returning troops lost as `(attacker, defender)`.
    fn exchange(&mut self, dice: Dice) -> (u32, u32) {
        let mut attacking: SmallVec<[u8; 3]> = (0..dice.attacking).map(|_| self.rng.roll_die()).collect();
        let mut defending: SmallVec<[u8; 2]> = (0..dice.defending).map(|_| self.rng.roll_die()).collect();
        attacking.sort_unstable_by(|a, b| b.cmp(a));
        defending.sort_unstable_by(|a, b| b.cmp(a));

        let mut losses = (0, 0);
        for (a, d) in attacking.iter().zip(defending.iter()) {
            // Ties go to the defender.
            if a > d {
                losses.1 += 1;
            } else {
                losses.0 += 1;
            }
        }
        losses
    }
}

impl BlitzResolver for DiceBlitz {
    fn resolve(&mut self, attack: u32, defend: u32) -> Result<BlitzResult> {
        if attack <= 1 || defend == 0 {
            return Err(Error::InvalidCombatInput { attack, defend });
        }

        let mut attack = attack;
        let mut defend = defend;
        while attack > 1 && defend > 0 {
            let (attacker_lost, defender_lost) = self.exchange(Dice::for_troops(attack, defend));
            attack -= attacker_lost;
            defend -= defender_lost;
        }

        Ok(BlitzResult {
            attacker: attack,
            defender: defend,
        })
    }
}
