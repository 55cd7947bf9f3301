//! Single-exchange outcome probabilities.
//!
//! One exchange is a simultaneous dice comparison: the attacker rolls
//! `min(attacking troops - 1, 3)` dice and the defender rolls
//! `min(defending troops, 2)`. Dice are compared highest to highest (and
//! second highest to second highest when both sides roll two or more), ties
//! going to the defender.
//!
//! The table reduces that comparison to three outcomes. It is indexed by
//! `[defending dice - 1][attacking dice - 1]`.

use serde::{Deserialize, Serialize};

/// Probability split of one exchange. The three entries sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSplit {
    /// Defender loses every compared die.
    pub defender_loses: f64,
    /// Each side loses one troop. Only possible when two dice are compared.
    pub split: f64,
    /// Attacker loses every compared die.
    pub attacker_loses: f64,
}

impl OutcomeSplit {
    const fn new(defender_loses: f64, split: f64, attacker_loses: f64) -> Self {
        Self {
            defender_loses,
            split,
            attacker_loses,
        }
    }

    /// Map a uniform draw in `[0, 1)` onto an outcome.
    ///
    /// `[0, lo)` is a defender loss, `[lo, hi)` a split and the rest an
    /// attacker loss, where `lo = defender_loses` and `hi = lo + split`.
    #[must_use]
    pub fn sample(&self, draw: f64) -> Exchange {
        let lo = self.defender_loses;
        let hi = lo + self.split;
        if draw < lo {
            Exchange::DefenderLoses
        } else if draw < hi {
            Exchange::Split
        } else {
            Exchange::AttackerLoses
        }
    }
}

/// Exchange outcomes, `[defending dice - 1][attacking dice - 1]`.
pub const COMBAT_OUTCOMES: [[OutcomeSplit; 3]; 2] = [
    [
        OutcomeSplit::new(0.4167, 0.0, 0.5833),
        OutcomeSplit::new(0.5787, 0.0, 0.4213),
        OutcomeSplit::new(0.6597, 0.0, 0.3403),
    ],
    [
        OutcomeSplit::new(0.2546, 0.0, 0.7454),
        OutcomeSplit::new(0.2276, 0.3241, 0.4483),
        OutcomeSplit::new(0.3717, 0.3357, 0.2926),
    ],
];

/// Result of one exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exchange {
    DefenderLoses,
    Split,
    AttackerLoses,
}

impl Exchange {
    /// Troops lost as `(attacker, defender)`.
    #[must_use]
    pub fn losses(self, dice: Dice) -> (u32, u32) {
        let compared = dice.compared();
        match self {
            Exchange::DefenderLoses => (0, compared),
            Exchange::Split => (1, 1),
            Exchange::AttackerLoses => (compared, 0),
        }
    }
}

/// Dice rolled by each side in one exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    pub attacking: u32,
    pub defending: u32,
}

impl Dice {
    /// Dice for the given troop counts.
    ///
    /// Callers guarantee `attack > 1` and `defend > 0`.
    #[must_use]
    pub fn for_troops(attack: u32, defend: u32) -> Self {
        Self {
            attacking: (attack - 1).min(3),
            defending: defend.min(2),
        }
    }

    /// Number of die pairs compared.
    #[must_use]
    pub fn compared(self) -> u32 {
        self.attacking.min(self.defending)
    }

    /// Outcome split for these dice.
    #[must_use]
    pub fn outcomes(self) -> &'static OutcomeSplit {
        &COMBAT_OUTCOMES[self.defending as usize - 1][self.attacking as usize - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sum_to_one() {
        for row in &COMBAT_OUTCOMES {
            for split in row {
                let total = split.defender_loses + split.split + split.attacker_loses;
                assert!((total - 1.0).abs() < 1e-9, "{:?} sums to {}", split, total);
            }
        }
    }

    #[test]
    fn test_split_only_with_two_compared_dice() {
        for (d, row) in COMBAT_OUTCOMES.iter().enumerate() {
            for (a, split) in row.iter().enumerate() {
                let dice = Dice {
                    attacking: a as u32 + 1,
                    defending: d as u32 + 1,
                };
                if dice.compared() < 2 {
                    assert_eq!(split.split, 0.0);
                } else {
                    assert!(split.split > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_one_on_one_matches_dice_combinatorics() {
        // Attacker wins a single die comparison in 15 of 36 rolls.
        let split = Dice::for_troops(2, 1).outcomes();
        assert!((split.defender_loses - 15.0 / 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_dice_for_troops() {
        assert_eq!(Dice::for_troops(2, 1), Dice { attacking: 1, defending: 1 });
        assert_eq!(Dice::for_troops(3, 5), Dice { attacking: 2, defending: 2 });
        assert_eq!(Dice::for_troops(20, 2), Dice { attacking: 3, defending: 2 });
        assert_eq!(Dice::for_troops(20, 1).compared(), 1);
    }

    #[test]
    fn test_sample_partitions_unit_interval() {
        let split = Dice::for_troops(4, 2).outcomes();

        assert_eq!(split.sample(0.0), Exchange::DefenderLoses);
        assert_eq!(split.sample(0.3716), Exchange::DefenderLoses);
        assert_eq!(split.sample(0.3717), Exchange::Split);
        assert_eq!(split.sample(0.7070), Exchange::Split);
        assert_eq!(split.sample(0.7080), Exchange::AttackerLoses);
        assert_eq!(split.sample(0.9999), Exchange::AttackerLoses);
    }

    #[test]
    fn test_losses() {
        let two = Dice { attacking: 3, defending: 2 };
        assert_eq!(Exchange::DefenderLoses.losses(two), (0, 2));
        assert_eq!(Exchange::Split.losses(two), (1, 1));
        assert_eq!(Exchange::AttackerLoses.losses(two), (2, 0));

        let one = Dice { attacking: 1, defending: 2 };
        assert_eq!(Exchange::DefenderLoses.losses(one), (0, 1));
        assert_eq!(Exchange::AttackerLoses.losses(one), (1, 0));
    }
}
