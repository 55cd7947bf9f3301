//! Monte Carlo capture probability.
//!
//! Each trial replays exchanges drawn from [`COMBAT_OUTCOMES`] until the
//! defender is wiped out or the attacker is down to a single troop. A trial
//! is won when the attacker still has more than one troop, i.e. enough to
//! occupy the captured territory. The estimate is the fraction of trials won.
//!
//! [`COMBAT_OUTCOMES`]: super::table::COMBAT_OUTCOMES

use rustc_hash::FxHashMap;

use crate::core::GameRng;
use crate::error::{Error, Result};

use super::table::Dice;

/// Default number of trials per estimate.
pub const DEFAULT_TRIALS: u32 = 1000;

/// Estimate the probability that `attack` troops capture a territory held
/// by `defend` troops.
///
/// Fails with [`Error::InvalidCombatInput`] unless `attack > 1` and
/// `defend > 0`, and with [`Error::InvalidConfiguration`] when `trials`
/// is zero.
///
/// ```
/// use conquest_ai::combat::estimate_capture_probability;
/// use conquest_ai::core::GameRng;
///
/// let mut rng = GameRng::new(1);
/// let p = estimate_capture_probability(20, 1, 20_000, &mut rng).unwrap();
/// assert!(p > 0.99);
/// ```
pub fn estimate_capture_probability(
    attack: u32,
    defend: u32,
    trials: u32,
    rng: &mut GameRng,
) -> Result<f64> {
    if attack <= 1 || defend == 0 {
        return Err(Error::InvalidCombatInput { attack, defend });
    }
    if trials == 0 {
        return Err(Error::configuration("capture estimate needs at least one trial"));
    }

    let mut wins = 0u32;
    for _ in 0..trials {
        if simulate_trial(attack, defend, rng) {
            wins += 1;
        }
    }

    Ok(f64::from(wins) / f64::from(trials))
}

fn simulate_trial(attack: u32, defend: u32, rng: &mut GameRng) -> bool {
    let mut attack = attack;
    let mut defend = defend;

    while defend > 0 && attack > 1 {
        let dice = Dice::for_troops(attack, defend);
        let exchange = dice.outcomes().sample(rng.gen_unit());
        let (attacker_lost, defender_lost) = exchange.losses(dice);
        attack = attack.saturating_sub(attacker_lost);
        defend = defend.saturating_sub(defender_lost);
    }

    attack > 1
}

/// Memoizing capture estimator.
///
/// Every matchup is estimated once, from its own RNG stream derived from
/// the estimator's seed. Two estimators with the same seed and trial count
/// therefore agree exactly on every matchup, whatever order they are
/// queried in.
#[derive(Clone, Debug)]
pub struct CaptureEstimator {
    rng: GameRng,
    trials: u32,
    cache: FxHashMap<(u32, u32), f64>,
}

impl CaptureEstimator {
    /// Create an estimator running `trials` trials per matchup.
    #[must_use]
    pub fn new(seed: u64, trials: u32) -> Self {
        Self {
            rng: GameRng::new(seed),
            trials,
            cache: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Capture probability for `attack` against `defend`.
    pub fn capture_probability(&mut self, attack: u32, defend: u32) -> Result<f64> {
        if let Some(&p) = self.cache.get(&(attack, defend)) {
            return Ok(p);
        }

        let mut stream = self.rng.for_matchup(attack, defend);
        let p = estimate_capture_probability(attack, defend, self.trials, &mut stream)?;
        self.cache.insert((attack, defend), p);
        Ok(p)
    }

    /// Number of distinct matchups estimated so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
