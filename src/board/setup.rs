//! Board setup: claiming territories, spreading starting troops, and
//! random reinforcement.

use std::collections::VecDeque;

use tracing::debug;

use crate::core::{GameRng, Player, TerritoryId};
use crate::error::{Error, Result};

use super::graph::{Board, TerritoryGraph};

/// Most troops dropped on one territory per visit while spreading the
/// starting reserves.
const MAX_TROOPS_PER_VISIT: u32 = 5;

/// Claim `ids` round-robin in seating order.
///
/// Players with an empty reserve are skipped. Each claim costs one troop.
/// The seating order is rotated as players take their turns.
pub fn claim_territories(
    order: &mut VecDeque<Player>,
    board: &mut Board,
    ids: &[TerritoryId],
) -> Result<()> {
    for &id in ids {
        if order.iter().all(|p| !p.has_reserve()) {
            return Err(Error::invariant(format!("no troops left to claim {}", id)));
        }

        loop {
            order.rotate_left(1);
            let Some(player) = order.back_mut() else {
                return Err(Error::invariant("no players to claim territories"));
            };
            if !player.has_reserve() {
                continue;
            }
            board.claim(id, player.color())?;
            player.take_troops(1);
            break;
        }
    }
    Ok(())
}

/// Spread every remaining reserve over the owners' territories.
///
/// Territories are visited round-robin in board order; each visit moves a
/// uniform `0..=5` troops (capped by the owner's reserve) onto it.
pub fn initialize_troops(players: &mut [Player], board: &mut Board, rng: &mut GameRng) -> Result<()> {
    for player in players.iter().filter(|p| p.has_reserve()) {
        if board.territories_of(player.color()).is_empty() {
            return Err(Error::invariant(format!(
                "{} has {} troops but no territory to place them on",
                player.color(),
                player.reserve()
            )));
        }
    }

    let ids = board.territory_ids();
    for id in ids.iter().cycle() {
        if players.iter().all(|p| !p.has_reserve()) {
            break;
        }

        let owner = board
            .owner_of(*id)?
            .ok_or_else(|| Error::invariant(format!("{} is unclaimed after claiming", id)))?;
        let player = players
            .iter_mut()
            .find(|p| p.color() == owner)
            .ok_or(Error::PlayerNotFound(owner))?;

        let placed = player.take_troops(rng.gen_upto(MAX_TROOPS_PER_VISIT));
        board.add_troops(*id, placed)?;
    }
    Ok(())
}

/// Grant `player` its turn income and drop it one troop at a time on
/// uniformly chosen owned territories. Returns the income.
pub fn deploy_randomly(player: &mut Player, board: &mut Board, rng: &mut GameRng) -> Result<u32> {
    let owned = board.territories_of(player.color());
    if owned.is_empty() {
        return Err(Error::invariant(format!("{} has no territory to deploy on", player.color())));
    }

    let income = board.troop_income(player.color());
    player.add_troops(income);

    while player.has_reserve() {
        let Some(&id) = rng.choose(&owned) else {
            break;
        };
        player.take_troops(1);
        board.add_troops(id, 1)?;
    }

    debug!(color = %player.color(), income, "deployed reinforcements");
    Ok(income)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;
    use crate::core::Color;

    fn seats(troops: u32) -> VecDeque<Player> {
        VecDeque::from(vec![
            Player::new(Color::Red, troops),
            Player::new(Color::Blue, troops),
        ])
    }

    #[test]
    fn test_claim_alternates_between_players() {
        let mut board = maps::line(4).unwrap();
        let mut order = seats(10);
        let ids = board.territory_ids();

        claim_territories(&mut order, &mut board, &ids).unwrap();

        assert!(board.is_fully_claimed());
        assert_eq!(board.territories_of(Color::Red).len(), 2);
        assert_eq!(board.territories_of(Color::Blue).len(), 2);
        assert!(order.iter().all(|p| p.reserve() == 8));
    }

    #[test]
    fn test_claim_skips_empty_reserves() {
        let mut board = maps::line(3).unwrap();
        let mut order = VecDeque::from(vec![
            Player::new(Color::Red, 0),
            Player::new(Color::Blue, 5),
        ]);
        let ids = board.territory_ids();

        claim_territories(&mut order, &mut board, &ids).unwrap();

        assert_eq!(board.territories_of(Color::Blue).len(), 3);
    }

    #[test]
    fn test_claim_without_troops_fails() {
        let mut board = maps::line(3).unwrap();
        let mut order = seats(1);
        let ids = board.territory_ids();

        let err = claim_territories(&mut order, &mut board, &ids).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { .. }));
    }

    #[test]
    fn test_initialize_spends_every_reserve() {
        let mut board = maps::ring(6).unwrap();
        let mut order = seats(30);
        let ids = board.territory_ids();
        claim_territories(&mut order, &mut board, &ids).unwrap();

        let mut players: Vec<Player> = order.into_iter().collect();
        let mut rng = GameRng::new(4);
        initialize_troops(&mut players, &mut board, &mut rng).unwrap();

        assert!(players.iter().all(|p| p.reserve() == 0));
        let red: u32 = board
            .territories_of(Color::Red)
            .iter()
            .map(|&id| board.troops_of(id).unwrap())
            .sum();
        assert_eq!(red, 30);
    }

    #[test]
    fn test_deploy_randomly_places_income() {
        let mut board = maps::line(3).unwrap();
        for id in board.territory_ids() {
            board.assign(id, Color::Red, 1).unwrap();
        }
        let mut player = Player::new(Color::Red, 0);
        let mut rng = GameRng::new(2);

        let income = deploy_randomly(&mut player, &mut board, &mut rng).unwrap();

        assert_eq!(income, 3);
        assert_eq!(player.reserve(), 0);
        let total: u32 = board.territories().map(|t| t.troops).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_deploy_pays_continent_bonus_after_claiming() {
        let mut board = maps::two_continents().unwrap();
        let mut order = seats(10);
        // Red claims the whole North, Blue the whole South.
        let red_first: Vec<TerritoryId> = [0, 4, 1, 5, 2, 6, 3, 7].into_iter().map(TerritoryId::new).collect();
        claim_territories(&mut order, &mut board, &red_first).unwrap();
        assert_eq!(board.territories_of(Color::Red).len(), 4);
        assert!(board.territories_of(Color::Red).iter().all(|id| id.raw() < 4));

        let mut red = Player::new(Color::Red, 0);
        let mut rng = GameRng::new(8);
        let income = deploy_randomly(&mut red, &mut board, &mut rng).unwrap();

        assert_eq!(income, 6);
    }
}
