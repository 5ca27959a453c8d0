//! Recovers bracket slot order from unordered per-round results.
//!
//! Works backward from the championship: the finalists seed the last round,
//! and each earlier round is filled by placing every known occupant in the
//! even child slot and its opponent from that round in the odd one.

use crate::{BracketError, BracketResult, BracketTable, Season, TeamDirectory, TeamId};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Rebuilds the full table from results alone.
///
/// Round `R-1` holds the championship winner in slot 0 and loser in slot 1.
/// Every earlier round keeps the team that advanced in the even slot, so round
/// 0 is the lineup implied by the games, not any externally supplied order.
pub fn make_bracket_structure(season: &Season) -> BracketResult<BracketTable<TeamId>> {
    season.validate()?;
    let num_rounds = season.num_rounds();
    let last = num_rounds - 1;

    let mut slots: Vec<Vec<Option<TeamId>>> = (0..num_rounds)
        .map(|r| vec![None; crate::slots_in_round(num_rounds, r)])
        .collect();

    let championship = season.championship()?;
    let (winner, loser) = match (championship.winner(), championship.loser()) {
        (Some(w), Some(l)) => (w, l),
        _ => {
            return Err(BracketError::LevelScore {
                round: last,
                home: championship.home,
                away: championship.away,
            });
        }
    };
    slots[last][0] = Some(winner);
    slots[last][1] = Some(loser);
    debug!("championship: {winner} beat {loser}");

    for r in (1..num_rounds).rev() {
        let occupants = resolved(&slots[r], r)?;
        for (i, team) in occupants.into_iter().enumerate() {
            let game = season.game_in_round(team, r - 1)?;
            match game.winner() {
                None => {
                    return Err(BracketError::LevelScore {
                        round: r - 1,
                        home: game.home,
                        away: game.away,
                    });
                }
                Some(w) if w != team => {
                    return Err(BracketError::TeamDidNotWin { team, round: r - 1 });
                }
                Some(_) => {}
            }
            let opponent = season.opponent_in_round(team, r - 1)?;
            slots[r - 1][2 * i] = Some(team);
            slots[r - 1][2 * i + 1] = Some(opponent);
        }
        debug!("round {} resolved from round {r}", r - 1);
    }

    let rounds = slots
        .iter()
        .enumerate()
        .map(|(r, round)| resolved(round, r))
        .collect::<BracketResult<Vec<_>>>()?;
    BracketTable::from_rounds(rounds)
}

/// Rebuilds the table with round 0 fixed to `seeding`.
///
/// The game-derived tree is reconstructed first, then each later round is
/// re-ordered so slot `i` is the winner of the pair in slots `2i`, `2i+1` of
/// the round below it. Fails if the seeding pairs teams that never met.
/// The championship row follows seeding order, not winner-then-loser.
pub fn make_seeded_bracket_structure(
    season: &Season,
    seeding: &[TeamId],
) -> BracketResult<BracketTable<TeamId>> {
    let derived = make_bracket_structure(season)?;
    let oriented = orient_to_seeding(&derived, seeding)?;
    info!("bracket oriented to {} seeded teams", seeding.len());
    Ok(oriented)
}

fn orient_to_seeding(
    derived: &BracketTable<TeamId>,
    seeding: &[TeamId],
) -> BracketResult<BracketTable<TeamId>> {
    let expected = derived.first_round().len();
    if seeding.len() != expected {
        return Err(BracketError::SeedingLength { expected, found: seeding.len() });
    }
    let mut seen = HashSet::with_capacity(seeding.len());
    for &team in seeding {
        if !seen.insert(team) {
            return Err(BracketError::DuplicateSeed { team });
        }
    }

    // Slot index of every team within each derived round.
    let positions: Vec<HashMap<TeamId, usize>> = derived
        .rounds()
        .map(|slots| slots.iter().enumerate().map(|(i, &t)| (t, i)).collect())
        .collect();

    if let Some(&team) = seeding.iter().find(|&&t| !positions[0].contains_key(&t)) {
        return Err(BracketError::SeedNotPlayed { team });
    }

    let mut rounds: Vec<Vec<TeamId>> = vec![seeding.to_vec()];
    for r in 1..derived.num_rounds() {
        let below = &rounds[r - 1];
        let mut current = Vec::with_capacity(below.len() / 2);
        for pair in below.chunks(2) {
            let (first, second) = (pair[0], pair[1]);
            let mismatch = BracketError::SeedingMismatch { round: r - 1, first, second };
            let (Some(&a), Some(&b)) = (positions[r - 1].get(&first), positions[r - 1].get(&second))
            else {
                return Err(mismatch);
            };
            match derived.get(r, a / 2) {
                Some(&winner) if a / 2 == b / 2 => current.push(winner),
                _ => return Err(mismatch),
            }
        }
        rounds.push(current);
    }
    BracketTable::from_rounds(rounds)
}

/// Replaces every id with its display code.
///
/// Consumes the id table, so no opponent matching can run on codes afterward.
pub fn substitute_codes(
    table: BracketTable<TeamId>,
    teams: &TeamDirectory,
) -> BracketResult<BracketTable<String>> {
    table.try_map(|id| teams.code(id).map(str::to_owned))
}

/// Every slot of `round`, or the first one still empty.
fn resolved(slots: &[Option<TeamId>], round: usize) -> BracketResult<Vec<TeamId>> {
    slots
        .iter()
        .enumerate()
        .map(|(slot, team)| team.ok_or(BracketError::UnresolvedSlot { round, slot }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Game, Round, Team};
    use chrono::NaiveDate;

    fn game(home: u32, away: u32, home_score: u16, away_score: u16) -> Game {
        Game {
            date: NaiveDate::from_ymd_opt(2009, 3, 19).unwrap(),
            home: TeamId(home),
            away: TeamId(away),
            home_score,
            away_score,
        }
    }

    fn ids(raw: &[u32]) -> Vec<TeamId> {
        raw.iter().map(|&n| TeamId(n)).collect()
    }

    // A=1, B=2, C=3, D=4
    fn four_team_season() -> Season {
        Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 20, 15)]),
        ])
    }

    /// Plays out a bracket of `num_rounds` rounds with teams `0..2^R` in
    /// bracket order, then scrambles game order and home/away within rounds.
    fn synthetic_season(num_rounds: usize) -> Season {
        let mut alive: Vec<u32> = (0..(1u32 << num_rounds)).collect();
        let mut rounds = Vec::new();
        for r in 0..num_rounds {
            let mut games = Vec::new();
            let mut next = Vec::new();
            for pair in alive.chunks(2) {
                let (a, b) = (pair[0], pair[1]);
                let a_wins = (a + b + r as u32) % 2 == 0;
                let (home_score, away_score) = if a_wins { (71, 65) } else { (60, 62) };
                let g = if (a / 2) % 2 == 0 {
                    game(a, b, home_score, away_score)
                } else {
                    game(b, a, away_score, home_score)
                };
                games.push(g);
                next.push(if a_wins { a } else { b });
            }
            games.reverse();
            rounds.push(Round::new(games));
            alive = next;
        }
        Season::new(rounds)
    }

    fn assert_feed_invariant(season: &Season, table: &BracketTable<TeamId>) {
        for r in 1..table.num_rounds() {
            for (i, &team) in table.slots(r).unwrap().iter().enumerate() {
                let (a, b) = (table.slots(r - 1).unwrap()[2 * i], table.slots(r - 1).unwrap()[2 * i + 1]);
                let game = season.game_in_round(a, r - 1).unwrap();
                assert_eq!(game.opponent_of(a), Some(b), "round {r} slot {i}");
                assert_eq!(game.winner(), Some(team), "round {r} slot {i}");
            }
        }
    }

    #[test]
    fn test_four_team_bracket() {
        let table = make_bracket_structure(&four_team_season()).unwrap();
        assert_eq!(table.slots(1).unwrap(), ids(&[1, 3]).as_slice());
        assert_eq!(table.slots(0).unwrap(), ids(&[1, 2, 3, 4]).as_slice());
    }

    #[test]
    fn test_championship_winner_takes_slot_zero() {
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 15, 20)]),
        ]);
        let table = make_bracket_structure(&season).unwrap();
        assert_eq!(table.slots(1).unwrap(), ids(&[3, 1]).as_slice());
        assert_eq!(table.slots(0).unwrap(), ids(&[3, 4, 1, 2]).as_slice());
    }

    #[test]
    fn test_single_round_bracket() {
        let season = Season::new(vec![Round::new(vec![game(5, 6, 40, 41)])]);
        let table = make_bracket_structure(&season).unwrap();
        assert_eq!(table.num_rounds(), 1);
        assert_eq!(table.slots(0).unwrap(), ids(&[6, 5]).as_slice());
    }

    #[test]
    fn test_feed_invariant_holds_for_full_bracket() {
        let season = synthetic_season(crate::NUM_ROUNDS);
        let table = make_bracket_structure(&season).unwrap();
        assert_eq!(table.slots(0).unwrap().len(), 64);
        assert_feed_invariant(&season, &table);
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let season = synthetic_season(crate::NUM_ROUNDS);
        let first = make_bracket_structure(&season).unwrap();
        let second = make_bracket_structure(&season).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seeded_round_zero_matches_seeding() {
        let season = synthetic_season(crate::NUM_ROUNDS);
        let seeding: Vec<TeamId> = (0..64).map(TeamId).collect();
        let table = make_seeded_bracket_structure(&season, &seeding).unwrap();
        assert_eq!(table.slots(0).unwrap(), seeding.as_slice());
        assert_feed_invariant(&season, &table);
    }

    #[test]
    fn test_seeded_orientation_follows_seeding_order() {
        // Final won by C, but A's half is listed first.
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 15, 20)]),
        ]);
        let table = make_seeded_bracket_structure(&season, &ids(&[2, 1, 3, 4])).unwrap();
        assert_eq!(table.slots(0).unwrap(), ids(&[2, 1, 3, 4]).as_slice());
        assert_eq!(table.slots(1).unwrap(), ids(&[1, 3]).as_slice());
    }

    #[test]
    fn test_seeded_team_missing_from_games() {
        let err = make_seeded_bracket_structure(&four_team_season(), &ids(&[1, 2, 3, 9])).unwrap_err();
        assert!(matches!(err, BracketError::SeedNotPlayed { team: TeamId(9) }));
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_seeding_pairing_teams_that_never_met() {
        let err = make_seeded_bracket_structure(&four_team_season(), &ids(&[1, 3, 2, 4])).unwrap_err();
        assert!(matches!(err, BracketError::SeedingMismatch { round: 0, .. }));
    }

    #[test]
    fn test_seeding_length_and_duplicates() {
        let err = make_seeded_bracket_structure(&four_team_season(), &ids(&[1, 2, 3])).unwrap_err();
        assert!(matches!(err, BracketError::SeedingLength { expected: 4, found: 3 }));

        let err = make_seeded_bracket_structure(&four_team_season(), &ids(&[1, 2, 1, 2])).unwrap_err();
        assert!(matches!(err, BracketError::DuplicateSeed { team: TeamId(1) }));
    }

    #[test]
    fn test_advancing_team_without_prior_game() {
        // Team 5 reaches the final with no first-round game.
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 5, 20, 15)]),
        ]);
        let err = make_bracket_structure(&season).unwrap_err();
        assert!(matches!(err, BracketError::MissingGame { team: TeamId(5), round: 0 }));
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_advancing_team_that_lost() {
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 5, 10), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 20, 15)]),
        ]);
        let err = make_bracket_structure(&season).unwrap_err();
        assert!(matches!(err, BracketError::TeamDidNotWin { team: TeamId(1), round: 0 }));
    }

    #[test]
    fn test_level_first_round_game_fails() {
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 10), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 20, 15)]),
        ]);
        let err = make_bracket_structure(&season).unwrap_err();
        assert!(matches!(
            err,
            BracketError::LevelScore { round: 0, home: TeamId(1), away: TeamId(2) }
        ));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_extra_first_round_game_is_ignored() {
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7), game(90, 91, 60, 55)]),
            Round::new(vec![game(1, 3, 20, 15)]),
        ]);
        let table = make_bracket_structure(&season).unwrap();
        assert_eq!(table.first_round(), ids(&[1, 2, 3, 4]).as_slice());
        assert_eq!(table.slots(1).unwrap(), ids(&[1, 3]).as_slice());
    }

    #[test]
    fn test_empty_round_fails() {
        let season = Season::new(vec![Round::default(), Round::new(vec![game(1, 3, 20, 15)])]);
        let err = make_bracket_structure(&season).unwrap_err();
        assert!(matches!(err, BracketError::EmptyRound { round: 0 }));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_level_championship_fails() {
        let season = Season::new(vec![
            Round::new(vec![game(1, 2, 10, 5), game(3, 4, 8, 7)]),
            Round::new(vec![game(1, 3, 20, 20)]),
        ]);
        let err = make_bracket_structure(&season).unwrap_err();
        assert!(matches!(err, BracketError::LevelScore { round: 1, .. }));
    }

    #[test]
    fn test_opponent_lookup_is_symmetric() {
        let season = synthetic_season(crate::NUM_ROUNDS);
        for (r, round) in season.rounds.iter().enumerate() {
            for g in &round.games {
                for team in [g.home, g.away] {
                    let opponent = season.opponent_in_round(team, r).unwrap();
                    assert_eq!(season.opponent_in_round(opponent, r).unwrap(), team);
                }
            }
        }
    }

    #[test]
    fn test_substitute_codes() {
        let teams = TeamDirectory::from_teams((1..=4).map(|n| Team {
            id: TeamId(n),
            code: format!("t{n}"),
            name: format!("Team {n}"),
            offense: vec![],
            defense: vec![],
        }))
        .unwrap();
        let table = make_bracket_structure(&four_team_season()).unwrap();
        let codes = substitute_codes(table, &teams).unwrap();
        assert_eq!(codes.slots(0).unwrap(), &["t1", "t2", "t3", "t4"]);
        assert_eq!(codes.slots(1).unwrap(), &["t1", "t3"]);
    }

    #[test]
    fn test_substitute_codes_lookup_miss() {
        let teams = TeamDirectory::default();
        let table = make_bracket_structure(&four_team_season()).unwrap();
        let err = substitute_codes(table, &teams).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LookupMiss);
    }
}
