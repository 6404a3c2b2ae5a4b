//! Settlement: defender points, the kitty bonus, and the contract line.

use super::scoring::settle;
use super::state::{Seat, Team};
use super::test_state_helpers::cards;
use super::tricks::ClosedTrick;

fn closed(winner: Seat, points: u16) -> ClosedTrick {
    ClosedTrick {
        leader: winner,
        plays: Vec::new(),
        winner,
        points,
    }
}

#[test]
fn kitty_bonus_goes_only_to_the_last_trick_winner() {
    // Declarer North (defenders East/West), contract 95. Defenders captured
    // 70 across tricks; the final kitty holds 20 points.
    let kitty = cards(&["KD#1", "10C#1"]);

    // Defenders take the last trick: 70 + 20 = 90, still short of 95.
    let tricks = vec![
        closed(Seat::East, 40),
        closed(Seat::North, 60),
        closed(Seat::West, 30),
    ];
    let outcome = settle(&tricks, &kitty, Seat::North, 95);
    assert_eq!(outcome.defending_team, Team::EastWest);
    assert_eq!(outcome.defenders_points, 70);
    assert_eq!(outcome.kitty_bonus, 20);
    assert_eq!(outcome.last_trick_winner, Team::EastWest);
    assert_eq!(outcome.defenders_total(), 90);
    assert_eq!(outcome.winner, Team::NorthSouth);

    // Declarer's side takes the last trick: the bonus never reaches the
    // defense, which stays at 70.
    let tricks = vec![
        closed(Seat::East, 40),
        closed(Seat::West, 30),
        closed(Seat::North, 60),
    ];
    let outcome = settle(&tricks, &kitty, Seat::North, 95);
    assert_eq!(outcome.defenders_points, 70);
    assert_eq!(outcome.last_trick_winner, Team::NorthSouth);
    assert_eq!(outcome.defenders_total(), 70);
    assert_eq!(outcome.winner, Team::NorthSouth);
}

#[test]
fn kitty_bonus_can_flip_the_result() {
    // Defenders at 80 against a 95 contract with a 20-point kitty: the last
    // trick decides the hand.
    let kitty = cards(&["KD#1", "10C#1"]);

    let defenders_last = vec![closed(Seat::North, 120), closed(Seat::East, 80)];
    let outcome = settle(&defenders_last, &kitty, Seat::North, 95);
    assert_eq!(outcome.defenders_total(), 100);
    assert_eq!(outcome.winner, Team::EastWest);

    let declarer_last = vec![closed(Seat::East, 80), closed(Seat::North, 120)];
    let outcome = settle(&declarer_last, &kitty, Seat::North, 95);
    assert_eq!(outcome.defenders_total(), 80);
    assert_eq!(outcome.winner, Team::NorthSouth);
}

#[test]
fn exactly_meeting_the_contract_defends() {
    let outcome = settle(&[closed(Seat::East, 95)], &[], Seat::North, 95);
    assert_eq!(outcome.defenders_total(), 95);
    assert_eq!(outcome.winner, Team::EastWest);

    let outcome = settle(&[closed(Seat::East, 90)], &[], Seat::North, 95);
    assert_eq!(outcome.winner, Team::NorthSouth);
}

#[test]
fn partner_tricks_count_for_the_defense() {
    // Declarer South: North/South declare, East/West defend.
    let tricks = vec![
        closed(Seat::East, 25),
        closed(Seat::West, 35),
        closed(Seat::South, 40),
    ];
    let outcome = settle(&tricks, &[], Seat::South, 60);
    assert_eq!(outcome.defending_team, Team::EastWest);
    assert_eq!(outcome.defenders_points, 60);
    assert_eq!(outcome.winner, Team::EastWest);
}
