mod common;

use bracketsmith::{round_count, BracketStyle, Slot, SlotPos, Target};
use common::{assert_snapshot, assert_well_formed, generate};
use test_case::test_case;

#[test_case(2, 1 ; "final only")]
#[test_case(3, 2 ; "three")]
#[test_case(4, 2 ; "four")]
#[test_case(5, 3 ; "five")]
#[test_case(16, 4 ; "sixteen")]
#[test_case(17, 5 ; "seventeen")]
#[test_case(64, 6 ; "sixty four")]
#[test_case(65, 7 ; "sixty five")]
fn round_count_doubles(players: u32, rounds: u32) {
    assert_eq!(round_count(players), Some(rounds));
}

#[test_case(2, 1 ; "two players")]
#[test_case(4, 4 ; "four players")]
#[test_case(8, 8 ; "eight players")]
#[test_case(16, 16 ; "sixteen players")]
fn power_of_two_keeps_full_tree(players: u32, matches: usize) {
    let bracket = generate(BracketStyle::SingleElimination, players);
    assert_well_formed(&bracket);
    assert_eq!(bracket.len(), matches);
    assert_eq!(bracket.playable_matches().count(), matches);
}

#[test]
fn two_players_play_only_the_final() {
    let bracket = generate(BracketStyle::SingleElimination, 2);
    let final_match = bracket.final_match().expect("final exists");
    assert_eq!(final_match.seed_pair(), Some((1, 2)));
    assert_eq!(final_match.loser, Target::Rank(2));
    assert_eq!(bracket.assigned_ranks(), vec![1, 2]);
}

#[test]
fn eight_player_first_round_is_balanced() {
    let bracket = generate(BracketStyle::SingleElimination, 8);
    let rounds = bracket.rounds();
    assert_eq!(rounds.len(), 3);

    let (depth, first_round) = &rounds[0];
    assert_eq!(*depth, 2);
    let pairs: Vec<_> = first_round.iter().map(|n| n.seed_pair()).collect();
    assert_eq!(
        pairs,
        vec![Some((1, 8)), Some((4, 5)), Some((2, 7)), Some((3, 6))]
    );
}

#[test]
fn third_place_receives_both_semifinal_losers() {
    let bracket = generate(BracketStyle::SingleElimination, 8);
    let third = bracket
        .nodes()
        .iter()
        .find(|n| n.winner == Target::Rank(3))
        .expect("third-place match exists");

    assert_eq!(third.loser, Target::Rank(4));
    for pos in SlotPos::BOTH {
        let (source, _) = third.slot(pos).source().expect("fed by a semifinal");
        let semi = bracket.node(source).expect("semifinal exists");
        assert_eq!(semi.depth, 1);
    }
}

#[test]
fn five_players_snapshot() {
    let bracket = generate(BracketStyle::SingleElimination, 5);
    assert_well_formed(&bracket);
    assert_snapshot("five_players.txt", &bracket.to_string());
}

#[test]
fn three_players_keep_the_third_place_walkover() {
    let bracket = generate(BracketStyle::SingleElimination, 3);
    assert_snapshot("three_players.txt", &bracket.to_string());

    // Rank 3 is still awarded although only one semifinal is played
    let third = bracket.node(2).expect("third-place match kept");
    assert_eq!(third.slot(SlotPos::First), Slot::Unused);
    assert!(!third.is_playable());
    assert_eq!(bracket.playable_matches().count(), 2);
    // Nobody can finish fourth
    assert_eq!(bracket.assigned_ranks(), vec![1, 2, 3]);
}

#[test_case(5 ; "five")]
#[test_case(6 ; "six")]
#[test_case(7 ; "seven")]
#[test_case(12 ; "twelve")]
#[test_case(33 ; "thirty three")]
#[test_case(100 ; "one hundred")]
fn byes_leave_one_match_per_elimination(players: u32) {
    let bracket = generate(BracketStyle::SingleElimination, players);
    assert_well_formed(&bracket);
    // n - 1 eliminations plus the third-place match
    assert_eq!(bracket.len(), players as usize);
    assert_eq!(bracket.playable_matches().count(), players as usize);
}

#[test]
fn top_seeds_receive_the_byes() {
    let bracket = generate(BracketStyle::SingleElimination, 6);
    let semis: Vec<_> = bracket.nodes().iter().filter(|n| n.depth == 1).collect();
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0].slot(SlotPos::First), Slot::Seed(1));
    assert_eq!(semis[1].slot(SlotPos::First), Slot::Seed(2));
}

#[test]
fn fewer_than_two_players_is_empty() {
    for players in [0, 1] {
        let bracket = generate(BracketStyle::SingleElimination, players);
        assert!(bracket.is_empty());
        assert!(bracket.final_match().is_none());
        assert!(bracket.rounds().is_empty());
    }
}
