//! Fixed 16-slot ranking bracket
//!
//! Every participant keeps playing until a final placement is decided:
//! winners and losers of each match are routed into further matches, and
//! the eight depth-0 matches award ranks 1..16.
//!
//! Table rows: seeds (0 = fed by another match), winner and loser
//! destinations, depth.

use tracing::debug;

use crate::tree::{BracketNode, MatchIdGenerator, Rank, Slot, SlotPos, Target};

/// Largest participant count the table covers
pub const TEMPLATE_SLOTS: u32 = 16;

/// Destination encoded in a table row
#[derive(Debug, Clone, Copy)]
enum Dest {
    /// 1-based row number and slot
    Match(usize, SlotPos),
    /// Final placement
    Place(Rank),
}

use self::Dest::{Match, Place};
use crate::tree::SlotPos::{First as S1, Second as S2};

/// (seed 1, seed 2, winner, loser, depth)
type Row = (Rank, Rank, Dest, Dest, u32);

const ROWS: [Row; 36] = [
    // First round
    (1, 16, Match(10, S1), Match(9, S1), 4),
    (8, 9, Match(10, S2), Match(9, S2), 4),
    (4, 13, Match(12, S1), Match(11, S1), 4),
    (5, 12, Match(12, S2), Match(11, S2), 4),
    (11, 6, Match(14, S1), Match(13, S1), 4),
    (14, 3, Match(14, S2), Match(13, S2), 4),
    (10, 7, Match(16, S1), Match(15, S1), 4),
    (15, 2, Match(16, S2), Match(15, S2), 4),
    // Second round: losers (odd rows) and winners (even rows) of each pair
    (0, 0, Match(17, S1), Match(21, S1), 3),
    (0, 0, Match(27, S1), Match(19, S2), 3),
    (0, 0, Match(18, S1), Match(22, S1), 3),
    (0, 0, Match(27, S2), Match(20, S2), 3),
    (0, 0, Match(19, S1), Match(21, S2), 3),
    (0, 0, Match(28, S1), Match(17, S2), 3),
    (0, 0, Match(20, S1), Match(22, S2), 3),
    (0, 0, Match(28, S2), Match(18, S2), 3),
    // Third round: loser-side winners meet second-round losers
    (0, 0, Match(25, S1), Match(23, S1), 2),
    (0, 0, Match(25, S2), Match(24, S1), 2),
    (0, 0, Match(26, S1), Match(23, S2), 2),
    (0, 0, Match(26, S2), Match(24, S2), 2),
    // Semifinals of every placement group
    (0, 0, Match(30, S1), Match(29, S1), 1),
    (0, 0, Match(30, S2), Match(29, S2), 1),
    (0, 0, Match(32, S1), Match(31, S1), 1),
    (0, 0, Match(32, S2), Match(31, S2), 1),
    (0, 0, Match(34, S1), Match(33, S1), 1),
    (0, 0, Match(34, S2), Match(33, S2), 1),
    (0, 0, Match(36, S1), Match(35, S1), 1),
    (0, 0, Match(36, S2), Match(35, S2), 1),
    // Placement matches
    (0, 0, Place(15), Place(16), 0),
    (0, 0, Place(13), Place(14), 0),
    (0, 0, Place(11), Place(12), 0),
    (0, 0, Place(9), Place(10), 0),
    (0, 0, Place(7), Place(8), 0),
    (0, 0, Place(5), Place(6), 0),
    (0, 0, Place(3), Place(4), 0),
    (0, 0, Place(1), Place(2), 0),
];

/// Materialise the table as linked nodes (before bye collapsing)
///
/// Node ids equal row numbers when `ids` is fresh.
pub fn template_nodes(ids: &mut MatchIdGenerator) -> Vec<BracketNode> {
    let mut nodes: Vec<BracketNode> = ROWS
        .iter()
        .map(|&(first, second, _, _, depth)| {
            BracketNode::from_parts(
                ids.next_id(),
                depth,
                [seed_slot(first), seed_slot(second)],
                Target::None,
                Target::None,
            )
        })
        .collect();

    for (row, &(_, _, winner, loser, _)) in ROWS.iter().enumerate() {
        for (dest, link_winner) in [(winner, true), (loser, false)] {
            match dest {
                Place(rank) => {
                    if link_winner {
                        nodes[row].winner = Target::Rank(rank);
                    } else {
                        nodes[row].loser = Target::Rank(rank);
                    }
                }
                Match(next, pos) => {
                    // Destinations always point to a later row
                    let (head, tail) = nodes.split_at_mut(next - 1);
                    let (source, target) = (&mut head[row], &mut tail[0]);
                    if link_winner {
                        source.link_winner_to(target, pos);
                    } else {
                        source.link_loser_to(target, pos);
                    }
                }
            }
        }
    }

    debug!(nodes = nodes.len(), "materialised 16-slot template");
    nodes
}

fn seed_slot(rank: Rank) -> Slot {
    if rank == 0 {
        // Overwritten by the linking pass
        Slot::Unused
    } else {
        Slot::Seed(rank)
    }
}

/// Rounds played for the template style
pub fn template_round_count(num_players: u32) -> Option<u32> {
    match num_players {
        0 | 1 => None,
        2 => Some(1),
        3..=4 => Some(2),
        5..=8 => Some(3),
        _ => Some(5),
    }
}
