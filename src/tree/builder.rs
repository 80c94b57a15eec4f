//! Full elimination tree construction
//!
//! Grows the bracket from the final (right) to the first round (left).
//! Each round splits every match of the previous round into two:
//!   parent seeds (r1, r2), bracket size n
//!   -> children (r1, n+1-r1) and (r2, n+1-r2)
//! so every match at depth d pairs seeds summing to 2^(d+1) + 1.

use tracing::debug;

use super::ids::MatchIdGenerator;
use super::node::{BracketNode, MatchId, Rank, SlotPos, Target};
use crate::round_count;

/// Complete (pre-collapse) tree for the next power of two
#[derive(Debug, Clone)]
pub struct BracketTree {
    /// All nodes in creation order: final, third place, then round by round
    pub nodes: Vec<BracketNode>,

    /// Power of two >= participant count
    pub bracket_size: u32,

    /// Number of rounds, final included
    pub rounds: u32,

    /// Id of the third-place match, if a semifinal round exists
    pub third_place: Option<MatchId>,
}

impl BracketTree {
    /// Tree with no matches (fewer than two participants)
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            bracket_size: 0,
            rounds: 0,
            third_place: None,
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// No matches at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the balanced single-elimination tree
#[derive(Debug, Clone, Copy)]
pub struct BracketTreeBuilder {
    num_players: u32,
}

impl BracketTreeBuilder {
    /// Builder for the given participant count
    pub fn new(num_players: u32) -> Self {
        Self { num_players }
    }

    /// Build the complete tree, drawing ids from `ids`
    ///
    /// Returns an empty tree for fewer than two participants.
    pub fn build(&self, ids: &mut MatchIdGenerator) -> BracketTree {
        let Some(rounds) = round_count(self.num_players) else {
            return BracketTree::empty();
        };

        let mut final_match = BracketNode::new(ids.next_id(), 0, 1, 2);
        final_match.winner = Target::Rank(1);
        final_match.loser = Target::Rank(2);

        // Kept aside until the semifinals exist
        let mut third_place = BracketNode::new(ids.next_id(), 0, 3, 4);
        third_place.winner = Target::Rank(3);
        third_place.loser = Target::Rank(4);
        let third_place_id = third_place.id();
        let mut third_place = Some(third_place);

        let mut nodes = vec![final_match];
        // (index into `nodes`, seeds) of the most recently created round
        let mut previous_round: Vec<(usize, [Rank; 2])> = vec![(0, [1, 2])];

        let mut size: u32 = 2;
        let mut depth: u32 = 0;
        while size < self.num_players {
            size *= 2;
            depth += 1;

            let mut current_round = Vec::with_capacity(previous_round.len() * 2);
            for &(parent_idx, parent_seeds) in &previous_round {
                for (pos, &rank) in SlotPos::BOTH.iter().zip(parent_seeds.iter()) {
                    let seeds = [rank, size + 1 - rank];
                    let mut child = BracketNode::new(ids.next_id(), depth, seeds[0], seeds[1]);
                    child.link_winner_to(&mut nodes[parent_idx], *pos);

                    if depth == 1 {
                        if let Some(third) = third_place.as_mut() {
                            child.link_loser_to(third, *pos);
                        }
                    }

                    current_round.push((nodes.len(), seeds));
                    nodes.push(child);
                }
            }

            if depth == 1 {
                if let Some(third) = third_place.take() {
                    nodes.push(third);
                }
            }

            previous_round = current_round;
        }

        let third_place = if third_place.is_none() {
            Some(third_place_id)
        } else {
            None
        };

        debug!(
            num_players = self.num_players,
            bracket_size = size,
            rounds,
            nodes = nodes.len(),
            "built full elimination tree"
        );

        BracketTree {
            nodes,
            bracket_size: size,
            rounds,
            third_place,
        }
    }
}
