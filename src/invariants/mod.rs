//! Structural checks on generated brackets
//!
//! - Edge symmetry: every `Advance` has a matching `FromMatch` and back
//! - No seed above the participant count survives
//! - Exactly one match awards rank 1, exactly one awards rank 2
//! - Seed balance on the winners' tree: seeds at depth d sum to 2^(d+1) + 1

use std::collections::HashMap;

use thiserror::Error;

use crate::tree::{BracketNode, MatchId, Outcome, Rank, Slot, SlotPos, Target};

/// A broken bracket invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Target names a match that is not in the bracket
    #[error("match {node} sends its {outcome:?} to missing match {missing}")]
    MissingTarget {
        /// Match holding the target
        node: MatchId,
        /// Which result
        outcome: Outcome,
        /// Absent destination
        missing: MatchId,
    },

    /// Destination slot does not point back at the source
    #[error("match {node} slot {slot:?} does not refer back to match {source_id}")]
    MissingBackReference {
        /// Destination match
        node: MatchId,
        /// Destination slot
        slot: SlotPos,
        /// Source match
        source_id: MatchId,
    },

    /// Placeholder slot whose source does not route into it
    #[error("match {node} slot {slot:?} expects a result from match {source_id} that never arrives")]
    OrphanedPlaceholder {
        /// Match holding the placeholder
        node: MatchId,
        /// Placeholder slot
        slot: SlotPos,
        /// Named source
        source_id: MatchId,
    },

    /// Seed that does not correspond to a participant
    #[error("match {node} still seeds rank {rank} with only {num_players} participants")]
    PhantomSeed {
        /// Offending match
        node: MatchId,
        /// Seed rank
        rank: Rank,
        /// Participant count
        num_players: u32,
    },

    /// Final placement awarded zero or several times
    #[error("rank {rank} is awarded by {count} matches")]
    RankCount {
        /// Placement
        rank: Rank,
        /// Number of matches awarding it
        count: usize,
    },

    /// Seeds of a winners'-tree match do not balance
    #[error("match {node} at depth {depth} pairs seeds {seeds:?}, expected sum {expected}")]
    SeedImbalance {
        /// Offending match
        node: MatchId,
        /// Depth of the match
        depth: u32,
        /// Traced seeds
        seeds: (Rank, Rank),
        /// Required sum
        expected: u32,
    },
}

fn by_id(nodes: &[BracketNode]) -> HashMap<MatchId, &BracketNode> {
    nodes.iter().map(|node| (node.id(), node)).collect()
}

/// Every edge is stored consistently on both ends
pub fn check_links(nodes: &[BracketNode]) -> Result<(), InvariantViolation> {
    let lookup = by_id(nodes);

    for node in nodes {
        for outcome in [Outcome::Winner, Outcome::Loser] {
            let Some((next, slot)) = node.target(outcome).destination() else {
                continue;
            };
            let target = lookup.get(&next).ok_or(InvariantViolation::MissingTarget {
                node: node.id(),
                outcome,
                missing: next,
            })?;
            let expected = Slot::FromMatch {
                id: node.id(),
                outcome,
            };
            if target.slot(slot) != expected {
                return Err(InvariantViolation::MissingBackReference {
                    node: next,
                    slot,
                    source_id: node.id(),
                });
            }
        }

        for slot in SlotPos::BOTH {
            let Some((source, outcome)) = node.slot(slot).source() else {
                continue;
            };
            let routed_here = lookup
                .get(&source)
                .map(|src| src.target(outcome) == Target::Advance { id: node.id(), slot })
                .unwrap_or(false);
            if !routed_here {
                return Err(InvariantViolation::OrphanedPlaceholder {
                    node: node.id(),
                    slot,
                    source_id: source,
                });
            }
        }
    }

    Ok(())
}

/// No seed above the participant count remains
pub fn check_no_phantoms(nodes: &[BracketNode], num_players: u32) -> Result<(), InvariantViolation> {
    for node in nodes {
        for slot in node.slots() {
            if let Slot::Seed(rank) = slot {
                if rank > num_players {
                    return Err(InvariantViolation::PhantomSeed {
                        node: node.id(),
                        rank,
                        num_players,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Exactly one winner target awards rank 1 and exactly one target awards rank 2
pub fn check_final_ranks(nodes: &[BracketNode]) -> Result<(), InvariantViolation> {
    let champions = nodes
        .iter()
        .filter(|node| node.winner == Target::Rank(1))
        .count();
    if champions != 1 {
        return Err(InvariantViolation::RankCount {
            rank: 1,
            count: champions,
        });
    }

    let runners_up = nodes
        .iter()
        .flat_map(|node| [node.winner, node.loser])
        .filter(|target| *target == Target::Rank(2))
        .count();
    if runners_up != 1 {
        return Err(InvariantViolation::RankCount {
            rank: 2,
            count: runners_up,
        });
    }

    Ok(())
}

/// Direct seed behind a slot, following winner edges through favoured slots
pub fn traced_seed(nodes: &[BracketNode], slot: Slot) -> Option<Rank> {
    let lookup = by_id(nodes);
    trace_with(&lookup, slot)
}

fn trace_with(lookup: &HashMap<MatchId, &BracketNode>, mut slot: Slot) -> Option<Rank> {
    // Bounded by the number of nodes; a cycle would be a broken graph
    for _ in 0..=lookup.len() {
        match slot {
            Slot::Seed(rank) => return Some(rank),
            Slot::Unused => return None,
            Slot::FromMatch { id, .. } => {
                slot = lookup.get(&id)?.slot(SlotPos::First);
            }
        }
    }
    None
}

/// Winners'-tree matches pair seeds summing to `2^(depth+1) + 1`
///
/// Only meaningful for single elimination. Walks from the rank-1 match
/// along winner edges; matches with an unused slot are skipped.
pub fn check_seed_balance(nodes: &[BracketNode]) -> Result<(), InvariantViolation> {
    let lookup = by_id(nodes);
    let Some(root) = nodes.iter().find(|node| node.winner == Target::Rank(1)) else {
        return Ok(());
    };

    let mut stack: Vec<&BracketNode> = vec![root];
    while let Some(node) = stack.pop() {
        let seeds = (
            trace_with(&lookup, node.slot(SlotPos::First)),
            trace_with(&lookup, node.slot(SlotPos::Second)),
        );
        if let (Some(a), Some(b)) = seeds {
            let expected = (1u32 << (node.depth + 1)) + 1;
            if a + b != expected {
                return Err(InvariantViolation::SeedImbalance {
                    node: node.id(),
                    depth: node.depth,
                    seeds: (a, b),
                    expected,
                });
            }
        }

        for slot in node.slots() {
            if let Slot::FromMatch {
                id,
                outcome: Outcome::Winner,
            } = slot
            {
                if let Some(child) = lookup.get(&id) {
                    stack.push(*child);
                }
            }
        }
    }

    Ok(())
}
