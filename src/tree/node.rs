//! Bracket node representation
//!
//! One node = one match slot in the elimination graph.
//! Edges are stored on both ends:
//!   source.winner / source.loser  -> Advance { id, slot }
//!   target.slots[slot]            -> FromMatch { id, outcome }
//! The linking methods are the only place a back-reference is created.

use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Match identifier (positive, unique within one generation run)
pub type MatchId = u32;

/// Initial seed / final placement number (1 = best)
pub type Rank = u32;

/// Position of a participant inside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum SlotPos {
    /// First participant (the favoured seed in generated brackets)
    First,
    /// Second participant
    Second,
}

impl SlotPos {
    /// Both positions in order
    pub const BOTH: [SlotPos; 2] = [SlotPos::First, SlotPos::Second];

    /// Array index of this position
    #[inline]
    pub fn index(self) -> usize {
        match self {
            SlotPos::First => 0,
            SlotPos::Second => 1,
        }
    }

    /// The other position
    #[inline]
    pub fn other(self) -> SlotPos {
        match self {
            SlotPos::First => SlotPos::Second,
            SlotPos::Second => SlotPos::First,
        }
    }

    /// 1-based number as printed on bracket sheets
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Which result of a match feeds a later slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// Winner of the source match
    Winner,
    /// Loser of the source match
    Loser,
}

/// Occupant of a match slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Slot {
    /// Directly seeded participant
    Seed(Rank),

    /// Produced by another match
    FromMatch {
        /// Source match
        id: MatchId,
        /// Which result of the source match lands here
        outcome: Outcome,
    },

    /// Never filled (double-bye outcome)
    Unused,
}

impl Slot {
    /// Slot holds no real participant: phantom seed or unused.
    ///
    /// `Unused` counts as vacant so that a bye propagates into the next
    /// match on the following collapse iteration.
    #[inline]
    pub fn is_vacant(&self, num_players: u32) -> bool {
        match *self {
            Slot::Seed(rank) => rank > num_players,
            Slot::FromMatch { .. } => false,
            Slot::Unused => true,
        }
    }

    /// Source match, if this slot is a placeholder
    pub fn source(&self) -> Option<(MatchId, Outcome)> {
        match *self {
            Slot::FromMatch { id, outcome } => Some((id, outcome)),
            _ => None,
        }
    }
}

/// Where a winner or loser goes after the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Target {
    /// Proceeds to a slot of a later match
    Advance {
        /// Destination match
        id: MatchId,
        /// Slot inside the destination match
        slot: SlotPos,
    },

    /// Terminal placement
    Rank(Rank),

    /// No continuation recorded
    #[default]
    None,
}

impl Target {
    /// Destination, if the target is an advancement
    pub fn destination(&self) -> Option<(MatchId, SlotPos)> {
        match *self {
            Target::Advance { id, slot } => Some((id, slot)),
            _ => None,
        }
    }

    /// Whether the target awards a final placement
    #[inline]
    pub fn is_rank(&self) -> bool {
        matches!(self, Target::Rank(_))
    }
}

/// Walkover classification used by the collapser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByeState {
    /// Both participants exist
    Full,
    /// Exactly one slot is vacant; `survivor` advances automatically
    SingleBye {
        /// Position of the participant that is present
        survivor: SlotPos,
    },
    /// Neither participant exists
    DoubleBye,
}

/// One match slot in the bracket graph
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct BracketNode {
    id: MatchId,

    /// Distance from the final (final = 0)
    pub depth: u32,

    slots: [Slot; 2],

    /// Destination of the winner
    pub winner: Target,

    /// Destination of the loser
    pub loser: Target,
}

impl BracketNode {
    /// Create a node with two direct seeds and no targets
    pub fn new(id: MatchId, depth: u32, first: Rank, second: Rank) -> Self {
        Self {
            id,
            depth,
            slots: [Slot::Seed(first), Slot::Seed(second)],
            winner: Target::None,
            loser: Target::None,
        }
    }

    /// Create a node from raw slots and targets
    pub fn from_parts(
        id: MatchId,
        depth: u32,
        slots: [Slot; 2],
        winner: Target,
        loser: Target,
    ) -> Self {
        Self {
            id,
            depth,
            slots,
            winner,
            loser,
        }
    }

    /// Match id
    #[inline]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Occupant of a slot
    #[inline]
    pub fn slot(&self, pos: SlotPos) -> Slot {
        self.slots[pos.index()]
    }

    /// Both slots in order
    pub fn slots(&self) -> [Slot; 2] {
        self.slots
    }

    /// Overwrite a slot, returning whether the value changed
    pub fn set_slot(&mut self, pos: SlotPos, slot: Slot) -> bool {
        let current = &mut self.slots[pos.index()];
        if *current == slot {
            return false;
        }
        *current = slot;
        true
    }

    /// Target for the given outcome
    #[inline]
    pub fn target(&self, outcome: Outcome) -> Target {
        match outcome {
            Outcome::Winner => self.winner,
            Outcome::Loser => self.loser,
        }
    }

    /// Send this match's winner to `slot` of `other`
    pub fn link_winner_to(&mut self, other: &mut BracketNode, slot: SlotPos) {
        self.link_to(Outcome::Winner, other, slot);
    }

    /// Send this match's loser to `slot` of `other`
    pub fn link_loser_to(&mut self, other: &mut BracketNode, slot: SlotPos) {
        self.link_to(Outcome::Loser, other, slot);
    }

    /// Link either outcome; sets both ends of the edge
    pub fn link_to(&mut self, outcome: Outcome, other: &mut BracketNode, slot: SlotPos) {
        debug_assert_ne!(self.id, other.id, "a match cannot feed itself");

        let target = Target::Advance { id: other.id, slot };
        match outcome {
            Outcome::Winner => self.winner = target,
            Outcome::Loser => self.loser = target,
        }
        other.slots[slot.index()] = Slot::FromMatch {
            id: self.id,
            outcome,
        };
    }

    /// Classify the match with respect to missing participants
    pub fn bye_state(&self, num_players: u32) -> ByeState {
        let first = self.slots[0].is_vacant(num_players);
        let second = self.slots[1].is_vacant(num_players);

        match (first, second) {
            (false, false) => ByeState::Full,
            (true, true) => ByeState::DoubleBye,
            (true, false) => ByeState::SingleBye {
                survivor: SlotPos::Second,
            },
            (false, true) => ByeState::SingleBye {
                survivor: SlotPos::First,
            },
        }
    }

    /// Both slots will be occupied by a participant or a match result
    pub fn is_playable(&self) -> bool {
        self.slots.iter().all(|slot| *slot != Slot::Unused)
    }

    /// Direct seeds of this node, if both slots are seeds
    pub fn seed_pair(&self) -> Option<(Rank, Rank)> {
        match self.slots {
            [Slot::Seed(a), Slot::Seed(b)] => Some((a, b)),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Seed(rank) => write!(f, "#{}", rank),
            Slot::FromMatch {
                id,
                outcome: Outcome::Winner,
            } => write!(f, "W{}", id),
            Slot::FromMatch {
                id,
                outcome: Outcome::Loser,
            } => write!(f, "L{}", id),
            Slot::Unused => write!(f, "--"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Advance { id, slot } => write!(f, "M{}.{}", id, slot.number()),
            Target::Rank(rank) => write!(f, "rank {}", rank),
            Target::None => write!(f, "-"),
        }
    }
}

impl fmt::Display for BracketNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M{} [depth {}] {} vs {} | winner -> {} | loser -> {}",
            self.id, self.depth, self.slots[0], self.slots[1], self.winner, self.loser
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_sets_both_ends() {
        let mut semi = BracketNode::new(2, 1, 1, 4);
        let mut final_match = BracketNode::new(1, 0, 1, 2);

        semi.link_winner_to(&mut final_match, SlotPos::First);

        assert_eq!(
            semi.winner,
            Target::Advance {
                id: 1,
                slot: SlotPos::First
            }
        );
        assert_eq!(
            final_match.slot(SlotPos::First),
            Slot::FromMatch {
                id: 2,
                outcome: Outcome::Winner
            }
        );
        // Untouched side keeps its seed
        assert_eq!(final_match.slot(SlotPos::Second), Slot::Seed(2));
    }

    #[test]
    fn test_link_loser_only_touches_loser_target() {
        let mut semi = BracketNode::new(3, 1, 2, 3);
        let mut third = BracketNode::new(2, 0, 3, 4);
        semi.winner = Target::Rank(9);

        semi.link_loser_to(&mut third, SlotPos::Second);

        assert_eq!(semi.winner, Target::Rank(9));
        assert_eq!(semi.loser.destination(), Some((2, SlotPos::Second)));
        assert_eq!(third.slot(SlotPos::Second).source(), Some((3, Outcome::Loser)));
    }

    #[test]
    fn test_bye_state() {
        let node = BracketNode::new(1, 2, 3, 6);
        assert_eq!(node.bye_state(6), ByeState::Full);
        assert_eq!(
            node.bye_state(5),
            ByeState::SingleBye {
                survivor: SlotPos::First
            }
        );
        assert_eq!(node.bye_state(2), ByeState::DoubleBye);

        let mut unused = node.clone();
        unused.set_slot(SlotPos::First, Slot::Unused);
        assert_eq!(
            unused.bye_state(6),
            ByeState::SingleBye {
                survivor: SlotPos::Second
            }
        );
        assert!(!unused.is_playable());
    }

    #[test]
    fn test_set_slot_reports_change() {
        let mut node = BracketNode::new(1, 0, 1, 2);
        assert!(!node.set_slot(SlotPos::First, Slot::Seed(1)));
        assert!(node.set_slot(SlotPos::First, Slot::Unused));
        assert!(!node.set_slot(SlotPos::First, Slot::Unused));
    }

    #[test]
    fn test_display() {
        let mut semi = BracketNode::new(3, 1, 1, 4);
        let mut final_match = BracketNode::new(1, 0, 1, 2);
        final_match.winner = Target::Rank(1);
        semi.link_winner_to(&mut final_match, SlotPos::Second);

        assert_eq!(
            final_match.to_string(),
            "M1 [depth 0] #1 vs W3 | winner -> rank 1 | loser -> -"
        );
        assert_eq!(
            semi.to_string(),
            "M3 [depth 1] #1 vs #4 | winner -> M1.2 | loser -> -"
        );
    }
}
