//! Generated bracket

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

use crate::style::BracketStyle;
use crate::tree::{BracketNode, MatchId, Rank, Target};

/// Collapsed bracket: every match and advancement of one tournament
///
/// Nodes are ordered earliest round first, then by id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Bracket {
    style: BracketStyle,
    num_players: u32,
    nodes: Vec<BracketNode>,
}

impl Bracket {
    pub(crate) fn new(style: BracketStyle, num_players: u32, nodes: Vec<BracketNode>) -> Self {
        Self {
            style,
            num_players,
            nodes,
        }
    }

    /// Style the bracket was generated with
    pub fn style(&self) -> BracketStyle {
        self.style
    }

    /// Participant count
    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    /// All matches
    pub fn nodes(&self) -> &[BracketNode] {
        &self.nodes
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// No matches (fewer than two participants)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a match by id
    pub fn node(&self, id: MatchId) -> Option<&BracketNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// The match whose winner takes rank 1
    pub fn final_match(&self) -> Option<&BracketNode> {
        self.nodes.iter().find(|node| node.winner == Target::Rank(1))
    }

    /// Matches grouped by depth, earliest round first
    pub fn rounds(&self) -> Vec<(u32, Vec<&BracketNode>)> {
        let mut by_depth: BTreeMap<u32, Vec<&BracketNode>> = BTreeMap::new();
        for node in &self.nodes {
            by_depth.entry(node.depth).or_default().push(node);
        }
        by_depth.into_iter().rev().collect()
    }

    /// Matches that will actually be played
    pub fn playable_matches(&self) -> impl Iterator<Item = &BracketNode> + '_ {
        self.nodes.iter().filter(|node| node.is_playable())
    }

    /// Every final placement a real participant can receive, ascending
    ///
    /// The loser placement of a kept walkover has no holder and is skipped.
    pub fn assigned_ranks(&self) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = Vec::new();
        for node in &self.nodes {
            if let Target::Rank(rank) = node.winner {
                ranks.push(rank);
            }
            if let Target::Rank(rank) = node.loser {
                if node.is_playable() {
                    ranks.push(rank);
                }
            }
        }
        ranks.sort_unstable();
        ranks
    }

    /// Content hash of the canonical text rendering
    pub fn fingerprint(&self) -> blake3::Hash {
        blake3::hash(self.to_string().as_bytes())
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} bracket: {} participants, {} matches",
            self.style,
            self.num_players,
            self.nodes.len()
        )?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}
