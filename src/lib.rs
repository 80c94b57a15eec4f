//! # Elimination Bracket Topology
//!
//! This library generates the match graph of an elimination tournament:
//! who plays whom, where winners and losers advance, and which final
//! placements each match awards.
//!
//! ## Core Algorithm
//!
//! 1. **Doubling construction**: Start from the final (1 vs 2) and split every
//!    match of the latest round into two, pairing seeds `r` and `n + 1 - r`,
//!    until the bracket holds the next power of two ≥ participants
//! 2. **Third place**: Semifinal losers are routed into a match for ranks 3/4
//! 3. **Bye collapsing**: Matches against non-existent seeds are removed in a
//!    fixpoint loop; present participants are promoted and edges re-linked
//!    without ever dropping a final placement
//!
//! ## Usage Example
//!
//! ```
//! use bracketsmith::{BracketGenerator, BracketStyle, GeneratorConfig};
//!
//! let generator = BracketGenerator::new(GeneratorConfig::default());
//! let bracket = generator.generate(5).unwrap();
//! assert_eq!(bracket.playable_matches().count(), 5);
//! assert_eq!(bracket.style(), BracketStyle::SingleElimination);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements a key component of the algorithm
pub mod tree;       // Node model and full-tree construction
pub mod arena;      // Id-addressed node storage for rewriting
pub mod collapse;   // Fixpoint bye collapsing
pub mod style;      // Bracket styles and the 16-slot template
pub mod invariants; // Structural checks

mod bracket;

// Re-exports for convenience
pub use bracket::Bracket;
pub use collapse::{ByeCollapser, CollapseReport};
pub use invariants::InvariantViolation;
pub use style::BracketStyle;
pub use tree::{
    BracketNode, BracketTree, BracketTreeBuilder, MatchId, MatchIdGenerator, Outcome, Rank, Slot,
    SlotPos, Target,
};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur during bracket generation
#[derive(Error, Debug)]
pub enum BracketError {
    /// Style name not recognised
    #[error("unsupported bracket style: {0}")]
    UnsupportedBracketStyle(String),

    /// Participant count exceeds what the style can seat
    #[error("{style} supports at most {max} participants, got {requested}")]
    TooManyParticipants {
        /// Requested style
        style: BracketStyle,
        /// Style limit
        max: u32,
        /// Requested participant count
        requested: u32,
    },

    /// Rewriting needed a match that no longer exists
    #[error("match {node} refers to match {missing}, which is not in the bracket")]
    DanglingMatchReference {
        /// Match whose processing failed
        node: MatchId,
        /// Absent match
        missing: MatchId,
    },

    /// Generated bracket failed verification
    #[error("bracket invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Number of rounds for a single-elimination bracket
///
/// Counts doublings of 2 until the participant count is reached, so power
/// of two boundaries are exact. `None` for fewer than two participants.
pub fn round_count(num_players: u32) -> Option<u32> {
    if num_players < 2 {
        return None;
    }

    let mut rounds = 1;
    let mut size: u64 = 2;
    while size < u64::from(num_players) {
        size *= 2;
        rounds += 1;
    }
    Some(rounds)
}

/// Configuration parameters for generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Layout to generate
    pub style: BracketStyle,

    /// Run structural checks on every generated bracket
    pub verify: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            style: BracketStyle::default(),
            verify: cfg!(debug_assertions),
        }
    }
}

impl GeneratorConfig {
    /// Select the bracket style
    pub fn with_style(mut self, style: BracketStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable verification
    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }
}

/// Bracket generation orchestrator
///
/// Stateless between calls: every run owns a fresh id generator, so one
/// generator can be shared across threads.
#[derive(Debug, Clone)]
pub struct BracketGenerator {
    config: GeneratorConfig,
}

impl BracketGenerator {
    /// Create new generator
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generator for a style with default settings
    pub fn for_style(style: BracketStyle) -> Self {
        Self::new(GeneratorConfig::default().with_style(style))
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Rounds of the configured style for `num_players`
    pub fn round_count(&self, num_players: u32) -> Option<u32> {
        self.config.style.round_count(num_players)
    }

    /// Generate the bracket for `num_players` participants
    ///
    /// Fewer than two participants yield an empty bracket.
    pub fn generate(&self, num_players: u32) -> Result<Bracket, BracketError> {
        let style = self.config.style;
        if num_players < 2 {
            debug!(num_players, %style, "no bracket possible");
            return Ok(Bracket::new(style, num_players, Vec::new()));
        }

        if let Some(max) = style.max_participants() {
            if num_players > max {
                return Err(BracketError::TooManyParticipants {
                    style,
                    max,
                    requested: num_players,
                });
            }
        }

        let full = self.full_tree(num_players);
        let (nodes, report) = ByeCollapser::new(num_players).collapse(full)?;

        debug!(
            num_players,
            %style,
            matches = nodes.len(),
            iterations = report.iterations,
            removed = report.removed,
            relinked = report.relinked,
            "generated bracket"
        );

        if self.config.verify {
            invariants::check_links(&nodes)?;
            invariants::check_no_phantoms(&nodes, num_players)?;
            invariants::check_final_ranks(&nodes)?;
            if style == BracketStyle::SingleElimination {
                invariants::check_seed_balance(&nodes)?;
            }
        }

        Ok(Bracket::new(style, num_players, nodes))
    }

    /// Uncollapsed node set of the configured style
    fn full_tree(&self, num_players: u32) -> Vec<BracketNode> {
        let mut ids = MatchIdGenerator::new();
        match self.config.style {
            BracketStyle::SingleElimination => {
                BracketTreeBuilder::new(num_players).build(&mut ids).nodes
            }
            BracketStyle::FixedSeededTemplate16 => style::template_nodes(&mut ids),
        }
    }
}
