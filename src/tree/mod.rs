//! Bracket graph model and full-tree construction
//!
//! The bracket is a DAG of matches. Each node knows where its winner and
//! loser go; each slot knows which match (or seed) fills it.
//! The builder produces the complete power-of-two tree; byes are removed
//! afterwards by the collapser.

mod builder;
mod ids;
mod node;

pub use builder::{BracketTree, BracketTreeBuilder};
pub use ids::MatchIdGenerator;
pub use node::{BracketNode, ByeState, MatchId, Outcome, Rank, Slot, SlotPos, Target};
