//! Bye collapsing
//!
//! Removes matches whose participants do not exist, until a fixpoint:
//!
//! 1. **Double byes**: both slots vacant. The match never happens; its
//!    destinations receive `Unused` and the node is deleted.
//! 2. **Single byes** (walkovers): the present participant is written into
//!    the winner's destination, the loser's destination becomes `Unused`.
//!    If the participant is itself a placeholder `FromMatch { prev, .. }`,
//!    the edge from `prev` is spliced to point past this node.
//!    A walkover whose winner receives a final rank is kept, otherwise the
//!    placement would be lost.
//!
//! A slot is vacant when it holds a seed above the participant count or is
//! `Unused`, so a bye written in one iteration cascades in the next.

use tracing::{debug, trace};

use crate::arena::NodeArena;
use crate::tree::{BracketNode, ByeState, MatchId, Slot, SlotPos, Target};
use crate::BracketError;

/// Statistics of one collapse run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseReport {
    /// Fixpoint iterations, the final no-change iteration included
    pub iterations: usize,
    /// Nodes deleted
    pub removed: usize,
    /// Direct seeds written into a later match
    pub promotions: usize,
    /// Edges spliced past a deleted walkover
    pub relinked: usize,
    /// Walkovers kept because they award a final rank
    pub kept_terminal: usize,
}

impl CollapseReport {
    /// Whether the run changed anything
    pub fn changed(&self) -> bool {
        self.removed > 0 || self.promotions > 0 || self.relinked > 0
    }
}

/// Fixpoint rewriter for missing participants
#[derive(Debug, Clone, Copy)]
pub struct ByeCollapser {
    num_players: u32,
}

impl ByeCollapser {
    /// Collapser for the real participant count
    pub fn new(num_players: u32) -> Self {
        Self { num_players }
    }

    /// Collapse until no iteration changes the graph
    ///
    /// Returns the surviving nodes ordered earliest round first.
    pub fn collapse(
        &self,
        nodes: Vec<BracketNode>,
    ) -> Result<(Vec<BracketNode>, CollapseReport), BracketError> {
        let mut arena = NodeArena::from_nodes(nodes);
        let mut report = CollapseReport::default();

        loop {
            report.iterations += 1;
            arena.sort_early_rounds_first();

            let double = self.drop_double_byes(&mut arena, &mut report)?;
            let single = self.resolve_walkovers(&mut arena, &mut report)?;

            debug!(
                iteration = report.iterations,
                remaining = arena.len(),
                double_byes_changed = double,
                walkovers_changed = single,
                "bye collapse iteration"
            );

            if !double && !single {
                break;
            }
        }

        report.kept_terminal = arena
            .iter()
            .filter(|node| matches!(node.bye_state(self.num_players), ByeState::SingleBye { .. }))
            .count();

        arena.sort_early_rounds_first();
        Ok((arena.into_nodes(), report))
    }

    /// Pass A: delete matches without any real participant
    fn drop_double_byes(
        &self,
        arena: &mut NodeArena,
        report: &mut CollapseReport,
    ) -> Result<bool, BracketError> {
        let mut changed = false;

        for id in arena.live_ids() {
            let Some(node) = arena.get(id).cloned() else {
                continue;
            };
            if node.bye_state(self.num_players) != ByeState::DoubleBye {
                continue;
            }

            for target in [node.winner, node.loser] {
                if let Some((next, pos)) = target.destination() {
                    arena.set_slot(id, next, pos, Slot::Unused)?;
                }
            }

            trace!(node = %node, "removing double bye");
            arena.remove(id);
            report.removed += 1;
            changed = true;
        }

        Ok(changed)
    }

    /// Pass B: advance the present participant of every walkover
    fn resolve_walkovers(
        &self,
        arena: &mut NodeArena,
        report: &mut CollapseReport,
    ) -> Result<bool, BracketError> {
        let mut changed = false;

        for id in arena.live_ids() {
            // Removed earlier in this pass
            let Some(node) = arena.get(id).cloned() else {
                continue;
            };
            let ByeState::SingleBye { survivor } = node.bye_state(self.num_players) else {
                continue;
            };
            let survivor = node.slot(survivor);

            if let Some((next, pos)) = node.winner.destination() {
                changed |= self.promote(arena, report, id, survivor, next, pos)?;
            }

            // No real loser exists
            if let Some((next, pos)) = node.loser.destination() {
                changed |= arena.set_slot(id, next, pos, Slot::Unused)?;
            }

            if let Target::Rank(rank) = node.winner {
                // Its loser slot downstream was just cleared
                if node.loser.destination().is_some() {
                    if let Some(kept) = arena.get_mut(id) {
                        kept.loser = Target::None;
                    }
                    changed = true;
                }
                trace!(node = %node, rank, "keeping walkover for final rank");
                continue;
            }

            trace!(node = %node, "removing walkover");
            arena.remove(id);
            report.removed += 1;
            changed = true;
        }

        Ok(changed)
    }

    /// Move `survivor` of walkover `id` into `next`/`pos`
    fn promote(
        &self,
        arena: &mut NodeArena,
        report: &mut CollapseReport,
        id: MatchId,
        survivor: Slot,
        next: MatchId,
        pos: SlotPos,
    ) -> Result<bool, BracketError> {
        match survivor {
            Slot::FromMatch { id: prev, outcome } => {
                // Splice prev -> next, skipping this node
                arena.link(id, prev, outcome, next, pos)?;
                trace!(from = prev, via = id, to = next, "relinked edge past walkover");
                report.relinked += 1;
                Ok(true)
            }
            Slot::Seed(_) | Slot::Unused => {
                let changed = arena.set_slot(id, next, pos, survivor)?;
                if changed {
                    report.promotions += 1;
                }
                Ok(changed)
            }
        }
    }
}
