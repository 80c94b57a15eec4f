//! Node arena for graph rewriting
//!
//! Nodes are addressed by their stable match id, never by position.
//! Deletion only clears a liveness bit; storage is compacted between
//! collapse iterations, so ids held by other nodes stay valid while a
//! pass is running.

use std::collections::HashMap;

use bitvec::prelude::*;

use crate::tree::{BracketNode, MatchId, Outcome, Slot, SlotPos};
use crate::BracketError;

/// Arena of bracket nodes with tombstoned deletion
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<BracketNode>,

    /// Liveness bit per storage position
    live: BitVec,

    /// Match id -> storage position
    index: HashMap<MatchId, usize>,
}

impl NodeArena {
    /// Take ownership of a node set
    pub fn from_nodes(nodes: Vec<BracketNode>) -> Self {
        let live = bitvec![1; nodes.len()];
        let mut arena = Self {
            nodes,
            live,
            index: HashMap::new(),
        };
        arena.reindex();
        arena
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.id(), pos))
            .collect();
    }

    fn position(&self, id: MatchId) -> Option<usize> {
        self.index.get(&id).copied().filter(|&pos| self.live[pos])
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live.count_ones()
    }

    /// No live nodes
    pub fn is_empty(&self) -> bool {
        self.live.not_any()
    }

    /// Number of tombstoned nodes awaiting compaction
    pub fn pending_removals(&self) -> usize {
        self.live.count_zeros()
    }

    /// Whether a live node with this id exists
    pub fn contains(&self, id: MatchId) -> bool {
        self.position(id).is_some()
    }

    /// Live node by id
    pub fn get(&self, id: MatchId) -> Option<&BracketNode> {
        self.position(id).map(|pos| &self.nodes[pos])
    }

    /// Live node by id, mutable
    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut BracketNode> {
        let pos = self.position(id)?;
        Some(&mut self.nodes[pos])
    }

    /// Live node by id, or a dangling-reference error raised on behalf of `referrer`
    pub fn require(&self, referrer: MatchId, id: MatchId) -> Result<&BracketNode, BracketError> {
        self.get(id).ok_or(BracketError::DanglingMatchReference {
            node: referrer,
            missing: id,
        })
    }

    /// Two distinct live nodes, both mutable
    pub fn pair_mut(
        &mut self,
        a: MatchId,
        b: MatchId,
    ) -> Option<(&mut BracketNode, &mut BracketNode)> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        if pa == pb {
            return None;
        }

        if pa < pb {
            let (head, tail) = self.nodes.split_at_mut(pb);
            Some((&mut head[pa], &mut tail[0]))
        } else {
            let (head, tail) = self.nodes.split_at_mut(pa);
            Some((&mut tail[0], &mut head[pb]))
        }
    }

    /// Overwrite a slot of a live node; returns whether the value changed
    pub fn set_slot(
        &mut self,
        referrer: MatchId,
        id: MatchId,
        pos: SlotPos,
        slot: Slot,
    ) -> Result<bool, BracketError> {
        let node = self
            .get_mut(id)
            .ok_or(BracketError::DanglingMatchReference {
                node: referrer,
                missing: id,
            })?;
        Ok(node.set_slot(pos, slot))
    }

    /// Link `outcome` of `source` to `slot` of `target` (both ends of the edge)
    pub fn link(
        &mut self,
        referrer: MatchId,
        source: MatchId,
        outcome: Outcome,
        target: MatchId,
        slot: SlotPos,
    ) -> Result<(), BracketError> {
        for id in [source, target] {
            if !self.contains(id) {
                return Err(BracketError::DanglingMatchReference {
                    node: referrer,
                    missing: id,
                });
            }
        }
        let (src, dst) = self
            .pair_mut(source, target)
            .ok_or(BracketError::DanglingMatchReference {
                node: referrer,
                missing: target,
            })?;
        src.link_to(outcome, dst, slot);
        Ok(())
    }

    /// Tombstone a node; returns false if it was not live
    pub fn remove(&mut self, id: MatchId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.live.set(pos, false);
                true
            }
            None => false,
        }
    }

    /// Ids of live nodes in storage order
    pub fn live_ids(&self) -> Vec<MatchId> {
        self.live
            .iter_ones()
            .map(|pos| self.nodes[pos].id())
            .collect()
    }

    /// Iterate live nodes in storage order
    pub fn iter(&self) -> impl Iterator<Item = &BracketNode> + '_ {
        self.live.iter_ones().map(move |pos| &self.nodes[pos])
    }

    /// Drop tombstoned nodes; returns how many were dropped
    pub fn compact(&mut self) -> usize {
        let dropped = self.pending_removals();
        if dropped == 0 {
            return 0;
        }

        let live = std::mem::take(&mut self.live);
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .zip(live.iter().by_vals())
            .filter_map(|(node, alive)| alive.then_some(node))
            .collect();
        self.live = bitvec![1; self.nodes.len()];
        self.reindex();
        dropped
    }

    /// Compact, then order earliest rounds first (depth descending, id ascending)
    pub fn sort_early_rounds_first(&mut self) {
        self.compact();
        self.nodes
            .sort_by(|a, b| b.depth.cmp(&a.depth).then(a.id().cmp(&b.id())));
        self.reindex();
    }

    /// Compacted nodes in current order
    pub fn into_nodes(mut self) -> Vec<BracketNode> {
        self.compact();
        self.nodes
    }
}
