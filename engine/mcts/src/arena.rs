//! Fixed-capacity node arena.
//!
//! All nodes of a search live in one preallocated `Vec`. Allocation is a bump
//! of `used`; nothing is freed individually, and `reset` reclaims everything
//! at the start of the next decision. Each expansion takes one contiguous
//! block, so a node addresses its children as `(first_child, num_children)`.

use engine_core::{Color, Move, Position};

use crate::node::{MctsNode, NodeId};

/// MCTS tree stored in a bump-allocated arena.
#[derive(Debug, Clone)]
pub struct NodeArena {
    /// Every slot, allocated or not. `nodes.len()` is the capacity.
    nodes: Vec<MctsNode>,

    /// Next free slot
    used: usize,
}

impl NodeArena {
    /// Capacity needed for `planned_iterations` expansions of at most
    /// `max_branching` children each, plus the root.
    pub fn capacity_for(planned_iterations: u32, max_branching: usize) -> usize {
        1 + planned_iterations as usize * max_branching
    }

    /// Preallocate `capacity` slots. The root slot is initialized with a
    /// placeholder move until the first `reset`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 1, "node arena needs room for the root");
        Self {
            nodes: vec![MctsNode::vacant(); capacity],
            used: 1,
        }
    }

    /// Forget the previous tree and make slot 0 a fresh root for `root_move`.
    pub fn reset(&mut self, root_move: Move) {
        self.used = 1;
        self.nodes[0].reset(root_move);
    }

    /// Hand out `n` contiguous, freshly initialized slots.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit in the remaining capacity.
    pub fn allocate_block(&mut self, n: usize) -> NodeId {
        assert!(
            self.used + n <= self.nodes.len(),
            "node arena exhausted: {} used + {} requested > capacity {}",
            self.used,
            n,
            self.nodes.len()
        );

        let start = self.used;
        for slot in &mut self.nodes[start..start + n] {
            *slot = MctsNode::vacant();
        }
        self.used += n;
        NodeId(start as u32)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        debug_assert!(id.index() < self.used, "node {} not allocated", id.0);
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        debug_assert!(id.index() < self.used, "node {} not allocated", id.0);
        &mut self.nodes[id.index()]
    }

    /// Children of `id` as a slice of the arena.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[MctsNode] {
        &self.nodes[self.get(id).child_range()]
    }

    /// Ids of the children of `id`, in allocation order.
    pub fn child_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        self.get(id).child_range().map(|slot| NodeId(slot as u32))
    }

    /// Slots handed out so far, including the root.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.nodes.len() - self.used
    }

    /// Q assumed for an unvisited child of `parent`.
    ///
    /// Averages the values of the siblings that have already been expanded,
    /// with one extra pessimistic -1 in both sum and count. Expanded but
    /// unvisited siblings count as -1. With no expanded siblings this is -1.
    pub fn init_q_value(&self, parent: NodeId) -> f32 {
        let (sum, count) = self
            .children(parent)
            .iter()
            .filter(|child| child.has_children())
            .fold((0.0f32, 0u32), |(sum, count), child| {
                (sum + child.q_value(-1.0), count + 1)
            });

        (sum - 1.0) / (count as f32 + 1.0)
    }

    /// Select the child of `parent` with the highest UCT score.
    ///
    /// Ties keep the earliest child. Returns `None` for unexpanded nodes.
    pub fn select_child(&self, parent: NodeId, exploration: f32) -> Option<NodeId> {
        let node = self.get(parent);
        if !node.has_children() {
            return None;
        }

        // Pre-compute once instead of per-child comparison
        let ln_visits = (node.visit_count as f32).ln();
        let init_q = self.init_q_value(parent);

        let mut best = node.first_child;
        let mut best_score = f32::NEG_INFINITY;
        for id in self.child_ids(parent) {
            let score = self.get(id).move_score(ln_visits, init_q, exploration);
            if score > best_score {
                best = id;
                best_score = score;
            }
        }
        Some(best)
    }

    /// Attach one child per candidate position to `leaf`, each colored `color`.
    ///
    /// Does nothing when there are no candidates. Returns the number of
    /// children created.
    pub fn expand(&mut self, leaf: NodeId, color: Color, candidates: &[Position]) -> usize {
        if candidates.is_empty() {
            return 0;
        }
        debug_assert!(!self.get(leaf).has_children(), "node {} expanded twice", leaf.0);

        let first = self.allocate_block(candidates.len());
        for (offset, &position) in candidates.iter().enumerate() {
            self.nodes[first.index() + offset].mv = Move::new(position, color);
        }

        let node = self.get_mut(leaf);
        node.first_child = first;
        node.num_children = candidates.len() as u32;
        candidates.len()
    }

    /// Propagate `value` from the last node of `path` up to its first.
    ///
    /// The value is flipped (`1 - v`) at each step because consecutive nodes
    /// belong to opposite players.
    pub fn backpropagate(&mut self, path: &[NodeId], value: f32) {
        let mut value = value;
        for &id in path.iter().rev() {
            self.get_mut(id).update(value);
            value = 1.0 - value;
        }
    }

    /// Most visited child of the root.
    ///
    /// Only visited children qualify; ties keep the earliest child.
    pub fn best_child(&self) -> Option<NodeId> {
        let mut best = None;
        let mut best_visits = 0;
        for id in self.child_ids(NodeId::ROOT) {
            let visits = self.get(id).visit_count;
            if visits > best_visits {
                best = Some(id);
                best_visits = visits;
            }
        }
        best
    }

    /// Visit fraction of each root child, indexed by position.
    ///
    /// Returns all zeros when no root child has been visited.
    pub fn root_policy(&self, action_space: usize) -> Vec<f32> {
        let mut policy = vec![0.0; action_space];
        let children = self.children(NodeId::ROOT);
        let total: u32 = children.iter().map(|child| child.visit_count).sum();
        if total == 0 {
            return policy;
        }

        for child in children {
            if let Some(slot) = policy.get_mut(child.mv.position.index()) {
                *slot = child.visit_count as f32 / total as f32;
            }
        }
        policy
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(NodeId::ROOT);
        TreeStats {
            nodes_used: self.used,
            capacity: self.capacity(),
            root_visits: root.visit_count,
            root_value: root.mean_value,
            max_depth: self.compute_max_depth(NodeId::ROOT, 0),
        }
    }

    fn compute_max_depth(&self, id: NodeId, current_depth: u32) -> u32 {
        self.child_ids(id)
            .map(|child| self.compute_max_depth(child, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub nodes_used: usize,
    pub capacity: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}
