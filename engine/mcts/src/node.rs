//! MCTS tree node representation.
//!
//! Each node represents a move played from its parent's position. Nodes store
//! visit statistics used for UCT selection and a reference to their children,
//! which always occupy one contiguous block of the arena.

use std::ops::Range;

use engine_core::{Color, Move};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root always lives in slot 0.
    pub const ROOT: NodeId = NodeId(0);
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Prior assigned at expansion; nothing consumes it yet.
pub const UNSET_PRIOR: f32 = -1.0;

/// A node in the MCTS tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsNode {
    /// Move that led to this node, colored by the player who made it.
    /// The root carries a sentinel move.
    pub mv: Move,

    /// Start of the contiguous child block (NONE until expanded)
    pub first_child: NodeId,

    /// Number of children in the block (0 = leaf)
    pub num_children: u32,

    /// Number of backpropagation passes through this node
    pub visit_count: u32,

    /// Running mean of backpropagated values, in [0, 1]
    pub mean_value: f32,

    pub prior: f32,
}

impl MctsNode {
    /// Create an unvisited, unexpanded node for `mv`.
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            first_child: NodeId::NONE,
            num_children: 0,
            visit_count: 0,
            mean_value: 0.0,
            prior: UNSET_PRIOR,
        }
    }

    /// Slot contents before a node is handed out by the arena.
    pub(crate) fn vacant() -> Self {
        Self::new(Move::sentinel(Color::Black))
    }

    /// Reinitialize in place, dropping statistics and children.
    pub fn reset(&mut self, mv: Move) {
        *self = Self::new(mv);
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.num_children > 0
    }

    /// Arena slots of the child block.
    #[inline]
    pub fn child_range(&self) -> Range<usize> {
        if !self.has_children() {
            return 0..0;
        }
        let start = self.first_child.index();
        start..start + self.num_children as usize
    }

    /// Mean value if visited, otherwise `unvisited`.
    #[inline]
    pub fn q_value(&self, unvisited: f32) -> f32 {
        if self.visit_count > 0 {
            self.mean_value
        } else {
            unvisited
        }
    }

    /// UCT score as seen from the parent.
    ///
    /// `score = Q + c * sqrt(ln(N) / (1 + n))`
    ///
    /// Takes a pre-computed `ln(N)` of the parent's visit count to avoid
    /// redundant logarithms when comparing siblings. Unvisited nodes use the
    /// parent's `init_q` as their Q.
    #[inline]
    pub fn move_score(&self, ln_parent_visits: f32, init_q: f32, exploration: f32) -> f32 {
        let q = self.q_value(init_q);
        let u = exploration * (ln_parent_visits / (1.0 + self.visit_count as f32)).sqrt();
        q + u
    }

    /// Fold one observed value into the running mean.
    #[inline]
    pub fn update(&mut self, value: f32) {
        let n = self.visit_count as f32;
        self.mean_value = (self.mean_value * n + value) / (n + 1.0);
        self.visit_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Position;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId::ROOT.is_none());
        assert!(NodeId(7).is_some());
        assert_eq!(NodeId(7).index(), 7);
    }

    #[test]
    fn test_new_node() {
        let mv = Move::new(Position(4), Color::White);
        let node = MctsNode::new(mv);

        assert_eq!(node.mv, mv);
        assert_eq!(node.visit_count, 0);
        assert!(!node.has_children());
        assert!(node.first_child.is_none());
        assert!((node.prior - UNSET_PRIOR).abs() < 1e-6);
        assert_eq!(node.child_range(), 0..0);
    }

    #[test]
    fn test_reset_clears_statistics() {
        let mut node = MctsNode::new(Move::new(Position(1), Color::Black));
        node.update(1.0);
        node.first_child = NodeId(3);
        node.num_children = 2;

        let root_move = Move::sentinel(Color::White);
        node.reset(root_move);
        assert_eq!(node, MctsNode::new(root_move));
    }

    #[test]
    fn test_q_value() {
        let mut node = MctsNode::vacant();

        // Unvisited
        assert!((node.q_value(-1.0) - (-1.0)).abs() < 1e-6);

        node.update(0.75);
        assert!((node.q_value(-1.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_update_running_mean() {
        let mut node = MctsNode::vacant();
        for value in [1.0, 0.0, 1.0, 1.0] {
            node.update(value);
        }

        assert_eq!(node.visit_count, 4);
        assert!((node.mean_value - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_move_score() {
        let mut node = MctsNode::vacant();
        node.visit_count = 3;
        node.mean_value = 0.25;

        // 0.25 + 1.5 * sqrt(ln(10) / 4) ≈ 0.25 + 1.1381
        let ln_n = 10f32.ln();
        let score = node.move_score(ln_n, -1.0, 1.5);
        assert!((score - 1.3881).abs() < 1e-3);
    }

    #[test]
    fn test_move_score_unvisited_uses_init_q() {
        let node = MctsNode::vacant();

        // -0.5 + 1.5 * sqrt(ln(e) / 1)
        let score = node.move_score(1.0, -0.5, 1.5);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_child_range() {
        let mut node = MctsNode::vacant();
        node.first_child = NodeId(5);
        node.num_children = 3;

        assert!(node.has_children());
        assert_eq!(node.child_range(), 5..8);
    }
}
