//! Tree traversals.
//!
//! All traversals are iterative, so deeply nested parses cannot overflow the
//! call stack. Each visitor receives the node id alongside the node.

use super::{Node, NodeId, Tree};

impl Tree {
    /// Post-order walk: children left to right, each subtree completely
    /// before its parent. The root is visited last.
    pub fn visit_depth_first<F>(&self, visitor: F)
    where
        F: FnMut(NodeId, &Node),
    {
        self.post_order(false, visitor)
    }

    /// Post-order walk with children visited right to left.
    pub fn visit_depth_first_right<F>(&self, visitor: F)
    where
        F: FnMut(NodeId, &Node),
    {
        self.post_order(true, visitor)
    }

    /// Childless nodes only, left to right.
    pub fn visit_leaves<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &Node),
    {
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            let node = self.node(id);
            if node.is_leaf() {
                visitor(id, node);
            } else {
                pending.extend(node.children.iter().rev().copied());
            }
        }
    }

    fn post_order<F>(&self, right_to_left: bool, mut visitor: F)
    where
        F: FnMut(NodeId, &Node),
    {
        // (node, children already scheduled)
        let mut pending = vec![(self.root, false)];
        while let Some((id, expanded)) = pending.pop() {
            let node = self.node(id);
            if expanded || node.is_leaf() {
                visitor(id, node);
                continue;
            }
            pending.push((id, true));
            if right_to_left {
                pending.extend(node.children.iter().map(|child| (*child, false)));
            } else {
                pending.extend(node.children.iter().rev().map(|child| (*child, false)));
            }
        }
    }
}
