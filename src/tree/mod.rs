//! Constituency trees reconstructed from bracketed notation.
//!
//! ```text
//! (ROOT (S (NP (NNP John)) (VP (VBZ runs))))
//!
//!   ROOT
//!    ╰S
//!     ├NP
//!     │ ╰NNP John      <- leaf 0, bound to token 0
//!     ╰VP
//!       ╰VBZ runs      <- leaf 1, bound to token 1
//! ```
//!
//! Nodes live in an arena owned by the [`Tree`] and refer to each other by
//! [`NodeId`]. Parent links are only recorded when the tree is parsed with
//! double-linking enabled.

mod display;
mod parser;
mod visit;

pub use parser::TreeParser;

use std::str::FromStr;

use crate::error::TreeError;
use crate::reference::{ParseLabelInfo, PosInfo, TagReference};

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node: a phrase label with children, or a tag with a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) word: Option<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    /// Index of the sentence token bound to this leaf
    pub(crate) token: Option<usize>,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            tag: String::new(),
            word: None,
            children: Vec::new(),
            parent,
            token: None,
        }
    }

    /// Part-of-speech tag for leaves, phrase label for internal nodes.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Only populated on double-linked trees.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Index (0-based) of the token bound to this leaf, if bound.
    pub fn token(&self) -> Option<usize> {
        self.token
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Documentary information about a node's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInfo<'r> {
    Pos(&'r PosInfo),
    Phrase(&'r ParseLabelInfo),
}

/// A constituency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Tree {
    /// Parse bracketed notation without parent links.
    pub fn parse(notation: &str) -> Result<Self, TreeError> {
        TreeParser::new().parse(notation)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        self.node(self.root)
    }

    /// Access a node by id.
    ///
    /// Ids are only meaningful for the tree that produced them; an id from
    /// another tree may panic.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id).children.iter().map(move |child| self.node(*child))
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|parent| self.node(parent))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf ids, left to right.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.visit_leaves(|id, _| leaves.push(id));
        leaves
    }

    /// Bind the i-th leaf (left to right) to token index i.
    ///
    /// Binding is positional only. When the leaf count differs from
    /// `token_count` nothing is bound and an error is returned.
    pub fn bind_tokens(&mut self, token_count: usize) -> Result<(), TreeError> {
        let leaves = self.leaves();
        if leaves.len() != token_count {
            return Err(TreeError::LeafTokenMismatch {
                leaves: leaves.len(),
                tokens: token_count,
            });
        }
        for (token, leaf) in leaves.into_iter().enumerate() {
            self.nodes[leaf.0].token = Some(token);
        }
        Ok(())
    }

    /// Gloss for a node: POS info for leaves, phrase-label info otherwise.
    pub fn node_info<'r, R: TagReference>(
        &self,
        id: NodeId,
        reference: &'r R,
        language: &str,
    ) -> Option<NodeInfo<'r>> {
        let node = self.node(id);
        if node.is_leaf() {
            reference.pos_info(&node.tag, language).map(NodeInfo::Pos)
        } else {
            reference
                .parse_label_info(&node.tag, language)
                .map(NodeInfo::Phrase)
        }
    }
}

impl FromStr for Tree {
    type Err = TreeError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        Tree::parse(notation)
    }
}
