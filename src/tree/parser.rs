//! Single-pass parser for bracketed tree notation.
//!
//! The scan keeps a stack of open groups. `(` opens a child of the group on
//! top of the stack, `)` finalizes and pops the top group, and any other
//! character is appended to the top group's raw text. When a group is
//! finalized its trimmed text is split on the first space: the left part is
//! the tag, the right part (if any) the word. Groups that own children keep
//! only the text seen before their first child, and never carry a word.
//!
//! There is no escape mechanism: a literal `(` or `)` inside a word breaks
//! the notation.

use tracing::trace;

use super::{Node, NodeId, Tree};
use crate::error::TreeError;

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeParser {
    double_link: bool,
}

struct OpenGroup {
    node: NodeId,
    raw: String,
    /// Raw text seen before the first child, once a child exists
    head: Option<String>,
}

impl TreeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record each node's parent while building.
    pub fn with_double_link(mut self, double_link: bool) -> Self {
        self.double_link = double_link;
        self
    }

    pub fn parse(&self, notation: &str) -> Result<Tree, TreeError> {
        if notation.trim().is_empty() {
            return Err(TreeError::Empty);
        }

        let mut nodes: Vec<Node> = Vec::new();
        let mut top_level: Vec<NodeId> = Vec::new();
        let mut stack: Vec<OpenGroup> = Vec::new();

        for (position, ch) in notation.char_indices() {
            match ch {
                '(' => {
                    let id = NodeId(nodes.len());
                    let parent = match stack.last_mut() {
                        Some(group) => {
                            if group.head.is_none() {
                                group.head = Some(std::mem::take(&mut group.raw));
                            }
                            nodes[group.node.0].children.push(id);
                            Some(group.node)
                        }
                        None => {
                            top_level.push(id);
                            None
                        }
                    };
                    nodes.push(Node::new(if self.double_link { parent } else { None }));
                    stack.push(OpenGroup {
                        node: id,
                        raw: String::new(),
                        head: None,
                    });
                }
                ')' => {
                    let group = stack
                        .pop()
                        .ok_or(TreeError::UnbalancedClose { position })?;
                    finalize(&mut nodes[group.node.0], group);
                }
                other => match stack.last_mut() {
                    Some(group) => group.raw.push(other),
                    None if other.is_whitespace() => {}
                    None => return Err(TreeError::StrayText { position }),
                },
            }
        }

        if !stack.is_empty() {
            return Err(TreeError::Unclosed { open: stack.len() });
        }

        let root = match top_level.as_slice() {
            [] => return Err(TreeError::Empty),
            [root] => *root,
            _ => {
                return Err(TreeError::MultipleRoots {
                    count: top_level.len(),
                })
            }
        };

        trace!(nodes = nodes.len(), "parsed constituency tree");

        Ok(Tree { nodes, root })
    }
}

fn finalize(node: &mut Node, group: OpenGroup) {
    match group.head {
        Some(head) => {
            let head = head.trim();
            node.tag = match head.split_once(' ') {
                Some((tag, _)) => tag.to_string(),
                None => head.to_string(),
            };
        }
        None => {
            let raw = group.raw.trim();
            match raw.split_once(' ') {
                Some((tag, word)) => {
                    node.tag = tag.to_string();
                    let word = word.trim_start();
                    if !word.is_empty() {
                        node.word = Some(word.to_string());
                    }
                }
                None => node.tag = raw.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(notation: &str) -> Tree {
        TreeParser::new().parse(notation).unwrap()
    }

    #[test]
    fn test_single_leaf() {
        let tree = parse("(NNP John)");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().tag(), "NNP");
        assert_eq!(tree.root_node().word(), Some("John"));
    }

    #[test]
    fn test_leaf_without_word() {
        let tree = parse("(-NONE-)");
        assert_eq!(tree.root_node().tag(), "-NONE-");
        assert_eq!(tree.root_node().word(), None);
        assert!(tree.root_node().is_leaf());
    }

    #[test]
    fn test_multiline_engine_output() {
        let notation = "(ROOT\n  (S\n    (NP (NNP John))\n    (VP (VBZ runs))\n    (. .)))";
        let tree = parse(notation);

        assert_eq!(tree.root_node().tag(), "ROOT");
        let s = tree.root_node().children()[0];
        assert_eq!(tree.node(s).tag(), "S");
        assert_eq!(tree.node(s).children().len(), 3);

        let words: Vec<&str> = tree
            .leaves()
            .into_iter()
            .filter_map(|leaf| tree.node(leaf).word())
            .collect();
        assert_eq!(words, vec!["John", "runs", "."]);
    }

    #[test]
    fn test_spaced_notation() {
        let tree = parse("( TAG ( TAG2 word2 ) ( TAG3 ( TAG4 word4 ) ) )");
        assert_eq!(tree.root_node().tag(), "TAG");
        let tags: Vec<&str> = tree.children(tree.root()).map(Node::tag).collect();
        assert_eq!(tags, vec!["TAG2", "TAG3"]);
        let leaf = tree.leaves()[1];
        assert_eq!(tree.node(leaf).tag(), "TAG4");
        assert_eq!(tree.node(leaf).word(), Some("word4"));
    }

    #[test]
    fn test_empty_root_label() {
        // Penn Treebank files wrap sentences in an unlabeled group
        let tree = parse("( (S (NN cat)))");
        assert_eq!(tree.root_node().tag(), "");
        assert_eq!(tree.node(tree.root_node().children()[0]).tag(), "S");
    }

    #[test]
    fn test_multi_word_leaf() {
        let tree = parse("(NP (NNP New York))");
        let leaf = tree.leaves()[0];
        assert_eq!(tree.node(leaf).word(), Some("New York"));
    }

    #[test]
    fn test_internal_node_has_no_word() {
        // Text after the label of an internal node is not a word
        let tree = parse("(NP stray (NN cat) tail)");
        assert_eq!(tree.root_node().tag(), "NP");
        assert_eq!(tree.root_node().word(), None);
        assert_eq!(tree.root_node().children().len(), 1);
    }

    #[test]
    fn test_parent_links_only_when_requested() {
        let plain = parse("(S (NN cat))");
        let leaf = plain.leaves()[0];
        assert_eq!(plain.node(leaf).parent(), None);

        let linked = TreeParser::new()
            .with_double_link(true)
            .parse("(S (NP (NN cat)) (VP (VBZ sleeps)))")
            .unwrap();
        assert_eq!(linked.root_node().parent(), None);
        for leaf in linked.leaves() {
            let parent = linked.node(leaf).parent().unwrap();
            let grandparent = linked.node(parent).parent().unwrap();
            assert_eq!(grandparent, linked.root());
            assert!(linked.node(parent).children().contains(&leaf));
        }
        assert_eq!(linked.parent(linked.leaves()[1]).unwrap().tag(), "VP");
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 500;
        let notation = format!("{}(NN x){}", "(X ".repeat(depth), ")".repeat(depth));
        let tree = parse(&notation);
        assert_eq!(tree.len(), depth + 1);
        assert_eq!(tree.leaves().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(TreeParser::new().parse(""), Err(TreeError::Empty));
        assert_eq!(TreeParser::new().parse("  \n "), Err(TreeError::Empty));
    }

    #[test]
    fn test_unbalanced_close() {
        assert_eq!(
            TreeParser::new().parse("(NN cat))"),
            Err(TreeError::UnbalancedClose { position: 8 })
        );
    }

    #[test]
    fn test_unclosed() {
        assert_eq!(
            TreeParser::new().parse("(S (NP (NN cat)"),
            Err(TreeError::Unclosed { open: 2 })
        );
    }

    #[test]
    fn test_multiple_roots() {
        assert_eq!(
            TreeParser::new().parse("(NN cat) (NN dog)"),
            Err(TreeError::MultipleRoots { count: 2 })
        );
    }

    #[test]
    fn test_stray_text() {
        assert_eq!(
            TreeParser::new().parse("cat (NN cat)"),
            Err(TreeError::StrayText { position: 0 })
        );
    }
}
