use std::fmt::{self, Write};

use serde_json::Value;

use super::{Node, NodeId, Tree};

/// An open node while rendering: its id, its depth and the next child to
/// visit.
struct Frame {
    id: NodeId,
    depth: usize,
    cursor: usize,
}

impl Tree {
    /// Compact JSON rendering of the whole tree, for debugging. Each node is
    /// an object with `children`, `tag`, `token` and `word`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.walk(
            &mut out,
            |out, _, _| out.write_str("{\"children\":["),
            |out, _, position| if position > 0 { out.write_char(',') } else { Ok(()) },
            |out, node| {
                write!(
                    out,
                    "],\"tag\":{},\"token\":{},\"word\":{}}}",
                    Value::from(node.tag.as_str()),
                    node.token.map_or(Value::Null, Value::from),
                    node.word.as_deref().map_or(Value::Null, Value::from),
                )
            },
        );
        out
    }

    /// Depth-first rendering with an explicit stack, so depth is bounded by
    /// memory rather than the call stack. `open` writes a node before its
    /// children, `before_child` runs ahead of each child with the child's
    /// depth and position, and `close` finishes a node.
    fn walk<W>(
        &self,
        out: &mut W,
        mut open: impl FnMut(&mut W, &Node, usize) -> fmt::Result,
        mut before_child: impl FnMut(&mut W, usize, usize) -> fmt::Result,
        mut close: impl FnMut(&mut W, &Node) -> fmt::Result,
    ) -> fmt::Result {
        open(out, self.node(self.root), 0)?;
        let mut stack = vec![Frame {
            id: self.root,
            depth: 0,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = self.node(frame.id);
            match node.children.get(frame.cursor) {
                Some(&child) => {
                    let depth = frame.depth + 1;
                    before_child(out, depth, frame.cursor)?;
                    frame.cursor += 1;
                    open(out, self.node(child), depth)?;
                    stack.push(Frame {
                        id: child,
                        depth,
                        cursor: 0,
                    });
                }
                None => {
                    close(out, node)?;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

/// Bracket notation. `{:#}` puts each child on its own indented line.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.walk(
            f,
            |f, node, _| {
                write!(f, "({}", node.tag)?;
                match &node.word {
                    Some(word) => write!(f, " {}", word),
                    None => Ok(()),
                }
            },
            |f, depth, _| {
                if f.alternate() {
                    write!(f, "\n{:width$}", "", width = depth * 2)
                } else {
                    f.write_str(" ")
                }
            },
            |f, _| f.write_str(")"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_reparseable() {
        let notation = "(ROOT (S (NP (NNP John)) (VP (VBZ runs)) (. .)))";
        let tree = Tree::parse(notation).unwrap();
        assert_eq!(tree.to_string(), notation);
        assert_eq!(Tree::parse(&tree.to_string()).unwrap(), tree);
    }

    #[test]
    fn test_display_alternate() {
        let tree = Tree::parse("(S (NP (NNP John)) (VP (VBZ runs)))").unwrap();
        insta::assert_snapshot!(format!("{:#}", tree), @r###"
        (S
          (NP
            (NNP John))
          (VP
            (VBZ runs)))
        "###);
    }

    #[test]
    fn test_dump() {
        let mut tree = Tree::parse("(NP (NN cat) (NN \"dog\"))").unwrap();
        tree.bind_tokens(2).unwrap();
        insta::assert_snapshot!(tree.dump(), @r###"{"children":[{"children":[],"tag":"NN","token":0,"word":"cat"},{"children":[],"tag":"NN","token":1,"word":"\"dog\""}],"tag":"NP","token":null,"word":null}"###);

        let value: Value = serde_json::from_str(&tree.dump()).unwrap();
        assert_eq!(value["children"][1]["word"], "\"dog\"");
    }

    #[test]
    fn test_deep_tree_rendering() {
        let depth = 200_000;
        let mut notation = "(X ".repeat(depth);
        notation.push_str("(W leaf)");
        notation.push_str(&")".repeat(depth));

        let tree = Tree::parse(&notation).unwrap();
        assert_eq!(tree.to_string(), notation);

        let dump = tree.dump();
        assert!(dump.starts_with("{\"children\":[{\"children\":["));
        assert!(dump.ends_with("],\"tag\":\"X\",\"token\":null,\"word\":null}"));
        assert_eq!(dump.matches("\"tag\":\"X\"").count(), depth);
        assert_eq!(dump.matches("\"word\":\"leaf\"").count(), 1);
    }
}
