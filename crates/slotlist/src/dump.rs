//! Graphviz dump of the live chain.
//!
//! Output format, one record per live node in traversal order:
//!
//! ```text
//! digraph {
//! node3[label="{{3}|{<payload>}}",shape=record];
//! node0[label="{{0}|{<payload>}}",shape=record];
//! node3 -> node0;
//! node0 -> node3;
//! Head -> node3;
//! node0 -> Tail;
//! }
//! ```
//!
//! Each record after the first is followed by the forward and backward
//! edges to its predecessor. The `|{...}` field is only written when a
//! renderer is supplied. There is no newline after the closing brace.

use std::io;

use crate::arena::link;
use crate::handle::NodeHandle;
use crate::iter::RawIter;
use crate::list::SlotList;

/// A live node as seen by a dump renderer.
#[derive(Debug)]
pub struct NodeView<'a, T> {
    /// Handle of the node.
    pub handle: NodeHandle,
    /// The payload.
    pub value: &'a T,
    /// Physical index of the successor.
    pub next: Option<u32>,
    /// Physical index of the predecessor.
    pub prev: Option<u32>,
}

type Renderer<'r, T> = &'r dyn Fn(&NodeView<'_, T>) -> String;

impl<T> SlotList<T> {
    /// Write the chain as a Graphviz digraph without payloads.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        self.write_dot(sink, None)
    }

    /// Write the chain as a Graphviz digraph, rendering each payload with
    /// `render`.
    ///
    /// The rendered text is inserted verbatim into a record label, so it
    /// may itself use record syntax (`{A|B}`).
    pub fn dump_with<W, F>(&self, sink: &mut W, render: F) -> io::Result<()>
    where
        W: io::Write,
        F: Fn(&NodeView<'_, T>) -> String,
    {
        self.write_dot(sink, Some(&render))
    }

    /// Render the dump into a `String`.
    pub fn to_dot(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.dump(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    fn write_dot<W: io::Write>(&self, sink: &mut W, render: Option<Renderer<'_, T>>) -> io::Result<()> {
        writeln!(sink, "digraph {{")?;
        let mut previous = None;
        for (index, value) in RawIter::new(self) {
            write!(sink, "node{index}[label=\"{{{{{index}}}")?;
            if let Some(render) = render {
                let view = NodeView {
                    handle: self.arena.handle(index),
                    value,
                    next: link(self.arena.next[index as usize]),
                    prev: link(self.arena.prev[index as usize]),
                };
                write!(sink, "|{{{}}}", render(&view))?;
            }
            writeln!(sink, "}}\",shape=record];")?;
            if let Some(prev) = previous {
                writeln!(sink, "node{prev} -> node{index};")?;
                writeln!(sink, "node{index} -> node{prev};")?;
            }
            previous = Some(index);
        }
        if let (Some(head), Some(tail)) = (link(self.head), link(self.tail)) {
            writeln!(sink, "Head -> node{head};")?;
            writeln!(sink, "node{tail} -> Tail;")?;
        }
        write!(sink, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_dumps_bare_digraph() {
        let l: SlotList<u8> = SlotList::with_capacity(2).unwrap();
        assert_eq!(l.to_dot(), "digraph {\n}");
    }

    #[test]
    fn dump_without_renderer_omits_payload() {
        let mut l = SlotList::with_capacity(4).unwrap();
        let a = l.push_back(10).unwrap();
        l.insert_before(a, 20).unwrap();
        let expected = "digraph {\n\
            node1[label=\"{{1}}\",shape=record];\n\
            node0[label=\"{{0}}\",shape=record];\n\
            node1 -> node0;\n\
            node0 -> node1;\n\
            Head -> node1;\n\
            node0 -> Tail;\n\
            }";
        assert_eq!(l.to_dot(), expected);
    }

    #[test]
    fn dump_with_renderer_sees_links() {
        let mut l = SlotList::with_capacity(2).unwrap();
        l.push_back(7).unwrap();
        l.push_back(8).unwrap();
        let mut out = Vec::new();
        l.dump_with(&mut out, |n| {
            let show = |s: Option<u32>| s.map_or(-1, i64::from);
            format!(
                "{{VALUE|{}}}|{{NEXT|{}}}|{{PREVIOUS|{}}}",
                n.value,
                show(n.next),
                show(n.prev)
            )
        })
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(
            "node0[label=\"{{0}|{{VALUE|7}|{NEXT|1}|{PREVIOUS|-1}}}\",shape=record];"
        ));
        assert!(text.contains(
            "node1[label=\"{{1}|{{VALUE|8}|{NEXT|-1}|{PREVIOUS|0}}}\",shape=record];"
        ));
        assert!(text.ends_with("node1 -> Tail;\n}"));
    }

    #[test]
    fn dump_does_not_mutate() {
        let mut l = SlotList::with_capacity(3).unwrap();
        l.push_back('x').unwrap();
        let before: Vec<_> = l.handles().collect();
        let _ = l.to_dot();
        assert_eq!(l.handles().collect::<Vec<_>>(), before);
        assert!(l.check_integrity().is_ok());
    }
}
