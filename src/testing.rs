//! Test-only stand-ins for the collaborator traits in [`crate::collab`], and
//! a small graph-building DSL so scenario tests can assemble production
//! graphs without going through a real grammar-DSL parser.

use std::collections::HashMap;

use crate::collab::{SetProvider, SourceBuffer};
use crate::graph::node::{Node, NodeId, NodeKind};
use crate::graph::sets::TerminalSet;
use crate::symbol::{Grammar, Symbol, SymbolId};

/// Builds a small [`Grammar`] by hand, terminal names given up front and
/// nonterminals/graph fragments added as the test needs them.
pub struct GrammarBuilder {
    pub grammar: Grammar,
    /// Synthetic source text that `rslv`/`sem` fragments point into.
    pub source: String,
}

impl GrammarBuilder {
    pub fn new(terminal_names: &[&str]) -> Self {
        let mut grammar = Grammar::new(terminal_names.len());
        for (i, name) in terminal_names.iter().enumerate() {
            grammar.terminals.push(Symbol::terminal(*name, i as SymbolId));
        }
        Self {
            grammar,
            source: String::new(),
        }
    }

    fn terminal_id(&self, name: &str) -> SymbolId {
        self.grammar
            .terminals
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no such terminal: {name}"))
            .n
    }

    /// A single `t` node matching the named terminal.
    pub fn t(&mut self, name: &str) -> NodeId {
        let sym = self.terminal_id(name);
        self.grammar.add_node(Node::new(NodeKind::T { sym }).up())
    }

    /// A single weak-terminal node.
    pub fn wt(&mut self, name: &str) -> NodeId {
        let sym = self.terminal_id(name);
        self.grammar.add_node(Node::new(NodeKind::Wt { sym }).up())
    }

    /// A call to nonterminal `name`, registering it in `nonterminals` if
    /// this is the first reference.
    pub fn nt(&mut self, name: &str) -> NodeId {
        let sym = self
            .grammar
            .nonterminals
            .iter()
            .position(|s| s.name == name)
            .unwrap_or_else(|| {
                let id = self.grammar.nonterminals.len() as SymbolId;
                self.grammar.nonterminals.push(Symbol::nonterminal(name, id));
                id as usize
            }) as SymbolId;
        self.grammar.add_node(Node::new(NodeKind::Nt { sym, pos: None }).up())
    }

    pub fn eps(&mut self) -> NodeId {
        self.grammar.add_node(Node::new(NodeKind::Eps).up())
    }

    pub fn any(&mut self, set: TerminalSet) -> NodeId {
        self.grammar.add_node(Node::new(NodeKind::Any { set }).up())
    }

    pub fn sync(&mut self, set: TerminalSet) -> NodeId {
        self.grammar.add_node(Node::new(NodeKind::Sync { set }).up())
    }

    /// A resolver node whose predicate source is `text`, appended to this
    /// builder's synthetic source buffer.
    pub fn rslv(&mut self, text: &str) -> NodeId {
        let pos = self.push_source(text);
        self.grammar.add_node(Node::new(NodeKind::Rslv { pos }).up())
    }

    /// A semantic-action node whose body source is `text`.
    pub fn sem(&mut self, text: &str) -> NodeId {
        let pos = self.push_source(text);
        self.grammar.add_node(Node::new(NodeKind::Sem { pos }).up())
    }

    fn push_source(&mut self, text: &str) -> crate::symbol::SourceRange {
        let beg = self.source.len() as u32;
        self.source.push_str(text);
        let end = self.source.len() as u32 - 1;
        crate::symbol::SourceRange::new(beg, end, 1, 0)
    }

    /// A `SourceBuffer` over this builder's accumulated `rslv`/`sem` text.
    pub fn source_buffer(&self) -> StrBuffer<'_> {
        StrBuffer::new(&self.source)
    }

    /// Chain `ids` into a `next`-linked sequence; the last node keeps its
    /// own `up` flag (already set by the individual constructors above),
    /// earlier ones are un-set so traversal continues through them.
    pub fn sequence(&mut self, ids: &[NodeId]) -> NodeId {
        assert!(!ids.is_empty());
        for w in ids.windows(2) {
            let (a, b) = (w[0], w[1]);
            self.grammar.node_mut(a).up = false;
            self.grammar.node_mut(a).next = Some(b);
        }
        ids[0]
    }

    /// An `alt` chain over `arms`, each wrapped as its own alternative body.
    pub fn alt(&mut self, arms: &[NodeId]) -> NodeId {
        assert!(arms.len() >= 2);
        let alt_ids: Vec<NodeId> = arms
            .iter()
            .map(|&sub| self.grammar.add_node(Node::new(NodeKind::Alt { sub, down: None }).up()))
            .collect();
        for w in alt_ids.windows(2) {
            let (a, b) = (w[0], w[1]);
            if let NodeKind::Alt { down, .. } = &mut self.grammar.node_mut(a).kind {
                *down = Some(b);
            }
        }
        alt_ids[0]
    }

    pub fn iter(&mut self, sub: NodeId) -> NodeId {
        self.grammar.add_node(Node::new(NodeKind::Iter { sub }).up())
    }

    pub fn opt(&mut self, sub: NodeId) -> NodeId {
        self.grammar.add_node(Node::new(NodeKind::Opt { sub }).up())
    }
}

impl std::ops::Deref for GrammarBuilder {
    type Target = Grammar;
    fn deref(&self) -> &Grammar {
        &self.grammar
    }
}

/// A `SourceBuffer` over an owned `&str`, advancing by byte offset.
pub struct StrBuffer<'a> {
    text: &'a str,
    pos: u32,
}

impl<'a> StrBuffer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl SourceBuffer for StrBuffer<'_> {
    fn set_pos(&mut self, pos: u32) {
        self.pos = pos;
    }

    fn read(&mut self) -> Option<char> {
        let c = self.text[self.pos as usize..].chars().next()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    fn pos(&self) -> u32 {
        self.pos
    }
}

/// A `SetProvider` backed by explicit per-node lookup tables, standing in
/// for the real FIRST/FOLLOW/Expected algorithm. Test grammars use a single
/// implicit context, so `expected`/`expected0` ignore `ctx`.
#[derive(Default)]
pub struct StubSets {
    first: HashMap<NodeId, TerminalSet>,
    expected: HashMap<NodeId, TerminalSet>,
    expected0: HashMap<NodeId, TerminalSet>,
}

impl StubSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first(mut self, node: NodeId, set: TerminalSet) -> Self {
        self.first.insert(node, set);
        self
    }

    pub fn with_expected(mut self, node: NodeId, set: TerminalSet) -> Self {
        self.expected.insert(node, set);
        self
    }

    pub fn with_expected0(mut self, node: NodeId, set: TerminalSet) -> Self {
        self.expected0.insert(node, set);
        self
    }
}

impl SetProvider for StubSets {
    fn first(&self, node: NodeId) -> TerminalSet {
        self.first
            .get(&node)
            .cloned()
            .unwrap_or_else(|| panic!("StubSets: no `first` entry for node {node}"))
    }

    fn expected(&self, node: NodeId, _ctx: SymbolId) -> TerminalSet {
        self.expected
            .get(&node)
            .cloned()
            .unwrap_or_else(|| panic!("StubSets: no `expected` entry for node {node}"))
    }

    fn expected0(&self, node: NodeId, _ctx: SymbolId) -> TerminalSet {
        self.expected0
            .get(&node)
            .cloned()
            .unwrap_or_else(|| panic!("StubSets: no `expected0` entry for node {node}"))
    }
}

/// A [`crate::collab::FrameSource`] backed by a whole file read into memory,
/// scanning forward for `-->marker` sentinels as each part is requested.
pub struct FileFrameSource {
    text: String,
    cursor: usize,
}

impl FileFrameSource {
    pub fn open(path: &std::path::Path) -> std::io::Result<Self> {
        Ok(Self {
            text: std::fs::read_to_string(path)?,
            cursor: 0,
        })
    }
}

impl crate::collab::FrameSource for FileFrameSource {
    fn copy_part(&mut self, marker: &str, out: &mut dyn std::io::Write) -> crate::Result<bool> {
        match self.text[self.cursor..].find(marker) {
            Some(rel) => {
                out.write_all(self.text[self.cursor..self.cursor + rel].as_bytes())
                    .map_err(|source| crate::Error::Io { what: "frame template", source })?;
                self.cursor += rel + marker.len();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn skip_part(&mut self, marker: &str) -> crate::Result<bool> {
        match self.text[self.cursor..].find(marker) {
            Some(rel) => {
                self.cursor += rel + marker.len();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn copy_rest(&mut self, out: &mut dyn std::io::Write) -> crate::Result<()> {
        out.write_all(self.text[self.cursor..].as_bytes())
            .map_err(|source| crate::Error::Io { what: "frame template", source })?;
        self.cursor = self.text.len();
        Ok(())
    }
}

/// Build a [`TerminalSet`] of size `universe` containing `ids`.
pub fn tset(universe: usize, ids: &[u32]) -> TerminalSet {
    let mut s = TerminalSet::new(universe);
    for &id in ids {
        s.insert(id);
    }
    s
}

#[cfg(test)]
mod testing_tests {
    use super::*;

    #[test]
    fn builder_sequence_chains_nodes() {
        let mut b = GrammarBuilder::new(&["a", "b"]);
        let a = b.t("a");
        let bb = b.t("b");
        let seq = b.sequence(&[a, bb]);
        assert_eq!(seq, a);
        assert_eq!(b.grammar.node(a).next, Some(bb));
        assert!(!b.grammar.node(a).up);
        assert!(b.grammar.node(bb).up);
    }

    #[test]
    fn builder_alt_chains_down_links() {
        let mut b = GrammarBuilder::new(&["a", "b", "c"]);
        let a = b.t("a");
        let bb = b.t("b");
        let c = b.t("c");
        let alt = b.alt(&[a, bb, c]);
        let first = b.grammar.node(alt);
        let NodeKind::Alt { down: Some(second), .. } = first.kind else {
            panic!("expected Alt")
        };
        let second_node = b.grammar.node(second);
        assert!(matches!(second_node.kind, NodeKind::Alt { down: Some(_), .. }));
    }

    #[test]
    fn str_buffer_reads_and_seeks() {
        let mut buf = StrBuffer::new("abc");
        assert_eq!(buf.read(), Some('a'));
        assert_eq!(buf.pos(), 1);
        buf.set_pos(2);
        assert_eq!(buf.read(), Some('c'));
        assert_eq!(buf.read(), None);
    }

    #[test]
    fn stub_sets_returns_registered_values() {
        let set = tset(8, &[1, 2]);
        let stubs = StubSets::new().with_first(0, set.clone());
        assert_eq!(stubs.first(0), set);
    }

    #[test]
    fn file_frame_source_scans_markers_from_disk() {
        use crate::collab::FrameSource;
        use std::io::Write;

        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "before-->markerafter").unwrap();
        tmpfile.flush().unwrap();

        let mut frame = FileFrameSource::open(tmpfile.path()).unwrap();
        let mut out = Vec::new();
        assert!(frame.copy_part("-->marker", &mut out).unwrap());
        assert_eq!(out, b"before");

        out.clear();
        frame.copy_rest(&mut out).unwrap();
        assert_eq!(out, b"after");
    }

    #[test]
    fn file_frame_source_reports_missing_marker() {
        use crate::collab::FrameSource;
        use std::io::Write;

        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "no markers here").unwrap();
        tmpfile.flush().unwrap();

        let mut frame = FileFrameSource::open(tmpfile.path()).unwrap();
        let mut out = Vec::new();
        assert!(!frame.copy_part("-->marker", &mut out).unwrap());
    }
}
