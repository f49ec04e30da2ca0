//! Grammar symbols and the read-only grammar container.

use indexmap::IndexMap;

use crate::graph::node::{Node, NodeId};
use crate::graph::sets::TerminalSet;

/// Dense integer id, unique within its kind-space (terminals, nonterminals,
/// pragmas each have their own id space starting at 0).
pub type SymbolId = u32;

/// Kind of a grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
    Pragma,
}

/// A named terminal, nonterminal, or pragma.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub n: SymbolId,
    pub kind: SymbolKind,
    /// For terminals: the parent terminal this one inherits from, if any.
    /// `inherits` forms a forest (no cycles) over the terminal id space.
    pub inherits: Option<SymbolId>,
    /// Root of the production graph, for nonterminals.
    pub graph: Option<NodeId>,
    /// Source range of the formal-attribute text (`(...)` after the name),
    /// copied verbatim into the generated prototype/body.
    pub attr_pos: Option<SourceRange>,
    /// Source range of the semantic-declarations / pragma-action text.
    pub sem_pos: Option<SourceRange>,
}

impl Symbol {
    pub fn terminal(name: impl Into<String>, n: SymbolId) -> Self {
        Self {
            name: name.into(),
            n,
            kind: SymbolKind::Terminal,
            inherits: None,
            graph: None,
            attr_pos: None,
            sem_pos: None,
        }
    }

    pub fn nonterminal(name: impl Into<String>, n: SymbolId) -> Self {
        Self {
            name: name.into(),
            n,
            kind: SymbolKind::Nonterminal,
            inherits: None,
            graph: None,
            attr_pos: None,
            sem_pos: None,
        }
    }

    pub fn pragma(name: impl Into<String>, n: SymbolId) -> Self {
        Self {
            name: name.into(),
            n,
            kind: SymbolKind::Pragma,
            inherits: None,
            graph: None,
            attr_pos: None,
            sem_pos: None,
        }
    }

    pub fn with_inherits(mut self, parent: SymbolId) -> Self {
        self.inherits = Some(parent);
        self
    }

    /// A terminal whose name should be referenced by numeric literal rather
    /// than by identifier — i.e. its name does not start with a letter
    /// (pure-symbol terminals like `"+"` or `","`).
    pub fn is_pure_symbol(&self) -> bool {
        !self.name.starts_with(|c: char| c.is_ascii_alphabetic())
    }

    /// A literal-terminal name begins with `"` — it was declared as a
    /// quoted string in the grammar rather than an identifier.
    pub fn is_quoted_literal(&self) -> bool {
        self.name.starts_with('"')
    }
}

/// Half-open byte range into the grammar source, with the line and column
/// needed to reproduce indentation when copying the fragment verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub beg: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

impl SourceRange {
    pub fn new(beg: u32, end: u32, line: u32, col: u32) -> Self {
        Self { beg, end, line, col }
    }
}

/// The generator's read-only view of a grammar: symbol tables, the node
/// arena, and the output-shaping inputs enumerated by the driver.
///
/// Populating a `Grammar` (from the grammar DSL) is out of scope for this
/// crate; callers — in production the ingestion stage, in tests the test
/// helpers in [`crate::testing`] — build one directly via `add_node` and the
/// symbol vectors.
pub struct Grammar {
    pub terminals: Vec<Symbol>,
    pub nonterminals: Vec<Symbol>,
    pub pragmas: Vec<Symbol>,
    /// Keyword text to terminal id, for the RR-EBNF token dump.
    pub literals: IndexMap<String, SymbolId>,
    /// Start symbol, as an index into `nonterminals`.
    pub gram_sy: SymbolId,
    /// Output namespace/module prefix, possibly dotted.
    pub ns_name: String,
    pub src_name: String,
    pub sem_decl_pos: Option<SourceRange>,
    pub emit_lines: bool,
    pub check_eof: bool,
    /// Union of every SYNC node's recovery set; becomes condition-set table
    /// entry 0.
    pub all_sync_sets: TerminalSet,
    nodes: Vec<Node>,
}

impl Grammar {
    pub fn new(terminal_count: usize) -> Self {
        Self {
            terminals: Vec::new(),
            nonterminals: Vec::new(),
            pragmas: Vec::new(),
            literals: IndexMap::new(),
            gram_sy: 0,
            ns_name: String::new(),
            src_name: String::new(),
            sem_decl_pos: None,
            emit_lines: false,
            check_eof: false,
            all_sync_sets: TerminalSet::new(terminal_count),
            nodes: Vec::new(),
        }
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn terminal(&self, id: SymbolId) -> &Symbol {
        &self.terminals[id as usize]
    }

    pub fn nonterminal(&self, id: SymbolId) -> &Symbol {
        &self.nonterminals[id as usize]
    }

    pub fn start_symbol(&self) -> &Symbol {
        self.nonterminal(self.gram_sy)
    }

    /// Total symbol count across terminals, pragmas and nonterminals
    /// (used by the trace stream, see [`crate::stats`]).
    pub fn total_symbols(&self) -> usize {
        self.terminals.len() + self.pragmas.len() + self.nonterminals.len()
    }
}
