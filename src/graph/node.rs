//! Production-graph node arena.
//!
//! Nodes are stored in a flat `Vec` on [`crate::symbol::Grammar`] and
//! referenced by index. A DAG of `next`/`down` links, rather than owned
//! recursive structure, keeps traversal explicit and avoids needing
//! reference counting for the graph's internal sharing.

use crate::graph::sets::TerminalSet;
use crate::symbol::{SourceRange, SymbolId};

/// Index into the grammar's node arena.
pub type NodeId = u32;

/// A vertex in a production graph.
///
/// `next` and `up` are shared by every kind: traversal along `next` halts at
/// (and includes) the first node whose `up` flag is set, marking the end of
/// a sub-sequence. `down` is meaningful only for [`NodeKind::Alt`], chaining
/// sibling alternatives.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub next: Option<NodeId>,
    pub up: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            next: None,
            up: false,
        }
    }

    pub fn with_next(mut self, next: NodeId) -> Self {
        self.next = Some(next);
        self
    }

    pub fn up(mut self) -> Self {
        self.up = true;
        self
    }
}

/// Tagged variant over the node kinds a production graph can contain.
///
/// Every consumer in this crate matches on `NodeKind` exhaustively (a `match`
/// with no wildcard arm), so the compiler enforces that a new variant is
/// handled everywhere it matters.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Call of a nonterminal production, with the copied attribute-argument
    /// source text.
    Nt { sym: SymbolId, pos: Option<SourceRange> },
    /// Match of an ordinary terminal.
    T { sym: SymbolId },
    /// Match of a weak terminal — may be skipped on error.
    Wt { sym: SymbolId },
    /// Wildcard over an explicit terminal set.
    Any { set: TerminalSet },
    /// Empty production.
    Eps,
    /// User-supplied boolean predicate, copied verbatim.
    Rslv { pos: SourceRange },
    /// Semantic action, copied verbatim.
    Sem { pos: SourceRange },
    /// Synchronization point with a recovery terminal set.
    Sync { set: TerminalSet },
    /// Alternation. `sub` is this alternative's body; `down` chains to the
    /// next alternative.
    Alt { sub: NodeId, down: Option<NodeId> },
    /// Zero-or-more loop over `sub`.
    Iter { sub: NodeId },
    /// Zero-or-one over `sub`.
    Opt { sub: NodeId },
}

impl NodeKind {
    pub fn is_eps(&self) -> bool {
        matches!(self, NodeKind::Eps)
    }

    pub fn is_sem(&self) -> bool {
        matches!(self, NodeKind::Sem { .. })
    }

    pub fn is_sync(&self) -> bool {
        matches!(self, NodeKind::Sync { .. })
    }

    pub fn is_rslv(&self) -> bool {
        matches!(self, NodeKind::Rslv { .. })
    }

    pub fn is_wt(&self) -> bool {
        matches!(self, NodeKind::Wt { .. })
    }

    pub fn is_alt(&self) -> bool {
        matches!(self, NodeKind::Alt { .. })
    }
}
