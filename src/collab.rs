//! Trait seams for inputs this crate treats as external collaborators:
//! FIRST/Expected/Expected0 set queries, buffered source access, and the
//! frame template. Production callers implement these against the real
//! grammar-ingestion and set-computation stages; this crate only consumes
//! them through these traits.

use std::io::Write;

use crate::graph::node::NodeId;
use crate::graph::sets::TerminalSet;
use crate::symbol::SymbolId;
use crate::Result;

/// FIRST/Expected/Expected0 set queries over a production graph, computed
/// by the (out-of-scope) set-algebra stage.
pub trait SetProvider {
    /// Terminals that may start any string derivable from the graph rooted
    /// at `node`.
    fn first(&self, node: NodeId) -> TerminalSet;

    /// Terminals that may appear at `node` in the context of nonterminal
    /// `ctx`; used as the loop/alt decision set (includes epsilon
    /// propagation into the follow context).
    fn expected(&self, node: NodeId, ctx: SymbolId) -> TerminalSet;

    /// Variant of `expected` without epsilon-propagation beyond `node`
    /// itself — used for LL(1) conflict detection.
    fn expected0(&self, node: NodeId, ctx: SymbolId) -> TerminalSet;
}

/// Character-addressed read-only access to the grammar source, used to copy
/// user-embedded semantic actions verbatim.
pub trait SourceBuffer {
    /// Move the read cursor to `pos` (a byte offset).
    fn set_pos(&mut self, pos: u32);

    /// Read the character at the current position and advance the cursor.
    /// Returns `None` at end of input.
    fn read(&mut self) -> Option<char>;

    /// Current cursor position (a byte offset).
    fn pos(&self) -> u32;
}

/// A frame template containing `-->marker` sentinels, streamed between
/// generator output.
pub trait FrameSource {
    /// Stream characters from the current position up to but not including
    /// the next occurrence of `marker`, writing them to `out`. Returns
    /// `Ok(true)` if the marker was found (and consumed), `Ok(false)` if the
    /// source was exhausted without finding it.
    fn copy_part(&mut self, marker: &str, out: &mut dyn Write) -> Result<bool>;

    /// Advance past the next occurrence of `marker` without emitting
    /// anything. Returns `Ok(true)` if found.
    fn skip_part(&mut self, marker: &str) -> Result<bool>;

    /// Stream every remaining character (used for the frame's tail, after
    /// the last known marker).
    fn copy_rest(&mut self, out: &mut dyn Write) -> Result<()>;
}
