//! Recursive-descent parser emission core.
//!
//! Given an attributed EBNF grammar graph (terminals, nonterminals, pragmas,
//! and a graph of production alternatives), this crate synthesizes the
//! source text of a recursive-descent parser that recognizes the described
//! language, together with a companion right-recursive EBNF dump used for
//! diagramming.
//!
//! # Module map
//!
//! - `symbol` — `Symbol`, `SymbolKind`, and the `Grammar` container
//! - `graph` — the production-graph arena (`Node`), terminal-set bitsets,
//!   the condition-set interning table, and the derivation closure
//! - `collab` — trait seams for inputs the core treats as external
//!   collaborators (FIRST/Expected/Expected0 queries, the source buffer,
//!   the frame template)
//! - `source_copy` — verbatim copying of user-embedded semantic actions
//! - `errors_table` — the numbered error-message table builder
//! - `emit` — the decision-tree synthesizer, the graph-to-code walker, the
//!   header/production emitter, the RR-EBNF emitter, and the frame composer
//! - `stats` — post-run statistics for the trace stream

pub mod collab;
pub mod emit;
pub mod errors_table;
pub mod graph;
pub mod source_copy;
pub mod stats;
pub mod symbol;

#[cfg(test)]
mod testing;

pub use collab::{FrameSource, SetProvider, SourceBuffer};
pub use emit::frame::{write_parser, EmitOptions};
pub use errors_table::{ErrorKind, ErrorTable};
pub use graph::condset::CondSetTable;
pub use graph::node::{Node, NodeId, NodeKind};
pub use graph::sets::TerminalSet;
pub use stats::Stats;
pub use symbol::{Grammar, Symbol, SymbolId, SymbolKind};

/// Errors the generator itself can raise.
///
/// Grammar-content problems never surface here: they flow into the emitted
/// error table (see [`errors_table`]) instead. Only conditions that make it
/// impossible to produce output at all are modeled as `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A frame template or output file could not be opened.
    #[error("failed to open {what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A frame template was missing an expected `-->marker` sentinel.
    #[error("frame template missing marker {marker:?}")]
    MissingMarker { marker: &'static str },
}

/// Result type used throughout the generator.
pub type Result<T> = std::result::Result<T, Error>;
