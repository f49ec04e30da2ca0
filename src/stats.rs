//! Post-run counters for the trace stream: how large the grammar and the
//! emitted condition-set table turned out to be.

use crate::graph::condset::CondSetTable;
use crate::symbol::Grammar;

/// Snapshot of a completed generation run, formatted the way a trace log
/// reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub terminal_count: usize,
    pub symbol_count: usize,
    pub node_count: usize,
    pub cond_set_count: usize,
}

impl Stats {
    pub fn collect(grammar: &Grammar, cond_table: &CondSetTable) -> Self {
        Self {
            terminal_count: grammar.terminal_count(),
            symbol_count: grammar.total_symbols(),
            node_count: grammar.node_count(),
            cond_set_count: cond_table.len(),
        }
    }

    /// Render as the four-line block a trace log prints after a run.
    pub fn render(&self) -> String {
        format!(
            "\n{} terminals\n{} symbols\n{} nodes\n{} sets\n",
            self.terminal_count, self.symbol_count, self.node_count, self.cond_set_count
        )
    }
}
