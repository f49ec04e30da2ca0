//! Condition Emitter (C5): renders the boolean guard for a decision point —
//! a resolver's predicate copied verbatim, a short disjunction of `IsKind`
//! checks, or a `StartOf(i)` table lookup for larger sets.

use crate::collab::SourceBuffer;
use crate::emit::write_symbol_or_code;
use crate::graph::condset::CondSetTable;
use crate::graph::node::{Node, NodeKind};
use crate::graph::sets::TerminalSet;
use crate::symbol::Grammar;
use crate::source_copy::copy_source_part;

/// Emit the guard for taking `node`'s branch, given the decision set `s`.
///
/// Sets with `max_term` members or fewer are spelled out as `IsKind(la, X)
/// || ...` rather than interned into the condition-set table — inlining a
/// short list reads better than a table lookup for a human skimming the
/// generated parser.
///
/// If `node` is a resolver, `s` is ignored entirely and the resolver's own
/// predicate source is copied instead — the decision lives in user code.
pub fn gen_cond(
    grammar: &Grammar,
    cond_table: &mut CondSetTable,
    node: &Node,
    context_name: &str,
    s: &TerminalSet,
    buffer: &mut dyn SourceBuffer,
    src_name: &str,
    emit_lines: bool,
    max_term: usize,
    out: &mut String,
) {
    if let NodeKind::Rslv { pos } = &node.kind {
        copy_source_part(buffer, pos, 0, src_name, emit_lines, out);
        return;
    }

    let n = s.count();
    if n == 0 {
        // An ANY set matching no symbol — structurally reachable but
        // practically unsatisfiable; emitting `false` short-circuits it.
        out.push_str("false");
    } else if n <= max_term {
        let mut remaining = n;
        for sym in &grammar.terminals {
            if !s.contains(sym.n) {
                continue;
            }
            out.push_str("IsKind(la, ");
            write_symbol_or_code(out, sym);
            out.push(')');
            remaining -= 1;
            if remaining > 0 {
                out.push_str(" || ");
            }
        }
    } else {
        let idx = cond_table.new_cond_set(s);
        out.push_str(&format!("StartOf({idx} /* {context_name} */)"));
    }
}
