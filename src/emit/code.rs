//! Graph Code Emitter (C6): the recursive walk from a production-graph node
//! sequence to the generated parser's statement text. This is the largest
//! single piece of the core — every other component exists to feed or be
//! fed by this one.

use std::fmt::Write as _;

use crate::collab::{SetProvider, SourceBuffer};
use crate::emit::cond::gen_cond;
use crate::emit::shape::use_switch;
use crate::emit::write_symbol_or_code;
use crate::errors_table::{ErrorKind, ErrorTable};
use crate::graph::closure::derivations_of;
use crate::graph::condset::CondSetTable;
use crate::graph::node::{NodeId, NodeKind};
use crate::graph::sets::TerminalSet;
use crate::source_copy::copy_source_part;
use crate::symbol::{Grammar, SymbolId};

/// Bundles the collaborators and accumulating tables a code walk shares
/// across recursive calls, so they don't have to be threaded individually
/// through every call site.
pub struct CodeEmitter<'a> {
    pub grammar: &'a Grammar,
    pub sets: &'a dyn SetProvider,
    pub buffer: &'a mut dyn SourceBuffer,
    pub cond_table: &'a mut CondSetTable,
    pub errors: &'a mut ErrorTable,
    pub src_name: &'a str,
    pub emit_lines: bool,
    /// Threshold below which [`gen_cond`] inlines an `IsKind` disjunction
    /// instead of interning a `StartOf` table entry.
    pub max_term: usize,
    /// Build in AST-tracking mode: bracket each consumed terminal with the
    /// `#ifdef PARSER_WITH_AST` / `AstAddTerminal()` hook.
    pub with_ast: bool,
}

impl CodeEmitter<'_> {
    /// Emit statements for the `next`-linked sequence rooted at `root`, into
    /// `out`, at `indent` tab stops, for the enclosing nonterminal `ctx`
    /// (whose name is used in generated error messages).
    ///
    /// `is_checked` names the terminals a caller has already verified are
    /// present at this position (e.g. the arm of an `if`/`switch` just
    /// entered); it lets the very next `t` node in the sequence become a
    /// bare `Get()` instead of a redundant `Expect`. It is cleared after any
    /// node other than `eps`, `sem`, or `sync`, since those don't consume
    /// input and so don't invalidate the caller's guarantee.
    pub fn gen_code(
        &mut self,
        root: Option<NodeId>,
        indent: u32,
        is_checked: &mut TerminalSet,
        ctx: SymbolId,
        ctx_name: &str,
        out: &mut String,
    ) {
        let mut cursor = root;
        while let Some(id) = cursor {
            let node = self.grammar.node(id).clone();
            match &node.kind {
                NodeKind::Nt { sym, pos } => {
                    indent_tabs(out, indent);
                    let callee = self.grammar.nonterminal(*sym);
                    write!(out, "{}_NT(", callee.name).unwrap();
                    if let Some(pos) = pos {
                        copy_source_part(self.buffer, pos, 0, self.src_name, self.emit_lines, out);
                    }
                    out.push_str(");\n");
                }
                NodeKind::T { sym } => {
                    indent_tabs(out, indent);
                    let symbol = self.grammar.terminal(*sym);
                    if is_checked.contains(*sym) {
                        out.push_str("Get();\n");
                    } else {
                        out.push_str("Expect(");
                        write_symbol_or_code(out, symbol);
                        out.push_str(");\n");
                    }
                    if self.with_ast {
                        out.push_str("#ifdef PARSER_WITH_AST\n\tAstAddTerminal();\n#endif\n");
                    }
                }
                NodeKind::Wt { sym } => {
                    indent_tabs(out, indent);
                    let mut s1 = self.sets.expected(node.next.unwrap_or(id), ctx);
                    s1.union_with(&self.grammar.all_sync_sets);
                    let idx = self.cond_table.new_cond_set(&s1);
                    out.push_str("ExpectWeak(");
                    write_symbol_or_code(out, self.grammar.terminal(*sym));
                    write!(out, ", {idx});\n").unwrap();
                }
                NodeKind::Any { set } => {
                    indent_tabs(out, indent);
                    let acc = set.count();
                    let accepts_everything = self.grammar.terminal_count() == acc + 1;
                    let matches_checked = acc > 0 && *set == *is_checked;
                    if accepts_everything || matches_checked {
                        out.push_str("Get();\n");
                    } else {
                        let err_nr = self.errors.new_error(ErrorKind::AltErr, self.grammar.nonterminal(ctx));
                        if acc > 0 {
                            out.push_str("if (");
                            gen_cond(
                                self.grammar,
                                self.cond_table,
                                &node,
                                ctx_name,
                                set,
                                self.buffer,
                                self.src_name,
                                self.emit_lines,
                                self.max_term,
                                out,
                            );
                            write!(out, ") Get(); else SynErr({err_nr});\n").unwrap();
                        } else {
                            write!(out, "SynErr({err_nr}); // ANY node that matches no symbol\n").unwrap();
                        }
                    }
                }
                NodeKind::Eps => {}
                NodeKind::Rslv { .. } => {}
                NodeKind::Sem { pos } => {
                    copy_source_part(self.buffer, pos, indent, self.src_name, self.emit_lines, out);
                }
                NodeKind::Sync { set } => {
                    indent_tabs(out, indent);
                    let err_nr = self.errors.new_error(ErrorKind::SyncErr, self.grammar.nonterminal(ctx));
                    out.push_str("while (!(");
                    gen_cond(
                        self.grammar,
                        self.cond_table,
                        &node,
                        ctx_name,
                        set,
                        self.buffer,
                        self.src_name,
                        self.emit_lines,
                        self.max_term,
                        out,
                    );
                    write!(out, ")) {{ SynErr({err_nr}); Get(); }}\n").unwrap();
                }
                NodeKind::Alt { .. } => {
                    self.gen_alt(id, is_checked, ctx, ctx_name, indent, out);
                }
                NodeKind::Iter { sub } => {
                    self.gen_iter(*sub, node.next, ctx, ctx_name, indent, out);
                }
                NodeKind::Opt { sub } => {
                    indent_tabs(out, indent);
                    let mut s1 = self.sets.first(*sub);
                    let sub_node = self.grammar.node(*sub).clone();
                    out.push_str("if (");
                    gen_cond(
                        self.grammar,
                        self.cond_table,
                        &sub_node,
                        ctx_name,
                        &s1,
                        self.buffer,
                        self.src_name,
                        self.emit_lines,
                        self.max_term,
                        out,
                    );
                    out.push_str(") {\n");
                    self.gen_code(Some(*sub), indent + 1, &mut s1, ctx, ctx_name, out);
                    indent_tabs(out, indent);
                    out.push_str("}\n");
                }
            }

            if !matches!(node.kind, NodeKind::Eps | NodeKind::Sem { .. } | NodeKind::Sync { .. }) {
                is_checked.set_all_false();
            }

            if node.up {
                break;
            }
            cursor = node.next;
        }
    }

    /// `alt_id` is the first `Alt` node of the chain; `outer_checked` is the
    /// terminal set already verified at this position by an enclosing
    /// sequence — if it exactly equals this alternation's `First` set, every
    /// possible continuation is already covered and no trailing error arm is
    /// needed.
    fn gen_alt(&mut self, alt_id: NodeId, outer_checked: &TerminalSet, ctx: SymbolId, ctx_name: &str, indent: u32, out: &mut String) {
        let first_set = self.sets.first(alt_id);
        let equal = first_set == *outer_checked;
        let switch = use_switch(self.grammar, self.sets, alt_id, ctx);

        if switch {
            indent_tabs(out, indent);
            out.push_str("switch (la->kind) {\n");
        }

        let mut arm = Some(alt_id);
        let mut first_arm = true;
        while let Some(arm_id) = arm {
            let NodeKind::Alt { sub, down } = &self.grammar.node(arm_id).kind else {
                unreachable!("alt chain must only contain Alt nodes")
            };
            let (sub, down) = (*sub, *down);
            let mut s1 = self.sets.expected(sub, ctx);
            let sub_node = self.grammar.node(sub).clone();
            indent_tabs(out, indent);
            if switch {
                self.put_case_labels(&s1, out);
                out.push_str("{\n");
            } else if first_arm {
                out.push_str("if (");
                gen_cond(
                    self.grammar,
                    self.cond_table,
                    &sub_node,
                    ctx_name,
                    &s1,
                    self.buffer,
                    self.src_name,
                    self.emit_lines,
                    self.max_term,
                    out,
                );
                out.push_str(") {\n");
            } else if down.is_none() && equal {
                out.push_str("} else {\n");
            } else {
                out.push_str("} else if (");
                gen_cond(
                    self.grammar,
                    self.cond_table,
                    &sub_node,
                    ctx_name,
                    &s1,
                    self.buffer,
                    self.src_name,
                    self.emit_lines,
                    self.max_term,
                    out,
                );
                out.push_str(") {\n");
            }

            self.gen_code(Some(sub), indent + 1, &mut s1, ctx, ctx_name, out);

            if switch {
                indent_tabs(out, indent);
                out.push_str("\tbreak;\n");
                indent_tabs(out, indent);
                out.push_str("}\n");
            }

            arm = down;
            first_arm = false;
        }

        indent_tabs(out, indent);
        if equal {
            out.push_str("}\n");
        } else {
            let err_nr = self.errors.new_error(ErrorKind::AltErr, self.grammar.nonterminal(ctx));
            if switch {
                write!(out, "default: SynErr({err_nr}); break;\n").unwrap();
                indent_tabs(out, indent);
                out.push_str("}\n");
            } else {
                write!(out, "}} else SynErr({err_nr});\n").unwrap();
            }
        }
    }

    fn gen_iter(&mut self, sub: NodeId, outer_next: Option<NodeId>, ctx: SymbolId, ctx_name: &str, indent: u32, out: &mut String) {
        indent_tabs(out, indent);
        let sub_node = self.grammar.node(sub).clone();
        out.push_str("while (");

        let (loop_body, mut s1) = if let NodeKind::Wt { sym } = &sub_node.kind {
            let s_inner = self.sets.expected(sub_node.next.unwrap_or(sub), ctx);
            let s_outer = self.sets.expected(outer_next.unwrap_or(sub), ctx);
            let i1 = self.cond_table.new_cond_set(&s_inner);
            let i2 = self.cond_table.new_cond_set(&s_outer);
            out.push_str("WeakSeparator(");
            write_symbol_or_code(out, self.grammar.terminal(*sym));
            write!(out, ", {i1}, {i2}) ").unwrap();
            let next = if sub_node.up { None } else { sub_node.next };
            (next, TerminalSet::new(self.grammar.terminal_count()))
        } else {
            let s1 = self.sets.first(sub);
            gen_cond(
                self.grammar,
                self.cond_table,
                &sub_node,
                ctx_name,
                &s1,
                self.buffer,
                self.src_name,
                self.emit_lines,
                self.max_term,
                out,
            );
            (Some(sub), s1)
        };

        out.push_str(") {\n");
        self.gen_code(loop_body, indent + 1, &mut s1, ctx, ctx_name, out);
        indent_tabs(out, indent);
        out.push_str("}\n");
    }

    /// Emit `case X: case Y: ` labels for every terminal in the derivation
    /// closure of `s` — a terminal that inherits from a member of `s` must
    /// also dispatch into this arm.
    fn put_case_labels(&self, s0: &TerminalSet, out: &mut String) {
        let s = derivations_of(self.grammar, s0);
        for sym in &self.grammar.terminals {
            if s.contains(sym.n) {
                out.push_str("case ");
                write_symbol_or_code(out, sym);
                out.push_str(": ");
            }
        }
    }
}

fn indent_tabs(out: &mut String, indent: u32) {
    for _ in 0..indent {
        out.push('\t');
    }
}
