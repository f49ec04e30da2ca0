//! RR-EBNF Emitter (C9): walks a production graph to emit a diagram-friendly
//! right-recursive EBNF string, for viewing with a railroad-diagram tool.

use std::fmt::Write;

use crate::graph::node::{NodeId, NodeKind};
use crate::symbol::Grammar;

/// Emit a diagram-friendly string for the graph rooted at `root`, using `|`,
/// `( … )`, `*`, `?`. Returns the count of terminal/nonterminal tokens
/// contributed, so the caller can substitute a placeholder for empty
/// right-hand sides.
pub fn gen_code_rrebnf(grammar: &Grammar, root: NodeId, depth: u32, out: &mut String) -> u32 {
    let mut rc = 0;
    let mut loop_count = 0u32;
    let mut cursor = Some(root);

    while let Some(id) = cursor {
        let node = grammar.node(id);
        match &node.kind {
            NodeKind::Nt { sym, .. } => {
                write!(out, " {}", grammar.nonterminal(*sym).name).unwrap();
                rc += 1;
            }
            NodeKind::T { sym } => {
                write!(out, " {}", grammar.terminal(*sym).name).unwrap();
                rc += 1;
            }
            NodeKind::Wt { .. } => {}
            NodeKind::Any { .. } => {
                out.push_str(" ANY");
            }
            NodeKind::Eps | NodeKind::Rslv { .. } | NodeKind::Sem { .. } | NodeKind::Sync { .. } => {}
            NodeKind::Alt { sub, down } => {
                let needs_parens = depth > 0 || loop_count > 0 || node.next.is_some();
                if needs_parens {
                    out.push_str(" (");
                }
                let mut arm = Some((*sub, *down));
                while let Some((sub_id, down_id)) = arm {
                    rc += gen_code_rrebnf(grammar, sub_id, depth + 1, out);
                    arm = down_id.map(|d| {
                        let down_node = grammar.node(d);
                        match &down_node.kind {
                            NodeKind::Alt { sub, down } => (*sub, *down),
                            _ => unreachable!("alt `down` must chain to another alt node"),
                        }
                    });
                    if arm.is_some() {
                        out.push_str(" |");
                    }
                }
                if needs_parens {
                    out.push_str(" )");
                }
            }
            NodeKind::Iter { sub } => {
                let bare = grammar.node(*sub).up;
                if !bare {
                    out.push_str(" (");
                }
                rc += gen_code_rrebnf(grammar, *sub, depth + 1, out);
                if !bare {
                    out.push_str(" )");
                }
                out.push('*');
            }
            NodeKind::Opt { sub } => {
                let bare = grammar.node(*sub).up;
                if !bare {
                    out.push_str(" (");
                }
                rc += gen_code_rrebnf(grammar, *sub, depth + 1, out);
                if !bare {
                    out.push_str(" )");
                }
                out.push('?');
            }
        }

        if node.up {
            break;
        }
        cursor = node.next;
        loop_count += 1;
    }

    rc
}

/// Emit the full `Parser.ebnf` body: one `::=` production per nonterminal,
/// then a `::=` line per alpha-named terminal resolved back to its literal
/// spelling via `grammar.literals`.
pub fn write_rrebnf(grammar: &Grammar) -> String {
    let mut out = String::new();
    out.push_str("//\n// EBNF generated by parser generator to be viewed with a railroad-diagram tool\n//\n");
    out.push_str("\n//\n// productions\n//\n\n");
    for sym in &grammar.nonterminals {
        write!(out, "{} ::= ", sym.name).unwrap();
        let mut body = String::new();
        let token_count = sym
            .graph
            .map(|root| gen_code_rrebnf(grammar, root, 0, &mut body))
            .unwrap_or(0);
        if token_count == 0 {
            out.push_str("\"??()??\"");
        } else {
            out.push_str(body.trim_start());
        }
        out.push('\n');
    }
    out.push_str("\n//\n// tokens\n//\n\n");
    for sym in &grammar.terminals {
        if sym.is_pure_symbol() {
            continue;
        }
        if let Some((literal, _)) = grammar.literals.iter().find(|&(_, &id)| id == sym.n) {
            writeln!(out, "{} ::= {}", sym.name, literal).unwrap();
        }
    }
    out
}
