//! Production & Header Emitter (C8): the token/nonterminal enums, the
//! per-production method stubs and bodies, the pragma dispatch block, the
//! inheritance base-type table, and the static `StartOf` matrix.

use std::fmt::Write as _;

use crate::collab::SourceBuffer;
use crate::emit::code::CodeEmitter;
use crate::emit::write_symbol_or_code;
use crate::graph::closure::derivations_of;
use crate::graph::condset::CondSetTable;
use crate::graph::sets::TerminalSet;
use crate::source_copy::copy_source_part;
use crate::symbol::Grammar;

/// Emit the `enum { _name = n, ... }` of terminal and pragma kinds, plus (for
/// AST-tracking builds) a parallel `enum eNonTerminals`.
pub fn gen_tokens_header(grammar: &Grammar, with_ast: bool, out: &mut String) {
    out.push_str("\tenum {\n");
    let mut first = true;
    for sym in &grammar.terminals {
        if sym.is_pure_symbol() {
            continue;
        }
        if first {
            first = false;
        } else {
            out.push('\n');
        }
        write!(out, "\t\t_{}={},", sym.name, sym.n).unwrap();
        if let Some(parent) = sym.inherits {
            write!(out, " // INHERITS -> {}", grammar.terminal(parent).name).unwrap();
        }
    }
    for sym in &grammar.pragmas {
        if first {
            first = false;
        } else {
            out.push('\n');
        }
        write!(out, "\t\t_{}={},", sym.name, sym.n).unwrap();
    }
    out.push_str("\n\t};\n");

    if with_ast {
        out.push_str("#ifdef PARSER_WITH_AST\n\tenum eNonTerminals{\n");
        for (i, sym) in grammar.nonterminals.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            write!(out, "\t\t_{}={}", sym.name, sym.n).unwrap();
        }
        out.push_str("\n\t};\n#endif\n");
    }
}

/// Emit the pragma-dispatch block: `if (la->kind == _name) { <action> }` for
/// every declared pragma.
pub fn gen_code_pragmas(grammar: &Grammar, buffer: &mut dyn SourceBuffer, src_name: &str, emit_lines: bool, out: &mut String) {
    for sym in &grammar.pragmas {
        out.push_str("\t\tif (la->kind == ");
        write_symbol_or_code(out, sym);
        out.push_str(") {\n");
        if let Some(pos) = &sym.sem_pos {
            copy_source_part(buffer, pos, 4, src_name, emit_lines, out);
        }
        out.push_str("\t\t}\n");
    }
}

/// Emit the static `tBase` table mapping each terminal to the id of the
/// terminal it inherits from, or `-1` if it doesn't inherit.
pub fn gen_token_base(grammar: &Grammar, out: &mut String) {
    write!(out, "\tstatic const int tBase[{}] = {{", grammar.terminal_count()).unwrap();
    for (i, sym) in grammar.terminals.iter().enumerate() {
        if i % 20 == 0 {
            out.push_str("\n\t\t");
        }
        match sym.inherits {
            None => out.push_str("-1,"),
            Some(parent) => write!(out, "{parent},").unwrap(),
        }
    }
    out.push_str("\n\t};\n");
}

/// Emit `void Name_NT(<copied attrs>);` for every nonterminal.
pub fn gen_productions_header(grammar: &Grammar, buffer: &mut dyn SourceBuffer, src_name: &str, emit_lines: bool, out: &mut String) {
    for sym in &grammar.nonterminals {
        write!(out, "\tvoid {}_NT(", sym.name).unwrap();
        if let Some(pos) = &sym.attr_pos {
            copy_source_part(buffer, pos, 0, src_name, emit_lines, out);
        }
        out.push_str(");\n");
    }
}

/// Emit every nonterminal's method body: copied semantic declarations, the
/// walked graph body, and (for AST-tracking builds) the push/pop bracketing.
pub fn gen_productions(grammar: &Grammar, emitter: &mut CodeEmitter, with_ast: bool, out: &mut String) {
    for (i, sym) in grammar.nonterminals.iter().enumerate() {
        write!(out, "void Parser::{}_NT(", sym.name).unwrap();
        if let Some(pos) = &sym.attr_pos {
            copy_source_part(emitter.buffer, pos, 0, emitter.src_name, emitter.emit_lines, out);
        }
        out.push_str(") {\n");
        if let Some(pos) = &sym.sem_pos {
            copy_source_part(emitter.buffer, pos, 2, emitter.src_name, emitter.emit_lines, out);
        }

        if with_ast {
            out.push_str("#ifdef PARSER_WITH_AST\n");
            if i == 0 {
                write!(
                    out,
                    "\t\tToken *ntTok = new Token(); ntTok->kind = eNonTerminals::_{}; ntTok->line = 0; ntTok->val = coco_string_create(\"{}\");ast_root = new SynTree( ntTok ); ast_stack.Clear(); ast_stack.Add(ast_root);\n",
                    sym.name, sym.name
                )
                .unwrap();
            } else {
                write!(
                    out,
                    "\t\tbool ntAdded = AstAddNonTerminal(eNonTerminals::_{}, \"{}\", la->line);\n",
                    sym.name, sym.name
                )
                .unwrap();
            }
            out.push_str("#endif\n");
        }

        let mut ba = TerminalSet::new(grammar.terminal_count());
        emitter.gen_code(sym.graph, 2, &mut ba, sym.n, &sym.name, out);

        if with_ast {
            out.push_str("#ifdef PARSER_WITH_AST\n");
            if i == 0 {
                out.push_str("\t\tAstPopNonTerminal();\n");
            } else {
                out.push_str("\t\tif(ntAdded) AstPopNonTerminal();\n");
            }
            out.push_str("#endif\n");
        }
        out.push_str("}\n\n");
    }
}

/// Emit the static `set[i][terminal]` matrix (`StartOf`'s backing store), one
/// row per entry in `cond_table`, widened by one trailing always-false
/// column for end-of-file.
pub fn init_sets(grammar: &Grammar, cond_table: &CondSetTable, out: &mut String) {
    write!(
        out,
        "\tstatic const bool set[{}][{}] = {{\n",
        cond_table.len(),
        grammar.terminal_count() + 1
    )
    .unwrap();

    for (i, entry) in cond_table.entries().iter().enumerate() {
        let derived = derivations_of(grammar, entry);
        out.push_str("\t\t{");
        for (j, sym) in grammar.terminals.iter().enumerate() {
            out.push_str(if derived.contains(sym.n) { "T," } else { "x," });
            if (j + 1) % 4 == 0 {
                out.push(' ');
            }
        }
        if i == cond_table.len() - 1 {
            out.push_str("x}\n");
        } else {
            out.push_str("x},\n");
        }
    }
    out.push_str("\t};\n\n");
}
