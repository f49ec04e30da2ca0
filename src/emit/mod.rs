//! The decision-tree synthesizer, the graph-to-code walker, the
//! header/production emitter, the RR-EBNF emitter, and the frame composer.

pub mod code;
pub mod cond;
pub mod frame;
pub mod header;
pub mod shape;

use std::fmt::Write;

use crate::symbol::Symbol;

/// Render a symbol the way a generated expression references it: terminals
/// whose name doesn't start with a letter (pure-symbol literals like `"+"`)
/// are referenced by their numeric id with a name comment; identifier-named
/// terminals and pragmas are referenced by their `_name` enum constant.
pub fn write_symbol_or_code(out: &mut String, sym: &Symbol) {
    if sym.is_pure_symbol() {
        write!(out, "{} /* {} */", sym.n, sym.name).unwrap();
    } else {
        write!(out, "_{}", sym.name).unwrap();
    }
}

#[cfg(test)]
mod emit_mod_tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn identifier_terminal_uses_enum_constant() {
        let sym = Symbol::terminal("ident", 4);
        let mut out = String::new();
        write_symbol_or_code(&mut out, &sym);
        assert_eq!(out, "_ident");
    }

    #[test]
    fn pure_symbol_terminal_uses_numeric_code() {
        let sym = Symbol::terminal("\"+\"", 7);
        let mut out = String::new();
        write_symbol_or_code(&mut out, &sym);
        assert_eq!(out, "7 /* \"+\" */");
    }
}
