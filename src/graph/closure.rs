//! Derivation Closure (C2): expands a terminal bitset with every terminal
//! that transitively inherits from a member.

use crate::graph::sets::TerminalSet;
use crate::symbol::Grammar;

/// Least fixed point of `s` under: if `sym ∈ s` and `baseSym.inherits ==
/// sym`, add `baseSym`. Used both at `switch`-label emission and when
/// writing the static `StartOf` matrix, so a parent terminal named in a
/// grammar set accepts every subtype terminal at runtime.
pub fn derivations_of(grammar: &Grammar, s: &TerminalSet) -> TerminalSet {
    let mut out = s.clone();
    let mut done = false;
    while !done {
        done = true;
        for sym in &grammar.terminals {
            if !out.contains(sym.n) {
                continue;
            }
            for base in &grammar.terminals {
                if base.inherits == Some(sym.n) && !out.contains(base.n) {
                    out.insert(base.n);
                    done = false;
                }
            }
        }
    }
    out
}
