//! Alternative Shape Selector (C7): decides whether an alternation should be
//! emitted as a `switch` over `la->kind` or as an `if`/`else if` ladder.

use crate::collab::SetProvider;
use crate::graph::node::{NodeId, NodeKind};
use crate::symbol::{Grammar, SymbolId};

/// A `switch` is used only if every arm's `Expected0` set is pairwise
/// disjoint (no LL(1) conflict to paper over with fallthrough ordering), no
/// arm opens with a resolver, and there are more than five arms — below
/// that a `switch`'s fixed overhead isn't worth it.
pub fn use_switch(grammar: &Grammar, sets: &dyn SetProvider, alt: NodeId, ctx: SymbolId) -> bool {
    let NodeKind::Alt { .. } = grammar.node(alt).kind else {
        return false;
    };

    let mut seen = crate::graph::sets::TerminalSet::new(grammar.terminal_count());
    let mut n_alts = 0u32;
    let mut cursor = Some(alt);

    while let Some(id) = cursor {
        let NodeKind::Alt { sub, down } = &grammar.node(id).kind else {
            unreachable!("alt chain must only contain Alt nodes");
        };
        let expected0 = sets.expected0(*sub, ctx);
        if seen.overlaps(&expected0) {
            return false;
        }
        seen.union_with(&expected0);
        n_alts += 1;

        if grammar.node(*sub).kind.is_rslv() {
            return false;
        }
        cursor = *down;
    }

    n_alts > 5
}
