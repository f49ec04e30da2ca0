//! Frame Composer (C10): stitches the pieces emitted by every other
//! component into the frame template, producing the parser header and
//! source files plus the RR-EBNF dump.

use std::fmt::Write as _;

use crate::collab::{FrameSource, SetProvider, SourceBuffer};
use crate::emit::code::CodeEmitter;
use crate::emit::header::{gen_code_pragmas, gen_productions, gen_productions_header, gen_tokens_header, gen_token_base, init_sets};
use crate::errors_table::{ErrorKind, ErrorTable};
use crate::graph::condset::CondSetTable;
use crate::graph::dump::write_rrebnf;
use crate::source_copy::copy_source_part;
use crate::stats::Stats;
use crate::symbol::Grammar;
use crate::{Error, Result};

/// Output-shaping knobs the driver supplies that the core cannot infer from
/// the grammar graph itself. Inputs already carried on [`Grammar`] (the
/// namespace name, `#line` emission, and the end-of-file check — see
/// `symbol::Grammar`) are read from there instead of duplicated here.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Build in AST-tracking mode (`PARSER_WITH_AST`).
    pub with_ast: bool,
    /// `using` declarations copied verbatim at the top of the header.
    pub using_text: Option<String>,
    /// Sets with this many members or fewer are inlined as an `IsKind`
    /// disjunction by [`crate::emit::cond::gen_cond`] rather than interned
    /// into the condition-set table.
    pub max_term: usize,
    /// Separator splitting `Grammar::ns_name` into nested `namespace`
    /// blocks by [`gen_namespace_open`].
    pub namespace_separator: char,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            with_ast: false,
            using_text: None,
            max_term: 3,
            namespace_separator: '.',
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ast_tracking(mut self, enabled: bool) -> Self {
        self.with_ast = enabled;
        self
    }

    pub fn with_max_term(mut self, max_term: usize) -> Self {
        self.max_term = max_term;
        self
    }

    pub fn with_namespace_separator(mut self, separator: char) -> Self {
        self.namespace_separator = separator;
        self
    }
}

/// Write a short boilerplate comment noting the output is generated;
/// emitted once per output file, before its `-->begin` frame part is
/// skipped.
pub fn gen_copyright(out: &mut String) {
    out.push_str("// This file was generated; changes will be overwritten.\n");
}

/// Derive the include-guard-style prefix from a (possibly separator-joined)
/// namespace name — each segment uppercased and underscore-joined. Emitted
/// once per `-->prefix` frame part copied in the header.
pub fn gen_prefix_from_namespace(ns_name: &str, separator: char, out: &mut String) {
    for segment in ns_name.split(separator) {
        if segment.is_empty() {
            continue;
        }
        write!(out, "{}_", segment.to_uppercase()).unwrap();
    }
}

/// Split the namespace name into nested `namespace X {` opens, one per
/// `separator`-delimited segment; returns the segment count so the caller
/// knows how many closing braces to emit.
pub fn gen_namespace_open(ns_name: &str, separator: char, out: &mut String) -> u32 {
    if ns_name.is_empty() {
        return 0;
    }
    let mut count = 0;
    for segment in ns_name.split(separator) {
        writeln!(out, "namespace {segment} {{").unwrap();
        count += 1;
    }
    count
}

pub fn gen_namespace_close(count: u32, out: &mut String) {
    for _ in 0..count {
        out.push_str("} // namespace\n");
    }
}

/// Orchestrates a full parser-generation run: seeds the error table with one
/// `expected` message per terminal, streams the frame template around each
/// generated section, and writes the header, source, and RR-EBNF outputs.
///
/// `header_out`/`source_out` receive the two generated files; `frame`
/// supplies the `-->marker`-delimited template text they're woven into.
pub fn write_parser(
    grammar: &Grammar,
    sets: &dyn SetProvider,
    buffer: &mut dyn SourceBuffer,
    frame: &mut dyn FrameSource,
    opts: &EmitOptions,
    header_out: &mut dyn std::io::Write,
    source_out: &mut dyn std::io::Write,
) -> Result<(String, Stats)> {
    let mut errors = ErrorTable::new();
    for sym in &grammar.terminals {
        errors.new_error(ErrorKind::TErr, sym);
    }

    let mut cond_table = CondSetTable::new(grammar.all_sync_sets.clone());

    let mut header = String::new();
    gen_copyright(&mut header);
    require_marker(frame.skip_part("-->begin")?, "-->begin")?;

    require_marker(frame.copy_part("-->prefix", &mut VecSink(&mut header))?, "-->prefix")?;
    gen_prefix_from_namespace(&grammar.ns_name, opts.namespace_separator, &mut header);

    require_marker(frame.copy_part("-->prefix", &mut VecSink(&mut header))?, "-->prefix")?;
    gen_prefix_from_namespace(&grammar.ns_name, opts.namespace_separator, &mut header);

    require_marker(frame.copy_part("-->headerdef", &mut VecSink(&mut header))?, "-->headerdef")?;

    if let Some(using_text) = &opts.using_text {
        header.push_str(using_text);
        header.push('\n');
    }

    require_marker(frame.copy_part("-->namespace_open", &mut VecSink(&mut header))?, "-->namespace_open")?;
    let nr_of_ns = gen_namespace_open(&grammar.ns_name, opts.namespace_separator, &mut header);

    require_marker(frame.copy_part("-->constantsheader", &mut VecSink(&mut header))?, "-->constantsheader")?;
    gen_tokens_header(grammar, opts.with_ast, &mut header);
    header.push_str("\tint maxT;\n");

    require_marker(frame.copy_part("-->declarations", &mut VecSink(&mut header))?, "-->declarations")?;
    if let Some(pos) = &grammar.sem_decl_pos {
        copy_source_part(buffer, pos, 0, &grammar.src_name, grammar.emit_lines, &mut header);
    }

    require_marker(frame.copy_part("-->productionsheader", &mut VecSink(&mut header))?, "-->productionsheader")?;
    gen_productions_header(grammar, buffer, &grammar.src_name, grammar.emit_lines, &mut header);

    require_marker(frame.copy_part("-->namespace_close", &mut VecSink(&mut header))?, "-->namespace_close")?;
    gen_namespace_close(nr_of_ns, &mut header);

    require_marker(frame.copy_part("-->implementation", &mut VecSink(&mut header))?, "-->implementation")?;
    header_out
        .write_all(header.as_bytes())
        .map_err(|source| Error::Io { what: "parser header output", source })?;

    let mut source = String::new();
    gen_copyright(&mut source);
    require_marker(frame.copy_part("-->namespace_open", &mut VecSink(&mut source))?, "-->namespace_open")?;
    let nr_of_ns = gen_namespace_open(&grammar.ns_name, opts.namespace_separator, &mut source);

    require_marker(frame.copy_part("-->pragmas", &mut VecSink(&mut source))?, "-->pragmas")?;
    gen_code_pragmas(grammar, buffer, &grammar.src_name, grammar.emit_lines, &mut source);

    require_marker(frame.copy_part("-->tbase", &mut VecSink(&mut source))?, "-->tbase")?;
    gen_token_base(grammar, &mut source);

    require_marker(frame.copy_part("-->productions", &mut VecSink(&mut source))?, "-->productions")?;
    {
        let mut emitter = CodeEmitter {
            grammar,
            sets,
            buffer,
            cond_table: &mut cond_table,
            errors: &mut errors,
            src_name: &grammar.src_name,
            emit_lines: grammar.emit_lines,
            max_term: opts.max_term,
            with_ast: opts.with_ast,
        };
        gen_productions(grammar, &mut emitter, opts.with_ast, &mut source);
    }

    require_marker(frame.copy_part("-->parseRoot", &mut VecSink(&mut source))?, "-->parseRoot")?;
    let start = grammar.start_symbol();
    write!(source, "\t{}_NT();\n", start.name).unwrap();
    if grammar.check_eof {
        source.push_str("\tExpect(0);");
    }

    require_marker(frame.copy_part("-->constants", &mut VecSink(&mut source))?, "-->constants")?;
    write!(source, "\tmaxT = {};\n", grammar.terminal_count() as i64 - 1).unwrap();

    require_marker(frame.copy_part("-->initialization", &mut VecSink(&mut source))?, "-->initialization")?;
    init_sets(grammar, &cond_table, &mut source);

    require_marker(frame.copy_part("-->errors", &mut VecSink(&mut source))?, "-->errors")?;
    source.push_str(&errors.render());

    require_marker(frame.copy_part("-->namespace_close", &mut VecSink(&mut source))?, "-->namespace_close")?;
    gen_namespace_close(nr_of_ns, &mut source);

    frame.copy_rest(&mut VecSink(&mut source))?;
    source_out
        .write_all(source.as_bytes())
        .map_err(|source| Error::Io { what: "parser source output", source })?;

    let stats = Stats::collect(grammar, &cond_table);
    Ok((write_rrebnf(grammar), stats))
}

fn require_marker(found: bool, marker: &'static str) -> Result<()> {
    if found {
        Ok(())
    } else {
        Err(Error::MissingMarker { marker })
    }
}

/// Adapts a `&mut String` to `std::io::Write`, for feeding `FrameSource`'s
/// byte-oriented API while the rest of the core works in `String`.
struct VecSink<'a>(&'a mut String);

impl std::io::Write for VecSink<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
