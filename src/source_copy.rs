//! Source-Slice Copier (C3): emits user action text from the grammar source
//! with indentation and line-directive preservation.

use std::fmt::Write as _;

use crate::collab::SourceBuffer;
use crate::symbol::SourceRange;

/// Seek `buffer` to `pos.beg`, optionally emit a `#line` directive, then
/// copy characters through `pos.end` into `out`.
///
/// On every line break the fragment is re-indented by `indent` tabs, then up
/// to `pos.col` leading blanks/tabs are consumed to preserve the visual
/// column of the original fragment. CR, LF, and CR+LF are all normalized to
/// LF. A trailing newline is appended if `indent > 0`.
///
/// The buffer's read position is left wherever this call leaves it; callers
/// that need to restore an outer position do so themselves.
pub fn copy_source_part(
    buffer: &mut dyn SourceBuffer,
    pos: &SourceRange,
    indent: u32,
    src_name: &str,
    emit_lines: bool,
    out: &mut String,
) {
    buffer.set_pos(pos.beg);
    let mut ch = buffer.read();

    if emit_lines && pos.line != 0 {
        writeln!(out, "\n#line {} \"{}\"", pos.line, src_name).unwrap();
    }
    indent_tabs(out, indent);

    while buffer.pos() <= pos.end {
        while matches!(ch, Some('\r') | Some('\n')) {
            out.push('\n');
            indent_tabs(out, indent);
            if ch == Some('\r') {
                ch = buffer.read();
            }
            if ch == Some('\n') {
                ch = buffer.read();
            }
            let mut skipped = 0u32;
            while skipped < pos.col && matches!(ch, Some(' ') | Some('\t')) {
                ch = buffer.read();
                skipped += 1;
            }
            if buffer.pos() > pos.end {
                return;
            }
        }
        let Some(c) = ch else { break };
        out.push(c);
        ch = buffer.read();
    }

    if indent > 0 {
        out.push('\n');
    }
}

fn indent_tabs(out: &mut String, indent: u32) {
    for _ in 0..indent {
        out.push('\t');
    }
}
