//! Emitter configuration: the `yaml_emitter_set_*` setter functions.

use crate::emitter::Emitter;
use crate::style::{Encoding, LineBreak};

/// Set the output encoding. `Encoding::Any` (the default) resolves to UTF-8
/// at `STREAM-START`.
pub fn yaml_emitter_set_encoding(emitter: &mut Emitter, encoding: Encoding) {
    emitter.encoding = encoding;
}

/// Request canonical output: every collection in flow style, every tag
/// written explicitly, no scalar folding.
pub fn yaml_emitter_set_canonical(emitter: &mut Emitter, canonical: bool) {
    emitter.canonical = canonical;
}

/// Set the indentation increment. Clamped to `[2, 9]`; values outside that
/// range fall back to `2` at `STREAM-START`.
pub fn yaml_emitter_set_indent(emitter: &mut Emitter, indent: i32) {
    emitter.best_indent = indent;
}

/// Set the preferred line width. Negative values mean unlimited; values at
/// or under twice the indent increment fall back to `80` at `STREAM-START`.
pub fn yaml_emitter_set_width(emitter: &mut Emitter, width: i32) {
    emitter.best_width = width;
}

/// Allow unescaped non-ASCII characters in double-quoted scalars and plain
/// scalar runs. When `false` (the default), any codepoint outside ASCII is
/// treated as a "special character" that forces double-quoted style.
pub fn yaml_emitter_set_unicode(emitter: &mut Emitter, unicode: bool) {
    emitter.unicode = unicode;
}

/// Set the line break convention. `LineBreak::Any` (the default) resolves to
/// LF at `STREAM-START`.
pub fn yaml_emitter_set_break(emitter: &mut Emitter, line_break: LineBreak) {
    emitter.line_break = line_break;
}
