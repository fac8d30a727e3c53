//! Shared value types: directives and the style enums used by both [`crate::event::Event`]
//! and [`crate::emitter::Emitter`].

/// The `%YAML` version directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionDirective {
    /// The major version number. Only `1` is accepted.
    pub major: i32,
    /// The minor version number. Only `1` is accepted.
    pub minor: i32,
}

/// A `%TAG` directive: `handle` abbreviates `prefix`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDirective {
    /// The tag handle, e.g. `!!` or `!e!`.
    pub handle: String,
    /// The tag prefix the handle expands to.
    pub prefix: String,
}

/// The stream encoding.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum Encoding {
    /// Let the emitter choose (defaults to UTF-8).
    #[default]
    Any,
    /// The default UTF-8 encoding.
    Utf8,
    /// The UTF-16-LE encoding with BOM.
    Utf16Le,
    /// The UTF-16-BE encoding with BOM.
    Utf16Be,
}

/// Line break convention.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum LineBreak {
    /// Let the emitter choose (defaults to LF).
    #[default]
    Any,
    /// Use CR for line breaks (old Mac style).
    Cr,
    /// Use LF for line breaks (Unix style).
    Ln,
    /// Use CRLF for line breaks (DOS style).
    CrLn,
}

/// Scalar presentation styles.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum ScalarStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The plain scalar style.
    Plain,
    /// The single-quoted scalar style.
    SingleQuoted,
    /// The double-quoted scalar style.
    DoubleQuoted,
    /// The literal block scalar style (`|`).
    Literal,
    /// The folded block scalar style (`>`).
    Folded,
}

/// Sequence presentation styles.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum SequenceStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The block sequence style.
    Block,
    /// The flow sequence style (`[...]`).
    Flow,
}

/// Mapping presentation styles.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum MappingStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The block mapping style.
    Block,
    /// The flow mapping style (`{...}`).
    Flow,
}
