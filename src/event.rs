//! The event shapes consumed by the emitter.
//!
//! Unlike the parser-facing event type this lineage inherits from, an event
//! here carries no trailing state beyond its payload — there is no parser in
//! this crate to have stamped a source position onto it, so there is no
//! `Mark` to carry.

use crate::style::{Encoding, MappingStyle, ScalarStyle, SequenceStyle, TagDirective, VersionDirective};

/// A single structural token in the stream the emitter consumes.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// Opens the stream. Carries the desired output encoding.
    StreamStart {
        /// The document encoding.
        encoding: Encoding,
    },
    /// Closes the stream. No further events may follow.
    StreamEnd,
    /// Opens a document.
    DocumentStart {
        /// The `%YAML` version directive, if any.
        version_directive: Option<VersionDirective>,
        /// The `%TAG` directives declared for this document.
        tag_directives: Vec<TagDirective>,
        /// Whether the `---` marker may be omitted.
        implicit: bool,
    },
    /// Closes a document.
    DocumentEnd {
        /// Whether the `...` marker may be omitted.
        implicit: bool,
    },
    /// A reference to a previously anchored node.
    Alias {
        /// The anchor being referenced.
        anchor: String,
    },
    /// A scalar value.
    Scalar {
        /// An optional anchor to attach to this node.
        anchor: Option<String>,
        /// An optional explicit tag.
        tag: Option<String>,
        /// The scalar's content.
        value: String,
        /// Whether the tag may be omitted if the plain style is chosen.
        plain_implicit: bool,
        /// Whether the tag may be omitted for any non-plain style.
        quoted_implicit: bool,
        /// The caller's requested style (the emitter may override it).
        style: ScalarStyle,
    },
    /// Opens a sequence.
    SequenceStart {
        /// An optional anchor to attach to this node.
        anchor: Option<String>,
        /// An optional explicit tag.
        tag: Option<String>,
        /// Whether the tag may be omitted.
        implicit: bool,
        /// The caller's requested style (the emitter may override it).
        style: SequenceStyle,
    },
    /// Closes a sequence.
    SequenceEnd,
    /// Opens a mapping.
    MappingStart {
        /// An optional anchor to attach to this node.
        anchor: Option<String>,
        /// An optional explicit tag.
        tag: Option<String>,
        /// Whether the tag may be omitted.
        implicit: bool,
        /// The caller's requested style (the emitter may override it).
        style: MappingStyle,
    },
    /// Closes a mapping.
    MappingEnd,
}

impl Event {
    /// Create the STREAM-START event.
    pub fn stream_start(encoding: Encoding) -> Self {
        Self::StreamStart { encoding }
    }

    /// Create the STREAM-END event.
    pub fn stream_end() -> Self {
        Self::StreamEnd
    }

    /// Create the DOCUMENT-START event.
    ///
    /// The `implicit` argument is a stylistic request; the emitter may still
    /// write an explicit `---` (e.g. when `%TAG` directives are present).
    pub fn document_start(
        version_directive: Option<VersionDirective>,
        tag_directives: &[TagDirective],
        implicit: bool,
    ) -> Self {
        Self::DocumentStart {
            version_directive,
            tag_directives: tag_directives.to_vec(),
            implicit,
        }
    }

    /// Create the DOCUMENT-END event.
    pub fn document_end(implicit: bool) -> Self {
        Self::DocumentEnd { implicit }
    }

    /// Create an ALIAS event.
    pub fn alias(anchor: &str) -> Self {
        Self::Alias {
            anchor: anchor.to_string(),
        }
    }

    /// Create a SCALAR event.
    ///
    /// Either `tag` must be set, or one of `plain_implicit`/`quoted_implicit`
    /// must be true, or [`crate::emitter::yaml_emitter_emit`] returns
    /// [`crate::error::EmitterError`].
    pub fn scalar(
        anchor: Option<&str>,
        tag: Option<&str>,
        value: &str,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarStyle,
    ) -> Self {
        Self::Scalar {
            anchor: anchor.map(str::to_string),
            tag: tag.map(str::to_string),
            value: value.to_string(),
            plain_implicit,
            quoted_implicit,
            style,
        }
    }

    /// Create a SEQUENCE-START event.
    pub fn sequence_start(
        anchor: Option<&str>,
        tag: Option<&str>,
        implicit: bool,
        style: SequenceStyle,
    ) -> Self {
        Self::SequenceStart {
            anchor: anchor.map(str::to_string),
            tag: tag.map(str::to_string),
            implicit,
            style,
        }
    }

    /// Create a SEQUENCE-END event.
    pub fn sequence_end() -> Self {
        Self::SequenceEnd
    }

    /// Create a MAPPING-START event.
    pub fn mapping_start(
        anchor: Option<&str>,
        tag: Option<&str>,
        implicit: bool,
        style: MappingStyle,
    ) -> Self {
        Self::MappingStart {
            anchor: anchor.map(str::to_string),
            tag: tag.map(str::to_string),
            implicit,
            style,
        }
    }

    /// Create a MAPPING-END event.
    pub fn mapping_end() -> Self {
        Self::MappingEnd
    }
}
