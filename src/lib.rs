#![deny(unsafe_code)]
//! A YAML 1.1 emitter core: an event-driven state machine that turns a
//! stream of [`Event`]s into YAML text.
//!
//! ```
//! use yaml_emit_core::config::yaml_emitter_set_output;
//! use yaml_emit_core::emitter::{yaml_emitter_emit, Emitter};
//! use yaml_emit_core::event::Event;
//! use yaml_emit_core::style::{Encoding, ScalarStyle};
//!
//! let mut output = Vec::new();
//! let mut emitter = Emitter::new();
//! yaml_emitter_set_output(&mut emitter, &mut output);
//!
//! yaml_emitter_emit(&mut emitter, Event::stream_start(Encoding::Utf8)).unwrap();
//! yaml_emitter_emit(&mut emitter, Event::document_start(None, &[], true)).unwrap();
//! yaml_emitter_emit(
//!     &mut emitter,
//!     Event::scalar(None, None, "hello", true, false, ScalarStyle::Plain),
//! )
//! .unwrap();
//! yaml_emitter_emit(&mut emitter, Event::document_end(true)).unwrap();
//! yaml_emitter_emit(&mut emitter, Event::stream_end()).unwrap();
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "hello\n");
//! ```
//!
//! There is no parser here: this crate only writes YAML, it does not read
//! it. Document trees, serde integration, and a `dump`-style convenience
//! wrapper are all out of scope; callers drive [`emitter::yaml_emitter_emit`]
//! event by event, the way a serializer would.

pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
mod macros;
pub mod sink;
pub mod style;

pub use config::{
    yaml_emitter_set_break, yaml_emitter_set_canonical, yaml_emitter_set_encoding, yaml_emitter_set_indent,
    yaml_emitter_set_unicode, yaml_emitter_set_width,
};
pub use emitter::{yaml_emitter_emit, Emitter};
pub use error::{EmitterError, WriterError};
pub use event::Event;
pub use sink::yaml_emitter_set_output;
pub use style::{Encoding, LineBreak, MappingStyle, ScalarStyle, SequenceStyle, TagDirective, VersionDirective};

/// The core schema `null` tag.
pub const NULL_TAG: &str = "tag:yaml.org,2002:null";
/// The core schema `bool` tag.
pub const BOOL_TAG: &str = "tag:yaml.org,2002:bool";
/// The core schema `str` tag.
pub const STR_TAG: &str = "tag:yaml.org,2002:str";
/// The core schema `int` tag.
pub const INT_TAG: &str = "tag:yaml.org,2002:int";
/// The core schema `float` tag.
pub const FLOAT_TAG: &str = "tag:yaml.org,2002:float";
/// The core schema `timestamp` tag.
pub const TIMESTAMP_TAG: &str = "tag:yaml.org,2002:timestamp";
/// The core schema `seq` tag.
pub const SEQ_TAG: &str = "tag:yaml.org,2002:seq";
/// The core schema `map` tag.
pub const MAP_TAG: &str = "tag:yaml.org,2002:map";

/// The tag resolved for an untagged, implicit scalar: [`STR_TAG`].
pub const DEFAULT_SCALAR_TAG: &str = STR_TAG;
/// The tag resolved for an untagged, implicit sequence: [`SEQ_TAG`].
pub const DEFAULT_SEQUENCE_TAG: &str = SEQ_TAG;
/// The tag resolved for an untagged, implicit mapping: [`MAP_TAG`].
pub const DEFAULT_MAPPING_TAG: &str = MAP_TAG;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{MappingStyle, SequenceStyle};
    use pretty_assertions::assert_eq;

    fn run(events: Vec<Event>) -> Result<String, EmitterError> {
        let mut output = Vec::new();
        let mut emitter = Emitter::new();
        yaml_emitter_set_output(&mut emitter, &mut output);
        for event in events {
            yaml_emitter_emit(&mut emitter, event)?;
        }
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn empty_stream_produces_no_bytes() {
        let out = run(vec![Event::stream_start(Encoding::Utf8), Event::stream_end()]).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn implicit_document_with_plain_scalar() {
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::scalar(None, None, "hello", true, false, ScalarStyle::Plain),
            Event::document_end(true),
            Event::stream_end(),
        ])
        .unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn block_mapping() {
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::mapping_start(None, None, true, MappingStyle::Block),
            Event::scalar(None, None, "a", true, false, ScalarStyle::Plain),
            Event::scalar(None, None, "1", true, false, ScalarStyle::Plain),
            Event::scalar(None, None, "b", true, false, ScalarStyle::Plain),
            Event::scalar(None, None, "2", true, false, ScalarStyle::Plain),
            Event::mapping_end(),
            Event::document_end(true),
            Event::stream_end(),
        ])
        .unwrap();
        assert_eq!(out, "a: 1\nb: 2\n");
    }

    #[test]
    fn flow_sequence_wraps_at_best_width() {
        let mut output = Vec::new();
        let mut emitter = Emitter::new();
        yaml_emitter_set_width(&mut emitter, 8);
        yaml_emitter_set_output(&mut emitter, &mut output);

        let events = vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::sequence_start(None, None, true, SequenceStyle::Flow),
            Event::scalar(None, None, "alpha", true, false, ScalarStyle::Plain),
            Event::scalar(None, None, "beta", true, false, ScalarStyle::Plain),
            Event::scalar(None, None, "gamma", true, false, ScalarStyle::Plain),
            Event::sequence_end(),
            Event::document_end(true),
            Event::stream_end(),
        ];
        for event in events {
            yaml_emitter_emit(&mut emitter, event).unwrap();
        }
        let out = String::from_utf8(output).unwrap();
        assert_eq!(out, "[alpha,\n  beta, gamma]\n");
    }

    #[test]
    fn double_quoted_escapes_control_and_quote_characters() {
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::scalar(None, None, "a\tb\"c", false, true, ScalarStyle::DoubleQuoted),
            Event::document_end(true),
            Event::stream_end(),
        ])
        .unwrap();
        assert_eq!(out, "\"a\\tb\\\"c\"\n");
    }

    #[test]
    fn literal_scalar_with_clip_chomping() {
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::scalar(None, None, "line1\nline2\n", false, true, ScalarStyle::Literal),
            Event::document_end(true),
            Event::stream_end(),
        ])
        .unwrap();
        assert_eq!(out, "|\n  line1\n  line2\n");
    }

    #[test]
    fn tag_directive_and_tagged_scalar() {
        let tag_directives = vec![TagDirective {
            handle: "!e!".to_string(),
            prefix: "tag:example.com,2024:".to_string(),
        }];
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &tag_directives, false),
            Event::scalar(
                None,
                Some("tag:example.com,2024:t"),
                "hello",
                false,
                false,
                ScalarStyle::Plain,
            ),
            Event::document_end(true),
            Event::stream_end(),
        ])
        .unwrap();
        assert!(out.contains("%TAG !e! tag:example.com,2024:\n"));
        assert!(out.contains("---\n!e!t hello\n") || out.contains("--- !e!t hello\n"));
    }

    #[test]
    fn duplicate_tag_directive_is_rejected() {
        let tag_directives = vec![
            TagDirective {
                handle: "!e!".to_string(),
                prefix: "tag:example.com,2024:a:".to_string(),
            },
            TagDirective {
                handle: "!e!".to_string(),
                prefix: "tag:example.com,2024:b:".to_string(),
            },
        ];
        // DOCUMENT-START only dispatches once an event is queued behind it,
        // so a trailing event is needed for its validation to actually run.
        let err = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &tag_directives, false),
            Event::document_end(true),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate %TAG directive");
    }

    #[test]
    fn emitter_stays_failed_after_first_error() {
        let mut output = Vec::new();
        let mut emitter = Emitter::new();
        yaml_emitter_set_output(&mut emitter, &mut output);

        let tag_directives = vec![
            TagDirective {
                handle: "!e!".to_string(),
                prefix: "tag:example.com,2024:a:".to_string(),
            },
            TagDirective {
                handle: "!e!".to_string(),
                prefix: "tag:example.com,2024:b:".to_string(),
            },
        ];
        yaml_emitter_emit(&mut emitter, Event::stream_start(Encoding::Utf8)).unwrap();
        yaml_emitter_emit(&mut emitter, Event::document_start(None, &tag_directives, false)).unwrap();
        // DOCUMENT-START's dispatch was deferred until this call queued an
        // event behind it, so the duplicate-%TAG error surfaces here.
        let first_err = yaml_emitter_emit(&mut emitter, Event::document_end(true))
            .unwrap_err()
            .to_string();
        assert_eq!(first_err, "duplicate %TAG directive");

        let second_err = yaml_emitter_emit(&mut emitter, Event::stream_end()).unwrap_err();
        assert_eq!(second_err.to_string(), format!("emitter already failed: {first_err}"));
        assert!(output.is_empty(), "a failed emitter must not touch the sink again");
    }

    #[test]
    fn alias_references_a_prior_anchor() {
        let out = run(vec![
            Event::stream_start(Encoding::Utf8),
            Event::document_start(None, &[], true),
            Event::sequence_start(Some("a1"), None, true, SequenceStyle::Block),
            Event::scalar(None, None, "x", true, false, ScalarStyle::Plain),
            Event::alias("a1"),
            Event::sequence_end(),
            Event::document_end(true),
            Event::stream_end(),
        ]);
        // An ALIAS is only valid where a node was expected; here it is a
        // second sequence item, which is a legal node position.
        assert!(out.is_ok());
    }
}
