//! Components B–G of the emission engine: the [`Emitter`] struct, the
//! 17-state state machine, event lookahead, scalar analysis, and the
//! scalar/low-level writers.

use std::collections::VecDeque;

use crate::error::{EmitterError, WriterError};
use crate::event::Event;
use crate::macros::{
    is_alnum_strict, is_alpha, is_ascii, is_blank, is_blankz, is_bom, is_break, is_breakz, is_printable, is_space,
};
use crate::sink::OUTPUT_BUFFER_SIZE;
use crate::style::{Encoding, LineBreak, MappingStyle, ScalarStyle, SequenceStyle, TagDirective, VersionDirective};

/// The emitter's dispatch states.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub(crate) enum EmitterState {
    #[default]
    StreamStart,
    FirstDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    FlowSequenceFirstItem,
    FlowSequenceItem,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingSimpleValue,
    FlowMappingValue,
    BlockSequenceFirstItem,
    BlockSequenceItem,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingSimpleValue,
    BlockMappingValue,
    End,
}

/// The YAML 1.1 emitter.
///
/// All fields are private; configure the emitter with the `yaml_emitter_set_*`
/// functions in [`crate::config`], attach an output sink with
/// [`crate::config::yaml_emitter_set_output`], then drive it with
/// [`yaml_emitter_emit`].
#[non_exhaustive]
pub struct Emitter<'w> {
    pub(crate) write_handler: Option<&'w mut dyn std::io::Write>,
    pub(crate) buffer: String,
    pub(crate) raw_buffer: Vec<u8>,
    pub(crate) encoding: Encoding,
    pub(crate) canonical: bool,
    pub(crate) best_indent: i32,
    pub(crate) best_width: i32,
    pub(crate) unicode: bool,
    pub(crate) line_break: LineBreak,
    failure: Option<String>,
    states: Vec<EmitterState>,
    state: EmitterState,
    events: VecDeque<Event>,
    indents: Vec<i32>,
    tag_directives: Vec<TagDirective>,
    indent: i32,
    flow_level: i32,
    root_context: bool,
    sequence_context: bool,
    mapping_context: bool,
    simple_key_context: bool,
    line: i32,
    column: i32,
    whitespace: bool,
    indention: bool,
    open_ended: i32,
}

impl<'w> Default for Emitter<'w> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'w> Emitter<'w> {
    /// Create a new emitter with no output sink attached yet.
    pub fn new() -> Self {
        Emitter {
            write_handler: None,
            buffer: String::with_capacity(OUTPUT_BUFFER_SIZE),
            raw_buffer: Vec::with_capacity(OUTPUT_BUFFER_SIZE),
            encoding: Encoding::Any,
            canonical: false,
            best_indent: 0,
            best_width: 0,
            unicode: false,
            line_break: LineBreak::default(),
            failure: None,
            states: Vec::with_capacity(16),
            state: EmitterState::default(),
            events: VecDeque::with_capacity(16),
            indents: Vec::with_capacity(16),
            tag_directives: Vec::with_capacity(16),
            indent: 0,
            flow_level: 0,
            root_context: false,
            sequence_context: false,
            mapping_context: false,
            simple_key_context: false,
            line: 0,
            column: 0,
            whitespace: false,
            indention: false,
            open_ended: 0,
        }
    }

    /// The current line number (number of line breaks written so far).
    pub fn line(&self) -> i32 {
        self.line
    }

    /// The current column (character offset since the last line break).
    pub fn column(&self) -> i32 {
        self.column
    }
}

fn flush_if_needed(emitter: &mut Emitter) -> Result<(), WriterError> {
    if emitter.buffer.len() < OUTPUT_BUFFER_SIZE - 5 {
        Ok(())
    } else {
        crate::sink::yaml_emitter_flush(emitter)
    }
}

fn put(emitter: &mut Emitter, value: u8) -> Result<(), WriterError> {
    flush_if_needed(emitter)?;
    emitter.buffer.push(char::from(value));
    emitter.column += 1;
    Ok(())
}

fn put_break(emitter: &mut Emitter) -> Result<(), WriterError> {
    flush_if_needed(emitter)?;
    match emitter.line_break {
        LineBreak::Cr => emitter.buffer.push('\r'),
        LineBreak::Ln => emitter.buffer.push('\n'),
        LineBreak::CrLn => emitter.buffer.push_str("\r\n"),
        LineBreak::Any => unreachable!("line_break resolved to a concrete value at STREAM-START"),
    }
    emitter.column = 0;
    emitter.line += 1;
    Ok(())
}

fn write_char(emitter: &mut Emitter, ch: char) -> Result<(), WriterError> {
    flush_if_needed(emitter)?;
    emitter.buffer.push(ch);
    emitter.column += 1;
    Ok(())
}

fn write_str(emitter: &mut Emitter, string: &str) -> Result<(), WriterError> {
    for ch in string.chars() {
        write_char(emitter, ch)?;
    }
    Ok(())
}

/// Write a single character that may itself be a line break, updating
/// `line`/`column` either way.
fn write_break_char(emitter: &mut Emitter, ch: char) -> Result<(), WriterError> {
    if ch == '\n' {
        put_break(emitter)
    } else {
        write_char(emitter, ch)?;
        emitter.column = 0;
        emitter.line += 1;
        Ok(())
    }
}

#[derive(Default)]
struct Analysis<'a> {
    anchor: Option<AnchorAnalysis<'a>>,
    tag: Option<TagAnalysis<'a>>,
    scalar: Option<ScalarAnalysis<'a>>,
}

struct AnchorAnalysis<'a> {
    anchor: &'a str,
    alias: bool,
}

struct TagAnalysis<'a> {
    handle: &'a str,
    suffix: &'a str,
}

struct ScalarAnalysis<'a> {
    value: &'a str,
    multiline: bool,
    flow_plain_allowed: bool,
    block_plain_allowed: bool,
    single_quoted_allowed: bool,
    block_allowed: bool,
    style: ScalarStyle,
}

fn emitter_error<T>(problem: &'static str) -> Result<T, EmitterError> {
    log::error!("emitter error: {problem}");
    Err(EmitterError::Problem(problem))
}

/// Feed one event to the emitter.
///
/// The engine takes ownership of `event` and is responsible for emitting
/// everything it implies before returning. Output may be withheld until
/// enough lookahead is available; only a bounded lookahead (at most 3
/// events) is ever required.
///
/// Once any call returns an error, the emitter is terminal: every later call
/// returns [`EmitterError::Failed`] immediately and never touches the sink.
pub fn yaml_emitter_emit(emitter: &mut Emitter, event: Event) -> Result<(), EmitterError> {
    if let Some(message) = &emitter.failure {
        return Err(EmitterError::Failed(message.clone()));
    }

    match yaml_emitter_emit_inner(emitter, event) {
        Ok(()) => Ok(()),
        Err(err) => {
            emitter.failure = Some(err.to_string());
            Err(err)
        }
    }
}

fn yaml_emitter_emit_inner(emitter: &mut Emitter, event: Event) -> Result<(), EmitterError> {
    emitter.events.push_back(event);
    while let Some(event) = next_emittable_event(emitter) {
        let tag_directives = std::mem::take(&mut emitter.tag_directives);
        let analysis_result = analyze_event(emitter, &event, &tag_directives);
        emitter.tag_directives = tag_directives;

        let mut analysis = analysis_result?;
        log::trace!("emitter state {:?} <- {}", emitter.state, event_name(&event));
        dispatch_state(emitter, &event, &mut analysis)?;
    }
    Ok(())
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::StreamStart { .. } => "STREAM-START",
        Event::StreamEnd => "STREAM-END",
        Event::DocumentStart { .. } => "DOCUMENT-START",
        Event::DocumentEnd { .. } => "DOCUMENT-END",
        Event::Alias { .. } => "ALIAS",
        Event::Scalar { .. } => "SCALAR",
        Event::SequenceStart { .. } => "SEQUENCE-START",
        Event::SequenceEnd => "SEQUENCE-END",
        Event::MappingStart { .. } => "MAPPING-START",
        Event::MappingEnd => "MAPPING-END",
    }
}

/// Pop the head event if enough lookahead is queued behind it; otherwise
/// leave the queue untouched and return `None`.
fn next_emittable_event(emitter: &mut Emitter) -> Option<Event> {
    let first = emitter.events.front()?;

    let accumulate = match first {
        Event::DocumentStart { .. } => 1,
        Event::SequenceStart { .. } => 2,
        Event::MappingStart { .. } => 3,
        _ => return emitter.events.pop_front(),
    };

    if emitter.events.len() > accumulate {
        return emitter.events.pop_front();
    }

    let mut level = 0i32;
    for event in &emitter.events {
        match event {
            Event::StreamStart { .. }
            | Event::DocumentStart { .. }
            | Event::SequenceStart { .. }
            | Event::MappingStart { .. } => level += 1,
            Event::StreamEnd | Event::DocumentEnd { .. } | Event::SequenceEnd | Event::MappingEnd => {
                level -= 1;
            }
            _ => {}
        }
        if level == 0 {
            return emitter.events.pop_front();
        }
    }
    None
}

fn append_tag_directive(
    emitter: &mut Emitter,
    value: TagDirective,
    allow_duplicates: bool,
) -> Result<(), EmitterError> {
    for existing in &emitter.tag_directives {
        if value.handle == existing.handle {
            if allow_duplicates {
                return Ok(());
            }
            return emitter_error("duplicate %TAG directive");
        }
    }
    emitter.tag_directives.push(value);
    Ok(())
}

fn increase_indent(emitter: &mut Emitter, flow: bool, indentless: bool) {
    emitter.indents.push(emitter.indent);
    if emitter.indent < 0 {
        emitter.indent = if flow { emitter.best_indent } else { 0 };
    } else if !indentless {
        emitter.indent += emitter.best_indent;
    }
}

fn dispatch_state<'a>(
    emitter: &mut Emitter,
    event: &'a Event,
    analysis: &mut Analysis<'a>,
) -> Result<(), EmitterError> {
    match emitter.state {
        EmitterState::StreamStart => emit_stream_start(emitter, event),
        EmitterState::FirstDocumentStart => emit_document_start(emitter, event, true),
        EmitterState::DocumentStart => emit_document_start(emitter, event, false),
        EmitterState::DocumentContent => emit_document_content(emitter, event, analysis),
        EmitterState::DocumentEnd => emit_document_end(emitter, event),
        EmitterState::FlowSequenceFirstItem => emit_flow_sequence_item(emitter, event, true, analysis),
        EmitterState::FlowSequenceItem => emit_flow_sequence_item(emitter, event, false, analysis),
        EmitterState::FlowMappingFirstKey => emit_flow_mapping_key(emitter, event, true, analysis),
        EmitterState::FlowMappingKey => emit_flow_mapping_key(emitter, event, false, analysis),
        EmitterState::FlowMappingSimpleValue => emit_flow_mapping_value(emitter, event, true, analysis),
        EmitterState::FlowMappingValue => emit_flow_mapping_value(emitter, event, false, analysis),
        EmitterState::BlockSequenceFirstItem => emit_block_sequence_item(emitter, event, true, analysis),
        EmitterState::BlockSequenceItem => emit_block_sequence_item(emitter, event, false, analysis),
        EmitterState::BlockMappingFirstKey => emit_block_mapping_key(emitter, event, true, analysis),
        EmitterState::BlockMappingKey => emit_block_mapping_key(emitter, event, false, analysis),
        EmitterState::BlockMappingSimpleValue => emit_block_mapping_value(emitter, event, true, analysis),
        EmitterState::BlockMappingValue => emit_block_mapping_value(emitter, event, false, analysis),
        EmitterState::End => emitter_error("expected nothing after STREAM-END"),
    }
}

fn emit_stream_start(emitter: &mut Emitter, event: &Event) -> Result<(), EmitterError> {
    emitter.open_ended = 0;
    let Event::StreamStart { encoding } = event else {
        return emitter_error("expected STREAM-START");
    };
    log::debug!("STREAM-START encoding={encoding:?}");
    if emitter.encoding == Encoding::Any {
        emitter.encoding = *encoding;
    }
    if emitter.encoding == Encoding::Any {
        emitter.encoding = Encoding::Utf8;
    }
    if emitter.best_indent < 2 || emitter.best_indent > 9 {
        emitter.best_indent = 2;
    }
    if emitter.best_width >= 0 && emitter.best_width <= emitter.best_indent * 2 {
        emitter.best_width = 80;
    }
    if emitter.best_width < 0 {
        emitter.best_width = i32::MAX;
    }
    if emitter.line_break == LineBreak::Any {
        emitter.line_break = LineBreak::Ln;
    }
    emitter.indent = -1;
    emitter.line = 0;
    emitter.column = 0;
    emitter.whitespace = true;
    emitter.indention = true;
    if emitter.encoding != Encoding::Utf8 {
        write_bom(emitter)?;
    }
    emitter.state = EmitterState::FirstDocumentStart;
    Ok(())
}

fn emit_document_start(emitter: &mut Emitter, event: &Event, first: bool) -> Result<(), EmitterError> {
    if let Event::DocumentStart {
        version_directive,
        tag_directives,
        implicit,
    } = event
    {
        let default_tag_directives = [
            TagDirective {
                handle: "!".to_string(),
                prefix: "!".to_string(),
            },
            TagDirective {
                handle: "!!".to_string(),
                prefix: "tag:yaml.org,2002:".to_string(),
            },
        ];
        let mut implicit = *implicit;
        if let Some(version_directive) = version_directive {
            analyze_version_directive(*version_directive)?;
        }
        for tag_directive in tag_directives {
            analyze_tag_directive(tag_directive)?;
        }
        emitter.tag_directives.clear();
        for tag_directive in tag_directives {
            append_tag_directive(emitter, tag_directive.clone(), false)?;
        }
        for tag_directive in default_tag_directives {
            append_tag_directive(emitter, tag_directive, true)?;
        }
        if !first || emitter.canonical {
            implicit = false;
        }
        if (version_directive.is_some() || !tag_directives.is_empty()) && emitter.open_ended != 0 {
            write_indicator(emitter, "...", true, false, false)?;
            write_indent(emitter)?;
        }
        emitter.open_ended = 0;
        if let Some(version_directive) = version_directive {
            implicit = false;
            write_indicator(emitter, "%YAML", true, false, false)?;
            if version_directive.minor == 1 {
                write_indicator(emitter, "1.1", true, false, false)?;
            } else {
                write_indicator(emitter, "1.2", true, false, false)?;
            }
            write_indent(emitter)?;
        }
        if !tag_directives.is_empty() {
            implicit = false;
            for tag_directive in tag_directives {
                write_indicator(emitter, "%TAG", true, false, false)?;
                write_tag_handle(emitter, &tag_directive.handle)?;
                write_tag_content(emitter, &tag_directive.prefix, true)?;
                write_indent(emitter)?;
            }
        }
        if check_empty_document(emitter) {
            implicit = false;
        }
        if !implicit {
            write_indent(emitter)?;
            write_indicator(emitter, "---", true, false, false)?;
            if emitter.canonical {
                write_indent(emitter)?;
            }
        }
        log::debug!("DOCUMENT-START implicit={implicit}");
        emitter.state = EmitterState::DocumentContent;
        return Ok(());
    } else if let Event::StreamEnd = event {
        if emitter.open_ended == 2 {
            write_indicator(emitter, "...", true, false, false)?;
            emitter.open_ended = 0;
            write_indent(emitter)?;
        }
        crate::sink::yaml_emitter_flush(emitter)?;
        log::debug!("STREAM-END");
        emitter.state = EmitterState::End;
        return Ok(());
    }

    emitter_error("expected DOCUMENT-START or STREAM-END")
}

fn emit_document_content(
    emitter: &mut Emitter,
    event: &Event,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    emitter.states.push(EmitterState::DocumentEnd);
    emit_node(emitter, event, true, false, false, false, analysis)
}

fn emit_document_end(emitter: &mut Emitter, event: &Event) -> Result<(), EmitterError> {
    let Event::DocumentEnd { implicit } = event else {
        return emitter_error("expected DOCUMENT-END");
    };
    let implicit = *implicit;
    write_indent(emitter)?;
    if !implicit {
        write_indicator(emitter, "...", true, false, false)?;
        emitter.open_ended = 0;
        write_indent(emitter)?;
    } else if emitter.open_ended == 0 {
        emitter.open_ended = 1;
    }
    crate::sink::yaml_emitter_flush(emitter)?;
    log::debug!("DOCUMENT-END implicit={implicit}");
    emitter.state = EmitterState::DocumentStart;
    emitter.tag_directives.clear();
    Ok(())
}

fn emit_flow_sequence_item(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        write_indicator(emitter, "[", true, true, false)?;
        increase_indent(emitter, true, false);
        emitter.flow_level += 1;
    }
    if let Event::SequenceEnd = event {
        emitter.flow_level -= 1;
        emitter.indent = emitter.indents.pop().expect("indent stack underflow");
        if emitter.canonical && !first {
            write_indicator(emitter, ",", false, false, false)?;
            write_indent(emitter)?;
        }
        write_indicator(emitter, "]", false, false, false)?;
        emitter.state = emitter.states.pop().expect("state stack underflow");
        return Ok(());
    }
    if !first {
        write_indicator(emitter, ",", false, false, false)?;
    }
    if emitter.canonical || emitter.column > emitter.best_width {
        write_indent(emitter)?;
    }
    emitter.states.push(EmitterState::FlowSequenceItem);
    emit_node(emitter, event, false, true, false, false, analysis)
}

fn emit_flow_mapping_key(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        write_indicator(emitter, "{", true, true, false)?;
        increase_indent(emitter, true, false);
        emitter.flow_level += 1;
    }
    if let Event::MappingEnd = event {
        emitter.flow_level -= 1;
        emitter.indent = emitter.indents.pop().expect("indent stack underflow");
        if emitter.canonical && !first {
            write_indicator(emitter, ",", false, false, false)?;
            write_indent(emitter)?;
        }
        write_indicator(emitter, "}", false, false, false)?;
        emitter.state = emitter.states.pop().expect("state stack underflow");
        return Ok(());
    }
    if !first {
        write_indicator(emitter, ",", false, false, false)?;
    }
    if emitter.canonical || emitter.column > emitter.best_width {
        write_indent(emitter)?;
    }
    if !emitter.canonical && check_simple_key(emitter, event, analysis) {
        emitter.states.push(EmitterState::FlowMappingSimpleValue);
        emit_node(emitter, event, false, false, true, true, analysis)
    } else {
        write_indicator(emitter, "?", true, false, false)?;
        emitter.states.push(EmitterState::FlowMappingValue);
        emit_node(emitter, event, false, false, true, false, analysis)
    }
}

fn emit_flow_mapping_value(
    emitter: &mut Emitter,
    event: &Event,
    simple: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if simple {
        write_indicator(emitter, ":", false, false, false)?;
    } else {
        if emitter.canonical || emitter.column > emitter.best_width {
            write_indent(emitter)?;
        }
        write_indicator(emitter, ":", true, false, false)?;
    }
    emitter.states.push(EmitterState::FlowMappingKey);
    emit_node(emitter, event, false, false, true, false, analysis)
}

fn emit_block_sequence_item(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        increase_indent(emitter, false, emitter.mapping_context && !emitter.indention);
    }
    if let Event::SequenceEnd = event {
        emitter.indent = emitter.indents.pop().expect("indent stack underflow");
        emitter.state = emitter.states.pop().expect("state stack underflow");
        return Ok(());
    }
    write_indent(emitter)?;
    write_indicator(emitter, "-", true, false, true)?;
    emitter.states.push(EmitterState::BlockSequenceItem);
    emit_node(emitter, event, false, true, false, false, analysis)
}

fn emit_block_mapping_key(
    emitter: &mut Emitter,
    event: &Event,
    first: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if first {
        increase_indent(emitter, false, false);
    }
    if let Event::MappingEnd = event {
        emitter.indent = emitter.indents.pop().expect("indent stack underflow");
        emitter.state = emitter.states.pop().expect("state stack underflow");
        return Ok(());
    }
    write_indent(emitter)?;
    if check_simple_key(emitter, event, analysis) {
        emitter.states.push(EmitterState::BlockMappingSimpleValue);
        emit_node(emitter, event, false, false, true, true, analysis)
    } else {
        write_indicator(emitter, "?", true, false, true)?;
        emitter.states.push(EmitterState::BlockMappingValue);
        emit_node(emitter, event, false, false, true, false, analysis)
    }
}

fn emit_block_mapping_value(
    emitter: &mut Emitter,
    event: &Event,
    simple: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    if simple {
        write_indicator(emitter, ":", false, false, false)?;
    } else {
        write_indent(emitter)?;
        write_indicator(emitter, ":", true, false, true)?;
    }
    emitter.states.push(EmitterState::BlockMappingKey);
    emit_node(emitter, event, false, false, true, false, analysis)
}

#[allow(clippy::too_many_arguments)]
fn emit_node(
    emitter: &mut Emitter,
    event: &Event,
    root: bool,
    sequence: bool,
    mapping: bool,
    simple_key: bool,
    analysis: &mut Analysis,
) -> Result<(), EmitterError> {
    emitter.root_context = root;
    emitter.sequence_context = sequence;
    emitter.mapping_context = mapping;
    emitter.simple_key_context = simple_key;

    match event {
        Event::Alias { .. } => emit_alias(emitter, &analysis.anchor),
        Event::Scalar { .. } => emit_scalar(emitter, event, analysis),
        Event::SequenceStart { .. } => emit_sequence_start(emitter, event, analysis),
        Event::MappingStart { .. } => emit_mapping_start(emitter, event, analysis),
        _ => emitter_error("expected SCALAR, SEQUENCE-START, MAPPING-START, or ALIAS"),
    }
}

fn emit_alias(emitter: &mut Emitter, analysis: &Option<AnchorAnalysis>) -> Result<(), EmitterError> {
    process_anchor(emitter, analysis)?;
    if emitter.simple_key_context {
        put(emitter, b' ')?;
    }
    emitter.state = emitter.states.pop().expect("state stack underflow");
    Ok(())
}

fn emit_scalar(emitter: &mut Emitter, event: &Event, analysis: &mut Analysis) -> Result<(), EmitterError> {
    let Analysis { anchor, tag, scalar } = analysis;
    let scalar = scalar.as_mut().expect("scalar analysis missing for a SCALAR event");

    select_scalar_style(emitter, event, scalar, tag)?;
    process_anchor(emitter, anchor)?;
    process_tag(emitter, tag)?;
    increase_indent(emitter, true, false);
    process_scalar(emitter, scalar)?;
    emitter.indent = emitter.indents.pop().expect("indent stack underflow");
    emitter.state = emitter.states.pop().expect("state stack underflow");
    Ok(())
}

fn emit_sequence_start(emitter: &mut Emitter, event: &Event, analysis: &Analysis) -> Result<(), EmitterError> {
    let Analysis { anchor, tag, .. } = analysis;
    process_anchor(emitter, anchor)?;
    process_tag(emitter, tag)?;

    let Event::SequenceStart { style, .. } = event else {
        unreachable!("emit_sequence_start called with a non-SEQUENCE-START event");
    };

    emitter.state = if emitter.flow_level != 0
        || emitter.canonical
        || *style == SequenceStyle::Flow
        || check_empty_sequence(emitter, event)
    {
        EmitterState::FlowSequenceFirstItem
    } else {
        EmitterState::BlockSequenceFirstItem
    };
    Ok(())
}

fn emit_mapping_start(emitter: &mut Emitter, event: &Event, analysis: &Analysis) -> Result<(), EmitterError> {
    let Analysis { anchor, tag, .. } = analysis;
    process_anchor(emitter, anchor)?;
    process_tag(emitter, tag)?;

    let Event::MappingStart { style, .. } = event else {
        unreachable!("emit_mapping_start called with a non-MAPPING-START event");
    };

    emitter.state = if emitter.flow_level != 0
        || emitter.canonical
        || *style == MappingStyle::Flow
        || check_empty_mapping(emitter, event)
    {
        EmitterState::FlowMappingFirstKey
    } else {
        EmitterState::BlockMappingFirstKey
    };
    Ok(())
}

/// Detects a document whose entire content is a single empty plain scalar,
/// which must be written with an explicit `---` to remain distinguishable
/// from an empty stream. Looks two events past `DOCUMENT-START` in the
/// queue: the sole content event, then the event that should be
/// `DOCUMENT-END` if the document really is that one empty scalar.
///
/// `DOCUMENT-START` only ever carries one event of guaranteed lookahead
/// (`next_emittable_event`'s `accumulate` budget), so this only sees the
/// trailing `DOCUMENT-END` when the caller has already queued it ahead of
/// dispatch — e.g. by emitting several events in a batch, or when an earlier
/// event in the stream is still waiting on its own lookahead and happens to
/// let this one ride along. Driving the emitter strictly one event per call
/// (the common pattern) usually dispatches `DOCUMENT-START` as soon as the
/// scalar is queued, before `DOCUMENT-END` exists to look at, so this
/// returns `false` and the document falls back to an explicit `---`. That
/// fallback is always correct, just more conservative than this check's name
/// suggests.
fn check_empty_document(emitter: &Emitter) -> bool {
    let Some(Event::Scalar { value, style, .. }) = emitter.events.front() else {
        return false;
    };
    if !value.is_empty() || !matches!(style, ScalarStyle::Any | ScalarStyle::Plain) {
        return false;
    }
    matches!(emitter.events.get(1), Some(Event::DocumentEnd { .. }))
}

fn check_empty_sequence(emitter: &Emitter, event: &Event) -> bool {
    if emitter.events.is_empty() {
        return false;
    }
    matches!(event, Event::SequenceStart { .. }) && matches!(emitter.events[0], Event::SequenceEnd)
}

fn check_empty_mapping(emitter: &Emitter, event: &Event) -> bool {
    if emitter.events.is_empty() {
        return false;
    }
    matches!(event, Event::MappingStart { .. }) && matches!(emitter.events[0], Event::MappingEnd)
}

/// Is `event`, in its current analyzed form, eligible to be written without a
/// leading `?` marker?
fn check_simple_key(emitter: &Emitter, event: &Event, analysis: &Analysis) -> bool {
    let Analysis { tag, anchor, scalar } = analysis;

    let mut length =
        anchor.as_ref().map_or(0, |a| a.anchor.len()) + tag.as_ref().map_or(0, |t| t.handle.len() + t.suffix.len());

    match event {
        Event::Alias { .. } => {
            length = anchor.as_ref().map_or(0, |a| a.anchor.len());
        }
        Event::Scalar { .. } => {
            let scalar = scalar.as_ref().expect("scalar analysis missing for a SCALAR event");
            if scalar.multiline {
                return false;
            }
            length += scalar.value.len();
        }
        Event::SequenceStart { .. } => {
            if !check_empty_sequence(emitter, event) {
                return false;
            }
        }
        Event::MappingStart { .. } => {
            if !check_empty_mapping(emitter, event) {
                return false;
            }
        }
        _ => return false,
    }

    length <= 128
}

/// Decide the final presentation style for a scalar.
///
/// When the event carries neither a tag nor `quoted_implicit`, but the
/// selected style ends up non-plain anyway (the analyzer forced quoting),
/// an explicit `!` non-specific tag is attached rather than failing: this is
/// the only way to write `'...'`/`"..."`/block styles for such scalars at
/// all, and every legal event stream must be emittable.
fn select_scalar_style<'a>(
    emitter: &Emitter,
    event: &Event,
    scalar: &mut ScalarAnalysis,
    tag: &mut Option<TagAnalysis<'a>>,
) -> Result<(), EmitterError> {
    let Event::Scalar {
        plain_implicit,
        quoted_implicit,
        style: requested,
        ..
    } = event
    else {
        unreachable!("select_scalar_style called with a non-SCALAR event");
    };

    let no_tag = tag.is_none();
    if no_tag && !plain_implicit && !quoted_implicit {
        return emitter_error("neither tag nor implicit flags are specified");
    }

    let mut style = *requested;
    if style == ScalarStyle::Any {
        style = ScalarStyle::Plain;
    }
    if emitter.canonical {
        style = ScalarStyle::DoubleQuoted;
    }
    if emitter.simple_key_context && scalar.multiline {
        style = ScalarStyle::DoubleQuoted;
    }

    if style == ScalarStyle::Plain {
        if (emitter.flow_level != 0 && !scalar.flow_plain_allowed)
            || (emitter.flow_level == 0 && !scalar.block_plain_allowed)
        {
            style = ScalarStyle::SingleQuoted;
        }
        if scalar.value.is_empty() && (emitter.flow_level != 0 || emitter.simple_key_context) {
            style = ScalarStyle::SingleQuoted;
        }
        if no_tag && !plain_implicit {
            style = ScalarStyle::SingleQuoted;
        }
    }

    if style == ScalarStyle::SingleQuoted && !scalar.single_quoted_allowed {
        style = ScalarStyle::DoubleQuoted;
    }

    if matches!(style, ScalarStyle::Literal | ScalarStyle::Folded)
        && (!scalar.block_allowed || emitter.flow_level != 0 || emitter.simple_key_context)
    {
        style = ScalarStyle::DoubleQuoted;
    }

    if no_tag && !quoted_implicit && style != ScalarStyle::Plain {
        *tag = Some(TagAnalysis { handle: "!", suffix: "" });
    }

    scalar.style = style;
    Ok(())
}

fn process_anchor(emitter: &mut Emitter, analysis: &Option<AnchorAnalysis>) -> Result<(), EmitterError> {
    let Some(analysis) = analysis.as_ref() else {
        return Ok(());
    };
    write_indicator(emitter, if analysis.alias { "*" } else { "&" }, true, false, false)?;
    write_anchor(emitter, analysis.anchor)
}

fn process_tag(emitter: &mut Emitter, analysis: &Option<TagAnalysis>) -> Result<(), EmitterError> {
    let Some(analysis) = analysis.as_ref() else {
        return Ok(());
    };
    if analysis.handle.is_empty() && analysis.suffix.is_empty() {
        return Ok(());
    }
    if analysis.handle.is_empty() {
        write_indicator(emitter, "!<", true, false, false)?;
        write_tag_content(emitter, analysis.suffix, false)?;
        write_indicator(emitter, ">", false, false, false)?;
    } else {
        write_tag_handle(emitter, analysis.handle)?;
        if !analysis.suffix.is_empty() {
            write_tag_content(emitter, analysis.suffix, false)?;
        }
    }
    Ok(())
}

fn process_scalar(emitter: &mut Emitter, analysis: &ScalarAnalysis) -> Result<(), EmitterError> {
    let allow_breaks = !emitter.simple_key_context;
    match analysis.style {
        ScalarStyle::Plain => write_plain_scalar(emitter, analysis.value, allow_breaks),
        ScalarStyle::SingleQuoted => write_single_quoted_scalar(emitter, analysis.value, allow_breaks),
        ScalarStyle::DoubleQuoted => write_double_quoted_scalar(emitter, analysis.value, allow_breaks),
        ScalarStyle::Literal => write_literal_scalar(emitter, analysis.value),
        ScalarStyle::Folded => write_folded_scalar(emitter, analysis.value),
        ScalarStyle::Any => unreachable!("no scalar style chosen"),
    }
}

fn analyze_version_directive(version_directive: VersionDirective) -> Result<(), EmitterError> {
    if version_directive.major != 1 || version_directive.minor != 1 {
        return emitter_error("incompatible %YAML directive");
    }
    Ok(())
}

fn analyze_tag_directive(tag_directive: &TagDirective) -> Result<(), EmitterError> {
    if tag_directive.handle.is_empty() {
        return emitter_error("tag handle must not be empty");
    }
    if !tag_directive.handle.starts_with('!') {
        return emitter_error("tag handle must start with '!'");
    }
    if !tag_directive.handle.ends_with('!') {
        return emitter_error("tag handle must end with '!'");
    }
    if tag_directive.handle.len() > 2 {
        let inner = &tag_directive.handle[1..tag_directive.handle.len() - 1];
        if !inner.chars().all(is_alnum_strict) {
            return emitter_error("tag handle must contain alphanumerical characters only");
        }
    }
    if tag_directive.prefix.is_empty() {
        return emitter_error("tag prefix must not be empty");
    }
    Ok(())
}

fn analyze_anchor(anchor: &str, alias: bool) -> Result<AnchorAnalysis, EmitterError> {
    if anchor.is_empty() {
        return emitter_error(if alias {
            "alias value must not be empty"
        } else {
            "anchor value must not be empty"
        });
    }
    if !anchor.chars().all(is_alnum_strict) {
        return emitter_error(if alias {
            "alias value must contain alphanumerical characters only"
        } else {
            "anchor value must contain alphanumerical characters only"
        });
    }
    Ok(AnchorAnalysis { anchor, alias })
}

fn analyze_tag<'a>(tag: &'a str, tag_directives: &'a [TagDirective]) -> Result<TagAnalysis<'a>, EmitterError> {
    if tag.is_empty() {
        return emitter_error("tag value must not be empty");
    }
    let mut handle = "";
    let mut suffix = tag;
    for tag_directive in tag_directives {
        let prefix_len = tag_directive.prefix.len();
        if prefix_len <= tag.len() && &tag[..prefix_len] == tag_directive.prefix {
            handle = &tag_directive.handle;
            suffix = &tag[prefix_len..];
            break;
        }
    }
    Ok(TagAnalysis { handle, suffix })
}

/// Single left-to-right pass classifying which presentation styles a scalar
/// value permits. The ordering of first/inner/last treatment within this one
/// scan is load-bearing; do not split it into multiple passes.
fn analyze_scalar(value: &str, unicode: bool) -> ScalarAnalysis {
    if value.is_empty() {
        return ScalarAnalysis {
            value: "",
            multiline: false,
            flow_plain_allowed: false,
            block_plain_allowed: true,
            single_quoted_allowed: true,
            block_allowed: false,
            style: ScalarStyle::Any,
        };
    }

    let mut block_indicators = value.starts_with("---") || value.starts_with("...");
    let mut flow_indicators = block_indicators;
    let mut line_breaks = false;
    let mut special_characters = false;
    let mut leading_spaces = false;
    let mut leading_breaks = false;
    let mut trailing_spaces = false;
    let mut trailing_breaks = false;
    let mut inline_breaks_spaces = false;
    let mut mixed_breaks_spaces = false;
    let mut preceded_by_whitespace = true;
    let mut previous_space = false;
    let mut previous_break = false;
    let mut first = true;

    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        let followed_by_whitespace = is_blankz(next);

        if first {
            match ch {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                '?' | ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '-' if followed_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        } else {
            match ch {
                ',' | '?' | '[' | ']' | '{' | '}' => flow_indicators = true,
                ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '#' if preceded_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        }

        if !is_printable(ch) || (!is_ascii(ch) && !unicode) {
            special_characters = true;
        }
        if is_break(ch) {
            line_breaks = true;
        }

        if is_space(ch) {
            if first {
                leading_spaces = true;
            }
            if next.is_none() {
                trailing_spaces = true;
            }
            if previous_break {
                inline_breaks_spaces = true;
            }
            previous_space = true;
            previous_break = false;
        } else if is_break(ch) {
            if first {
                leading_breaks = true;
            }
            if next.is_none() {
                trailing_breaks = true;
            }
            if previous_space {
                mixed_breaks_spaces = true;
            }
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blankz(ch);
        first = false;
    }

    let mut analysis = ScalarAnalysis {
        value,
        multiline: line_breaks,
        flow_plain_allowed: true,
        block_plain_allowed: true,
        single_quoted_allowed: true,
        block_allowed: true,
        style: ScalarStyle::Any,
    };

    if leading_spaces || leading_breaks || trailing_spaces {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.block_allowed = false;
    }
    if trailing_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if inline_breaks_spaces {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if mixed_breaks_spaces || special_characters {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
        analysis.block_allowed = false;
    }
    if line_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if flow_indicators {
        analysis.flow_plain_allowed = false;
    }
    if block_indicators {
        analysis.block_plain_allowed = false;
    }
    analysis
}

fn analyze_event<'a>(
    emitter: &Emitter,
    event: &'a Event,
    tag_directives: &'a [TagDirective],
) -> Result<Analysis<'a>, EmitterError> {
    let mut analysis = Analysis::default();

    match event {
        Event::Alias { anchor } => {
            analysis.anchor = Some(analyze_anchor(anchor, true)?);
        }
        Event::Scalar {
            anchor,
            tag,
            value,
            plain_implicit,
            quoted_implicit,
            ..
        } => {
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if let Some(tag) = tag {
                if (!plain_implicit && !quoted_implicit) || emitter.canonical {
                    analysis.tag = Some(analyze_tag(tag, tag_directives)?);
                }
            }
            analysis.scalar = Some(analyze_scalar(value, emitter.unicode));
        }
        Event::SequenceStart { anchor, tag, implicit, .. } => {
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if let Some(tag) = tag {
                if !implicit || emitter.canonical {
                    analysis.tag = Some(analyze_tag(tag, tag_directives)?);
                }
            }
        }
        Event::MappingStart { anchor, tag, implicit, .. } => {
            if let Some(anchor) = anchor {
                analysis.anchor = Some(analyze_anchor(anchor, false)?);
            }
            if let Some(tag) = tag {
                if !implicit || emitter.canonical {
                    analysis.tag = Some(analyze_tag(tag, tag_directives)?);
                }
            }
        }
        _ => {}
    }

    Ok(analysis)
}

fn write_bom(emitter: &mut Emitter) -> Result<(), EmitterError> {
    flush_if_needed(emitter)?;
    emitter.buffer.push('\u{feff}');
    Ok(())
}

fn write_indent(emitter: &mut Emitter) -> Result<(), EmitterError> {
    let indent = if emitter.indent >= 0 { emitter.indent } else { 0 };
    if !emitter.indention || emitter.column > indent || (emitter.column == indent && !emitter.whitespace) {
        put_break(emitter)?;
    }
    while emitter.column < indent {
        put(emitter, b' ')?;
    }
    emitter.whitespace = true;
    emitter.indention = true;
    Ok(())
}

fn write_indicator(
    emitter: &mut Emitter,
    indicator: &str,
    need_whitespace: bool,
    is_whitespace: bool,
    is_indention: bool,
) -> Result<(), EmitterError> {
    if need_whitespace && !emitter.whitespace {
        put(emitter, b' ')?;
    }
    write_str(emitter, indicator)?;
    emitter.whitespace = is_whitespace;
    emitter.indention = emitter.indention && is_indention;
    Ok(())
}

fn write_anchor(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    write_str(emitter, value)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_tag_handle(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    if !emitter.whitespace {
        put(emitter, b' ')?;
    }
    write_str(emitter, value)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_tag_content(emitter: &mut Emitter, value: &str, need_whitespace: bool) -> Result<(), EmitterError> {
    if need_whitespace && !emitter.whitespace {
        put(emitter, b' ')?;
    }
    for ch in value.chars() {
        if is_alpha(ch) {
            write_char(emitter, ch)?;
            continue;
        }
        match ch {
            ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '_' | '.' | '~' | '*' | '\'' | '(' | ')'
            | '[' | ']' => {
                write_char(emitter, ch)?;
                continue;
            }
            _ => {}
        }
        let mut encode_buffer = [0u8; 4];
        for byte in ch.encode_utf8(&mut encode_buffer).bytes() {
            let upper = (byte >> 4) + if (byte >> 4) < 10 { b'0' } else { b'A' - 10 };
            let lower = (byte & 0x0F) + if (byte & 0x0F) < 10 { b'0' } else { b'A' - 10 };
            put(emitter, b'%')?;
            put(emitter, upper)?;
            put(emitter, lower)?;
        }
    }
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_plain_scalar(emitter: &mut Emitter, value: &str, allow_breaks: bool) -> Result<(), EmitterError> {
    let mut spaces = false;
    let mut breaks = false;
    if !emitter.whitespace && (!value.is_empty() || emitter.flow_level != 0) {
        put(emitter, b' ')?;
    }

    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        if is_space(ch) {
            if allow_breaks && !spaces && emitter.column > emitter.best_width && !is_space(next) {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else if is_break(ch) {
            if !breaks && ch == '\n' {
                put_break(emitter)?;
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            spaces = false;
            breaks = false;
        }
    }
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_single_quoted_scalar(emitter: &mut Emitter, value: &str, allow_breaks: bool) -> Result<(), EmitterError> {
    let mut spaces = false;
    let mut breaks = false;
    write_indicator(emitter, "'", true, false, false)?;

    let mut chars = value.chars();
    let mut is_first = true;
    while let Some(ch) = chars.next() {
        let next = chars.clone().next();
        let is_last = next.is_none();

        if is_space(ch) {
            if allow_breaks
                && !spaces
                && emitter.column > emitter.best_width
                && !is_first
                && !is_last
                && !is_space(next)
            {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else if is_break(ch) {
            if !breaks && ch == '\n' {
                put_break(emitter)?;
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            if ch == '\'' {
                put(emitter, b'\'')?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            spaces = false;
            breaks = false;
        }
        is_first = false;
    }
    if breaks {
        write_indent(emitter)?;
    }
    write_indicator(emitter, "'", false, false, false)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

fn write_double_quoted_scalar(emitter: &mut Emitter, value: &str, allow_breaks: bool) -> Result<(), EmitterError> {
    let mut spaces = false;
    write_indicator(emitter, "\"", true, false, false)?;

    let mut chars = value.chars();
    let mut first = true;
    while let Some(ch) = chars.next() {
        if !is_printable(ch)
            || (!emitter.unicode && !is_ascii(ch))
            || is_bom(ch)
            || is_break(ch)
            || ch == '"'
            || ch == '\\'
        {
            put(emitter, b'\\')?;
            match ch {
                '\0' => put(emitter, b'0')?,
                '\x07' => put(emitter, b'a')?,
                '\x08' => put(emitter, b'b')?,
                '\x09' => put(emitter, b't')?,
                '\x0A' => put(emitter, b'n')?,
                '\x0B' => put(emitter, b'v')?,
                '\x0C' => put(emitter, b'f')?,
                '\x0D' => put(emitter, b'r')?,
                '\x1B' => put(emitter, b'e')?,
                '\x22' => put(emitter, b'"')?,
                '\x5C' => put(emitter, b'\\')?,
                '\u{0085}' => put(emitter, b'N')?,
                '\u{00A0}' => put(emitter, b'_')?,
                '\u{2028}' => put(emitter, b'L')?,
                '\u{2029}' => put(emitter, b'P')?,
                _ => {
                    let (prefix, width) = if ch <= '\u{00ff}' {
                        (b'x', 2)
                    } else if ch <= '\u{ffff}' {
                        (b'u', 4)
                    } else {
                        (b'U', 8)
                    };
                    put(emitter, prefix)?;
                    let value_0 = ch as u32;
                    let mut k = (width - 1) * 4i32;
                    while k >= 0 {
                        let digit = (value_0 >> k) & 0x0F;
                        let digit_char = char::from_digit(digit, 16)
                            .expect("digit out of range")
                            .to_ascii_uppercase();
                        put(emitter, digit_char as u8)?;
                        k -= 4;
                    }
                }
            }
            spaces = false;
        } else if is_space(ch) {
            if allow_breaks
                && !spaces
                && emitter.column > emitter.best_width
                && !first
                && chars.clone().next().is_some()
            {
                write_indent(emitter)?;
                if is_space(chars.clone().next()) {
                    put(emitter, b'\\')?;
                }
            } else {
                write_char(emitter, ch)?;
            }
            spaces = true;
        } else {
            write_char(emitter, ch)?;
            spaces = false;
        }
        first = false;
    }
    write_indicator(emitter, "\"", false, false, false)?;
    emitter.whitespace = false;
    emitter.indention = false;
    Ok(())
}

/// Chomping indicator and explicit indent-hint, shared by literal and
/// folded writers.
fn write_block_scalar_hints(emitter: &mut Emitter, string: &str) -> Result<(), EmitterError> {
    let mut chomp_hint: Option<&str> = None;

    let first = string.chars().next();
    if is_space(first) || is_break(first) {
        let indent_hint = char::from_digit(emitter.best_indent as u32, 10).expect("best_indent out of range");
        let mut buf = [0u8; 1];
        let indent_hint = indent_hint.encode_utf8(&mut buf);
        write_indicator(emitter, indent_hint, false, false, false)?;
    }
    emitter.open_ended = 0;

    if string.is_empty() {
        chomp_hint = Some("-");
    } else {
        let mut chars_rev = string.chars().rev();
        let last = chars_rev.next();
        let second_last = chars_rev.next();
        if !is_break(last) {
            chomp_hint = Some("-");
        } else if is_breakz(second_last) {
            chomp_hint = Some("+");
            emitter.open_ended = 2;
        }
    }

    if let Some(chomp_hint) = chomp_hint {
        write_indicator(emitter, chomp_hint, false, false, false)?;
    }
    Ok(())
}

fn write_literal_scalar(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    let mut breaks = true;
    write_indicator(emitter, "|", true, false, false)?;
    write_block_scalar_hints(emitter, value)?;
    put_break(emitter)?;
    emitter.indention = true;
    emitter.whitespace = true;

    for ch in value.chars() {
        if is_break(ch) {
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
            }
            write_char(emitter, ch)?;
            emitter.indention = false;
            breaks = false;
        }
    }
    Ok(())
}

fn write_folded_scalar(emitter: &mut Emitter, value: &str) -> Result<(), EmitterError> {
    let mut breaks = true;
    let mut leading_spaces = true;
    write_indicator(emitter, ">", true, false, false)?;
    write_block_scalar_hints(emitter, value)?;
    put_break(emitter)?;
    emitter.indention = true;
    emitter.whitespace = true;

    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if is_break(ch) {
            if !breaks && !leading_spaces && ch == '\n' {
                let mut lookahead = chars.clone();
                let mut next_non_break = lookahead.next();
                while is_break(next_non_break) {
                    next_non_break = lookahead.next();
                }
                if !is_blankz(next_non_break) {
                    put_break(emitter)?;
                }
            }
            write_break_char(emitter, ch)?;
            emitter.indention = true;
            breaks = true;
        } else {
            if breaks {
                write_indent(emitter)?;
                leading_spaces = is_blank(ch);
            }
            if !breaks && is_space(ch) && !is_space(chars.clone().next()) && emitter.column > emitter.best_width {
                write_indent(emitter)?;
            } else {
                write_char(emitter, ch)?;
            }
            emitter.indention = false;
            breaks = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_event(value: &str) -> Event {
        Event::scalar(None, None, value, true, true, ScalarStyle::Any)
    }

    #[test]
    fn empty_scalar_allows_only_quoted_styles() {
        let analysis = analyze_scalar("", false);
        assert!(!analysis.flow_plain_allowed);
        assert!(analysis.block_plain_allowed);
        assert!(analysis.single_quoted_allowed);
        assert!(!analysis.block_allowed);
    }

    #[test]
    fn plain_word_allows_every_style() {
        let analysis = analyze_scalar("hello", false);
        assert!(!analysis.multiline);
        assert!(analysis.flow_plain_allowed);
        assert!(analysis.block_plain_allowed);
        assert!(analysis.single_quoted_allowed);
        assert!(analysis.block_allowed);
    }

    #[test]
    fn embedded_line_break_forbids_plain_styles_but_allows_block() {
        let analysis = analyze_scalar("line1\nline2", false);
        assert!(analysis.multiline);
        assert!(!analysis.flow_plain_allowed);
        assert!(!analysis.block_plain_allowed);
        assert!(analysis.block_allowed);
    }

    #[test]
    fn leading_space_forbids_plain_and_block_styles() {
        let analysis = analyze_scalar(" indented", false);
        assert!(!analysis.flow_plain_allowed);
        assert!(!analysis.block_plain_allowed);
        assert!(!analysis.block_allowed);
    }

    #[test]
    fn non_ascii_without_unicode_flag_is_a_special_character() {
        let analysis = analyze_scalar("caf\u{e9}", false);
        assert!(!analysis.single_quoted_allowed);
        assert!(!analysis.block_allowed);

        let analysis_unicode = analyze_scalar("caf\u{e9}", true);
        assert!(analysis_unicode.single_quoted_allowed);
        assert!(analysis_unicode.block_allowed);
    }

    #[test]
    fn select_scalar_style_defaults_to_plain() {
        let emitter = Emitter::new();
        let event = scalar_event("hello");
        let mut scalar = analyze_scalar("hello", false);
        let mut tag = None;
        select_scalar_style(&emitter, &event, &mut scalar, &mut tag).unwrap();
        assert_eq!(scalar.style, ScalarStyle::Plain);
        assert!(tag.is_none());
    }

    #[test]
    fn canonical_mode_forces_double_quoted() {
        let mut emitter = Emitter::new();
        emitter.canonical = true;
        let event = scalar_event("hello");
        let mut scalar = analyze_scalar("hello", false);
        let mut tag = None;
        select_scalar_style(&emitter, &event, &mut scalar, &mut tag).unwrap();
        assert_eq!(scalar.style, ScalarStyle::DoubleQuoted);
    }

    #[test]
    fn multiline_simple_key_forces_double_quoted() {
        let mut emitter = Emitter::new();
        emitter.simple_key_context = true;
        let event = scalar_event("line1\nline2");
        let mut scalar = analyze_scalar("line1\nline2", false);
        let mut tag = None;
        select_scalar_style(&emitter, &event, &mut scalar, &mut tag).unwrap();
        assert_eq!(scalar.style, ScalarStyle::DoubleQuoted);
    }

    #[test]
    fn untagged_scalar_forced_non_plain_attaches_implicit_tag() {
        let emitter = Emitter::new();
        // Leading space forbids both plain styles, so the analyzer forces
        // single-quoted even though the caller only set `plain_implicit`.
        let event = Event::scalar(None, None, " leading", true, false, ScalarStyle::Any);
        let mut scalar = analyze_scalar(" leading", false);
        let mut tag = None;
        select_scalar_style(&emitter, &event, &mut scalar, &mut tag).unwrap();
        assert_eq!(scalar.style, ScalarStyle::SingleQuoted);
        let tag = tag.expect("an implicit '!' tag must be attached");
        assert_eq!(tag.handle, "!");
        assert_eq!(tag.suffix, "");
    }

    #[test]
    fn check_simple_key_rejects_values_over_128_bytes() {
        let emitter = Emitter::new();
        let long_value = "x".repeat(130);
        let event = scalar_event(&long_value);
        let analysis = Analysis {
            anchor: None,
            tag: None,
            scalar: Some(analyze_scalar(&long_value, false)),
        };
        assert!(!check_simple_key(&emitter, &event, &analysis));
    }

    #[test]
    fn write_indicator_inserts_separating_space_when_needed() {
        let mut output = Vec::new();
        let mut emitter = Emitter::new();
        emitter.whitespace = false;
        crate::sink::yaml_emitter_set_output(&mut emitter, &mut output);
        write_indicator(&mut emitter, "-", true, false, true).unwrap();
        crate::sink::yaml_emitter_flush(&mut emitter).unwrap();
        assert_eq!(output, b" -");
    }
}
