//! The output buffer and the `Write`-trait sink contract, generalized to the
//! three-encoding story carried by [`crate::style::Encoding`].

use crate::emitter::Emitter;
use crate::error::WriterError;
use crate::style::Encoding;

/// Threshold, in bytes of pending UTF-8 text, at which the emitter proactively
/// flushes its internal buffer to the attached sink.
pub(crate) const OUTPUT_BUFFER_SIZE: usize = 16384;

/// Attach a [`std::io::Write`] sink that receives encoded bytes as the
/// emitter produces them.
///
/// Call this before the first [`crate::emitter::yaml_emitter_emit`] call;
/// the emitter buffers text internally and only touches the sink on flush.
pub fn yaml_emitter_set_output<'w>(emitter: &mut Emitter<'w>, sink: &'w mut dyn std::io::Write) {
    emitter.write_handler = Some(sink);
}

/// Encode everything currently buffered and hand it to the sink, then clear
/// the buffer. Called automatically near `OUTPUT_BUFFER_SIZE` and at
/// `STREAM-END`/`DOCUMENT-END`.
pub(crate) fn yaml_emitter_flush(emitter: &mut Emitter) -> Result<(), WriterError> {
    if emitter.buffer.is_empty() {
        return Ok(());
    }

    match emitter.encoding {
        Encoding::Utf8 | Encoding::Any => {
            emitter.raw_buffer.extend_from_slice(emitter.buffer.as_bytes());
        }
        Encoding::Utf16Le => {
            for unit in emitter.buffer.encode_utf16() {
                emitter.raw_buffer.extend_from_slice(&unit.to_le_bytes());
            }
        }
        Encoding::Utf16Be => {
            for unit in emitter.buffer.encode_utf16() {
                emitter.raw_buffer.extend_from_slice(&unit.to_be_bytes());
            }
        }
    }
    emitter.buffer.clear();

    let Some(sink) = emitter.write_handler.as_deref_mut() else {
        // No sink attached: act as a pure formatter and keep the encoded
        // bytes in raw_buffer for the caller to drain (or for tests to
        // inspect directly via a Vec<u8> sink, the common case).
        return Ok(());
    };
    sink.write_all(&emitter.raw_buffer)?;
    sink.flush()?;
    emitter.raw_buffer.clear();
    Ok(())
}
