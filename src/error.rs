//! The emitter's error taxonomy.

/// Failure of the low-level output sink. Wraps `std::io::Error` exactly as
/// delivered by the sink's `write_all`/`flush` calls.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures raised by the emitter.
///
/// `Problem` covers every protocol violation by the caller (unexpected
/// event for the current state,
/// duplicate `%TAG`, incompatible `%YAML`, invalid handle/prefix/anchor,
/// a scalar with neither tag nor implicit flag). `Writer` covers
/// `WRITER_IO` (the sink rejected a write). There is no separate `MEMORY`
/// variant: below the engine, allocation is `String`/`Vec` and failure is
/// not represented as a recoverable `Result` in safe Rust.
///
/// `Failed` is returned by every call after the first error: the emitter is
/// terminal once it has failed once, and does not touch the sink again.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    #[error("{0}")]
    Problem(&'static str),
    #[error(transparent)]
    Writer(#[from] WriterError),
    #[error("emitter already failed: {0}")]
    Failed(String),
}
