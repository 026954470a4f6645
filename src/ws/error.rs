use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    /// The stream failed before any byte of a frame was read.
    #[error("stream error before frame start: {0}")]
    Io(#[source] io::Error),
    /// The stream ended or failed after part of a frame was consumed.
    /// The connection can't be resynchronized after this.
    #[error("frame truncated while reading {stage}: {source}")]
    Truncated {
        stage: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("declared payload of {length} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { length: u64, limit: u64 },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("failed to write frame: {0}")]
    Write(#[source] io::Error),
    #[error("message handler is no longer accepting messages")]
    HandlerGone,
}
