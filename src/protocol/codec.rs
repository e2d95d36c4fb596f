//! JSON framing and encoding.
//!
//! # Responsibilities
//! - Decide whether enough bytes have arrived to hold one request
//! - Decode an [`Offer`] from a complete frame
//! - Encode an [`Answer`], with a fixed REJECT frame as the fallback

use serde::de::IgnoredAny;
use thiserror::Error;

use crate::protocol::messages::{Answer, Offer};

/// Upper bound on a single request. Anything larger is answered with REJECT.
pub const MAX_REQUEST_BYTES: usize = 4096;

/// Pre-encoded rejection, written when encoding the real answer fails.
pub const REJECT_FRAME: &[u8] = br#"{"code":"REJECT"}"#;

/// Errors produced while encoding or decoding messages.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("request exceeds {max} bytes (got {len})")]
    TooLarge { len: usize, max: usize },

    #[error("malformed offer: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Whether a read buffer holds a full request yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// More bytes are needed.
    Incomplete,
    /// One JSON value (or garbage that can never become one) is buffered.
    Complete,
}

/// Inspect the buffered bytes without decoding them into an [`Offer`].
///
/// Syntax errors count as complete: waiting for more bytes cannot fix them,
/// and the decoder will turn them into a REJECT.
pub fn frame_status(buf: &[u8]) -> FrameStatus {
    if buf.len() >= MAX_REQUEST_BYTES {
        return FrameStatus::Complete;
    }

    let mut values = serde_json::Deserializer::from_slice(buf).into_iter::<IgnoredAny>();
    match values.next() {
        None => FrameStatus::Incomplete,
        Some(Ok(_)) => FrameStatus::Complete,
        Some(Err(e)) if e.is_eof() => FrameStatus::Incomplete,
        Some(Err(_)) => FrameStatus::Complete,
    }
}

/// Decode one offer from a complete frame.
pub fn decode_offer(buf: &[u8]) -> Result<Offer, CodecError> {
    if buf.len() > MAX_REQUEST_BYTES {
        return Err(CodecError::TooLarge {
            len: buf.len(),
            max: MAX_REQUEST_BYTES,
        });
    }
    serde_json::from_slice(buf).map_err(CodecError::Decode)
}

pub fn encode_answer(answer: &Answer) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(answer).map_err(CodecError::Encode)
}

pub fn encode_offer(offer: &Offer) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(offer).map_err(CodecError::Encode)
}

pub fn decode_answer(buf: &[u8]) -> Result<Answer, CodecError> {
    serde_json::from_slice(buf).map_err(CodecError::Decode)
}
