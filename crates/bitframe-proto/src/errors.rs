//! Error types for the bitframe protocol.
//!
//! Every failure in this crate is local, synchronous, and unrecoverable at
//! this layer: the codec never retries and never substitutes defaults for
//! malformed input. It names the specific condition and leaves recovery
//! (skipping an unrecognized component, rejecting a file) to the caller.

use thiserror::Error;

use crate::schema::FieldKind;
use crate::tags::Tag;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding bitframe data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Binary text contained a character other than '0' or '1'.
    ///
    /// Rejected at construction; no partial bit string is produced.
    #[error("invalid character {found:?} at position {position} in binary text")]
    InvalidCharacter {
        /// The offending character.
        found: char,
        /// Zero-based position of the character in the input.
        position: usize,
    },

    /// Binary text was empty.
    #[error("binary text is empty")]
    EmptyText,

    /// A fixed-width interpretation was applied to a bit string of the
    /// wrong length.
    #[error("bit string is {actual} bits, expected exactly {expected}")]
    LengthMismatch {
        /// Width required by the requested interpretation.
        expected: usize,
        /// Actual length of the bit string.
        actual: usize,
    },

    /// A width outside the supported 1..=64 range was requested.
    #[error("width {width} is outside the supported 1..=64 bit range")]
    UnsupportedWidth {
        /// The requested width.
        width: usize,
    },

    /// A value needs more bits than the requested width can hold.
    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange {
        /// The value that failed to fit.
        value: u64,
        /// The requested width.
        width: usize,
    },

    /// A signed value fell outside what the sign-flag + offset scheme can
    /// represent with the active offset.
    #[error("signed value {value} is not representable with offset {offset}")]
    SignedOutOfRange {
        /// The value (encode side) or biased difference (decode side).
        value: i64,
        /// The signed-integer offset in effect.
        offset: i64,
    },

    /// A reader was asked to consume more bits than remain.
    ///
    /// Never answered with zero-filled or truncated data.
    #[error("read of {requested} bits overruns payload, {remaining} bits remain")]
    ReadOverrun {
        /// Bits the caller asked for.
        requested: usize,
        /// Bits left in the payload.
        remaining: usize,
    },

    /// A frame's tag did not match the schema used to decode it.
    #[error("tag mismatch: expected {expected}, found {found}")]
    TagMismatch {
        /// Tag of the schema driving the decode.
        expected: Tag,
        /// Tag read from the wire.
        found: Tag,
    },

    /// The value list handed to an encode did not cover the full field set.
    #[error("schema has {expected} fields but {found} values were supplied")]
    FieldCountMismatch {
        /// Number of fields the schema declares.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// A supplied value's kind did not match its field descriptor.
    #[error("field `{field}` expects {expected}, got {found}")]
    FieldKindMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Kind declared by the descriptor.
        expected: FieldKind,
        /// Kind of the supplied value.
        found: FieldKind,
    },

    /// The version-gated field walk overran the declared payload length.
    #[error("frame declares {declared} payload bits but the field walk needs {consumed}")]
    FrameInconsistency {
        /// Payload length declared in the frame header.
        declared: usize,
        /// Bits the field walk attempted to consume.
        consumed: usize,
    },

    /// Packed wire data ended before the declared frame did.
    #[error("truncated wire data: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required by the header plus declared payload.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// Padding bits in the final packed payload byte were not zero.
    #[error("nonzero padding bits in final payload byte")]
    InvalidPadding,
}
