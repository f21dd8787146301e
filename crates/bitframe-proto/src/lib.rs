//! Bit-level wire format for versioned components.
//!
//! Frames consist of a 64-bit envelope (32-bit component tag, 32-bit
//! payload length) followed by a payload of exactly that many bits. The
//! payload is a sequence of fixed-width numeric fields gated by a schema
//! version: a field is on the wire iff the active version is at least the
//! version that introduced it. Old and new producers interoperate because
//! the declared length - not an assumed schema size - bounds every
//! payload, so a consumer skips what it does not understand.
//!
//! The logical representation is a literal '0'/'1' digit sequence
//! ([`BitString`]): widths are exact bit counts and nothing is byte-packed
//! unless the caller opts into the [`wire`] module's byte-aligned form.
//! That keeps the two places where silent corruption hides - the signed
//! sign-flag + offset encoding and the low-half-first 64-bit split -
//! inspectable as text.
//!
//! # Security
//!
//! Decoding validates everything it touches: characters at construction,
//! exact widths before interpretation, declared lengths against available
//! bits, padding bits in packed form. There are no "fast paths" that skip
//! validation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod cursor;
pub mod errors;
pub mod frame;
pub mod numeric;
pub mod schema;
pub mod tags;
pub mod wire;

pub use bits::BitString;
pub use cursor::{Reader, Writer};
pub use errors::{ProtocolError, Result};
pub use frame::Frame;
pub use numeric::NumericCodec;
pub use schema::{Component, ComponentSchema, FieldDescriptor, FieldKind, FieldValue};
pub use tags::Tag;
