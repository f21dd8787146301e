//! The component frame envelope.
//!
//! Every serialized component travels as `tag ++ length ++ payload`: a
//! 32-bit type identifier, a 32-bit count of payload bits, then exactly
//! that many bits. The length is what makes frames self-describing - a
//! consumer that does not recognize a tag advances past the payload
//! without interpreting a single bit of it, and differently-versioned
//! producers and consumers interoperate for the same reason.
//!
//! This module handles only the envelope. Interpreting the payload is the
//! version-gated field walk in [`crate::schema`].

use crate::bits::BitString;
use crate::cursor::{Reader, Writer};
use crate::errors::Result;
use crate::tags::Tag;

/// Envelope width: 32 tag bits plus 32 length bits.
pub const HEADER_BITS: usize = 64;

/// One component frame: tag plus raw payload bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Component type identifier.
    pub tag: Tag,
    /// Payload bits; the encoded length field always equals
    /// `payload.len()`.
    pub payload: BitString,
}

impl Frame {
    /// Frame from a tag and payload.
    #[must_use]
    pub fn new(tag: Tag, payload: BitString) -> Self {
        Self { tag, payload }
    }

    /// Total encoded width in bits.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        HEADER_BITS + self.payload.len()
    }

    /// Encode as `tag ++ length ++ payload`.
    #[must_use]
    pub fn encode(&self) -> BitString {
        let mut writer = Writer::new();
        writer.unsigned_integer(self.tag.raw());
        writer.unsigned_integer(self.payload.len() as u32);
        let header = writer.flush();
        BitString::concat(&[&header, &self.payload])
    }

    /// Decode one frame from the reader's current position.
    ///
    /// Reads the tag and declared length, then takes exactly that many
    /// payload bits. The payload is carried verbatim, never interpreted;
    /// dropping the returned frame is all it takes to skip an
    /// unrecognized component.
    ///
    /// # Errors
    ///
    /// [`crate::errors::ProtocolError::ReadOverrun`] when the stream ends
    /// before the declared payload does.
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let tag = Tag::new(reader.unsigned_integer()?);
        let length = reader.unsigned_integer()? as usize;
        let payload = reader.binary(length)?;
        Ok(Self { tag, payload })
    }
}
