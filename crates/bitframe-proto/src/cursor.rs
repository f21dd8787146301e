//! Sequential bit cursors: [`Writer`] and [`Reader`].
//!
//! These hide the offset bookkeeping of multi-field payloads. A `Writer`
//! accumulates fixed-width segments and surrenders them at explicit flush
//! boundaries; a `Reader` walks a finished payload consuming the same
//! widths in the same order.
//!
//! Both are single-owner by construction: every operation takes `&mut
//! self`, one instance serves one logical encode or decode, and nothing is
//! shared. The [`NumericCodec`] they carry is plain data and imposes no
//! synchronization of its own.

use crate::bits::BitString;
use crate::errors::{ProtocolError, Result};
use crate::numeric::{
    FLOAT_BITS, NumericCodec, SIGNED_INTEGER_BITS, UNSIGNED_INTEGER_BITS, UNSIGNED_LONG_BITS,
    UNSIGNED_SHORT_BITS,
};

/// Accumulates fixed-width segments into one contiguous bit string.
///
/// Each write appends the corresponding [`NumericCodec`] output in call
/// order. [`Writer::flush`] is a one-shot extraction: it drains the buffer
/// and resets the writer, so one writer can produce several logical units
/// (tag, payload, length) back to back.
#[derive(Debug, Default)]
pub struct Writer {
    codec: NumericCodec,
    buffer: String,
}

impl Writer {
    /// Writer using the default numeric codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer using a specific numeric codec (for alternate signed
    /// offsets).
    #[must_use]
    pub fn with_codec(codec: NumericCodec) -> Self {
        Self { codec, buffer: String::new() }
    }

    /// The codec this writer encodes with.
    #[must_use]
    pub fn codec(&self) -> NumericCodec {
        self.codec
    }

    /// Bits accumulated since the last flush.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.buffer.len()
    }

    /// Append an unsigned short (16 bits).
    pub fn unsigned_short(&mut self, value: u16) {
        self.push(&self.codec.from_unsigned_short(value));
    }

    /// Append an unsigned integer (32 bits).
    pub fn unsigned_integer(&mut self, value: u32) {
        self.push(&self.codec.from_unsigned_integer(value));
    }

    /// Append a signed integer (32 bits).
    ///
    /// # Errors
    ///
    /// Propagates [`ProtocolError::SignedOutOfRange`] from the codec.
    pub fn signed_integer(&mut self, value: i32) -> Result<()> {
        let bits = self.codec.from_signed_integer(value)?;
        self.push(&bits);
        Ok(())
    }

    /// Append an unsigned long (64 bits, low half first).
    pub fn unsigned_long(&mut self, value: u64) {
        self.push(&self.codec.from_unsigned_long(value));
    }

    /// Append a float (32 bits, IEEE754).
    pub fn float(&mut self, value: f32) {
        self.push(&self.codec.from_float(value));
    }

    /// Append an arbitrary-width unsigned value.
    ///
    /// # Errors
    ///
    /// Propagates width and range errors from
    /// [`NumericCodec::from_number`].
    pub fn number(&mut self, value: u64, width: usize) -> Result<()> {
        let bits = self.codec.from_number(value, width)?;
        self.push(&bits);
        Ok(())
    }

    /// Append an already-built bit string unchanged.
    pub fn binary(&mut self, bits: &BitString) {
        self.push(bits);
    }

    /// Extract everything written since the last flush and reset.
    ///
    /// Flushing an empty writer yields an empty bit string, which is how a
    /// component with no active fields produces its zero-length payload.
    pub fn flush(&mut self) -> BitString {
        BitString::from_digits(core::mem::take(&mut self.buffer))
    }

    fn push(&mut self, bits: &BitString) {
        self.buffer.push_str(bits.as_str());
    }
}

/// Consumes fixed-width segments from the front of a payload.
///
/// Holds an immutable borrow of the payload plus a read position. Each read
/// takes exactly its declared width and advances; overrunning the end is
/// [`ProtocolError::ReadOverrun`], never truncated or zero-filled data.
#[derive(Debug)]
pub struct Reader<'a> {
    codec: NumericCodec,
    payload: &'a BitString,
    position: usize,
}

impl<'a> Reader<'a> {
    /// Reader over `payload` using the default numeric codec.
    #[must_use]
    pub fn new(payload: &'a BitString) -> Self {
        Self::with_codec(payload, NumericCodec::new())
    }

    /// Reader over `payload` using a specific numeric codec.
    #[must_use]
    pub fn with_codec(payload: &'a BitString, codec: NumericCodec) -> Self {
        Self { codec, payload, position: 0 }
    }

    /// The codec this reader decodes with.
    #[must_use]
    pub fn codec(&self) -> NumericCodec {
        self.codec
    }

    /// Current read position, in bits from the start of the payload.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bits not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.position
    }

    /// Whether the whole payload has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume 16 bits as an unsigned short.
    pub fn unsigned_short(&mut self) -> Result<u16> {
        let bits = self.binary(UNSIGNED_SHORT_BITS)?;
        self.codec.as_unsigned_short(&bits)
    }

    /// Consume 32 bits as an unsigned integer.
    pub fn unsigned_integer(&mut self) -> Result<u32> {
        let bits = self.binary(UNSIGNED_INTEGER_BITS)?;
        self.codec.as_unsigned_integer(&bits)
    }

    /// Consume 32 bits as a signed integer.
    pub fn signed_integer(&mut self) -> Result<i32> {
        let bits = self.binary(SIGNED_INTEGER_BITS)?;
        self.codec.as_signed_integer(&bits)
    }

    /// Consume 64 bits as an unsigned long.
    pub fn unsigned_long(&mut self) -> Result<u64> {
        let bits = self.binary(UNSIGNED_LONG_BITS)?;
        self.codec.as_unsigned_long(&bits)
    }

    /// Consume 32 bits as a float.
    pub fn float(&mut self) -> Result<f32> {
        let bits = self.binary(FLOAT_BITS)?;
        self.codec.as_float(&bits)
    }

    /// Consume `width` bits as an arbitrary unsigned value.
    pub fn number(&mut self, width: usize) -> Result<u64> {
        let bits = self.binary(width)?;
        self.codec.as_number(&bits)
    }

    /// Consume `width` bits verbatim.
    pub fn binary(&mut self, width: usize) -> Result<BitString> {
        let segment = self.take(width)?;
        Ok(BitString::from_digits(segment.to_owned()))
    }

    /// Advance past `width` bits without interpreting them.
    ///
    /// This is how an unrecognized or future component's payload is
    /// skipped using its declared length alone.
    pub fn skip(&mut self, width: usize) -> Result<()> {
        self.take(width).map(|_| ())
    }

    fn take(&mut self, width: usize) -> Result<&'a str> {
        if width > self.remaining() {
            return Err(ProtocolError::ReadOverrun {
                requested: width,
                remaining: self.remaining(),
            });
        }
        let start = self.position;
        self.position += width;
        Ok(&self.payload.as_str()[start..self.position])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn writes_append_in_call_order() {
        let mut writer = Writer::new();
        writer.unsigned_short(1);
        writer.unsigned_integer(2);
        let bits = writer.flush();
        assert_eq!(bits.len(), 48);
        assert_eq!(&bits.as_str()[..16], "0000000000000001");
        assert_eq!(&bits.as_str()[16..], "00000000000000000000000000000010");
    }

    #[test]
    fn flush_is_one_shot() {
        let mut writer = Writer::new();
        writer.unsigned_short(7);
        assert_eq!(writer.bit_len(), 16);
        let first = writer.flush();
        assert_eq!(first.len(), 16);
        assert_eq!(writer.bit_len(), 0);
        assert!(writer.flush().is_empty());

        // The writer is a clean unit again after flushing.
        writer.unsigned_short(7);
        assert_eq!(writer.flush(), first);
    }

    #[test]
    fn reader_round_trips_every_kind() {
        let mut writer = Writer::new();
        writer.unsigned_short(65_535);
        writer.unsigned_integer(80_000);
        writer.signed_integer(-42).unwrap();
        writer.unsigned_long(1 << 40);
        writer.float(-3.25);
        let payload = writer.flush();

        let mut reader = Reader::new(&payload);
        assert_eq!(reader.unsigned_short().unwrap(), 65_535);
        assert_eq!(reader.unsigned_integer().unwrap(), 80_000);
        assert_eq!(reader.signed_integer().unwrap(), -42);
        assert_eq!(reader.unsigned_long().unwrap(), 1 << 40);
        assert_eq!(reader.float().unwrap(), -3.25);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn binary_passthrough_survives_unchanged() {
        let raw = BitString::from_text("1011").unwrap();
        let mut writer = Writer::new();
        writer.binary(&raw);
        writer.binary(&raw);
        assert_eq!(writer.flush().as_str(), "10111011");
    }

    #[test]
    fn overrun_is_an_error_not_a_truncation() {
        let payload = BitString::from_text("00000001").unwrap();
        let mut reader = Reader::new(&payload);
        assert_eq!(
            reader.unsigned_short(),
            Err(ProtocolError::ReadOverrun { requested: 16, remaining: 8 })
        );
        // Position is untouched by the failed read.
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.number(8).unwrap(), 1);
    }

    #[test]
    fn skip_advances_without_interpreting() {
        let payload = BitString::from_text("111100000001").unwrap();
        let mut reader = Reader::new(&payload);
        reader.skip(4).unwrap();
        assert_eq!(reader.number(8).unwrap(), 1);
        assert_eq!(
            reader.skip(1),
            Err(ProtocolError::ReadOverrun { requested: 1, remaining: 0 })
        );
    }

    #[test]
    fn custom_codec_threads_through_both_cursors() {
        let codec = NumericCodec::with_signed_offset(4096);
        let mut writer = Writer::with_codec(codec);
        writer.signed_integer(-17).unwrap();
        let payload = writer.flush();

        let mut reader = Reader::with_codec(&payload, codec);
        assert_eq!(reader.signed_integer().unwrap(), -17);
    }
}
