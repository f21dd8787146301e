//! Width-exact conversion between [`BitString`] and numeric values.
//!
//! Five interpretations are supported: unsigned 16/32/64-bit integers, a
//! signed 32-bit integer, and IEEE754 binary32 floats. Each is a literal
//! bit-level rendering - the wire size is the exact bit count, never a
//! packed or minimal encoding.
//!
//! Two encodings deserve attention because nothing structural catches a
//! mistake in them:
//!
//! - **Signed integers** use a sign-flag + offset scheme, not two's
//!   complement. The first bit is a positivity flag ('1' = non-negative).
//!   A non-negative value stores its magnitude in the remaining 31 bits; a
//!   negative value stores `value + signed_offset`. The offset is
//!   per-codec state (default 2^31). Encoder and decoder MUST agree on it:
//!   mismatched offsets decode to plausible but wrong values with no error.
//! - **Unsigned longs** store their low 32 bits in the *first* 32 digit
//!   positions and the high 32 bits in the last 32. Decoding reverses the
//!   half swap before reassembling the value.

use crate::bits::BitString;
use crate::errors::{ProtocolError, Result};

/// Width of an unsigned short, in bits.
pub const UNSIGNED_SHORT_BITS: usize = 16;
/// Width of an unsigned integer, in bits.
pub const UNSIGNED_INTEGER_BITS: usize = 32;
/// Width of a signed integer, in bits.
pub const SIGNED_INTEGER_BITS: usize = 32;
/// Width of an unsigned long, in bits.
pub const UNSIGNED_LONG_BITS: usize = 64;
/// Width of a float, in bits.
pub const FLOAT_BITS: usize = 32;
/// Largest width [`NumericCodec::from_number`] and
/// [`NumericCodec::as_number`] accept.
pub const MAX_NUMBER_BITS: usize = 64;

/// Default signed-integer offset: 2^31.
pub const DEFAULT_SIGNED_OFFSET: i64 = 2_147_483_648;

/// Bidirectional converter between bit strings and numeric values.
///
/// The codec is plain data and freely shareable; the only configuration it
/// carries is the signed-integer offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericCodec {
    signed_offset: i64,
}

impl Default for NumericCodec {
    fn default() -> Self {
        Self { signed_offset: DEFAULT_SIGNED_OFFSET }
    }
}

impl NumericCodec {
    /// Codec with the default signed-integer offset of 2^31.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with an alternate signed-integer offset.
    ///
    /// Both ends of a connection or file format must use the same offset.
    /// The encoding carries no fingerprint of it, so a mismatch cannot be
    /// detected - values simply decode wrong.
    #[must_use]
    pub fn with_signed_offset(signed_offset: i64) -> Self {
        Self { signed_offset }
    }

    /// The signed-integer offset in effect.
    #[must_use]
    pub fn signed_offset(&self) -> i64 {
        self.signed_offset
    }

    /// Render `value` as a `width`-bit string, left-padded with '0'.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnsupportedWidth`] outside 1..=64,
    /// [`ProtocolError::ValueOutOfRange`] when `value` needs more than
    /// `width` bits.
    pub fn from_number(&self, value: u64, width: usize) -> Result<BitString> {
        if width == 0 || width > MAX_NUMBER_BITS {
            return Err(ProtocolError::UnsupportedWidth { width });
        }
        if width < MAX_NUMBER_BITS && value >> width != 0 {
            return Err(ProtocolError::ValueOutOfRange { value, width });
        }
        Ok(BitString::from_digits(render(value, width)))
    }

    /// Parse a bit string of any supported width as an unsigned value.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnsupportedWidth`] when the string is empty or
    /// longer than 64 bits.
    pub fn as_number(&self, bits: &BitString) -> Result<u64> {
        if bits.is_empty() || bits.len() > MAX_NUMBER_BITS {
            return Err(ProtocolError::UnsupportedWidth { width: bits.len() });
        }
        Ok(parse(bits.as_str()))
    }

    /// Render an unsigned short as 16 bits.
    #[must_use]
    pub fn from_unsigned_short(&self, value: u16) -> BitString {
        BitString::from_digits(format!("{value:016b}"))
    }

    /// Interpret exactly 16 bits as an unsigned short.
    pub fn as_unsigned_short(&self, bits: &BitString) -> Result<u16> {
        bits.expect_len(UNSIGNED_SHORT_BITS)?;
        Ok(parse(bits.as_str()) as u16)
    }

    /// Render an unsigned integer as 32 bits.
    #[must_use]
    pub fn from_unsigned_integer(&self, value: u32) -> BitString {
        BitString::from_digits(format!("{value:032b}"))
    }

    /// Interpret exactly 32 bits as an unsigned integer.
    pub fn as_unsigned_integer(&self, bits: &BitString) -> Result<u32> {
        bits.expect_len(UNSIGNED_INTEGER_BITS)?;
        Ok(parse(bits.as_str()) as u32)
    }

    /// Render a signed integer as 32 bits under the sign-flag + offset
    /// scheme.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::SignedOutOfRange`] when the biased magnitude does
    /// not fit in 31 bits (only reachable with a non-default offset).
    pub fn from_signed_integer(&self, value: i32) -> Result<BitString> {
        let (flag, magnitude) = if value >= 0 {
            ('1', i64::from(value))
        } else {
            ('0', i64::from(value) + self.signed_offset)
        };
        if !(0..1_i64 << 31).contains(&magnitude) {
            return Err(ProtocolError::SignedOutOfRange {
                value: i64::from(value),
                offset: self.signed_offset,
            });
        }
        let mut digits = String::with_capacity(SIGNED_INTEGER_BITS);
        digits.push(flag);
        digits.push_str(&render(magnitude as u64, SIGNED_INTEGER_BITS - 1));
        Ok(BitString::from_digits(digits))
    }

    /// Interpret exactly 32 bits as a signed integer, reversing the
    /// sign-flag + offset scheme.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::SignedOutOfRange`] when subtracting the offset
    /// leaves the 32-bit signed range (only reachable with a non-default
    /// offset).
    pub fn as_signed_integer(&self, bits: &BitString) -> Result<i32> {
        bits.expect_len(SIGNED_INTEGER_BITS)?;
        let text = bits.as_str();
        let raw = parse(&text[1..]) as i64;
        let value = if text.starts_with('1') { raw } else { raw - self.signed_offset };
        i32::try_from(value).map_err(|_| ProtocolError::SignedOutOfRange {
            value,
            offset: self.signed_offset,
        })
    }

    /// Render an unsigned long as 64 bits, low half first.
    #[must_use]
    pub fn from_unsigned_long(&self, value: u64) -> BitString {
        let full = format!("{value:064b}");
        let (high, low) = full.split_at(UNSIGNED_LONG_BITS / 2);
        let mut digits = String::with_capacity(UNSIGNED_LONG_BITS);
        digits.push_str(low);
        digits.push_str(high);
        BitString::from_digits(digits)
    }

    /// Interpret exactly 64 bits as an unsigned long, undoing the half
    /// swap.
    pub fn as_unsigned_long(&self, bits: &BitString) -> Result<u64> {
        bits.expect_len(UNSIGNED_LONG_BITS)?;
        let (low, high) = bits.as_str().split_at(UNSIGNED_LONG_BITS / 2);
        Ok(parse(high) << 32 | parse(low))
    }

    /// Render a float as its 32-bit IEEE754 pattern, sign bit first.
    ///
    /// `±0`, `±∞`, and NaN produce the standard patterns; nothing is
    /// special-cased beyond what the packing itself yields.
    #[must_use]
    pub fn from_float(&self, value: f32) -> BitString {
        BitString::from_digits(format!("{:032b}", value.to_bits()))
    }

    /// Interpret exactly 32 bits as an IEEE754 float.
    pub fn as_float(&self, bits: &BitString) -> Result<f32> {
        bits.expect_len(FLOAT_BITS)?;
        Ok(f32::from_bits(parse(bits.as_str()) as u32))
    }
}

/// Render the low `width` bits of `value`, most significant first.
fn render(value: u64, width: usize) -> String {
    let mut digits = String::with_capacity(width);
    for i in (0..width).rev() {
        digits.push(if value >> i & 1 == 1 { '1' } else { '0' });
    }
    digits
}

/// Parse pre-validated binary digits. Caller guarantees at most 64 of them.
fn parse(digits: &str) -> u64 {
    digits.bytes().fold(0, |acc, b| acc << 1 | u64::from(b == b'1'))
}
