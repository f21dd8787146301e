//! Byte-aligned wire representation of frames.
//!
//! The protocol's logical contract is bit-exact, but storage and transport
//! move bytes. This module packs a [`Frame`] into bytes - an 8-byte header
//! with compile-time verified layout, then the payload bits MSB-first with
//! the final partial byte zero-padded - and reverses it with full
//! validation. The declared bit count in the header is what distinguishes
//! payload bits from padding, so no information is lost on frames whose
//! width is not a byte multiple.
//!
//! All parsing goes through `zerocopy`'s checked prefix reads; there is no
//! unchecked fast path.

use bytes::{BufMut, Bytes, BytesMut};
use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::bits::BitString;
use crate::errors::{ProtocolError, Result};
use crate::frame::Frame;
use crate::tags::Tag;

/// Packed frame header: tag then payload bit count, both big-endian.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct WireHeader {
    /// Component type identifier.
    pub tag: U32<BigEndian>,
    /// Number of payload *bits* that follow the header.
    pub payload_bits: U32<BigEndian>,
}

/// Packed header width in bytes.
pub const HEADER_BYTES: usize = core::mem::size_of::<WireHeader>();

/// Pack a frame into bytes.
///
/// Payload bits are packed most significant first; if the payload width is
/// not a multiple of eight, the final byte's trailing bits are zero.
#[must_use]
pub fn pack(frame: &Frame) -> Bytes {
    let payload_bytes = frame.payload.len().div_ceil(8);
    let mut buf = BytesMut::with_capacity(HEADER_BYTES + payload_bytes);

    let header = WireHeader {
        tag: U32::new(frame.tag.raw()),
        payload_bits: U32::new(frame.payload.len() as u32),
    };
    buf.extend_from_slice(header.as_bytes());

    for chunk in frame.payload.as_str().as_bytes().chunks(8) {
        let mut byte = 0_u8;
        for (offset, digit) in chunk.iter().enumerate() {
            if *digit == b'1' {
                byte |= 1 << (7 - offset);
            }
        }
        buf.put_u8(byte);
    }
    buf.freeze()
}

/// Unpack one frame from the front of `data`.
///
/// Bytes after the frame are ignored; sequencing multiple frames in one
/// buffer is the caller's concern.
///
/// # Errors
///
/// [`ProtocolError::Truncated`] when `data` ends before the header or the
/// declared payload does; [`ProtocolError::InvalidPadding`] when the
/// trailing bits of the final payload byte are not zero.
pub fn unpack(data: &[u8]) -> Result<Frame> {
    let (header, rest) = WireHeader::read_from_prefix(data)
        .map_err(|_| ProtocolError::Truncated { needed: HEADER_BYTES, available: data.len() })?;

    let bit_count = header.payload_bits.get() as usize;
    let needed = bit_count.div_ceil(8);
    if rest.len() < needed {
        return Err(ProtocolError::Truncated {
            needed: HEADER_BYTES + needed,
            available: data.len(),
        });
    }

    let mut digits = String::with_capacity(bit_count);
    for index in 0..bit_count {
        let bit = rest[index / 8] >> (7 - index % 8) & 1;
        digits.push(if bit == 1 { '1' } else { '0' });
    }

    if bit_count % 8 != 0 {
        let padding_mask = 0xFF_u8 >> (bit_count % 8);
        if rest[needed - 1] & padding_mask != 0 {
            return Err(ProtocolError::InvalidPadding);
        }
    }

    Ok(Frame::new(Tag::new(header.tag.get()), BitString::from_digits(digits)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn packs_header_and_zero_padded_payload() {
        let frame = Frame::new(Tag::new(1), BitString::from_text("101").unwrap());
        let packed = pack(&frame);
        assert_eq!(&packed[..], hex!("00000001 00000003 a0"));
    }

    #[test]
    fn packs_byte_aligned_payload_without_padding() {
        let payload = BitString::from_text("1111000010100101").unwrap();
        let packed = pack(&Frame::new(Tag::new(0xDEAD_BEEF), payload));
        assert_eq!(&packed[..], hex!("deadbeef 00000010 f0a5"));
    }

    #[test]
    fn unpack_reverses_pack() {
        for text in ["1", "101", "10110000", "111100001", "0000000000000001"] {
            let frame = Frame::new(Tag::new(42), BitString::from_text(text).unwrap());
            let unpacked = unpack(&pack(&frame)).unwrap();
            assert_eq!(unpacked, frame);
        }
    }

    #[test]
    fn zero_width_frame_is_eight_bytes() {
        let frame = Frame::new(Tag::new(5), BitString::default());
        let packed = pack(&frame);
        assert_eq!(&packed[..], hex!("00000005 00000000"));
        assert_eq!(unpack(&packed).unwrap(), frame);
    }

    #[test]
    fn trailing_bytes_are_left_for_the_caller() {
        let frame = Frame::new(Tag::new(7), BitString::from_text("11110000").unwrap());
        let mut data = pack(&frame).to_vec();
        data.extend_from_slice(&hex!("cafe"));
        assert_eq!(unpack(&data).unwrap(), frame);
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            unpack(&hex!("000000")),
            Err(ProtocolError::Truncated { needed: 8, available: 3 })
        );
    }

    #[test]
    fn short_payload_is_truncated() {
        // Declares 16 payload bits but carries one byte.
        assert_eq!(
            unpack(&hex!("00000001 00000010 ff")),
            Err(ProtocolError::Truncated { needed: 10, available: 9 })
        );
    }

    #[test]
    fn nonzero_padding_is_rejected() {
        // Three declared bits but a low bit set in the padding region.
        assert_eq!(
            unpack(&hex!("00000001 00000003 a1")),
            Err(ProtocolError::InvalidPadding)
        );
    }
}
