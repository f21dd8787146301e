//! Version-gated component field sets.
//!
//! A component type is described by an ordered list of field descriptors:
//! name, numeric kind, and the schema version that introduced the field.
//! Encoding and decoding walk that list once, in declaration order, writing
//! or reading every field whose `since` does not exceed the active version.
//! No field's presence ever depends on another field's decoded value - the
//! version threshold is the only gate.
//!
//! This is a table-driven design, not reflection: descriptor lists are
//! fixed at definition time (`const`-constructible) and the walk is a
//! single pass per operation with no persistent state.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::bits::BitString;
use crate::cursor::{Reader, Writer};
use crate::errors::{ProtocolError, Result};
use crate::numeric::{
    FLOAT_BITS, SIGNED_INTEGER_BITS, UNSIGNED_INTEGER_BITS, UNSIGNED_LONG_BITS,
    UNSIGNED_SHORT_BITS,
};
use crate::tags::Tag;

/// Numeric kind of a component field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum FieldKind {
    /// 16-bit unsigned integer.
    UnsignedShort = 0,
    /// 32-bit unsigned integer.
    UnsignedInteger = 1,
    /// 32-bit signed integer (sign-flag + offset scheme).
    SignedInteger = 2,
    /// 64-bit unsigned integer (low half first).
    UnsignedLong = 3,
    /// IEEE754 binary32 float.
    Float = 4,
}

impl FieldKind {
    /// Wire width of this kind, in bits.
    #[must_use]
    pub const fn bit_width(self) -> usize {
        match self {
            Self::UnsignedShort => UNSIGNED_SHORT_BITS,
            Self::UnsignedInteger => UNSIGNED_INTEGER_BITS,
            Self::SignedInteger => SIGNED_INTEGER_BITS,
            Self::UnsignedLong => UNSIGNED_LONG_BITS,
            Self::Float => FLOAT_BITS,
        }
    }

    /// The value a field of this kind takes when it is absent from the
    /// wire (introduced after the active version): zero.
    #[must_use]
    pub const fn default_value(self) -> FieldValue {
        match self {
            Self::UnsignedShort => FieldValue::UnsignedShort(0),
            Self::UnsignedInteger => FieldValue::UnsignedInteger(0),
            Self::SignedInteger => FieldValue::SignedInteger(0),
            Self::UnsignedLong => FieldValue::UnsignedLong(0),
            Self::Float => FieldValue::Float(0.0),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsignedShort => "unsigned short",
            Self::UnsignedInteger => "unsigned integer",
            Self::SignedInteger => "signed integer",
            Self::UnsignedLong => "unsigned long",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// A typed field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// 16-bit unsigned value.
    UnsignedShort(u16),
    /// 32-bit unsigned value.
    UnsignedInteger(u32),
    /// 32-bit signed value.
    SignedInteger(i32),
    /// 64-bit unsigned value.
    UnsignedLong(u64),
    /// 32-bit float value.
    Float(f32),
}

impl FieldValue {
    /// The kind this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::UnsignedShort(_) => FieldKind::UnsignedShort,
            Self::UnsignedInteger(_) => FieldKind::UnsignedInteger,
            Self::SignedInteger(_) => FieldKind::SignedInteger,
            Self::UnsignedLong(_) => FieldKind::UnsignedLong,
            Self::Float(_) => FieldKind::Float,
        }
    }
}

/// One field in a component's declaration-ordered field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, for diagnostics and schema dumps.
    pub name: &'static str,
    /// Numeric kind.
    pub kind: FieldKind,
    /// Schema version that introduced the field.
    pub since: u32,
}

impl FieldDescriptor {
    /// Descriptor for a field introduced in `since`.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, since: u32) -> Self {
        Self { name, kind, since }
    }
}

/// A component type: tag, name, and ordered field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentSchema {
    /// The component's 32-bit type identifier.
    pub tag: Tag,
    /// Component name, for diagnostics.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl ComponentSchema {
    /// Schema from its parts.
    #[must_use]
    pub const fn new(tag: Tag, name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { tag, name, fields }
    }

    /// Fields present at `version`, in declaration order.
    pub fn active_fields(&self, version: u32) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |field| field.since <= version)
    }

    /// Payload width at `version`, in bits.
    #[must_use]
    pub fn payload_bits(&self, version: u32) -> usize {
        self.active_fields(version).map(|field| field.kind.bit_width()).sum()
    }

    /// Highest version any field requires.
    #[must_use]
    pub fn latest_version(&self) -> u32 {
        self.fields.iter().map(|field| field.since).max().unwrap_or(0)
    }

    /// Check that `values` covers every declared field with the right
    /// kinds.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::FieldCountMismatch`] or
    /// [`ProtocolError::FieldKindMismatch`] naming the first offender.
    pub fn check_values(&self, values: &[FieldValue]) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(ProtocolError::FieldCountMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }
        for (field, value) in self.fields.iter().zip(values) {
            if value.kind() != field.kind {
                return Err(ProtocolError::FieldKindMismatch {
                    field: field.name,
                    expected: field.kind,
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Encode a full value set at `version` into one frame.
    ///
    /// The caller supplies a value for *every* declared field; fields
    /// introduced after `version` are skipped by the walk, not omitted
    /// from the input.
    pub fn encode(&self, values: &[FieldValue], version: u32) -> Result<BitString> {
        self.encode_with(&mut Writer::new(), values, version)
    }

    /// Encode through a caller-supplied writer (for alternate codecs).
    ///
    /// The writer must be clean; it is left clean again on success. The
    /// frame is assembled from three flush boundaries - tag, field walk,
    /// then the length of the flushed field data - concatenated as
    /// `tag ++ length ++ payload`.
    pub fn encode_with(
        &self,
        writer: &mut Writer,
        values: &[FieldValue],
        version: u32,
    ) -> Result<BitString> {
        self.check_values(values)?;

        writer.unsigned_integer(self.tag.raw());
        let tag_bits = writer.flush();

        for (field, value) in self.fields.iter().zip(values) {
            if field.since > version {
                continue;
            }
            match *value {
                FieldValue::UnsignedShort(v) => writer.unsigned_short(v),
                FieldValue::UnsignedInteger(v) => writer.unsigned_integer(v),
                FieldValue::SignedInteger(v) => writer.signed_integer(v)?,
                FieldValue::UnsignedLong(v) => writer.unsigned_long(v),
                FieldValue::Float(v) => writer.float(v),
            }
        }
        let data_bits = writer.flush();

        writer.unsigned_integer(data_bits.len() as u32);
        let size_bits = writer.flush();

        Ok(BitString::concat(&[&tag_bits, &size_bits, &data_bits]))
    }

    /// Decode one frame of this component from `reader` at `version`.
    ///
    /// Reads the tag (which must match this schema's), the declared
    /// payload length, then walks the version-gated field list inside a
    /// sub-reader bounded to exactly that many bits. Fields introduced
    /// after `version` are never read and take their kind's default.
    ///
    /// The outer reader always advances by exactly the declared length:
    /// bits beyond the fields this build knows about belong to a newer
    /// schema revision and are skipped, which is what keeps old readers
    /// able to traverse new streams. A walk that would *overrun* the
    /// declared length is corruption and fails with
    /// [`ProtocolError::FrameInconsistency`].
    pub fn decode(&self, reader: &mut Reader<'_>, version: u32) -> Result<Vec<FieldValue>> {
        let found = Tag::new(reader.unsigned_integer()?);
        if found != self.tag {
            return Err(ProtocolError::TagMismatch { expected: self.tag, found });
        }
        let declared = reader.unsigned_integer()? as usize;
        let payload = reader.binary(declared)?;
        let mut walk = Reader::with_codec(&payload, reader.codec());
        self.walk_fields(&mut walk, version)
    }

    /// Walk a bare payload (no tag/length envelope) at `version`.
    ///
    /// For callers that read the envelope themselves - dispatched on the
    /// tag via [`crate::frame::Frame::decode`] - and hold the payload bits.
    pub fn decode_payload(&self, payload: &BitString, version: u32) -> Result<Vec<FieldValue>> {
        self.walk_fields(&mut Reader::new(payload), version)
    }

    fn walk_fields(&self, reader: &mut Reader<'_>, version: u32) -> Result<Vec<FieldValue>> {
        let declared = reader.remaining();
        let mut values = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            if field.since > version {
                values.push(field.kind.default_value());
                continue;
            }
            let wanted = field.kind.bit_width();
            if wanted > reader.remaining() {
                return Err(ProtocolError::FrameInconsistency {
                    declared,
                    consumed: reader.position() + wanted,
                });
            }
            let value = match field.kind {
                FieldKind::UnsignedShort => FieldValue::UnsignedShort(reader.unsigned_short()?),
                FieldKind::UnsignedInteger => {
                    FieldValue::UnsignedInteger(reader.unsigned_integer()?)
                }
                FieldKind::SignedInteger => FieldValue::SignedInteger(reader.signed_integer()?),
                FieldKind::UnsignedLong => FieldValue::UnsignedLong(reader.unsigned_long()?),
                FieldKind::Float => FieldValue::Float(reader.float()?),
            };
            values.push(value);
        }
        Ok(values)
    }
}

/// A typed component that knows its schema.
///
/// This is the per-component-type surface: concrete record types implement
/// the three conversion hooks and inherit `encode`/`decode` driving the
/// generic version-gated walk.
pub trait Component: Sized {
    /// The component's schema.
    fn schema() -> &'static ComponentSchema;

    /// This record's values, one per declared field, in declaration order.
    fn to_values(&self) -> Vec<FieldValue>;

    /// Rebuild a record from a full decoded value list.
    fn from_values(values: Vec<FieldValue>) -> Result<Self>;

    /// Encode this record as a frame at `version`.
    fn encode(&self, version: u32) -> Result<BitString> {
        Self::schema().encode(&self.to_values(), version)
    }

    /// Decode one frame of this component from `reader` at `version`.
    fn decode(reader: &mut Reader<'_>, version: u32) -> Result<Self> {
        Self::schema().decode(reader, version).and_then(Self::from_values)
    }
}
