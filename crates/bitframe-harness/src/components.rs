//! Sample component definitions.
//!
//! Two components with fixed tags and version-gated field lists:
//! [`Transform`] is the simple case (one kind, one version bump), while
//! [`Telemetry`] spreads every field kind across versions 1 through 3.

use bitframe_proto::{
    Component, ComponentSchema, FieldDescriptor, FieldKind, FieldValue, ProtocolError, Result, Tag,
};

/// Tag of the [`Transform`] component.
pub const TRANSFORM_TAG: Tag = Tag::new(0x5452_4E53);

/// Tag of the [`Telemetry`] component.
pub const TELEMETRY_TAG: Tag = Tag::new(0x544C_4D54);

const TRANSFORM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("x", FieldKind::Float, 1),
    FieldDescriptor::new("y", FieldKind::Float, 1),
    FieldDescriptor::new("z", FieldKind::Float, 1),
    FieldDescriptor::new("uniform_scale", FieldKind::Float, 2),
];

/// Schema of the [`Transform`] component.
pub const TRANSFORM_SCHEMA: ComponentSchema =
    ComponentSchema::new(TRANSFORM_TAG, "transform", TRANSFORM_FIELDS);

const TELEMETRY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("device", FieldKind::UnsignedInteger, 1),
    FieldDescriptor::new("sequence", FieldKind::UnsignedLong, 1),
    FieldDescriptor::new("battery_mv", FieldKind::UnsignedShort, 2),
    FieldDescriptor::new("temperature", FieldKind::Float, 2),
    FieldDescriptor::new("drift", FieldKind::SignedInteger, 3),
];

/// Schema of the [`Telemetry`] component.
pub const TELEMETRY_SCHEMA: ComponentSchema =
    ComponentSchema::new(TELEMETRY_TAG, "telemetry", TELEMETRY_FIELDS);

/// A position and scale record. All floats; `uniform_scale` arrived in v2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
    /// Uniform scale factor (since v2; defaults to 0.0 below that).
    pub uniform_scale: f32,
}

impl Component for Transform {
    fn schema() -> &'static ComponentSchema {
        &TRANSFORM_SCHEMA
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Float(self.x),
            FieldValue::Float(self.y),
            FieldValue::Float(self.z),
            FieldValue::Float(self.uniform_scale),
        ]
    }

    fn from_values(values: Vec<FieldValue>) -> Result<Self> {
        TRANSFORM_SCHEMA.check_values(&values)?;
        match values[..] {
            [
                FieldValue::Float(x),
                FieldValue::Float(y),
                FieldValue::Float(z),
                FieldValue::Float(uniform_scale),
            ] => Ok(Self { x, y, z, uniform_scale }),
            _ => Err(ProtocolError::FieldCountMismatch {
                expected: TRANSFORM_FIELDS.len(),
                found: values.len(),
            }),
        }
    }
}

/// A device telemetry record touching every field kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    /// Device identifier.
    pub device: u32,
    /// Monotonic sample sequence number.
    pub sequence: u64,
    /// Battery level in millivolts (since v2).
    pub battery_mv: u16,
    /// Temperature in degrees Celsius (since v2).
    pub temperature: f32,
    /// Clock drift in microseconds, signed (since v3).
    pub drift: i32,
}

impl Component for Telemetry {
    fn schema() -> &'static ComponentSchema {
        &TELEMETRY_SCHEMA
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::UnsignedInteger(self.device),
            FieldValue::UnsignedLong(self.sequence),
            FieldValue::UnsignedShort(self.battery_mv),
            FieldValue::Float(self.temperature),
            FieldValue::SignedInteger(self.drift),
        ]
    }

    fn from_values(values: Vec<FieldValue>) -> Result<Self> {
        TELEMETRY_SCHEMA.check_values(&values)?;
        match values[..] {
            [
                FieldValue::UnsignedInteger(device),
                FieldValue::UnsignedLong(sequence),
                FieldValue::UnsignedShort(battery_mv),
                FieldValue::Float(temperature),
                FieldValue::SignedInteger(drift),
            ] => Ok(Self { device, sequence, battery_mv, temperature, drift }),
            _ => Err(ProtocolError::FieldCountMismatch {
                expected: TELEMETRY_FIELDS.len(),
                found: values.len(),
            }),
        }
    }
}
