//! Proptest strategies for protocol values.

use bitframe_proto::{ComponentSchema, FieldKind, FieldValue};
use proptest::prelude::*;

/// Strategy for one value of the given kind.
///
/// Floats exclude NaN so round-trip assertions can use plain equality.
pub fn arb_field_value(kind: FieldKind) -> BoxedStrategy<FieldValue> {
    match kind {
        FieldKind::UnsignedShort => any::<u16>().prop_map(FieldValue::UnsignedShort).boxed(),
        FieldKind::UnsignedInteger => any::<u32>().prop_map(FieldValue::UnsignedInteger).boxed(),
        FieldKind::SignedInteger => any::<i32>().prop_map(FieldValue::SignedInteger).boxed(),
        FieldKind::UnsignedLong => any::<u64>().prop_map(FieldValue::UnsignedLong).boxed(),
        FieldKind::Float => any::<f32>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(FieldValue::Float)
            .boxed(),
    }
}

/// Strategy for a full value list matching `schema`, in declaration order.
pub fn arb_values_for(schema: &ComponentSchema) -> impl Strategy<Value = Vec<FieldValue>> {
    schema.fields.iter().map(|field| arb_field_value(field.kind)).collect::<Vec<_>>()
}

/// Strategy for a version in `0..=max`.
pub fn arb_version(max: u32) -> impl Strategy<Value = u32> {
    0..=max
}

/// Strategy for non-empty binary digit text up to 128 characters.
pub fn arb_bit_text() -> impl Strategy<Value = String> {
    "[01]{1,128}"
}
