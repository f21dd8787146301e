//! Model-based cursor property tests.
//!
//! These tests generate random write-operation sequences and verify that
//! the real [`Writer`] behaves identically to a reference model - an
//! independent restatement of each encoding as plain string formatting -
//! and that a [`Reader`] walking the flushed output reproduces every value
//! in order.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use bitframe_proto::{Reader, Writer};
use proptest::prelude::*;

/// One cursor operation, paired with its reference encoding.
#[derive(Debug, Clone)]
enum WriteOp {
    UnsignedShort(u16),
    UnsignedInteger(u32),
    SignedInteger(i32),
    UnsignedLong(u64),
    Float(f32),
    Number { value: u64, width: usize },
}

impl WriteOp {
    /// Reference model: the bits this operation must produce, restated
    /// independently of the codec under test.
    fn expected_bits(&self) -> String {
        match *self {
            Self::UnsignedShort(v) => format!("{v:016b}"),
            Self::UnsignedInteger(v) => format!("{v:032b}"),
            Self::SignedInteger(v) => {
                if v >= 0 {
                    format!("1{v:031b}")
                } else {
                    format!("0{:031b}", i64::from(v) + (1_i64 << 31))
                }
            }
            Self::UnsignedLong(v) => {
                let full = format!("{v:064b}");
                format!("{}{}", &full[32..], &full[..32])
            }
            Self::Float(v) => format!("{:032b}", v.to_bits()),
            Self::Number { value, width } => format!("{value:0width$b}"),
        }
    }

    fn apply(&self, writer: &mut Writer) {
        match *self {
            Self::UnsignedShort(v) => writer.unsigned_short(v),
            Self::UnsignedInteger(v) => writer.unsigned_integer(v),
            Self::SignedInteger(v) => writer.signed_integer(v).unwrap(),
            Self::UnsignedLong(v) => writer.unsigned_long(v),
            Self::Float(v) => writer.float(v),
            Self::Number { value, width } => writer.number(value, width).unwrap(),
        }
    }

    fn check_read(&self, reader: &mut Reader<'_>) {
        match *self {
            Self::UnsignedShort(v) => assert_eq!(reader.unsigned_short().unwrap(), v),
            Self::UnsignedInteger(v) => assert_eq!(reader.unsigned_integer().unwrap(), v),
            Self::SignedInteger(v) => assert_eq!(reader.signed_integer().unwrap(), v),
            Self::UnsignedLong(v) => assert_eq!(reader.unsigned_long().unwrap(), v),
            Self::Float(v) => {
                assert_eq!(reader.float().unwrap().to_bits(), v.to_bits());
            }
            Self::Number { value, width } => assert_eq!(reader.number(width).unwrap(), value),
        }
    }
}

fn arb_op() -> impl Strategy<Value = WriteOp> {
    prop_oneof![
        any::<u16>().prop_map(WriteOp::UnsignedShort),
        any::<u32>().prop_map(WriteOp::UnsignedInteger),
        any::<i32>().prop_map(WriteOp::SignedInteger),
        any::<u64>().prop_map(WriteOp::UnsignedLong),
        any::<f32>().prop_filter("not NaN", |f| !f.is_nan()).prop_map(WriteOp::Float),
        (1_usize..=64).prop_flat_map(|width| {
            let max = if width == 64 { u64::MAX } else { (1_u64 << width) - 1 };
            (0..=max).prop_map(move |value| WriteOp::Number { value, width })
        }),
    ]
}

proptest! {
    #[test]
    fn writer_matches_the_reference_model(ops in prop::collection::vec(arb_op(), 0..32)) {
        let mut writer = Writer::new();
        let mut model = String::new();
        for op in &ops {
            op.apply(&mut writer);
            model.push_str(&op.expected_bits());
        }

        prop_assert_eq!(writer.bit_len(), model.len());
        let flushed = writer.flush();
        prop_assert_eq!(flushed.as_str(), model.as_str());

        // Flushing reset the writer; the reader reproduces every value.
        prop_assert_eq!(writer.bit_len(), 0);
        let mut reader = Reader::new(&flushed);
        for op in &ops {
            op.check_read(&mut reader);
        }
        prop_assert!(reader.is_exhausted());
    }

    #[test]
    fn interleaved_flushes_are_independent_units(
        first in prop::collection::vec(arb_op(), 1..8),
        second in prop::collection::vec(arb_op(), 1..8),
    ) {
        // One writer producing two units equals two writers producing one
        // unit each.
        let mut shared = Writer::new();
        for op in &first { op.apply(&mut shared); }
        let unit_a = shared.flush();
        for op in &second { op.apply(&mut shared); }
        let unit_b = shared.flush();

        let mut fresh = Writer::new();
        for op in &second { op.apply(&mut fresh); }
        prop_assert_eq!(unit_b, fresh.flush());
        prop_assert!(!unit_a.is_empty());
    }
}
