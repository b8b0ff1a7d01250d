//! Writer/Reader matrix for the wire primitives.

use proptest::prelude::*;
use wirecodec_buffers::{varint_size, BufferError, Reader, WireType, Writer};

// ---------------------------------------------------------------------------
// Varints
// ---------------------------------------------------------------------------

#[test]
fn varint_known_encodings() {
    let cases: &[(u64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x01]),
        (150, &[0x96, 0x01]),
        (16_384, &[0x80, 0x80, 0x01]),
    ];
    for (value, expected) in cases {
        let mut w = Writer::new();
        w.varint(*value);
        assert_eq!(w.flush(), expected.to_vec(), "encoding {value}");
    }
}

#[test]
fn negative_int32_is_ten_bytes() {
    let mut w = Writer::new();
    w.varint(-1i32 as i64 as u64);
    let data = w.flush();
    assert_eq!(data.len(), 10);
    let mut r = Reader::new(&data);
    assert_eq!(r.varint().unwrap() as i32, -1);
}

proptest! {
    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let mut w = Writer::new();
        w.varint(value);
        let data = w.flush();
        prop_assert_eq!(data.len(), varint_size(value));
        let mut r = Reader::new(&data);
        prop_assert_eq!(r.varint().unwrap(), value);
        prop_assert!(r.is_done());
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[test]
fn tag_bytes_match_field_layout() {
    let mut w = Writer::new();
    w.tag(1, WireType::Varint);
    w.tag(2, WireType::LengthDelimited);
    w.tag(5, WireType::Varint);
    w.tag(7, WireType::LengthDelimited);
    w.tag(16, WireType::Varint);
    assert_eq!(w.flush(), vec![8, 18, 40, 58, 0x80, 0x01]);
}

#[test]
fn tag_rejects_reserved_wire_types() {
    let data = [0x0e];
    let mut r = Reader::new(&data);
    assert_eq!(r.tag(), Err(BufferError::InvalidWireType(6)));
}

// ---------------------------------------------------------------------------
// Length-delimited values and bounds
// ---------------------------------------------------------------------------

#[test]
fn nested_value_reads_inside_its_range() {
    let mut inner = Writer::new();
    inner.tag(1, WireType::Varint);
    inner.varint(3);

    let mut w = Writer::new();
    w.tag(1, WireType::LengthDelimited);
    w.nested(inner.as_slice());
    w.tag(2, WireType::Varint);
    w.varint(9);
    let data = w.flush();

    let mut r = Reader::new(&data);
    assert_eq!(r.tag().unwrap(), (1, WireType::LengthDelimited));
    let mut sub = r.delimited().unwrap();
    assert_eq!(sub.tag().unwrap(), (1, WireType::Varint));
    assert_eq!(sub.varint().unwrap(), 3);
    assert!(sub.is_done());
    assert_eq!(sub.tag(), Err(BufferError::UnterminatedVarint));

    assert_eq!(r.tag().unwrap(), (2, WireType::Varint));
    assert_eq!(r.varint().unwrap(), 9);
    assert!(r.is_done());
}

#[test]
fn from_slice_bounds_reads() {
    let data = [0x01, 0x02, 0x03, 0x04];
    let mut r = Reader::from_slice(&data, 1, 3);
    assert_eq!(r.size(), 2);
    assert_eq!(r.buf(2).unwrap(), &[0x02, 0x03]);
    assert_eq!(
        r.u8(),
        Err(BufferError::UnexpectedEnd {
            needed: 1,
            remaining: 0
        })
    );
}

#[test]
fn length_prefix_beyond_end_is_truncation() {
    let mut w = Writer::new();
    w.varint(10);
    w.buf(b"abc");
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert!(matches!(
        r.string(),
        Err(BufferError::UnexpectedEnd { needed: 10, remaining: 3 })
    ));
}

#[test]
fn skip_value_matrix() {
    let mut w = Writer::new();
    w.tag(1, WireType::Varint);
    w.varint(u64::MAX);
    w.tag(2, WireType::Fixed64);
    w.buf(&[0; 8]);
    w.tag(3, WireType::LengthDelimited);
    w.utf8("skip me");
    w.tag(4, WireType::Fixed32);
    w.buf(&[0; 4]);
    w.tag(5, WireType::StartGroup);
    w.tag(6, WireType::Varint);
    w.varint(1);
    w.tag(5, WireType::EndGroup);
    w.tag(9, WireType::Varint);
    w.varint(42);
    let data = w.flush();

    let mut r = Reader::new(&data);
    for _ in 0..5 {
        let (number, wire_type) = r.tag().unwrap();
        r.skip_value(number, wire_type).unwrap();
    }
    assert_eq!(r.tag().unwrap(), (9, WireType::Varint));
    assert_eq!(r.varint().unwrap(), 42);
}

#[test]
fn skip_value_fails_on_short_fixed() {
    let data = [0x00, 0x00];
    let mut r = Reader::new(&data);
    assert!(r.skip_value(1, WireType::Fixed32).is_err());
}
