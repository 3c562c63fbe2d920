use fleece::{Encoder, Value};

fn assert_rejected(bytes: &[u8], what: &str) {
    assert!(
        Value::from_data(bytes).is_none(),
        "{what}: {bytes:02X?} must not validate"
    );
}

#[test]
fn rejects_trivially_broken_buffers() {
    assert_rejected(&[], "empty");
    assert_rejected(&[0x30], "odd length");
    assert_rejected(&[0x30, 0x00, 0x00], "odd length with trailer");
}

#[test]
fn rejects_bad_root_pointers() {
    // A zero pointer offset is illegal.
    assert_rejected(&[0x80, 0x00], "zero root offset");
    // A root pointing past the start of the buffer.
    assert_rejected(&[0x80, 0x7F], "root underruns buffer");
    assert_rejected(&[0x00, 0x01, 0x80, 0x40], "root overshoots the value");
}

#[test]
fn rejects_unknown_special() {
    assert_rejected(&[0x34, 0x00], "special nibble 4");
    assert_rejected(&[0x3F, 0x00], "special nibble 15");
}

#[test]
fn rejects_truncated_payloads() {
    // Long-form string length says 5 but only one payload byte follows.
    assert_rejected(&[0x4F, 0x05, 0x61, 0x00, 0x80, 0x02], "truncated string");
    // Varint length runs off the end of the buffer.
    assert_rejected(&[0x4F, 0xFF], "unterminated varint length");
    // Int claims an 8-byte payload that is not there.
    assert_rejected(&[0x17, 0x01, 0x02, 0x03, 0x80, 0x02], "truncated int");
    // Double header with no payload.
    assert_rejected(&[0x28, 0x00], "truncated double");
    assert_rejected(&[0x20, 0x00], "truncated float");
}

#[test]
fn rejects_oversized_containers() {
    // Array claims five narrow slots that overrun the buffer.
    assert_rejected(&[0x60, 0x05, 0x80, 0x01], "array count overruns");
    // Dict claims one pair but has room for half of it.
    assert_rejected(&[0x70, 0x01, 0x80, 0x01], "dict count overruns");
}

#[test]
fn rejects_bad_slot_pointers() {
    // Dict whose key slot is a zero-offset pointer.
    assert_rejected(
        &[0x70, 0x01, 0x80, 0x00, 0x00, 0x01, 0x80, 0x03],
        "zero slot offset",
    );
    // Array whose slot points before the buffer start.
    assert_rejected(
        &[0x60, 0x01, 0x80, 0x7F, 0x80, 0x02],
        "slot underruns buffer",
    );
}

#[test]
fn rejects_inline_value_wider_than_slot() {
    // A double cannot sit inline in a narrow slot.
    assert_rejected(
        &[0x60, 0x01, 0x28, 0x00, 0x80, 0x02],
        "double inline in narrow slot",
    );
    // Neither can a 3-byte int encoding.
    assert_rejected(
        &[0x60, 0x01, 0x11, 0x00, 0x80, 0x02],
        "int16 inline in narrow slot",
    );
}

#[test]
fn rejects_corrupted_valid_buffer() {
    let mut enc = Encoder::new();
    enc.begin_dict(1);
    enc.write_key("hi");
    enc.write_int(1);
    enc.end_dict();
    let good = enc.finish().expect("finish");
    assert!(Value::from_data(&good).is_some());

    // Inflate the dict's count so its slots overrun the buffer.
    let mut bad = good.clone();
    bad[5] = 0x02;
    assert_rejected(&bad, "inflated dict count");

    // Re-aim the root at one of the dict's pointer slots; the resulting
    // chain reads a bogus wide offset and underruns the buffer.
    let mut bad = good.clone();
    let last = bad.len() - 1;
    bad[last] = 0x02;
    assert_rejected(&bad, "root chained through a slot pointer");
}

#[test]
fn rejects_runaway_long_count() {
    // Count field saturated, then a varint claiming billions of slots.
    assert_rejected(
        &[0x67, 0xFF, 0x80, 0x80, 0x80, 0x02],
        "runaway count varint",
    );
}

#[test]
fn accepts_minimal_valid_buffers() {
    assert!(Value::from_data(&[0x30, 0x00]).is_some());
    assert!(Value::from_data(&[0x00, 0x2A]).is_some());
    assert!(Value::from_data(&[0x60, 0x00, 0x80, 0x01]).is_some());
}
