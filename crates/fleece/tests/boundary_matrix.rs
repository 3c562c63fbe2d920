use fleece::{Encoder, Value};

fn int_array(count: usize) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.begin_array(count);
    for i in 0..count {
        enc.write_int((i & 0x3FF) as i64);
    }
    enc.end_array();
    enc.finish().expect("finish")
}

#[test]
fn array_count_boundaries() {
    // 0x7FF is the first count that spills into a varint; 0x10000 needs a
    // multi-byte varint and pushes the root past narrow pointer range.
    for count in [0usize, 1, 0x7FE, 0x7FF, 0x800, 0x10000] {
        let data = int_array(count);
        let array = Value::from_data(&data)
            .unwrap_or_else(|| panic!("count {count} must validate"))
            .as_array()
            .expect("array");
        assert_eq!(array.count(), count, "count {count}");
        if count > 0 {
            assert_eq!(array.get(0).expect("first").as_int(), 0);
            let last = count - 1;
            assert_eq!(
                array.get(last).expect("last").as_int(),
                (last & 0x3FF) as i64
            );
            assert!(array.get(count).is_none());
        }
        let walked = array.iter().count();
        assert_eq!(walked, count, "iteration count {count}");
    }
}

#[test]
fn dict_count_boundaries() {
    for count in [0usize, 1, 0x7FE, 0x7FF, 0x800] {
        let mut enc = Encoder::new();
        enc.begin_dict(count);
        for i in 0..count {
            enc.write_key(&format!("k{i:05}"));
            enc.write_int(i as i64);
        }
        enc.end_dict();
        let data = enc.finish().expect("finish");
        let dict = Value::from_data(&data)
            .unwrap_or_else(|| panic!("count {count} must validate"))
            .as_dict()
            .expect("dict");
        assert_eq!(dict.count(), count, "count {count}");
        if count > 0 {
            let probe = format!("k{:05}", count - 1);
            assert_eq!(
                dict.get(&probe).expect("last key").as_int(),
                (count - 1) as i64
            );
        }
    }
}

/// Array whose single slot points at a string written `gap` bytes earlier.
/// Returns the finished buffer and the array header offset.
fn buffer_with_pointer_gap(payload_len: usize) -> (Vec<u8>, usize) {
    let mut enc = Encoder::new();
    let payload: String = std::iter::repeat('p').take(payload_len).collect();
    enc.begin_array(1);
    enc.write_string(&payload);
    enc.end_array();
    let data = enc.finish().expect("finish");
    // Walk the trailing root pointer to the header by hand.
    let root = data.len() - 2;
    let offset =
        ((((data[root] & 0x7F) as usize) << 8) | data[root + 1] as usize) * 2;
    let header = root - offset;
    (data, header)
}

#[test]
fn last_narrow_pointer_offset() {
    // Header byte + 3-byte varint length + payload = 65532 bytes, putting
    // the slot exactly 2 * 0x7FFF bytes past the string.
    let (data, header) = buffer_with_pointer_gap(65528);
    assert_eq!(data[header] & 0x08, 0, "container must stay narrow");
    let array = Value::from_data(&data)
        .expect("valid")
        .as_array()
        .expect("array");
    assert_eq!(array.get(0).expect("0").as_string().len(), 65528);
}

#[test]
fn first_wide_pointer_offset() {
    // Two bytes further and the slot offset no longer fits 15 bits.
    let (data, header) = buffer_with_pointer_gap(65530);
    assert_eq!(data[header] & 0x08, 0x08, "container must go wide");
    let array = Value::from_data(&data)
        .expect("valid")
        .as_array()
        .expect("array");
    assert_eq!(array.get(0).expect("0").as_string().len(), 65530);
}

#[test]
fn root_beyond_narrow_range_uses_wide_hop() {
    // 0x10000 narrow slots put the root about 128 KiB past the header;
    // the 2-byte root cannot reach it directly.
    let data = int_array(0x10000);
    let root_slot = data.len() - 2;
    assert!(data[root_slot] & 0x80 != 0);
    let offset =
        ((((data[root_slot] & 0x7F) as usize) << 8) | data[root_slot + 1] as usize) * 2;
    let hop = root_slot - offset;
    // The root lands on a wide pointer, which carries the real offset.
    assert!(data[hop] & 0x80 != 0, "expected an intermediate wide pointer");
    let array = Value::from_data(&data)
        .expect("valid")
        .as_array()
        .expect("array");
    assert_eq!(array.count(), 0x10000);
}

#[test]
fn long_count_header_encoding() {
    // Count 0x7FF keeps the header field saturated and adds a varint.
    let data = int_array(0x7FF);
    let array = Value::from_data(&data)
        .expect("valid")
        .as_array()
        .expect("array");
    assert_eq!(array.count(), 0x7FF);
    // One fewer element stays inside the 11-bit field.
    let data = int_array(0x7FE);
    let array = Value::from_data(&data)
        .expect("valid")
        .as_array()
        .expect("array");
    assert_eq!(array.count(), 0x7FE);
}
