//! Streaming fleece encoder.

use std::cmp::Ordering;

use fleece_buffers::Writer;

use crate::constants::*;
use crate::error::FleeceError;
use crate::shared_keys::SharedKeys;
use crate::string_table::StringTable;
use crate::value::{Value, ValueType};
use crate::varint::{varint_len, write_varint, MAX_VARINT_LEN};

/// Construction-time options for an [`Encoder`].
#[derive(Debug, Clone, Copy)]
pub struct EncoderOptions {
    /// Write each distinct string only once; later occurrences become
    /// back-pointers to the first.
    pub unique_strings: bool,
    /// Sort dictionary keys so readers can binary-search. With this off,
    /// only [`crate::Dict::get_unsorted`] finds keys.
    pub sort_keys: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            unique_strings: true,
            sort_keys: true,
        }
    }
}

/// One staged slot of an open container: a small value kept inline until
/// the container is finalized, or the absolute position of a value already
/// written out-of-line. Positions count from the start of the base buffer
/// when one is set.
#[derive(Clone, Copy)]
enum Item {
    Inline { bytes: [u8; 4], len: u8 },
    Pointer { target: usize },
}

/// Comparable form of a staged dict key.
enum StagedKey {
    Int(i64),
    Str(Vec<u8>),
}

fn cmp_staged(a: &StagedKey, b: &StagedKey) -> Ordering {
    match (a, b) {
        (StagedKey::Int(x), StagedKey::Int(y)) => x.cmp(y),
        (StagedKey::Int(_), StagedKey::Str(_)) => Ordering::Less,
        (StagedKey::Str(_), StagedKey::Int(_)) => Ordering::Greater,
        (StagedKey::Str(x), StagedKey::Str(y)) => x.cmp(y),
    }
}

/// Staging frame for one open container. The frame at the bottom of the
/// stack is the pseudo-container holding the root value.
struct Collection {
    tag: u8,
    items: Vec<Item>,
    keys: Vec<StagedKey>,
}

impl Collection {
    fn new(tag: u8, reserve: usize) -> Self {
        Self {
            tag,
            items: Vec::with_capacity(reserve),
            keys: Vec::new(),
        }
    }
}

/// Streaming encoder producing fleece documents.
///
/// Values are written depth-first through the `write_*` and
/// `begin_*`/`end_*` calls; [`Encoder::finish`] appends the root slot and
/// yields the buffer. Write calls return `false` from the first structural
/// error on; the stored error stays sticky and surfaces from `finish`, so
/// callers can batch writes without per-call checks.
///
/// Open containers are staged in memory and emitted on `end_*`, because a
/// slot's width depends on how far its pointer has to reach — which is
/// only known once everything before the container has been written.
pub struct Encoder<'a> {
    writer: Writer,
    stack: Vec<Collection>,
    strings: StringTable,
    shared_keys: Option<&'a mut SharedKeys>,
    base: Option<&'a [u8]>,
    options: EncoderOptions,
    blocked_on_key: bool,
    writing_key: bool,
    error: Option<FleeceError>,
}

impl Default for Encoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Encoder<'a> {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            writer: Writer::new(),
            stack: vec![Collection::new(0, 1)],
            strings: StringTable::new(),
            shared_keys: None,
            base: None,
            options,
            blocked_on_key: false,
            writing_key: false,
            error: None,
        }
    }

    /// Gives the encoder a shared-keys mapping; every eligible dict key
    /// written from now on is stored as its integer encoding.
    pub fn set_shared_keys(&mut self, shared: &'a mut SharedKeys) {
        self.shared_keys = Some(shared);
    }

    /// Makes this encoder produce a delta against `base`: values passed to
    /// [`Encoder::write_value`] that live inside `base` become pointers
    /// back into it. The finished buffer is only readable appended after
    /// `base`. With `reuse_strings`, strings already present in the base
    /// are deduplicated against it as well.
    pub fn set_base(&mut self, base: &'a [u8], reuse_strings: bool) -> bool {
        if self.error.is_some() {
            return false;
        }
        if base.len() % 2 != 0 {
            return self.fail(FleeceError::InvalidData);
        }
        self.base = Some(base);
        if reuse_strings {
            return self.reuse_base_strings();
        }
        true
    }

    /// Pre-populates the dedup table with the strings reachable from the
    /// base document's root, so that writing an identical string emits a
    /// pointer into the base.
    pub fn reuse_base_strings(&mut self) -> bool {
        let Some(base) = self.base else {
            return self.fail(FleeceError::EncodeError);
        };
        let Some(root) = Value::from_trusted_data(base) else {
            return self.fail(FleeceError::InvalidData);
        };
        self.collect_base_strings(root);
        true
    }

    /// The stored error, if a write has failed.
    pub fn error(&self) -> Option<FleeceError> {
        self.error
    }

    /// Number of bytes written to the output so far.
    pub fn bytes_written(&self) -> usize {
        self.writer.len()
    }

    // ---- Scalars ----

    pub fn write_null(&mut self) -> bool {
        self.write_special(SPECIAL_NULL)
    }

    pub fn write_undefined(&mut self) -> bool {
        self.write_special(SPECIAL_UNDEFINED)
    }

    pub fn write_bool(&mut self, value: bool) -> bool {
        self.write_special(if value { SPECIAL_TRUE } else { SPECIAL_FALSE })
    }

    fn write_special(&mut self, nibble: u8) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        self.add_item(Item::Inline {
            bytes: [TAG_SPECIAL | nibble, 0, 0, 0],
            len: 2,
        });
        true
    }

    pub fn write_int(&mut self, value: i64) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        self.add_int_item(value);
        true
    }

    /// Writes an unsigned integer. Only needed for values of 2^63 and up,
    /// which cannot pass through [`Encoder::write_int`].
    pub fn write_uint(&mut self, value: u64) -> bool {
        if value <= i64::MAX as u64 {
            return self.write_int(value as i64);
        }
        if !self.check_value_allowed() {
            return false;
        }
        self.add_long_int(&value.to_le_bytes(), true);
        true
    }

    /// Writes a 32-bit float. Values with no fractional part are stored as
    /// integers; readers coerce them back transparently.
    pub fn write_float(&mut self, value: f32) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        if value.is_finite()
            && value == value.trunc()
            && value >= i64::MIN as f32
            && value < i64::MAX as f32
        {
            self.add_int_item(value as i64);
            return true;
        }
        let target = self.pad_to_even();
        self.writer.u8(TAG_FLOAT);
        self.writer.u8(0);
        self.writer.buf(&value.to_le_bytes());
        self.add_item(Item::Pointer { target });
        true
    }

    /// Writes a 64-bit float, downgraded to an integer or a 32-bit float
    /// when that loses no precision.
    pub fn write_double(&mut self, value: f64) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        if value.is_finite()
            && value == value.trunc()
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            self.add_int_item(value as i64);
            return true;
        }
        let target = self.pad_to_even();
        if is_f32_roundtrip(value) {
            self.writer.u8(TAG_FLOAT);
            self.writer.u8(0);
            self.writer.buf(&(value as f32).to_le_bytes());
        } else {
            self.writer.u8(TAG_FLOAT | FLOAT_DOUBLE_FLAG);
            self.writer.u8(0);
            self.writer.buf(&value.to_le_bytes());
        }
        self.add_item(Item::Pointer { target });
        true
    }

    /// Writes a string. Strings must not contain NUL bytes. With
    /// `unique_strings` on, repeated strings share one copy.
    pub fn write_string(&mut self, s: &str) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        if s.as_bytes().contains(&0) {
            return self.fail(FleeceError::InvalidData);
        }
        let dedup = self.options.unique_strings;
        let item = self.string_item(TAG_STRING, s.as_bytes(), dedup);
        self.add_item(item);
        true
    }

    /// Writes a binary blob.
    pub fn write_data(&mut self, data: &[u8]) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        let item = self.string_item(TAG_DATA, data, false);
        self.add_item(item);
        true
    }

    // ---- Containers ----

    /// Opens an array; subsequent writes add elements until
    /// [`Encoder::end_array`]. `reserve` pre-sizes the staging frame.
    pub fn begin_array(&mut self, reserve: usize) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        self.stack.push(Collection::new(TAG_ARRAY, reserve));
        self.blocked_on_key = false;
        true
    }

    pub fn end_array(&mut self) -> bool {
        self.end_collection(TAG_ARRAY)
    }

    /// Opens a dict; each entry is a [`Encoder::write_key`] call followed
    /// by one value write, until [`Encoder::end_dict`].
    pub fn begin_dict(&mut self, reserve: usize) -> bool {
        if !self.check_value_allowed() {
            return false;
        }
        self.stack.push(Collection::new(TAG_DICT, reserve * 2));
        self.blocked_on_key = true;
        true
    }

    pub fn end_dict(&mut self) -> bool {
        self.end_collection(TAG_DICT)
    }

    /// Writes the key for the next value of the open dict.
    pub fn write_key(&mut self, key: &str) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !self.awaiting_key() {
            return self.fail(FleeceError::EncodeError);
        }
        if key.as_bytes().contains(&0) {
            return self.fail(FleeceError::InvalidData);
        }
        let code = match self.shared_keys.as_deref_mut() {
            Some(shared) => shared.encode_and_add(key),
            None => None,
        };
        match code {
            Some(code) => self.stage_key(Self::int_key_item(code as i64), StagedKey::Int(code as i64)),
            None => {
                let dedup = self.options.unique_strings;
                let item = self.string_item(TAG_STRING, key.as_bytes(), dedup);
                self.stage_key(item, StagedKey::Str(key.as_bytes().to_vec()));
            }
        }
        true
    }

    // ---- Whole values ----

    /// Writes an already-decoded value, copying it deeply — unless it
    /// lives inside this encoder's base buffer, in which case a single
    /// pointer back into the base is emitted.
    pub fn write_value(&mut self, v: &Value<'_>) -> bool {
        if self.error.is_some() {
            return false;
        }
        if let Some(base) = self.base {
            let start = base.as_ptr() as usize;
            let addr = v.buf.as_ptr() as usize + v.pos;
            if v.buf.as_ptr() as usize >= start && addr < start + base.len() {
                if !self.check_value_allowed() {
                    return false;
                }
                self.add_item(Item::Pointer {
                    target: addr - start,
                });
                return true;
            }
        }
        match v.value_type() {
            ValueType::Null => self.write_null(),
            ValueType::Undefined => self.write_undefined(),
            ValueType::Boolean => self.write_bool(v.as_bool()),
            ValueType::Number => {
                if v.tag() == TAG_FLOAT {
                    if v.is_double() {
                        self.write_double(v.as_double())
                    } else {
                        self.write_float(v.as_double() as f32)
                    }
                } else if v.is_unsigned() {
                    self.write_uint(v.as_unsigned())
                } else {
                    self.write_int(v.as_int())
                }
            }
            ValueType::String => self.write_string(v.as_string()),
            ValueType::Data => self.write_data(v.as_data()),
            ValueType::Array => {
                let Some(array) = v.as_array() else {
                    return self.fail(FleeceError::UnknownValue);
                };
                if !self.begin_array(array.count()) {
                    return false;
                }
                for element in array.iter() {
                    if !self.write_value(&element) {
                        return false;
                    }
                }
                self.end_array()
            }
            ValueType::Dict => {
                let Some(dict) = v.as_dict() else {
                    return self.fail(FleeceError::UnknownValue);
                };
                if !self.begin_dict(dict.count()) {
                    return false;
                }
                for (key, value) in dict.iter() {
                    if !self.write_value_key(&key) {
                        return false;
                    }
                    if !self.write_value(&value) {
                        return false;
                    }
                }
                self.end_dict()
            }
        }
    }

    /// Re-stages a decoded dict key: integer keys keep their code (the
    /// mapping need not be present), string keys go through
    /// [`Encoder::write_key`].
    fn write_value_key(&mut self, key: &Value<'_>) -> bool {
        if key.is_integer() {
            if self.error.is_some() {
                return false;
            }
            if !self.awaiting_key() {
                return self.fail(FleeceError::EncodeError);
            }
            let code = key.as_int();
            if !(0..=MAX_SHORT_INT).contains(&code) {
                return self.fail(FleeceError::InvalidData);
            }
            self.stage_key(Self::int_key_item(code), StagedKey::Int(code));
            true
        } else {
            self.write_key(key.as_string())
        }
    }

    // ---- Finishing ----

    /// Ends encoding: writes the 2-byte root slot and yields the output,
    /// resetting the encoder for reuse. Requires every container to be
    /// closed and exactly one root value written.
    pub fn finish(&mut self) -> Result<Vec<u8>, FleeceError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.stack.len() != 1 || self.stack[0].items.len() != 1 {
            return Err(FleeceError::EncodeError);
        }
        match self.stack[0].items[0] {
            Item::Inline { bytes, len } => {
                if len <= 2 {
                    self.pad_to_even();
                    self.writer.buf(&bytes[..len as usize]);
                    if len < 2 {
                        self.writer.u8(0);
                    }
                } else {
                    // A 3- or 4-byte scalar cannot sit in the 2-byte root
                    // slot; write it out and point at it.
                    let target = self.pad_to_even();
                    self.writer.buf(&bytes[..len as usize]);
                    self.write_root_pointer(target)?;
                }
            }
            Item::Pointer { target } => self.write_root_pointer(target)?,
        }
        let out = self.writer.extract();
        self.reset();
        Ok(out)
    }

    /// Returns the encoder to a reusable empty state. The string table
    /// keeps its capacity; the base buffer and any stored error are
    /// cleared.
    pub fn reset(&mut self) {
        let _ = self.writer.extract();
        self.stack.clear();
        self.stack.push(Collection::new(0, 1));
        self.strings.reset();
        self.base = None;
        self.blocked_on_key = false;
        self.writing_key = false;
        self.error = None;
    }

    // ---- Internals ----

    fn fail(&mut self, e: FleeceError) -> bool {
        if self.error.is_none() {
            self.error = Some(e);
        }
        false
    }

    fn base_len(&self) -> usize {
        self.base.map_or(0, <[u8]>::len)
    }

    /// Pads the output to an even position and returns it (in combined
    /// base-plus-output coordinates).
    fn pad_to_even(&mut self) -> usize {
        let base = self.base_len();
        if (base + self.writer.len()) & 1 == 1 {
            self.writer.u8(0);
        }
        base + self.writer.len()
    }

    /// Checks that a value may be written in the current state: no sticky
    /// error, not awaiting a dict key, at most one root.
    fn check_value_allowed(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.blocked_on_key && !self.writing_key {
            return self.fail(FleeceError::EncodeError);
        }
        if self.stack.len() == 1 && !self.stack[0].items.is_empty() {
            return self.fail(FleeceError::EncodeError);
        }
        true
    }

    fn awaiting_key(&self) -> bool {
        self.blocked_on_key
            && self
                .stack
                .last()
                .is_some_and(|frame| frame.tag == TAG_DICT)
    }

    /// Stages an item in the open container. A value completing a dict
    /// entry moves the dict back to awaiting-key.
    fn add_item(&mut self, item: Item) {
        let top = self.stack.last_mut().expect("stack is never empty");
        if top.tag == TAG_DICT && !self.writing_key {
            self.blocked_on_key = true;
        }
        top.items.push(item);
    }

    fn stage_key(&mut self, item: Item, key: StagedKey) {
        self.writing_key = true;
        self.add_item(item);
        self.writing_key = false;
        self.blocked_on_key = false;
        let top = self.stack.last_mut().expect("stack is never empty");
        top.keys.push(key);
    }

    fn int_key_item(code: i64) -> Item {
        let raw = (code as u16) & 0x0FFF;
        Item::Inline {
            bytes: [TAG_SHORT_INT | (raw >> 8) as u8, raw as u8, 0, 0],
            len: 2,
        }
    }

    fn add_int_item(&mut self, value: i64) {
        if (MIN_SHORT_INT..=MAX_SHORT_INT).contains(&value) {
            self.add_item(Self::int_key_item(value));
            return;
        }
        let le = (value as u64).to_le_bytes();
        let sign_fill = if value < 0 { 0xFF } else { 0x00 };
        let mut n = 8;
        // Drop bytes that plain sign extension reproduces.
        while n > 1 && le[n - 1] == sign_fill && le[n - 2] & 0x80 == sign_fill & 0x80 {
            n -= 1;
        }
        self.add_long_int(&le[..n], false);
    }

    fn add_long_int(&mut self, payload: &[u8], unsigned: bool) {
        let n = payload.len();
        let flag = if unsigned { INT_UNSIGNED_FLAG } else { 0 };
        let header = TAG_INT | flag | (n - 1) as u8;
        if 1 + n <= 4 {
            let mut bytes = [0u8; 4];
            bytes[0] = header;
            bytes[1..1 + n].copy_from_slice(payload);
            self.add_item(Item::Inline {
                bytes,
                len: (1 + n) as u8,
            });
        } else {
            let target = self.pad_to_even();
            self.writer.u8(header);
            self.writer.buf(payload);
            self.add_item(Item::Pointer { target });
        }
    }

    /// Stages a string or data value: tiny payloads inline, everything
    /// else written out-of-line (deduplicated when asked) and staged as a
    /// pointer.
    fn string_item(&mut self, tag: u8, s: &[u8], dedup: bool) -> Item {
        if s.len() <= 1 {
            let mut bytes = [0u8; 4];
            bytes[0] = tag | s.len() as u8;
            if let Some(&b) = s.first() {
                bytes[1] = b;
            }
            return Item::Inline {
                bytes,
                len: (1 + s.len()) as u8,
            };
        }
        if dedup {
            if let Some(target) = self.strings.get(s) {
                return Item::Pointer { target };
            }
        }
        let target = self.pad_to_even();
        if s.len() <= MAX_NIBBLE_LENGTH {
            self.writer.u8(tag | s.len() as u8);
        } else {
            self.writer.u8(tag | VARINT_LENGTH_NIBBLE);
            let mut buf = [0u8; MAX_VARINT_LEN];
            let n = write_varint(&mut buf, s.len() as u64);
            self.writer.buf(&buf[..n]);
        }
        self.writer.buf(s);
        if dedup {
            self.strings.insert(s, target);
        }
        Item::Pointer { target }
    }

    fn end_collection(&mut self, tag: u8) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.stack.len() == 1 {
            return self.fail(FleeceError::EncodeError);
        }
        {
            let top = self.stack.last().expect("stack is never empty");
            if top.tag != tag {
                return self.fail(FleeceError::EncodeError);
            }
            if tag == TAG_DICT && !self.blocked_on_key {
                // A key was written without its value.
                return self.fail(FleeceError::EncodeError);
            }
        }
        let mut frame = self.stack.pop().expect("checked above");
        self.blocked_on_key = false;
        if !self.check_value_allowed() {
            return false;
        }
        if frame.tag == TAG_DICT {
            if let Err(e) = self.sort_dict(&mut frame) {
                return self.fail(e);
            }
        }
        match self.finalize_collection(&frame) {
            Ok(header_pos) => {
                self.add_item(Item::Pointer { target: header_pos });
                true
            }
            Err(e) => self.fail(e),
        }
    }

    /// Sorts a dict's staged pairs by key and rejects duplicates.
    fn sort_dict(&self, frame: &mut Collection) -> Result<(), FleeceError> {
        if !self.options.sort_keys {
            return Ok(());
        }
        let pairs = frame.keys.len();
        debug_assert_eq!(frame.items.len(), pairs * 2);
        let mut order: Vec<usize> = (0..pairs).collect();
        order.sort_by(|&a, &b| cmp_staged(&frame.keys[a], &frame.keys[b]));
        for window in order.windows(2) {
            if cmp_staged(&frame.keys[window[0]], &frame.keys[window[1]]) == Ordering::Equal {
                return Err(FleeceError::InvalidData);
            }
        }
        let mut items = Vec::with_capacity(frame.items.len());
        for &pair in &order {
            items.push(frame.items[pair * 2]);
            items.push(frame.items[pair * 2 + 1]);
        }
        frame.items = items;
        Ok(())
    }

    /// Emits a finished container: header, optional long-count varint,
    /// then the slots, with pointer offsets fixed up to their final
    /// positions. Returns the header position.
    fn finalize_collection(&mut self, frame: &Collection) -> Result<usize, FleeceError> {
        let slots = frame.items.len();
        let logical = if frame.tag == TAG_DICT {
            slots / 2
        } else {
            slots
        };
        let header_pos = self.pad_to_even();

        let long = logical >= LONG_COUNT as usize;
        let mut prefix = 2;
        if long {
            let n = varint_len((logical - LONG_COUNT as usize) as u64);
            prefix += n + (n & 1);
        }
        let first = header_pos + prefix;

        // A container is wide when any slot cannot be narrow: an inline
        // value bigger than 2 bytes, or a pointer out of 15-bit range.
        let mut wide = frame
            .items
            .iter()
            .any(|item| matches!(item, Item::Inline { len, .. } if *len > 2));
        if !wide {
            for (i, item) in frame.items.iter().enumerate() {
                if let Item::Pointer { target } = item {
                    let slot = first + i * NARROW;
                    if slot - target > 2 * MAX_NARROW_OFFSET {
                        wide = true;
                        break;
                    }
                }
            }
        }
        let width = if wide { WIDE } else { NARROW };

        let count_field = logical.min(LONG_COUNT as usize) as u16;
        let wide_bit = if wide { 0x08 } else { 0 };
        self.writer.u8(frame.tag | wide_bit | (count_field >> 8) as u8);
        self.writer.u8(count_field as u8);
        if long {
            let mut buf = [0u8; MAX_VARINT_LEN];
            let n = write_varint(&mut buf, (logical - LONG_COUNT as usize) as u64);
            self.writer.buf(&buf[..n]);
            if n & 1 == 1 {
                self.writer.u8(0);
            }
        }

        for (i, item) in frame.items.iter().enumerate() {
            let slot = first + i * width;
            debug_assert_eq!(slot, self.base_len() + self.writer.len());
            match item {
                Item::Inline { bytes, len } => {
                    self.writer.buf(&bytes[..*len as usize]);
                    for _ in *len as usize..width {
                        self.writer.u8(0);
                    }
                }
                Item::Pointer { target } => {
                    let offset = (slot - target) / 2;
                    if wide {
                        if offset > MAX_WIDE_OFFSET {
                            return Err(FleeceError::EncodeError);
                        }
                        self.writer
                            .buf(&(0x8000_0000 | offset as u32).to_be_bytes());
                    } else {
                        self.writer.buf(&(0x8000 | offset as u16).to_be_bytes());
                    }
                }
            }
        }
        Ok(header_pos)
    }

    /// Writes the trailing 2-byte root pointer. A target out of narrow
    /// reach gets an intermediate wide pointer for the root to point at.
    fn write_root_pointer(&mut self, target: usize) -> Result<(), FleeceError> {
        let mut target = target;
        let mut pos = self.pad_to_even();
        if (pos - target) / 2 > MAX_NARROW_OFFSET {
            let offset = (pos - target) / 2;
            if offset > MAX_WIDE_OFFSET {
                return Err(FleeceError::EncodeError);
            }
            self.writer
                .buf(&(0x8000_0000 | offset as u32).to_be_bytes());
            target = pos;
            pos += 4;
        }
        let offset = ((pos - target) / 2) as u16;
        self.writer.buf(&(0x8000 | offset).to_be_bytes());
        Ok(())
    }

    fn collect_base_strings(&mut self, v: Value<'a>) {
        match v.value_type() {
            ValueType::String => {
                let bytes = v.as_string().as_bytes();
                if bytes.len() > 1 {
                    self.strings.insert(bytes, v.offset());
                }
            }
            ValueType::Array => {
                if let Some(array) = v.as_array() {
                    for element in array.iter() {
                        self.collect_base_strings(element);
                    }
                }
            }
            ValueType::Dict => {
                if let Some(dict) = v.as_dict() {
                    for (key, value) in dict.iter() {
                        self.collect_base_strings(key);
                        self.collect_base_strings(value);
                    }
                }
            }
            _ => {}
        }
    }
}
