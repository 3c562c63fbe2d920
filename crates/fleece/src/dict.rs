//! Dict values: iteration, sorted and unsorted lookup, key hints.

use std::cmp::Ordering;

use crate::shared_keys::SharedKeys;
use crate::value::Value;

/// A value that is a dictionary.
///
/// Slots alternate key, value. Keys written by a sorting encoder are
/// strictly increasing (integer keys first by numeric value, then string
/// keys in byte order), which [`Dict::get`] relies on for binary search.
/// Sortedness is a contract of the producing encoder; for documents
/// encoded with sorting off, only [`Dict::get_unsorted`] finds keys.
#[derive(Debug, Clone, Copy)]
pub struct Dict<'a> {
    pub(crate) value: Value<'a>,
}

/// Comparable form of a lookup key. Integer keys sort before string keys.
#[derive(Clone, Copy)]
enum KeyRef<'k> {
    Int(i64),
    Str(&'k [u8]),
}

fn compare(target: &KeyRef<'_>, slot_key: &Value<'_>) -> Ordering {
    match target {
        KeyRef::Int(t) => {
            if slot_key.is_integer() {
                t.cmp(&slot_key.as_int())
            } else {
                Ordering::Less
            }
        }
        KeyRef::Str(t) => {
            if slot_key.is_integer() {
                Ordering::Greater
            } else {
                (*t).cmp(slot_key.as_string().as_bytes())
            }
        }
    }
}

impl<'a> Dict<'a> {
    /// Number of key/value pairs.
    pub fn count(&self) -> usize {
        self.value.container_info().count
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Looks up a string key by binary search. The dict must have been
    /// written with sorted keys.
    pub fn get(&self, key: &str) -> Option<Value<'a>> {
        self.lookup(KeyRef::Str(key.as_bytes()))
    }

    /// Looks up an integer key by binary search.
    pub fn get_int(&self, key: i64) -> Option<Value<'a>> {
        self.lookup(KeyRef::Int(key))
    }

    /// Looks up a key through a shared-keys mapping. When the mapping
    /// knows the string, the integer form is searched (it is canonical in
    /// shared-keys documents); otherwise the string form.
    pub fn get_shared(&self, key: &str, shared: &SharedKeys) -> Option<Value<'a>> {
        match shared.encode(key) {
            Some(code) => self.get_int(code as i64),
            None => self.get(key),
        }
    }

    /// Looks up a string key by linear scan. Works on dicts written with
    /// sorting off; on sorted dicts it returns the same slot as
    /// [`Dict::get`].
    pub fn get_unsorted(&self, key: &str) -> Option<Value<'a>> {
        let info = self.value.container_info();
        let width = info.width();
        let target = KeyRef::Str(key.as_bytes());
        for i in 0..info.count {
            let kpos = info.first + i * 2 * width;
            let kv = Value::deref(self.value.buf, kpos, info.wide);
            if compare(&target, &kv) == Ordering::Equal {
                return Some(Value::deref(self.value.buf, kpos + width, info.wide));
            }
        }
        None
    }

    /// Looks up a reusable [`DictKey`], caching a slot hint inside it on
    /// success. A later lookup of the same key against the same buffer
    /// verifies the hint with a single comparison.
    pub fn get_with_key(&self, key: &mut DictKey) -> Option<Value<'a>> {
        let info = self.value.container_info();
        let buf = self.value.buf;
        let width = info.width();
        if let Some(h) = key.hint {
            let in_this_dict = h.buf_addr == buf.as_ptr() as usize
                && h.buf_len == buf.len()
                && h.slot >= info.first
                && h.slot < info.first + info.count * 2 * width;
            if in_this_dict {
                key.comparisons += 1;
                let kv = Value::deref(buf, h.slot, info.wide);
                if compare(&key.key_ref(), &kv) == Ordering::Equal {
                    return Some(Value::deref(buf, h.slot + width, info.wide));
                }
            }
        }
        let mut comparisons = 0;
        let found = self.search(key.key_ref(), &mut comparisons);
        key.comparisons += comparisons;
        let kpos = found?;
        key.hint = Some(Hint {
            buf_addr: buf.as_ptr() as usize,
            buf_len: buf.len(),
            slot: kpos,
        });
        Some(Value::deref(buf, kpos + width, info.wide))
    }

    /// Looks up a batch of keys, pre-sorted with [`DictKey::compare`], in
    /// one merge walk over the dict's slots. Results land in `values`
    /// (`None` for missing keys); returns the number found.
    pub fn get_with_keys(&self, keys: &[DictKey], values: &mut [Option<Value<'a>>]) -> usize {
        let info = self.value.container_info();
        let width = info.width();
        let mut found = 0;
        let mut pair = 0;
        let mut k = 0;
        while k < keys.len() && pair < info.count {
            let kpos = info.first + pair * 2 * width;
            let kv = Value::deref(self.value.buf, kpos, info.wide);
            match compare(&keys[k].key_ref(), &kv) {
                Ordering::Equal => {
                    values[k] = Some(Value::deref(self.value.buf, kpos + width, info.wide));
                    found += 1;
                    pair += 1;
                    k += 1;
                }
                Ordering::Less => {
                    values[k] = None;
                    k += 1;
                }
                Ordering::Greater => pair += 1,
            }
        }
        for slot in values.iter_mut().skip(k) {
            *slot = None;
        }
        found
    }

    pub fn iter(&self) -> DictIter<'a> {
        let info = self.value.container_info();
        DictIter {
            buf: self.value.buf,
            slot: info.first,
            remaining: info.count,
            wide: info.wide,
        }
    }

    /// This dict as a plain value view.
    pub fn as_value(&self) -> Value<'a> {
        self.value
    }

    fn lookup(&self, target: KeyRef<'_>) -> Option<Value<'a>> {
        let mut comparisons = 0;
        let kpos = self.search(target, &mut comparisons)?;
        let info = self.value.container_info();
        Some(Value::deref(self.value.buf, kpos + info.width(), info.wide))
    }

    /// Binary search over the pair slots; returns the key slot offset.
    fn search(&self, target: KeyRef<'_>, comparisons: &mut usize) -> Option<usize> {
        let info = self.value.container_info();
        let width = info.width();
        let mut lo = 0;
        let mut hi = info.count;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let kpos = info.first + mid * 2 * width;
            let kv = Value::deref(self.value.buf, kpos, info.wide);
            *comparisons += 1;
            match compare(&target, &kv) {
                Ordering::Equal => return Some(kpos),
                Ordering::Less => hi = mid,
                Ordering::Greater => lo = mid + 1,
            }
        }
        None
    }
}

#[derive(Clone, Copy)]
struct Hint {
    buf_addr: usize,
    buf_len: usize,
    slot: usize,
}

/// A reusable dictionary key that caches lookup state.
///
/// After a successful [`Dict::get_with_key`] the key remembers the
/// matching slot; later lookups against the same buffer verify the cached
/// slot with one comparison before falling back to binary search. A
/// `DictKey` belongs to a single caller: share one across threads only
/// with external synchronization, or hold one per thread.
pub struct DictKey {
    raw: String,
    numeric: Option<u16>,
    hint: Option<Hint>,
    /// Total key comparisons performed through this key, for diagnostics.
    pub comparisons: usize,
}

impl DictKey {
    pub fn new(key: &str) -> Self {
        Self {
            raw: key.to_owned(),
            numeric: None,
            hint: None,
            comparisons: 0,
        }
    }

    /// Creates a key that searches the integer form when `shared` already
    /// maps the string.
    pub fn with_shared_keys(key: &str, shared: &SharedKeys) -> Self {
        Self {
            raw: key.to_owned(),
            numeric: shared.encode(key),
            hint: None,
            comparisons: 0,
        }
    }

    /// The key string this key was created with.
    pub fn string(&self) -> &str {
        &self.raw
    }

    /// Ordering used by sorted dicts; sort batch-lookup keys with this.
    pub fn compare(a: &DictKey, b: &DictKey) -> Ordering {
        match (a.numeric, b.numeric) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.raw.as_bytes().cmp(b.raw.as_bytes()),
        }
    }

    fn key_ref(&self) -> KeyRef<'_> {
        match self.numeric {
            Some(code) => KeyRef::Int(code as i64),
            None => KeyRef::Str(self.raw.as_bytes()),
        }
    }
}

/// Iterator over the (key, value) pairs of a [`Dict`].
///
/// Keys come back as values: strings for plain keys, numbers for
/// shared-key codes (invert those through [`SharedKeys::decode`]).
pub struct DictIter<'a> {
    buf: &'a [u8],
    slot: usize,
    remaining: usize,
    wide: bool,
}

impl<'a> DictIter<'a> {
    /// Number of pairs not yet returned.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<'a> Iterator for DictIter<'a> {
    type Item = (Value<'a>, Value<'a>);

    fn next(&mut self) -> Option<(Value<'a>, Value<'a>)> {
        if self.remaining == 0 {
            return None;
        }
        let width = if self.wide { 4 } else { 2 };
        let key = Value::deref(self.buf, self.slot, self.wide);
        let value = Value::deref(self.buf, self.slot + width, self.wide);
        self.slot += 2 * width;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> IntoIterator for Dict<'a> {
    type Item = (Value<'a>, Value<'a>);
    type IntoIter = DictIter<'a>;

    fn into_iter(self) -> DictIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &Dict<'a> {
    type Item = (Value<'a>, Value<'a>);
    type IntoIter = DictIter<'a>;

    fn into_iter(self) -> DictIter<'a> {
        self.iter()
    }
}
