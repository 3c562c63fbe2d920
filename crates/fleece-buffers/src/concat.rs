//! Buffer concatenation, used to compose a delta document with its base.

/// Concatenates two byte slices into a new vector.
///
/// A fleece delta buffer is only readable after its base: concatenate them
/// with this before handing the result to the decoder.
///
/// # Example
///
/// ```
/// use fleece_buffers::concat;
///
/// let doc = concat(&[1, 2], &[3, 4]);
/// assert_eq!(doc, vec![1, 2, 3, 4]);
/// ```
pub fn concat(base: &[u8], delta: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(base.len() + delta.len());
    out.extend_from_slice(base);
    out.extend_from_slice(delta);
    out
}

/// Concatenates a list of byte slices into a new vector.
///
/// # Example
///
/// ```
/// use fleece_buffers::concat_list;
///
/// let doc = concat_list(&[&[1, 2][..], &[3][..], &[4, 5][..]]);
/// assert_eq!(doc, vec![1, 2, 3, 4, 5]);
/// ```
pub fn concat_list(parts: &[&[u8]]) -> Vec<u8> {
    let total: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}
