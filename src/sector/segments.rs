//! Scatter/gather helpers
//!
//! A request is an ordered list of caller buffers that together cover a
//! contiguous sector range. These helpers copy between that list and the
//! addressed region; callers run them while holding the store guard.

/// Total byte length of a segment list
pub(super) fn total_len<S: AsRef<[u8]>>(segments: &[S]) -> usize {
    segments.iter().map(|s| s.as_ref().len()).sum()
}

/// Copy consecutive bytes of `region` into each destination segment in order
pub(super) fn scatter(region: &[u8], segments: &mut [&mut [u8]]) {
    let mut offset = 0;
    for segment in segments.iter_mut() {
        let len = segment.len();
        segment.copy_from_slice(&region[offset..offset + len]);
        offset += len;
    }
}

/// Copy each source segment in order into consecutive bytes of `region`
pub(super) fn gather(segments: &[&[u8]], region: &mut [u8]) {
    let mut offset = 0;
    for segment in segments {
        region[offset..offset + segment.len()].copy_from_slice(segment);
        offset += segment.len();
    }
}
