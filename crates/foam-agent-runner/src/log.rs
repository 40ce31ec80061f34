//! Log trimming for process output returned to callers

/// Default number of characters kept by [`trim_log`].
pub const MAX_LOG_CHARS: usize = 8000;

/// Return the last `limit` characters of `payload`.
///
/// Errors tend to show up at the end of a solver log, so the tail is kept.
/// Counting is done in `char`s, so a multi-byte code point is never split.
/// Payloads at or under the limit are returned unchanged.
#[must_use]
pub fn trim_log(payload: &str, limit: usize) -> &str {
    let total = payload.chars().count();
    if total <= limit {
        return payload;
    }
    let skip = total - limit;
    match payload.char_indices().nth(skip) {
        Some((start, _)) => &payload[start..],
        None => "",
    }
}
