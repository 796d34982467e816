//! Normalisation of values captured from behavioural step text.

/// Trims `value` and removes one pair of matching outer quotes, single or
/// double.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| trimmed.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(trimmed)
}

/// Turns a captured template key such as `'name'` into the bare key.
#[must_use]
pub fn captured_key(value: &str) -> String {
    unquote(value).trim().to_owned()
}
