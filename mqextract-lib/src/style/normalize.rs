use crate::extract::{BASE_TAG, KEYFRAMES_TAG};

/// Tag used for a media group whose condition normalizes to nothing.
pub const EMPTY_GROUP_ID: &str = "media";
const GROUP_PREFIX: &str = "media-";

/// Derive the grouping key (and file-name tag) of a media condition.
///
/// Whitespace and parentheses are dropped, `:` becomes `-`, and the few
/// operators that show up in ratios and range syntax are spelled out so the
/// key stays filesystem-safe without two different conditions colliding.
/// The result is lowercase and feeding it back in returns it unchanged.
pub fn normalize(condition: &str) -> String {
    let mut id = String::with_capacity(condition.len());
    for ch in condition.chars() {
        match ch {
            '(' | ')' => {}
            c if c.is_whitespace() => {}
            ':' => id.push('-'),
            '/' => id.push('_'),
            '>' => id.push_str("gt"),
            '<' => id.push_str("lt"),
            '=' => id.push_str("eq"),
            c if c.is_ascii_alphanumeric() => id.push(c.to_ascii_lowercase()),
            '.' | '_' | ',' | '-' => id.push(ch),
            _ => {}
        }
    }
    id
}

/// The id a media group is merged under and written as.
///
/// Same as [`normalize`], except that ids which would land on another
/// bucket's file name (`base`, `keyframes`, `base_<id>`) get a `media-`
/// prefix. Ids already starting with `media` are prefixed too so no two
/// conditions end up sharing a file by accident.
pub fn group_id(condition: &str) -> String {
    let id = normalize(condition);
    if id.is_empty() {
        return EMPTY_GROUP_ID.to_string();
    }
    let reserved = id == BASE_TAG
        || id == KEYFRAMES_TAG
        || id.strip_prefix(BASE_TAG).is_some_and(|rest| rest.starts_with('_'))
        || id == EMPTY_GROUP_ID
        || id.starts_with(GROUP_PREFIX);
    if reserved {
        format!("{}{}", GROUP_PREFIX, id)
    } else {
        id
    }
}

/// First numeric literal in the condition, e.g. `768` for `(min-width: 768px)`.
pub fn sort_value(condition: &str) -> Option<f64> {
    let bytes = condition.as_bytes();
    let start = bytes.iter().enumerate().position(|(i, b)| {
        b.is_ascii_digit() || (*b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })?;

    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    condition[start..end].parse().ok()
}
