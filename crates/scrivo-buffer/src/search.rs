//! Case-insensitive text search.
//!
//! Matching compares one character at a time, folding each side with
//! `char::to_lowercase`. Because no string is ever lowercased as a whole,
//! a match always spans exactly `needle.chars().count()` characters of the
//! haystack and offsets stay valid in the original text.

/// Returns true if two characters are equal ignoring case.
pub fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn matches_at(hay: &[char], needle: &[char], start: usize) -> bool {
    hay[start..start + needle.len()]
        .iter()
        .zip(needle)
        .all(|(&a, &b)| chars_match(a, b))
}

fn find_in_chars(hay: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    let last = hay.len() - needle.len();
    (from..=last).find(|&start| matches_at(hay, needle, start))
}

/// Finds the first match of `needle` at or after char offset `from`.
pub fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    find_in_chars(&hay, &needle, from)
}

/// Like `find_ignore_case`, but retries from the start when nothing is
/// found after `from`.
pub fn find_wrapping(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    find_in_chars(&hay, &needle, from).or_else(|| find_in_chars(&hay, &needle, 0))
}

/// Returns the start offsets of all non-overlapping matches, left to right.
pub fn find_all_ignore_case(haystack: &str, needle: &str) -> Vec<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(start) = find_in_chars(&hay, &needle, from) {
        found.push(start);
        from = start + needle.len();
    }
    found
}

/// Replaces every non-overlapping match of `needle` with `replacement`.
///
/// Returns the new text and the number of replacements. An empty needle
/// leaves the text untouched.
pub fn replace_all_ignore_case(haystack: &str, needle: &str, replacement: &str) -> (String, usize) {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return (haystack.to_string(), 0);
    }

    let mut out = String::with_capacity(haystack.len());
    let mut count = 0;
    let mut i = 0;
    while i < hay.len() {
        if i + needle.len() <= hay.len() && matches_at(&hay, &needle, i) {
            out.push_str(replacement);
            i += needle.len();
            count += 1;
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }
    (out, count)
}
