//! Byte-length truncation that never lands inside a multi-byte character.

/// Truncates `s` to at most `max_len` bytes, walking back to the nearest
/// preceding char boundary when `max_len` itself splits one.
pub(crate) fn truncate(s: &mut String, max_len: usize) {
    if s.len() <= max_len {
        return;
    }
    let mut boundary = max_len;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }
    s.truncate(boundary);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_short_strings_untouched() {
        let mut s = "abc".to_owned();
        truncate(&mut s, 10);
        assert_eq!(s, "abc");
    }

    #[test]
    fn backs_off_to_the_preceding_char_boundary() {
        // Three 3-byte characters; a limit of 4 lands mid-character twice in a row.
        let mut s = "\u{4e2d}\u{4e2d}\u{4e2d}".to_owned();
        truncate(&mut s, 4);
        assert_eq!(s, "\u{4e2d}");
    }

    #[test]
    fn exact_boundary_is_kept() {
        let mut s = "\u{4e2d}\u{4e2d}".to_owned();
        truncate(&mut s, 3);
        assert_eq!(s, "\u{4e2d}");
    }
}
