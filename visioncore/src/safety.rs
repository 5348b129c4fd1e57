//! Safety utilities for crash-proof visionOS rendering.
//!
//! Labels are cut on character boundaries only, and per-window content is
//! rendered behind a panic guard so one broken app cannot take the whole
//! desktop down.

/// Snap a byte position down to the nearest UTF-8 character boundary.
pub fn snap_to_char_boundary(s: &str, byte_pos: usize) -> usize {
    if byte_pos >= s.len() {
        return s.len();
    }
    (0..=byte_pos)
        .rev()
        .find(|&pos| s.is_char_boundary(pos))
        .unwrap_or(0)
}

/// Shorten `s` to at most `max_chars` characters, ending with `…` when cut.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let cut = s
        .char_indices()
        .nth(max_chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let mut out = s[..snap_to_char_boundary(s, cut)].trim_end().to_string();
    out.push('…');
    out
}

/// Run a closure, catching any panic. Returns the closure result on success,
/// or `fallback` on panic.
pub fn catch_or<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(_) => {
            log::error!("[visionos] caught panic in frame, recovered");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_multibyte() {
        // 'é' is 2 bytes
        let s = "café";
        assert_eq!(snap_to_char_boundary(s, 3), 3);
        assert_eq!(snap_to_char_boundary(s, 4), 3);
        assert_eq!(snap_to_char_boundary(s, 5), 5);
        assert_eq!(snap_to_char_boundary(s, 99), 5);
        assert_eq!(snap_to_char_boundary("", 2), 0);
    }

    #[test]
    fn test_ellipsize_short_title_untouched() {
        assert_eq!(ellipsize("Snake.exe", 18), "Snake.exe");
    }

    #[test]
    fn test_ellipsize_cuts_on_chars() {
        assert_eq!(ellipsize("Blender Animation", 8), "Blender…");
        assert_eq!(ellipsize("中文中文中文", 3), "中文…");
        assert_eq!(ellipsize("abc", 0), "");
    }

    #[test]
    fn test_catch_or_recovers() {
        let v = catch_or(7, || -> i32 { panic!("boom") });
        assert_eq!(v, 7);
        assert_eq!(catch_or(0, || 3), 3);
    }
}
